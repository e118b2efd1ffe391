use forecast_pipeline::pipeline;
use forecast_pipeline::report::format_coefficient_table;
use forecast_pipeline::{PipelineConfig, PipelineError, NAME, VERSION};
use log::error;
use std::process::ExitCode;

fn run() -> Result<(), PipelineError> {
    println!("{}", "=".repeat(80));
    println!("STOCK PRICE PREDICTION - COMPLETE PIPELINE ({} v{})", NAME, VERSION);
    println!("{}", "=".repeat(80));

    let config = PipelineConfig::default();

    let training = pipeline::run_training(&config)?;
    let outcome = &training.outcome;

    println!("\nTRAIN METRICS");
    print!("{}", outcome.train_metrics);
    println!("\nTEST METRICS");
    print!("{}", outcome.test_metrics);

    println!("\nMODEL COEFFICIENTS");
    println!("{}", format_coefficient_table(outcome));

    let summary = pipeline::run_evaluation(&config)?;
    println!(
        "\nFull dataset: MAE {:.2}, RMSE {:.2} over {} predictions",
        summary.mae, summary.rmse, summary.n_rows
    );

    println!("\nPipeline completed successfully.");
    println!("Outputs saved in {}", config.output_dir.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Pipeline failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
