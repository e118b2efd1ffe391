use forecast_pipeline::pipeline::run_evaluation;
use forecast_pipeline::PipelineConfig;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    match run_evaluation(&config) {
        Ok(_) => {
            println!("Evaluation saved successfully!");
            println!("File: {}", config.evaluation_path().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Evaluation failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
