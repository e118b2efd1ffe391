//! End-to-end runs: load, train, predict, report, evaluate

use crate::config::PipelineConfig;
use crate::data::DataLoader;
use crate::error::Result;
use crate::evaluate::{self, EvaluationSummary};
use crate::features::select_features;
use crate::predict::{generate_predictions, write_predictions, PredictionRecord};
use crate::report::{format_evaluation_summary, format_model_report, write_atomic};
use crate::training::{train_model, TrainingOutcome};
use log::info;

/// Everything produced by the training half of the pipeline
#[derive(Debug, Clone)]
pub struct TrainingRun {
    pub outcome: TrainingOutcome,
    pub predictions: Vec<PredictionRecord>,
}

/// Load the input, fit the model, write the predictions CSV and the model
/// performance report
pub fn run_training(config: &PipelineConfig) -> Result<TrainingRun> {
    config.validate()?;

    let dataset = DataLoader::from_config(config)?;
    let (features, targets) =
        select_features(&dataset, &config.feature_columns, &config.target_column)?;
    info!(
        "Loaded dataset: {} samples, {} features",
        features.len(),
        features.width()
    );
    info!("Model: Linear Regression");

    let outcome = train_model(&features, &targets, config.split_ratio)?;

    let predictions = generate_predictions(
        &outcome.model,
        &features,
        dataset.dates(),
        &targets,
        outcome.split_idx,
    )?;

    write_predictions(config.predictions_path(), &predictions)?;

    let report_path = config.model_report_path();
    write_atomic(&report_path, format_model_report(&outcome).as_bytes())?;
    info!("Wrote model report to {}", report_path.display());

    Ok(TrainingRun {
        outcome,
        predictions,
    })
}

/// Read the predictions CSV and write the evaluation summary
pub fn run_evaluation(config: &PipelineConfig) -> Result<EvaluationSummary> {
    config.validate()?;

    let columns = evaluate::read_predictions(config.predictions_path())?;
    let summary = evaluate::evaluate(
        &columns,
        &config.percentage_tolerances,
        &config.price_tolerances,
    )?;

    let summary_path = config.evaluation_path();
    write_atomic(&summary_path, format_evaluation_summary(&summary).as_bytes())?;
    info!("Wrote evaluation summary to {}", summary_path.display());

    Ok(summary)
}

/// Training followed by evaluation
pub fn run(config: &PipelineConfig) -> Result<(TrainingRun, EvaluationSummary)> {
    let training = run_training(config)?;
    let summary = run_evaluation(config)?;
    Ok((training, summary))
}
