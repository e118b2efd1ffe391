//! Evaluation of the predictions CSV over the whole dataset
//!
//! Metrics are recomputed from the written file and are independent of the
//! train/test metrics computed during training.

use crate::data::parse_number;
use crate::error::{PipelineError, Result};
use csv::ReaderBuilder;
use forecast_math::metrics::{
    optional_r_squared, percentage_accuracy, price_accuracy, root_mean_squared_error,
};
use forecast_math::MathError;
use log::info;
use serde::Serialize;
use std::path::Path;

/// Columns the evaluator reads from the predictions file
pub const REQUIRED_COLUMNS: [&str; 3] = ["Actual_Price", "Predicted_Price", "Absolute_Error"];

/// Price columns read back from a predictions file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionColumns {
    pub actual: Vec<f64>,
    pub predicted: Vec<f64>,
    pub absolute_error: Vec<f64>,
}

impl PredictionColumns {
    /// Number of rows
    pub fn len(&self) -> usize {
        self.actual.len()
    }

    /// Check if no rows were read
    pub fn is_empty(&self) -> bool {
        self.actual.is_empty()
    }
}

/// Share of rows within one tolerance band
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceAccuracy {
    pub tolerance: f64,
    /// Percentage of rows, 0 to 100
    pub accuracy: f64,
}

/// Accuracy bands and regression metrics over every prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub n_rows: usize,
    pub percentage_accuracy: Vec<ToleranceAccuracy>,
    pub price_accuracy: Vec<ToleranceAccuracy>,
    pub mae: f64,
    pub rmse: f64,
    /// `None` when every actual price is identical or there is one row
    pub r2: Option<f64>,
}

/// Read the columns needed for evaluation from a predictions CSV
pub fn read_predictions<P: AsRef<Path>>(path: P) -> Result<PredictionColumns> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PipelineError::FileNotFound(path.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let headers = reader.headers()?.clone();

    let mut indices = [0usize; 3];
    for (slot, column) in indices.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| PipelineError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            })?;
    }

    let mut columns = PredictionColumns::default();
    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let mut values = [0.0f64; 3];
        for ((value, idx), column) in values.iter_mut().zip(indices).zip(REQUIRED_COLUMNS) {
            *value = parse_number(record.get(idx).unwrap_or("").trim(), line, column)?;
        }

        columns.actual.push(values[0]);
        columns.predicted.push(values[1]);
        columns.absolute_error.push(values[2]);
    }

    Ok(columns)
}

/// Compute accuracy bands and full-dataset metrics
pub fn evaluate(
    columns: &PredictionColumns,
    percentage_tolerances: &[f64],
    price_tolerances: &[f64],
) -> Result<EvaluationSummary> {
    if columns.is_empty() {
        return Err(MathError::InsufficientData("no predictions to evaluate".to_string()).into());
    }

    let actual = &columns.actual;
    let predicted = &columns.predicted;

    let mae = columns.absolute_error.iter().sum::<f64>() / columns.len() as f64;
    let rmse = root_mean_squared_error(actual, predicted)?;
    let r2 = optional_r_squared(actual, predicted)?;

    let pct_bands = percentage_tolerances
        .iter()
        .map(|&tolerance| -> Result<ToleranceAccuracy> {
            Ok(ToleranceAccuracy {
                tolerance,
                accuracy: percentage_accuracy(actual, predicted, tolerance)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let price_bands = price_tolerances
        .iter()
        .map(|&tolerance| -> Result<ToleranceAccuracy> {
            Ok(ToleranceAccuracy {
                tolerance,
                accuracy: price_accuracy(actual, predicted, tolerance)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    info!("Evaluated {} predictions", columns.len());

    Ok(EvaluationSummary {
        n_rows: columns.len(),
        percentage_accuracy: pct_bands,
        price_accuracy: price_bands,
        mae,
        rmse,
        r2,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_evaluate_two_rows() {
        let columns = PredictionColumns {
            actual: vec![100.0, 200.0],
            predicted: vec![110.0, 190.0],
            absolute_error: vec![10.0, 10.0],
        };

        let summary = evaluate(&columns, &[6.0, 11.0], &[5.0, 25.0]).unwrap();
        assert_abs_diff_eq!(summary.mae, 10.0);
        assert_abs_diff_eq!(summary.rmse, 10.0);
        // 10% and 5% relative errors
        assert_abs_diff_eq!(summary.percentage_accuracy[0].accuracy, 50.0);
        assert_abs_diff_eq!(summary.percentage_accuracy[1].accuracy, 100.0);
        assert_abs_diff_eq!(summary.price_accuracy[0].accuracy, 0.0);
        assert_abs_diff_eq!(summary.price_accuracy[1].accuracy, 100.0);
        assert_abs_diff_eq!(summary.r2.unwrap(), 0.96, epsilon = 1e-12);
    }

    #[test]
    fn test_read_predictions_rejects_nan() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("predictions.csv");
        std::fs::write(
            &path,
            "Actual_Price,Predicted_Price,Absolute_Error\n100.0,101.0,1.0\n102.0,NaN,NaN\n",
        )
        .unwrap();

        match read_predictions(&path) {
            Err(PipelineError::Parse { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "Predicted_Price");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_evaluate_empty_is_error() {
        let result = evaluate(&PredictionColumns::default(), &[1.0], &[25.0]);
        assert!(result.is_err());
    }
}
