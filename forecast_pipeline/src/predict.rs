//! Full-dataset predictions and the predictions CSV

use crate::error::{PipelineError, Result};
use crate::features::FeatureMatrix;
use crate::report::write_atomic;
use crate::training::TrainedModel;
use chrono::NaiveDate;
use forecast_math::metrics::round_to;
use forecast_math::MathError;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Decimal places kept on predicted prices
pub const PREDICTION_DECIMALS: u32 = 2;

/// Which block of the chronological split a row belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Partition {
    Train,
    Test,
}

impl Partition {
    /// Rows before `split_idx` are training rows
    pub fn for_row(idx: usize, split_idx: usize) -> Self {
        if idx < split_idx {
            Partition::Train
        } else {
            Partition::Test
        }
    }
}

/// One row of the predictions CSV
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Actual_Price")]
    pub actual_price: f64,
    #[serde(rename = "Predicted_Price")]
    pub predicted_price: f64,
    #[serde(rename = "Error")]
    pub error: f64,
    #[serde(rename = "Absolute_Error")]
    pub absolute_error: f64,
    #[serde(rename = "Percentage_Error")]
    pub percentage_error: f64,
    #[serde(rename = "Dataset")]
    pub dataset: Partition,
}

impl PredictionRecord {
    /// Build a record; the prediction is rounded before any error is derived
    /// from it.
    pub fn new(
        idx: usize,
        date: NaiveDate,
        actual_price: f64,
        raw_prediction: f64,
        split_idx: usize,
    ) -> Result<Self> {
        if actual_price == 0.0 {
            return Err(MathError::DivisionByZero(format!(
                "Actual price on {} (row {}) is zero; percentage error is undefined",
                date, idx
            ))
            .into());
        }

        let predicted_price = round_to(raw_prediction, PREDICTION_DECIMALS);
        let error = actual_price - predicted_price;

        Ok(Self {
            date,
            actual_price,
            predicted_price,
            error,
            absolute_error: error.abs(),
            percentage_error: (error / actual_price).abs() * 100.0,
            dataset: Partition::for_row(idx, split_idx),
        })
    }
}

/// Run the model over every row and build one record per row, in order
pub fn generate_predictions(
    model: &TrainedModel,
    features: &FeatureMatrix,
    dates: &[NaiveDate],
    actuals: &[f64],
    split_idx: usize,
) -> Result<Vec<PredictionRecord>> {
    if dates.len() != features.len() || actuals.len() != features.len() {
        return Err(PipelineError::Config(format!(
            "{} feature rows, {} dates and {} actual prices do not line up",
            features.len(),
            dates.len(),
            actuals.len()
        )));
    }

    let predictions = model.predict(features)?;

    dates
        .iter()
        .zip(actuals)
        .zip(predictions)
        .enumerate()
        .map(|(idx, ((date, actual), predicted))| {
            PredictionRecord::new(idx, *date, *actual, predicted, split_idx)
        })
        .collect()
}

/// Write the records as CSV, creating the parent directory if needed
pub fn write_predictions<P: AsRef<Path>>(path: P, records: &[PredictionRecord]) -> Result<()> {
    let path = path.as_ref();

    let mut writer = csv::Writer::from_writer(Vec::new());
    for record in records {
        writer.serialize(record)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PipelineError::Io(e.into_error()))?;

    write_atomic(path, &bytes)?;
    info!("Wrote {} predictions to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_error_uses_rounded_prediction() {
        let record = PredictionRecord::new(0, day(1), 100.0, 99.996, 1).unwrap();

        assert_eq!(record.predicted_price, 100.0);
        assert_abs_diff_eq!(record.error, 0.0);
        assert_eq!(record.dataset, Partition::Train);

        let record = PredictionRecord::new(3, day(2), 2000.0, 1990.004, 1).unwrap();
        assert_eq!(record.predicted_price, 1990.0);
        assert_abs_diff_eq!(record.error, 10.0);
        assert_abs_diff_eq!(record.absolute_error, 10.0);
        assert_abs_diff_eq!(record.percentage_error, 0.5, epsilon = 1e-12);
        assert_eq!(record.dataset, Partition::Test);
    }

    #[test]
    fn test_negative_error_has_positive_magnitudes() {
        let record = PredictionRecord::new(0, day(1), 200.0, 210.0, 5).unwrap();
        assert_abs_diff_eq!(record.error, -10.0);
        assert_abs_diff_eq!(record.absolute_error, 10.0);
        assert_abs_diff_eq!(record.percentage_error, 5.0);
    }

    #[test]
    fn test_zero_actual_is_rejected() {
        let result = PredictionRecord::new(0, day(1), 0.0, 1.0, 1);
        assert!(matches!(
            result,
            Err(PipelineError::Math(MathError::DivisionByZero(_)))
        ));
    }

    #[test]
    fn test_partition_boundary() {
        assert_eq!(Partition::for_row(3, 4), Partition::Train);
        assert_eq!(Partition::for_row(4, 4), Partition::Test);
    }
}
