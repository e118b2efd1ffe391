//! Pipeline configuration
//!
//! Every stage takes its paths, column names and tolerances from a
//! [`PipelineConfig`] instead of module-level constants.

use crate::error::{PipelineError, Result};
use forecast_math::split::DEFAULT_SPLIT_RATIO;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Predictions CSV written by the training run and read by the evaluator
pub const PREDICTIONS_FILE: &str = "predictions.csv";
/// Train/test metrics and coefficients
pub const MODEL_REPORT_FILE: &str = "model_performance.txt";
/// Tolerance-band accuracy report
pub const EVALUATION_FILE: &str = "evaluation_summary.txt";

/// Configuration for a pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Processed CSV with lag features
    pub input_path: PathBuf,
    /// Directory receiving predictions and reports
    pub output_dir: PathBuf,
    /// Share of leading rows used for training
    pub split_ratio: f64,
    /// Name of the date column
    pub date_column: String,
    /// Feature columns, in coefficient order
    pub feature_columns: Vec<String>,
    /// Column holding the value to predict
    pub target_column: String,
    /// Relative tolerance bands, in percent
    pub percentage_tolerances: Vec<f64>,
    /// Absolute tolerance bands, in price units
    pub price_tolerances: Vec<f64>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/processed/processed_data.csv"),
            output_dir: PathBuf::from("outputs"),
            split_ratio: DEFAULT_SPLIT_RATIO,
            date_column: "Date".to_string(),
            feature_columns: vec![
                "Price_Lag1".to_string(),
                "Data_Lag1".to_string(),
                "Data_Change_Lag1".to_string(),
            ],
            target_column: "Target_Price".to_string(),
            percentage_tolerances: vec![0.5, 1.0, 2.0],
            price_tolerances: vec![25.0, 50.0, 100.0],
        }
    }
}

impl PipelineConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Check the configuration for values no stage can work with
    pub fn validate(&self) -> Result<()> {
        if !(self.split_ratio > 0.0 && self.split_ratio < 1.0) {
            return Err(PipelineError::Config(format!(
                "split_ratio must be between 0 and 1 (exclusive), got {}",
                self.split_ratio
            )));
        }

        if self.feature_columns.is_empty() {
            return Err(PipelineError::Config(
                "at least one feature column is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in &self.feature_columns {
            if !seen.insert(name.as_str()) {
                return Err(PipelineError::Config(format!(
                    "feature column '{}' listed multiple times",
                    name
                )));
            }
        }

        if seen.contains(self.target_column.as_str()) || seen.contains(self.date_column.as_str())
        {
            return Err(PipelineError::Config(
                "target and date columns cannot also be features".to_string(),
            ));
        }

        for tol in self
            .percentage_tolerances
            .iter()
            .chain(&self.price_tolerances)
        {
            if !tol.is_finite() || *tol < 0.0 {
                return Err(PipelineError::Config(format!(
                    "tolerances must be finite and non-negative, got {}",
                    tol
                )));
            }
        }

        Ok(())
    }

    /// Path of the predictions CSV
    pub fn predictions_path(&self) -> PathBuf {
        self.output_dir.join(PREDICTIONS_FILE)
    }

    /// Path of the model performance report
    pub fn model_report_path(&self) -> PathBuf {
        self.output_dir.join(MODEL_REPORT_FILE)
    }

    /// Path of the evaluation summary
    pub fn evaluation_path(&self) -> PathBuf {
        self.output_dir.join(EVALUATION_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.predictions_path(), Path::new("outputs/predictions.csv"));
        assert_eq!(
            config.feature_columns,
            vec!["Price_Lag1", "Data_Lag1", "Data_Change_Lag1"]
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = PipelineConfig::from_json_str(r#"{"split_ratio": 0.75}"#).unwrap();
        assert_eq!(config.split_ratio, 0.75);
        assert_eq!(config.target_column, "Target_Price");
        assert_eq!(config.price_tolerances, vec![25.0, 50.0, 100.0]);
    }

    #[test]
    fn test_invalid_configs() {
        let bad_ratio = PipelineConfig {
            split_ratio: 1.0,
            ..PipelineConfig::default()
        };
        assert!(matches!(bad_ratio.validate(), Err(PipelineError::Config(_))));

        let duplicate = PipelineConfig {
            feature_columns: vec!["Price_Lag1".to_string(), "Price_Lag1".to_string()],
            ..PipelineConfig::default()
        };
        assert!(matches!(duplicate.validate(), Err(PipelineError::Config(_))));

        let negative = PipelineConfig {
            price_tolerances: vec![-1.0],
            ..PipelineConfig::default()
        };
        assert!(negative.validate().is_err());

        assert!(matches!(
            PipelineConfig::from_json_str("{not json"),
            Err(PipelineError::Json(_))
        ));
    }
}
