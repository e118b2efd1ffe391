//! Model training with a chronological train/test split

use crate::error::{PipelineError, Result};
use crate::features::FeatureMatrix;
use forecast_math::regression::{self, LinearModel};
use forecast_math::split;
use forecast_math::RegressionMetrics;
use log::info;

/// Linear model bound to the feature names it was fitted on
#[derive(Debug, Clone, PartialEq)]
pub struct TrainedModel {
    feature_names: Vec<String>,
    model: LinearModel,
}

impl TrainedModel {
    /// Bind an already fitted model to its feature names
    pub fn new(feature_names: Vec<String>, model: LinearModel) -> Result<Self> {
        if feature_names.len() != model.n_features() {
            return Err(PipelineError::Config(format!(
                "{} feature names for a model with {} coefficients",
                feature_names.len(),
                model.n_features()
            )));
        }
        Ok(Self {
            feature_names,
            model,
        })
    }

    /// Fit on every row of `features`
    pub fn fit(features: &FeatureMatrix, targets: &[f64]) -> Result<Self> {
        let model = regression::fit(features.rows(), targets)?;
        Ok(Self {
            feature_names: features.names().to_vec(),
            model,
        })
    }

    /// Feature names in coefficient order
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// `(feature name, coefficient)` pairs in fit order
    pub fn named_coefficients(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.feature_names
            .iter()
            .map(String::as_str)
            .zip(self.model.coefficients().iter().copied())
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.model.intercept()
    }

    /// Underlying positional model
    pub fn linear_model(&self) -> &LinearModel {
        &self.model
    }

    /// Predict every row; the matrix must have the fitted columns in the
    /// fitted order
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>> {
        if features.names() != self.feature_names.as_slice() {
            return Err(PipelineError::Config(format!(
                "model was fitted on {:?} but features are {:?}",
                self.feature_names,
                features.names()
            )));
        }
        Ok(self.model.predict(features.rows())?)
    }
}

/// Result of the training stage
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// Model fitted on the training block
    pub model: TrainedModel,
    /// First test row; rows before it were used for fitting
    pub split_idx: usize,
    /// Number of rows in the whole dataset
    pub n_rows: usize,
    /// Metrics on the training block
    pub train_metrics: RegressionMetrics,
    /// Metrics on the test block
    pub test_metrics: RegressionMetrics,
}

impl TrainingOutcome {
    /// Rows used for fitting
    pub fn train_size(&self) -> usize {
        self.split_idx
    }

    /// Rows held out for testing
    pub fn test_size(&self) -> usize {
        self.n_rows - self.split_idx
    }
}

/// Split chronologically at `split_ratio`, fit on the leading block and
/// score both blocks
pub fn train_model(
    features: &FeatureMatrix,
    targets: &[f64],
    split_ratio: f64,
) -> Result<TrainingOutcome> {
    if features.len() != targets.len() {
        return Err(PipelineError::Config(format!(
            "{} feature rows but {} targets",
            features.len(),
            targets.len()
        )));
    }

    let split_idx = split::split_index(features.len(), split_ratio)?;
    let (train_rows, test_rows) = split::split_at(features.rows(), split_idx)?;
    let (train_y, test_y) = split::split_at(targets, split_idx)?;

    info!(
        "Training on {} rows, testing on {} rows",
        train_rows.len(),
        test_rows.len()
    );

    let model = regression::fit(train_rows, train_y)?;

    let train_pred = model.predict(train_rows)?;
    let test_pred = model.predict(test_rows)?;

    let train_metrics = RegressionMetrics::compute(train_y, &train_pred)?;
    let test_metrics = RegressionMetrics::compute(test_y, &test_pred)?;

    Ok(TrainingOutcome {
        model: TrainedModel {
            feature_names: features.names().to_vec(),
            model,
        },
        split_idx,
        n_rows: features.len(),
        train_metrics,
        test_metrics,
    })
}
