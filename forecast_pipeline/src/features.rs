//! Feature selection
//!
//! The feature matrix carries its column names so that coefficients are
//! always reported against the name they were fitted for.

use crate::data::Dataset;
use crate::error::{PipelineError, Result};

/// Row-major feature matrix with named columns
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build a matrix; every row must have one value per name
    pub fn new(names: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some(idx) = rows.iter().position(|row| row.len() != names.len()) {
            return Err(PipelineError::Config(format!(
                "feature row {} has {} values for {} feature names",
                idx,
                rows[idx].len(),
                names.len()
            )));
        }
        Ok(Self { names, rows })
    }

    /// Feature names, in column order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the matrix has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of feature columns
    pub fn width(&self) -> usize {
        self.names.len()
    }
}

/// Select `feature_columns` (in that order) as the feature matrix and
/// `target_column` as the target vector
pub fn select_features<S: AsRef<str>>(
    dataset: &Dataset,
    feature_columns: &[S],
    target_column: &str,
) -> Result<(FeatureMatrix, Vec<f64>)> {
    let columns = feature_columns
        .iter()
        .map(|name| dataset.require_column(name.as_ref()))
        .collect::<Result<Vec<&[f64]>>>()?;
    let target = dataset.require_column(target_column)?.to_vec();

    let rows = (0..dataset.len())
        .map(|i| columns.iter().map(|col| col[i]).collect())
        .collect();
    let names = feature_columns
        .iter()
        .map(|name| name.as_ref().to_string())
        .collect();

    Ok((FeatureMatrix { names, rows }, target))
}
