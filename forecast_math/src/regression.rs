//! Ordinary least squares linear regression
//!
//! The intercept is handled by centering: subtract the column means from the
//! features and the mean from the target, solve the centered problem, then
//! recover `intercept = mean(y) - mean(x) . beta`. The centered system is
//! solved with a singular value decomposition, which stays stable when the
//! normal equations would be badly conditioned.

use crate::{MathError, Result};
use log::debug;
use nalgebra::{DMatrix, DVector};
use serde::Serialize;

/// Singular values below `RANK_TOLERANCE * largest` count as zero
pub const RANK_TOLERANCE: f64 = 1e-10;

/// Fitted linear model: `y = x . coefficients + intercept`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinearModel {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearModel {
    /// Create a model from known parameters
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Coefficients, positionally aligned with the feature columns used to fit
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// Intercept term
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Number of features the model expects per row
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predict a single row
    pub fn predict_row(&self, row: &[f64]) -> Result<f64> {
        if row.len() != self.coefficients.len() {
            return Err(MathError::InvalidInput(format!(
                "Expected {} features per row, got {}",
                self.coefficients.len(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(&self.coefficients)
            .map(|(x, b)| x * b)
            .sum::<f64>()
            + self.intercept)
    }

    /// Predict every row of a feature matrix
    pub fn predict<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Vec<f64>> {
        rows.iter().map(|row| self.predict_row(row.as_ref())).collect()
    }
}

/// Fit an OLS model with intercept on `rows` (one feature vector per row)
/// against `targets`.
pub fn fit<R: AsRef<[f64]>>(rows: &[R], targets: &[f64]) -> Result<LinearModel> {
    if rows.len() != targets.len() {
        return Err(MathError::InvalidInput(format!(
            "Feature rows ({}) and targets ({}) differ in length",
            rows.len(),
            targets.len()
        )));
    }

    let n_features = match rows.first() {
        Some(row) => row.as_ref().len(),
        None => {
            return Err(MathError::InsufficientData(
                "Cannot fit a model on zero rows".to_string(),
            ))
        }
    };

    if n_features == 0 {
        return Err(MathError::InvalidInput(
            "Feature rows must contain at least one column".to_string(),
        ));
    }

    if let Some((idx, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.as_ref().len() != n_features)
    {
        return Err(MathError::InvalidInput(format!(
            "Row {} has {} features, expected {}",
            idx,
            row.as_ref().len(),
            n_features
        )));
    }

    let n = rows.len();
    if n < n_features + 1 {
        return Err(MathError::InsufficientData(format!(
            "Need at least {} rows to fit {} features and an intercept, got {}",
            n_features + 1,
            n_features,
            n
        )));
    }

    if rows
        .iter()
        .flat_map(|row| row.as_ref().iter())
        .chain(targets.iter())
        .any(|v| !v.is_finite())
    {
        return Err(MathError::InvalidInput(
            "Features and targets must be finite".to_string(),
        ));
    }

    let x_means: Vec<f64> = (0..n_features)
        .map(|j| rows.iter().map(|row| row.as_ref()[j]).sum::<f64>() / n as f64)
        .collect();
    let y_mean = targets.iter().sum::<f64>() / n as f64;

    let centered_x = DMatrix::from_fn(n, n_features, |i, j| rows[i].as_ref()[j] - x_means[j]);
    let centered_y = DVector::from_iterator(n, targets.iter().map(|y| y - y_mean));

    let svd = centered_x.svd(true, true);
    let largest = svd.singular_values.max();
    let eps = RANK_TOLERANCE * largest;
    let rank = if largest > 0.0 { svd.rank(eps) } else { 0 };

    debug!(
        "OLS fit on {} rows x {} features, singular values {:?}",
        n,
        n_features,
        svd.singular_values.as_slice()
    );

    if rank < n_features {
        return Err(MathError::SingularMatrix(format!(
            "Centered feature matrix has rank {} but {} features; columns are collinear or constant",
            rank, n_features
        )));
    }

    let beta = svd
        .solve(&centered_y, eps)
        .map_err(|e| MathError::SingularMatrix(e.to_string()))?;

    let coefficients: Vec<f64> = beta.iter().copied().collect();
    let intercept = y_mean
        - x_means
            .iter()
            .zip(&coefficients)
            .map(|(m, b)| m * b)
            .sum::<f64>();

    Ok(LinearModel {
        coefficients,
        intercept,
    })
}
