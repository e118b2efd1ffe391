//! Error metrics and tolerance-band accuracy for price predictions
//!
//! Every function takes parallel `actual` / `predicted` slices which must be
//! non-empty and of equal length.

use crate::{MathError, Result};
use log::warn;
use serde::Serialize;

fn validate_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() || actual.is_empty() {
        return Err(MathError::InvalidInput(format!(
            "Actual and predicted values must have the same non-zero length (got {} and {})",
            actual.len(),
            predicted.len()
        )));
    }
    Ok(())
}

/// Mean Absolute Error
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs())
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Mean Squared Error
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;

    let sum: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    Ok(sum / actual.len() as f64)
}

/// Root Mean Squared Error
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Coefficient of determination, `1 - SS_res / SS_tot`.
///
/// Undefined for fewer than two points or when every actual value is the
/// same; both cases return [`MathError::DegenerateInput`].
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    validate_pair(actual, predicted)?;

    if actual.len() < 2 {
        return Err(MathError::DegenerateInput(format!(
            "R-squared needs at least 2 points, got {}",
            actual.len()
        )));
    }

    let mean = actual.iter().sum::<f64>() / actual.len() as f64;
    let ss_total: f64 = actual.iter().map(|a| (a - mean).powi(2)).sum();
    let ss_residual: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).powi(2))
        .sum();

    if ss_total == 0.0 {
        return Err(MathError::DegenerateInput(
            "R-squared is undefined: actual values have zero variance".to_string(),
        ));
    }

    Ok(1.0 - ss_residual / ss_total)
}

/// Percentage of rows whose relative error is within `tolerance_pct` percent.
///
/// A zero actual value makes the relative error undefined and fails with
/// [`MathError::DivisionByZero`] rather than being counted either way.
pub fn percentage_accuracy(actual: &[f64], predicted: &[f64], tolerance_pct: f64) -> Result<f64> {
    validate_pair(actual, predicted)?;

    let mut hits = 0usize;
    for (idx, (a, p)) in actual.iter().zip(predicted).enumerate() {
        if *a == 0.0 {
            return Err(MathError::DivisionByZero(format!(
                "Actual value at row {} is zero; percentage error is undefined",
                idx
            )));
        }
        if (a - p).abs() / a.abs() * 100.0 <= tolerance_pct {
            hits += 1;
        }
    }

    Ok(hits as f64 / actual.len() as f64 * 100.0)
}

/// Percentage of rows whose absolute error is within `tolerance` price units
pub fn price_accuracy(actual: &[f64], predicted: &[f64], tolerance: f64) -> Result<f64> {
    validate_pair(actual, predicted)?;

    let hits = actual
        .iter()
        .zip(predicted)
        .filter(|(a, p)| (*a - *p).abs() <= tolerance)
        .count();

    Ok(hits as f64 / actual.len() as f64 * 100.0)
}

/// Round to `decimals` places, ties to even
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round_ties_even() / factor
}

/// MAE, RMSE and R-squared for one set of predictions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionMetrics {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Coefficient of determination; `None` when undefined
    pub r2: Option<f64>,
}

impl RegressionMetrics {
    /// Compute all three metrics. An undefined R-squared is logged and
    /// stored as `None`; any other failure is returned.
    pub fn compute(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        let mae = mean_absolute_error(actual, predicted)?;
        let rmse = root_mean_squared_error(actual, predicted)?;
        let r2 = optional_r_squared(actual, predicted)?;

        Ok(Self { mae, rmse, r2 })
    }

    /// R-squared formatted with `decimals` places, or `N/A`
    pub fn r2_display(&self, decimals: usize) -> String {
        format_optional(self.r2, decimals)
    }
}

/// R-squared with the degenerate case mapped to `None`
pub fn optional_r_squared(actual: &[f64], predicted: &[f64]) -> Result<Option<f64>> {
    match r_squared(actual, predicted) {
        Ok(r2) => Ok(Some(r2)),
        Err(MathError::DegenerateInput(reason)) => {
            warn!("{}; reporting R-squared as N/A", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Format an optional value with `decimals` places, `N/A` when absent
pub fn format_optional(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => "N/A".to_string(),
    }
}

impl std::fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MAE  : {:.2}", self.mae)?;
        writeln!(f, "RMSE : {:.2}", self.rmse)?;
        writeln!(f, "R²   : {}", self.r2_display(4))?;
        Ok(())
    }
}
