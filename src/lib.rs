//! # Stock Forecast
//!
//! Workspace facade for the linear-regression price forecasting pipeline.
//!
//! - [`math`]: chronological splitting, least-squares fitting, error metrics
//! - [`pipeline`]: CSV loading, training, predictions, reports, evaluation
//!
//! ## Example
//!
//! ```
//! use stock_forecast_workspace::math::metrics::{mean_absolute_error, price_accuracy};
//!
//! let actual = [100.0, 200.0];
//! let predicted = [110.0, 190.0];
//! assert_eq!(mean_absolute_error(&actual, &predicted).unwrap(), 10.0);
//! assert_eq!(price_accuracy(&actual, &predicted, 25.0).unwrap(), 100.0);
//! ```

pub use forecast_math as math;
pub use forecast_pipeline as pipeline;

pub use forecast_pipeline::{PipelineConfig, PipelineError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = PipelineConfig::default();
        assert_eq!(
            config.input_path,
            std::path::Path::new("data/processed/processed_data.csv")
        );
        assert_eq!(
            config.evaluation_path(),
            std::path::Path::new("outputs/evaluation_summary.txt")
        );
    }
}
