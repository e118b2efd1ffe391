//! # Forecast Pipeline
//!
//! Linear-regression stock price forecasting over lag features.
//!
//! ## Stages
//!
//! - Load the processed CSV (`Date` plus numeric lag-feature columns)
//! - Select the feature columns, in coefficient order, and the target
//! - Split chronologically, fit ordinary least squares on the leading block
//! - Score the train and test blocks (MAE, RMSE, R²)
//! - Predict every row and write `predictions.csv`
//! - Re-read the predictions and report tolerance-band accuracy
//!
//! ## Quick Start
//!
//! ```no_run
//! use forecast_pipeline::{pipeline, PipelineConfig};
//!
//! let config = PipelineConfig::default();
//! let (training, summary) = pipeline::run(&config)?;
//!
//! println!("Test MAE: {:.2}", training.outcome.test_metrics.mae);
//! println!("Full-dataset RMSE: {:.2}", summary.rmse);
//! # Ok::<(), forecast_pipeline::PipelineError>(())
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod pipeline;
pub mod predict;
pub mod report;
pub mod training;

// Re-export commonly used types
pub use crate::config::PipelineConfig;
pub use crate::data::{DataLoader, Dataset};
pub use crate::error::{PipelineError, Result};
pub use crate::evaluate::EvaluationSummary;
pub use crate::features::FeatureMatrix;
pub use crate::predict::{Partition, PredictionRecord};
pub use crate::training::{TrainedModel, TrainingOutcome};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
