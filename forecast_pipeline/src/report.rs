//! Fixed-layout text reports and atomic file output

use crate::error::Result;
use crate::evaluate::EvaluationSummary;
use crate::training::TrainingOutcome;
use forecast_math::metrics::format_optional;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

const RULE: &str = "----------------------------------------";

/// Write `contents` to `path` through a temporary file in the same
/// directory, so readers never see a half-written file. Creates the parent
/// directory if needed.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

/// Sample counts, train/test metrics and coefficients
pub fn format_model_report(outcome: &TrainingOutcome) -> String {
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out);
    let _ = writeln!(out, "STOCK PRICE PREDICTION - MODEL REPORT");
    let _ = writeln!(out, "====================================");
    let _ = writeln!(out);
    let _ = writeln!(out, "Train Samples : {}", outcome.train_size());
    let _ = writeln!(out, "Test Samples  : {}", outcome.test_size());

    for (title, metrics) in [
        ("TRAIN METRICS", &outcome.train_metrics),
        ("TEST METRICS", &outcome.test_metrics),
    ] {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", title);
        let _ = writeln!(out, "{}", "-".repeat(title.len()));
        let _ = writeln!(out, "MAE  : {:.2}", metrics.mae);
        let _ = writeln!(out, "RMSE : {:.2}", metrics.rmse);
        let _ = writeln!(out, "R2   : {}", metrics.r2_display(2));
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "MODEL COEFFICIENTS");
    let _ = writeln!(out, "------------------");
    for (name, coef) in outcome.model.named_coefficients() {
        let _ = writeln!(out, "{:<17} : {:.2}", name, coef);
    }
    let _ = writeln!(out, "{:<17} : {:.2}", "Intercept", outcome.model.intercept());
    let _ = writeln!(out);

    out
}

/// Coefficient table for the console, six decimals
pub fn format_coefficient_table(outcome: &TrainingOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", "-".repeat(60));
    for (name, coef) in outcome.model.named_coefficients() {
        let _ = writeln!(out, "{:<25} : {:>12.6}", name, coef);
    }
    let _ = writeln!(out, "{:<25} : {:>12.6}", "Intercept", outcome.model.intercept());
    let _ = write!(out, "{}", "-".repeat(60));
    out
}

fn percent_label(tolerance: f64) -> String {
    if (tolerance * 10.0).fract() == 0.0 {
        format!("{:.1}", tolerance)
    } else {
        tolerance.to_string()
    }
}

/// Accuracy bands and full-dataset metrics, without a trailing newline
pub fn format_evaluation_summary(summary: &EvaluationSummary) -> String {
    let mut lines = Vec::new();

    lines.push("PERCENTAGE-BASED ACCURACY".to_string());
    lines.push(RULE.to_string());
    for band in &summary.percentage_accuracy {
        lines.push(format!(
            "Accuracy within ±{}% : {:.2}%",
            percent_label(band.tolerance),
            band.accuracy
        ));
    }

    lines.push(String::new());
    lines.push("PRICE-BASED ACCURACY".to_string());
    lines.push(RULE.to_string());
    for band in &summary.price_accuracy {
        lines.push(format!(
            "Accuracy within ±{:<4}: {:.2}%",
            band.tolerance.to_string(),
            band.accuracy
        ));
    }

    lines.push(String::new());
    lines.push("REGRESSION METRICS".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("MAE  : {:.2}", summary.mae));
    lines.push(format!("RMSE : {:.2}", summary.rmse));
    lines.push(format!("R²   : {}", format_optional(summary.r2, 4)));

    lines.join("\n")
}
