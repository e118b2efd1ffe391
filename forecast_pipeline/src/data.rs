//! Loading the processed lag-feature CSV

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, StringRecord};
use forecast_math::MathError;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Date column plus every other column of the input file, in file order.
///
/// Columns declared numeric at load time are always numeric; any other
/// column is numeric when every value parses and text otherwise.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    dates: Vec<NaiveDate>,
    column_names: Vec<String>,
    columns: HashMap<String, Vec<f64>>,
    text_columns: HashMap<String, Vec<String>>,
}

/// Data loader for the processed CSV
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load the configured input file, declaring the feature and target
    /// columns numeric
    pub fn from_config(config: &PipelineConfig) -> Result<Dataset> {
        let mut numeric = config.feature_columns.clone();
        numeric.push(config.target_column.clone());
        Self::from_csv(&config.input_path, &config.date_column, &numeric)
    }

    /// Load a CSV whose `date_column` holds calendar dates.
    ///
    /// Every column in `numeric_columns` must exist and hold a number on
    /// every row; violations fail with `MissingColumn` or `Parse`.
    pub fn from_csv<P, S>(path: P, date_column: &str, numeric_columns: &[S]) -> Result<Dataset>
    where
        P: AsRef<Path>,
        S: AsRef<str>,
    {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PipelineError::FileNotFound(path.to_path_buf()));
        }

        let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let missing = |column: &str| PipelineError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        };

        let date_idx = headers
            .iter()
            .position(|h| h == date_column)
            .ok_or_else(|| missing(date_column))?;

        for declared in numeric_columns {
            if !headers.iter().any(|h| h == declared.as_ref()) {
                return Err(missing(declared.as_ref()));
            }
        }

        let mut lines = Vec::new();
        let mut records = Vec::new();
        for result in reader.records() {
            let record = result.map_err(record_error)?;
            lines.push(record.position().map(|p| p.line()).unwrap_or(0));
            records.push(record);
        }

        if records.is_empty() {
            return Err(MathError::InsufficientData(format!(
                "{} contains no data rows",
                path.display()
            ))
            .into());
        }

        let dates = records
            .iter()
            .zip(&lines)
            .map(|(record, &line)| parse_date(field(record, date_idx), line, date_column))
            .collect::<Result<Vec<_>>>()?;

        let mut column_names = Vec::with_capacity(headers.len() - 1);
        let mut columns = HashMap::new();
        let mut text_columns = HashMap::new();

        for (idx, name) in headers.iter().enumerate() {
            if idx == date_idx {
                continue;
            }

            let parsed = records
                .iter()
                .zip(&lines)
                .map(|(record, &line)| parse_number(field(record, idx), line, name))
                .collect::<Result<Vec<f64>>>();

            match parsed {
                Ok(values) => {
                    columns.insert(name.clone(), values);
                }
                Err(e) if numeric_columns.iter().any(|c| c.as_ref() == name) => return Err(e),
                Err(_) => {
                    debug!("Keeping non-numeric column '{}' as text", name);
                    let values = records
                        .iter()
                        .map(|record| field(record, idx).to_string())
                        .collect();
                    text_columns.insert(name.clone(), values);
                }
            }
            column_names.push(name.clone());
        }

        let dataset = Dataset {
            source: path.to_path_buf(),
            dates,
            column_names,
            columns,
            text_columns,
        };
        dataset.warn_if_unordered();

        info!(
            "Loaded {} rows and {} columns from {}",
            dataset.len(),
            dataset.column_names.len(),
            path.display()
        );

        Ok(dataset)
    }
}

fn field(record: &StringRecord, idx: usize) -> &str {
    record.get(idx).unwrap_or("").trim()
}

fn record_error(err: csv::Error) -> PipelineError {
    PipelineError::Parse {
        line: err.position().map(|p| p.line()).unwrap_or(0),
        column: "*".to_string(),
        message: err.to_string(),
    }
}

/// Parse `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS` into a calendar date
fn parse_date(raw: &str, line: u64, column: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
        .map_err(|e| PipelineError::Parse {
            line,
            column: column.to_string(),
            message: format!("invalid date '{}': {}", raw, e),
        })
}

/// Parse a finite number; `NaN` and `inf` are rejected like any other text
pub(crate) fn parse_number(raw: &str, line: u64, column: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(PipelineError::Parse {
            line,
            column: column.to_string(),
            message: format!("expected a finite number, found '{}'", raw),
        }),
    }
}

impl Dataset {
    /// Build a dataset in memory; every column must match the dates in length
    pub fn new(dates: Vec<NaiveDate>, columns: Vec<(String, Vec<f64>)>) -> Result<Self> {
        let mut column_names = Vec::with_capacity(columns.len());
        let mut map = HashMap::with_capacity(columns.len());

        for (name, values) in columns {
            if values.len() != dates.len() {
                return Err(PipelineError::Config(format!(
                    "column '{}' has {} values but there are {} dates",
                    name,
                    values.len(),
                    dates.len()
                )));
            }
            if map.insert(name.clone(), values).is_some() {
                return Err(PipelineError::Config(format!(
                    "column '{}' given twice",
                    name
                )));
            }
            column_names.push(name);
        }

        Ok(Self {
            source: PathBuf::from("<memory>"),
            dates,
            column_names,
            columns: map,
            text_columns: HashMap::new(),
        })
    }

    /// Where the data was loaded from
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Row dates, in file order
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Column names other than the date column, in file order
    pub fn column_names(&self) -> &[String] {
        &self.column_names
    }

    /// Values of a numeric column, if present
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Values of a column that was kept as text
    pub fn text_column(&self, name: &str) -> Option<&[String]> {
        self.text_columns.get(name).map(Vec::as_slice)
    }

    /// Values of a numeric column, failing with `MissingColumn` when absent
    pub fn require_column(&self, name: &str) -> Result<&[f64]> {
        self.column(name).ok_or_else(|| PipelineError::MissingColumn {
            column: name.to_string(),
            path: self.source.clone(),
        })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Check if the dataset has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Rows are used in file order; a descending date only gets a warning
    fn warn_if_unordered(&self) {
        if let Some(pos) = self.dates.windows(2).position(|w| w[1] < w[0]) {
            warn!(
                "Dates in {} are not ascending (row {} is {} after {}); the chronological split uses file order",
                self.source.display(),
                pos + 1,
                self.dates[pos + 1],
                self.dates[pos]
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date("2024-03-15", 2, "Date").unwrap(), expected);
        assert_eq!(parse_date("2024-03-15 00:00:00", 2, "Date").unwrap(), expected);
        assert!(parse_date("15/03/2024", 2, "Date").is_err());
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert_eq!(parse_number("1834.25", 3, "Price_Lag1").unwrap(), 1834.25);
        match parse_number("abc", 3, "Price_Lag1") {
            Err(PipelineError::Parse { line, column, .. }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "Price_Lag1");
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
        assert!(parse_number("", 3, "Price_Lag1").is_err());
    }

    #[test]
    fn test_parse_number_rejects_non_finite() {
        for raw in ["NaN", "nan", "inf", "-inf", "infinity"] {
            assert!(
                matches!(
                    parse_number(raw, 4, "Target_Price"),
                    Err(PipelineError::Parse { line: 4, .. })
                ),
                "'{}' should not parse",
                raw
            );
        }
        assert_eq!(parse_number("-12.5e1", 4, "Target_Price").unwrap(), -125.0);
    }

    #[test]
    fn test_in_memory_dataset_length_check() {
        let dates = vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()];
        let result = Dataset::new(dates, vec![("Price_Lag1".to_string(), vec![1.0, 2.0])]);
        assert!(result.is_err());
    }
}
