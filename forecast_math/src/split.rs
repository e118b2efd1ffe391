//! Chronological train/test splitting
//!
//! Rows are never shuffled: the leading block trains the model and the
//! trailing block tests it, so the test rows are always "in the future"
//! relative to the training rows.

use crate::{MathError, Result};

/// Ratio of rows assigned to the training block
pub const DEFAULT_SPLIT_RATIO: f64 = 0.8;

/// Compute the split index `floor(n * ratio)`.
///
/// Fails when the ratio is outside `(0, 1)` or when either partition
/// would be empty.
pub fn split_index(n: usize, ratio: f64) -> Result<usize> {
    if !(ratio > 0.0 && ratio < 1.0) {
        return Err(MathError::InvalidInput(format!(
            "Split ratio must be between 0 and 1 (exclusive), got {}",
            ratio
        )));
    }

    let split_idx = (n as f64 * ratio).floor() as usize;

    if split_idx == 0 || split_idx >= n {
        return Err(MathError::InsufficientData(format!(
            "Splitting {} rows at ratio {} leaves an empty partition (train {}, test {})",
            n,
            ratio,
            split_idx,
            n.saturating_sub(split_idx)
        )));
    }

    Ok(split_idx)
}

/// Split a slice at an already computed index.
///
/// Use the same `split_idx` for features and targets so they stay aligned.
pub fn split_at<T>(rows: &[T], split_idx: usize) -> Result<(&[T], &[T])> {
    if split_idx > rows.len() {
        return Err(MathError::InvalidInput(format!(
            "Split index {} is past the end of {} rows",
            split_idx,
            rows.len()
        )));
    }

    Ok(rows.split_at(split_idx))
}

/// Compute the split index for `rows` and split it
pub fn chronological_split<T>(rows: &[T], ratio: f64) -> Result<(&[T], &[T])> {
    let split_idx = split_index(rows.len(), ratio)?;
    split_at(rows, split_idx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5, 4)]
    #[case(10, 8)]
    #[case(11, 8)]
    #[case(99, 79)]
    #[case(1000, 800)]
    fn test_split_index_floors(#[case] n: usize, #[case] expected: usize) {
        let idx = split_index(n, DEFAULT_SPLIT_RATIO).unwrap();
        assert_eq!(idx, expected);
        assert_eq!(idx + (n - idx), n);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    fn test_split_index_too_few_rows(#[case] n: usize) {
        let result = split_index(n, DEFAULT_SPLIT_RATIO);
        assert!(matches!(result, Err(MathError::InsufficientData(_))));
    }

    #[test]
    fn test_split_index_rejects_bad_ratio() {
        assert!(matches!(
            split_index(10, 0.0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            split_index(10, 1.0),
            Err(MathError::InvalidInput(_))
        ));
        assert!(matches!(
            split_index(10, f64::NAN),
            Err(MathError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_chronological_split_keeps_order() {
        let rows = vec![1, 2, 3, 4, 5];
        let (train, test) = chronological_split(&rows, DEFAULT_SPLIT_RATIO).unwrap();
        assert_eq!(train, &[1, 2, 3, 4]);
        assert_eq!(test, &[5]);
    }

    #[test]
    fn test_split_at_out_of_range() {
        let rows = vec![1.0, 2.0];
        assert!(split_at(&rows, 3).is_err());
    }
}
