//! Scale reliability: Cronbach's alpha, split-half with
//! Spearman-Brown correction, and test-retest correlation.

use crate::error::StatError;
use crate::stats::{correlation, variance};

/// Cronbach's alpha for internal consistency.
///
/// `items` holds one row per item, one column per respondent.
/// `alpha = k/(k−1) · (1 − Σ var(item) / var(total))` where the total
/// is each respondent's sum across items. Values near 1 indicate the
/// items measure one construct; alpha can go negative when items
/// disagree more than they agree.
///
/// # Examples
/// ```
/// use psylab::reliability::cronbach_alpha;
///
/// // three near-parallel items
/// let items = vec![
///     vec![2.0, 4.0, 6.0, 8.0, 10.0],
///     vec![3.0, 5.0, 7.0, 9.0, 11.0],
///     vec![2.0, 5.0, 6.0, 9.0, 10.0],
/// ];
/// let alpha = cronbach_alpha(&items).unwrap();
/// assert!(alpha > 0.95);
/// ```
pub fn cronbach_alpha(items: &[Vec<f64>]) -> Result<f64, StatError> {
    let k = items.len();
    if k < 2 {
        return Err(StatError::InvalidArgument(
            "Cronbach's alpha needs at least 2 items".into(),
        ));
    }
    let n = items[0].len();
    if items.iter().any(|item| item.len() != n) {
        return Err(StatError::InvalidArgument(
            "all items must have the same number of respondents".into(),
        ));
    }
    if n < 2 {
        return Err(StatError::TooFewObservations { required: 2, got: n });
    }
    let item_variance: f64 = items
        .iter()
        .map(|item| variance(item).ok_or(StatError::EmptyInput))
        .sum::<Result<f64, _>>()?;
    let totals: Vec<f64> = (0..n)
        .map(|i| items.iter().map(|item| item[i]).sum())
        .collect();
    let total_variance = variance(&totals).ok_or(StatError::EmptyInput)?;
    if total_variance == 0.0 {
        return Err(StatError::InvalidArgument(
            "total score has zero variance".into(),
        ));
    }
    let k = k as f64;
    Ok((k / (k - 1.0)) * (1.0 - item_variance / total_variance))
}

/// Split-half reliability with the Spearman-Brown correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitHalfReliability {
    /// Raw correlation between the half scores.
    pub half_r: f64,
    /// Spearman-Brown corrected full-test reliability, 2r/(1+r).
    pub r: f64,
    pub r2: f64,
}

impl SplitHalfReliability {
    /// `first_half` and `last_half` are per-respondent scores on the
    /// two halves of the test.
    pub fn new(first_half: &[f64], last_half: &[f64]) -> Result<Self, StatError> {
        if first_half.len() != last_half.len() {
            return Err(StatError::LengthMismatch {
                expected: first_half.len(),
                got: last_half.len(),
            });
        }
        let half_r = correlation(first_half, last_half).ok_or_else(|| {
            StatError::InvalidArgument("correlation undefined for constant input".into())
        })?;
        let r = 2.0 * half_r / (1.0 + half_r);
        Ok(SplitHalfReliability {
            half_r,
            r,
            r2: r * r,
        })
    }
}

/// Test-retest (or parallel-forms) reliability: the correlation
/// between two administrations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestRetestReliability {
    pub r: f64,
    pub r2: f64,
}

impl TestRetestReliability {
    pub fn new(first: &[f64], second: &[f64]) -> Result<Self, StatError> {
        if first.len() != second.len() {
            return Err(StatError::LengthMismatch {
                expected: first.len(),
                got: second.len(),
            });
        }
        let r = correlation(first, second).ok_or_else(|| {
            StatError::InvalidArgument("correlation undefined for constant input".into())
        })?;
        Ok(TestRetestReliability { r, r2: r * r })
    }
}
