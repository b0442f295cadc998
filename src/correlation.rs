//! Correlation inference: Pearson significance test and the partial
//! correlation matrix.
//!
//! The plain coefficient lives in [`crate::stats::correlation`]; this
//! module adds the t-test of r against zero with a Fisher-z interval,
//! and partial correlations from the inverse of the correlation
//! matrix.

use crate::distribution::{p2z, t2p};
use crate::error::StatError;
use crate::matrix::Matrix;
use crate::stats::correlation;

const DEFAULT_ALPHA: f64 = 0.05;

/// Significance test of a Pearson correlation.
///
/// Tests r against zero with `t = r·√(df / (1 − r²))` on n − 2
/// degrees of freedom, and builds a confidence interval on the
/// Fisher-z scale (`z = atanh(r)`, standard error 1/√(n − 3)) mapped
/// back through tanh.
///
/// # Examples
/// ```
/// use psylab::correlation::PearsonCorrTest;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [1.5, 2.1, 3.2, 3.9, 5.4];
/// let test = PearsonCorrTest::new(&x, &y).unwrap();
/// assert!(test.r > 0.98);
/// assert!(test.p < 0.01);
/// ```
#[derive(Debug, Clone)]
pub struct PearsonCorrTest {
    pub alpha: f64,
    /// Pearson correlation coefficient.
    pub r: f64,
    /// r².
    pub r2: f64,
    /// Degrees of freedom, n − 2.
    pub df: f64,
    pub t: f64,
    /// Two-sided p-value.
    pub p: f64,
    /// Fisher-z confidence interval for r.
    pub ci: (f64, f64),
}

impl PearsonCorrTest {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, StatError> {
        Self::with_alpha(x, y, DEFAULT_ALPHA)
    }

    pub fn with_alpha(x: &[f64], y: &[f64], alpha: f64) -> Result<Self, StatError> {
        if x.len() != y.len() {
            return Err(StatError::LengthMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        // n - 3 must stay positive for the Fisher-z standard error
        if x.len() < 4 {
            return Err(StatError::TooFewObservations {
                required: 4,
                got: x.len(),
            });
        }
        if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
            return Err(StatError::InvalidArgument(format!(
                "alpha must be in (0, 1), got {alpha}"
            )));
        }
        let n = x.len() as f64;
        let r = correlation(x, y).ok_or_else(|| {
            StatError::InvalidArgument("correlation undefined for constant input".into())
        })?;
        let r2 = r * r;
        let df = n - 2.0;
        let t = r * (df / (1.0 - r2)).sqrt();
        let p = t2p(t, df, true)?;
        let fisher_z = r.atanh();
        let sem = 1.0 / (n - 3.0).sqrt();
        let z_crit = p2z(1.0 - alpha / 2.0)?;
        let ci = (
            (fisher_z - z_crit * sem).tanh(),
            (fisher_z + z_crit * sem).tanh(),
        );
        Ok(PearsonCorrTest {
            alpha,
            r,
            r2,
            df,
            t,
            p,
            ci,
        })
    }
}

/// Correlation and partial correlation matrices for a set of
/// variables.
///
/// The partial correlation between variables i and j, controlling
/// for all the others, comes from the inverse P of the correlation
/// matrix: `-P[i][j] / √(P[i][i]·P[j][j])`. The diagonal is fixed at
/// 1.
///
/// # Errors
/// [`StatError::Matrix`] with a singular cause when variables are
/// linearly dependent, which makes the correlation matrix
/// non-invertible.
#[derive(Debug, Clone)]
pub struct PartialCorrMatrix {
    /// Pairwise Pearson correlations.
    pub corr_matrix: Vec<Vec<f64>>,
    /// Partial correlations controlling for the remaining variables.
    pub partial_corr_matrix: Vec<Vec<f64>>,
}

impl PartialCorrMatrix {
    pub fn new(data: &[Vec<f64>]) -> Result<Self, StatError> {
        let k = data.len();
        if k < 3 {
            return Err(StatError::InvalidArgument(
                "partial correlation needs at least 3 variables".into(),
            ));
        }
        let len = data[0].len();
        if data.iter().any(|d| d.len() != len) {
            return Err(StatError::InvalidArgument(
                "all variables must have the same length".into(),
            ));
        }

        let mut corr_matrix = vec![vec![0.0; k]; k];
        for i in 0..k {
            corr_matrix[i][i] = 1.0;
            for j in i + 1..k {
                let r = correlation(&data[i], &data[j]).ok_or_else(|| {
                    StatError::InvalidArgument(
                        "correlation undefined for constant input".into(),
                    )
                })?;
                corr_matrix[i][j] = r;
                corr_matrix[j][i] = r;
            }
        }

        let inv = Matrix::new(corr_matrix.clone())?.inverse()?;
        let mut partial = vec![vec![0.0; k]; k];
        // fill the upper triangle and mirror it; the inverse is only
        // symmetric up to rounding
        for i in 0..k {
            partial[i][i] = 1.0;
            for j in i + 1..k {
                let r = -inv.get(i, j) / (inv.get(i, i) * inv.get(j, j)).sqrt();
                partial[i][j] = r;
                partial[j][i] = r;
            }
        }

        Ok(PartialCorrMatrix {
            corr_matrix,
            partial_corr_matrix: partial,
        })
    }
}
