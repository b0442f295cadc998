//! Student's t-tests: one-sample, independent two-sample (pooled
//! variance), paired, and Welch's unequal-variance variant.
//!
//! Each test is a struct whose constructor runs the full analysis, so
//! every derived quantity (t, p, effect sizes, confidence interval)
//! is a plain public field afterwards. Constructors default to a
//! two-sided test at alpha = 0.05; `with_options` exposes the tail
//! convention, the null difference `mu`, and the interval level.
//!
//! Effect sizes follow the usual conventions: Cohen's d scales the
//! (mean − mu) difference by the relevant standard deviation, and
//! r² = t² / (t² + df).

use crate::distribution::{p2t, t2p};
use crate::error::StatError;
use crate::stats::{mean, ss, std_dev, variance};

const DEFAULT_ALPHA: f64 = 0.05;

fn check_alpha(alpha: f64) -> Result<(), StatError> {
    if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
        return Err(StatError::InvalidArgument(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    Ok(())
}

fn check_min_len(data: &[f64], required: usize) -> Result<(), StatError> {
    if data.is_empty() {
        return Err(StatError::EmptyInput);
    }
    if data.len() < required {
        return Err(StatError::TooFewObservations {
            required,
            got: data.len(),
        });
    }
    Ok(())
}

/// One-sample t-test of a sample mean against a fixed value.
///
/// # Examples
/// ```
/// use psylab::ttest::OneSampleTTest;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let t = OneSampleTTest::new(&data, 2.0).unwrap();
/// assert!((t.t - 1.4142136).abs() < 1e-6);
/// assert!((t.p - 0.2302).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct OneSampleTTest {
    /// Value the sample mean is tested against.
    pub mu: f64,
    /// Whether the p-value is two-sided.
    pub two_sided: bool,
    /// Significance level used for the confidence interval.
    pub alpha: f64,
    /// Sample mean.
    pub mean: f64,
    /// Sample standard deviation.
    pub std: f64,
    /// Standard error of the mean.
    pub sem: f64,
    /// Degrees of freedom, n − 1.
    pub df: f64,
    /// t statistic.
    pub t: f64,
    /// p-value.
    pub p: f64,
    /// Cohen's d, (mean − mu) / std.
    pub cohen_d: f64,
    /// r², proportion of variance accounted for.
    pub r2: f64,
    /// Confidence interval for the mean at 1 − alpha.
    pub ci: (f64, f64),
}

impl OneSampleTTest {
    /// Two-sided test at alpha = 0.05.
    pub fn new(data: &[f64], mu: f64) -> Result<Self, StatError> {
        Self::with_options(data, mu, true, DEFAULT_ALPHA)
    }

    pub fn with_options(
        data: &[f64],
        mu: f64,
        two_sided: bool,
        alpha: f64,
    ) -> Result<Self, StatError> {
        check_min_len(data, 2)?;
        check_alpha(alpha)?;
        let n = data.len() as f64;
        let m = mean(data).ok_or(StatError::EmptyInput)?;
        let std = std_dev(data).ok_or(StatError::TooFewObservations {
            required: 2,
            got: data.len(),
        })?;
        let sem = std / n.sqrt();
        let df = n - 1.0;
        let t = (m - mu) / sem;
        let p = t2p(t, df, two_sided)?;
        let ci_t = p2t(alpha, df, true)?;
        Ok(OneSampleTTest {
            mu,
            two_sided,
            alpha,
            mean: m,
            std,
            sem,
            df,
            t,
            p,
            cohen_d: (m - mu) / std,
            r2: t * t / (t * t + df),
            ci: (m - ci_t * sem, m + ci_t * sem),
        })
    }
}

/// Independent two-sample t-test with pooled variance.
///
/// Assumes equal population variances; use [`WelchTTest`] when that
/// assumption is doubtful.
///
/// # Examples
/// ```
/// use psylab::ttest::TwoSampleTTest;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [6.0, 7.0, 8.0, 9.0, 10.0];
/// let t = TwoSampleTTest::new(&a, &b).unwrap();
/// assert!((t.t - (-5.0)).abs() < 1e-10);
/// assert!((t.p - 0.001053).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct TwoSampleTTest {
    /// Null difference between the group means.
    pub mu: f64,
    pub two_sided: bool,
    pub alpha: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    /// mean_a − mean_b.
    pub mean_diff: f64,
    pub std_a: f64,
    pub std_b: f64,
    /// Standard error of the mean difference from the pooled variance.
    pub sem: f64,
    /// Group degrees of freedom, nₐ − 1 and n_b − 1.
    pub df_a: f64,
    pub df_b: f64,
    /// Pooled degrees of freedom, nₐ + n_b − 2.
    pub df: f64,
    pub t: f64,
    pub p: f64,
    /// Cohen's d against the pooled standard deviation.
    pub cohen_d: f64,
    pub r2: f64,
    /// Confidence interval for the mean difference.
    pub ci: (f64, f64),
}

impl TwoSampleTTest {
    /// Two-sided test of a zero difference at alpha = 0.05.
    pub fn new(a: &[f64], b: &[f64]) -> Result<Self, StatError> {
        Self::with_options(a, b, true, 0.0, DEFAULT_ALPHA)
    }

    pub fn with_options(
        a: &[f64],
        b: &[f64],
        two_sided: bool,
        mu: f64,
        alpha: f64,
    ) -> Result<Self, StatError> {
        check_min_len(a, 2)?;
        check_min_len(b, 2)?;
        check_alpha(alpha)?;
        let mean_a = mean(a).ok_or(StatError::EmptyInput)?;
        let mean_b = mean(b).ok_or(StatError::EmptyInput)?;
        let mean_diff = mean_a - mean_b;
        let ss_a = ss(a).ok_or(StatError::EmptyInput)?;
        let ss_b = ss(b).ok_or(StatError::EmptyInput)?;
        let df_a = (a.len() - 1) as f64;
        let df_b = (b.len() - 1) as f64;
        let df = df_a + df_b;
        let pooled_var = (ss_a + ss_b) / df;
        let sem = (pooled_var * (1.0 / a.len() as f64 + 1.0 / b.len() as f64)).sqrt();
        let t = (mean_diff - mu) / sem;
        let p = t2p(t, df, two_sided)?;
        let ci_t = p2t(alpha, df, true)?;
        Ok(TwoSampleTTest {
            mu,
            two_sided,
            alpha,
            mean_a,
            mean_b,
            mean_diff,
            std_a: (ss_a / df_a).sqrt(),
            std_b: (ss_b / df_b).sqrt(),
            sem,
            df_a,
            df_b,
            df,
            t,
            p,
            cohen_d: (mean_diff - mu) / pooled_var.sqrt(),
            r2: t * t / (t * t + df),
            ci: (mean_diff - ci_t * sem, mean_diff + ci_t * sem),
        })
    }
}

/// Paired-sample t-test on the element-wise differences.
///
/// # Errors
/// [`StatError::LengthMismatch`] when the samples differ in length.
#[derive(Debug, Clone)]
pub struct PeerSampleTTest {
    pub mu: f64,
    pub two_sided: bool,
    pub alpha: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    /// Mean of the pairwise differences.
    pub mean_diff: f64,
    pub std_a: f64,
    pub std_b: f64,
    /// Standard deviation of the pairwise differences.
    pub std_diff: f64,
    /// Standard error of the mean difference.
    pub sem: f64,
    /// Degrees of freedom, n − 1 pairs.
    pub df: f64,
    pub t: f64,
    pub p: f64,
    /// Cohen's d against the difference standard deviation.
    pub cohen_d: f64,
    pub r2: f64,
    pub ci: (f64, f64),
}

impl PeerSampleTTest {
    /// Two-sided test of a zero mean difference at alpha = 0.05.
    pub fn new(a: &[f64], b: &[f64]) -> Result<Self, StatError> {
        Self::with_options(a, b, true, 0.0, DEFAULT_ALPHA)
    }

    pub fn with_options(
        a: &[f64],
        b: &[f64],
        two_sided: bool,
        mu: f64,
        alpha: f64,
    ) -> Result<Self, StatError> {
        if a.len() != b.len() {
            return Err(StatError::LengthMismatch {
                expected: a.len(),
                got: b.len(),
            });
        }
        check_min_len(a, 2)?;
        check_alpha(alpha)?;
        let n = a.len() as f64;
        let diff: Vec<f64> = a.iter().zip(b).map(|(x, y)| x - y).collect();
        let mean_diff = mean(&diff).ok_or(StatError::EmptyInput)?;
        let std_diff = std_dev(&diff).ok_or(StatError::TooFewObservations {
            required: 2,
            got: diff.len(),
        })?;
        let sem = std_diff / n.sqrt();
        let df = n - 1.0;
        let t = (mean_diff - mu) / sem;
        let p = t2p(t, df, two_sided)?;
        let ci_t = p2t(alpha, df, true)?;
        Ok(PeerSampleTTest {
            mu,
            two_sided,
            alpha,
            mean_a: mean(a).ok_or(StatError::EmptyInput)?,
            mean_b: mean(b).ok_or(StatError::EmptyInput)?,
            mean_diff,
            std_a: std_dev(a).ok_or(StatError::EmptyInput)?,
            std_b: std_dev(b).ok_or(StatError::EmptyInput)?,
            std_diff,
            sem,
            df,
            t,
            p,
            cohen_d: (mean_diff - mu) / std_diff,
            r2: t * t / (t * t + df),
            ci: (mean_diff - ci_t * sem, mean_diff + ci_t * sem),
        })
    }
}

/// Welch's unequal-variance t-test.
///
/// The degrees of freedom follow the Welch-Satterthwaite
/// approximation and are generally fractional.
///
/// # Examples
/// ```
/// use psylab::ttest::WelchTTest;
///
/// let a = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let b = [2.0, 4.0, 6.0, 8.0, 10.0];
/// let t = WelchTTest::new(&a, &b).unwrap();
/// assert!((t.df - 5.882353).abs() < 1e-5);
/// assert!((t.p - 0.1073).abs() < 1e-3);
/// ```
#[derive(Debug, Clone)]
pub struct WelchTTest {
    pub mu: f64,
    pub two_sided: bool,
    pub alpha: f64,
    pub mean_a: f64,
    pub mean_b: f64,
    pub mean_diff: f64,
    pub std_a: f64,
    pub std_b: f64,
    /// Standard error √(s₁²/n₁ + s₂²/n₂).
    pub sem: f64,
    pub df_a: f64,
    pub df_b: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub df: f64,
    pub t: f64,
    pub p: f64,
    pub cohen_d: f64,
    pub r2: f64,
    pub ci: (f64, f64),
}

impl WelchTTest {
    /// Two-sided test of a zero difference at alpha = 0.05.
    pub fn new(a: &[f64], b: &[f64]) -> Result<Self, StatError> {
        Self::with_options(a, b, true, 0.0, DEFAULT_ALPHA)
    }

    pub fn with_options(
        a: &[f64],
        b: &[f64],
        two_sided: bool,
        mu: f64,
        alpha: f64,
    ) -> Result<Self, StatError> {
        check_min_len(a, 2)?;
        check_min_len(b, 2)?;
        check_alpha(alpha)?;
        let (na, nb) = (a.len() as f64, b.len() as f64);
        let mean_a = mean(a).ok_or(StatError::EmptyInput)?;
        let mean_b = mean(b).ok_or(StatError::EmptyInput)?;
        let mean_diff = mean_a - mean_b;
        let var_a = variance(a).ok_or(StatError::EmptyInput)?;
        let var_b = variance(b).ok_or(StatError::EmptyInput)?;
        let df_a = na - 1.0;
        let df_b = nb - 1.0;
        let sem = (var_a / na + var_b / nb).sqrt();
        let df = (var_a / na + var_b / nb).powi(2)
            / (var_a * var_a / (na * na * df_a) + var_b * var_b / (nb * nb * df_b));
        let t = (mean_diff - mu) / sem;
        let p = t2p(t, df, two_sided)?;
        // pooled variance only feeds the effect size here
        let pooled_var = (var_a * df_a + var_b * df_b) / (df_a + df_b);
        let ci_t = p2t(alpha, df, true)?;
        Ok(WelchTTest {
            mu,
            two_sided,
            alpha,
            mean_a,
            mean_b,
            mean_diff,
            std_a: var_a.sqrt(),
            std_b: var_b.sqrt(),
            sem,
            df_a,
            df_b,
            df,
            t,
            p,
            cohen_d: (mean_diff - mu) / pooled_var.sqrt(),
            r2: t * t / (t * t + df),
            ci: (mean_diff - ci_t * sem, mean_diff + ci_t * sem),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Expected values cross-checked against R's t.test.

    #[test]
    fn test_one_sample_against_r() {
        // t.test(1:5, mu = 2)
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let t = OneSampleTTest::new(&data, 2.0).unwrap();
        assert!((t.t - 1.4142136).abs() < 1e-6);
        assert_eq!(t.df, 4.0);
        assert!((t.p - 0.2302).abs() < 1e-4);
        assert!((t.ci.0 - 1.036757).abs() < 1e-5);
        assert!((t.ci.1 - 4.963243).abs() < 1e-5);
        assert!((t.cohen_d - 1.0 / 2.5_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_one_sample_null_is_flat() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let t = OneSampleTTest::new(&data, 3.0).unwrap();
        assert_eq!(t.t, 0.0);
        assert_eq!(t.p, 1.0);
        assert_eq!(t.r2, 0.0);
    }

    #[test]
    fn test_one_sample_one_sided_halves_p() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        let two = OneSampleTTest::new(&data, 2.0).unwrap();
        let one = OneSampleTTest::with_options(&data, 2.0, false, 0.05).unwrap();
        assert!((one.p - two.p / 2.0).abs() < 1e-10);
    }

    #[test]
    fn test_two_sample_against_r() {
        // t.test(1:5, 6:10, var.equal = TRUE)
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let t = TwoSampleTTest::new(&a, &b).unwrap();
        assert!((t.t + 5.0).abs() < 1e-10);
        assert_eq!(t.df, 8.0);
        assert!((t.p - 0.001053).abs() < 1e-5);
        assert!((t.ci.0 + 7.306004).abs() < 1e-5);
        assert!((t.ci.1 + 2.693996).abs() < 1e-5);
        assert!((t.cohen_d + 5.0 / 2.5_f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_peer_sample_against_r() {
        // t.test(a, b, paired = TRUE) with b = 2*a
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let t = PeerSampleTTest::new(&a, &b).unwrap();
        assert!((t.t + 4.2426407).abs() < 1e-6);
        assert_eq!(t.df, 4.0);
        assert!((t.p - 0.01324).abs() < 1e-4);
        assert_eq!(t.mean_diff, -3.0);
    }

    #[test]
    fn test_peer_sample_length_mismatch() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0, 2.0];
        assert!(matches!(
            PeerSampleTTest::new(&a, &b),
            Err(StatError::LengthMismatch {
                expected: 3,
                got: 2
            })
        ));
    }

    #[test]
    fn test_welch_against_r() {
        // t.test(c(1,2,3,4,5), c(2,4,6,8,10))
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [2.0, 4.0, 6.0, 8.0, 10.0];
        let t = WelchTTest::new(&a, &b).unwrap();
        assert!((t.t + 1.897367).abs() < 1e-6);
        assert!((t.df - 5.882353).abs() < 1e-5);
        assert!((t.p - 0.1073).abs() < 1e-3);
    }

    #[test]
    fn test_welch_matches_pooled_for_equal_groups() {
        // equal sizes and variances: Welch df collapses to n1 + n2 - 2
        let a = [1.0, 2.0, 3.0, 4.0, 5.0];
        let b = [6.0, 7.0, 8.0, 9.0, 10.0];
        let welch = WelchTTest::new(&a, &b).unwrap();
        let pooled = TwoSampleTTest::new(&a, &b).unwrap();
        assert!((welch.t - pooled.t).abs() < 1e-10);
        assert!((welch.df - pooled.df).abs() < 1e-10);
        assert!((welch.p - pooled.p).abs() < 1e-10);
    }

    #[test]
    fn test_validation() {
        assert!(OneSampleTTest::new(&[], 0.0).is_err());
        assert!(OneSampleTTest::new(&[1.0], 0.0).is_err());
        assert!(OneSampleTTest::with_options(&[1.0, 2.0], 0.0, true, 1.5).is_err());
        assert!(TwoSampleTTest::new(&[1.0, 2.0], &[3.0]).is_err());
    }
}
