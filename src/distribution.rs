//! Distribution conversions between test statistics and p-values.
//!
//! Each family exposes a forward conversion (statistic → tail
//! probability) and an inverse (probability → statistic):
//!
//! | Family | Forward | Inverse | Tail convention |
//! |---|---|---|---|
//! | Normal | [`z2p`] | [`p2z`] | left-tail cumulative |
//! | Student's t | [`t2p`] | [`p2t`] | right tail of &#124;t&#124;, optionally doubled |
//! | F | [`f2p`] | [`p2f`] | right tail, optionally doubled-and-min'd |
//! | Chi-square | [`c2p`] | [`p2c`] | right tail |
//!
//! The normal family uses direct rational approximations; t, F, and
//! chi-square are built on the special-function kernel in
//! [`crate::special`]. The incomplete beta/gamma families have no
//! elementary inverse, so every inverse here uses an expanding-bracket
//! bisection: double the upper bound until it encloses the target
//! probability, then bisect. This costs O(log range) extra iterations
//! for extreme probabilities but never requires a caller-supplied
//! bracket.
//!
//! Random variates ([`random_normal`], [`random_t`], [`random_f`],
//! [`random_chi2`]) consume an explicit [`rand::Rng`] so sampling is
//! seedable and reproducible.

use crate::special::{regularized_incomplete_beta, regularized_lower_gamma};
use rand::Rng;

/// Maximum number of bisection iterations for any inverse CDF.
const MAX_BISECT_ITER: usize = 100;

/// Absolute convergence tolerance for the bisection searches.
const BISECT_EPS: f64 = 1e-8;

/// Initial upper bracket for the t quantile search.
const T_BRACKET_START: f64 = 1000.0;

/// Initial upper bracket for the F and chi-square quantile searches.
const RATIO_BRACKET_START: f64 = 100.0;

/// Abandon bracket expansion beyond this bound and return it as-is.
const BRACKET_LIMIT: f64 = 1e15;

/// Error type for invalid distribution inputs.
///
/// Domain errors are surfaced immediately and never silently clamped;
/// the only shortcuts are the documented exact boundary values
/// (p = 0/1, c = 0, f = 0/∞).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DistributionError {
    /// Probability outside [0, 1].
    InvalidProbability(f64),
    /// Degrees of freedom outside the family's valid domain.
    InvalidDegreesOfFreedom(f64),
    /// A statistic outside its valid domain (negative chi-square or F).
    InvalidStatistic(f64),
}

impl std::fmt::Display for DistributionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistributionError::InvalidProbability(p) => {
                write!(f, "probability must be between 0 and 1, got {p}")
            }
            DistributionError::InvalidDegreesOfFreedom(df) => {
                write!(f, "invalid degrees of freedom: {df}")
            }
            DistributionError::InvalidStatistic(v) => {
                write!(f, "statistic out of domain: {v}")
            }
        }
    }
}

impl std::error::Error for DistributionError {}

// ============================================================================
// Normal
// ============================================================================

/// Converts a standard-normal z value to its left-tail cumulative
/// probability Φ(z).
///
/// # Algorithm
/// erf-based polynomial approximation (Abramowitz & Stegun 7.1.26,
/// maximum absolute error < 1.5e-7 on erf), evaluated at z/√2 and
/// mapped through `Φ(z) = (1 + sign(z)·erf(|z|/√2)) / 2`.
///
/// ±∞ map exactly to 1 and 0; NaN propagates.
///
/// # Examples
/// ```
/// use psylab::distribution::z2p;
/// assert!((z2p(0.0) - 0.5).abs() < 1e-7);
/// assert!((z2p(1.96) - 0.975).abs() < 1e-3);
/// assert_eq!(z2p(f64::INFINITY), 1.0);
/// ```
pub fn z2p(z: f64) -> f64 {
    if z.is_nan() {
        return f64::NAN;
    }
    if z == f64::INFINITY {
        return 1.0;
    }
    if z == f64::NEG_INFINITY {
        return 0.0;
    }

    // A&S 7.1.26 coefficients
    const P: f64 = 0.3275911;
    const A1: f64 = 0.254829592;
    const A2: f64 = -0.284496736;
    const A3: f64 = 1.421413741;
    const A4: f64 = -1.453152027;
    const A5: f64 = 1.061405429;

    let sign = if z < 0.0 { -1.0 } else { 1.0 };
    let x = z.abs() / std::f64::consts::SQRT_2;
    let t = 1.0 / (1.0 + P * x);
    let poly = t * (A1 + t * (A2 + t * (A3 + t * (A4 + t * A5))));
    let erf = 1.0 - poly * (-x * x).exp();
    0.5 * (1.0 + sign * erf)
}

/// Converts a left-tail probability to the standard-normal quantile z.
///
/// # Algorithm
/// Acklam's rational approximation with three coefficient sets: lower
/// tail (p < 0.02425), central region, and upper tail (p > 0.97575).
/// Relative error below 1.15e-9 over the full open interval.
///
/// # Errors
/// [`DistributionError::InvalidProbability`] unless 0 ≤ p ≤ 1.
/// p = 0 returns −∞ and p = 1 returns +∞ exactly.
///
/// # Examples
/// ```
/// use psylab::distribution::p2z;
/// assert!(p2z(0.5).unwrap().abs() < 1e-8);
/// assert!((p2z(0.975).unwrap() - 1.959964).abs() < 1e-4);
/// assert!(p2z(1.5).is_err());
/// ```
pub fn p2z(p: f64) -> Result<f64, DistributionError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionError::InvalidProbability(p));
    }
    if p == 0.0 {
        return Ok(f64::NEG_INFINITY);
    }
    if p == 1.0 {
        return Ok(f64::INFINITY);
    }
    Ok(acklam_inverse(p))
}

/// Acklam's inverse normal CDF. Assumes 0 < p < 1.
#[allow(clippy::excessive_precision)]
fn acklam_inverse(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e1,
        2.209460984245205e2,
        -2.759285104469687e2,
        1.383577518672690e2,
        -3.066479806614716e1,
        2.506628277459239,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e1,
        1.615858368580409e2,
        -1.556989798598866e2,
        6.680131188771972e1,
        -1.328068155288572e1,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-3,
        -3.223964580411365e-1,
        -2.400758277161838,
        -2.549732539343734,
        4.374664141464968,
        2.938163982698783,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-3,
        3.224671290700398e-1,
        2.445134137142996,
        3.754408661907416,
    ];
    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

// ============================================================================
// Student's t
// ============================================================================

/// Right-tail probability of |t|. Assumes df > 0.
fn t_right_tail(t_abs: f64, df: f64) -> f64 {
    let root = (t_abs * t_abs + df).sqrt();
    let x = (t_abs + root) / (2.0 * root);
    1.0 - regularized_incomplete_beta(x, df / 2.0, df / 2.0)
}

/// Converts a t statistic to its p-value.
///
/// One-sided: the right-tail probability of |t|. Two-sided: that
/// probability doubled. Symmetric in t, so `t2p(t, ..) == t2p(-t, ..)`.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df > 0.
///
/// # Examples
/// ```
/// use psylab::distribution::t2p;
/// // t = 0 carries no evidence either way
/// assert_eq!(t2p(0.0, 10.0, true).unwrap(), 1.0);
/// assert_eq!(t2p(0.0, 10.0, false).unwrap(), 0.5);
/// // Critical value for alpha = .05, df = 10
/// assert!((t2p(2.228139, 10.0, true).unwrap() - 0.05).abs() < 1e-4);
/// ```
pub fn t2p(t: f64, df: f64, two_sided: bool) -> Result<f64, DistributionError> {
    if df <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    let x = t.abs();
    if x == f64::INFINITY {
        return Ok(0.0);
    }
    if x == 0.0 {
        return Ok(if two_sided { 1.0 } else { 0.5 });
    }
    let p = t_right_tail(x, df);
    Ok(if two_sided { 2.0 * p } else { p })
}

/// Converts a p-value to the non-negative t quantile.
///
/// Inverse of [`t2p`]: returns |t| ≥ 0 such that the one-sided (or
/// doubled two-sided) right-tail probability equals `p`. One-sided
/// probabilities at or above 0.5 collapse to 0.
///
/// # Algorithm
/// Expanding-bracket bisection: the bracket starts at [0, 1000] and
/// the upper bound doubles until it encloses the target, then up to
/// 100 bisection steps to 1e-8 tolerance.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df > 0;
/// [`DistributionError::InvalidProbability`] unless 0 ≤ p ≤ 1.
///
/// # Examples
/// ```
/// use psylab::distribution::p2t;
/// let t = p2t(0.05, 10.0, true).unwrap();
/// assert!((t - 2.228139).abs() < 1e-4);
/// ```
pub fn p2t(p: f64, df: f64, two_sided: bool) -> Result<f64, DistributionError> {
    if df <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionError::InvalidProbability(p));
    }
    if p == 1.0 {
        return Ok(0.0);
    }
    if p == 0.0 {
        return Ok(f64::INFINITY);
    }
    let target = if two_sided { p / 2.0 } else { p };
    Ok(invert_right_tail(
        |t| t_right_tail(t, df),
        target,
        T_BRACKET_START,
    ))
}

// ============================================================================
// F
// ============================================================================

/// Right-tail probability of the F statistic. Assumes valid inputs.
fn f_right_tail(f: f64, df1: f64, df2: f64) -> f64 {
    let x = df2 / (df2 + df1 * f);
    regularized_incomplete_beta(x, df2 / 2.0, df1 / 2.0)
}

/// Converts an F statistic to its p-value.
///
/// One-sided: the right-tail probability. Two-sided:
/// `2·min(p, 1−p)`, the convention for variance-ratio tests.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df1, df2 > 0;
/// [`DistributionError::InvalidStatistic`] for f < 0.
///
/// # Examples
/// ```
/// use psylab::distribution::f2p;
/// assert_eq!(f2p(0.0, 5.0, 10.0, false).unwrap(), 1.0);
/// // qf(0.95, 5, 10) = 3.325835
/// assert!((f2p(3.325835, 5.0, 10.0, false).unwrap() - 0.05).abs() < 1e-4);
/// ```
pub fn f2p(f: f64, df1: f64, df2: f64, two_sided: bool) -> Result<f64, DistributionError> {
    if df1 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df1));
    }
    if df2 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df2));
    }
    if f < 0.0 {
        return Err(DistributionError::InvalidStatistic(f));
    }
    if f == 0.0 {
        return Ok(1.0);
    }
    if f == f64::INFINITY {
        return Ok(0.0);
    }
    let p = f_right_tail(f, df1, df2);
    Ok(if two_sided { 2.0 * p.min(1.0 - p) } else { p })
}

/// Converts a p-value to the F quantile.
///
/// Inverse of [`f2p`] with the same tail conventions; the two-sided
/// case inverts the upper branch (p/2 in the right tail).
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df1, df2 > 0;
/// [`DistributionError::InvalidProbability`] unless 0 ≤ p ≤ 1.
///
/// # Examples
/// ```
/// use psylab::distribution::p2f;
/// // Two-sided .05 with (5, 5) df: the classic 7.15 critical value
/// assert!((p2f(0.05, 5.0, 5.0, true).unwrap() - 7.15).abs() < 0.01);
/// ```
pub fn p2f(p: f64, df1: f64, df2: f64, two_sided: bool) -> Result<f64, DistributionError> {
    if df1 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df1));
    }
    if df2 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df2));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionError::InvalidProbability(p));
    }
    if p == 1.0 {
        return Ok(0.0);
    }
    if p == 0.0 {
        return Ok(f64::INFINITY);
    }
    let target = if two_sided { p / 2.0 } else { p };
    Ok(invert_right_tail(
        |f| f_right_tail(f, df1, df2),
        target,
        RATIO_BRACKET_START,
    ))
}

// ============================================================================
// Chi-square
// ============================================================================

/// Right-tail probability of the chi-square statistic. Assumes valid inputs.
fn chi2_right_tail(c: f64, df: f64) -> f64 {
    1.0 - regularized_lower_gamma(df / 2.0, c / 2.0)
}

/// Converts a chi-square statistic to its right-tail p-value.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df ≥ 1;
/// [`DistributionError::InvalidStatistic`] for c < 0.
///
/// # Examples
/// ```
/// use psylab::distribution::c2p;
/// assert_eq!(c2p(0.0, 5.0).unwrap(), 1.0);
/// // qchisq(0.95, 1) = 3.841459
/// assert!((c2p(3.841459, 1.0).unwrap() - 0.05).abs() < 1e-4);
/// ```
pub fn c2p(c: f64, df: f64) -> Result<f64, DistributionError> {
    if df < 1.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    if c < 0.0 {
        return Err(DistributionError::InvalidStatistic(c));
    }
    if c == 0.0 {
        return Ok(1.0);
    }
    if c == f64::INFINITY {
        return Ok(0.0);
    }
    Ok(chi2_right_tail(c, df))
}

/// Converts a right-tail p-value to the chi-square quantile.
///
/// The incomplete gamma function has no elementary inverse, so this
/// uses the same expanding-bracket bisection as [`p2t`]/[`p2f`].
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df ≥ 1;
/// [`DistributionError::InvalidProbability`] unless 0 ≤ p ≤ 1.
///
/// # Examples
/// ```
/// use psylab::distribution::p2c;
/// let c = p2c(0.05, 1.0).unwrap();
/// assert!((c - 3.841459).abs() < 1e-3);
/// ```
pub fn p2c(p: f64, df: f64) -> Result<f64, DistributionError> {
    if df < 1.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionError::InvalidProbability(p));
    }
    if p == 0.0 {
        return Ok(f64::INFINITY);
    }
    if p == 1.0 {
        return Ok(0.0);
    }
    Ok(invert_right_tail(
        |c| chi2_right_tail(c, df),
        p,
        RATIO_BRACKET_START,
    ))
}

// ============================================================================
// Quantile search
// ============================================================================

/// Expanding-bracket bisection on a non-increasing right-tail function.
///
/// Doubles `hi` until `tail(hi) ≤ target` (so the root lies inside
/// [lo, hi]), then bisects. Terminates on tail-value tolerance,
/// bracket-width tolerance, or the iteration cap, returning the best
/// midpoint available.
fn invert_right_tail<F: Fn(f64) -> f64>(tail: F, target: f64, start_hi: f64) -> f64 {
    let mut lo = 0.0_f64;
    let mut hi = start_hi;
    while tail(hi) > target {
        lo = hi;
        hi *= 2.0;
        if hi > BRACKET_LIMIT {
            return hi;
        }
    }
    for _ in 0..MAX_BISECT_ITER {
        let mid = (lo + hi) / 2.0;
        let pval = tail(mid);
        if (pval - target).abs() < BISECT_EPS {
            return mid;
        }
        if pval > target {
            lo = mid;
        } else {
            hi = mid;
        }
        if (hi - lo).abs() < BISECT_EPS {
            break;
        }
    }
    (lo + hi) / 2.0
}

// ============================================================================
// Random variates
// ============================================================================

/// Draws a uniform value from the open interval (0, 1).
fn uniform_open<R: Rng>(rng: &mut R) -> f64 {
    loop {
        let u: f64 = rng.random();
        if u > 0.0 {
            return u;
        }
    }
}

/// Chi-square variate by inverse-CDF sampling. Assumes df > 0; valid
/// for non-integer df, unlike the sum-of-squared-normals construction.
fn sample_chi2<R: Rng>(rng: &mut R, df: f64) -> f64 {
    invert_right_tail(|c| chi2_right_tail(c, df), uniform_open(rng), RATIO_BRACKET_START)
}

/// Generates a normal variate by inverse-CDF sampling.
///
/// Draws uniform(0, 1), applies the Acklam quantile, then scales and
/// shifts. A negative `std` is treated as its absolute value.
///
/// # Examples
/// ```
/// use psylab::distribution::random_normal;
/// use psylab::random::create_rng;
/// let mut rng = create_rng(42);
/// let x = random_normal(&mut rng, 100.0, 15.0);
/// assert!(x.is_finite());
/// ```
pub fn random_normal<R: Rng>(rng: &mut R, mean: f64, std: f64) -> f64 {
    mean + std.abs() * acklam_inverse(uniform_open(rng))
}

/// Generates a Student's t variate as `z / √(χ²_df / df)`.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df > 0.
pub fn random_t<R: Rng>(rng: &mut R, df: f64) -> Result<f64, DistributionError> {
    if df <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    let z = acklam_inverse(uniform_open(rng));
    let c = sample_chi2(rng, df);
    Ok(z / (c / df).sqrt())
}

/// Generates an F variate as `(χ²_df1 / df1) / (χ²_df2 / df2)`.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df1, df2 > 0.
pub fn random_f<R: Rng>(rng: &mut R, df1: f64, df2: f64) -> Result<f64, DistributionError> {
    if df1 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df1));
    }
    if df2 <= 0.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df2));
    }
    let num = sample_chi2(rng, df1) / df1;
    let den = sample_chi2(rng, df2) / df2;
    Ok(num / den)
}

/// Generates a chi-square variate by inverse-CDF sampling.
///
/// # Errors
/// [`DistributionError::InvalidDegreesOfFreedom`] unless df ≥ 1.
pub fn random_chi2<R: Rng>(rng: &mut R, df: f64) -> Result<f64, DistributionError> {
    if df < 1.0 {
        return Err(DistributionError::InvalidDegreesOfFreedom(df));
    }
    Ok(sample_chi2(rng, df))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    // --- normal ---

    #[test]
    fn test_z2p_known_values() {
        // 68-95-99.7 rule and common critical values
        assert!((z2p(1.0) - 0.8413).abs() < 1e-3);
        assert!((z2p(2.0) - 0.9772).abs() < 1e-3);
        assert!((z2p(1.96) - 0.975).abs() < 1e-3);
        assert!((z2p(-2.58) - 0.005).abs() < 1e-3);
        assert!((z2p(0.0) - 0.5).abs() < 1e-7);
    }

    #[test]
    fn test_z2p_extremes() {
        assert_eq!(z2p(f64::INFINITY), 1.0);
        assert_eq!(z2p(f64::NEG_INFINITY), 0.0);
        assert!(z2p(f64::NAN).is_nan());
    }

    #[test]
    fn test_p2z_boundaries_and_domain() {
        assert_eq!(p2z(0.0).unwrap(), f64::NEG_INFINITY);
        assert_eq!(p2z(1.0).unwrap(), f64::INFINITY);
        assert_eq!(
            p2z(-0.1),
            Err(DistributionError::InvalidProbability(-0.1))
        );
        assert!(p2z(1.1).is_err());
    }

    #[test]
    fn test_p2z_known_values() {
        assert!((p2z(0.975).unwrap() - 1.959964).abs() < 1e-4);
        assert!((p2z(0.95).unwrap() - 1.644854).abs() < 1e-4);
        assert!((p2z(0.025).unwrap() + 1.959964).abs() < 1e-4);
        assert!(p2z(0.5).unwrap().abs() < 1e-8);
    }

    #[test]
    fn test_normal_roundtrip() {
        for &p in &[0.001, 0.01, 0.05, 0.25, 0.5, 0.75, 0.95, 0.99, 0.999] {
            let z = p2z(p).unwrap();
            let back = z2p(z);
            assert!(
                (back - p).abs() < 1e-6,
                "roundtrip: p={p}, z={z}, back={back}"
            );
        }
    }

    // --- t ---

    #[test]
    fn test_t2p_boundaries() {
        assert_eq!(t2p(0.0, 10.0, true).unwrap(), 1.0);
        assert_eq!(t2p(0.0, 10.0, false).unwrap(), 0.5);
        assert_eq!(t2p(f64::INFINITY, 10.0, true).unwrap(), 0.0);
        assert!(t2p(1.0, 0.0, true).is_err());
        assert!(t2p(1.0, -3.0, true).is_err());
    }

    #[test]
    fn test_t2p_symmetry() {
        for &df in &[1.0, 5.0, 10.0, 30.0] {
            for &t in &[0.5, 1.0, 2.5, 4.0] {
                let a = t2p(t, df, true).unwrap();
                let b = t2p(-t, df, true).unwrap();
                assert_eq!(a, b, "t2p not symmetric at t={t}, df={df}");
            }
        }
    }

    #[test]
    fn test_t2p_against_r() {
        // 2*(1-pt(q, df)) for known qt values
        assert!((t2p(2.228139, 10.0, true).unwrap() - 0.05).abs() < 1e-4);
        assert!((t2p(2.570582, 5.0, true).unwrap() - 0.05).abs() < 1e-4);
        // one-sided: 1-pt(1.812461, 10) = 0.05
        assert!((t2p(1.812461, 10.0, false).unwrap() - 0.05).abs() < 1e-4);
        // large df approaches the normal: 2*(1-pnorm(1.96)) ~ 0.05
        assert!((t2p(1.96, 10000.0, true).unwrap() - 0.05).abs() < 1e-3);
    }

    #[test]
    fn test_p2t_roundtrip() {
        for &df in &[1.0, 5.0, 10.0, 30.0, 100.0] {
            for &p in &[0.001, 0.01, 0.05, 0.2, 0.5, 0.8] {
                let t = p2t(p, df, true).unwrap();
                let back = t2p(t, df, true).unwrap();
                assert!(
                    (back - p).abs() < 1e-6,
                    "t roundtrip: p={p}, df={df}, t={t}, back={back}"
                );
            }
        }
    }

    #[test]
    fn test_p2t_boundaries() {
        assert_eq!(p2t(1.0, 10.0, true).unwrap(), 0.0);
        assert_eq!(p2t(0.0, 10.0, true).unwrap(), f64::INFINITY);
        assert!(p2t(-0.5, 10.0, true).is_err());
        assert!(p2t(0.5, 0.0, true).is_err());
    }

    // --- F ---

    #[test]
    fn test_f2p_boundaries() {
        assert_eq!(f2p(0.0, 5.0, 10.0, false).unwrap(), 1.0);
        assert_eq!(f2p(f64::INFINITY, 5.0, 10.0, false).unwrap(), 0.0);
        assert!(f2p(-1.0, 5.0, 10.0, false).is_err());
        assert!(f2p(1.0, 0.0, 10.0, false).is_err());
        assert!(f2p(1.0, 5.0, -1.0, false).is_err());
    }

    #[test]
    fn test_f2p_against_r() {
        // 1 - pf(q, df1, df2) for known qf values
        assert!((f2p(3.325835, 5.0, 10.0, false).unwrap() - 0.05).abs() < 1e-4);
        assert!((f2p(5.050329, 5.0, 5.0, false).unwrap() - 0.05).abs() < 1e-4);
        // F(1; 10, 10) sits at the median
        assert!((f2p(1.0, 10.0, 10.0, false).unwrap() - 0.5).abs() < 0.02);
    }

    #[test]
    fn test_p2f_classic_critical_value() {
        // Two-sided .05 with (5, 5) df = qf(0.975, 5, 5) = 7.146382
        assert!((p2f(0.05, 5.0, 5.0, true).unwrap() - 7.15).abs() < 0.01);
        // One-sided .05 with (5, 5) df
        assert!((p2f(0.05, 5.0, 5.0, false).unwrap() - 5.050329).abs() < 1e-3);
    }

    #[test]
    fn test_p2f_roundtrip() {
        for &(df1, df2) in &[(1.0, 5.0), (5.0, 10.0), (10.0, 10.0), (3.0, 100.0)] {
            for &p in &[0.01, 0.05, 0.2, 0.5, 0.8] {
                let f = p2f(p, df1, df2, false).unwrap();
                let back = f2p(f, df1, df2, false).unwrap();
                assert!(
                    (back - p).abs() < 1e-6,
                    "F roundtrip: p={p}, df=({df1},{df2}), f={f}, back={back}"
                );
            }
        }
    }

    // --- chi-square ---

    #[test]
    fn test_c2p_boundaries() {
        assert_eq!(c2p(0.0, 5.0).unwrap(), 1.0);
        assert_eq!(c2p(f64::INFINITY, 5.0).unwrap(), 0.0);
        assert!(c2p(-1.0, 5.0).is_err());
        assert!(c2p(1.0, 0.5).is_err());
    }

    #[test]
    fn test_c2p_exponential_special_case() {
        // Chi-square with df = 2 is Exponential(1/2): right tail = exp(-c/2)
        for &c in &[1.0, 2.0, 5.0, 10.0] {
            let p = c2p(c, 2.0).unwrap();
            let expected = (-c / 2.0).exp();
            assert!(
                (p - expected).abs() < 1e-7,
                "c2p({c}, 2) = {p}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_c2p_against_r() {
        // 1 - pchisq(q, df) for known qchisq values
        assert!((c2p(3.841459, 1.0).unwrap() - 0.05).abs() < 1e-4);
        assert!((c2p(5.991465, 2.0).unwrap() - 0.05).abs() < 1e-4);
        assert!((c2p(15.08627, 5.0).unwrap() - 0.01).abs() < 1e-4);
    }

    #[test]
    fn test_p2c_roundtrip() {
        for &df in &[1.0, 5.0, 10.0, 30.0, 100.0] {
            for &p in &[0.01, 0.05, 0.2, 0.5, 0.8, 0.99] {
                let c = p2c(p, df).unwrap();
                let back = c2p(c, df).unwrap();
                assert!(
                    (back - p).abs() < 1e-6,
                    "chi2 roundtrip: p={p}, df={df}, c={c}, back={back}"
                );
            }
        }
    }

    #[test]
    fn test_p2c_boundaries() {
        assert_eq!(p2c(0.0, 5.0).unwrap(), f64::INFINITY);
        assert_eq!(p2c(1.0, 5.0).unwrap(), 0.0);
        assert!(p2c(2.0, 5.0).is_err());
    }

    // --- random variates ---

    #[test]
    fn test_random_normal_moments() {
        let mut rng = create_rng(42);
        let n = 10_000;
        let samples: Vec<f64> = (0..n).map(|_| random_normal(&mut rng, 0.0, 1.0)).collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        assert!(mean.abs() < 0.08, "sample mean {mean} too far from 0");
        assert!((var - 1.0).abs() < 0.1, "sample variance {var} too far from 1");
    }

    #[test]
    fn test_random_normal_shift_scale() {
        let mut rng = create_rng(7);
        let n = 5_000;
        let samples: Vec<f64> = (0..n)
            .map(|_| random_normal(&mut rng, 100.0, 15.0))
            .collect();
        let mean = samples.iter().sum::<f64>() / n as f64;
        assert!((mean - 100.0).abs() < 1.5, "sample mean {mean}");
    }

    #[test]
    fn test_random_chi2_mean() {
        let mut rng = create_rng(42);
        let df = 4.0;
        let n = 5_000;
        let mean = (0..n)
            .map(|_| random_chi2(&mut rng, df).unwrap())
            .sum::<f64>()
            / n as f64;
        // E[chi2(df)] = df
        assert!((mean - df).abs() < 0.3, "chi2 sample mean {mean}");
    }

    #[test]
    fn test_random_t_centered() {
        let mut rng = create_rng(42);
        let n = 5_000;
        let mean = (0..n).map(|_| random_t(&mut rng, 10.0).unwrap()).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.1, "t sample mean {mean}");
    }

    #[test]
    fn test_random_f_mean() {
        let mut rng = create_rng(42);
        let (df1, df2) = (5.0, 20.0);
        let n = 5_000;
        let mean = (0..n)
            .map(|_| random_f(&mut rng, df1, df2).unwrap())
            .sum::<f64>()
            / n as f64;
        // E[F(df1, df2)] = df2 / (df2 - 2) for df2 > 2
        let expected = df2 / (df2 - 2.0);
        assert!((mean - expected).abs() < 0.15, "F sample mean {mean}");
    }

    #[test]
    fn test_random_variate_domains() {
        let mut rng = create_rng(0);
        assert!(random_t(&mut rng, 0.0).is_err());
        assert!(random_f(&mut rng, 0.0, 5.0).is_err());
        assert!(random_chi2(&mut rng, 0.5).is_err());
    }
}
