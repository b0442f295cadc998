//! Special mathematical functions.
//!
//! The numerical kernel shared by every distribution conversion:
//! log-gamma, the regularized incomplete gamma function, and the
//! regularized incomplete beta function. All functions here are pure
//! and assume validated inputs — domain checking belongs to the
//! callers in [`crate::distribution`].
//!
//! # Algorithms
//!
//! - **ln Γ**: Lanczos approximation (g = 7, 9 coefficients) with the
//!   reflection formula below x = 0.5.
//! - **P(s, z)**: convergent series expansion of the lower incomplete
//!   gamma function.
//! - **I_x(a, b)**: continued fraction evaluated with Lentz's
//!   algorithm, using the symmetry relation for stability near x = 1.
//!
//! Reference: Press et al. (2007), *Numerical Recipes*, 3rd ed., §6.1–6.4.

/// ln √(2π), the constant term of the Lanczos formula.
#[allow(clippy::excessive_precision)]
const LN_SQRT_2PI: f64 = 0.9189385332046727417803297364056176398;

/// Lanczos coefficients for g = 7.
#[allow(clippy::excessive_precision)]
const LANCZOS_C: [f64; 9] = [
    0.99999999999980993,
    676.5203681218851,
    -1259.1392167224028,
    771.32342877765313,
    -176.61502916214059,
    12.507343278686905,
    -0.13857109526572012,
    9.9843695780195716e-6,
    1.5056327351493116e-7,
];

/// Maximum number of terms of the incomplete gamma series.
const GAMMA_SERIES_MAX_TERMS: usize = 100;

/// Stop the gamma series once a term drops below this magnitude.
const GAMMA_SERIES_EPS: f64 = 1e-8;

/// Maximum number of Lentz iterations for the beta continued fraction.
const BETA_CF_MAX_ITER: usize = 100;

/// Convergence tolerance on successive convergents of the fraction.
const BETA_CF_EPS: f64 = 3e-7;

/// Floor applied to near-zero denominators in Lentz's algorithm.
const BETA_CF_TINY: f64 = 1e-30;

/// Natural log of the Gamma function, ln Γ(x).
///
/// # Algorithm
/// Lanczos approximation with g = 7 and a 9-term coefficient series.
/// For x < 0.5 the reflection formula
/// `ln Γ(x) = ln(π / sin(πx)) − ln Γ(1 − x)` keeps the argument inside
/// the approximation's valid domain. The reflection introduces poles at
/// non-positive integers; callers must not pass 0 or negative integers.
///
/// # Accuracy
/// Relative error below 1e-10 for x in [0.5, 1e6].
///
/// # Examples
/// ```
/// use psylab::special::ln_gamma;
/// // Γ(5) = 4! = 24
/// assert!((ln_gamma(5.0) - 24.0_f64.ln()).abs() < 1e-10);
/// // Γ(0.5) = √π
/// assert!((ln_gamma(0.5) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-10);
/// ```
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let mut sum = LANCZOS_C[0];
    for (i, &c) in LANCZOS_C[1..].iter().enumerate() {
        sum += c / (x + i as f64 + 1.0);
    }

    let t = x + 7.5;
    LN_SQRT_2PI + (x + 0.5) * t.ln() - t + sum.ln()
}

/// Regularized lower incomplete gamma function P(s, z) = γ(s, z) / Γ(s).
///
/// Requires s > 0; z ≤ 0 returns 0. Used by the chi-square CDF as
/// `P(df/2, x/2)`.
///
/// # Algorithm
/// Series expansion
/// `P(s, z) = exp(−z + s·ln z − ln Γ(s)) · Σ zⁿ / (s·(s+1)·…·(s+n))`,
/// terminated when a term drops below 1e-8 or after 100 terms. On cap
/// exhaustion the partial sum is returned rather than an error; the
/// series converges quickly for z not far above s.
///
/// # Examples
/// ```
/// use psylab::special::regularized_lower_gamma;
/// // P(1, z) = 1 − exp(−z), the exponential CDF
/// let p = regularized_lower_gamma(1.0, 2.0);
/// assert!((p - (1.0 - (-2.0_f64).exp())).abs() < 1e-7);
/// ```
pub fn regularized_lower_gamma(s: f64, z: f64) -> f64 {
    if z <= 0.0 {
        return 0.0;
    }
    let mut term = 1.0 / s;
    let mut sum = term;
    for n in 1..GAMMA_SERIES_MAX_TERMS {
        term *= z / (s + n as f64);
        sum += term;
        if term < GAMMA_SERIES_EPS {
            break;
        }
    }
    sum * (-z + s * z.ln() - ln_gamma(s)).exp()
}

/// Regularized incomplete beta function I_x(a, b).
///
/// Requires a, b > 0. Boundary shortcuts: x ≤ 0 → 0, x ≥ 1 → 1.
/// Used by the t and F CDFs.
///
/// # Algorithm
/// Continued fraction evaluated with Lentz's algorithm, scaled by
/// `exp(ln Γ(a+b) − ln Γ(a) − ln Γ(b) + a·ln x + b·ln(1−x))`. The
/// fraction converges slowly near x = 1, so for
/// `x ≥ (a+1)/(a+b+2)` the symmetry relation
/// `I_x(a, b) = 1 − I_{1−x}(b, a)` is applied instead.
///
/// # Examples
/// ```
/// use psylab::special::regularized_incomplete_beta;
/// assert_eq!(regularized_incomplete_beta(0.0, 2.0, 3.0), 0.0);
/// assert_eq!(regularized_incomplete_beta(1.0, 2.0, 3.0), 1.0);
/// // I_x(1, 1) = x (uniform case)
/// assert!((regularized_incomplete_beta(0.5, 1.0, 1.0) - 0.5).abs() < 1e-7);
/// ```
pub fn regularized_incomplete_beta(x: f64, a: f64, b: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }

    let ln_prefix =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let bt = ln_prefix.exp();

    if x < (a + 1.0) / (a + b + 2.0) {
        bt * beta_cf(x, a, b) / a
    } else {
        1.0 - bt * beta_cf(1.0 - x, b, a) / b
    }
}

/// Continued fraction for I_x(a, b), evaluated with Lentz's algorithm.
///
/// Each loop iteration applies one even-numbered and one odd-numbered
/// fraction coefficient; denominators are floored at 1e-30 to avoid
/// division by zero. Exits early once both convergent ratios in an
/// iteration are within 3e-7 of 1.
fn beta_cf(x: f64, a: f64, b: f64) -> f64 {
    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < BETA_CF_TINY {
        d = BETA_CF_TINY;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=BETA_CF_MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        c = 1.0 + aa / c;
        if d.abs() < BETA_CF_TINY {
            d = BETA_CF_TINY;
        }
        if c.abs() < BETA_CF_TINY {
            c = BETA_CF_TINY;
        }
        d = 1.0 / d;
        let del_even = d * c;
        h *= del_even;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        c = 1.0 + aa / c;
        if d.abs() < BETA_CF_TINY {
            d = BETA_CF_TINY;
        }
        if c.abs() < BETA_CF_TINY {
            c = BETA_CF_TINY;
        }
        d = 1.0 / d;
        let del_odd = d * c;
        h *= del_odd;

        if (del_even - 1.0).abs() < BETA_CF_EPS && (del_odd - 1.0).abs() < BETA_CF_EPS {
            break;
        }
    }
    h
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn inc_beta_in_01(x in 0.01_f64..0.99, a in 0.5_f64..20.0, b in 0.5_f64..20.0) {
            let result = regularized_incomplete_beta(x, a, b);
            prop_assert!(
                (-1e-9..=1.0 + 1e-9).contains(&result),
                "I_{x}({a},{b}) = {result} out of [0,1]"
            );
        }

        #[test]
        fn inc_beta_complementary(x in 0.01_f64..0.99, a in 0.5_f64..20.0, b in 0.5_f64..20.0) {
            // I_x(a,b) + I_{1-x}(b,a) = 1
            let ix = regularized_incomplete_beta(x, a, b);
            let i1x = regularized_incomplete_beta(1.0 - x, b, a);
            prop_assert!(
                (ix + i1x - 1.0).abs() < 1e-6,
                "complementary: {ix} + {i1x} != 1"
            );
        }

        #[test]
        fn inc_beta_monotone_in_x(
            x1 in 0.01_f64..0.99,
            x2 in 0.01_f64..0.99,
            a in 0.5_f64..10.0,
            b in 0.5_f64..10.0,
        ) {
            let (lo, hi) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
            prop_assert!(
                regularized_incomplete_beta(lo, a, b)
                    <= regularized_incomplete_beta(hi, a, b) + 1e-6
            );
        }

        #[test]
        fn lower_gamma_in_01(s in 0.5_f64..20.0, z in 0.0_f64..40.0) {
            let p = regularized_lower_gamma(s, z);
            prop_assert!((-1e-9..=1.0 + 1e-9).contains(&p), "P({s},{z}) = {p}");
        }

        #[test]
        fn ln_gamma_log_convex(x in 0.5_f64..100.0) {
            // Γ is log-convex: ln Γ(x) + ln Γ(x+1) ≥ 2·ln Γ(x+0.5)
            let lhs = ln_gamma(x) + ln_gamma(x + 1.0);
            let rhs = 2.0 * ln_gamma(x + 0.5);
            prop_assert!(lhs >= rhs - 1e-9);
        }
    }
}
