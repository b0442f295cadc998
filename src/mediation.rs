//! Simple mediation analysis with percentile bootstrap intervals.
//!
//! The model decomposes the effect of x on y through a mediator m
//! into paths a (x → m), b (m → y given x), the direct effect c'
//! (x → y given m), and the total effect c (x → y). The indirect
//! effect is a·b, and for ordinary least squares the identity
//! c = c' + a·b holds exactly.
//!
//! Indirect effects have awkward sampling distributions, so
//! significance comes from a percentile bootstrap rather than a
//! normal-theory test: resample cases, refit, and read the interval
//! off the sorted replicate statistics.

use crate::error::StatError;
use crate::regression::{MultipleLinearRegression, SimpleLinearRegression};
use crate::stats::{mean, median, standardize};
use rand::Rng;

/// Resamples `data` with replacement to the same length.
pub fn bootstrap_sample<T: Copy, R: Rng>(rng: &mut R, data: &[T]) -> Vec<T> {
    (0..data.len())
        .map(|_| data[rng.random_range(0..data.len())])
        .collect()
}

/// Statistic to bootstrap in [`bootstrap_test`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStat {
    Mean,
    Median,
}

/// Reads the percentile interval off sorted bootstrap replicates.
fn percentile_ci(mut stats: Vec<f64>, alpha: f64) -> (f64, f64) {
    stats.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let b = stats.len();
    let lower = ((b as f64 * alpha / 2.0).floor() as usize).min(b - 1);
    let upper = ((b as f64 * (1.0 - alpha / 2.0)).floor() as usize).min(b - 1);
    (stats[lower], stats[upper])
}

/// Percentile bootstrap confidence interval for a sample statistic.
///
/// Draws `b` resamples, computes `stat` on each, and returns the
/// (alpha/2, 1 − alpha/2) percentile bounds.
///
/// # Examples
/// ```
/// use psylab::mediation::{bootstrap_test, BootstrapStat};
/// use psylab::random::create_rng;
///
/// let data = [4.0, 5.0, 6.0, 5.0, 4.0, 6.0, 5.0, 5.0];
/// let mut rng = create_rng(42);
/// let (lo, hi) = bootstrap_test(&mut rng, BootstrapStat::Mean, 1000, 0.05, &data).unwrap();
/// assert!(lo <= 5.0 && 5.0 <= hi);
/// ```
pub fn bootstrap_test<R: Rng>(
    rng: &mut R,
    stat: BootstrapStat,
    b: usize,
    alpha: f64,
    data: &[f64],
) -> Result<(f64, f64), StatError> {
    if data.is_empty() {
        return Err(StatError::EmptyInput);
    }
    if b == 0 {
        return Err(StatError::InvalidArgument(
            "bootstrap needs at least one replicate".into(),
        ));
    }
    if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
        return Err(StatError::InvalidArgument(format!(
            "alpha must be in (0, 1), got {alpha}"
        )));
    }
    let stats: Vec<f64> = (0..b)
        .map(|_| {
            let sample = bootstrap_sample(rng, data);
            match stat {
                BootstrapStat::Mean => mean(&sample),
                BootstrapStat::Median => median(&sample),
            }
            .unwrap_or(f64::NAN)
        })
        .collect();
    Ok(percentile_ci(stats, alpha))
}

/// Bootstrap confidence intervals for every mediation path.
#[derive(Debug, Clone, PartialEq)]
pub struct MediationBootstrapCi {
    pub a: (f64, f64),
    pub b: (f64, f64),
    pub c: (f64, f64),
    pub c_prime: (f64, f64),
    /// Interval for the indirect effect; excluding zero indicates
    /// significant mediation.
    pub ab: (f64, f64),
}

/// Effect sizes for the indirect path.
#[derive(Debug, Clone, PartialEq)]
pub struct MediationEffectSize {
    /// Proportion mediated, ab / c.
    pub pm: f64,
    /// Ratio of indirect to direct effect, ab / c'.
    pub rm: f64,
    /// a²·b².
    pub v2: f64,
    /// Indirect effect after standardizing x, m, and y.
    pub standardized_ab: f64,
}

/// Simple (single-mediator) mediation model.
///
/// # Examples
/// ```
/// use psylab::mediation::SimpleMediationModel;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
/// let m = [2.0, 3.0, 3.0, 5.0, 6.0, 6.0, 8.0, 9.0];
/// let y = [3.0, 4.0, 5.0, 6.0, 8.0, 8.0, 10.0, 11.0];
/// let model = SimpleMediationModel::new(&x, &m, &y).unwrap();
/// // OLS identity: total = direct + indirect
/// assert!((model.c - (model.c_prime + model.ab)).abs() < 1e-8);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleMediationModel {
    x: Vec<f64>,
    m: Vec<f64>,
    y: Vec<f64>,
    /// Path x → m.
    pub a: f64,
    pub a_t: f64,
    pub a_p: f64,
    /// Path m → y controlling for x.
    pub b: f64,
    pub b_t: f64,
    pub b_p: f64,
    /// Total effect x → y.
    pub c: f64,
    pub c_t: f64,
    pub c_p: f64,
    /// Direct effect x → y controlling for m.
    pub c_prime: f64,
    pub c_prime_t: f64,
    pub c_prime_p: f64,
    /// Indirect effect a·b.
    pub ab: f64,
}

impl SimpleMediationModel {
    pub fn new(x: &[f64], m: &[f64], y: &[f64]) -> Result<Self, StatError> {
        let n = x.len();
        if m.len() != n {
            return Err(StatError::LengthMismatch {
                expected: n,
                got: m.len(),
            });
        }
        if y.len() != n {
            return Err(StatError::LengthMismatch {
                expected: n,
                got: y.len(),
            });
        }
        let x_to_m = SimpleLinearRegression::new(x, m)?;
        let x_to_y = SimpleLinearRegression::new(x, y)?;
        let iv: Vec<Vec<f64>> = x.iter().zip(m).map(|(&xi, &mi)| vec![xi, mi]).collect();
        let xm_to_y = MultipleLinearRegression::new(&iv, y)?;
        Ok(SimpleMediationModel {
            x: x.to_vec(),
            m: m.to_vec(),
            y: y.to_vec(),
            a: x_to_m.b1,
            a_t: x_to_m.t,
            a_p: x_to_m.p,
            b: xm_to_y.coefficients[2],
            b_t: xm_to_y.t_values[2],
            b_p: xm_to_y.p_values[2],
            c: x_to_y.b1,
            c_t: x_to_y.t,
            c_p: x_to_y.p,
            c_prime: xm_to_y.coefficients[1],
            c_prime_t: xm_to_y.t_values[1],
            c_prime_p: xm_to_y.p_values[1],
            ab: x_to_m.b1 * xm_to_y.coefficients[2],
        })
    }

    /// Percentile bootstrap intervals for all paths.
    ///
    /// Resamples cases (keeping x, m, y triples together), refits the
    /// model `times` times, and takes percentile bounds. Replicates
    /// whose refit fails (a degenerate resample) are skipped.
    pub fn bootstrap<R: Rng>(
        &self,
        rng: &mut R,
        times: usize,
        alpha: f64,
    ) -> Result<MediationBootstrapCi, StatError> {
        if times == 0 {
            return Err(StatError::InvalidArgument(
                "bootstrap needs at least one replicate".into(),
            ));
        }
        if !(0.0..1.0).contains(&alpha) || alpha == 0.0 {
            return Err(StatError::InvalidArgument(format!(
                "alpha must be in (0, 1), got {alpha}"
            )));
        }
        let n = self.x.len();
        let indices: Vec<usize> = (0..n).collect();
        let mut a = Vec::with_capacity(times);
        let mut b = Vec::with_capacity(times);
        let mut c = Vec::with_capacity(times);
        let mut c_prime = Vec::with_capacity(times);
        let mut ab = Vec::with_capacity(times);
        for _ in 0..times {
            let sample = bootstrap_sample(rng, &indices);
            let xs: Vec<f64> = sample.iter().map(|&i| self.x[i]).collect();
            let ms: Vec<f64> = sample.iter().map(|&i| self.m[i]).collect();
            let ys: Vec<f64> = sample.iter().map(|&i| self.y[i]).collect();
            let Ok(model) = SimpleMediationModel::new(&xs, &ms, &ys) else {
                continue;
            };
            a.push(model.a);
            b.push(model.b);
            c.push(model.c);
            c_prime.push(model.c_prime);
            ab.push(model.ab);
        }
        if ab.is_empty() {
            return Err(StatError::InvalidArgument(
                "all bootstrap replicates were degenerate".into(),
            ));
        }
        Ok(MediationBootstrapCi {
            a: percentile_ci(a, alpha),
            b: percentile_ci(b, alpha),
            c: percentile_ci(c, alpha),
            c_prime: percentile_ci(c_prime, alpha),
            ab: percentile_ci(ab, alpha),
        })
    }

    /// Effect sizes for the indirect path.
    ///
    /// # Errors
    /// Fails when any variable is constant, which makes the
    /// standardized refit impossible.
    pub fn effect_size(&self) -> Result<MediationEffectSize, StatError> {
        let xs = standardize(&self.x)
            .ok_or_else(|| StatError::InvalidArgument("x is constant".into()))?;
        let ms = standardize(&self.m)
            .ok_or_else(|| StatError::InvalidArgument("m is constant".into()))?;
        let ys = standardize(&self.y)
            .ok_or_else(|| StatError::InvalidArgument("y is constant".into()))?;
        let standardized = SimpleMediationModel::new(&xs, &ms, &ys)?;
        Ok(MediationEffectSize {
            pm: self.ab / self.c,
            rm: self.ab / self.c_prime,
            v2: self.a * self.a * self.b * self.b,
            standardized_ab: standardized.ab,
        })
    }
}
