//! Descriptive statistics over `f64` slices.
//!
//! Free functions returning `Option<f64>`: `None` signals an empty
//! slice, a length mismatch between paired inputs, or too few
//! observations for the estimator, and lets callers chain with `?` in
//! an `Option` context. Nothing here allocates beyond the few
//! functions that must sort a copy.
//!
//! Sums use Kahan compensation, so means stay accurate on long
//! near-constant slices where naive summation drifts.

/// Compensated summation (Neumaier's variant of Kahan).
///
/// Unlike plain Kahan, the compensation term survives when the running
/// sum cancels to zero, so the example below is exact.
///
/// # Examples
/// ```
/// use psylab::stats::kahan_sum;
/// let data = vec![1e16, 1.0, -1e16];
/// assert_eq!(kahan_sum(&data), 1.0);
/// ```
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut c = 0.0;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            c += (sum - t) + x;
        } else {
            c += (x - t) + sum;
        }
        sum = t;
    }
    sum + c
}

/// Sum of the slice. Returns `None` when empty.
pub fn sum(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        None
    } else {
        Some(kahan_sum(data))
    }
}

/// Arithmetic mean.
///
/// # Examples
/// ```
/// use psylab::stats::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        None
    } else {
        Some(kahan_sum(data) / data.len() as f64)
    }
}

fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    v
}

/// Median (the 0.5 quantile).
pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// Quantile by linear interpolation between order statistics.
///
/// `q` must lie in [0, 1]; the index `q * (n - 1)` is split into an
/// integer part and a fraction used to interpolate. Matches R's
/// default (type 7) quantile.
///
/// # Examples
/// ```
/// use psylab::stats::quantile;
/// let data = vec![1.0, 2.0, 3.0, 4.0];
/// assert_eq!(quantile(&data, 0.5), Some(2.5));
/// assert_eq!(quantile(&data, 0.0), Some(1.0));
/// assert_eq!(quantile(&data, 1.0), Some(4.0));
/// ```
pub fn quantile(data: &[f64], q: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }
    let sorted = sorted_copy(data);
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 < sorted.len() {
        Some(sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac)
    } else {
        Some(sorted[lo])
    }
}

/// Smallest element.
pub fn min(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::min)
}

/// Largest element.
pub fn max(data: &[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}

/// Max minus min.
pub fn range(data: &[f64]) -> Option<f64> {
    Some(max(data)? - min(data)?)
}

/// Mode of the sample.
///
/// When a single value occurs strictly most often (and more than
/// once), that value is returned. Otherwise falls back to the
/// empirical approximation `3·median − 2·mean`.
pub fn mode(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let sorted = sorted_copy(data);
    let mut best_value = sorted[0];
    let mut best_count = 1usize;
    let mut tied = false;
    let mut run_value = sorted[0];
    let mut run_count = 1usize;
    for &x in &sorted[1..] {
        if x == run_value {
            run_count += 1;
        } else {
            run_value = x;
            run_count = 1;
        }
        match run_count.cmp(&best_count) {
            std::cmp::Ordering::Greater => {
                best_value = run_value;
                best_count = run_count;
                tied = false;
            }
            std::cmp::Ordering::Equal => tied = true,
            std::cmp::Ordering::Less => {}
        }
    }
    if best_count > 1 && !tied {
        Some(best_value)
    } else {
        Some(3.0 * median(data)? - 2.0 * mean(data)?)
    }
}

/// Sum of squared deviations from the mean, Σ(x − x̄)².
pub fn ss(data: &[f64]) -> Option<f64> {
    let m = mean(data)?;
    Some(data.iter().map(|x| (x - m) * (x - m)).sum())
}

/// Sum of squared pairwise differences, Σ(xᵢ − yᵢ)².
pub fn ss_diff(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }
    Some(x.iter().zip(y).map(|(a, b)| (a - b) * (a - b)).sum())
}

/// Sum of cross products, Σ(xᵢ − x̄)(yᵢ − ȳ).
pub fn sp(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.is_empty() || x.len() != y.len() {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;
    Some(x.iter().zip(y).map(|(a, b)| (a - mx) * (b - my)).sum())
}

/// Sample variance (n − 1 denominator). Needs at least 2 observations.
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    Some(ss(data)? / (data.len() - 1) as f64)
}

/// Population variance (n denominator).
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(ss(data)? / data.len() as f64)
}

/// Sample standard deviation.
pub fn std_dev(data: &[f64]) -> Option<f64> {
    Some(variance(data)?.sqrt())
}

/// Population standard deviation.
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    Some(population_variance(data)?.sqrt())
}

/// Standard error of the mean, s/√n.
pub fn sem(data: &[f64]) -> Option<f64> {
    Some(std_dev(data)? / (data.len() as f64).sqrt())
}

/// Sample covariance (n − 1 denominator).
pub fn covariance(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() < 2 || x.len() != y.len() {
        return None;
    }
    Some(sp(x, y)? / (x.len() - 1) as f64)
}

/// Pearson product-moment correlation.
///
/// Returns `None` on empty/mismatched input or when either variable
/// is constant (zero sum of squares).
///
/// # Examples
/// ```
/// use psylab::stats::correlation;
/// let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
/// assert!((correlation(&x, &y).unwrap() - 1.0).abs() < 1e-12);
/// ```
pub fn correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    let ssx = ss(x)?;
    let ssy = ss(y)?;
    if ssx == 0.0 || ssy == 0.0 {
        return None;
    }
    Some(sp(x, y)? / (ssx * ssy).sqrt())
}

/// Sample skewness, the third standardized moment m₃ / m₂^(3/2).
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len() as f64;
    if data.len() < 3 {
        return None;
    }
    let m = mean(data)?;
    let m2 = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    let m3 = data.iter().map(|x| (x - m).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        return None;
    }
    Some(m3 / m2.powf(1.5))
}

/// Excess kurtosis, m₄ / m₂² − 3.
pub fn kurtosis(data: &[f64]) -> Option<f64> {
    let n = data.len() as f64;
    if data.len() < 4 {
        return None;
    }
    let m = mean(data)?;
    let m2 = data.iter().map(|x| (x - m).powi(2)).sum::<f64>() / n;
    let m4 = data.iter().map(|x| (x - m).powi(4)).sum::<f64>() / n;
    if m2 == 0.0 {
        return None;
    }
    Some(m4 / (m2 * m2) - 3.0)
}

/// Z test of skewness against zero.
///
/// Divides the sample skewness by its large-sample standard error
/// √(6n(n−1) / ((n−2)(n+1)(n+3))) and returns `(z, two-sided p)`.
pub fn skewness_test(data: &[f64]) -> Option<(f64, f64)> {
    let n = data.len() as f64;
    let skew = skewness(data)?;
    let se = (6.0 * n * (n - 1.0) / ((n - 2.0) * (n + 1.0) * (n + 3.0))).sqrt();
    let z = skew / se;
    let p = 2.0 * (1.0 - crate::distribution::z2p(z.abs()));
    Some((z, p))
}

/// Z test of excess kurtosis against zero.
///
/// Standard error √(24n(n−1)² / ((n−3)(n−2)(n+3)(n+5))); returns
/// `(z, two-sided p)`. Needs at least 5 observations.
pub fn kurtosis_test(data: &[f64]) -> Option<(f64, f64)> {
    if data.len() < 5 {
        return None;
    }
    let n = data.len() as f64;
    let kurt = kurtosis(data)?;
    let se =
        (24.0 * n * (n - 1.0) * (n - 1.0) / ((n - 3.0) * (n - 2.0) * (n + 3.0) * (n + 5.0))).sqrt();
    let z = kurt / se;
    let p = 2.0 * (1.0 - crate::distribution::z2p(z.abs()));
    Some((z, p))
}

/// Subtracts the mean from every element.
pub fn centralize(data: &[f64]) -> Option<Vec<f64>> {
    let m = mean(data)?;
    Some(data.iter().map(|x| x - m).collect())
}

/// Converts to z-scores, (x − x̄)/s. `None` for constant input.
pub fn standardize(data: &[f64]) -> Option<Vec<f64>> {
    let m = mean(data)?;
    let s = std_dev(data)?;
    if s == 0.0 {
        return None;
    }
    Some(data.iter().map(|x| (x - m) / s).collect())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn samples() -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(-1e3_f64..1e3, 2..64)
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn mean_within_bounds(data in samples()) {
            let m = mean(&data).unwrap();
            prop_assert!(m >= min(&data).unwrap() - 1e-9);
            prop_assert!(m <= max(&data).unwrap() + 1e-9);
        }

        #[test]
        fn variance_non_negative(data in samples()) {
            prop_assert!(variance(&data).unwrap() >= 0.0);
        }

        #[test]
        fn correlation_in_unit_interval(
            data in proptest::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 3..64)
        ) {
            let x: Vec<f64> = data.iter().map(|p| p.0).collect();
            let y: Vec<f64> = data.iter().map(|p| p.1).collect();
            if let Some(r) = correlation(&x, &y) {
                prop_assert!((-1.0 - 1e-9..=1.0 + 1e-9).contains(&r), "r = {r}");
            }
        }

        #[test]
        fn standardize_unit_scale(data in samples()) {
            if let Some(z) = standardize(&data) {
                prop_assert!(mean(&z).unwrap().abs() < 1e-8);
                prop_assert!((std_dev(&z).unwrap() - 1.0).abs() < 1e-8);
            }
        }

        #[test]
        fn quantile_monotone(data in samples(), q1 in 0.0_f64..1.0, q2 in 0.0_f64..1.0) {
            let (lo, hi) = if q1 <= q2 { (q1, q2) } else { (q2, q1) };
            prop_assert!(quantile(&data, lo).unwrap() <= quantile(&data, hi).unwrap() + 1e-9);
        }
    }
}
