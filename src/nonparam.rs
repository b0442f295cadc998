//! Assumption checks: Levene's variance-homogeneity test and the
//! one-sample Kolmogorov-Smirnov normality test.

use crate::distribution::{f2p, z2p};
use crate::error::StatError;
use crate::stats::{kahan_sum, mean, median, standardize, std_dev};

/// How Levene's test centers each group before taking absolute
/// deviations. Median centering is the Brown-Forsythe variant, more
/// robust to skewed groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LeveneCenter {
    #[default]
    Mean,
    Median,
}

/// Levene's test for homogeneity of variances across groups.
///
/// Runs a one-way ANOVA on the absolute deviations of each value from
/// its group center; a significant W means unequal spreads.
///
/// # Examples
/// ```
/// use psylab::nonparam::LeveneTest;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let labels = ["A", "A", "A", "B", "B", "B", "C", "C", "C", "C"];
/// let levene = LeveneTest::new(&values, &labels).unwrap();
/// assert!(levene.p > 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct LeveneTest {
    pub center: LeveneCenter,
    /// Sorted distinct group labels.
    pub groups: Vec<String>,
    /// Raw values split by group.
    pub values_raw: Vec<Vec<f64>>,
    /// Absolute deviations from each group's center.
    pub values_centered: Vec<Vec<f64>>,
    pub groups_count: Vec<usize>,
    pub df_b: f64,
    pub df_w: f64,
    /// Levene's W statistic (an F ratio on the centered values).
    pub w: f64,
    /// Right-tail p-value on (df_b, df_w).
    pub p: f64,
}

impl LeveneTest {
    /// Mean-centered Levene's test.
    pub fn new<S: AsRef<str>>(values: &[f64], group: &[S]) -> Result<Self, StatError> {
        Self::with_center(values, group, LeveneCenter::Mean)
    }

    pub fn with_center<S: AsRef<str>>(
        values: &[f64],
        group: &[S],
        center: LeveneCenter,
    ) -> Result<Self, StatError> {
        let n = values.len();
        if n != group.len() {
            return Err(StatError::LengthMismatch {
                expected: n,
                got: group.len(),
            });
        }
        if n == 0 {
            return Err(StatError::EmptyInput);
        }
        let mut groups: Vec<String> = group.iter().map(|g| g.as_ref().to_owned()).collect();
        groups.sort();
        groups.dedup();
        let k = groups.len();
        if k < 2 {
            return Err(StatError::InvalidArgument(
                "Levene's test needs at least 2 groups".into(),
            ));
        }
        if n <= k {
            return Err(StatError::TooFewObservations {
                required: k + 1,
                got: n,
            });
        }

        let mut values_raw: Vec<Vec<f64>> = vec![Vec::new(); k];
        for (v, g) in values.iter().zip(group) {
            if let Ok(idx) = groups.binary_search_by(|x| x.as_str().cmp(g.as_ref())) {
                values_raw[idx].push(*v);
            }
        }

        let mut values_centered = Vec::with_capacity(k);
        for raw in &values_raw {
            let c = match center {
                LeveneCenter::Mean => mean(raw),
                LeveneCenter::Median => median(raw),
            }
            .ok_or(StatError::EmptyInput)?;
            values_centered.push(raw.iter().map(|v| (v - c).abs()).collect::<Vec<f64>>());
        }

        let groups_count: Vec<usize> = values_raw.iter().map(Vec::len).collect();
        let df_b = (k - 1) as f64;
        let df_w = (n - k) as f64;

        let grand_mean =
            values_centered.iter().map(|v| kahan_sum(v)).sum::<f64>() / n as f64;
        let mut between = 0.0;
        let mut within = 0.0;
        for (centered, count) in values_centered.iter().zip(&groups_count) {
            let center_of_centered = match center {
                LeveneCenter::Mean => mean(centered),
                LeveneCenter::Median => median(centered),
            }
            .ok_or(StatError::EmptyInput)?;
            between += *count as f64 * (center_of_centered - grand_mean).powi(2);
            within += centered
                .iter()
                .map(|v| (v - center_of_centered).powi(2))
                .sum::<f64>();
        }

        let w = (df_w / df_b) * between / within;
        let p = f2p(w, df_b, df_w, false)?;
        Ok(LeveneTest {
            center,
            groups,
            values_raw,
            values_centered,
            groups_count,
            df_b,
            df_w,
            w,
            p,
        })
    }
}

/// Critical D values at alpha = 0.05 for sample sizes 1..=50; larger
/// samples use the asymptotic 1.358/√n.
const KS_CRITICAL_TABLE: [f64; 50] = [
    0.975, 0.842, 0.708, 0.624, 0.563, 0.521, 0.486, 0.457, 0.432, 0.409, 0.391, 0.375,
    0.361, 0.349, 0.338, 0.330, 0.320, 0.310, 0.300, 0.294, 0.285, 0.277, 0.270, 0.264,
    0.259, 0.254, 0.249, 0.245, 0.241, 0.237, 0.234, 0.231, 0.227, 0.224, 0.221, 0.218,
    0.216, 0.213, 0.211, 0.208, 0.206, 0.204, 0.202, 0.200, 0.198, 0.196, 0.195, 0.193,
    0.191, 0.190,
];

/// One-sample Kolmogorov-Smirnov test of normality.
///
/// Standardizes the sample against its own mean and standard
/// deviation and compares the empirical distribution function to the
/// standard normal CDF, taking the supremum gap over both the left
/// and right limits at each step. The asymptotic p-value
/// `2·exp(−2(√n·D)²)` is unreliable below n ≈ 50; `rejected`
/// compares D against the exact alpha = 0.05 critical value instead
/// and should drive decisions for small samples.
///
/// # Examples
/// ```
/// use psylab::nonparam::OneSampleKSTest;
///
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let ks = OneSampleKSTest::new(&data).unwrap();
/// assert!(!ks.rejected);
/// ```
#[derive(Debug, Clone)]
pub struct OneSampleKSTest {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    /// Supremum distance between the empirical and normal CDFs.
    pub d: f64,
    /// Asymptotic p-value, capped at 1.
    pub p: f64,
    /// Critical value D must exceed to reject at alpha = 0.05.
    pub decide: f64,
    /// Whether normality is rejected at alpha = 0.05.
    pub rejected: bool,
}

impl OneSampleKSTest {
    pub fn new(data: &[f64]) -> Result<Self, StatError> {
        if data.len() < 2 {
            return Err(StatError::TooFewObservations {
                required: 2,
                got: data.len(),
            });
        }
        let count = data.len();
        let n = count as f64;
        let m = mean(data).ok_or(StatError::EmptyInput)?;
        let std = std_dev(data).ok_or(StatError::EmptyInput)?;
        let mut standard = standardize(data).ok_or_else(|| {
            StatError::InvalidArgument("normality test undefined for constant input".into())
        })?;
        standard.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mut d = 0.0_f64;
        for (i, z) in standard.iter().enumerate() {
            let cdf = z2p(*z);
            let edf_right = (i + 1) as f64 / n;
            let edf_left = i as f64 / n;
            d = d
                .max(edf_right - cdf)
                .max(edf_left - cdf)
                .max(cdf - edf_right)
                .max(cdf - edf_left);
        }

        let p = (2.0 * (-2.0 * (n.sqrt() * d).powi(2)).exp()).min(1.0);
        let decide = if count > 50 {
            1.358 / n.sqrt()
        } else {
            KS_CRITICAL_TABLE[count - 1]
        };
        Ok(OneSampleKSTest {
            count,
            mean: m,
            std,
            d,
            p,
            decide,
            rejected: d > decide,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levene_textbook_example() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let labels = ["A", "A", "A", "B", "B", "B", "C", "C", "C", "C"];
        let levene = LeveneTest::new(&values, &labels).unwrap();
        // hand computation: W = 3.5 * 0.266667 / 2.333333 = 0.4
        assert!((levene.w - 0.4).abs() < 1e-10);
        // pf(0.4, 2, 7, lower.tail = FALSE) = (7/7.8)^3.5
        assert!((levene.p - (7.0_f64 / 7.8).powf(3.5)).abs() < 1e-6);
        assert_eq!(levene.df_b, 2.0);
        assert_eq!(levene.df_w, 7.0);
    }

    #[test]
    fn test_levene_detects_unequal_spread() {
        let mut values = Vec::new();
        let mut labels = Vec::new();
        for i in 0..10 {
            values.push(5.0 + (i as f64 - 4.5) * 0.1);
            labels.push("tight");
        }
        for i in 0..10 {
            values.push(5.0 + (i as f64 - 4.5) * 10.0);
            labels.push("wide");
        }
        let levene = LeveneTest::new(&values, &labels).unwrap();
        assert!(levene.p < 0.001, "p = {}", levene.p);
    }

    #[test]
    fn test_levene_median_center() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let labels = ["A", "A", "A", "B", "B", "B", "C", "C", "C", "C"];
        let levene =
            LeveneTest::with_center(&values, &labels, LeveneCenter::Median).unwrap();
        assert!(levene.w.is_finite());
        assert!((0.0..=1.0).contains(&levene.p));
    }

    #[test]
    fn test_levene_validation() {
        assert!(LeveneTest::new(&[1.0, 2.0], &["A"]).is_err());
        assert!(LeveneTest::new(&[1.0, 2.0, 3.0], &["A", "A", "A"]).is_err());
    }

    #[test]
    fn test_ks_uniform_small_sample() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let ks = OneSampleKSTest::new(&data).unwrap();
        // evenly spaced data sits close to normal at n = 10
        assert!(ks.d > 0.09 && ks.d < 0.10, "d = {}", ks.d);
        assert_eq!(ks.p, 1.0);
        assert_eq!(ks.decide, 0.409);
        assert!(!ks.rejected);
    }

    #[test]
    fn test_ks_rejects_extreme_bimodal() {
        // two tight clusters far apart: maximally non-normal shape
        let mut data = vec![0.0; 30];
        data.extend(vec![1.0; 30]);
        let ks = OneSampleKSTest::new(&data).unwrap();
        assert!(ks.d > ks.decide, "d = {}, decide = {}", ks.d, ks.decide);
        assert!(ks.rejected);
    }

    #[test]
    fn test_ks_asymptotic_threshold() {
        let data: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let ks = OneSampleKSTest::new(&data).unwrap();
        assert!((ks.decide - 1.358 / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_ks_constant_input() {
        assert!(OneSampleKSTest::new(&[2.0, 2.0, 2.0]).is_err());
    }
}
