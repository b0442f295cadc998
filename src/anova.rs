//! One-way and repeated-measures analysis of variance.
//!
//! Both analyses use the computational sum-of-squares forms (raw
//! sums and squared group totals rather than explicit deviations)
//! and report the conventional effect sizes: eta² (labelled r²) and
//! Cohen's f. Pairwise follow-ups are Scheffe and Bonferroni for the
//! between-subjects design, and per-pair Cohen's d for the
//! within-subjects design.

use crate::distribution::{f2p, t2p};
use crate::error::StatError;
use crate::stats::kahan_sum;

/// One pairwise comparison from [`OneWayAnova::scheffe`].
#[derive(Debug, Clone, PartialEq)]
pub struct ScheffeComparison {
    pub group_a: String,
    pub group_b: String,
    /// Difference of group means, a − b.
    pub diff: f64,
    pub f: f64,
    pub p: f64,
}

/// One pairwise comparison from [`OneWayAnova::bonferroni`].
#[derive(Debug, Clone, PartialEq)]
pub struct BonferroniComparison {
    pub group_a: String,
    pub group_b: String,
    pub diff: f64,
    pub t: f64,
    pub p: f64,
    /// Corrected per-comparison significance threshold,
    /// 0.05 / (number of pairs).
    pub sig: f64,
}

/// One-way between-subjects ANOVA.
///
/// Observations arrive as parallel slices of values and group labels;
/// groups are collected, sorted by label, and may be unbalanced.
///
/// # Examples
/// ```
/// use psylab::anova::OneWayAnova;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let labels = ["A", "A", "A", "B", "B", "B", "C", "C", "C", "C"];
/// let anova = OneWayAnova::new(&values, &labels).unwrap();
/// assert!((anova.f - 28.583333).abs() < 1e-5);
/// assert!(anova.p < 0.001);
/// ```
#[derive(Debug, Clone)]
pub struct OneWayAnova {
    /// Sorted distinct group labels.
    pub groups: Vec<String>,
    /// Values split by group, parallel to `groups`.
    pub values: Vec<Vec<f64>>,
    pub groups_count: Vec<usize>,
    pub groups_sum: Vec<f64>,
    pub groups_mean: Vec<f64>,
    /// Total, between-group, and within-group degrees of freedom.
    pub df_t: f64,
    pub df_b: f64,
    pub df_w: f64,
    pub ss_t: f64,
    pub ss_b: f64,
    pub ss_w: f64,
    pub ms_t: f64,
    pub ms_b: f64,
    pub ms_w: f64,
    pub f: f64,
    /// Right-tail p-value on (df_b, df_w).
    pub p: f64,
    /// eta², SSb / SSt.
    pub r2: f64,
    /// Cohen's f, √(r² / (1 − r²)).
    pub cohen_f: f64,
}

impl OneWayAnova {
    pub fn new<S: AsRef<str>>(values: &[f64], group: &[S]) -> Result<Self, StatError> {
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
                "one-way ANOVA needs at least 2 groups".into(),
            ));
        }
        if n <= k {
            return Err(StatError::TooFewObservations {
                required: k + 1,
                got: n,
            });
        }

        let mut split: Vec<Vec<f64>> = vec![Vec::new(); k];
        for (v, g) in values.iter().zip(group) {
            // label is guaranteed present after the dedup above
            if let Ok(idx) = groups.binary_search_by(|x| x.as_str().cmp(g.as_ref())) {
                split[idx].push(*v);
            }
        }

        let groups_count: Vec<usize> = split.iter().map(Vec::len).collect();
        let groups_sum: Vec<f64> = split.iter().map(|v| kahan_sum(v)).collect();
        let groups_mean: Vec<f64> = groups_sum
            .iter()
            .zip(&groups_count)
            .map(|(s, c)| s / *c as f64)
            .collect();

        let df_t = (n - 1) as f64;
        let df_b = (k - 1) as f64;
        let df_w = df_t - df_b;

        let total_sum = kahan_sum(values);
        let grand = total_sum * total_sum / n as f64;
        let total_sq: f64 = values.iter().map(|x| x * x).sum();
        let group_sq: f64 = groups_sum
            .iter()
            .zip(&groups_count)
            .map(|(s, c)| s * s / *c as f64)
            .sum();

        let ss_t = total_sq - grand;
        let ss_b = group_sq - grand;
        let ss_w = ss_t - ss_b;
        let ms_t = ss_t / df_t;
        let ms_b = ss_b / df_b;
        let ms_w = ss_w / df_w;
        let f = ms_b / ms_w;
        let p = f2p(f, df_b, df_w, false)?;
        let r2 = ss_b / ss_t;

        Ok(OneWayAnova {
            groups,
            values: split,
            groups_count,
            groups_sum,
            groups_mean,
            df_t,
            df_b,
            df_w,
            ss_t,
            ss_b,
            ss_w,
            ms_t,
            ms_b,
            ms_w,
            f,
            p,
            r2,
            cohen_f: (r2 / (1.0 - r2)).sqrt(),
        })
    }

    /// Scheffe post hoc test over all group pairs.
    ///
    /// Each pair is tested with an F on the pair's between sum of
    /// squares over the omnibus MSw, keeping (df_b, df_w) degrees of
    /// freedom so the family-wise error stays controlled.
    pub fn scheffe(&self) -> Result<Vec<ScheffeComparison>, StatError> {
        let k = self.groups.len();
        let mut results = Vec::with_capacity(k * (k - 1) / 2);
        for i in 0..k - 1 {
            for j in i + 1..k {
                let diff = self.groups_mean[i] - self.groups_mean[j];
                let count = (self.groups_count[i] + self.groups_count[j]) as f64;
                let pair_sum = self.groups_sum[i] + self.groups_sum[j];
                let grand_ab = pair_sum * pair_sum / count;
                let product_ab = self.groups_sum[i] * self.groups_sum[i]
                    / self.groups_count[i] as f64
                    + self.groups_sum[j] * self.groups_sum[j] / self.groups_count[j] as f64;
                let ss_ab = product_ab - grand_ab;
                let ms_ab = ss_ab / self.df_b;
                let f = ms_ab / self.ms_w;
                let p = f2p(f, self.df_b, self.df_w, false)?;
                results.push(ScheffeComparison {
                    group_a: self.groups[i].clone(),
                    group_b: self.groups[j].clone(),
                    diff,
                    f,
                    p,
                });
            }
        }
        Ok(results)
    }

    /// Bonferroni post hoc test over all group pairs.
    ///
    /// Pairwise t-tests with MSw as the pooled variance; the reported
    /// `sig` threshold divides 0.05 by the number of comparisons.
    pub fn bonferroni(&self) -> Result<Vec<BonferroniComparison>, StatError> {
        let k = self.groups.len();
        let pairs = k * (k - 1) / 2;
        let sig = 0.05 / pairs as f64;
        let mut results = Vec::with_capacity(pairs);
        for i in 0..k - 1 {
            for j in i + 1..k {
                let diff = self.groups_mean[i] - self.groups_mean[j];
                let se = (self.ms_w / self.groups_count[i] as f64
                    + self.ms_w / self.groups_count[j] as f64)
                    .sqrt();
                let t = diff.abs() / se;
                let p = t2p(t, self.df_w, true)?;
                results.push(BonferroniComparison {
                    group_a: self.groups[i].clone(),
                    group_b: self.groups[j].clone(),
                    diff,
                    t,
                    p,
                    sig,
                });
            }
        }
        Ok(results)
    }
}

/// Per-pair effect size from a repeated-measures design.
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseCohenD {
    pub group_a: String,
    pub group_b: String,
    pub diff: f64,
    /// diff / √MSerror.
    pub d: f64,
}

/// Repeated-measures (within-subjects) ANOVA.
///
/// `values` holds one row per condition; column i is subject i, so
/// every row must have the same length. Subject variance is removed
/// from the within sum of squares, and the F ratio uses the residual
/// error term.
///
/// # Examples
/// ```
/// use psylab::anova::RepeatedMeasuresAnova;
///
/// let values = vec![
///     vec![1.0, 2.0, 3.0, 4.0, 5.0],
///     vec![2.0, 3.0, 5.0, 6.0, 7.0],
///     vec![4.0, 4.0, 6.0, 7.0, 9.0],
/// ];
/// let anova = RepeatedMeasuresAnova::new(&values).unwrap();
/// assert!(anova.f > 1.0);
/// assert!(anova.p < 0.05);
/// ```
#[derive(Debug, Clone)]
pub struct RepeatedMeasuresAnova {
    /// Number of conditions.
    pub k: usize,
    /// Number of subjects.
    pub n: usize,
    pub groups: Vec<String>,
    pub groups_sum: Vec<f64>,
    pub groups_mean: Vec<f64>,
    pub df_t: f64,
    pub df_b: f64,
    pub df_w: f64,
    /// Subject and residual degrees of freedom, n − 1 and dfW − (n − 1).
    pub df_subj: f64,
    pub df_error: f64,
    pub ss_t: f64,
    pub ss_b: f64,
    pub ss_w: f64,
    /// Subject sum of squares removed from SSw.
    pub ss_subj: f64,
    pub ss_error: f64,
    pub ms_t: f64,
    pub ms_b: f64,
    pub ms_w: f64,
    pub ms_subj: f64,
    pub ms_error: f64,
    /// F = MSb / MSerror on (df_b, df_error).
    pub f: f64,
    pub p: f64,
    /// eta², SSb / SSt.
    pub r2: f64,
    /// Partial eta², SSb / (SSb + SSerror).
    pub r2_adj: f64,
    pub cohen_f: f64,
    /// Cohen's d for every condition pair.
    pub cohen_d: Vec<PairwiseCohenD>,
}

impl RepeatedMeasuresAnova {
    /// Conditions named "Group 1", "Group 2", and so on.
    pub fn new(values: &[Vec<f64>]) -> Result<Self, StatError> {
        let names: Vec<String> = (1..=values.len()).map(|i| format!("Group {i}")).collect();
        Self::with_names(values, &names)
    }

    pub fn with_names<S: AsRef<str>>(values: &[Vec<f64>], names: &[S]) -> Result<Self, StatError> {
        let k = values.len();
        if k < 2 {
            return Err(StatError::InvalidArgument(
                "repeated-measures ANOVA needs at least 2 conditions".into(),
            ));
        }
        if names.len() != k {
            return Err(StatError::LengthMismatch {
                expected: k,
                got: names.len(),
            });
        }
        let n = values[0].len();
        if values.iter().any(|v| v.len() != n) {
            return Err(StatError::InvalidArgument(
                "all conditions must have the same number of subjects".into(),
            ));
        }
        if n < 2 {
            return Err(StatError::TooFewObservations { required: 2, got: n });
        }

        let groups: Vec<String> = names.iter().map(|s| s.as_ref().to_owned()).collect();
        let groups_sum: Vec<f64> = values.iter().map(|v| kahan_sum(v)).collect();
        let groups_mean: Vec<f64> = groups_sum.iter().map(|s| s / n as f64).collect();

        let total = n * k;
        let total_sum: f64 = groups_sum.iter().sum();
        let grand = total_sum * total_sum / total as f64;
        let total_sq: f64 = values.iter().flatten().map(|x| x * x).sum();
        let group_sq: f64 = groups_sum.iter().map(|s| s * s / n as f64).sum();
        let subj_sq: f64 = (0..n)
            .map(|i| {
                let s: f64 = values.iter().map(|row| row[i]).sum();
                s * s / k as f64
            })
            .sum();

        let df_t = (total - 1) as f64;
        let df_b = (k - 1) as f64;
        let df_w = df_t - df_b;
        let df_subj = (n - 1) as f64;
        let df_error = df_w - df_subj;

        let ss_t = total_sq - grand;
        let ss_b = group_sq - grand;
        let ss_w = ss_t - ss_b;
        let ss_subj = subj_sq - grand;
        let ss_error = ss_w - ss_subj;

        let ms_t = ss_t / df_t;
        let ms_b = ss_b / df_b;
        let ms_w = ss_w / df_w;
        let ms_subj = ss_subj / df_subj;
        let ms_error = ss_error / df_error;

        let f = ms_b / ms_error;
        let p = f2p(f, df_b, df_error, false)?;
        let r2 = ss_b / ss_t;
        let r2_adj = ss_b / (ss_b + ss_error);

        let mut cohen_d = Vec::with_capacity(k * (k - 1) / 2);
        for i in 0..k - 1 {
            for j in i + 1..k {
                let diff = groups_mean[i] - groups_mean[j];
                cohen_d.push(PairwiseCohenD {
                    group_a: groups[i].clone(),
                    group_b: groups[j].clone(),
                    diff,
                    d: diff / ms_error.sqrt(),
                });
            }
        }

        Ok(RepeatedMeasuresAnova {
            k,
            n,
            groups,
            groups_sum,
            groups_mean,
            df_t,
            df_b,
            df_w,
            df_subj,
            df_error,
            ss_t,
            ss_b,
            ss_w,
            ss_subj,
            ss_error,
            ms_t,
            ms_b,
            ms_w,
            ms_subj,
            ms_error,
            f,
            p,
            r2,
            r2_adj,
            cohen_f: (r2 / (1.0 - r2)).sqrt(),
            cohen_d,
        })
    }
}
