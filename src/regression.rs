//! Linear regression: simple (one predictor), multiple (normal
//! equations), and stepwise variable selection.
//!
//! The multiple regression solves `β = (XᵀX)⁻¹Xᵀy` with an intercept
//! column prepended to the design matrix, and derives coefficient
//! standard errors from the `MSE·(XᵀX)⁻¹` diagonal. Stepwise
//! selection wraps it, adding or removing predictors by coefficient
//! p-value until no move beats the threshold.

use crate::distribution::{f2p, t2p};
use crate::error::StatError;
use crate::matrix::Matrix;
use crate::stats::{correlation, mean, ss, ss_diff, std_dev};

fn column(iv: &[Vec<f64>], j: usize) -> Vec<f64> {
    iv.iter().map(|row| row[j]).collect()
}

fn check_design(iv: &[Vec<f64>], dv: &[f64]) -> Result<usize, StatError> {
    let n = dv.len();
    if iv.len() != n {
        return Err(StatError::LengthMismatch {
            expected: n,
            got: iv.len(),
        });
    }
    if n == 0 {
        return Err(StatError::EmptyInput);
    }
    let k = iv[0].len();
    if k == 0 {
        return Err(StatError::InvalidArgument(
            "at least one independent variable is required".into(),
        ));
    }
    if iv.iter().any(|row| row.len() != k) {
        return Err(StatError::InvalidArgument(
            "all observations must have the same number of predictors".into(),
        ));
    }
    if n <= k + 1 {
        return Err(StatError::TooFewObservations {
            required: k + 2,
            got: n,
        });
    }
    Ok(k)
}

/// Simple linear regression of y on a single predictor.
///
/// # Examples
/// ```
/// use psylab::regression::SimpleLinearRegression;
///
/// let x = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let y = [2.0, 4.0, 5.0, 4.0, 5.0];
/// let model = SimpleLinearRegression::new(&x, &y).unwrap();
/// assert!((model.b1 - 0.6).abs() < 1e-10);
/// assert!((model.b0 - 2.2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleLinearRegression {
    /// Intercept.
    pub b0: f64,
    /// Slope.
    pub b1: f64,
    pub x_mean: f64,
    pub y_mean: f64,
    pub x_std: f64,
    pub y_std: f64,
    pub ss_x: f64,
    pub ss_y: f64,
    pub ss_t: f64,
    pub ss_r: f64,
    pub ss_e: f64,
    /// Regression, error, and total degrees of freedom (1, n − 2, n − 1).
    pub df_r: f64,
    pub df_e: f64,
    pub df_t: f64,
    pub r2: f64,
    pub f: f64,
    /// t statistic for the slope, √F.
    pub t: f64,
    /// Right-tail p-value of F on (1, n − 2).
    pub p: f64,
    /// Standard error of the slope.
    pub se_b1: f64,
}

impl SimpleLinearRegression {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, StatError> {
        if x.len() != y.len() {
            return Err(StatError::LengthMismatch {
                expected: x.len(),
                got: y.len(),
            });
        }
        if x.len() < 3 {
            return Err(StatError::TooFewObservations {
                required: 3,
                got: x.len(),
            });
        }
        let x_mean = mean(x).ok_or(StatError::EmptyInput)?;
        let y_mean = mean(y).ok_or(StatError::EmptyInput)?;
        let ss_x = ss(x).ok_or(StatError::EmptyInput)?;
        let ss_y = ss(y).ok_or(StatError::EmptyInput)?;
        if ss_x == 0.0 {
            return Err(StatError::InvalidArgument(
                "predictor is constant".into(),
            ));
        }
        let x_std = std_dev(x).ok_or(StatError::EmptyInput)?;
        let y_std = std_dev(y).ok_or(StatError::EmptyInput)?;
        let df_r = 1.0;
        let df_e = (x.len() - 2) as f64;
        let df_t = (x.len() - 1) as f64;
        let r = correlation(x, y).unwrap_or(0.0);
        let b1 = r * y_std / x_std;
        let b0 = y_mean - b1 * x_mean;
        let predictions: Vec<f64> = x.iter().map(|xi| b0 + b1 * xi).collect();
        let ss_t = ss_y;
        let flat = vec![y_mean; y.len()];
        let ss_r = ss_diff(&predictions, &flat).ok_or(StatError::EmptyInput)?;
        let ss_e = ss_diff(y, &predictions).ok_or(StatError::EmptyInput)?;
        let f = (ss_r / df_r) / (ss_e / df_e);
        let p = f2p(f, df_r, df_e, false)?;
        Ok(SimpleLinearRegression {
            b0,
            b1,
            x_mean,
            y_mean,
            x_std,
            y_std,
            ss_x,
            ss_y,
            ss_t,
            ss_r,
            ss_e,
            df_r,
            df_e,
            df_t,
            r2: ss_r / ss_t,
            f,
            t: f.abs().sqrt().copysign(b1),
            p,
            se_b1: (ss_e / (df_e * ss_x)).sqrt(),
        })
    }

    /// Predicted value at x.
    pub fn predict(&self, x: f64) -> f64 {
        self.b0 + self.b1 * x
    }
}

/// Multiple linear regression via the normal equations.
///
/// `iv` holds one row per observation. Coefficient 0 is the
/// intercept; coefficient i + 1 belongs to predictor i, and the
/// `standard_errors`, `t_values`, and `p_values` vectors are indexed
/// the same way.
///
/// # Errors
/// [`StatError::Matrix`] with a singular cause when predictors are
/// linearly dependent.
#[derive(Debug, Clone)]
pub struct MultipleLinearRegression {
    pub dv_mean: f64,
    pub dv_std: f64,
    pub iv_means: Vec<f64>,
    pub iv_stds: Vec<f64>,
    /// Intercept followed by one coefficient per predictor.
    pub coefficients: Vec<f64>,
    pub standard_errors: Vec<f64>,
    pub t_values: Vec<f64>,
    /// Two-sided p-value for each coefficient on n − k − 1 df.
    pub p_values: Vec<f64>,
    pub ss_t: f64,
    pub ss_r: f64,
    pub ss_e: f64,
    pub df_r: f64,
    pub df_e: f64,
    pub df_t: f64,
    pub r2: f64,
    pub r2_adj: f64,
    /// Omnibus F on (k, n − k − 1).
    pub f: f64,
    pub p: f64,
}

impl MultipleLinearRegression {
    pub fn new(iv: &[Vec<f64>], dv: &[f64]) -> Result<Self, StatError> {
        let k = check_design(iv, dv)?;
        let n = dv.len();

        let dv_mean = mean(dv).ok_or(StatError::EmptyInput)?;
        let dv_std = std_dev(dv).ok_or(StatError::EmptyInput)?;
        let iv_means: Vec<f64> = (0..k)
            .map(|j| mean(&column(iv, j)).unwrap_or(f64::NAN))
            .collect();
        let iv_stds: Vec<f64> = (0..k)
            .map(|j| std_dev(&column(iv, j)).unwrap_or(f64::NAN))
            .collect();

        // design matrix with an intercept column
        let design: Vec<Vec<f64>> = iv
            .iter()
            .map(|row| {
                let mut r = Vec::with_capacity(k + 1);
                r.push(1.0);
                r.extend_from_slice(row);
                r
            })
            .collect();
        let x = Matrix::new(design)?;
        let xt = x.transpose();
        let xtx_inv = xt.multiply(&x)?.inverse()?;
        let xty = xt.multiply_vec(dv)?;
        let coefficients = xtx_inv.multiply_vec(&xty)?;

        let predictions: Vec<f64> = iv
            .iter()
            .map(|row| {
                coefficients[0]
                    + row
                        .iter()
                        .zip(&coefficients[1..])
                        .map(|(xi, b)| xi * b)
                        .sum::<f64>()
            })
            .collect();

        let ss_t = ss(dv).ok_or(StatError::EmptyInput)?;
        let ss_e = ss_diff(dv, &predictions).ok_or(StatError::EmptyInput)?;
        let ss_r = ss_t - ss_e;

        let df_r = k as f64;
        let df_e = (n - k - 1) as f64;
        let df_t = (n - 1) as f64;

        let r2 = ss_r / ss_t;
        let r2_adj = 1.0 - (1.0 - r2) * df_t / df_e;
        let f = (ss_r / df_r) / (ss_e / df_e);
        let p = f2p(f, df_r, df_e, false)?;

        let mse = ss_e / df_e;
        let standard_errors: Vec<f64> = (0..=k)
            .map(|i| (xtx_inv.get(i, i) * mse).sqrt())
            .collect();
        let t_values: Vec<f64> = coefficients
            .iter()
            .zip(&standard_errors)
            .map(|(b, se)| b / se)
            .collect();
        let p_values = t_values
            .iter()
            .map(|t| t2p(t.abs(), df_e, true))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(MultipleLinearRegression {
            dv_mean,
            dv_std,
            iv_means,
            iv_stds,
            coefficients,
            standard_errors,
            t_values,
            p_values,
            ss_t,
            ss_r,
            ss_e,
            df_r,
            df_e,
            df_t,
            r2,
            r2_adj,
            f,
            p,
        })
    }

    /// Predicted value for one observation.
    ///
    /// # Errors
    /// [`StatError::LengthMismatch`] unless `x` has one value per
    /// predictor.
    pub fn predict(&self, x: &[f64]) -> Result<f64, StatError> {
        if x.len() != self.coefficients.len() - 1 {
            return Err(StatError::LengthMismatch {
                expected: self.coefficients.len() - 1,
                got: x.len(),
            });
        }
        Ok(self.coefficients[0]
            + x.iter()
                .zip(&self.coefficients[1..])
                .map(|(xi, b)| xi * b)
                .sum::<f64>())
    }
}

/// Direction of stepwise variable selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StepwiseMethod {
    /// Start empty, add the most significant candidate each round.
    Forward,
    /// Start full, drop the least significant predictor each round.
    Backward,
    /// Alternate forward additions with backward eliminations.
    #[default]
    Both,
}

/// Stepwise multiple regression.
///
/// Predictors enter or leave based on their coefficient p-value
/// against `threshold`. The final model is refit on the selected
/// subset; `selected_variables` records which original columns
/// survive, in selection order, and `coefficients[i + 1]` belongs to
/// `selected_variables[i]`. When nothing qualifies the result is an
/// intercept-only model.
#[derive(Debug, Clone)]
pub struct StepwiseRegression {
    pub method: StepwiseMethod,
    pub threshold: f64,
    /// Indices of the original predictors kept in the model.
    pub selected_variables: Vec<usize>,
    pub dv_mean: f64,
    pub dv_std: f64,
    pub iv_means: Vec<f64>,
    pub iv_stds: Vec<f64>,
    pub coefficients: Vec<f64>,
    pub standard_errors: Vec<f64>,
    pub t_values: Vec<f64>,
    pub p_values: Vec<f64>,
    pub ss_t: f64,
    pub ss_r: f64,
    pub ss_e: f64,
    pub df_r: f64,
    pub df_e: f64,
    pub df_t: f64,
    pub r2: f64,
    pub r2_adj: f64,
    pub f: f64,
    pub p: f64,
    k: usize,
}

impl StepwiseRegression {
    /// Bidirectional selection at threshold 0.05.
    pub fn new(iv: &[Vec<f64>], dv: &[f64]) -> Result<Self, StatError> {
        Self::with_options(iv, dv, StepwiseMethod::Both, 0.05)
    }

    pub fn with_options(
        iv: &[Vec<f64>],
        dv: &[f64],
        method: StepwiseMethod,
        threshold: f64,
    ) -> Result<Self, StatError> {
        let k = check_design(iv, dv)?;
        if !(0.0..1.0).contains(&threshold) || threshold == 0.0 {
            return Err(StatError::InvalidArgument(format!(
                "threshold must be in (0, 1), got {threshold}"
            )));
        }

        let mut selected: Vec<usize> = Vec::new();
        match method {
            StepwiseMethod::Forward => {
                Self::forward_selection(iv, dv, k, threshold, &mut selected);
            }
            StepwiseMethod::Backward => {
                selected = (0..k).collect();
                Self::backward_elimination(iv, dv, k, threshold, &mut selected);
            }
            StepwiseMethod::Both => {
                loop {
                    let before = selected.len();
                    Self::forward_selection(iv, dv, k, threshold, &mut selected);
                    if selected.len() == before {
                        break;
                    }
                    Self::backward_elimination(iv, dv, k, threshold, &mut selected);
                }
            }
        }

        Self::build_final_model(iv, dv, k, method, threshold, selected)
    }

    fn subset(iv: &[Vec<f64>], indices: &[usize]) -> Vec<Vec<f64>> {
        iv.iter()
            .map(|row| indices.iter().map(|&j| row[j]).collect())
            .collect()
    }

    fn forward_selection(
        iv: &[Vec<f64>],
        dv: &[f64],
        k: usize,
        threshold: f64,
        selected: &mut Vec<usize>,
    ) {
        loop {
            let mut best: Option<(usize, f64)> = None;
            for candidate in 0..k {
                if selected.contains(&candidate) {
                    continue;
                }
                let mut trial = selected.clone();
                trial.push(candidate);
                // singular or otherwise unusable trial models are skipped
                let Ok(model) = MultipleLinearRegression::new(&Self::subset(iv, &trial), dv)
                else {
                    continue;
                };
                let p = match model.p_values.last() {
                    Some(&p) if p.is_finite() => p,
                    _ => continue,
                };
                if p < threshold && best.map_or(true, |(_, bp)| p < bp) {
                    best = Some((candidate, p));
                }
            }
            match best {
                Some((idx, _)) => selected.push(idx),
                None => break,
            }
            if selected.len() == k {
                break;
            }
        }
    }

    fn backward_elimination(
        iv: &[Vec<f64>],
        dv: &[f64],
        k: usize,
        threshold: f64,
        selected: &mut Vec<usize>,
    ) {
        let Ok(mut model) = MultipleLinearRegression::new(&Self::subset(iv, selected), dv)
        else {
            // collinear full model: restart from the empty set
            selected.clear();
            Self::forward_selection(iv, dv, k, threshold, selected);
            return;
        };
        while !selected.is_empty() {
            let mut worst: Option<(usize, f64)> = None;
            for (pos, _) in selected.iter().enumerate() {
                let p = model.p_values[pos + 1];
                if p > threshold && worst.map_or(true, |(_, wp)| p > wp) {
                    worst = Some((pos, p));
                }
            }
            let Some((pos, _)) = worst else {
                break;
            };
            let removed = selected.remove(pos);
            if selected.is_empty() {
                break;
            }
            match MultipleLinearRegression::new(&Self::subset(iv, selected), dv) {
                Ok(refit) => model = refit,
                Err(_) => {
                    selected.push(removed);
                    break;
                }
            }
        }
    }

    fn build_final_model(
        iv: &[Vec<f64>],
        dv: &[f64],
        k: usize,
        method: StepwiseMethod,
        threshold: f64,
        selected: Vec<usize>,
    ) -> Result<Self, StatError> {
        let n = dv.len() as f64;
        let dv_mean = mean(dv).ok_or(StatError::EmptyInput)?;
        let dv_std = std_dev(dv).ok_or(StatError::EmptyInput)?;
        let iv_means: Vec<f64> = (0..k)
            .map(|j| mean(&column(iv, j)).unwrap_or(f64::NAN))
            .collect();
        let iv_stds: Vec<f64> = (0..k)
            .map(|j| std_dev(&column(iv, j)).unwrap_or(f64::NAN))
            .collect();

        if selected.is_empty() {
            // intercept-only fallback when nothing clears the threshold
            let se = dv_std / n.sqrt();
            let t = dv_mean / se;
            let ss_t = ss(dv).ok_or(StatError::EmptyInput)?;
            return Ok(StepwiseRegression {
                method,
                threshold,
                selected_variables: Vec::new(),
                dv_mean,
                dv_std,
                iv_means,
                iv_stds,
                coefficients: vec![dv_mean],
                standard_errors: vec![se],
                t_values: vec![t],
                p_values: vec![t2p(t.abs(), n - 1.0, true)?],
                ss_t,
                ss_r: 0.0,
                ss_e: ss_t,
                df_r: 0.0,
                df_e: n - 1.0,
                df_t: n - 1.0,
                r2: 0.0,
                r2_adj: 0.0,
                f: 0.0,
                p: 1.0,
                k,
            });
        }

        let model = MultipleLinearRegression::new(&Self::subset(iv, &selected), dv)?;
        Ok(StepwiseRegression {
            method,
            threshold,
            selected_variables: selected,
            dv_mean,
            dv_std,
            iv_means,
            iv_stds,
            coefficients: model.coefficients,
            standard_errors: model.standard_errors,
            t_values: model.t_values,
            p_values: model.p_values,
            ss_t: model.ss_t,
            ss_r: model.ss_r,
            ss_e: model.ss_e,
            df_r: model.df_r,
            df_e: model.df_e,
            df_t: model.df_t,
            r2: model.r2,
            r2_adj: model.r2_adj,
            f: model.f,
            p: model.p,
            k,
        })
    }

    /// Predicted value from a full-dimension observation; only the
    /// selected predictors contribute.
    ///
    /// # Errors
    /// [`StatError::LengthMismatch`] unless `x` matches the original
    /// predictor count.
    pub fn predict(&self, x: &[f64]) -> Result<f64, StatError> {
        if x.len() != self.k {
            return Err(StatError::LengthMismatch {
                expected: self.k,
                got: x.len(),
            });
        }
        Ok(self.coefficients[0]
            + self
                .selected_variables
                .iter()
                .zip(&self.coefficients[1..])
                .map(|(&j, b)| x[j] * b)
                .sum::<f64>())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MatrixError;

    #[test]
    fn test_simple_exact_fit() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let model = SimpleLinearRegression::new(&x, &y).unwrap();
        assert!((model.b1 - 2.0).abs() < 1e-10);
        assert!((model.b0 - 1.0).abs() < 1e-10);
        assert!(model.ss_e < 1e-10);
        assert!((model.r2 - 1.0).abs() < 1e-10);
        assert_eq!(model.predict(10.0), model.b0 + model.b1 * 10.0);
    }

    #[test]
    fn test_simple_against_hand_computation() {
        // classic 5-point example: b1 = 0.6, b0 = 2.2, F = 4.5
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let model = SimpleLinearRegression::new(&x, &y).unwrap();
        assert!((model.b1 - 0.6).abs() < 1e-10);
        assert!((model.b0 - 2.2).abs() < 1e-10);
        assert!((model.ss_r - 3.6).abs() < 1e-10);
        assert!((model.ss_e - 2.4).abs() < 1e-10);
        assert!((model.f - 4.5).abs() < 1e-10);
        assert!((model.r2 - 0.6).abs() < 1e-10);
        assert!((model.se_b1 - 0.08_f64.sqrt()).abs() < 1e-10);
        // lm summary: p = 0.1238
        assert!((model.p - 0.1238).abs() < 1e-3);
    }

    #[test]
    fn test_simple_validation() {
        assert!(SimpleLinearRegression::new(&[1.0, 2.0], &[1.0]).is_err());
        assert!(SimpleLinearRegression::new(&[1.0, 2.0], &[1.0, 2.0]).is_err());
        assert!(
            SimpleLinearRegression::new(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]).is_err()
        );
    }

    /// 2x4 factorial design with noise orthogonal to both predictors,
    /// so the OLS solution recovers (3, 2, 1) exactly.
    fn factorial_design() -> (Vec<Vec<f64>>, Vec<f64>) {
        let iv = vec![
            vec![1.0, 1.0],
            vec![1.0, 2.0],
            vec![1.0, 3.0],
            vec![1.0, 4.0],
            vec![2.0, 1.0],
            vec![2.0, 2.0],
            vec![2.0, 3.0],
            vec![2.0, 4.0],
        ];
        let e = [0.05, -0.05, -0.05, 0.05, -0.05, 0.05, 0.05, -0.05];
        let dv: Vec<f64> = iv
            .iter()
            .zip(e)
            .map(|(row, ei)| 3.0 + 2.0 * row[0] + row[1] + ei)
            .collect();
        (iv, dv)
    }

    #[test]
    fn test_multiple_recovers_coefficients() {
        let (iv, dv) = factorial_design();
        let model = MultipleLinearRegression::new(&iv, &dv).unwrap();
        assert!((model.coefficients[0] - 3.0).abs() < 1e-8);
        assert!((model.coefficients[1] - 2.0).abs() < 1e-8);
        assert!((model.coefficients[2] - 1.0).abs() < 1e-8);
        assert!((model.ss_e - 0.02).abs() < 1e-8);
        assert_eq!(model.df_e, 5.0);
        // standard errors from the (X'X)^-1 diagonal times MSE = 0.004
        assert!((model.standard_errors[1] - 0.002_f64.sqrt()).abs() < 1e-8);
        assert!((model.standard_errors[2] - 0.0004_f64.sqrt()).abs() < 1e-8);
        assert!(model.p_values[1] < 1e-6);
        assert!(model.p_values[2] < 1e-6);
    }

    #[test]
    fn test_multiple_single_predictor_matches_simple() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [2.0, 4.0, 5.0, 4.0, 5.0];
        let iv: Vec<Vec<f64>> = x.iter().map(|&v| vec![v]).collect();
        let multiple = MultipleLinearRegression::new(&iv, &y).unwrap();
        let simple = SimpleLinearRegression::new(&x, &y).unwrap();
        assert!((multiple.coefficients[0] - simple.b0).abs() < 1e-10);
        assert!((multiple.coefficients[1] - simple.b1).abs() < 1e-10);
        assert!((multiple.f - simple.f).abs() < 1e-9);
        assert!((multiple.p - simple.p).abs() < 1e-9);
        assert!((multiple.standard_errors[1] - simple.se_b1).abs() < 1e-10);
    }

    #[test]
    fn test_multiple_singular_design() {
        // second predictor is twice the first
        let iv: Vec<Vec<f64>> = (1..=6).map(|i| vec![i as f64, 2.0 * i as f64]).collect();
        let dv = vec![1.0, 3.0, 2.0, 5.0, 4.0, 6.0];
        assert!(matches!(
            MultipleLinearRegression::new(&iv, &dv),
            Err(StatError::Matrix(MatrixError::Singular))
        ));
    }

    #[test]
    fn test_multiple_predict() {
        let (iv, dv) = factorial_design();
        let model = MultipleLinearRegression::new(&iv, &dv).unwrap();
        let pred = model.predict(&[2.0, 3.0]).unwrap();
        assert!((pred - 10.0).abs() < 1e-6);
        assert!(model.predict(&[1.0]).is_err());
    }

    #[test]
    fn test_stepwise_keeps_real_predictors() {
        let (iv, dv) = factorial_design();
        for method in [
            StepwiseMethod::Forward,
            StepwiseMethod::Backward,
            StepwiseMethod::Both,
        ] {
            let model = StepwiseRegression::with_options(&iv, &dv, method, 0.05).unwrap();
            let mut selected = model.selected_variables.clone();
            selected.sort_unstable();
            assert_eq!(selected, vec![0, 1], "method {method:?}");
            assert!(model.r2 > 0.99);
            let pred = model.predict(&[2.0, 3.0]).unwrap();
            assert!((pred - 10.0).abs() < 0.1, "method {method:?}: pred {pred}");
        }
    }

    #[test]
    fn test_stepwise_falls_back_to_intercept_only() {
        // dv is exactly uncorrelated with the predictor
        let iv: Vec<Vec<f64>> =
            [1.0, 1.0, 2.0, 2.0, 3.0, 3.0].iter().map(|&v| vec![v]).collect();
        let dv = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
        let model =
            StepwiseRegression::with_options(&iv, &dv, StepwiseMethod::Forward, 0.05)
                .unwrap();
        assert!(model.selected_variables.is_empty());
        assert_eq!(model.coefficients, vec![1.5]);
        assert_eq!(model.r2, 0.0);
        assert_eq!(model.f, 0.0);
        assert_eq!(model.p, 1.0);
        assert_eq!(model.predict(&[2.0]).unwrap(), 1.5);
    }

    #[test]
    fn test_stepwise_backward_drops_noise_column() {
        // dv depends only on column 0; column 1 is orthogonal to both
        // column 0 and the noise, so its coefficient is exactly zero
        let iv = vec![
            vec![1.0, 1.0],
            vec![2.0, 2.0],
            vec![3.0, 3.0],
            vec![4.0, 4.0],
            vec![5.0, 5.0],
            vec![6.0, 5.0],
            vec![7.0, 4.0],
            vec![8.0, 3.0],
            vec![9.0, 2.0],
            vec![10.0, 1.0],
        ];
        let e = [0.1, -0.1, 0.1, -0.1, 0.1, -0.1, 0.1, -0.1, 0.1, -0.1];
        let dv: Vec<f64> = iv.iter().zip(e).map(|(row, ei)| 2.0 * row[0] + ei).collect();
        let model =
            StepwiseRegression::with_options(&iv, &dv, StepwiseMethod::Backward, 0.05)
                .unwrap();
        assert_eq!(model.selected_variables, vec![0]);
        assert!((model.coefficients[1] - 2.0).abs() < 0.05);
    }

    #[test]
    fn test_stepwise_validation() {
        let iv = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let dv = vec![1.0, 2.0, 3.0, 4.0];
        assert!(
            StepwiseRegression::with_options(&iv, &dv, StepwiseMethod::Both, 0.0).is_err()
        );
        assert!(StepwiseRegression::new(&[], &[]).is_err());
    }
}
