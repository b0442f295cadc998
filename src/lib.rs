//! # psylab
//!
//! Statistics and numerical analysis for psychological and
//! educational research.
//!
//! This crate provides the special-function kernel, distribution
//! conversions, and matrix arithmetic that research statistics sit
//! on, plus the analyses themselves: t-tests, ANOVA, correlation and
//! regression, mediation with bootstrap intervals, and scale
//! reliability.
//!
//! ## Modules
//!
//! - [`special`] — Gamma and incomplete beta/gamma kernel
//! - [`distribution`] — Statistic/p-value conversions and random variates
//! - [`matrix`] — Dense matrix arithmetic and Gauss-Jordan inversion
//! - [`stats`] — Descriptive statistics over slices
//! - [`ttest`] — One-sample, two-sample, paired, and Welch t-tests
//! - [`anova`] — One-way and repeated-measures ANOVA with post hoc tests
//! - [`correlation`] — Pearson inference and partial correlations
//! - [`nonparam`] — Levene and Kolmogorov-Smirnov assumption checks
//! - [`regression`] — Simple, multiple, and stepwise linear regression
//! - [`mediation`] — Simple mediation with percentile bootstrap
//! - [`reliability`] — Cronbach's alpha, split-half, test-retest
//! - [`random`] — Seedable generators for simulation and resampling
//!
//! ## Design Philosophy
//!
//! - **Numerical stability first**: Lanczos and Lentz evaluations for
//!   the special functions, Kahan summation for accumulation
//! - **Explicit failure**: analyses return `Result` with typed
//!   errors; descriptive helpers return `Option` instead of NaN
//! - **Reproducible sampling**: every stochastic routine takes a
//!   caller-supplied seedable generator
//! - **Property-based testing**: mathematical invariants verified via
//!   proptest
//!
//! ## Example
//!
//! ```
//! use psylab::ttest::TwoSampleTTest;
//!
//! let treatment = [24.0, 27.0, 31.0, 29.0, 25.0];
//! let control = [20.0, 22.0, 25.0, 21.0, 23.0];
//! let test = TwoSampleTTest::new(&treatment, &control).unwrap();
//! assert!(test.p < 0.05);
//! ```

pub mod anova;
pub mod correlation;
pub mod distribution;
pub mod error;
pub mod matrix;
pub mod mediation;
pub mod nonparam;
pub mod random;
pub mod regression;
pub mod reliability;
pub mod special;
pub mod stats;
pub mod ttest;

pub use error::StatError;
