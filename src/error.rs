//! Shared error type for the analysis modules.
//!
//! The kernel modules ([`crate::distribution`], [`crate::matrix`])
//! carry their own narrow error enums; the analyses (t-tests, ANOVA,
//! regression, and friends) wrap those in [`StatError`] via `?` so a
//! caller only deals with one type.

use crate::distribution::DistributionError;
use crate::matrix::MatrixError;

/// Error type for statistical analyses.
#[derive(Debug, Clone, PartialEq)]
pub enum StatError {
    /// Paired inputs of different lengths.
    LengthMismatch { expected: usize, got: usize },
    /// An input sample was empty.
    EmptyInput,
    /// Not enough observations to estimate the requested quantity.
    TooFewObservations { required: usize, got: usize },
    /// A parameter outside its valid range.
    InvalidArgument(String),
    /// A distribution conversion failed.
    Distribution(DistributionError),
    /// A matrix operation failed (typically a singular design).
    Matrix(MatrixError),
}

impl std::fmt::Display for StatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatError::LengthMismatch { expected, got } => {
                write!(f, "length mismatch: expected {expected}, got {got}")
            }
            StatError::EmptyInput => write!(f, "input sample is empty"),
            StatError::TooFewObservations { required, got } => {
                write!(f, "too few observations: need at least {required}, got {got}")
            }
            StatError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            StatError::Distribution(e) => write!(f, "distribution error: {e}"),
            StatError::Matrix(e) => write!(f, "matrix error: {e}"),
        }
    }
}

impl std::error::Error for StatError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StatError::Distribution(e) => Some(e),
            StatError::Matrix(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DistributionError> for StatError {
    fn from(e: DistributionError) -> Self {
        StatError::Distribution(e)
    }
}

impl From<MatrixError> for StatError {
    fn from(e: MatrixError) -> Self {
        StatError::Matrix(e)
    }
}
