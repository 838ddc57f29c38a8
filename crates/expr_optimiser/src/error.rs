//! Optimiser errors.

use expr_core::ExprError;
use thiserror::Error;

/// Errors that can occur during training.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// The loss expression could not be evaluated
    #[error("Expression error: {0}")]
    Expression(#[from] ExprError),

    /// Numerical instability
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Invalid optimiser or model configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Sample width or sample count does not match the model
    #[error("Dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// Insufficient data points
    #[error("Insufficient data points: need {required}, got {provided}")]
    InsufficientData { required: usize, provided: usize },
}
