//! Expression error types for structured error handling.

use thiserror::Error;

use crate::types::param::ParamId;

/// Errors raised while evaluating or differentiating an expression.
///
/// Construction of expressions never fails. Domain problems such as the
/// logarithm of a negative number or division by zero are not errors either:
/// they propagate as `NaN` or infinity following IEEE 754 arithmetic.
///
/// # Variants
/// - `MissingVariable`: A leaf refers to a parameter absent from the context
/// - `GradientLength`: A gradient vector does not line up with a context
///
/// # Examples
/// ```
/// use expr_core::types::{ExprError, ParamId};
///
/// let err = ExprError::MissingVariable(ParamId::from(5));
/// assert_eq!(format!("{}", err), "Cannot find parameter '5' in the context");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    /// A leaf's identifier is not a key of the supplied context
    #[error("Cannot find parameter '{0}' in the context")]
    MissingVariable(ParamId),

    /// A gradient vector's length differs from the context's key count
    #[error("Gradient length mismatch: context has {expected} parameters, gradient has {found}")]
    GradientLength { expected: usize, found: usize },
}
