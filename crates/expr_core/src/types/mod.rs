//! Core value types.
//!
//! This module provides:
//! - `param`: Parameter identifiers used by leaves and contexts
//! - `context`: The ordered, index-stable assignment of values to parameters
//! - `error`: Structured error types for evaluation and differentiation

pub mod context;
pub mod error;
pub mod param;

pub use context::Context;
pub use error::ExprError;
pub use param::ParamId;
