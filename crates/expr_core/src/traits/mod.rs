//! Core traits for scalar types and transcendental functions.
//!
//! This module defines the numeric abstractions the expression engine is
//! generic over:
//! - Scalar values (`Scalar` trait, a `num_traits::Float` with display support)
//! - Transcendental functions over numbers and expressions (`Transcendental` trait)
//!
//! Plain numbers passed through `Transcendental` are evaluated immediately;
//! expressions produce new graph nodes.

pub mod transcendental;

pub use num_traits::{Float, FloatConst};

use std::fmt::{Debug, Display};

/// Floating-point type usable as the value of an expression.
///
/// Blanket-implemented for every `Float + FloatConst` that can be displayed and
/// shared across threads, which in practice means `f32` and `f64`.
pub trait Scalar: Float + FloatConst + Debug + Display + Send + Sync + 'static {}

impl<T> Scalar for T where T: Float + FloatConst + Debug + Display + Send + Sync + 'static {}

/// Convert a small integer into the scalar type.
///
/// `f32` and `f64` represent every `i32` exactly or to nearest, so the
/// fallback is unreachable for them.
#[inline]
pub(crate) fn from_i32<T: Scalar>(value: i32) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
