//! Free-function form of the transcendental functions.
//!
//! Each function accepts anything implementing [`Transcendental`]: a plain
//! `f32`/`f64` is evaluated immediately, while an `Expr` (owned or borrowed)
//! yields a new expression node.
//!
//! # Examples
//! ```
//! use expr_core::math::functions::{cos, log};
//! use expr_core::prelude::*;
//!
//! assert_eq!(cos(0.0_f64), 1.0);
//!
//! let x = leaf(1);
//! let y = leaf(2);
//! let e = log(&x * &y);
//! assert_eq!(e.to_string(), "ln((1 * 2))");
//! ```

use crate::traits::transcendental::Transcendental;

/// Natural logarithm; `x.evaluate > 0` is required for a finite result.
#[inline]
pub fn log<X: Transcendental>(x: X) -> X::Output {
    Transcendental::log(x)
}

/// Exponential, built as `e ^ x`.
#[inline]
pub fn exp<X: Transcendental>(x: X) -> X::Output {
    Transcendental::exp(x)
}

/// Sine.
#[inline]
pub fn sin<X: Transcendental>(x: X) -> X::Output {
    Transcendental::sin(x)
}

/// Cosine.
#[inline]
pub fn cos<X: Transcendental>(x: X) -> X::Output {
    Transcendental::cos(x)
}

/// Tangent, evaluated as `sin(x) / cos(x)` and rendered `tan(x)`.
#[inline]
pub fn tan<X: Transcendental>(x: X) -> X::Output {
    Transcendental::tan(x)
}

/// Logistic function `1 / (1 + exp(0 - x))`.
#[inline]
pub fn sigmoid<X: Transcendental>(x: X) -> X::Output {
    Transcendental::sigmoid(x)
}
