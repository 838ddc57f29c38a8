//! # expr_core
//!
//! Minimal symbolic differentiation engine for symgrad.
//!
//! Callers build scalar expressions from named parameters and constants,
//! then, for a concrete [`Context`](types::Context), evaluate the expression
//! and compute its exact gradient with respect to every parameter in the
//! context in a single pass.
//!
//! ## Architecture
//!
//! - `expr`: Expression graph (`Expr`, `Node`), evaluation, differentiation,
//!   rendering, operators and the opt-in `MemoEvaluator`
//! - `types`: `ParamId`, the ordered `Context`, and `ExprError`
//! - `traits`: The `Scalar` bound and the `Transcendental` trait
//! - `math`: `log`, `exp`, `sin`, `cos`, `tan`, `sigmoid`
//!
//! Expressions are immutable and shared through `Arc`, so independent
//! evaluations can run on different threads without synchronisation.
//!
//! ## Example
//!
//! ```
//! use expr_core::prelude::*;
//!
//! let x1 = leaf(1);
//! let x2 = leaf(2);
//! let e = log(&x1 * &x2);
//!
//! let ctx: Context = [(1, 2.0), (2, 3.0)].into_iter().collect();
//! let (value, gradient) = e.evaluate_with_gradient(&ctx)?;
//!
//! assert!((value - 6.0_f64.ln()).abs() < 1e-12);
//! assert!((gradient[0] - 0.5).abs() < 1e-12);
//! assert!((gradient[1] - 1.0 / 3.0).abs() < 1e-12);
//! assert_eq!(e.to_string(), "ln((1 * 2))");
//! # Ok::<(), expr_core::types::ExprError>(())
//! ```

pub mod expr;
pub mod math;
pub mod traits;
pub mod types;

pub use expr::{leaf, Expr, IntoExpr, MemoEvaluator, Node};
pub use types::{Context, ExprError, ParamId};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::expr::{leaf, Expr, IntoExpr, MemoEvaluator, Node};
    pub use crate::math::functions::{cos, exp, log, sigmoid, sin, tan};
    pub use crate::traits::transcendental::Transcendental;
    pub use crate::traits::Scalar;
    pub use crate::types::{Context, ExprError, ParamId};
}
