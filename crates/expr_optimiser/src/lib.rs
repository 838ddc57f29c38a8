//! # expr_optimiser
//!
//! Training on top of `expr_core` expressions.
//!
//! - `solvers`: `GradientDescent` stepping a loss expression's context
//! - `models`: `LogisticRegression` built as a `sigmoid(Σ wi·xi)` graph
//!
//! Losses are ordinary [`Expr`](expr_core::Expr) values, so gradients are
//! exact and come from the same engine that evaluates them.

pub mod error;
pub mod models;
pub mod solvers;

pub use error::OptimiserError;
pub use models::LogisticRegression;
pub use solvers::{DescentResult, GradientDescent, GradientDescentConfig};
