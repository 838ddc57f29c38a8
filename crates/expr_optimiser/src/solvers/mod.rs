//! Numerical optimisation solvers.
//!
//! Solvers here work directly on `expr_core` expressions: the loss is an
//! [`Expr`](expr_core::Expr), its parameters live in a
//! [`Context`](expr_core::Context), and exact gradients come from the
//! expression graph rather than finite differences.

mod gradient_descent;

pub use gradient_descent::{GradientDescent, GradientDescentConfig};

/// Outcome of [`GradientDescent::minimise`].
#[derive(Debug, Clone, PartialEq)]
pub struct DescentResult {
    /// Loss at the last evaluated step
    pub loss: f64,
    /// Number of steps taken
    pub iterations: usize,
    /// Whether the loss change fell below the configured tolerance
    pub converged: bool,
}
