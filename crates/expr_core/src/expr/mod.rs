//! Expression graph and the three semantics defined over it.
//!
//! ## Submodules
//! - `graph`: Immutable, shared nodes (`Expr`, `Node`) and leaf construction
//! - `eval`: Numeric evaluation against a context
//! - `grad`: Analytic gradients, one partial derivative per context entry
//! - `render`: Fully parenthesised textual form (`Display`)
//! - `ops`: Operator overloads building new nodes
//! - `memo`: Opt-in evaluation that caches shared sub-expressions
//!
//! Evaluation and differentiation are plain recursions over the graph. A
//! sub-expression reachable through several parents is recomputed once per
//! path; [`MemoEvaluator`] is the explicit alternative when that matters.

mod eval;
mod grad;
mod graph;
mod memo;
mod ops;
mod render;

pub use graph::{leaf, Expr, IntoExpr, Node};
pub use memo::MemoEvaluator;
