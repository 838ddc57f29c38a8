//! Opt-in memoised evaluation.
//!
//! The plain [`Expr::evaluate`] and [`Expr::gradient`] recompute a shared
//! sub-expression once per path that reaches it. [`MemoEvaluator`] instead
//! caches the value and gradient of every node it visits, keyed by node
//! identity, for the one context it borrows. Results are identical to the
//! plain API.

use std::collections::HashMap;

use tracing::debug;

use crate::expr::grad::{differentiate, Differential};
use crate::expr::graph::Expr;
use crate::traits::Scalar;
use crate::types::{Context, ExprError};

/// Cached result for one node.
struct CachedNode<T> {
    /// Keeps the node alive so its address cannot be reused by another node
    /// while the cache entry exists.
    _node: Expr<T>,
    value: T,
    gradient: Vec<T>,
}

/// Evaluator that computes each distinct node once per context.
///
/// The cache is keyed by node identity and bound to the borrowed context, so
/// it cannot outlive or be reused across contexts. Build a new evaluator (or
/// call [`MemoEvaluator::clear`]) after changing parameter values.
///
/// # Examples
/// ```
/// use expr_core::prelude::*;
///
/// let x: Expr = leaf("x");
/// let shared = sin(&x) * &x;
/// let e = &shared + &shared * &shared;
///
/// let ctx: Context = [("x", 0.8)].into_iter().collect();
/// let mut memo = MemoEvaluator::new(&ctx);
///
/// assert_eq!(memo.evaluate(&e).unwrap(), e.evaluate(&ctx).unwrap());
/// assert_eq!(memo.gradient(&e).unwrap(), e.gradient(&ctx).unwrap());
/// // x, sin(x), sin(x)*x, the product and the sum
/// assert_eq!(memo.cached_nodes(), 5);
/// ```
pub struct MemoEvaluator<'c, T: Scalar> {
    context: &'c Context<T>,
    cache: HashMap<usize, CachedNode<T>>,
}

impl<'c, T: Scalar> MemoEvaluator<'c, T> {
    /// Create an evaluator with an empty cache for `context`.
    pub fn new(context: &'c Context<T>) -> Self {
        Self {
            context,
            cache: HashMap::new(),
        }
    }

    /// The context every cached result was computed against.
    pub fn context(&self) -> &'c Context<T> {
        self.context
    }

    /// Value of `expr`, reusing cached sub-results.
    ///
    /// # Errors
    /// `ExprError::MissingVariable` as for [`Expr::evaluate`].
    pub fn evaluate(&mut self, expr: &Expr<T>) -> Result<T, ExprError> {
        Ok(self.visit(expr)?.0)
    }

    /// Gradient of `expr`, reusing cached sub-results.
    ///
    /// # Errors
    /// `ExprError::MissingVariable` as for [`Expr::gradient`].
    pub fn gradient(&mut self, expr: &Expr<T>) -> Result<Vec<T>, ExprError> {
        Ok(self.visit(expr)?.1)
    }

    /// Value and gradient of `expr`.
    pub fn evaluate_with_gradient(&mut self, expr: &Expr<T>) -> Result<(T, Vec<T>), ExprError> {
        self.visit(expr)
    }

    /// Number of distinct nodes currently cached.
    pub fn cached_nodes(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached result.
    pub fn clear(&mut self) {
        debug!(entries = self.cache.len(), "clearing memoised results");
        self.cache.clear();
    }

    fn visit(&mut self, expr: &Expr<T>) -> Result<Differential<T>, ExprError> {
        let key = expr.node_id();
        if let Some(hit) = self.cache.get(&key) {
            return Ok((hit.value, hit.gradient.clone()));
        }

        let context = self.context;
        let (value, gradient) = differentiate(expr, context, |operand| self.visit(operand))?;
        self.cache.insert(
            key,
            CachedNode {
                _node: expr.clone(),
                value,
                gradient: gradient.clone(),
            },
        );
        Ok((value, gradient))
    }
}
