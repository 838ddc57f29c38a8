//! Numeric evaluation.

use tracing::trace;

use crate::expr::graph::{Expr, Node};
use crate::traits::Scalar;
use crate::types::{Context, ExprError};

impl<T: Scalar> Expr<T> {
    /// Evaluate the expression against `context`.
    ///
    /// # Errors
    /// `ExprError::MissingVariable` if a leaf's parameter is absent from
    /// `context`. Out-of-domain arithmetic yields `NaN` or infinity instead of
    /// an error.
    ///
    /// # Examples
    /// ```
    /// use expr_core::prelude::*;
    ///
    /// let e: Expr = sin(leaf(1));
    /// let ctx: Context = [(1, 0.0)].into_iter().collect();
    /// assert_eq!(e.evaluate(&ctx).unwrap(), 0.0);
    /// ```
    pub fn evaluate(&self, context: &Context<T>) -> Result<T, ExprError> {
        trace!(parameters = context.len(), "evaluating expression");
        value_of(self, context)
    }
}

/// Plain recursive evaluation; shared operands are evaluated once per path.
pub(crate) fn value_of<T: Scalar>(expr: &Expr<T>, context: &Context<T>) -> Result<T, ExprError> {
    let value = match expr.node() {
        Node::Leaf(id) => context
            .get(id)
            .ok_or_else(|| ExprError::MissingVariable(id.clone()))?,
        Node::Constant(value) => *value,
        Node::Add(lhs, rhs) => value_of(lhs, context)? + value_of(rhs, context)?,
        Node::Sub(lhs, rhs) => value_of(lhs, context)? - value_of(rhs, context)?,
        Node::Mul(lhs, rhs) => value_of(lhs, context)? * value_of(rhs, context)?,
        Node::Div(lhs, rhs) => value_of(lhs, context)? / value_of(rhs, context)?,
        Node::Pow(base, exponent) => value_of(base, context)?.powf(value_of(exponent, context)?),
        Node::Log(arg) => value_of(arg, context)?.ln(),
        Node::Sin(arg) => value_of(arg, context)?.sin(),
        Node::Cos(arg) => value_of(arg, context)?.cos(),
        Node::Tan(arg) => {
            let x = value_of(arg, context)?;
            x.sin() / x.cos()
        }
    };
    Ok(value)
}
