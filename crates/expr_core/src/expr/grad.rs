//! Analytic differentiation.
//!
//! Each node produces its value and its gradient together. The gradient has
//! one entry per context parameter, in context order, and is assembled from
//! the operands' values and gradients with the usual rules:
//!
//! ```text
//! (a + b)' = a' + b'
//! (a - b)' = a' - b'
//! (a * b)' = a'·b + b'·a
//! (a / b)' = a'·b⁻¹ - a·b⁻²·b'
//! (a ^ c)' = c·a^(c-1)·a'                      constant exponent
//! (c ^ b)' = ln(c)·c^b·b'                      constant base
//! (a ^ b)' = b·a^(b-1)·a' + a^b·ln(a)·b'       general case
//! ln(a)'   = a'/a
//! sin(a)'  = cos(a)·a'
//! cos(a)'  = -sin(a)·a'
//! tan(a)'  = (cos²(a) + sin²(a))/cos²(a)·a'    quotient rule over sin/cos
//! ```

use tracing::trace;

use crate::expr::graph::{Expr, Node};
use crate::traits::Scalar;
use crate::types::{Context, ExprError};

/// Value and gradient of one node.
pub(crate) type Differential<T> = (T, Vec<T>);

impl<T: Scalar> Expr<T> {
    /// Gradient of the expression with respect to every parameter of
    /// `context`.
    ///
    /// Entry `i` is the partial derivative with respect to the parameter at
    /// index `i` of the context. Parameters the expression does not use get a
    /// zero entry.
    ///
    /// # Errors
    /// `ExprError::MissingVariable` if a leaf's parameter is absent from
    /// `context`.
    ///
    /// # Examples
    /// ```
    /// use expr_core::prelude::*;
    ///
    /// let x: Expr = leaf(1);
    /// let ctx: Context = [(1, 3.0)].into_iter().collect();
    /// assert_eq!(x.powi(2).gradient(&ctx).unwrap(), vec![6.0]);
    /// ```
    pub fn gradient(&self, context: &Context<T>) -> Result<Vec<T>, ExprError> {
        trace!(parameters = context.len(), "differentiating expression");
        Ok(differential_of(self, context)?.1)
    }

    /// Value and gradient in a single traversal.
    pub fn evaluate_with_gradient(&self, context: &Context<T>) -> Result<(T, Vec<T>), ExprError> {
        trace!(parameters = context.len(), "evaluating expression with gradient");
        differential_of(self, context)
    }
}

/// Plain recursive differentiation; shared operands are visited once per path.
pub(crate) fn differential_of<T: Scalar>(
    expr: &Expr<T>,
    context: &Context<T>,
) -> Result<Differential<T>, ExprError> {
    differentiate(expr, context, |operand| differential_of(operand, context))
}

/// Apply the rule for `expr`'s node, obtaining operand differentials from
/// `visit`.
///
/// Shared by the plain recursion and the memoising evaluator.
pub(crate) fn differentiate<T, F>(
    expr: &Expr<T>,
    context: &Context<T>,
    mut visit: F,
) -> Result<Differential<T>, ExprError>
where
    T: Scalar,
    F: FnMut(&Expr<T>) -> Result<Differential<T>, ExprError>,
{
    match expr.node() {
        Node::Leaf(id) => {
            let value = context
                .get(id)
                .ok_or_else(|| ExprError::MissingVariable(id.clone()))?;
            Ok((value, context.basis(id)?))
        }
        Node::Constant(value) => Ok((*value, context.zeros())),
        Node::Add(lhs, rhs) => {
            let (a, mut da) = visit(lhs)?;
            let (b, db) = visit(rhs)?;
            axpy(&mut da, T::one(), &db);
            Ok((a + b, da))
        }
        Node::Sub(lhs, rhs) => {
            let (a, mut da) = visit(lhs)?;
            let (b, db) = visit(rhs)?;
            axpy(&mut da, -T::one(), &db);
            Ok((a - b, da))
        }
        Node::Mul(lhs, rhs) => {
            let (a, mut da) = visit(lhs)?;
            let (b, db) = visit(rhs)?;
            scale(&mut da, b);
            axpy(&mut da, a, &db);
            Ok((a * b, da))
        }
        Node::Div(lhs, rhs) => {
            let (a, mut da) = visit(lhs)?;
            let (b, db) = visit(rhs)?;
            scale(&mut da, b.recip());
            axpy(&mut da, -(a / (b * b)), &db);
            Ok((a / b, da))
        }
        Node::Pow(base, exponent) => power(base, exponent, visit),
        Node::Log(arg) => {
            let (x, mut dx) = visit(arg)?;
            scale(&mut dx, x.recip());
            Ok((x.ln(), dx))
        }
        Node::Sin(arg) => {
            let (x, mut dx) = visit(arg)?;
            scale(&mut dx, x.cos());
            Ok((x.sin(), dx))
        }
        Node::Cos(arg) => {
            let (x, mut dx) = visit(arg)?;
            scale(&mut dx, -x.sin());
            Ok((x.cos(), dx))
        }
        Node::Tan(arg) => {
            let (x, mut dx) = visit(arg)?;
            let (s, c) = (x.sin(), x.cos());
            scale(&mut dx, (c * c + s * s) / (c * c));
            Ok((s / c, dx))
        }
    }
}

/// Power node: the rule depends on which side is a constant.
fn power<T, F>(base: &Expr<T>, exponent: &Expr<T>, mut visit: F) -> Result<Differential<T>, ExprError>
where
    T: Scalar,
    F: FnMut(&Expr<T>) -> Result<Differential<T>, ExprError>,
{
    if let Some(p) = exponent.as_constant() {
        let (a, mut da) = visit(base)?;
        scale(&mut da, p * a.powf(p - T::one()));
        return Ok((a.powf(p), da));
    }

    if let Some(c) = base.as_constant() {
        let (b, mut db) = visit(exponent)?;
        let value = c.powf(b);
        scale(&mut db, c.ln() * value);
        return Ok((value, db));
    }

    let (a, mut da) = visit(base)?;
    let (b, db) = visit(exponent)?;
    let value = a.powf(b);
    scale(&mut da, b * a.powf(b - T::one()));
    axpy(&mut da, value * a.ln(), &db);
    Ok((value, da))
}

/// `v *= k`
#[inline]
fn scale<T: Scalar>(v: &mut [T], k: T) {
    for vi in v.iter_mut() {
        *vi = *vi * k;
    }
}

/// `y += a * x`
#[inline]
fn axpy<T: Scalar>(y: &mut [T], a: T, x: &[T]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi = *yi + a * *xi;
    }
}
