//! Immutable expression nodes.

use std::fmt;
use std::sync::Arc;

use crate::traits::{from_i32, Scalar};
use crate::types::ParamId;

/// One node of an expression graph.
///
/// Every combinator is its own variant carrying its operands, and the
/// evaluation, gradient and rendering rules dispatch on the tag. Constants
/// appear as `Constant` operands, so `x + 5` is `Add(Leaf(x), Constant(5))`
/// and `5 - x` is `Sub(Constant(5), Leaf(x))`.
#[derive(Debug)]
pub enum Node<T> {
    /// Named scalar parameter
    Leaf(ParamId),
    /// Numeric constant
    Constant(T),
    /// `lhs + rhs`
    Add(Expr<T>, Expr<T>),
    /// `lhs - rhs`
    Sub(Expr<T>, Expr<T>),
    /// `lhs * rhs`
    Mul(Expr<T>, Expr<T>),
    /// `lhs / rhs`
    Div(Expr<T>, Expr<T>),
    /// `base ^ exponent`
    Pow(Expr<T>, Expr<T>),
    /// Natural logarithm
    Log(Expr<T>),
    /// Sine
    Sin(Expr<T>),
    /// Cosine
    Cos(Expr<T>),
    /// Tangent
    Tan(Expr<T>),
}

/// Handle to an immutable, shareable expression node.
///
/// Cloning is cheap and shares the node. Combinators never modify their
/// operands; they allocate a new node that refers to them, so the graph is
/// acyclic by construction. `Expr` is `Send + Sync`.
///
/// Evaluation, differentiation and rendering recurse once per level, so the
/// depth of a graph is bounded by the stack of the thread that traverses it.
/// Very deep chains (thousands of nested nodes) need a thread with a larger
/// stack.
///
/// # Examples
/// ```
/// use expr_core::prelude::*;
///
/// let x: Expr = leaf(1);
/// let y = (&x ^ 2.0) + 1.0;
///
/// let ctx: Context = [(1, 3.0)].into_iter().collect();
/// assert_eq!(y.evaluate(&ctx).unwrap(), 10.0);
/// assert_eq!(y.gradient(&ctx).unwrap(), vec![6.0]);
/// assert_eq!(y.to_string(), "((1 ^ 2) + 1)");
/// ```
pub struct Expr<T = f64> {
    node: Arc<Node<T>>,
}

impl<T> Clone for Expr<T> {
    fn clone(&self) -> Self {
        Self {
            node: Arc::clone(&self.node),
        }
    }
}

/// Create an `f64` leaf expression for the parameter `id`.
///
/// Use [`Expr::leaf`] for other scalar types, e.g. `Expr::<f32>::leaf("x")`.
pub fn leaf(id: impl Into<ParamId>) -> Expr<f64> {
    Expr::leaf(id)
}

impl<T: Scalar> Expr<T> {
    /// Leaf expression for the parameter `id`.
    pub fn leaf(id: impl Into<ParamId>) -> Self {
        Self::from_node(Node::Leaf(id.into()))
    }

    /// Constant expression.
    pub fn constant(value: T) -> Self {
        Self::from_node(Node::Constant(value))
    }

    pub(crate) fn from_node(node: Node<T>) -> Self {
        Self {
            node: Arc::new(node),
        }
    }

    /// The node this handle points to.
    pub fn node(&self) -> &Node<T> {
        &self.node
    }

    /// Value of a `Constant` node.
    pub fn as_constant(&self) -> Option<T> {
        match *self.node {
            Node::Constant(value) => Some(value),
            _ => None,
        }
    }

    /// Identifier of a `Leaf` node.
    pub fn as_leaf(&self) -> Option<&ParamId> {
        match &*self.node {
            Node::Leaf(id) => Some(id),
            _ => None,
        }
    }

    /// Whether both handles share the same node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Identity of the underlying node, stable while any handle is alive.
    pub(crate) fn node_id(&self) -> usize {
        Arc::as_ptr(&self.node) as usize
    }

    /// Direct operands of this node, left to right.
    pub fn operands(&self) -> Vec<&Expr<T>> {
        match &*self.node {
            Node::Leaf(_) | Node::Constant(_) => Vec::new(),
            Node::Add(lhs, rhs)
            | Node::Sub(lhs, rhs)
            | Node::Mul(lhs, rhs)
            | Node::Div(lhs, rhs)
            | Node::Pow(lhs, rhs) => vec![lhs, rhs],
            Node::Log(arg) | Node::Sin(arg) | Node::Cos(arg) | Node::Tan(arg) => vec![arg],
        }
    }

    /// Distinct parameters referenced by the expression, in first-visit order
    /// of a left-to-right traversal.
    ///
    /// Useful for building a context whose order matches the expression.
    pub fn parameters(&self) -> Vec<ParamId> {
        let mut seen = Vec::new();
        self.collect_parameters(&mut seen);
        seen
    }

    fn collect_parameters(&self, seen: &mut Vec<ParamId>) {
        if let Node::Leaf(id) = &*self.node {
            if !seen.contains(id) {
                seen.push(id.clone());
            }
            return;
        }
        for operand in self.operands() {
            operand.collect_parameters(seen);
        }
    }

    /// Number of nodes visited by a full traversal, counting shared
    /// sub-expressions once per path.
    ///
    /// This is the amount of work one `evaluate` or `gradient` call performs.
    pub fn path_count(&self) -> usize {
        1 + self
            .operands()
            .into_iter()
            .map(Expr::path_count)
            .sum::<usize>()
    }

    /// `self ^ exponent`, where the exponent is a number or an expression.
    ///
    /// A constant exponent uses the power rule and a constant base uses the
    /// exponential rule; only when both sides are expressions does the
    /// gradient involve `ln(self)`.
    pub fn pow(&self, exponent: impl IntoExpr<T>) -> Self {
        Self::from_node(Node::Pow(self.clone(), exponent.into_expr()))
    }

    /// `self ^ exponent` for a constant exponent.
    pub fn powf(&self, exponent: T) -> Self {
        self.pow(Self::constant(exponent))
    }

    /// `self ^ exponent` for an integer exponent.
    pub fn powi(&self, exponent: i32) -> Self {
        self.powf(from_i32(exponent))
    }
}

impl<T: fmt::Debug> fmt::Debug for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.node, f)
    }
}

/// Conversion into an expression operand.
///
/// Implemented for expressions (shared, not copied) and for the plain
/// `f32`/`f64` values that become `Constant` nodes.
pub trait IntoExpr<T: Scalar> {
    /// Convert `self` into an expression.
    fn into_expr(self) -> Expr<T>;
}

impl<T: Scalar> IntoExpr<T> for Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self
    }
}

impl<T: Scalar> IntoExpr<T> for &Expr<T> {
    fn into_expr(self) -> Expr<T> {
        self.clone()
    }
}

impl IntoExpr<f64> for f64 {
    fn into_expr(self) -> Expr<f64> {
        Expr::constant(self)
    }
}

impl IntoExpr<f32> for f32 {
    fn into_expr(self) -> Expr<f32> {
        Expr::constant(self)
    }
}
