//! Textual rendering.

use std::fmt;

use crate::expr::graph::{Expr, Node};
use crate::traits::Scalar;

/// Fully parenthesised form of the expression.
///
/// Binary nodes render as `(lhs OP rhs)`, unary functions as `ln(x)`,
/// `sin(x)`, `cos(x)` and `tan(x)`. Nothing is simplified: `x * 1` stays
/// `(x * 1)`. Shared sub-expressions are written out once per path.
impl<T: Scalar> fmt::Display for Expr<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.node() {
            Node::Leaf(id) => write!(f, "{}", id),
            Node::Constant(value) => write!(f, "{}", value),
            Node::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Node::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Node::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Node::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Node::Pow(base, exponent) => write!(f, "({} ^ {})", base, exponent),
            Node::Log(arg) => write!(f, "ln({})", arg),
            Node::Sin(arg) => write!(f, "sin({})", arg),
            Node::Cos(arg) => write!(f, "cos({})", arg),
            Node::Tan(arg) => write!(f, "tan({})", arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn test_leaf_renders_identifier() {
        assert_eq!(leaf(1).to_string(), "1");
        assert_eq!(leaf("w1").to_string(), "w1");
    }

    #[test]
    fn test_binary_operators() {
        let x = leaf("x");
        let y = leaf("y");
        assert_eq!((&x + &y).to_string(), "(x + y)");
        assert_eq!((&x - &y).to_string(), "(x - y)");
        assert_eq!((&x * &y).to_string(), "(x * y)");
        assert_eq!((&x / &y).to_string(), "(x / y)");
        assert_eq!((&x ^ &y).to_string(), "(x ^ y)");
    }

    #[test]
    fn test_reflected_forms_put_constant_first() {
        let x = leaf("x");
        assert_eq!((5.0 + &x).to_string(), "(5 + x)");
        assert_eq!((5.0 - &x).to_string(), "(5 - x)");
        assert_eq!((5.0 * &x).to_string(), "(5 * x)");
        assert_eq!((5.0 / &x).to_string(), "(5 / x)");
        assert_eq!((2.5 ^ &x).to_string(), "(2.5 ^ x)");
    }

    #[test]
    fn test_no_simplification() {
        let x = leaf("x");
        assert_eq!(((&x * 1.0) + 0.0).to_string(), "((x * 1) + 0)");
        assert_eq!((-&x).to_string(), "(x * -1)");
    }

    #[test]
    fn test_functions() {
        let x = leaf(1);
        let y = leaf(2);
        assert_eq!(log(&x * &y).to_string(), "ln((1 * 2))");
        assert_eq!(tan(sin(&x)).to_string(), "tan(sin(1))");
        assert_eq!(cos(&x - 0.5).to_string(), "cos((1 - 0.5))");
    }

    #[test]
    fn test_shared_subexpression_rendered_per_path() {
        let x = leaf("x");
        let shared = sin(&x);
        assert_eq!((&shared * &shared).to_string(), "(sin(x) * sin(x))");
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let x = leaf("x");
        let e = exp(&x) / (1.0 + log(&x));
        assert_eq!(e.to_string(), e.to_string());
    }
}
