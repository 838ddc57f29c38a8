//! Transcendental functions over plain numbers and expressions.
//!
//! `Transcendental` is implemented for `f32` and `f64` (the result is computed
//! immediately and no graph node is built) and for [`Expr`] (the result is a
//! new node whose gradient follows the chain rule).

use crate::expr::{Expr, Node};
use crate::traits::Scalar;

/// Functions that accept either a number or an expression.
///
/// Prefer the free functions in [`crate::math::functions`]; calling these
/// methods with method syntax on `f64` resolves to the inherent `f64` methods
/// first (`f64::log` takes a base).
///
/// # Examples
/// ```
/// use expr_core::math::functions::{log, sin};
/// use expr_core::prelude::*;
///
/// // Numbers are evaluated immediately.
/// assert_eq!(sin(0.0_f64), 0.0);
///
/// // Expressions build new nodes.
/// let x: Expr = leaf("x");
/// assert_eq!(log(&x).to_string(), "ln(x)");
/// ```
pub trait Transcendental {
    /// Plain number for scalars, `Expr<T>` for expressions.
    type Output;

    /// Natural logarithm.
    fn log(self) -> Self::Output;

    /// Exponential, `e ^ self`.
    fn exp(self) -> Self::Output;

    /// Sine.
    fn sin(self) -> Self::Output;

    /// Cosine.
    fn cos(self) -> Self::Output;

    /// Tangent, `sin(self) / cos(self)`.
    fn tan(self) -> Self::Output;

    /// Logistic function, `1 / (1 + exp(0 - self))`.
    fn sigmoid(self) -> Self::Output;
}

macro_rules! impl_transcendental_for_float {
    ($($scalar:ty),*) => {
        $(
            impl Transcendental for $scalar {
                type Output = $scalar;

                #[inline]
                fn log(self) -> $scalar {
                    self.ln()
                }

                #[inline]
                fn exp(self) -> $scalar {
                    <$scalar>::exp(self)
                }

                #[inline]
                fn sin(self) -> $scalar {
                    <$scalar>::sin(self)
                }

                #[inline]
                fn cos(self) -> $scalar {
                    <$scalar>::cos(self)
                }

                #[inline]
                fn tan(self) -> $scalar {
                    <$scalar>::sin(self) / <$scalar>::cos(self)
                }

                #[inline]
                fn sigmoid(self) -> $scalar {
                    1.0 / (1.0 + <$scalar>::exp(0.0 - self))
                }
            }
        )*
    };
}

impl_transcendental_for_float!(f32, f64);

impl<T: Scalar> Transcendental for Expr<T> {
    type Output = Expr<T>;

    fn log(self) -> Expr<T> {
        Expr::from_node(Node::Log(self))
    }

    fn exp(self) -> Expr<T> {
        Expr::from_node(Node::Pow(Expr::constant(T::E()), self))
    }

    fn sin(self) -> Expr<T> {
        Expr::from_node(Node::Sin(self))
    }

    fn cos(self) -> Expr<T> {
        Expr::from_node(Node::Cos(self))
    }

    fn tan(self) -> Expr<T> {
        Expr::from_node(Node::Tan(self))
    }

    fn sigmoid(self) -> Expr<T> {
        let negated = Expr::from_node(Node::Sub(Expr::constant(T::zero()), self));
        let denominator = Expr::from_node(Node::Add(
            Expr::constant(T::one()),
            Transcendental::exp(negated),
        ));
        Expr::from_node(Node::Div(Expr::constant(T::one()), denominator))
    }
}

impl<T: Scalar> Transcendental for &Expr<T> {
    type Output = Expr<T>;

    fn log(self) -> Expr<T> {
        Transcendental::log(self.clone())
    }

    fn exp(self) -> Expr<T> {
        Transcendental::exp(self.clone())
    }

    fn sin(self) -> Expr<T> {
        Transcendental::sin(self.clone())
    }

    fn cos(self) -> Expr<T> {
        Transcendental::cos(self.clone())
    }

    fn tan(self) -> Expr<T> {
        Transcendental::tan(self.clone())
    }

    fn sigmoid(self) -> Expr<T> {
        Transcendental::sigmoid(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Context;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_inputs_bypass_graph() {
        assert_relative_eq!(Transcendental::log(std::f64::consts::E), 1.0);
        assert_relative_eq!(Transcendental::exp(0.0_f64), 1.0);
        assert_relative_eq!(Transcendental::cos(0.0_f32), 1.0_f32);
        assert_relative_eq!(Transcendental::tan(0.5_f64), 0.5_f64.tan(), epsilon = 1e-12);
        assert_relative_eq!(Transcendental::sigmoid(0.0_f64), 0.5);
    }

    #[test]
    fn test_expression_inputs_build_nodes() {
        let x: Expr<f64> = Expr::leaf("x");
        assert_eq!(Transcendental::log(&x).to_string(), "ln(x)");
        assert_eq!(Transcendental::sin(&x).to_string(), "sin(x)");
        assert_eq!(Transcendental::cos(&x).to_string(), "cos(x)");
        assert_eq!(Transcendental::tan(&x).to_string(), "tan(x)");
        assert_eq!(
            Transcendental::exp(&x).to_string(),
            format!("({} ^ x)", std::f64::consts::E)
        );
    }

    #[test]
    fn test_sigmoid_matches_scalar_version() {
        let x: Expr<f64> = Expr::leaf("x");
        let ctx: Context<f64> = [("x", 0.3)].into_iter().collect();
        let value = Transcendental::sigmoid(&x).evaluate(&ctx).unwrap();
        assert_relative_eq!(value, Transcendental::sigmoid(0.3_f64), epsilon = 1e-12);
        assert_eq!(
            Transcendental::sigmoid(&x).to_string(),
            format!("(1 / (1 + ({} ^ (0 - x))))", std::f64::consts::E)
        );
    }

    #[test]
    fn test_sigmoid_gradient_is_logistic_derivative() {
        let x: Expr<f64> = Expr::leaf("x");
        let ctx: Context<f64> = [("x", -1.2)].into_iter().collect();
        let s = Transcendental::sigmoid(-1.2_f64);
        let grad = Transcendental::sigmoid(&x).gradient(&ctx).unwrap();
        assert_relative_eq!(grad[0], s * (1.0 - s), epsilon = 1e-12);
    }
}
