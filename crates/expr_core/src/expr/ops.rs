//! Operator surface.
//!
//! `+`, `-`, `*`, `/` and `^` are implemented for every combination of owned
//! and borrowed expressions, for expressions combined with a plain number on
//! either side, and unary `-`. Borrowed operands are shared, never copied.
//!
//! `^` is power, matching the rendered notation. Rust gives `^` a lower
//! precedence than the arithmetic operators, so `x ^ 2.0 + 1.0` parses as
//! `x ^ 3.0`; parenthesise, or use [`Expr::pow`], [`Expr::powf`] and
//! [`Expr::powi`].

use std::ops::{Add, BitXor, Div, Mul, Neg, Sub};

use crate::expr::graph::{Expr, Node};
use crate::traits::Scalar;

macro_rules! impl_binary_op {
    ($Trait:ident, $method:ident, $variant:ident) => {
        impl<T: Scalar> $Trait<Expr<T>> for Expr<T> {
            type Output = Expr<T>;

            fn $method(self, rhs: Expr<T>) -> Expr<T> {
                Expr::from_node(Node::$variant(self, rhs))
            }
        }

        impl<T: Scalar> $Trait<&Expr<T>> for Expr<T> {
            type Output = Expr<T>;

            fn $method(self, rhs: &Expr<T>) -> Expr<T> {
                Expr::from_node(Node::$variant(self, rhs.clone()))
            }
        }

        impl<T: Scalar> $Trait<Expr<T>> for &Expr<T> {
            type Output = Expr<T>;

            fn $method(self, rhs: Expr<T>) -> Expr<T> {
                Expr::from_node(Node::$variant(self.clone(), rhs))
            }
        }

        impl<T: Scalar> $Trait<&Expr<T>> for &Expr<T> {
            type Output = Expr<T>;

            fn $method(self, rhs: &Expr<T>) -> Expr<T> {
                Expr::from_node(Node::$variant(self.clone(), rhs.clone()))
            }
        }
    };
}

macro_rules! impl_scalar_op {
    ($scalar:ty, $Trait:ident, $method:ident, $variant:ident) => {
        impl $Trait<$scalar> for Expr<$scalar> {
            type Output = Expr<$scalar>;

            fn $method(self, rhs: $scalar) -> Expr<$scalar> {
                Expr::from_node(Node::$variant(self, Expr::constant(rhs)))
            }
        }

        impl $Trait<$scalar> for &Expr<$scalar> {
            type Output = Expr<$scalar>;

            fn $method(self, rhs: $scalar) -> Expr<$scalar> {
                Expr::from_node(Node::$variant(self.clone(), Expr::constant(rhs)))
            }
        }

        // Reflected: the constant is the left operand.
        impl $Trait<Expr<$scalar>> for $scalar {
            type Output = Expr<$scalar>;

            fn $method(self, rhs: Expr<$scalar>) -> Expr<$scalar> {
                Expr::from_node(Node::$variant(Expr::constant(self), rhs))
            }
        }

        impl $Trait<&Expr<$scalar>> for $scalar {
            type Output = Expr<$scalar>;

            fn $method(self, rhs: &Expr<$scalar>) -> Expr<$scalar> {
                Expr::from_node(Node::$variant(Expr::constant(self), rhs.clone()))
            }
        }
    };
}

macro_rules! impl_all_ops {
    ($($scalar:ty),*) => {
        impl_binary_op!(Add, add, Add);
        impl_binary_op!(Sub, sub, Sub);
        impl_binary_op!(Mul, mul, Mul);
        impl_binary_op!(Div, div, Div);
        impl_binary_op!(BitXor, bitxor, Pow);
        $(
            impl_scalar_op!($scalar, Add, add, Add);
            impl_scalar_op!($scalar, Sub, sub, Sub);
            impl_scalar_op!($scalar, Mul, mul, Mul);
            impl_scalar_op!($scalar, Div, div, Div);
            impl_scalar_op!($scalar, BitXor, bitxor, Pow);
        )*
    };
}

impl_all_ops!(f32, f64);

/// `-x` is `x * -1`.
impl<T: Scalar> Neg for Expr<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        Expr::from_node(Node::Mul(self, Expr::constant(-T::one())))
    }
}

impl<T: Scalar> Neg for &Expr<T> {
    type Output = Expr<T>;

    fn neg(self) -> Expr<T> {
        -self.clone()
    }
}

/// Sum of expressions, folded left to right; `Expr::constant(0)` when empty.
impl<T: Scalar> std::iter::Sum for Expr<T> {
    fn sum<I: Iterator<Item = Expr<T>>>(iter: I) -> Expr<T> {
        iter.reduce(|acc, term| acc + term)
            .unwrap_or_else(|| Expr::constant(T::zero()))
    }
}
