//! Trainable models expressed as `expr_core` graphs.

mod logistic;

pub use logistic::LogisticRegression;
