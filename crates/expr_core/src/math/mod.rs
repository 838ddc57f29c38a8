//! Mathematical functions over numbers and expressions.
//!
//! ## Submodules
//! - `functions`: `log`, `exp`, `sin`, `cos`, `tan` and `sigmoid`, accepting
//!   either a plain number or an expression

pub mod functions;
