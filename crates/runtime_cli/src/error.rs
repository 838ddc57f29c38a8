//! CLI error types

use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] infra_config::ConfigError),

    /// Expression error
    #[error("Expression error: {0}")]
    Expression(#[from] expr_core::ExprError),

    /// Training error
    #[error("Training error: {0}")]
    Training(#[from] expr_optimiser::OptimiserError),

    /// Invalid sampling distribution
    #[error("Invalid distribution: {0}")]
    Distribution(#[from] rand_distr::NormalError),

    /// Thread pool could not be configured
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Built-in differentiation self-test failed
    #[error("Self-test failed: {0}")]
    SelfTest(String),
}
