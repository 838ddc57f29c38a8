//! # infra_config
//!
//! Layered configuration for symgrad training runs.
//!
//! Settings come from `config/default.toml`, an optional
//! `config/{SYMGRAD_ENV}.toml`, an optional explicit file, and finally
//! `SYMGRAD_*` environment variables (`__` separates sections, as in
//! `SYMGRAD_TRAINING__EPOCHS=50`). Every field has a default, so an empty
//! environment yields a usable [`Settings`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use infra_config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Epochs: {}", settings.training.epochs);
//! ```

mod error;
mod settings;

pub use error::ConfigError;
pub use settings::{
    DataConfig, LoggingConfig, Settings, TrainingConfig, ENV_PREFIX, ENV_SELECTOR,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{ConfigError, DataConfig, LoggingConfig, Settings, TrainingConfig};
}
