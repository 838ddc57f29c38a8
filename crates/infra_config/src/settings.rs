//! Settings and configuration structures.

use std::path::Path;

use crate::error::ConfigError;
use config::{Config, Environment, File};
use serde::Deserialize;

/// Environment variable selecting `config/{environment}.toml`.
pub const ENV_SELECTOR: &str = "SYMGRAD_ENV";

/// Prefix of environment variable overrides, e.g. `SYMGRAD_TRAINING__EPOCHS`.
pub const ENV_PREFIX: &str = "SYMGRAD";

/// Main application settings.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct Settings {
    /// Training configuration
    #[serde(default)]
    pub training: TrainingConfig,
    /// Synthetic data configuration
    #[serde(default)]
    pub data: DataConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Settings {
    /// Load settings from configuration files and environment variables.
    ///
    /// Configuration is loaded in the following order (later sources override earlier):
    /// 1. `config/default.toml`
    /// 2. `config/{environment}.toml` (based on `SYMGRAD_ENV`)
    /// 3. Environment variables prefixed with `SYMGRAD_`
    ///
    /// Missing files are skipped; every field has a default.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None)
    }

    /// Like [`Settings::load`], with `path` layered over the config
    /// directory and under the environment. Unlike the directory files,
    /// `path` must exist.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }
        Self::build(Some(path))
    }

    fn build(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let env = std::env::var(ENV_SELECTOR).unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false));
        if let Some(path) = extra {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings no training run could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lr = self.training.learning_rate;
        if !(lr.is_finite() && lr > 0.0) {
            return Err(ConfigError::invalid(
                "training.learning_rate",
                format!("must be positive and finite, got {}", lr),
            ));
        }
        if self.training.epochs == 0 {
            return Err(ConfigError::invalid("training.epochs", "must be at least 1"));
        }
        if self.training.thread_pool_size == 0 {
            return Err(ConfigError::invalid(
                "training.thread_pool_size",
                "must be at least 1",
            ));
        }
        if self.data.features == 0 {
            return Err(ConfigError::invalid("data.features", "must be at least 1"));
        }
        if self.data.samples == 0 {
            return Err(ConfigError::invalid("data.samples", "must be at least 1"));
        }
        if !(self.data.noise.is_finite() && self.data.noise >= 0.0) {
            return Err(ConfigError::invalid(
                "data.noise",
                format!("must be non-negative, got {}", self.data.noise),
            ));
        }
        Ok(())
    }
}

/// Training configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TrainingConfig {
    /// Gradient descent step size
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f64,
    /// Passes over the training set
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Thread pool size for parallel prediction
    #[serde(default = "default_thread_pool_size")]
    pub thread_pool_size: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epochs: default_epochs(),
            thread_pool_size: default_thread_pool_size(),
        }
    }
}

fn default_learning_rate() -> f64 {
    0.1
}

fn default_epochs() -> usize {
    20
}

fn default_thread_pool_size() -> usize {
    num_cpus::get()
}

/// Synthetic data configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DataConfig {
    /// Number of generated samples
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Number of features per sample
    #[serde(default = "default_features")]
    pub features: usize,
    /// Seed for feature sampling and weight initialisation
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Standard deviation of Gaussian noise added to the hidden linear score
    #[serde(default)]
    pub noise: f64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            samples: default_samples(),
            features: default_features(),
            seed: default_seed(),
            noise: 0.0,
        }
    }
}

fn default_samples() -> usize {
    500
}

fn default_features() -> usize {
    2
}

fn default_seed() -> u64 {
    42
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.training.learning_rate, 0.1);
        assert_eq!(settings.training.epochs, 20);
        assert!(settings.training.thread_pool_size > 0);
        assert_eq!(settings.data.samples, 500);
        assert_eq!(settings.data.features, 2);
        assert_eq!(settings.data.seed, 42);
        assert_eq!(settings.logging.level, "info");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let file = write_config(
            r#"
            [training]
            learning_rate = 0.5
            epochs = 3

            [data]
            features = 4
            noise = 0.25

            [logging]
            level = "debug"
            "#,
        );

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.training.learning_rate, 0.5);
        assert_eq!(settings.training.epochs, 3);
        assert_eq!(settings.data.features, 4);
        assert_eq!(settings.data.noise, 0.25);
        assert_eq!(settings.data.samples, 500);
        assert_eq!(settings.logging.level, "debug");
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Settings::load_from("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let file = write_config("[training]\nlearning_rate = -1.0\n");
        match Settings::load_from(file.path()) {
            Err(ConfigError::InvalidValue { key, .. }) => {
                assert_eq!(key, "training.learning_rate")
            }
            other => panic!("expected InvalidValue, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_file_is_a_config_crate_error() {
        let file = write_config("[training\nepochs = ");
        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::ConfigCrateError(_))
        ));
    }

    #[test]
    fn test_environment_overrides_file() {
        // Only this test touches SYMGRAD_DATA__SEED.
        let file = write_config("[data]\nseed = 1\n");
        std::env::set_var("SYMGRAD_DATA__SEED", "9");
        let settings = Settings::load_from(file.path());
        std::env::remove_var("SYMGRAD_DATA__SEED");

        assert_eq!(settings.unwrap().data.seed, 9);
    }

    #[test]
    fn test_validate_rejects_zero_features() {
        let mut settings = Settings::default();
        settings.data.features = 0;
        match settings.validate() {
            Err(err) => assert_eq!(
                err.to_string(),
                "Invalid configuration value for 'data.features': must be at least 1"
            ),
            Ok(()) => panic!("zero features accepted"),
        }
    }
}
