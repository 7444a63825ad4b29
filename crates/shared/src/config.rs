//! Library configuration management.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::MoneyResult;
use crate::types::{CurrencyOverride, CurrencyRegistry, Rounding};

/// Default significant digits for monetary arithmetic.
pub const DEFAULT_PRECISION: u32 = 28;

/// Library configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoneyConfig {
    /// Arithmetic precision configuration.
    #[serde(default)]
    pub precision: PrecisionConfig,
    /// Per-currency overrides, keyed by ISO code.
    #[serde(default)]
    pub currencies: HashMap<String, CurrencyOverride>,
}

/// Arithmetic precision configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PrecisionConfig {
    /// Significant digits kept in intermediate results.
    #[serde(default = "default_digits")]
    pub digits: u32,
    /// Rounding mode for intermediate results and quantization.
    #[serde(default)]
    pub rounding: Rounding,
}

fn default_digits() -> u32 {
    DEFAULT_PRECISION
}

impl Default for PrecisionConfig {
    fn default() -> Self {
        Self {
            digits: default_digits(),
            rounding: Rounding::default(),
        }
    }
}

impl MoneyConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `PRECISE_MONEY__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Loads configuration from one file, still honoring environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or malformed.
    pub fn from_file(path: &Path) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(environment())
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid configuration.
    pub fn from_toml(text: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(text, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    /// Builds the currency registry with the configured overrides merged in.
    pub fn registry(&self) -> MoneyResult<CurrencyRegistry> {
        CurrencyRegistry::with_overrides(&self.currencies)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("PRECISE_MONEY")
        .separator("__")
        .try_parsing(true)
}
