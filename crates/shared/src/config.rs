//! Ledger configuration management.

use serde::Deserialize;

/// Ledger engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Default currency code (ISO 4217) for transactions that omit one.
    #[serde(default = "default_currency")]
    pub default_currency: String,
    /// Prefix for auto-generated transaction reference numbers.
    #[serde(default = "default_reference_prefix")]
    pub reference_prefix: String,
    /// Zero-padded width of the sequence part of generated references.
    #[serde(default = "default_reference_width")]
    pub reference_width: usize,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_reference_prefix() -> String {
    "TXN".to_string()
}

fn default_reference_width() -> usize {
    6
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            reference_prefix: default_reference_prefix(),
            reference_width: default_reference_width(),
        }
    }
}

impl LedgerConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. `config/default.toml` (optional)
    /// 2. `config/{RUN_MODE}.toml` (optional)
    /// 3. Environment variables prefixed `TALLY__`
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TALLY").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
