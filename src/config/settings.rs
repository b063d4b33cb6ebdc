//! User settings for SleekFinance
//!
//! Holds the ledger's base currency and the exchange-rate table used to
//! normalize amounts. Rates are entered by the user, never fetched.

use serde::{Deserialize, Serialize};

use super::paths::SleekPaths;
use crate::error::SleekError;

/// One row of the exchange-rate table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// ISO currency code (matched case-insensitively)
    pub currency: String,
    /// Units of base currency per one unit of `currency`
    pub rate_to_base: f64,
}

impl ExchangeRate {
    pub fn new(currency: impl Into<String>, rate_to_base: f64) -> Self {
        Self {
            currency: currency.into(),
            rate_to_base,
        }
    }
}

/// User settings for SleekFinance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency all budgets and reports are expressed in
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    #[serde(default)]
    pub exchange_rates: Vec<ExchangeRate>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_base_currency() -> String {
    "GBP".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            base_currency: default_base_currency(),
            exchange_rates: Vec::new(),
        }
    }
}

impl Settings {
    /// Settings with a given base currency and no rates
    pub fn with_base_currency(base_currency: impl Into<String>) -> Self {
        Self {
            base_currency: base_currency.into(),
            ..Self::default()
        }
    }

    pub fn with_rate(mut self, currency: impl Into<String>, rate_to_base: f64) -> Self {
        self.exchange_rates
            .push(ExchangeRate::new(currency, rate_to_base));
        self
    }

    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &SleekPaths) -> Result<Self, SleekError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                SleekError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                SleekError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            if settings.base_currency.trim().is_empty() {
                return Err(SleekError::Config("Base currency cannot be empty".into()));
            }

            tracing::info!(path = %settings_path.display(), "loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SleekPaths) -> Result<(), SleekError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            SleekError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            SleekError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
