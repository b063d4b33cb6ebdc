//! Currency normalization
//!
//! Converts native amounts to the ledger's base currency. Unknown currencies
//! are never an error: they convert at an implied rate of 1.

use std::collections::HashMap;
use std::fmt;

use crate::config::Settings;
use crate::models::Money;

/// Where a conversion rate came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// The currency is the base currency
    Base,
    /// Explicit row in the exchange-rate table
    Table,
    /// Unknown currency treated as base units
    Implied,
}

impl fmt::Display for RateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Table => write!(f, "table"),
            Self::Implied => write!(f, "implied"),
        }
    }
}

/// Rate lookup built from one settings snapshot
#[derive(Debug, Clone)]
pub struct CurrencyNormalizer {
    base_currency: String,
    rates: HashMap<String, f64>,
}

impl CurrencyNormalizer {
    pub fn new(settings: &Settings) -> Self {
        let base_currency = settings.base_currency.trim().to_uppercase();
        let mut rates: HashMap<String, f64> = settings
            .exchange_rates
            .iter()
            .map(|r| (r.currency.trim().to_uppercase(), r.rate_to_base))
            .collect();
        rates.entry(base_currency.clone()).or_insert(1.0);

        Self {
            base_currency,
            rates,
        }
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Rate to base for `currency` and where it came from
    pub fn rate_for(&self, currency: &str) -> (f64, RateSource) {
        let code = currency.trim().to_uppercase();
        if code.is_empty() {
            return (1.0, RateSource::Base);
        }

        match self.rates.get(&code) {
            Some(rate) if code == self.base_currency => (*rate, RateSource::Base),
            Some(rate) => (*rate, RateSource::Table),
            None => {
                tracing::debug!(currency = %code, "no exchange rate, using implied rate of 1");
                (1.0, RateSource::Implied)
            }
        }
    }

    /// Convert a native amount to base currency
    pub fn convert_to_base(&self, amount: Money, currency: &str) -> Money {
        let (rate, _) = self.rate_for(currency);
        amount.convert(rate)
    }
}
