//! Transaction model
//!
//! Transactions arrive from the store with their date still in string form.
//! A date that does not parse keeps the transaction out of every aggregate
//! rather than failing the computation.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

use super::flow::FlowOverride;
use super::ids::{AccountId, CategoryId, SubCategoryId, TransactionId};
use super::money::Money;

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// The account this transaction belongs to
    pub account_id: AccountId,

    /// Date as stored (`YYYY-MM-DD` or RFC 3339)
    pub date: String,

    /// Signed amount in the transaction's currency (negative = outflow)
    pub amount: Money,

    /// ISO currency code; falls back to the account currency when absent
    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub category_id: Option<CategoryId>,

    #[serde(default)]
    pub sub_category_id: Option<SubCategoryId>,

    /// Explicit flow correction, overriding the category-derived flow
    #[serde(default)]
    pub flow_override: Option<FlowOverride>,
}

impl Transaction {
    /// Create a new uncategorised transaction
    pub fn new(account_id: AccountId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            date: date.format("%Y-%m-%d").to_string(),
            amount,
            currency: None,
            category_id: None,
            sub_category_id: None,
            flow_override: None,
        }
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_sub_category(mut self, sub_category_id: SubCategoryId) -> Self {
        self.sub_category_id = Some(sub_category_id);
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn with_flow_override(mut self, flow_override: FlowOverride) -> Self {
        self.flow_override = Some(flow_override);
        self
    }

    /// Resolve the stored date, `None` when it cannot be parsed
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Parse a stored date: plain `YYYY-MM-DD` or an RFC 3339 timestamp (UTC day)
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.naive_utc().date())
}
