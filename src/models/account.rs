//! Account model
//!
//! Accounts are read-only inputs: the engine only looks at their currency,
//! archive state, totals flag and collection membership.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{AccountId, CollectionId};

/// A financial account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name (e.g., "Monzo Current")
    pub name: String,

    /// ISO currency code of the account
    pub currency: String,

    /// Whether this account is archived (soft-deleted)
    #[serde(default)]
    pub archived: bool,

    /// Whether this account counts towards totals and budgets
    #[serde(default = "default_include_in_totals")]
    pub include_in_totals: bool,

    /// Collections (account groupings) this account belongs to
    #[serde(default)]
    pub collection_ids: Vec<CollectionId>,
}

fn default_include_in_totals() -> bool {
    true
}

impl Account {
    /// Create a new account with default values
    pub fn new(name: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            name: name.into(),
            currency: currency.into(),
            archived: false,
            include_in_totals: true,
            collection_ids: Vec::new(),
        }
    }

    /// Add this account to a collection
    pub fn with_collection(mut self, collection_id: CollectionId) -> Self {
        self.collection_ids.push(collection_id);
        self
    }

    /// Check whether this account belongs to any of the given collections
    pub fn in_any_collection(&self, collection_ids: &[CollectionId]) -> bool {
        self.collection_ids
            .iter()
            .any(|id| collection_ids.contains(id))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.archived {
            write!(f, " [archived]")?;
        }
        Ok(())
    }
}
