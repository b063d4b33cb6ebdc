//! Read-only ledger snapshot
//!
//! The engine never holds references into live store state; each run is fed
//! one immutable snapshot of every entity it reads.

use serde::{Deserialize, Serialize};

use super::account::Account;
use super::budget::{Budget, BudgetLine};
use super::category::{Category, MasterCategory, SubCategory};
use super::ids::BudgetId;
use super::transaction::Transaction;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    #[serde(default)]
    pub budgets: Vec<Budget>,
    #[serde(default)]
    pub budget_lines: Vec<BudgetLine>,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
    #[serde(default)]
    pub master_categories: Vec<MasterCategory>,
}

impl LedgerSnapshot {
    /// Lines belonging to a budget, in stored order
    pub fn lines_for(&self, budget_id: BudgetId) -> Vec<BudgetLine> {
        self.budget_lines
            .iter()
            .filter(|line| line.budget_id == budget_id)
            .cloned()
            .collect()
    }
}
