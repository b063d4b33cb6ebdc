//! Core data models for SleekFinance
//!
//! Budgets and their lines, plus the read-only ledger entities the engine
//! consumes: accounts, transactions and the category hierarchy.

pub mod account;
pub mod budget;
pub mod category;
pub mod flow;
pub mod ids;
pub mod money;
pub mod period;
pub mod snapshot;
pub mod status;
pub mod transaction;

pub use account::Account;
pub use budget::{add_line, Budget, BudgetLine, BudgetLineSubLine, IncludeMode, LineMode};
pub use category::{Category, MasterCategory, SubCategory};
pub use flow::{Flow, FlowOverride, MasterFlow};
pub use ids::{
    AccountId, BudgetId, BudgetLineId, CategoryId, CollectionId, MasterCategoryId,
    SubCategoryId, SubLineId, TransactionId,
};
pub use money::Money;
pub use period::{period_key, PeriodDefinition, PeriodDraft, PeriodInfo, PeriodType};
pub use snapshot::LedgerSnapshot;
pub use status::{BudgetStatus, PlanComparison};
pub use transaction::Transaction;
