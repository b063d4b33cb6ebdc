//! Reports module for SleekFinance
//!
//! The master-category budget summary and the budget-independent category
//! rollup.

pub mod budget_overview;
pub mod category_rollup;

pub use budget_overview::{BudgetSummary, MasterSummary, SummaryTotals};
pub use category_rollup::{
    build_category_rollups, CategoryRollup, CategoryRollupReport, MasterRollup,
    SubCategoryRollup,
};
