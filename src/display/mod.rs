//! Display formatting for terminal output
//!
//! Budget listings, period metrics tables and the category tree.

pub mod budget;
pub mod category;

pub use budget::{format_budget_list, format_budget_period, format_period_info, format_period_list};
pub use category::format_category_tree;
