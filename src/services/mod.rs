//! Service layer for SleekFinance
//!
//! Pure computations over a ledger snapshot: period arithmetic, flow
//! classification, currency normalization, the budget metrics engine and
//! the category tree.

pub mod budget;
pub mod category;
pub mod currency;
pub mod flow;
pub mod period;

pub use budget::{
    calculate_budget_period, BudgetMetricsEngine, BudgetPeriodResult, LineMetrics,
    PeriodFigures, SubLineMetrics,
};
pub use category::{build_category_tree, CategoryNode, MasterNode};
pub use currency::{CurrencyNormalizer, RateSource};
pub use flow::{master_flow, FlowClassifier};
pub use period::{get_budget_period_index, get_budget_period_info, PeriodCalendar};
