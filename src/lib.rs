//! SleekFinance - budget period and metrics engine
//!
//! Computes per-period plan, actual, rollover and status figures for
//! budgets over a read-only snapshot of accounts, transactions and the
//! category hierarchy, plus budget-independent category rollups.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and settings (base currency, exchange rates)
//! - `error`: Custom error types
//! - `models`: Budgets, lines, ledger entities and derived value types
//! - `services`: Period calendar, flow classifier, currency normalizer,
//!   budget metrics engine and category tree
//! - `reports`: Master-category summary and category rollups
//! - `storage`: Snapshot loading and budget lookup
//! - `display` / `cli`: Terminal output and command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use sleekfinance::services::calculate_budget_period;
//!
//! let lines = snapshot.lines_for(budget.id);
//! let result = calculate_budget_period(&budget, &lines, &snapshot, &settings, today, 0);
//! println!("{}", result.period.label);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{SleekError, SleekResult};
