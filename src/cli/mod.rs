//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod budget;
pub mod category;
pub mod report;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{NaiveDate, Utc};

use crate::error::{SleekError, SleekResult};

/// Parse a `YYYY-MM-DD` command-line date
pub(crate) fn parse_date_arg(value: &str) -> SleekResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        SleekError::Validation(format!(
            "Invalid date '{}'. Use YYYY-MM-DD (e.g., 2024-01-31)",
            value
        ))
    })
}

/// The given date, or today in UTC
pub(crate) fn reference_date(value: Option<&str>) -> SleekResult<NaiveDate> {
    match value {
        Some(value) => parse_date_arg(value),
        None => Ok(Utc::now().date_naive()),
    }
}
