//! CLI commands for reports

use std::collections::HashMap;

use clap::Subcommand;

use crate::error::{SleekError, SleekResult};
use crate::models::{AccountId, Transaction};
use crate::reports::category_rollup::{build_category_rollups, format_terminal};
use crate::services::currency::CurrencyNormalizer;
use crate::storage::Storage;

use super::parse_date_arg;

/// Report subcommands
#[derive(Subcommand, Debug)]
pub enum ReportCommands {
    /// Total transactions by master category, category and sub-category
    Rollup {
        /// Start date (YYYY-MM-DD, inclusive)
        #[arg(short, long)]
        from: String,

        /// End date (YYYY-MM-DD, inclusive)
        #[arg(short, long)]
        to: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Handle report commands
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> SleekResult<()> {
    match cmd {
        ReportCommands::Rollup { from, to, json } => handle_rollup_report(storage, &from, &to, json),
    }
}

fn handle_rollup_report(storage: &Storage, from: &str, to: &str, json: bool) -> SleekResult<()> {
    let start = parse_date_arg(from)?;
    let end = parse_date_arg(to)?;
    if end < start {
        return Err(SleekError::Validation(format!(
            "End date {} is before start date {}",
            end, start
        )));
    }

    let snapshot = storage.snapshot();
    let normalizer = CurrencyNormalizer::new(storage.settings());
    let account_currency: HashMap<AccountId, &str> = snapshot
        .accounts
        .iter()
        .map(|a| (a.id, a.currency.as_str()))
        .collect();

    let in_range: Vec<&Transaction> = snapshot
        .transactions
        .iter()
        .filter(|t| {
            t.parsed_date()
                .map(|d| d >= start && d <= end)
                .unwrap_or(false)
        })
        .collect();

    let report = build_category_rollups(
        in_range.iter().copied(),
        &snapshot.master_categories,
        &snapshot.categories,
        &snapshot.sub_categories,
        |t| {
            let currency = t
                .currency
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .or_else(|| account_currency.get(&t.account_id).copied())
                .unwrap_or("");
            normalizer.convert_to_base(t.amount, currency)
        },
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let heading = format!(
            "Category Rollup: {} to {} ({})",
            start,
            end,
            normalizer.base_currency()
        );
        print!("{}", format_terminal(&report, &heading));
    }

    Ok(())
}
