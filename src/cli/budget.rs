//! Budget CLI commands
//!
//! Period navigation and computed plan/actual metrics for a budget.

use clap::Subcommand;

use crate::display::{format_budget_list, format_budget_period, format_period_info, format_period_list};
use crate::error::SleekResult;
use crate::services::budget::BudgetMetricsEngine;
use crate::services::period::PeriodCalendar;
use crate::storage::Storage;

use super::reference_date;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// List budgets
    List,

    /// Show plan, actual and rollover figures for a period
    Show {
        /// Budget name or ID (defaults to the primary budget)
        budget: Option<String>,

        /// Periods before (negative) or after the reference period
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the boundaries of a period
    Period {
        /// Budget name or ID (defaults to the primary budget)
        budget: Option<String>,

        /// Periods before (negative) or after the reference period
        #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List recent periods ending at the reference period
    Periods {
        /// Budget name or ID (defaults to the primary budget)
        budget: Option<String>,

        /// Number of periods to show
        #[arg(short, long, default_value = "6")]
        count: usize,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> SleekResult<()> {
    match cmd {
        BudgetCommands::List => {
            println!("{}", format_budget_list(&storage.snapshot().budgets));
        }

        BudgetCommands::Show {
            budget,
            offset,
            date,
            json,
        } => {
            let budget = storage.resolve_budget(budget.as_deref())?;
            let reference = reference_date(date.as_deref())?;
            let lines = storage.lines_for(budget);

            let mut engine = BudgetMetricsEngine::new(
                budget,
                &lines,
                storage.snapshot(),
                storage.settings(),
                reference,
            );
            let result = engine.calculate(offset);

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", format_budget_period(&budget.name, &result));
            }
        }

        BudgetCommands::Period {
            budget,
            offset,
            date,
        } => {
            let budget = storage.resolve_budget(budget.as_deref())?;
            let reference = reference_date(date.as_deref())?;
            let calendar = PeriodCalendar::for_budget(budget, reference);

            println!("Budget: {}", budget.name);
            print!("{}", format_period_info(&calendar.info(reference, offset)));
        }

        BudgetCommands::Periods {
            budget,
            count,
            date,
        } => {
            let budget = storage.resolve_budget(budget.as_deref())?;
            let reference = reference_date(date.as_deref())?;
            let calendar = PeriodCalendar::for_budget(budget, reference);

            println!("Recent periods for {}:", budget.name);
            print!(
                "{}",
                format_period_list(&calendar.recent(reference, count), calendar.index_of(reference))
            );
        }
    }

    Ok(())
}
