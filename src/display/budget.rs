//! Budget display formatting
//!
//! Formats budgets, periods and computed period metrics for terminal output.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{Budget, BudgetStatus, IncludeMode, Money, PeriodInfo};
use crate::services::budget::{BudgetPeriodResult, PeriodFigures};

/// Format a list of budgets
pub fn format_budget_list(budgets: &[Budget]) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }

    let name_width = budgets
        .iter()
        .map(|b| b.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:<10}  {:<10}  {:<8}  {}\n",
        "Name",
        "Period",
        "Anchor",
        "Rollover",
        "Status",
        name_width = name_width,
    ));
    output.push_str(&format!(
        "{:-<name_width$}  {:-<10}  {:-<10}  {:-<8}  {:-<10}\n",
        "",
        "",
        "",
        "",
        "",
        name_width = name_width,
    ));

    for budget in budgets {
        let mut status = Vec::new();
        if budget.is_primary {
            status.push("Primary");
        }
        if budget.archived {
            status.push("Archived");
        }
        if budget.include_mode == IncludeMode::Collections {
            status.push("Collections");
        }

        output.push_str(&format!(
            "{:<name_width$}  {:<10}  {:<10}  {:<8}  {}\n",
            budget.name,
            budget.period_type.to_string(),
            budget.anchor_date.format("%Y-%m-%d").to_string(),
            if budget.rollover_enabled { "yes" } else { "no" },
            status.join(", "),
            name_width = name_width,
        ));
    }

    output
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Planned")]
    planned: Money,
    #[tabled(rename = "Rollover")]
    rollover_in: Money,
    #[tabled(rename = "Plan")]
    effective_plan: Money,
    #[tabled(rename = "Actual")]
    actual: Money,
    #[tabled(rename = "Remaining")]
    difference: Money,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "Status")]
    status: BudgetStatus,
}

impl LineRow {
    fn new(category: String, figures: &PeriodFigures) -> Self {
        Self {
            category,
            planned: figures.planned,
            rollover_in: figures.rollover_in,
            effective_plan: figures.effective_plan,
            actual: figures.actual,
            difference: figures.difference,
            used: format!("{:.0}%", figures.percent_used * 100.0),
            status: figures.status,
        }
    }
}

/// Format computed period metrics: one row per line (sub-lines indented
/// beneath their parent) followed by the master-category summary
pub fn format_budget_period(budget_name: &str, result: &BudgetPeriodResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("{} - {}\n", budget_name, result.period.label));
    output.push_str(&format!(
        "{} to {} (period {})\n\n",
        result.period.start, result.period.end, result.period.index
    ));

    if result.lines.is_empty() {
        output.push_str("No budget lines.\n");
        return output;
    }

    let mut rows = Vec::new();
    for line in &result.lines {
        rows.push(LineRow::new(line.category_name.clone(), &line.figures));
        for sub in &line.sub_lines {
            rows.push(LineRow::new(
                format!("  └ {}", sub.sub_category_name),
                &sub.figures,
            ));
        }
    }

    let table = Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string();
    output.push_str(&table);
    output.push_str("\n\n");
    output.push_str(&result.summary.format_terminal());

    output
}

/// Format a single period
pub fn format_period_info(period: &PeriodInfo) -> String {
    let mut output = String::new();
    output.push_str(&format!("Period: {}\n", period.label));
    output.push_str(&format!("  Index: {}\n", period.index));
    output.push_str(&format!("  Start: {}\n", period.start));
    output.push_str(&format!("  End:   {}\n", period.end));
    output.push_str(&format!("  Key:   {}\n", period.key));
    output
}

/// Format a list of periods, marking `current`
pub fn format_period_list(periods: &[PeriodInfo], current: i64) -> String {
    let mut output = String::new();
    for period in periods {
        let marker = if period.index == current { "*" } else { " " };
        output.push_str(&format!(
            "{} {:>5}  {}  {}  {}\n",
            marker, period.index, period.start, period.end, period.label
        ));
    }
    output
}
