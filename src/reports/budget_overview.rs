//! Budget Overview Report
//!
//! Rolls computed line metrics up to master categories and splits them into
//! income and expense sections with grand totals. Transfer lines move money
//! between accounts and never appear here.

use serde::Serialize;
use std::collections::HashMap;

use crate::models::{BudgetStatus, Flow, MasterCategoryId, Money, PlanComparison};
use crate::services::budget::LineMetrics;

/// One master category's totals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MasterSummary {
    pub master_category_id: MasterCategoryId,
    pub name: String,
    pub flow: Flow,
    /// Sum of the lines' effective plans
    pub planned: Money,
    pub actual: Money,
    pub difference: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
    pub line_count: usize,
}

impl MasterSummary {
    fn new(master_category_id: MasterCategoryId, name: String, flow: Flow) -> Self {
        Self {
            master_category_id,
            name,
            flow,
            planned: Money::zero(),
            actual: Money::zero(),
            difference: Money::zero(),
            percent_used: 0.0,
            status: BudgetStatus::None,
            line_count: 0,
        }
    }

    fn add_line(&mut self, line: &LineMetrics) {
        self.planned += line.figures.effective_plan;
        self.actual += line.figures.actual;
        self.line_count += 1;
    }

    fn finish(&mut self) {
        let comparison = PlanComparison::new(self.planned, self.actual);
        self.difference = comparison.difference;
        self.percent_used = comparison.percent_used;
        self.status = comparison.status;
    }
}

/// Grand totals across the income and expense sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SummaryTotals {
    pub income_planned: Money,
    pub income_actual: Money,
    pub expense_planned: Money,
    pub expense_actual: Money,
}

impl SummaryTotals {
    /// Planned income less planned expenses
    pub fn planned_net(&self) -> Money {
        self.income_planned - self.expense_planned
    }

    /// Actual income less actual expenses
    pub fn actual_net(&self) -> Money {
        self.income_actual - self.expense_actual
    }
}

/// Master-category summary of one budget period
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetSummary {
    /// `in` and `interest` masters, largest variance first
    pub income: Vec<MasterSummary>,
    /// `out` masters, largest variance first
    pub expenses: Vec<MasterSummary>,
    pub totals: SummaryTotals,
}

impl BudgetSummary {
    /// Build the summary from computed lines
    pub fn from_lines(lines: &[LineMetrics]) -> Self {
        let mut groups: HashMap<MasterCategoryId, MasterSummary> = HashMap::new();

        for line in lines {
            if line.flow == Flow::Transfer {
                continue;
            }
            // Lines whose master has gone missing have nowhere to roll up to
            let (Some(master_id), Some(master_name)) =
                (line.master_category_id, line.master_category_name.as_ref())
            else {
                continue;
            };

            groups
                .entry(master_id)
                .or_insert_with(|| MasterSummary::new(master_id, master_name.clone(), line.flow))
                .add_line(line);
        }

        let mut summary = Self::default();
        for mut group in groups.into_values() {
            group.finish();
            if group.flow.is_income() {
                summary.totals.income_planned += group.planned;
                summary.totals.income_actual += group.actual;
                summary.income.push(group);
            } else {
                summary.totals.expense_planned += group.planned;
                summary.totals.expense_actual += group.actual;
                summary.expenses.push(group);
            }
        }

        sort_by_variance(&mut summary.income);
        sort_by_variance(&mut summary.expenses);
        summary
    }
}

fn sort_by_variance(groups: &mut [MasterSummary]) {
    groups.sort_by(|a, b| {
        b.difference
            .abs()
            .cmp(&a.difference.abs())
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.master_category_id.cmp(&b.master_category_id))
    });
}

impl BudgetSummary {
    /// Format the summary for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{:<30} {:>12} {:>12} {:>12} {:>7}\n",
            "Master Category", "Planned", "Actual", "Difference", "Status"
        ));
        output.push_str(&"-".repeat(77));
        output.push('\n');

        for (heading, section) in [("INCOME", &self.income), ("EXPENSES", &self.expenses)] {
            output.push_str(&format!("{}\n", heading));
            if section.is_empty() {
                output.push_str("  (none)\n");
            }
            for master in section {
                output.push_str(&format!(
                    "  {:<28} {:>12} {:>12} {:>12} {:>7}\n",
                    master.name, master.planned, master.actual, master.difference, master.status
                ));
            }
        }

        let totals = &self.totals;
        output.push_str(&"-".repeat(77));
        output.push('\n');
        output.push_str(&format!(
            "{:<30} {:>12} {:>12}\n",
            "Total income", totals.income_planned, totals.income_actual
        ));
        output.push_str(&format!(
            "{:<30} {:>12} {:>12}\n",
            "Total expenses", totals.expense_planned, totals.expense_actual
        ));
        output.push_str(&format!(
            "{:<30} {:>12} {:>12}\n",
            "Net",
            totals.planned_net(),
            totals.actual_net()
        ));

        output
    }
}
