//! Budget metrics engine
//!
//! Joins a budget's lines against the eligible, flow-tagged, base-currency
//! transactions of one ledger snapshot and derives plan/actual/rollover
//! figures for any period.
//!
//! An engine is bound to a single snapshot. Its caches (period windows,
//! actual sums and rollover chains) live as long as the engine, so a caller
//! navigating back and forth between periods of one snapshot can keep the
//! engine around; a new snapshot needs a new engine.
//!
//! Rollover chains are resolved iteratively from the nearest cached period
//! back toward the anchor. The first request for a period far from the
//! anchor costs O(distance); later requests nearby are O(1). Offsets are
//! clamped to periods touching years 1 through 9999, which bounds the walk.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

use crate::config::Settings;
use crate::models::budget::PlannedAmounts;
use crate::models::{
    Account, AccountId, Budget, BudgetLine, BudgetLineId, BudgetStatus, Category, CategoryId,
    Flow, IncludeMode, LedgerSnapshot, LineMode, MasterCategory, MasterCategoryId, MasterFlow, Money,
    PeriodInfo, PlanComparison, SubCategory, SubCategoryId, SubLineId,
};
use crate::reports::budget_overview::BudgetSummary;
use crate::services::currency::CurrencyNormalizer;
use crate::services::flow::{line_flow, FlowClassifier};
use crate::services::period::PeriodCalendar;

/// Figures for one line or sub-line in one period
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodFigures {
    /// Stored plan for the period, clamped at zero
    pub planned: Money,
    /// Carried in from the previous period (zero unless rollover is enabled)
    pub rollover_in: Money,
    /// Stored plan plus rollover in
    pub effective_plan: Money,
    /// Sum of absolute base amounts of matching transactions
    pub actual: Money,
    pub difference: Money,
    pub percent_used: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubLineMetrics {
    pub sub_line_id: SubLineId,
    pub sub_category_id: SubCategoryId,
    pub sub_category_name: String,
    #[serde(flatten)]
    pub figures: PeriodFigures,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineMetrics {
    pub line_id: BudgetLineId,
    pub category_id: CategoryId,
    pub category_name: String,
    pub master_category_id: Option<MasterCategoryId>,
    pub master_category_name: Option<String>,
    pub flow: Flow,
    pub mode: LineMode,
    #[serde(flatten)]
    pub figures: PeriodFigures,
    /// Breakdown rows; independent of the line's own figures
    pub sub_lines: Vec<SubLineMetrics>,
}

/// Output of one budget period computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetPeriodResult {
    pub period: PeriodInfo,
    /// Key of the period in planned-amount maps
    pub period_key: String,
    pub lines: Vec<LineMetrics>,
    pub summary: BudgetSummary,
}

/// A transaction reduced to what matching needs
#[derive(Debug, Clone)]
struct ResolvedTransaction {
    date: NaiveDate,
    flow: Flow,
    category_id: Option<CategoryId>,
    sub_category_id: Option<SubCategoryId>,
    base_amount: Money,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum PlanKey {
    Line(BudgetLineId),
    SubLine(BudgetLineId, SubLineId),
}

/// Matching criteria and plan map for a line or sub-line
struct PlanTarget<'a> {
    key: PlanKey,
    category_id: CategoryId,
    sub_category_id: Option<SubCategoryId>,
    flow: Flow,
    planned: &'a PlannedAmounts,
}

/// Computes budget period metrics for one snapshot
pub struct BudgetMetricsEngine<'a> {
    budget: &'a Budget,
    lines: &'a [BudgetLine],
    categories: HashMap<CategoryId, &'a Category>,
    sub_categories: HashMap<SubCategoryId, &'a SubCategory>,
    master_categories: HashMap<MasterCategoryId, &'a MasterCategory>,
    classifier: FlowClassifier,
    calendar: PeriodCalendar,
    reference_index: i64,
    anchor_index: i64,
    transactions: Vec<ResolvedTransaction>,
    periods: HashMap<i64, PeriodInfo>,
    actuals: HashMap<(PlanKey, i64), Money>,
    rollovers: HashMap<(PlanKey, i64), Money>,
}

impl<'a> BudgetMetricsEngine<'a> {
    pub fn new(
        budget: &'a Budget,
        lines: &'a [BudgetLine],
        ledger: &'a LedgerSnapshot,
        settings: &Settings,
        reference: NaiveDate,
    ) -> Self {
        let calendar = PeriodCalendar::for_budget(budget, reference);
        let classifier = FlowClassifier::new(&ledger.categories, &ledger.master_categories);
        let normalizer = CurrencyNormalizer::new(settings);

        let accounts = eligible_accounts(budget, &ledger.accounts);
        let mut transactions = Vec::new();
        let mut dropped_dates = 0usize;
        for txn in &ledger.transactions {
            let Some(account) = accounts.get(&txn.account_id) else {
                continue;
            };
            let Some(date) = txn.parsed_date() else {
                dropped_dates += 1;
                tracing::debug!(transaction = %txn.id, date = %txn.date, "skipping transaction with unparsable date");
                continue;
            };
            let currency = txn
                .currency
                .as_deref()
                .filter(|c| !c.trim().is_empty())
                .unwrap_or(&account.currency);

            transactions.push(ResolvedTransaction {
                date,
                flow: classifier.transaction_flow(txn),
                category_id: txn.category_id,
                sub_category_id: txn.sub_category_id,
                base_amount: normalizer.convert_to_base(txn.amount, currency),
            });
        }

        tracing::debug!(
            budget = %budget.name,
            accounts = accounts.len(),
            transactions = transactions.len(),
            dropped_dates,
            "resolved eligible transactions"
        );

        Self {
            budget,
            lines,
            categories: ledger.categories.iter().map(|c| (c.id, c)).collect(),
            sub_categories: ledger.sub_categories.iter().map(|s| (s.id, s)).collect(),
            master_categories: ledger.master_categories.iter().map(|m| (m.id, m)).collect(),
            classifier,
            reference_index: calendar.index_of(reference),
            anchor_index: calendar.index_of(calendar.definition().anchor),
            calendar,
            transactions,
            periods: HashMap::new(),
            actuals: HashMap::new(),
            rollovers: HashMap::new(),
        }
    }

    /// Index of the period containing the reference date
    pub fn reference_index(&self) -> i64 {
        self.reference_index
    }

    /// Compute every line, sub-line and the summary for the period `offset`
    /// steps away from the reference period
    pub fn calculate(&mut self, offset: i64) -> BudgetPeriodResult {
        let requested = self.reference_index.saturating_add(offset);
        let index = self.calendar.clamp_index(requested);
        if index != requested {
            tracing::debug!(requested, index, "period index clamped to supported years");
        }
        let period = self.period(index);

        let lines = self.lines;
        let mut ordered: Vec<&'a BudgetLine> = lines.iter().collect();
        ordered.sort_by(|a, b| {
            a.order
                .cmp(&b.order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });

        let mut lines = Vec::with_capacity(ordered.len());
        for line in ordered {
            if let Some(metrics) = self.line_metrics(line, index) {
                lines.push(metrics);
            }
        }

        let summary = BudgetSummary::from_lines(&lines);

        BudgetPeriodResult {
            period_key: period.key.clone(),
            period,
            lines,
            summary,
        }
    }

    fn line_metrics(&mut self, line: &'a BudgetLine, index: i64) -> Option<LineMetrics> {
        let Some(category) = self.categories.get(&line.category_id).copied() else {
            tracing::debug!(line = %line.id, category = %line.category_id, "dropping line for missing category");
            return None;
        };
        let master = self
            .master_categories
            .get(&category.master_category_id)
            .copied();
        let flow = self
            .classifier
            .line_flow(category.id)
            .unwrap_or_else(|| line_flow(MasterFlow::Other));

        let target = PlanTarget {
            key: PlanKey::Line(line.id),
            category_id: category.id,
            sub_category_id: None,
            flow,
            planned: &line.planned_amounts,
        };
        let figures = self.figures(&target, index);

        let mut sub_lines = Vec::new();
        for sub_line in line.active_sub_lines() {
            let Some(sub_category) = self.sub_categories.get(&sub_line.sub_category_id).copied()
            else {
                tracing::debug!(sub_line = %sub_line.id, "dropping sub-line for missing sub-category");
                continue;
            };
            let target = PlanTarget {
                key: PlanKey::SubLine(line.id, sub_line.id),
                category_id: category.id,
                sub_category_id: Some(sub_category.id),
                flow,
                planned: &sub_line.planned_amounts,
            };
            sub_lines.push(SubLineMetrics {
                sub_line_id: sub_line.id,
                sub_category_id: sub_category.id,
                sub_category_name: sub_category.name.clone(),
                figures: self.figures(&target, index),
            });
        }

        Some(LineMetrics {
            line_id: line.id,
            category_id: category.id,
            category_name: category.name.clone(),
            master_category_id: master.map(|m| m.id),
            master_category_name: master.map(|m| m.name.clone()),
            flow,
            mode: line.mode,
            figures,
            sub_lines,
        })
    }

    fn figures(&mut self, target: &PlanTarget<'a>, index: i64) -> PeriodFigures {
        let stored = self.stored_plan(target, index);
        let rollover_in = self.rollover_in(target, index);
        let effective_plan = stored + rollover_in;
        let actual = self.actual(target, index);
        let comparison = PlanComparison::new(effective_plan, actual);

        PeriodFigures {
            planned: stored.non_negative(),
            rollover_in,
            effective_plan,
            actual,
            difference: comparison.difference,
            percent_used: comparison.percent_used,
            status: comparison.status,
        }
    }

    fn period(&mut self, index: i64) -> PeriodInfo {
        let calendar = self.calendar;
        self.periods
            .entry(index)
            .or_insert_with(|| calendar.period(index))
            .clone()
    }

    /// Stored plan, unclamped; negative values flow into the rollover chain
    fn stored_plan(&mut self, target: &PlanTarget<'a>, index: i64) -> Money {
        let key = self.period(index).key;
        target.planned.get(&key).copied().unwrap_or_default()
    }

    fn actual(&mut self, target: &PlanTarget<'a>, index: i64) -> Money {
        if let Some(cached) = self.actuals.get(&(target.key, index)) {
            return *cached;
        }

        let period = self.period(index);
        let total: Money = self
            .transactions
            .iter()
            .filter(|t| period.contains(t.date))
            .filter(|t| t.flow == target.flow)
            .filter(|t| t.category_id == Some(target.category_id))
            .filter(|t| match target.sub_category_id {
                Some(sub_category_id) => t.sub_category_id == Some(sub_category_id),
                None => true,
            })
            .map(|t| t.base_amount.abs())
            .sum();

        self.actuals.insert((target.key, index), total);
        total
    }

    /// `effective_plan(index - 1) - actual(index - 1)`, zero at or before the
    /// anchor period
    fn rollover_in(&mut self, target: &PlanTarget<'a>, index: i64) -> Money {
        if !self.budget.rollover_enabled || index <= self.anchor_index {
            return Money::zero();
        }
        if let Some(cached) = self.rollovers.get(&(target.key, index)) {
            return *cached;
        }

        // Find the earliest period whose predecessor's rollover is known.
        let mut start = index;
        while start - 1 > self.anchor_index && !self.rollovers.contains_key(&(target.key, start - 1))
        {
            start -= 1;
        }
        let mut carried = self
            .rollovers
            .get(&(target.key, start - 1))
            .copied()
            .unwrap_or_default();

        tracing::trace!(key = ?target.key, from = start, to = index, "walking rollover chain");

        for i in start..=index {
            let previous = i - 1;
            carried = self.stored_plan(target, previous) + carried - self.actual(target, previous);
            self.rollovers.insert((target.key, i), carried);
        }

        carried
    }
}

/// Compute a budget's figures for the period `offset` steps from `reference`
pub fn calculate_budget_period(
    budget: &Budget,
    lines: &[BudgetLine],
    ledger: &LedgerSnapshot,
    settings: &Settings,
    reference: NaiveDate,
    offset: i64,
) -> BudgetPeriodResult {
    BudgetMetricsEngine::new(budget, lines, ledger, settings, reference).calculate(offset)
}

/// Accounts feeding a budget: active, counted in totals and, in collections
/// mode, in at least one of the budget's collections
pub fn eligible_accounts<'a>(
    budget: &Budget,
    accounts: &'a [Account],
) -> HashMap<AccountId, &'a Account> {
    accounts
        .iter()
        .filter(|a| !a.archived && a.include_in_totals)
        .filter(|a| match budget.include_mode {
            IncludeMode::All => true,
            IncludeMode::Collections => a.in_any_collection(&budget.collection_ids),
        })
        .map(|a| (a.id, a))
        .collect()
}
