//! Budget, budget line and sub-line models
//!
//! A budget owns an ordered set of lines, one per category. Each line holds
//! planned amounts keyed by period start date and, in breakdown mode, a set
//! of sub-lines keyed the same way.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::ids::{BudgetId, BudgetLineId, CategoryId, CollectionId, SubCategoryId, SubLineId};
use super::money::Money;
use super::period::{apply_draft, PeriodDefinition, PeriodDraft, PeriodType};
use crate::error::{SleekError, SleekResult};

/// Which accounts feed a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum IncludeMode {
    /// Every non-archived account counted in totals
    #[default]
    All,
    /// Only accounts in at least one of the budget's collections
    Collections,
}

/// A budget over recurring periods
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: BudgetId,
    pub name: String,
    #[serde(default)]
    pub period_type: PeriodType,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub start_year: Option<i32>,
    #[serde(default)]
    pub start_day_of_week: Option<u32>,
    pub anchor_date: NaiveDate,
    #[serde(default)]
    pub include_mode: IncludeMode,
    #[serde(default)]
    pub collection_ids: Vec<CollectionId>,
    #[serde(default)]
    pub rollover_enabled: bool,
    #[serde(default)]
    pub is_primary: bool,
    #[serde(default)]
    pub archived: bool,
}

impl Budget {
    /// Create a budget from a period definition
    pub fn new(name: impl Into<String>, definition: PeriodDefinition) -> Self {
        Self {
            id: BudgetId::new(),
            name: name.into(),
            period_type: definition.period_type,
            start_month: definition.start_month,
            start_year: definition.start_year,
            start_day_of_week: definition.start_day_of_week,
            anchor_date: definition.anchor,
            include_mode: IncludeMode::All,
            collection_ids: Vec::new(),
            rollover_enabled: false,
            is_primary: false,
            archived: false,
        }
    }

    /// Stored period fields as a draft
    pub fn period_draft(&self) -> PeriodDraft {
        PeriodDraft {
            period_type: Some(self.period_type),
            start_month: self.start_month,
            start_year: self.start_year,
            start_day_of_week: self.start_day_of_week,
            anchor_date: Some(self.anchor_date),
        }
    }

    /// Normalized period definition for this budget
    pub fn period_definition(&self, reference: NaiveDate) -> PeriodDefinition {
        apply_draft(&PeriodDraft::default(), &self.period_draft(), reference)
    }

    /// Apply period edits, keeping start fields and anchor consistent
    pub fn apply_period_draft(
        &mut self,
        overrides: &PeriodDraft,
        reference: NaiveDate,
    ) -> SleekResult<()> {
        overrides.validate()?;
        let definition = apply_draft(overrides, &self.period_draft(), reference);
        self.period_type = definition.period_type;
        self.start_month = definition.start_month;
        self.start_year = definition.start_year;
        self.start_day_of_week = definition.start_day_of_week;
        self.anchor_date = definition.anchor;
        Ok(())
    }

    /// Validate the budget
    pub fn validate(&self) -> SleekResult<()> {
        if self.name.trim().is_empty() {
            return Err(SleekError::Validation("Budget name cannot be empty".into()));
        }
        self.period_draft().validate()
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Whether a line is planned as a whole or broken down by sub-category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    #[default]
    Single,
    Breakdown,
}

/// Planned amounts keyed by period key (`YYYY-MM-DD` of the period start)
pub type PlannedAmounts = BTreeMap<String, Money>;

/// A sub-category breakdown row of a line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLineSubLine {
    pub id: SubLineId,
    pub sub_category_id: SubCategoryId,
    #[serde(default)]
    pub planned_amounts: PlannedAmounts,
}

impl BudgetLineSubLine {
    pub fn new(sub_category_id: SubCategoryId) -> Self {
        Self {
            id: SubLineId::new(),
            sub_category_id,
            planned_amounts: PlannedAmounts::new(),
        }
    }

    /// Stored plan for a period, zero when absent
    pub fn planned_for(&self, period_key: &str) -> Money {
        self.planned_amounts
            .get(period_key)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_planned(&mut self, period_key: impl Into<String>, amount: Money) -> SleekResult<()> {
        set_planned_amount(&mut self.planned_amounts, period_key.into(), amount)
    }
}

/// A budget line for one category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetLine {
    pub id: BudgetLineId,
    pub budget_id: BudgetId,
    pub category_id: CategoryId,
    #[serde(default)]
    pub mode: LineMode,
    #[serde(default)]
    pub order: i32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub planned_amounts: PlannedAmounts,
    #[serde(default)]
    pub sub_lines: Vec<BudgetLineSubLine>,
}

impl BudgetLine {
    pub fn new(budget_id: BudgetId, category_id: CategoryId) -> Self {
        Self {
            id: BudgetLineId::new(),
            budget_id,
            category_id,
            mode: LineMode::Single,
            order: 0,
            created_at: Utc::now(),
            planned_amounts: PlannedAmounts::new(),
            sub_lines: Vec::new(),
        }
    }

    /// Stored plan for a period, zero when absent
    pub fn planned_for(&self, period_key: &str) -> Money {
        self.planned_amounts
            .get(period_key)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_planned(&mut self, period_key: impl Into<String>, amount: Money) -> SleekResult<()> {
        set_planned_amount(&mut self.planned_amounts, period_key.into(), amount)
    }

    /// Switch between single and breakdown planning
    ///
    /// Sub-lines are kept when switching back to single; they are simply
    /// ignored until breakdown mode is restored.
    pub fn set_mode(&mut self, mode: LineMode) {
        self.mode = mode;
    }

    /// Sub-lines that take part in computation
    pub fn active_sub_lines(&self) -> &[BudgetLineSubLine] {
        match self.mode {
            LineMode::Breakdown => &self.sub_lines,
            LineMode::Single => &[],
        }
    }

    /// Add a sub-line for a sub-category, rejecting duplicates
    pub fn add_sub_line(&mut self, sub_category_id: SubCategoryId) -> SleekResult<&mut BudgetLineSubLine> {
        if self
            .sub_lines
            .iter()
            .any(|s| s.sub_category_id == sub_category_id)
        {
            return Err(SleekError::duplicate_sub_line(sub_category_id.to_string()));
        }
        self.sub_lines.push(BudgetLineSubLine::new(sub_category_id));
        let last = self.sub_lines.len() - 1;
        Ok(&mut self.sub_lines[last])
    }
}

/// Add a line for `category_id` to a budget's lines
///
/// One line per category per budget; the new line is ordered last.
pub fn add_line(
    lines: &mut Vec<BudgetLine>,
    budget_id: BudgetId,
    category_id: CategoryId,
) -> SleekResult<&mut BudgetLine> {
    let mut next_order = 0;
    for line in lines.iter().filter(|l| l.budget_id == budget_id) {
        if line.category_id == category_id {
            return Err(SleekError::duplicate_line(category_id.to_string()));
        }
        next_order = next_order.max(line.order + 1);
    }

    let mut line = BudgetLine::new(budget_id, category_id);
    line.order = next_order;
    lines.push(line);
    let last = lines.len() - 1;
    Ok(&mut lines[last])
}

fn set_planned_amount(
    planned: &mut PlannedAmounts,
    period_key: String,
    amount: Money,
) -> SleekResult<()> {
    if amount.is_negative() {
        return Err(SleekError::Validation(format!(
            "Planned amount for {} cannot be negative: {}",
            period_key, amount
        )));
    }
    if NaiveDate::parse_from_str(&period_key, "%Y-%m-%d").is_err() {
        return Err(SleekError::Validation(format!(
            "Invalid period key: {}",
            period_key
        )));
    }
    planned.insert(period_key, amount);
    Ok(())
}
