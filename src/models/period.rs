//! Budget period definitions
//!
//! A budget's cadence is one of four period types. The stored start fields
//! are never trusted on their own: every read goes through [`apply_draft`],
//! which re-derives a consistent `(period type, start fields, anchor)` tuple
//! where the anchor is the first day of period index 0.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SleekError, SleekResult};

/// Day and month on which a UK tax year begins
pub const UK_FISCAL_START_MONTH: u32 = 4;
pub const UK_FISCAL_START_DAY: u32 = 6;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// Cadence of a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PeriodType {
    Weekly,
    #[default]
    Monthly,
    Annual,
    UkFiscal,
}

impl PeriodType {
    /// Parse period type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "weekly" | "week" => Some(Self::Weekly),
            "monthly" | "month" => Some(Self::Monthly),
            "annual" | "yearly" | "year" => Some(Self::Annual),
            "uk-fiscal" | "uk_fiscal" | "fiscal" | "tax-year" => Some(Self::UkFiscal),
            _ => None,
        }
    }
}

impl fmt::Display for PeriodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Weekly => write!(f, "Weekly"),
            Self::Monthly => write!(f, "Monthly"),
            Self::Annual => write!(f, "Annual"),
            Self::UkFiscal => write!(f, "UK Fiscal"),
        }
    }
}

/// A partial set of period fields, either stored on a budget or proposed as
/// an edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDraft {
    #[serde(default)]
    pub period_type: Option<PeriodType>,
    #[serde(default)]
    pub start_month: Option<u32>,
    #[serde(default)]
    pub start_year: Option<i32>,
    /// 0 = Sunday … 6 = Saturday
    #[serde(default)]
    pub start_day_of_week: Option<u32>,
    #[serde(default)]
    pub anchor_date: Option<NaiveDate>,
}

impl PeriodDraft {
    /// Reject values that [`apply_draft`] would silently ignore
    pub fn validate(&self) -> SleekResult<()> {
        if let Some(month) = self.start_month {
            if !valid_month(month) {
                return Err(SleekError::Validation(format!(
                    "Start month must be between 1 and 12, got {}",
                    month
                )));
            }
        }

        if let Some(year) = self.start_year {
            if !valid_year(year) {
                return Err(SleekError::Validation(format!(
                    "Start year must be between {} and {}, got {}",
                    MIN_YEAR, MAX_YEAR, year
                )));
            }
        }

        if let Some(day) = self.start_day_of_week {
            if !valid_day_of_week(day) {
                return Err(SleekError::Validation(format!(
                    "Start day of week must be between 0 (Sunday) and 6 (Saturday), got {}",
                    day
                )));
            }
        }

        Ok(())
    }
}

/// A fully resolved period definition
///
/// Only the start fields relevant to `period_type` are populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodDefinition {
    pub period_type: PeriodType,
    pub start_month: Option<u32>,
    pub start_year: Option<i32>,
    pub start_day_of_week: Option<u32>,
    pub anchor: NaiveDate,
}

impl PeriodDefinition {
    pub fn weekly(start_day_of_week: u32, on_or_before: NaiveDate) -> Self {
        apply_draft(
            &PeriodDraft {
                period_type: Some(PeriodType::Weekly),
                start_day_of_week: Some(start_day_of_week),
                anchor_date: Some(on_or_before),
                ..PeriodDraft::default()
            },
            &PeriodDraft::default(),
            on_or_before,
        )
    }

    pub fn monthly(year: i32, month: u32) -> Self {
        apply_draft(
            &PeriodDraft {
                period_type: Some(PeriodType::Monthly),
                start_month: Some(month),
                start_year: Some(year),
                ..PeriodDraft::default()
            },
            &PeriodDraft::default(),
            NaiveDate::MIN,
        )
    }

    pub fn annual(year: i32) -> Self {
        apply_draft(
            &PeriodDraft {
                period_type: Some(PeriodType::Annual),
                start_year: Some(year),
                ..PeriodDraft::default()
            },
            &PeriodDraft::default(),
            NaiveDate::MIN,
        )
    }

    pub fn uk_fiscal(year: i32) -> Self {
        apply_draft(
            &PeriodDraft {
                period_type: Some(PeriodType::UkFiscal),
                start_year: Some(year),
                ..PeriodDraft::default()
            },
            &PeriodDraft::default(),
            NaiveDate::MIN,
        )
    }
}

/// A concrete period window
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodInfo {
    /// Index relative to the anchor period (0)
    pub index: i64,
    pub start: NaiveDate,
    /// Inclusive
    pub end: NaiveDate,
    pub label: String,
    /// Canonical key into planned-amount maps
    pub key: String,
}

impl PeriodInfo {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Canonical period key for a period start date
pub fn period_key(start: NaiveDate) -> String {
    start.format("%Y-%m-%d").to_string()
}

/// Merge `overrides` over `existing` and derive a consistent definition
///
/// Missing or out-of-range fields fall back to the existing value, then to
/// the reference date. Start fields of a different period type are dropped.
pub fn apply_draft(
    overrides: &PeriodDraft,
    existing: &PeriodDraft,
    reference: NaiveDate,
) -> PeriodDefinition {
    let period_type = overrides
        .period_type
        .or(existing.period_type)
        .unwrap_or_default();

    let month = overrides
        .start_month
        .filter(|m| valid_month(*m))
        .or(existing.start_month.filter(|m| valid_month(*m)));
    let year = overrides
        .start_year
        .filter(|y| valid_year(*y))
        .or(existing.start_year.filter(|y| valid_year(*y)));

    match period_type {
        PeriodType::Weekly => {
            // A stored anchor only carries over when it already belonged to
            // a weekly budget.
            let existing_anchor = if existing.period_type == Some(PeriodType::Weekly) {
                existing.anchor_date
            } else {
                None
            };
            let base = overrides.anchor_date.or(existing_anchor);
            let day = overrides
                .start_day_of_week
                .filter(|d| valid_day_of_week(*d))
                .or(existing.start_day_of_week.filter(|d| valid_day_of_week(*d)))
                .unwrap_or_else(|| base.unwrap_or(reference).weekday().num_days_from_sunday());
            PeriodDefinition {
                period_type,
                start_month: None,
                start_year: None,
                start_day_of_week: Some(day),
                anchor: align_to_weekday(base.unwrap_or(reference), day),
            }
        }
        PeriodType::Monthly => {
            let month = month.unwrap_or_else(|| reference.month());
            let year = year.unwrap_or_else(|| reference.year());
            PeriodDefinition {
                period_type,
                start_month: Some(month),
                start_year: Some(year),
                start_day_of_week: None,
                anchor: NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(reference),
            }
        }
        PeriodType::Annual => {
            let year = year.unwrap_or_else(|| reference.year());
            PeriodDefinition {
                period_type,
                start_month: None,
                start_year: Some(year),
                start_day_of_week: None,
                anchor: NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or(reference),
            }
        }
        PeriodType::UkFiscal => {
            let year = year.unwrap_or_else(|| uk_fiscal_year_of(reference));
            PeriodDefinition {
                period_type,
                start_month: None,
                start_year: Some(year),
                start_day_of_week: None,
                anchor: uk_fiscal_start(year).unwrap_or(reference),
            }
        }
    }
}

/// First day of the UK tax year that starts in `year`
pub fn uk_fiscal_start(year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, UK_FISCAL_START_MONTH, UK_FISCAL_START_DAY)
}

/// Calendar year in which the tax year containing `date` started
pub fn uk_fiscal_year_of(date: NaiveDate) -> i32 {
    match uk_fiscal_start(date.year()) {
        Some(start) if date < start => date.year() - 1,
        _ => date.year(),
    }
}

/// Latest date on or before `date` falling on `day` (0 = Sunday)
fn align_to_weekday(date: NaiveDate, day: u32) -> NaiveDate {
    let current = date.weekday().num_days_from_sunday();
    let back = (current + 7 - day) % 7;
    date.checked_sub_signed(Duration::days(back as i64))
        .unwrap_or(date)
}

fn valid_month(month: u32) -> bool {
    (1..=12).contains(&month)
}

fn valid_year(year: i32) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&year)
}

fn valid_day_of_week(day: u32) -> bool {
    day <= 6
}
