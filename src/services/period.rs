//! Budget period calendar
//!
//! Maps dates to period indices and indices to concrete windows for a
//! resolved [`PeriodDefinition`]. Period 0 is the window that starts on the
//! anchor date. Every function here is total: arithmetic that would leave
//! chrono's date range saturates at `NaiveDate::MIN`/`MAX`.

use chrono::{Datelike, Days, NaiveDate};
use std::ops::RangeInclusive;

use crate::models::{period_key, Budget, PeriodDefinition, PeriodInfo, PeriodType};

/// Upper bound on whole-period steps taken to correct the arithmetic estimate
const MAX_CORRECTION_STEPS: usize = 4;

/// Calendar years a navigable period may touch
const FIRST_SUPPORTED_YEAR: i32 = 1;
const LAST_SUPPORTED_YEAR: i32 = 9999;

/// Period arithmetic for one budget definition
#[derive(Debug, Clone, Copy)]
pub struct PeriodCalendar {
    definition: PeriodDefinition,
}

impl PeriodCalendar {
    pub fn new(definition: PeriodDefinition) -> Self {
        Self { definition }
    }

    /// Calendar for a budget, normalizing its stored period fields
    pub fn for_budget(budget: &Budget, reference: NaiveDate) -> Self {
        Self::new(budget.period_definition(reference))
    }

    pub fn definition(&self) -> &PeriodDefinition {
        &self.definition
    }

    /// Index of the period containing `date`
    pub fn index_of(&self, date: NaiveDate) -> i64 {
        let anchor = self.definition.anchor;
        let mut index = match self.definition.period_type {
            PeriodType::Weekly => date.signed_duration_since(anchor).num_days().div_euclid(7),
            PeriodType::Monthly => {
                (date.year() as i64 - anchor.year() as i64) * 12 + date.month() as i64
                    - anchor.month() as i64
            }
            PeriodType::Annual | PeriodType::UkFiscal => {
                date.year() as i64 - anchor.year() as i64
            }
        };

        // The estimate is off by at most one period around month ends,
        // leap days and mid-year anchors.
        for _ in 0..MAX_CORRECTION_STEPS {
            let (start, end) = self.bounds(index);
            if date < start {
                index -= 1;
            } else if date > end {
                index += 1;
            } else {
                break;
            }
        }

        index
    }

    /// Indices of the periods touching years 1 through 9999
    pub fn supported_indices(&self) -> RangeInclusive<i64> {
        let first = NaiveDate::from_ymd_opt(FIRST_SUPPORTED_YEAR, 1, 1).unwrap_or(NaiveDate::MIN);
        let last = NaiveDate::from_ymd_opt(LAST_SUPPORTED_YEAR, 12, 31).unwrap_or(NaiveDate::MAX);
        self.index_of(first)..=self.index_of(last)
    }

    /// Pull `index` back inside [`supported_indices`](Self::supported_indices)
    pub fn clamp_index(&self, index: i64) -> i64 {
        let range = self.supported_indices();
        index.clamp(*range.start(), *range.end())
    }

    /// Inclusive start and end of period `index`
    pub fn bounds(&self, index: i64) -> (NaiveDate, NaiveDate) {
        let anchor = self.definition.anchor;
        match self.definition.period_type {
            PeriodType::Weekly => {
                let start = add_days(anchor, index.saturating_mul(7));
                (start, add_days(start, 6))
            }
            PeriodType::Monthly => {
                let start = shift_months(anchor, index);
                let next = shift_months(anchor, index.saturating_add(1));
                (start, add_days(next, -1))
            }
            PeriodType::Annual | PeriodType::UkFiscal => {
                let start = shift_months(anchor, index.saturating_mul(12));
                let next = shift_months(anchor, index.saturating_add(1).saturating_mul(12));
                (start, add_days(next, -1))
            }
        }
    }

    /// Human-readable label for a window
    pub fn label(&self, start: NaiveDate, end: NaiveDate) -> String {
        match self.definition.period_type {
            PeriodType::Weekly => format!(
                "Week of {} – {}",
                start.format("%-d %b %Y"),
                end.format("%-d %b %Y")
            ),
            PeriodType::Monthly => start.format("%B %Y").to_string(),
            PeriodType::Annual => start.year().to_string(),
            PeriodType::UkFiscal => {
                format!("{}–{} Tax Year", start.year(), start.year() + 1)
            }
        }
    }

    /// Full description of period `index`
    pub fn period(&self, index: i64) -> PeriodInfo {
        let (start, end) = self.bounds(index);
        PeriodInfo {
            index,
            start,
            end,
            label: self.label(start, end),
            key: period_key(start),
        }
    }

    /// The period `offset` steps away from the one containing `reference`
    pub fn info(&self, reference: NaiveDate, offset: i64) -> PeriodInfo {
        self.period(self.clamp_index(self.index_of(reference).saturating_add(offset)))
    }

    /// `count` periods ending with the one containing `reference`, oldest first
    pub fn recent(&self, reference: NaiveDate, count: usize) -> Vec<PeriodInfo> {
        let current = self.index_of(reference);
        let count = count as i64;
        (0..count)
            .rev()
            .map(|back| self.period(current.saturating_sub(back)))
            .collect()
    }

    pub fn contains(&self, index: i64, date: NaiveDate) -> bool {
        let (start, end) = self.bounds(index);
        date >= start && date <= end
    }
}

/// Start, end and label of the period `offset` away from `reference`
pub fn get_budget_period_info(budget: &Budget, offset: i64, reference: NaiveDate) -> PeriodInfo {
    PeriodCalendar::for_budget(budget, reference).info(reference, offset)
}

/// Index of the budget period containing `date`
pub fn get_budget_period_index(budget: &Budget, date: NaiveDate) -> i64 {
    PeriodCalendar::for_budget(budget, date).index_of(date)
}

fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.unwrap_or(if days < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

/// Shift by whole months, clamping the day to the target month's length
fn shift_months(date: NaiveDate, months: i64) -> NaiveDate {
    let saturated = if months < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    };

    let total = (date.year() as i64 * 12 + date.month0() as i64).saturating_add(months);
    let Ok(year) = i32::try_from(total.div_euclid(12)) else {
        return saturated;
    };
    let month = total.rem_euclid(12) as u32 + 1;

    (1..=date.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .unwrap_or(saturated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodDefinition;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn calendars() -> Vec<PeriodCalendar> {
        let mut calendars = vec![
            PeriodCalendar::new(PeriodDefinition::monthly(2024, 1)),
            PeriodCalendar::new(PeriodDefinition::monthly(2023, 11)),
            PeriodCalendar::new(PeriodDefinition::annual(2020)),
            PeriodCalendar::new(PeriodDefinition::uk_fiscal(2024)),
        ];
        for day in 0..7 {
            calendars.push(PeriodCalendar::new(PeriodDefinition::weekly(
                day,
                date(2024, 2, 29),
            )));
        }
        calendars
    }

    #[test]
    fn test_index_of_start_round_trips() {
        for calendar in calendars() {
            for i in -600..=600 {
                let (start, end) = calendar.bounds(i);
                assert_eq!(
                    calendar.index_of(start),
                    i,
                    "start of period {} for {:?}",
                    i,
                    calendar.definition()
                );
                assert_eq!(calendar.index_of(end), i);
                assert!(start <= end);
            }
        }
    }

    #[test]
    fn test_periods_are_contiguous() {
        for calendar in calendars() {
            for i in -50..50 {
                let (_, end) = calendar.bounds(i);
                let (next_start, _) = calendar.bounds(i + 1);
                assert_eq!(add_days(end, 1), next_start);
            }
        }
    }

    #[test]
    fn test_uk_fiscal_boundaries() {
        let calendar = PeriodCalendar::new(PeriodDefinition::uk_fiscal(2024));
        assert_eq!(calendar.bounds(0), (date(2024, 4, 6), date(2025, 4, 5)));
        assert_eq!(calendar.index_of(date(2025, 4, 5)), 0);
        assert_eq!(calendar.index_of(date(2025, 4, 6)), 1);
        assert_eq!(calendar.index_of(date(2024, 4, 5)), -1);
        assert_eq!(calendar.index_of(date(2024, 1, 1)), -1);
    }

    #[test]
    fn test_monthly_boundaries_across_leap_february() {
        let calendar = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        assert_eq!(calendar.bounds(0), (date(2024, 1, 1), date(2024, 1, 31)));
        assert_eq!(calendar.bounds(1), (date(2024, 2, 1), date(2024, 2, 29)));
        assert_eq!(calendar.bounds(13), (date(2025, 2, 1), date(2025, 2, 28)));
        assert_eq!(calendar.bounds(-1), (date(2023, 12, 1), date(2023, 12, 31)));
        assert_eq!(calendar.index_of(date(2024, 2, 29)), 1);
        assert_eq!(calendar.index_of(date(2023, 12, 31)), -1);
    }

    #[test]
    fn test_weekly_monday_start() {
        let calendar = PeriodCalendar::new(PeriodDefinition::weekly(1, date(2024, 1, 1)));
        assert_eq!(calendar.bounds(0), (date(2024, 1, 1), date(2024, 1, 7)));
        assert_eq!(calendar.index_of(date(2024, 1, 7)), 0);
        assert_eq!(calendar.index_of(date(2024, 1, 8)), 1);
        assert_eq!(calendar.index_of(date(2023, 12, 31)), -1);
    }

    #[test]
    fn test_annual_index() {
        let calendar = PeriodCalendar::new(PeriodDefinition::annual(2020));
        assert_eq!(calendar.index_of(date(2024, 12, 31)), 4);
        assert_eq!(calendar.bounds(4), (date(2024, 1, 1), date(2024, 12, 31)));
    }

    #[test]
    fn test_labels() {
        let weekly = PeriodCalendar::new(PeriodDefinition::weekly(1, date(2024, 1, 1)));
        assert_eq!(weekly.period(0).label, "Week of 1 Jan 2024 – 7 Jan 2024");

        let monthly = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        assert_eq!(monthly.period(2).label, "March 2024");

        let annual = PeriodCalendar::new(PeriodDefinition::annual(2024));
        assert_eq!(annual.period(1).label, "2025");

        let fiscal = PeriodCalendar::new(PeriodDefinition::uk_fiscal(2024));
        assert_eq!(fiscal.period(0).label, "2024–2025 Tax Year");
    }

    #[test]
    fn test_info_applies_offset_from_reference() {
        let calendar = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        let info = calendar.info(date(2024, 3, 15), -1);
        assert_eq!(info.index, 1);
        assert_eq!(info.key, "2024-02-01");
        assert_eq!(info.end, date(2024, 2, 29));
        assert!(info.contains(date(2024, 2, 10)));
    }

    #[test]
    fn test_recent_periods_oldest_first() {
        let calendar = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        let recent = calendar.recent(date(2024, 6, 10), 3);
        let keys: Vec<_> = recent.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["2024-04-01", "2024-05-01", "2024-06-01"]);
        assert!(calendar.recent(date(2024, 6, 10), 0).is_empty());
    }

    #[test]
    fn test_budget_entry_points() {
        let budget = Budget::new("Household", PeriodDefinition::uk_fiscal(2023));
        assert_eq!(get_budget_period_index(&budget, date(2025, 5, 1)), 2);

        let info = get_budget_period_info(&budget, 1, date(2024, 1, 1));
        assert_eq!(info.index, 1);
        assert_eq!(info.start, date(2024, 4, 6));
        assert_eq!(info.label, "2024–2025 Tax Year");
    }

    #[test]
    fn test_extreme_indices_saturate() {
        let calendar = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        let (start, end) = calendar.bounds(i64::MAX);
        assert_eq!(start, NaiveDate::MAX);
        assert_eq!(end, NaiveDate::MAX - Days::new(1));
        let (start, _) = calendar.bounds(i64::MIN);
        assert_eq!(start, NaiveDate::MIN);
    }

    #[test]
    fn test_offsets_clamped_to_supported_years() {
        let calendar = PeriodCalendar::new(PeriodDefinition::monthly(2024, 1));
        let range = calendar.supported_indices();
        assert_eq!(calendar.bounds(*range.start()).0, date(1, 1, 1));
        assert_eq!(calendar.bounds(*range.end()).0, date(9999, 12, 1));

        let far = calendar.info(date(2024, 1, 1), i64::MAX);
        assert_eq!(far.key, "9999-12-01");
        assert_eq!(far.end, date(9999, 12, 31));
        let early = calendar.info(date(2024, 1, 1), i64::MIN);
        assert_eq!(early.start, date(1, 1, 1));

        let weekly = PeriodCalendar::new(PeriodDefinition::weekly(1, date(2024, 1, 1)));
        let last = weekly.period(weekly.clamp_index(i64::MAX));
        assert!(last.contains(date(9999, 12, 31)));
    }

    #[test]
    fn test_contains() {
        let calendar = PeriodCalendar::new(PeriodDefinition::annual(2024));
        assert!(calendar.contains(0, date(2024, 7, 1)));
        assert!(!calendar.contains(0, date(2025, 1, 1)));
    }
}
