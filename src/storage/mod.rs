//! Storage layer for SleekFinance
//!
//! Loads settings and the read-only ledger snapshot, and resolves budgets
//! for the command line.

pub mod file_io;
pub mod snapshot;

pub use file_io::read_json_required;
pub use snapshot::load_snapshot;

use std::path::PathBuf;

use crate::config::{Settings, SleekPaths};
use crate::error::{SleekError, SleekResult};
use crate::models::{Budget, BudgetId, BudgetLine, LedgerSnapshot};

/// Settings and snapshot loaded for one session
pub struct Storage {
    settings: Settings,
    snapshot: LedgerSnapshot,
}

impl Storage {
    /// Load settings and the snapshot, reading the snapshot from
    /// `snapshot_path` when given
    pub fn open(paths: SleekPaths, snapshot_path: Option<PathBuf>) -> SleekResult<Self> {
        let settings = Settings::load_or_create(&paths)?;
        let snapshot_path = snapshot_path.unwrap_or_else(|| paths.snapshot_file());
        let snapshot = load_snapshot(&snapshot_path)?;

        Ok(Self::from_parts(settings, snapshot))
    }

    pub fn from_parts(settings: Settings, snapshot: LedgerSnapshot) -> Self {
        Self { settings, snapshot }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn snapshot(&self) -> &LedgerSnapshot {
        &self.snapshot
    }

    /// Find a budget by id (full UUID or `bud-` short form) or by name,
    /// ignoring case
    pub fn find_budget(&self, name_or_id: &str) -> SleekResult<&Budget> {
        let wanted = name_or_id.trim();

        if let Ok(id) = wanted.parse::<BudgetId>() {
            if let Some(budget) = self.snapshot.budgets.iter().find(|b| b.id == id) {
                return Ok(budget);
            }
        }

        // Short ids only carry the first eight hex digits
        if let Some(prefix) = wanted.strip_prefix("bud-") {
            if let Some(budget) = self
                .snapshot
                .budgets
                .iter()
                .find(|b| b.id.as_uuid().to_string().starts_with(prefix))
            {
                return Ok(budget);
            }
        }

        self.snapshot
            .budgets
            .iter()
            .find(|b| b.name.eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SleekError::budget_not_found(wanted))
    }

    /// The primary non-archived budget, else the first non-archived one
    pub fn primary_budget(&self) -> SleekResult<&Budget> {
        let active = || self.snapshot.budgets.iter().filter(|b| !b.archived);

        active()
            .find(|b| b.is_primary)
            .or_else(|| active().next())
            .ok_or_else(|| SleekError::budget_not_found("(no active budget)"))
    }

    /// `find_budget` when a name is given, otherwise `primary_budget`
    pub fn resolve_budget(&self, name_or_id: Option<&str>) -> SleekResult<&Budget> {
        match name_or_id {
            Some(wanted) => self.find_budget(wanted),
            None => self.primary_budget(),
        }
    }

    pub fn lines_for(&self, budget: &Budget) -> Vec<BudgetLine> {
        self.snapshot.lines_for(budget.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PeriodDefinition;
    use tempfile::TempDir;

    fn storage_with(budgets: Vec<Budget>) -> Storage {
        let snapshot = LedgerSnapshot {
            budgets,
            ..LedgerSnapshot::default()
        };
        Storage::from_parts(Settings::default(), snapshot)
    }

    #[test]
    fn test_find_budget_by_name_and_id() {
        let household = Budget::new("Household", PeriodDefinition::monthly(2024, 1));
        let travel = Budget::new("Travel", PeriodDefinition::annual(2024));
        let storage = storage_with(vec![household.clone(), travel.clone()]);

        assert_eq!(storage.find_budget("household").unwrap().id, household.id);
        assert_eq!(
            storage.find_budget(&travel.id.as_uuid().to_string()).unwrap().id,
            travel.id
        );
        assert_eq!(
            storage.find_budget(&travel.id.to_string()).unwrap().id,
            travel.id
        );
        assert!(storage.find_budget("Nope").unwrap_err().is_not_found());
    }

    #[test]
    fn test_primary_budget_selection() {
        let mut archived = Budget::new("Old", PeriodDefinition::monthly(2023, 1));
        archived.archived = true;
        archived.is_primary = true;
        let first = Budget::new("First", PeriodDefinition::monthly(2024, 1));
        let mut primary = Budget::new("Main", PeriodDefinition::monthly(2024, 1));
        primary.is_primary = true;

        let storage = storage_with(vec![archived.clone(), first.clone(), primary.clone()]);
        assert_eq!(storage.primary_budget().unwrap().id, primary.id);
        assert_eq!(storage.resolve_budget(None).unwrap().id, primary.id);
        assert_eq!(storage.resolve_budget(Some("First")).unwrap().id, first.id);

        let storage = storage_with(vec![archived, first.clone()]);
        assert_eq!(storage.primary_budget().unwrap().id, first.id);
    }

    #[test]
    fn test_no_budgets() {
        let storage = storage_with(vec![]);
        assert!(storage.primary_budget().is_err());
    }

    #[test]
    fn test_open_reads_snapshot_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SleekPaths::with_base_dir(temp_dir.path().to_path_buf());
        paths.ensure_directories().unwrap();
        std::fs::write(paths.snapshot_file(), "{}").unwrap();

        let storage = Storage::open(paths, None).unwrap();
        assert!(storage.snapshot().budgets.is_empty());
        assert_eq!(storage.settings().base_currency, "GBP");
    }
}
