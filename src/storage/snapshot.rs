//! Ledger snapshot loading

use std::path::Path;

use crate::error::SleekResult;
use crate::models::LedgerSnapshot;

use super::file_io::read_json_required;

/// Load a ledger snapshot from a JSON file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> SleekResult<LedgerSnapshot> {
    let path = path.as_ref();
    let snapshot: LedgerSnapshot = read_json_required(path)?;

    tracing::info!(
        path = %path.display(),
        budgets = snapshot.budgets.len(),
        lines = snapshot.budget_lines.len(),
        accounts = snapshot.accounts.len(),
        transactions = snapshot.transactions.len(),
        "loaded ledger snapshot"
    );

    Ok(snapshot)
}
