use std::path::Path;

use assert_cmd::Command;
use chrono::NaiveDate;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

use sleekfinance::config::{Settings, SleekPaths};
use sleekfinance::models::{
    Account, Budget, BudgetLine, Category, LedgerSnapshot, MasterCategory, Money,
    PeriodDefinition, SubCategory, Transaction,
};

const BIN_NAME: &str = "sleek";

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A data directory holding settings and a small household ledger
fn ledger_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let paths = SleekPaths::with_base_dir(temp_dir.path().to_path_buf());
    paths.ensure_directories().unwrap();
    Settings::with_base_currency("GBP")
        .with_rate("USD", 0.8)
        .save(&paths)
        .unwrap();

    let expenses = MasterCategory::new("Essential Expenses");
    let income = MasterCategory::new("Income");
    let groceries = Category::new("Groceries", expenses.id);
    let salary = Category::new("Salary", income.id);
    let coffee = SubCategory::new("Coffee", groceries.id);
    let current = Account::new("Current", "GBP");
    let travel = Account::new("Travel Card", "USD");

    let mut budget = Budget::new("Household", PeriodDefinition::monthly(2024, 1));
    budget.rollover_enabled = true;
    budget.is_primary = true;
    let weekly = Budget::new("Pocket Money", PeriodDefinition::weekly(1, date(2024, 1, 1)));

    let mut grocery_line = BudgetLine::new(budget.id, groceries.id);
    grocery_line
        .set_planned("2024-01-01", Money::from_cents(10_000))
        .unwrap();
    let mut salary_line = BudgetLine::new(budget.id, salary.id);
    salary_line.order = 1;
    salary_line
        .set_planned("2024-01-01", Money::from_cents(250_000))
        .unwrap();

    let snapshot = LedgerSnapshot {
        budgets: vec![budget, weekly],
        budget_lines: vec![grocery_line, salary_line],
        accounts: vec![current.clone(), travel.clone()],
        transactions: vec![
            Transaction::new(current.id, date(2024, 1, 15), Money::from_cents(-4_000))
                .with_category(groceries.id),
            Transaction::new(travel.id, date(2024, 1, 16), Money::from_cents(-1_000))
                .with_category(groceries.id)
                .with_sub_category(coffee.id),
            Transaction::new(current.id, date(2024, 1, 28), Money::from_cents(250_000))
                .with_category(salary.id),
            Transaction::new(current.id, date(2024, 1, 29), Money::from_cents(-700)),
        ],
        categories: vec![groceries, salary],
        sub_categories: vec![coffee],
        master_categories: vec![expenses, income],
    };
    write_snapshot(&paths.snapshot_file(), &snapshot);

    temp_dir
}

fn write_snapshot(path: &Path, snapshot: &LedgerSnapshot) {
    std::fs::write(path, serde_json::to_string_pretty(snapshot).unwrap()).unwrap();
}

fn sleek(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BIN_NAME).expect("binary exists");
    cmd.env("SLEEK_DATA_DIR", dir.path())
        .env_remove("SLEEK_SNAPSHOT")
        .env_remove("SLEEK_LOG");
    cmd
}

#[test]
fn cli_without_command_prints_hint() {
    let dir = ledger_dir();
    sleek(&dir)
        .assert()
        .success()
        .stdout(contains("sleek --help"));
}

#[test]
fn cli_budget_list_shows_budgets() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "list"])
        .assert()
        .success()
        .stdout(contains("Household").and(contains("Pocket Money")).and(contains("Primary")));
}

#[test]
fn cli_budget_show_current_period() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "show", "--date", "2024-01-20"])
        .assert()
        .success()
        .stdout(
            contains("Household - January 2024")
                .and(contains("Groceries"))
                .and(contains("48.00"))
                .and(contains("52.00"))
                .and(contains("Salary"))
                .and(contains("INCOME")),
        );
}

#[test]
fn cli_budget_show_rollover_as_json() {
    let dir = ledger_dir();
    let output = sleek(&dir)
        .args(["budget", "show", "Household", "--date", "2024-01-20", "--offset", "1", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["period_key"], "2024-02-01");
    let groceries = &json["lines"][0];
    assert_eq!(groceries["category_name"], "Groceries");
    assert_eq!(groceries["rollover_in"], 5_200);
    assert_eq!(groceries["effective_plan"], 5_200);
    assert_eq!(groceries["status"], "under");
}

#[test]
fn cli_budget_period_with_negative_offset() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "period", "Pocket Money", "--date", "2024-01-10", "--offset", "-1"])
        .assert()
        .success()
        .stdout(
            contains("Week of 1 Jan 2024 – 7 Jan 2024")
                .and(contains("Index: 0"))
                .and(contains("Key:   2024-01-01")),
        );
}

#[test]
fn cli_budget_periods_lists_recent() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "periods", "--count", "3", "--date", "2024-03-15"])
        .assert()
        .success()
        .stdout(
            contains("January 2024")
                .and(contains("February 2024"))
                .and(contains("* "))
                .and(contains("March 2024")),
        );
}

#[test]
fn cli_unknown_budget_fails() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "show", "Nonexistent"])
        .assert()
        .failure()
        .stderr(contains("Budget not found: Nonexistent"));
}

#[test]
fn cli_invalid_date_fails() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["budget", "show", "--date", "31/01/2024"])
        .assert()
        .failure()
        .stderr(contains("Invalid date"));
}

#[test]
fn cli_report_rollup_in_base_currency() {
    let dir = ledger_dir();
    let output = sleek(&dir)
        .args(["report", "rollup", "--from", "2024-01-01", "--to", "2024-01-31", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["uncategorised_total"], -700);
    assert_eq!(json["rollups"][0]["name"], "Income");
    let expenses = &json["rollups"][1];
    assert_eq!(expenses["total"], -4_800);
    assert_eq!(expenses["categories"][0]["sub_categories"][0]["name"], "Coffee");
    assert_eq!(expenses["categories"][0]["sub_categories"][0]["total"], -800);
}

#[test]
fn cli_report_rollup_rejects_reversed_range() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["report", "rollup", "--from", "2024-02-01", "--to", "2024-01-01"])
        .assert()
        .failure()
        .stderr(contains("before start date"));
}

#[test]
fn cli_category_tree() {
    let dir = ledger_dir();
    sleek(&dir)
        .args(["category", "tree"])
        .assert()
        .success()
        .stdout(contains("Essential Expenses [out]").and(contains("└── Coffee")));
}

#[test]
fn cli_snapshot_override() {
    let dir = ledger_dir();
    let other = dir.path().join("other.json");
    let snapshot = LedgerSnapshot {
        budgets: vec![Budget::new("Elsewhere", PeriodDefinition::annual(2024))],
        ..LedgerSnapshot::default()
    };
    write_snapshot(&other, &snapshot);

    sleek(&dir)
        .args(["budget", "list", "--snapshot"])
        .arg(&other)
        .assert()
        .success()
        .stdout(contains("Elsewhere").and(contains("Household").not()));
}

#[test]
fn cli_missing_snapshot_fails() {
    let dir = TempDir::new().unwrap();
    sleek(&dir)
        .args(["budget", "list"])
        .assert()
        .failure()
        .stderr(contains("File not found"));
}

#[test]
fn cli_config_shows_settings() {
    let dir = ledger_dir();
    sleek(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(contains("Base currency: GBP").and(contains("1 USD = 0.8 GBP")));
}
