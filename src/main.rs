use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use sleekfinance::cli::{handle_budget_command, handle_category_command, handle_report_command};
use sleekfinance::config::{Settings, SleekPaths};
use sleekfinance::logging::init_tracing;
use sleekfinance::storage::Storage;

#[derive(Parser)]
#[command(
    name = "sleek",
    version,
    about = "Budget period and metrics engine",
    long_about = "SleekFinance computes plan, actual and rollover figures for your \
                  budgets over any weekly, monthly, annual or UK tax-year period."
)]
struct Cli {
    /// Read the ledger snapshot from this file instead of the data directory
    #[arg(long, global = true, env = "SLEEK_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget periods and metrics
    #[command(subcommand)]
    Budget(sleekfinance::cli::BudgetCommands),

    /// Category hierarchy
    #[command(subcommand)]
    Category(sleekfinance::cli::CategoryCommands),

    /// Budget-independent reports
    #[command(subcommand)]
    Report(sleekfinance::cli::ReportCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let paths = SleekPaths::new()?;

    match cli.command {
        Some(Commands::Budget(cmd)) => {
            let storage = Storage::open(paths, cli.snapshot)?;
            handle_budget_command(&storage, cmd)?;
        }
        Some(Commands::Category(cmd)) => {
            let storage = Storage::open(paths, cli.snapshot)?;
            handle_category_command(&storage, cmd)?;
        }
        Some(Commands::Report(cmd)) => {
            let storage = Storage::open(paths, cli.snapshot)?;
            handle_report_command(&storage, cmd)?;
        }
        Some(Commands::Config) => {
            let settings = Settings::load_or_create(&paths)?;
            let snapshot = cli.snapshot.unwrap_or_else(|| paths.snapshot_file());

            println!("SleekFinance Configuration");
            println!("==========================");
            println!("Config directory: {}", paths.base_dir().display());
            println!("Settings file:    {}", paths.settings_file().display());
            println!("Snapshot file:    {}", snapshot.display());
            println!();
            println!("Settings:");
            println!("  Base currency: {}", settings.base_currency);
            if settings.exchange_rates.is_empty() {
                println!("  Exchange rates: (none)");
            } else {
                println!("  Exchange rates:");
                for rate in &settings.exchange_rates {
                    println!(
                        "    1 {} = {} {}",
                        rate.currency, rate.rate_to_base, settings.base_currency
                    );
                }
            }
        }
        None => {
            println!("SleekFinance - budget period and metrics engine");
            println!();
            println!("Run 'sleek --help' for usage information.");
        }
    }

    Ok(())
}
