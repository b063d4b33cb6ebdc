//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_tree;
use crate::error::SleekResult;
use crate::services::category::build_category_tree;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Show active categories grouped by master category
    Tree,
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> SleekResult<()> {
    match cmd {
        CategoryCommands::Tree => {
            let snapshot = storage.snapshot();
            let tree = build_category_tree(
                &snapshot.master_categories,
                &snapshot.categories,
                &snapshot.sub_categories,
            );
            println!("{}", format_category_tree(&tree));
        }
    }

    Ok(())
}
