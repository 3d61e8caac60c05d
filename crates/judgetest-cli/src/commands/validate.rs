//! The `judgetest validate` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use judgetest_core::bank::{validate_bank, BankSource};
use judgetest_core::config::load_config_from;
use judgetest_core::Category;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = config.bank_source();

    let mut table = Table::new();
    table.set_header(vec!["Category", "Bank", "Questions"]);

    let mut warnings = Vec::new();
    let mut failed = 0;

    for category in Category::ALL {
        let path = source.path_for(category).display().to_string();
        match source.load(category) {
            Ok(bank) => {
                table.add_row(vec![
                    Cell::new(category),
                    Cell::new(&path),
                    Cell::new(bank.len()),
                ]);
                warnings.extend(
                    validate_bank(&bank)
                        .into_iter()
                        .map(|w| (category, w)),
                );
            }
            Err(e) => {
                tracing::warn!("{category} bank failed to load: {e}");
                failed += 1;
                table.add_row(vec![
                    Cell::new(category),
                    Cell::new(&path),
                    Cell::new(format!("ERROR: {e}")),
                ]);
            }
        }
    }

    println!("{table}");

    for (category, w) in &warnings {
        let prefix = w
            .question
            .map(|n| format!("  [{category} #{n}]"))
            .unwrap_or_else(|| format!("  [{category}]"));
        println!("{prefix} WARNING: {}", w.message);
    }

    anyhow::ensure!(failed == 0, "{failed} question bank(s) could not be loaded");

    if warnings.is_empty() {
        println!("All question banks valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
