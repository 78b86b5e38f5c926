// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use std::path::PathBuf;

use budgetbook::app::Budget;
use budgetbook::persistence::{Defaults, SqliteStorage};
use budgetbook::{cli, commands, db, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    logging::init(matches.get_count("verbose"));

    let db_override = matches.get_one::<PathBuf>("db").map(PathBuf::as_path);
    let conn = db::open_or_init(db_override)?;
    let mut budget = Budget::open(SqliteStorage::new(conn)?, Defaults::system());

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path(db_override)?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut budget, sub)?,
        Some(("category", sub)) => commands::categories::handle(&mut budget, sub)?,
        Some(("filter", sub)) => commands::filters::handle(&mut budget, sub)?,
        Some(("report", sub)) => commands::reports::handle(&budget, sub)?,
        Some(("export", sub)) => {
            commands::exporter::handle(&budget, sub)?;
        }
        Some(("theme", sub)) => commands::theme::handle(&mut budget, sub)?,
        Some(("reset", sub)) => commands::reset::handle(&mut budget, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    if let Some(warning) = budget.take_save_warning() {
        eprintln!("warning: changes were applied but could not be saved: {}", warning);
    }
    Ok(())
}
