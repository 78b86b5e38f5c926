// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::export::export_filename;
use crate::persistence::StateStorage;
use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn handle<S: StateStorage>(budget: &Budget<S>, m: &clap::ArgMatches) -> Result<PathBuf> {
    match m.subcommand() {
        Some(("csv", sub)) => export_csv(budget, sub),
        _ => anyhow::bail!("Unknown export format (use csv)"),
    }
}

fn export_csv<S: StateStorage>(budget: &Budget<S>, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let out = match sub.get_one::<String>("out") {
        Some(p) => PathBuf::from(p.trim()),
        None => PathBuf::from(export_filename(chrono::Utc::now())),
    };
    let content = budget.export_csv().context("Failed to export data")?;
    std::fs::write(&out, content)
        .with_context(|| format!("Failed to export data to {}", out.display()))?;
    println!(
        "{} transactions exported successfully to {}",
        budget.store().transactions().len(),
        out.display()
    );
    Ok(out)
}
