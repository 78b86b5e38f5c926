// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::persistence::StateStorage;
use crate::utils::confirmed;
use anyhow::{Context, Result};

pub fn handle<S: StateStorage>(budget: &mut Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    if !confirmed(
        m,
        "Are you sure you want to delete all budget data? This cannot be undone.",
    )? {
        println!("Nothing deleted");
        return Ok(());
    }
    budget
        .clear_all_data()
        .context("Failed to clear saved data")?;
    println!("All data has been cleared.");
    Ok(())
}
