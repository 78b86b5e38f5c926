// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::persistence::StateStorage;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: StateStorage>(budget: &mut Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = sub.get_one::<String>("NAME").context("NAME is required")?.trim();
            if name.is_empty() {
                anyhow::bail!("Category name cannot be empty");
            }
            if budget.add_category(name) {
                println!("Added category '{}'", name);
            } else {
                println!("Category '{}' already exists", name);
            }
        }
        Some(("list", sub)) => {
            let names = budget.store().list_categories().as_slice().to_vec();
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &names)? {
                let data = names.into_iter().map(|n| vec![n]).collect();
                println!("{}", pretty_table(&["Category"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
