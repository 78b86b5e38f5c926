// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::filters::TypeFilter;
use crate::persistence::StateStorage;
use crate::utils::{parse_month_filter, pretty_table};
use anyhow::{Context, Result};

pub fn handle<S: StateStorage>(budget: &mut Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => show(budget),
        Some(("type", sub)) => {
            let kind: TypeFilter = sub.get_one::<String>("TYPE").context("TYPE is required")?.parse()?;
            budget.set_type_filter(kind);
            println!("Type filter set to {}", kind);
        }
        Some(("month", sub)) => {
            let month = parse_month_filter(sub.get_one::<String>("MONTH").context("MONTH is required")?)?;
            budget.set_month_filter(month);
            println!("Month filter set to {}", describe_month(budget));
        }
        Some(("clear", _)) => {
            budget.set_type_filter(TypeFilter::All);
            budget.set_month_filter(None);
            println!("Filters cleared");
        }
        _ => {}
    }
    Ok(())
}

fn describe_month<S: StateStorage>(budget: &Budget<S>) -> String {
    budget
        .filters()
        .month_filter()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "all".to_string())
}

fn show<S: StateStorage>(budget: &Budget<S>) {
    let rows = vec![
        vec!["type".to_string(), budget.filters().type_filter().to_string()],
        vec!["month".to_string(), describe_month(budget)],
    ];
    println!("{}", pretty_table(&["Filter", "Value"], rows));
}
