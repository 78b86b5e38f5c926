// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::persistence::StateStorage;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use serde::Serialize;

pub fn handle<S: StateStorage>(budget: &Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("totals", sub)) => totals(budget, sub)?,
        Some(("categories", sub)) => categories(budget, sub)?,
        _ => {}
    }
    Ok(())
}

fn totals<S: StateStorage>(budget: &Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    let t = budget.derive().totals;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &t)? {
        let rows = vec![vec![
            fmt_money(&t.income),
            fmt_money(&t.expense),
            fmt_money(&t.balance),
        ]];
        println!("{}", pretty_table(&["Income", "Expenses", "Balance"], rows));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct DistributionRow {
    pub label: String,
    pub category: String,
    pub total: String,
    pub percentage: String,
}

pub fn distribution_rows<S: StateStorage>(budget: &Budget<S>) -> Vec<DistributionRow> {
    budget
        .derive()
        .distribution
        .iter()
        .map(|s| DistributionRow {
            label: s.label(),
            category: s.category.clone(),
            total: fmt_money(&s.total),
            percentage: format!("{:.1}", s.percentage),
        })
        .collect()
}

fn categories<S: StateStorage>(budget: &Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    let data = distribution_rows(budget);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    if data.is_empty() {
        println!("No expenses recorded");
        return Ok(());
    }
    let rows = data
        .into_iter()
        .map(|r| vec![r.label, r.total, format!("{}%", r.percentage)])
        .collect();
    println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    Ok(())
}
