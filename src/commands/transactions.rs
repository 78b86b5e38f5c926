// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::Budget;
use crate::derive::EmptyState;
use crate::filters::CategoryFilter;
use crate::models::{NewTransaction, TransactionId, TransactionType};
use crate::persistence::StateStorage;
use crate::utils::{
    confirmed, fmt_money, maybe_print_json, parse_date, parse_decimal, parse_month_filter,
    pretty_table,
};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle<S: StateStorage>(budget: &mut Budget<S>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(budget, sub)?,
        Some(("list", sub)) => list(budget, sub)?,
        Some(("rm", sub)) => remove(budget, sub)?,
        Some(("clear", sub)) => clear(budget, sub)?,
        _ => {}
    }
    Ok(())
}

fn add<S: StateStorage>(budget: &mut Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    let kind: TransactionType = sub
        .get_one::<String>("type")
        .context("--type is required")?
        .parse()?;
    let date = parse_date(sub.get_one::<String>("date").context("--date is required")?)?;
    let description = sub
        .get_one::<String>("description")
        .context("--description is required")?
        .to_string();
    let amount = parse_decimal(sub.get_one::<String>("amount").context("--amount is required")?)?;
    let category = sub.get_one::<String>("category").map(|s| s.to_string());

    let tx = budget
        .add_transaction(NewTransaction {
            kind,
            date: Some(date),
            description,
            amount,
            category,
        })
        .map_err(|err| anyhow::anyhow!("Please fill all fields correctly: {}", err))?;
    println!(
        "Recorded {} {} on {} '{}' (id: {})",
        tx.kind(),
        fmt_money(&tx.amount()),
        tx.date(),
        tx.description(),
        tx.id()
    );
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub description: String,
    pub amount: String,
}

pub struct Listing {
    pub rows: Vec<TransactionRow>,
    pub empty: Option<EmptyState>,
}

/// Applies the persisted filters, any per-call overrides and the session
/// category/search filters, in that order.
pub fn query_rows<S: StateStorage>(
    budget: &mut Budget<S>,
    sub: &clap::ArgMatches,
) -> Result<Listing> {
    if let Some(cat) = sub.get_one::<String>("category") {
        budget.set_category_filter(CategoryFilter::parse(cat));
    }
    if let Some(q) = sub.get_one::<String>("search") {
        budget.set_search_query(q);
    }

    let mut filters = budget.filters().clone();
    if let Some(kind) = sub.get_one::<String>("type") {
        filters.set_type_filter(kind.parse()?);
    }
    if let Some(month) = sub.get_one::<String>("month") {
        filters.set_month_filter(parse_month_filter(month)?);
    }

    let view = budget.derive_with(&filters).view;
    let empty = view.empty_state();
    let limit = sub.get_one::<usize>("limit").copied().unwrap_or(usize::MAX);
    let rows = view
        .rows
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: t.id().to_string(),
            date: t.date().to_string(),
            kind: t.kind().to_string(),
            category: t.category().unwrap_or_default().to_string(),
            description: t.description().to_string(),
            amount: fmt_money(&t.amount()),
        })
        .collect();
    Ok(Listing { rows, empty })
}

fn list<S: StateStorage>(budget: &mut Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let listing = query_rows(budget, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &listing.rows)? {
        return Ok(());
    }
    if let Some(empty) = listing.empty {
        println!("{}", empty.message());
        return Ok(());
    }
    let rows: Vec<Vec<String>> = listing
        .rows
        .into_iter()
        .map(|r| vec![r.date, r.kind, r.category, r.description, r.amount, r.id])
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Date", "Type", "Category", "Description", "Amount", "ID"],
            rows
        )
    );
    Ok(())
}

fn remove<S: StateStorage>(budget: &mut Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    let id = TransactionId::new(sub.get_one::<String>("ID").context("ID is required")?.trim());
    let kind = budget
        .store()
        .get(&id)
        .map(|t| t.kind())
        .with_context(|| format!("Transaction '{}' not found", id))?;
    if !confirmed(sub, &format!("Are you sure you want to delete this {}?", kind))? {
        println!("Nothing deleted");
        return Ok(());
    }
    let removed = budget.delete_transaction(&id)?;
    println!(
        "{} deleted successfully! ({} '{}')",
        match removed.kind() {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        },
        fmt_money(&removed.amount()),
        removed.description()
    );
    Ok(())
}

fn clear<S: StateStorage>(budget: &mut Budget<S>, sub: &clap::ArgMatches) -> Result<()> {
    if !confirmed(
        sub,
        "Are you sure you want to delete all transaction history? This cannot be undone.",
    )? {
        println!("Nothing deleted");
        return Ok(());
    }
    let n = budget.clear_history();
    println!("Cleared {} transactions from history.", n);
    Ok(())
}
