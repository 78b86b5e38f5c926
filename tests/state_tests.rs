// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::app::Budget;
use budgetbook::commands::{filters, reset, theme, transactions};
use budgetbook::filters::TypeFilter;
use budgetbook::models::Theme;
use budgetbook::persistence::{Defaults, STATE_KEY, SqliteStorage, StateStorage};
use budgetbook::store::CategorySet;
use budgetbook::{cli, db};
use std::path::Path;
use tempfile::tempdir;

fn defaults() -> Defaults {
    Defaults {
        categories: CategorySet::with_defaults(),
        theme: Theme::Light,
        month: Some("2024-05".parse().unwrap()),
    }
}

fn open(path: &Path) -> Budget<SqliteStorage> {
    let conn = db::open_or_init(Some(path)).unwrap();
    Budget::open(SqliteStorage::new(conn).unwrap(), defaults())
}

fn run(budget: &mut Budget<SqliteStorage>, args: &[&str]) {
    let mut argv = vec!["budgetbook"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(budget, sub).unwrap(),
        Some(("filter", sub)) => filters::handle(budget, sub).unwrap(),
        Some(("theme", sub)) => theme::handle(budget, sub).unwrap(),
        Some(("reset", sub)) => reset::handle(budget, sub).unwrap(),
        other => panic!("unexpected command {:?}", other.map(|(n, _)| n)),
    }
}

#[test]
fn fresh_database_starts_from_defaults() {
    let dir = tempdir().unwrap();
    let budget = open(&dir.path().join("nested").join("budget.sqlite"));
    assert!(budget.store().transactions().is_empty());
    assert_eq!(budget.store().list_categories(), &CategorySet::with_defaults());
    assert_eq!(budget.filters().month_filter(), defaults().month);
    assert_eq!(budget.filters().type_filter(), TypeFilter::All);
}

#[test]
fn transactions_theme_and_type_month_filters_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.sqlite");
    {
        let mut budget = open(&path);
        run(
            &mut budget,
            &[
                "tx", "add", "--type", "expense", "--date", "2024-05-02", "--description",
                "Lunch", "--amount", "200", "--category", "Snacks",
            ],
        );
        run(&mut budget, &["filter", "type", "expense"]);
        run(&mut budget, &["filter", "month", "all"]);
        run(&mut budget, &["theme", "toggle"]);
        run(&mut budget, &["tx", "list", "--category", "Snacks", "--search", "lunch"]);
        assert!(budget.filters().search_active());
    }

    let budget = open(&path);
    assert_eq!(budget.store().transactions().len(), 1);
    assert!(budget.store().list_categories().contains("Snacks"));
    assert_eq!(budget.theme(), Theme::Dark);
    assert_eq!(budget.filters().type_filter(), TypeFilter::Expense);
    assert_eq!(budget.filters().month_filter(), None);
    assert!(!budget.filters().category_filter().is_active());
    assert!(!budget.filters().search_active());
}

#[test]
fn corrupt_blob_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.sqlite");
    {
        let budget = open(&path);
        budget.storage().save_blob(STATE_KEY, "{\"transactions\": [oops").unwrap();
    }
    let budget = open(&path);
    assert!(budget.store().transactions().is_empty());
    assert_eq!(budget.theme(), Theme::Light);
}

#[test]
fn reset_removes_saved_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("budget.sqlite");
    let mut budget = open(&path);
    run(&mut budget, &["theme", "toggle"]);
    run(&mut budget, &["filter", "clear"]);
    assert!(budget.storage().load_blob(STATE_KEY).unwrap().is_some());

    run(&mut budget, &["reset", "--yes"]);
    assert!(budget.storage().load_blob(STATE_KEY).unwrap().is_none());
    assert_eq!(budget.theme(), Theme::Light);
    assert_eq!(budget.filters().month_filter(), defaults().month);
}
