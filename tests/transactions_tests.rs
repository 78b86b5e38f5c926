// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use budgetbook::app::Budget;
use budgetbook::commands::transactions;
use budgetbook::derive::EmptyState;
use budgetbook::models::{NewTransaction, Theme};
use budgetbook::persistence::{Defaults, SqliteStorage};
use budgetbook::store::CategorySet;
use budgetbook::{cli, utils};

fn setup() -> Budget<SqliteStorage> {
    let defaults = Defaults {
        categories: CategorySet::with_defaults(),
        theme: Theme::Light,
        month: None,
    };
    let mut budget = Budget::open(SqliteStorage::in_memory().unwrap(), defaults);
    let d = |s: &str| utils::parse_date(s).unwrap();
    let a = |s: &str| utils::parse_decimal(s).unwrap();
    budget
        .add_transaction(NewTransaction::income(d("2024-05-01"), "Salary", a("50000")))
        .unwrap();
    budget
        .add_transaction(NewTransaction::expense(d("2024-05-02"), "Lunch", "Food", a("200")))
        .unwrap();
    budget
        .add_transaction(NewTransaction::expense(d("2024-05-03"), "Bus", "Transport", a("50")))
        .unwrap();
    budget
}

fn run(budget: &mut Budget<SqliteStorage>, args: &[&str]) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from(args.iter().copied());
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(budget, tx_m)
    } else {
        panic!("no tx subcommand");
    }
}

fn list(budget: &mut Budget<SqliteStorage>, args: &[&str]) -> transactions::Listing {
    let mut argv = vec!["budgetbook", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            transactions::query_rows(budget, list_m).unwrap()
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_is_newest_first_and_limit_respected() {
    let mut budget = setup();
    let all = list(&mut budget, &[]);
    let descs: Vec<&str> = all.rows.iter().map(|r| r.description.as_str()).collect();
    assert_eq!(descs, ["Bus", "Lunch", "Salary"]);
    assert_eq!(all.rows[0].amount, "50.00");

    let limited = list(&mut budget, &["--limit", "2"]);
    assert_eq!(limited.rows.len(), 2);
    assert_eq!(limited.rows[0].date, "2024-05-03");
}

#[test]
fn month_without_matches_is_not_an_empty_store() {
    let mut budget = setup();
    let listing = list(&mut budget, &["--month", "2024-06"]);
    assert!(listing.rows.is_empty());
    assert_eq!(listing.empty, Some(EmptyState::NoMatches));

    let listing = list(&mut budget, &["--search", "pizza"]);
    assert_eq!(listing.empty, Some(EmptyState::NoSearchMatches));
}

#[test]
fn category_and_search_filters_narrow_the_listing() {
    let mut budget = setup();
    let food = list(&mut budget, &["--category", "Food"]);
    assert_eq!(food.rows.len(), 1);
    assert_eq!(food.rows[0].description, "Lunch");

    let searched = list(&mut budget, &["--search", "  TRANS "]);
    assert_eq!(searched.rows.len(), 1);
    assert_eq!(searched.rows[0].category, "Transport");

    let incomes = list(&mut budget, &["--type", "income", "--month", "all"]);
    assert_eq!(incomes.rows.len(), 1);
    assert_eq!(incomes.rows[0].kind, "income");
    assert_eq!(incomes.rows[0].category, "");
}

#[test]
fn add_command_records_and_extends_categories() {
    let mut budget = setup();
    run(
        &mut budget,
        &[
            "budgetbook", "tx", "add", "--type", "expense", "--date", "2024-05-04",
            "--description", "Pills", "--amount", "12.5", "--category", "Health",
        ],
    )
    .unwrap();
    assert_eq!(budget.store().transactions().len(), 4);
    assert!(budget.store().list_categories().contains("Health"));
    assert_eq!(budget.derive().totals.expense.to_string(), "262.5");
}

#[test]
fn add_command_rejects_invalid_submission() {
    let mut budget = setup();
    let err = run(
        &mut budget,
        &[
            "budgetbook", "tx", "add", "--type", "expense", "--date", "2024-05-04",
            "--description", "Pills", "--amount", "12.5",
        ],
    )
    .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please fill all fields correctly: Category is required for an expense"
    );

    let err = run(
        &mut budget,
        &[
            "budgetbook", "tx", "add", "--type", "income", "--date", "2024-05-04",
            "--description", "Gift", "--amount", "0",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("greater than zero"));

    let err = run(
        &mut budget,
        &[
            "budgetbook", "tx", "add", "--type", "income", "--date", "2024-05-04",
            "--description", "Jackpot", "--amount", "79228162514264337593543950335",
        ],
    )
    .unwrap_err();
    assert!(err.to_string().contains("must not exceed"));
    assert_eq!(budget.store().transactions().len(), 3);
    assert_eq!(budget.derive().totals.income.to_string(), "50000");
}

#[test]
fn rm_deletes_by_id_and_updates_totals() {
    let mut budget = setup();
    let id = budget
        .store()
        .transactions()
        .iter()
        .find(|t| t.description() == "Lunch")
        .unwrap()
        .id()
        .to_string();
    run(&mut budget, &["budgetbook", "tx", "rm", &id, "--yes"]).unwrap();

    assert_eq!(budget.derive().totals.expense.to_string(), "50");
    assert!(list(&mut budget, &[]).rows.iter().all(|r| r.id != id));
    assert!(run(&mut budget, &["budgetbook", "tx", "rm", &id, "--yes"]).is_err());
}

#[test]
fn clear_keeps_categories() {
    let mut budget = setup();
    budget.add_category("Travel");
    run(&mut budget, &["budgetbook", "tx", "clear", "--yes"]).unwrap();
    assert!(budget.store().transactions().is_empty());
    assert!(budget.store().list_categories().contains("Travel"));
    assert_eq!(list(&mut budget, &[]).empty, Some(EmptyState::StoreEmpty));
}
