// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::ExportError;
use crate::models::Transaction;
use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

pub const CSV_HEADER: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];

/// Exactly two decimals, midpoint away from zero.
pub fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

/// Transactions as CSV in store order.
///
/// Dates use the short `d/m/YYYY` form, amounts exactly two decimals. Fields
/// with a comma, quote or newline are quoted.
pub fn to_csv(transactions: &[Transaction]) -> Result<String, ExportError> {
    if transactions.is_empty() {
        return Err(ExportError::NoTransactions);
    }
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADER)?;
    for t in transactions {
        wtr.write_record([
            t.date().format("%-d/%-m/%Y").to_string(),
            t.kind().to_string(),
            t.category().unwrap_or_default().to_string(),
            t.description().to_string(),
            format_amount(t.amount()),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| ExportError::Output(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ExportError::Output(e.to_string()))
}

/// `budget-manager-export-2024-05-03T10-15-30-123Z.csv`
pub fn export_filename(now: DateTime<Utc>) -> String {
    let stamp = now
        .to_rfc3339_opts(SecondsFormat::Millis, true)
        .replace([':', '.'], "-");
    format!("budget-manager-export-{}.csv", stamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::store::{CategorySet, TransactionStore};
    use chrono::{NaiveDate, TimeZone};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn scenario_exports_header_and_three_rows() {
        let mut store = TransactionStore::new(CategorySet::with_defaults());
        store
            .add_transaction(NewTransaction::income(date("2024-05-01"), "Salary", "50000".parse().unwrap()))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense(date("2024-05-02"), "Lunch", "Food", "200".parse().unwrap()))
            .unwrap();
        store
            .add_transaction(NewTransaction::expense(date("2024-05-03"), "Bus", "Transport", "50".parse().unwrap()))
            .unwrap();

        let out = to_csv(store.transactions()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            [
                "Date,Type,Category,Description,Amount",
                "1/5/2024,income,,Salary,50000.00",
                "2/5/2024,expense,Food,Lunch,200.00",
                "3/5/2024,expense,Transport,Bus,50.00",
            ]
        );
    }

    #[test]
    fn fields_with_separators_are_quoted() {
        let mut store = TransactionStore::new(CategorySet::new());
        store
            .add_transaction(NewTransaction::expense(
                date("2024-12-25"),
                "Dinner, \"fancy\"",
                "Food",
                "12.5".parse().unwrap(),
            ))
            .unwrap();
        let out = to_csv(store.transactions()).unwrap();
        assert_eq!(
            out.lines().nth(1).unwrap(),
            "25/12/2024,expense,Food,\"Dinner, \"\"fancy\"\"\",12.50"
        );
    }

    #[test]
    fn empty_store_is_an_export_error() {
        assert!(matches!(to_csv(&[]), Err(ExportError::NoTransactions)));
    }

    #[test]
    fn filename_has_no_colons_or_dots_in_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 5, 3, 10, 15, 30).unwrap();
        assert_eq!(
            export_filename(now),
            "budget-manager-export-2024-05-03T10-15-30-000Z.csv"
        );
    }
}
