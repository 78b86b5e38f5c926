// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            TransactionType::Income => "inc",
            TransactionType::Expense => "exp",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

/// Identifier assigned to a transaction when it is stored.
///
/// Ids are opaque strings so that blobs written by earlier versions keep
/// resolving after a reload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `<prefix>_<unix millis>_<9 random chars>`, prefix `inc` or `exp`.
    pub fn generate(kind: TransactionType) -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}",
            kind.id_prefix(),
            Utc::now().timestamp_millis(),
            &random[..9]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A recorded income or expense. Never edited in place, only removed.
///
/// Construct through [`crate::store::TransactionStore::add_transaction`], which
/// validates the submission and assigns the id. Saved transactions are read
/// back through [`crate::store::build_transaction`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    #[serde(rename = "type")]
    kind: TransactionType,
    date: NaiveDate,
    description: String,
    amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
}

impl Transaction {
    /// Build a transaction from parts that have already been validated.
    pub(crate) fn new_unchecked(
        id: TransactionId,
        kind: TransactionType,
        date: NaiveDate,
        description: String,
        amount: Decimal,
        category: Option<String>,
    ) -> Self {
        Self {
            id,
            kind,
            date,
            description,
            amount,
            category,
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// Always `None` for income.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }
}

/// A user submission, as captured by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub date: Option<NaiveDate>,
    pub description: String,
    pub amount: Decimal,
    pub category: Option<String>,
}

impl NewTransaction {
    pub fn income(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        Self {
            kind: TransactionType::Income,
            date: Some(date),
            description: description.into(),
            amount,
            category: None,
        }
    }

    pub fn expense(
        date: NaiveDate,
        description: impl Into<String>,
        category: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            kind: TransactionType::Expense,
            date: Some(date),
            description: description.into(),
            amount,
            category: Some(category.into()),
        }
    }
}

/// Calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn current() -> Self {
        Self::of(chrono::Local::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid month '{}', expected YYYY-MM", s))?;
        Ok(Self::of(date))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Terminal preference from a `COLORFGBG` value such as `15;0`.
    ///
    /// The last field is the background color index; 0-6 and 8 are dark.
    pub fn from_colorfgbg(value: Option<&str>) -> Self {
        let bg = value
            .and_then(|v| v.rsplit(';').next())
            .and_then(|b| b.trim().parse::<u8>().ok());
        match bg {
            Some(0..=6) | Some(8) => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn system_preferred() -> Self {
        Self::from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_carry_type_prefix_and_differ() {
        let a = TransactionId::generate(TransactionType::Expense);
        let b = TransactionId::generate(TransactionType::Expense);
        assert!(a.as_str().starts_with("exp_"));
        assert!(TransactionId::generate(TransactionType::Income)
            .as_str()
            .starts_with("inc_"));
        assert_ne!(a, b);
    }

    #[test]
    fn year_month_parses_and_matches_dates() {
        let ym: YearMonth = " 2024-05 ".parse().unwrap();
        assert_eq!(ym.to_string(), "2024-05");
        assert!(ym.contains(NaiveDate::from_ymd_opt(2024, 5, 31).unwrap()));
        assert!(!ym.contains(NaiveDate::from_ymd_opt(2023, 5, 1).unwrap()));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("May".parse::<YearMonth>().is_err());
    }

    #[test]
    fn theme_preference_follows_terminal_background() {
        assert_eq!(Theme::from_colorfgbg(Some("15;0")), Theme::Dark);
        assert_eq!(Theme::from_colorfgbg(Some("0;default;15")), Theme::Light);
        assert_eq!(Theme::from_colorfgbg(None), Theme::Light);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
