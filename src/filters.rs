// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Transaction, TransactionType, YearMonth};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => tx.kind() == TransactionType::Income,
            TypeFilter::Expense => tx.kind() == TransactionType::Expense,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TypeFilter::All => "all",
            TypeFilter::Income => "income",
            TypeFilter::Expense => "expense",
        })
    }
}

impl FromStr for TypeFilter {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TypeFilter::All),
            "income" => Ok(TypeFilter::Income),
            "expense" => Ok(TypeFilter::Expense),
            other => Err(anyhow::anyhow!(
                "Invalid type filter '{}', expected all|income|expense",
                other
            )),
        }
    }
}

/// `All`, or a single category name. Income never matches `Only`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` and the empty string mean no constraint; anything else is a category name.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s == "all" {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(s.to_string())
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => tx.category() == Some(name.as_str()),
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CategoryFilter::Only(_))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(name) => f.write_str(name),
        }
    }
}

/// The type+month pair that survives between sessions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PersistedFilters {
    pub kind: TypeFilter,
    pub month: Option<YearMonth>,
}

/// The four independent filter dimensions applied to the transaction view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    kind: TypeFilter,
    month: Option<YearMonth>,
    category: CategoryFilter,
    search: String,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session start: persisted type+month, category and search at their defaults.
    pub fn from_persisted(saved: PersistedFilters) -> Self {
        Self {
            kind: saved.kind,
            month: saved.month,
            ..Self::default()
        }
    }

    pub fn persisted(&self) -> PersistedFilters {
        PersistedFilters {
            kind: self.kind,
            month: self.month,
        }
    }

    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.kind = kind;
    }

    pub fn set_month_filter(&mut self, month: Option<YearMonth>) {
        self.month = month;
    }

    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.category = category;
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.search = query.trim().to_string();
    }

    pub fn clear_category_filter(&mut self) {
        self.category = CategoryFilter::All;
    }

    pub fn clear_search(&mut self) {
        self.search.clear();
    }

    pub fn type_filter(&self) -> TypeFilter {
        self.kind
    }

    pub fn month_filter(&self) -> Option<YearMonth> {
        self.month
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category
    }

    pub fn search_query(&self) -> &str {
        &self.search
    }

    pub fn search_active(&self) -> bool {
        !self.search.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_query_is_trimmed_and_clearable() {
        let mut f = FilterState::new();
        f.set_search_query("  lunch \n");
        assert_eq!(f.search_query(), "lunch");
        assert!(f.search_active());
        f.set_search_query("   ");
        assert!(!f.search_active());
        f.set_search_query("bus");
        f.clear_search();
        assert_eq!(f, FilterState::new());
    }

    #[test]
    fn only_type_and_month_are_persisted() {
        let mut f = FilterState::new();
        f.set_type_filter(TypeFilter::Expense);
        f.set_month_filter(Some("2024-05".parse().unwrap()));
        f.set_category_filter(CategoryFilter::parse("Food"));
        f.set_search_query("x");

        let restored = FilterState::from_persisted(f.persisted());
        assert_eq!(restored.type_filter(), TypeFilter::Expense);
        assert_eq!(restored.month_filter().unwrap().to_string(), "2024-05");
        assert_eq!(restored.category_filter(), &CategoryFilter::All);
        assert_eq!(restored.search_query(), "");
    }

    #[test]
    fn category_filter_parsing() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(" "), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(" Food "),
            CategoryFilter::Only("Food".into())
        );
        assert!("weekly".parse::<TypeFilter>().is_err());
        assert_eq!("Income".parse::<TypeFilter>().unwrap(), TypeFilter::Income);
    }
}
