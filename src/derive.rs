// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Turns the raw transaction list and the active filters into everything the
//! presentation layer shows: the filtered view, the headline totals and the
//! per-category expense distribution.
//!
//! Totals and distribution are always computed over the whole store. Filters
//! only narrow the view.

use crate::filters::FilterState;
use crate::models::{Transaction, TransactionType};
use crate::store::CategorySet;
use regex::{Regex, RegexBuilder};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
}

impl Totals {
    pub fn compute(transactions: &[Transaction]) -> Self {
        let mut income = Decimal::ZERO;
        let mut expense = Decimal::ZERO;
        for tx in transactions {
            match tx.kind() {
                TransactionType::Income => income += tx.amount(),
                TransactionType::Expense => expense += tx.amount(),
            }
        }
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub total: Decimal,
    /// Share of total expense, one decimal place.
    pub percentage: Decimal,
}

impl CategoryShare {
    pub fn label(&self) -> String {
        format!("{} ({:.1}%)", self.category, self.percentage)
    }
}

/// Per-category expense totals in order of first appearance. Empty when
/// there is no expense.
pub fn distribution(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut sums: Vec<(String, Decimal)> = Vec::new();
    let mut total = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        let cat = tx.category().unwrap_or_default();
        match sums.iter_mut().find(|(name, _)| name == cat) {
            Some((_, sum)) => *sum += tx.amount(),
            None => sums.push((cat.to_string(), tx.amount())),
        }
        total += tx.amount();
    }
    if total.is_zero() {
        return Vec::new();
    }
    sums.into_iter()
        .map(|(category, sum)| CategoryShare {
            percentage: (sum / total * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            category,
            total: sum,
        })
        .collect()
}

/// Which empty message the presentation layer should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    StoreEmpty,
    NoMatches,
    NoSearchMatches,
}

impl EmptyState {
    pub fn message(&self) -> &'static str {
        match self {
            EmptyState::StoreEmpty => "No transactions to display",
            EmptyState::NoMatches => "No transactions match your filters",
            EmptyState::NoSearchMatches => "No transactions match your search",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct View {
    pub rows: Vec<Transaction>,
    /// Transactions in the store before filtering.
    pub store_len: usize,
    pub search_active: bool,
}

impl View {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if !self.rows.is_empty() {
            None
        } else if self.store_len == 0 {
            Some(EmptyState::StoreEmpty)
        } else if self.search_active {
            Some(EmptyState::NoSearchMatches)
        } else {
            Some(EmptyState::NoMatches)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derivation {
    pub view: View,
    pub totals: Totals,
    pub distribution: Vec<CategoryShare>,
    pub categories: Vec<String>,
}

/// Case-insensitive literal substring matcher. Pattern characters in the
/// query match only themselves.
enum SearchMatcher {
    Pattern(Regex),
    // Used when the escaped query does not compile, e.g. past the size limit.
    Lowercase(String),
}

impl SearchMatcher {
    fn new(query: &str) -> Option<Self> {
        if query.is_empty() {
            return None;
        }
        match RegexBuilder::new(&regex::escape(query))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(SearchMatcher::Pattern(re)),
            Err(e) => {
                tracing::debug!(error = %e, "search query not compiled, matching lowercase text");
                Some(SearchMatcher::Lowercase(query.to_lowercase()))
            }
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            SearchMatcher::Pattern(re) => re.is_match(text),
            SearchMatcher::Lowercase(q) => text.to_lowercase().contains(q.as_str()),
        }
    }
}

/// Applies type, month, category then search, and sorts newest first.
/// Same-date transactions keep their store order.
pub fn filter_view(transactions: &[Transaction], filters: &FilterState) -> View {
    let matcher = SearchMatcher::new(filters.search_query());
    let mut rows: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filters.type_filter().matches(t))
        .filter(|t| filters.month_filter().is_none_or(|m| m.contains(t.date())))
        .filter(|t| filters.category_filter().matches(t))
        .filter(|t| match &matcher {
            None => true,
            Some(m) => m.is_match(t.description()) || t.category().is_some_and(|c| m.is_match(c)),
        })
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.date().cmp(&a.date()));
    View {
        rows,
        store_len: transactions.len(),
        search_active: filters.search_active(),
    }
}

pub fn derive(
    transactions: &[Transaction],
    categories: &CategorySet,
    filters: &FilterState,
) -> Derivation {
    Derivation {
        view: filter_view(transactions, filters),
        totals: Totals::compute(transactions),
        distribution: distribution(transactions),
        categories: categories.as_slice().to_vec(),
    }
}
