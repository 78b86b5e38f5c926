// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::{NotFoundError, ValidationError};
use crate::models::{NewTransaction, Transaction, TransactionId, TransactionType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CATEGORIES: [&str; 5] = ["Food", "Transport", "Bills", "Shopping", "Entertainment"];

/// Largest accepted amount. Keeps every store total well inside `Decimal` range.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000;

/// Checks a submission and builds the transaction it describes.
///
/// Description and category are trimmed; a category on income is dropped.
/// Used for new submissions and for transactions read back from saved state.
pub fn build_transaction(
    id: TransactionId,
    entry: NewTransaction,
) -> Result<Transaction, ValidationError> {
    let description = entry.description.trim().to_string();
    let category = entry
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    if entry.amount <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveAmount);
    }
    if entry.amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::AmountTooLarge);
    }
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    let date = entry.date.ok_or(ValidationError::MissingDate)?;
    let category = match entry.kind {
        TransactionType::Expense => Some(category.ok_or(ValidationError::MissingCategory)?),
        TransactionType::Income => None,
    };
    Ok(Transaction::new_unchecked(
        id,
        entry.kind,
        date,
        description,
        entry.amount,
        category,
    ))
}

/// Category names in insertion order. Grows only; matching is case-sensitive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategorySet(Vec<String>);

impl CategorySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        Self::from_names(DEFAULT_CATEGORIES)
    }

    /// Builds a set from a list that may contain duplicates, keeping first occurrences.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.add(name.as_ref());
        }
        set
    }

    /// Returns `true` when `name` was appended.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|c| c == name)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

/// The canonical list of transactions plus the category set they draw from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    categories: CategorySet,
}

impl TransactionStore {
    pub fn new(categories: CategorySet) -> Self {
        Self {
            transactions: Vec::new(),
            categories,
        }
    }

    /// Restores a store from saved parts.
    ///
    /// Categories referenced by saved expenses are added to the set so every
    /// historical transaction resolves, even from a hand-edited blob.
    pub fn from_parts(transactions: Vec<Transaction>, mut categories: CategorySet) -> Self {
        for tx in &transactions {
            if let Some(cat) = tx.category() {
                categories.add(cat);
            }
        }
        Self {
            transactions,
            categories,
        }
    }

    /// Validates and appends a submission, returning the stored transaction.
    pub fn add_transaction(&mut self, entry: NewTransaction) -> Result<&Transaction, ValidationError> {
        let tx = build_transaction(self.fresh_id(entry.kind), entry)?;
        if let Some(cat) = tx.category() {
            self.categories.add(cat);
        }
        tracing::debug!(id = %tx.id(), kind = %tx.kind(), date = %tx.date(), "adding transaction");
        self.transactions.push(tx);
        let idx = self.transactions.len() - 1;
        Ok(&self.transactions[idx])
    }

    fn fresh_id(&self, kind: TransactionType) -> TransactionId {
        loop {
            let id = TransactionId::generate(kind);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    pub fn remove_transaction(&mut self, id: &TransactionId) -> Result<Transaction, NotFoundError> {
        let idx = self
            .transactions
            .iter()
            .position(|t| t.id() == id)
            .ok_or_else(|| NotFoundError { id: id.clone() })?;
        tracing::debug!(%id, "removing transaction");
        Ok(self.transactions.remove(idx))
    }

    /// Empties the transaction list. Categories are kept.
    pub fn clear_all(&mut self) -> usize {
        let n = self.transactions.len();
        self.transactions.clear();
        n
    }

    pub fn get(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id() == id)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn list_categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn add_category(&mut self, name: &str) -> bool {
        self.categories.add(name)
    }
}
