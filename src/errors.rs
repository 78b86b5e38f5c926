// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::TransactionId;
use thiserror::Error;

/// A submission was rejected; the store is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Amount must not exceed {max}", max = crate::store::MAX_AMOUNT)]
    AmountTooLarge,
    #[error("Description is required")]
    EmptyDescription,
    #[error("Date is required")]
    MissingDate,
    #[error("Category is required for an expense")]
    MissingCategory,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Transaction '{id}' not found")]
pub struct NotFoundError {
    pub id: TransactionId,
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage unavailable: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Could not encode saved state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("Saved state is corrupt: {0}")]
    Decode(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No transactions to export.")]
    NoTransactions,
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Failed to finish CSV output: {0}")]
    Output(String),
}
