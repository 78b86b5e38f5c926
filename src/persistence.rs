// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::errors::PersistenceError;
use crate::filters::{PersistedFilters, TypeFilter};
use crate::models::{NewTransaction, Theme, Transaction, TransactionId, TransactionType, YearMonth};
use crate::store::{CategorySet, build_transaction};
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cell::RefCell;
use std::collections::HashSet;

/// Key the state blob is stored under.
pub const STATE_KEY: &str = "budgetAppState";

/// Everything that outlives a session.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedState {
    pub transactions: Vec<Transaction>,
    pub categories: CategorySet,
    pub theme: Theme,
    pub filters: PersistedFilters,
}

/// Values used for any field missing from the saved blob.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub categories: CategorySet,
    pub theme: Theme,
    pub month: Option<YearMonth>,
}

impl Defaults {
    /// Default categories, the terminal's preferred theme and the current month.
    pub fn system() -> Self {
        Self {
            categories: CategorySet::with_defaults(),
            theme: Theme::system_preferred(),
            month: Some(YearMonth::current()),
        }
    }

    pub fn state(&self) -> SavedState {
        SavedState {
            transactions: Vec::new(),
            categories: self.categories.clone(),
            theme: self.theme,
            filters: PersistedFilters {
                kind: TypeFilter::All,
                month: self.month,
            },
        }
    }
}

// Wire format. `month` is "" when unconstrained.
#[derive(Serialize)]
struct Blob<'a> {
    transactions: &'a [Transaction],
    categories: &'a [String],
    theme: Theme,
    filters: BlobFilters,
}

#[derive(Serialize)]
struct BlobFilters {
    #[serde(rename = "type")]
    kind: TypeFilter,
    month: String,
}

impl<'a> From<&'a SavedState> for Blob<'a> {
    fn from(s: &'a SavedState) -> Self {
        Blob {
            transactions: &s.transactions,
            categories: s.categories.as_slice(),
            theme: s.theme,
            filters: BlobFilters {
                kind: s.filters.kind,
                month: s.filters.month.map(|m| m.to_string()).unwrap_or_default(),
            },
        }
    }
}

// A transaction as written to the blob, before validation.
#[derive(Deserialize)]
struct SavedTransaction {
    id: String,
    #[serde(rename = "type")]
    kind: TransactionType,
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    description: String,
    amount: Decimal,
    #[serde(default)]
    category: Option<String>,
}

/// Reads one field, logging and skipping it when its value does not fit.
fn field<T: DeserializeOwned>(fields: &Map<String, Value>, key: &str) -> Option<T> {
    let value = fields.get(key)?;
    match T::deserialize(value) {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(field = key, error = %e, "ignoring unreadable saved field");
            None
        }
    }
}

/// Keeps the entries that read back as valid transactions with a unique id.
fn restore_transactions(entries: &[Value]) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    let mut restored = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let saved = match SavedTransaction::deserialize(entry) {
            Ok(saved) => saved,
            Err(e) => {
                tracing::warn!(index, error = %e, "dropping unreadable saved transaction");
                continue;
            }
        };
        if saved.id.trim().is_empty() || !seen.insert(saved.id.clone()) {
            tracing::warn!(index, id = %saved.id, "dropping saved transaction without a unique id");
            continue;
        }
        let entry = NewTransaction {
            kind: saved.kind,
            date: saved.date,
            description: saved.description,
            amount: saved.amount,
            category: saved.category,
        };
        match build_transaction(TransactionId::new(saved.id), entry) {
            Ok(tx) => restored.push(tx),
            Err(e) => tracing::warn!(index, error = %e, "dropping invalid saved transaction"),
        }
    }
    restored
}

fn parse_saved_month(raw: &str, fallback: Option<YearMonth>) -> Option<YearMonth> {
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(m) => Some(m),
        Err(e) => {
            tracing::warn!(month = raw, error = %e, "ignoring unreadable saved month filter");
            fallback
        }
    }
}

pub fn encode(state: &SavedState) -> Result<String, PersistenceError> {
    serde_json::to_string(&Blob::from(state)).map_err(PersistenceError::Encode)
}

/// Decodes a blob and merges it over `defaults` field by field.
///
/// Only a blob that is not a JSON object is an error. A field whose value
/// cannot be read keeps its default, and unusable transactions are dropped
/// one by one.
pub fn decode(raw: &str, defaults: &Defaults) -> Result<SavedState, PersistenceError> {
    let fields: Map<String, Value> =
        serde_json::from_str(raw).map_err(PersistenceError::Decode)?;
    let mut state = defaults.state();
    if let Some(entries) = field::<Vec<Value>>(&fields, "transactions") {
        state.transactions = restore_transactions(&entries);
    }
    if let Some(names) = field::<Vec<Value>>(&fields, "categories") {
        state.categories = CategorySet::from_names(names.iter().filter_map(Value::as_str));
    }
    if let Some(theme) = field(&fields, "theme") {
        state.theme = theme;
    }
    if let Some(filters) = field::<Map<String, Value>>(&fields, "filters") {
        if let Some(kind) = field(&filters, "type") {
            state.filters.kind = kind;
        }
        if let Some(month) = field::<String>(&filters, "month") {
            state.filters.month = parse_saved_month(&month, defaults.month);
        }
    }
    Ok(state)
}

/// A local key/value store holding opaque serialized blobs.
pub trait StateStorage {
    fn load_blob(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn save_blob(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove_blob(&self, key: &str) -> Result<(), PersistenceError>;
}

/// Reads saved state, falling back to defaults on a missing or unreadable blob.
pub fn load_state<S: StateStorage + ?Sized>(storage: &S, defaults: &Defaults) -> SavedState {
    let raw = match storage.load_blob(STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no saved state, starting from defaults");
            return defaults.state();
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not read saved state, starting from defaults");
            return defaults.state();
        }
    };
    match decode(&raw, defaults) {
        Ok(state) => state,
        Err(e) => {
            tracing::warn!(error = %e, "saved state unreadable, starting from defaults");
            defaults.state()
        }
    }
}

pub fn save_state<S: StateStorage + ?Sized>(
    storage: &S,
    state: &SavedState,
) -> Result<(), PersistenceError> {
    let raw = encode(state)?;
    storage.save_blob(STATE_KEY, &raw)?;
    tracing::debug!(bytes = raw.len(), "saved state");
    Ok(())
}

/// Blob storage in the application database's `storage` table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    pub fn new(conn: Connection) -> Result<Self, PersistenceError> {
        crate::db::init_schema(&conn)?;
        Ok(Self { conn })
    }

    pub fn in_memory() -> Result<Self, PersistenceError> {
        Self::new(Connection::open_in_memory()?)
    }
}

impl StateStorage for SqliteStorage {
    fn load_blob(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let v = self
            .conn
            .query_row(
                "SELECT value FROM storage WHERE key=?1",
                params![key],
                |r| r.get(0),
            )
            .optional()?;
        Ok(v)
    }

    fn save_blob(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.conn.execute(
            "INSERT INTO storage(key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value, updated_at=datetime('now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<(), PersistenceError> {
        self.conn
            .execute("DELETE FROM storage WHERE key=?1", params![key])?;
        Ok(())
    }
}

/// In-process storage, no durability.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    blob: RefCell<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_blob(raw: impl Into<String>) -> Self {
        Self {
            blob: RefCell::new(Some(raw.into())),
        }
    }

    pub fn blob(&self) -> Option<String> {
        self.blob.borrow().clone()
    }
}

impl StateStorage for MemoryStorage {
    fn load_blob(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        if key != STATE_KEY {
            return Ok(None);
        }
        Ok(self.blob.borrow().clone())
    }

    fn save_blob(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if key == STATE_KEY {
            *self.blob.borrow_mut() = Some(value.to_string());
        }
        Ok(())
    }

    fn remove_blob(&self, key: &str) -> Result<(), PersistenceError> {
        if key == STATE_KEY {
            *self.blob.borrow_mut() = None;
        }
        Ok(())
    }
}
