// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::derive::{self, Derivation};
use crate::errors::{ExportError, NotFoundError, PersistenceError, ValidationError};
use crate::export;
use crate::filters::{CategoryFilter, FilterState, TypeFilter};
use crate::models::{NewTransaction, Theme, Transaction, TransactionId, YearMonth};
use crate::persistence::{self, Defaults, SavedState, StateStorage, STATE_KEY};
use crate::store::TransactionStore;

/// Owns the application state and runs every user intent against it.
///
/// Each mutating call updates the store or filters and then saves. A failed
/// save keeps the in-memory change and is reported through
/// [`Budget::take_save_warning`].
pub struct Budget<S: StateStorage> {
    store: TransactionStore,
    filters: FilterState,
    theme: Theme,
    storage: S,
    defaults: Defaults,
    save_warning: Option<PersistenceError>,
}

impl<S: StateStorage> Budget<S> {
    pub fn open(storage: S, defaults: Defaults) -> Self {
        let saved = persistence::load_state(&storage, &defaults);
        Self::from_saved(storage, defaults, saved)
    }

    fn from_saved(storage: S, defaults: Defaults, saved: SavedState) -> Self {
        Self {
            store: TransactionStore::from_parts(saved.transactions, saved.categories),
            filters: FilterState::from_persisted(saved.filters),
            theme: saved.theme,
            storage,
            defaults,
            save_warning: None,
        }
    }

    pub fn store(&self) -> &TransactionStore {
        &self.store
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn snapshot(&self) -> SavedState {
        SavedState {
            transactions: self.store.transactions().to_vec(),
            categories: self.store.list_categories().clone(),
            theme: self.theme,
            filters: self.filters.persisted(),
        }
    }

    fn persist(&mut self) {
        match persistence::save_state(&self.storage, &self.snapshot()) {
            Ok(()) => self.save_warning = None,
            Err(e) => {
                tracing::warn!(error = %e, "state not saved, changes kept in memory");
                self.save_warning = Some(e);
            }
        }
    }

    /// The last save failure, if the most recent save did not succeed.
    pub fn take_save_warning(&mut self) -> Option<PersistenceError> {
        self.save_warning.take()
    }

    pub fn derive(&self) -> Derivation {
        self.derive_with(&self.filters)
    }

    /// Derives with filters other than the current ones, without storing them.
    pub fn derive_with(&self, filters: &FilterState) -> Derivation {
        derive::derive(
            self.store.transactions(),
            self.store.list_categories(),
            filters,
        )
    }

    pub fn add_transaction(&mut self, entry: NewTransaction) -> Result<Transaction, ValidationError> {
        let tx = self.store.add_transaction(entry)?.clone();
        self.persist();
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: &TransactionId) -> Result<Transaction, NotFoundError> {
        let removed = self.store.remove_transaction(id)?;
        self.persist();
        Ok(removed)
    }

    /// Explicit category entry. Returns `true` when the category is new.
    pub fn add_category(&mut self, name: &str) -> bool {
        let added = self.store.add_category(name);
        if added {
            self.persist();
        }
        added
    }

    pub fn set_type_filter(&mut self, kind: TypeFilter) {
        self.filters.set_type_filter(kind);
        self.persist();
    }

    pub fn set_month_filter(&mut self, month: Option<YearMonth>) {
        self.filters.set_month_filter(month);
        self.persist();
    }

    // Category and search only live for this session and are never saved.
    pub fn set_category_filter(&mut self, category: CategoryFilter) {
        self.filters.set_category_filter(category);
    }

    pub fn set_search_query(&mut self, query: &str) {
        self.filters.set_search_query(query);
    }

    pub fn clear_category_filter(&mut self) {
        self.filters.clear_category_filter();
    }

    pub fn clear_search(&mut self) {
        self.filters.clear_search();
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.persist();
        self.theme
    }

    /// Drops every transaction. Categories, theme and filters survive.
    pub fn clear_history(&mut self) -> usize {
        let n = self.store.clear_all();
        tracing::info!(count = n, "cleared transaction history");
        self.persist();
        n
    }

    /// Removes the saved blob and starts over from defaults.
    pub fn clear_all_data(&mut self) -> Result<(), PersistenceError> {
        self.storage.remove_blob(STATE_KEY)?;
        let fresh = self.defaults.state();
        self.store = TransactionStore::from_parts(fresh.transactions, fresh.categories);
        self.filters = FilterState::from_persisted(fresh.filters);
        self.theme = fresh.theme;
        self.save_warning = None;
        tracing::info!("cleared all data");
        Ok(())
    }

    pub fn export_csv(&self) -> Result<String, ExportError> {
        let out = export::to_csv(self.store.transactions())?;
        tracing::info!(count = self.store.transactions().len(), "exported transactions");
        Ok(out)
    }
}
