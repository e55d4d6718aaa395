//! Application state for the payroll engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::store::{CommitLedger, InMemoryStore, PayrollStore};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded payroll configuration, the persistence store and the ledger of
/// calculations waiting to be committed.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
    /// Employees, contracts, work logs and finalized pay.
    store: Arc<dyn PayrollStore>,
    /// Calculations awaiting commit.
    ledger: Arc<CommitLedger>,
}

impl AppState {
    /// Creates a new application state backed by `store`.
    pub fn new(config: ConfigLoader, store: Arc<dyn PayrollStore>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            ledger: Arc::new(CommitLedger::new()),
        }
    }

    /// Replaces the pending-commit ledger.
    pub fn with_ledger(mut self, ledger: CommitLedger) -> Self {
        self.ledger = Arc::new(ledger);
        self
    }

    /// Creates a state with an empty in-memory store.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::new(config, Arc::new(InMemoryStore::new()))
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the persistence store.
    pub fn store(&self) -> &dyn PayrollStore {
        self.store.as_ref()
    }

    /// Returns the pending-commit ledger.
    pub fn ledger(&self) -> &CommitLedger {
        &self.ledger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_ledger() {
        let state = AppState::in_memory(ConfigLoader::builtin());
        let clone = state.clone();
        assert!(std::ptr::eq(state.ledger(), clone.ledger()));
    }
}
