// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Settings store kept in memory.

use simbridge_config::{ConfigError, ConfigStore};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// [`ConfigStore`] over a shared map of documents.
///
/// Clones see the same documents: hand one to a `ConfigService` and keep
/// the other to look at what was written.
///
/// ```
/// use simbridge_config::{BridgeSettings, ConfigService};
/// use simbridge_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// BridgeSettings::default().save(&ConfigService::new(store.clone())).unwrap();
/// assert_eq!(store.writes(), 1);
/// assert!(store.document(BridgeSettings::KEY).is_some());
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    documents: BTreeMap<String, Vec<u8>>,
    writes: usize,
    outage: Option<String>,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with `data` under `key`.
    pub fn with_document(key: &str, data: impl Into<Vec<u8>>) -> Self {
        let store = Self::new();
        store.state().documents.insert(key.to_owned(), data.into());
        store
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fail every later read and write with `reason`; `None` heals the store.
    pub fn set_outage(&self, reason: Option<&str>) {
        self.state().outage = reason.map(str::to_owned);
    }

    /// Successful writes so far.
    pub fn writes(&self) -> usize {
        self.state().writes
    }

    /// Bytes currently stored under `key`.
    pub fn document(&self, key: &str) -> Option<Vec<u8>> {
        self.state().documents.get(key).cloned()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, ConfigError> {
        let state = self.state();
        match &state.outage {
            Some(reason) => Err(ConfigError::Unavailable(reason.clone())),
            None => Ok(state.documents.get(key).cloned()),
        }
    }

    fn write(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut state = self.state();
        if let Some(reason) = &state.outage {
            return Err(ConfigError::Unavailable(reason.clone()));
        }
        state.documents.insert(key.to_owned(), data.to_vec());
        state.writes += 1;
        Ok(())
    }
}
