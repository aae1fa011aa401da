// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory repository fake.

use simbridge_mapping::{ExternalIdentifierMap, RepositoryPort, StagedOperation, StagedTransaction};
use simbridge_model::{DomainOfExpertise, ElementDefinition, Thing, ThingId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// In-memory implementation of [`RepositoryPort`].
///
/// Clones share state, so a test can keep a handle while the engine owns
/// another. [`commit`](Self::commit) plays a staged transaction back into
/// the fake the way a repository session would.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    things: HashMap<ThingId, Thing>,
    maps: HashMap<ThingId, ExternalIdentifierMap>,
    live_correspondences: HashSet<ThingId>,
    domain: Option<DomainOfExpertise>,
    lookup_count: usize,
}

impl InMemoryRepository {
    /// Create an empty repository with no current domain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty repository acting as `domain`.
    pub fn with_domain(domain: DomainOfExpertise) -> Self {
        let repository = Self::new();
        repository.lock().domain = Some(domain);
        repository
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Store `thing` under its id.
    pub fn insert(&self, thing: Thing) {
        self.lock().things.insert(thing.id(), thing);
    }

    /// Store a definition together with its parameters, their value sets and
    /// its usages (with their overrides and value sets).
    pub fn insert_element_definition(&self, definition: &ElementDefinition) {
        for parameter in &definition.parameters {
            for set in &parameter.value_sets {
                self.insert(Thing::ParameterValueSet(set.clone()));
            }
            self.insert(Thing::Parameter(parameter.clone()));
        }
        for usage in &definition.contained_elements {
            for over in &usage.parameter_overrides {
                for set in &over.value_sets {
                    self.insert(Thing::ParameterValueSet(set.clone()));
                }
                self.insert(Thing::ParameterOverride(over.clone()));
            }
            self.insert(Thing::ElementUsage(usage.clone()));
        }
        self.insert(Thing::ElementDefinition(definition.clone()));
    }

    /// Store a persisted map; its persisted records become live.
    pub fn insert_map(&self, map: ExternalIdentifierMap) {
        let mut inner = self.lock();
        for record in map.correspondences.iter().filter(|r| r.is_persisted()) {
            inner.live_correspondences.insert(record.id);
        }
        inner.maps.insert(map.id, map);
    }

    /// Forget a persisted record, as if another session deleted it.
    pub fn remove_correspondence(&self, id: ThingId) {
        self.lock().live_correspondences.remove(&id);
    }

    /// Apply every staged operation.
    pub fn commit(&self, transaction: StagedTransaction) {
        let mut inner = self.lock();
        for operation in transaction.into_operations() {
            match operation {
                StagedOperation::CreateCorrespondence(record)
                | StagedOperation::UpdateCorrespondence(record) => {
                    inner.live_correspondences.insert(record.id);
                }
                StagedOperation::CreateOrUpdateMap(map) => {
                    inner.maps.insert(map.id, map);
                }
            }
        }
    }

    /// Number of `thing` lookups served so far.
    pub fn lookup_count(&self) -> usize {
        self.lock().lookup_count
    }
}

impl RepositoryPort for InMemoryRepository {
    fn thing(&self, id: ThingId) -> Option<Thing> {
        let mut inner = self.lock();
        inner.lookup_count += 1;
        inner.things.get(&id).cloned()
    }

    fn external_identifier_map(&self, id: ThingId) -> Option<ExternalIdentifierMap> {
        self.lock().maps.get(&id).cloned()
    }

    fn correspondence_exists(&self, id: ThingId) -> bool {
        self.lock().live_correspondences.contains(&id)
    }

    fn current_domain(&self) -> Option<DomainOfExpertise> {
        self.lock().domain.clone()
    }
}
