// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Repository port consumed by the mapping engine.

use simbridge_model::{DomainOfExpertise, ParameterValueSet, Thing, ThingId};

use crate::ExternalIdentifierMap;

/// Read access to the engineering-data repository.
///
/// Absence is reported as `None`/`false`, never as an error: the engine
/// treats every miss as "skip this record".
pub trait RepositoryPort {
    /// Looks up any internal thing by id.
    fn thing(&self, id: ThingId) -> Option<Thing>;

    /// Looks up a persisted correspondence map by id.
    fn external_identifier_map(&self, id: ThingId) -> Option<ExternalIdentifierMap>;

    /// Returns `true` when a persisted correspondence record with `id` is
    /// still live in the session.
    fn correspondence_exists(&self, id: ThingId) -> bool;

    /// Domain of expertise the session is acting as.
    fn current_domain(&self) -> Option<DomainOfExpertise>;

    /// Looks up a value set by id.
    fn value_set(&self, id: ThingId) -> Option<ParameterValueSet> {
        match self.thing(id)? {
            Thing::ParameterValueSet(set) => Some(set),
            _ => None,
        }
    }
}

impl<T: RepositoryPort + ?Sized> RepositoryPort for &T {
    fn thing(&self, id: ThingId) -> Option<Thing> {
        (**self).thing(id)
    }

    fn external_identifier_map(&self, id: ThingId) -> Option<ExternalIdentifierMap> {
        (**self).external_identifier_map(id)
    }

    fn correspondence_exists(&self, id: ThingId) -> bool {
        (**self).correspondence_exists(id)
    }

    fn current_domain(&self) -> Option<DomainOfExpertise> {
        (**self).current_domain()
    }

    fn value_set(&self, id: ThingId) -> Option<ParameterValueSet> {
        (**self).value_set(id)
    }
}
