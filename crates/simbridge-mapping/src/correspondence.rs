// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted correspondence records and the map that owns them.

use serde::{Deserialize, Serialize};
use simbridge_model::ThingId;

use crate::ExternalIdentifier;

/// One persisted link between an internal thing and an external identifier.
///
/// `id` stays nil until the enclosing map is persisted; afterwards it is
/// stable and tells "update" apart from "create" on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdCorrespondence {
    /// Repository id, nil while transient.
    pub id: ThingId,
    /// Internal thing the record points at (nil for value-index markers).
    pub internal_thing: ThingId,
    /// Serialized [`ExternalIdentifier`].
    pub external_id: String,
}

impl IdCorrespondence {
    /// Creates a transient record from an already serialized identifier.
    pub fn new(internal_thing: ThingId, external_id: impl Into<String>) -> Self {
        Self {
            id: ThingId::NIL,
            internal_thing,
            external_id: external_id.into(),
        }
    }

    /// Creates a transient record, serializing `identifier`.
    pub fn from_identifier(
        internal_thing: ThingId,
        identifier: &ExternalIdentifier,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self::new(internal_thing, identifier.to_json()?))
    }

    /// Returns `true` once the record has a repository id.
    pub fn is_persisted(&self) -> bool {
        !self.id.is_nil()
    }
}

/// Named, owned, ordered collection of correspondence records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalIdentifierMap {
    /// Repository id, nil for the transient default map.
    pub id: ThingId,
    /// User-facing name.
    pub name: String,
    /// Owning domain of expertise.
    pub owner: ThingId,
    /// Records in insertion order.
    #[serde(default)]
    pub correspondences: Vec<IdCorrespondence>,
}

impl ExternalIdentifierMap {
    /// Creates an empty, not yet persisted map.
    pub fn new(name: impl Into<String>, owner: ThingId) -> Self {
        Self {
            id: ThingId::NIL,
            name: name.into(),
            owner,
            correspondences: Vec::new(),
        }
    }

    /// Creates the transient default map used before the user picks one.
    pub fn new_temporary(owner: ThingId) -> Self {
        Self::new("", owner)
    }

    /// Returns `true` for a map the repository has never stored.
    pub fn is_temporary(&self) -> bool {
        self.id.is_nil()
    }

    /// Returns `true` when the map has no records.
    pub fn is_empty(&self) -> bool {
        self.correspondences.is_empty()
    }
}
