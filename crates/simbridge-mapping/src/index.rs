// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parsed working index over a correspondence map.

use indexmap::IndexMap;
use simbridge_model::ThingId;

use crate::{ExternalIdentifier, ExternalIdentifierMap, MappingDirection, MappingError, ValueIndex};

/// One deserialized record.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedCorrespondence {
    /// Internal thing the record points at.
    pub internal_id: ThingId,
    /// Parsed external leg.
    pub identifier: ExternalIdentifier,
    /// Repository id of the record (nil while transient).
    pub record_id: ThingId,
    /// Position of the record in the map it was parsed from.
    pub position: usize,
}

/// Every record of a map, deserialized once.
///
/// The index is a snapshot: it describes the map it was built from and is
/// rebuilt whenever the owner reassigns its map. Records appended to the
/// map afterwards are not visible until the next rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedIndex {
    entries: Vec<IndexedCorrespondence>,
}

impl ParsedIndex {
    /// Deserializes every record of `map`.
    ///
    /// A single malformed payload fails the whole parse.
    pub fn parse(map: &ExternalIdentifierMap) -> Result<Self, MappingError> {
        let entries = map
            .correspondences
            .iter()
            .enumerate()
            .map(|(position, record)| {
                let identifier = ExternalIdentifier::from_json(&record.external_id).map_err(|source| {
                    MappingError::MalformedCorrespondence {
                        record_id: record.id,
                        source,
                    }
                })?;
                Ok(IndexedCorrespondence {
                    internal_id: record.internal_thing,
                    identifier,
                    record_id: record.id,
                    position,
                })
            })
            .collect::<Result<Vec<_>, MappingError>>()?;

        Ok(Self { entries })
    }

    /// Number of indexed records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Indexed records in map order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexedCorrespondence> + '_ {
        self.entries.iter()
    }

    /// Groups the records of one direction by external identifier, keeping
    /// first-appearance order for both groups and members.
    pub fn group_by_identifier(
        &self,
        direction: MappingDirection,
    ) -> IndexMap<&str, Vec<&IndexedCorrespondence>> {
        let mut groups: IndexMap<&str, Vec<&IndexedCorrespondence>> = IndexMap::new();
        for entry in self
            .entries
            .iter()
            .filter(|e| e.identifier.mapping_direction == direction)
        {
            groups
                .entry(entry.identifier.identifier.as_str())
                .or_default()
                .push(entry);
        }
        groups
    }

    /// First record linking `internal_id` to the same external identifier
    /// and direction as `identifier`.
    pub fn find(
        &self,
        internal_id: ThingId,
        identifier: &ExternalIdentifier,
    ) -> Option<&IndexedCorrespondence> {
        self.entries.iter().find(|e| {
            e.internal_id == internal_id
                && e.identifier.identifier == identifier.identifier
                && e.identifier.mapping_direction == identifier.mapping_direction
        })
    }

    /// Like [`find`](Self::find), but the value index must match as well.
    ///
    /// Value selections share one nil internal id across every sample, so
    /// only the value index tells their records apart.
    pub fn find_exact(
        &self,
        internal_id: ThingId,
        identifier: &ExternalIdentifier,
    ) -> Option<&IndexedCorrespondence> {
        self.entries.iter().find(|e| {
            e.internal_id == internal_id
                && e.identifier.identifier == identifier.identifier
                && e.identifier.mapping_direction == identifier.mapping_direction
                && e.identifier.value_index == identifier.value_index
        })
    }

    /// Distinct value indices recorded for `identifier`, in map order.
    ///
    /// Indices that address the same time step count as one, whatever their
    /// encoding: `1`, `1.0` and `"1"` keep only the first seen.
    pub fn distinct_value_indices(&self, identifier: &str) -> Vec<ValueIndex> {
        let mut indices: Vec<ValueIndex> = Vec::new();
        for index in self
            .entries
            .iter()
            .filter(|e| e.identifier.identifier == identifier)
            .filter_map(|e| e.identifier.value_index.as_ref())
        {
            if !indices.iter().any(|seen| same_position(seen, index)) {
                indices.push(index.clone());
            }
        }
        indices
    }
}

fn same_position(a: &ValueIndex, b: &ValueIndex) -> bool {
    match (a.as_time_step(), b.as_time_step()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}
