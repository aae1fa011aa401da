// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use simbridge_model::ThingId;

/// Errors raised by the mapping engine.
///
/// Lookup misses are not errors; they surface as skipped records.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    /// A persisted correspondence payload could not be deserialized.
    /// Fatal for the whole map load.
    #[error("malformed correspondence {record_id}: {source}")]
    MalformedCorrespondence {
        /// Id of the record carrying the corrupt payload (nil when transient).
        record_id: ThingId,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },
    /// An external identifier could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The repository no longer knows the map.
    #[error("correspondence map {0} not found")]
    MapNotFound(ThingId),
    /// No current domain of expertise to own a new map.
    #[error("no current domain of expertise")]
    MissingDomain,
}
