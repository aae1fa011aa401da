// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use simbridge_model::ThingId;

/// Errors raised while resolving a parameter type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeResolutionError {
    /// The structured resolver only handles scalar-reducible types.
    #[error("unsupported type: {kind} '{short_name}' ({id}) does not denote a primitive type")]
    UnsupportedType {
        /// Id of the offending type.
        id: ThingId,
        /// Short name of the offending type.
        short_name: String,
        /// Variant name of the offending type.
        kind: &'static str,
    },
}
