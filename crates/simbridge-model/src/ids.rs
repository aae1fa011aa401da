// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Identifier types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed identifier for any internal-model thing.
///
/// The nil id is reserved: a thing carrying it has never been persisted by
/// the repository (a transient map, a freshly created correspondence, or a
/// pure value-index marker with no internal counterpart).
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThingId(pub Uuid);

impl ThingId {
    /// The reserved "not yet persisted" id.
    pub const NIL: Self = Self(Uuid::nil());

    /// Generates a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns `true` for the reserved nil id.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for ThingId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for ThingId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ThingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
