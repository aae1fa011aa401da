// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! One external leg of a correspondence.

use serde::{Deserialize, Serialize};
use simbridge_model::ValueSelectionKind;

/// Which side drives value propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MappingDirection {
    /// Internal values are written to the simulation.
    InternalToExternal,
    /// Simulation values are written to the internal model.
    ExternalToInternal,
}

impl std::fmt::Display for MappingDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::InternalToExternal => "InternalToExternal",
            Self::ExternalToInternal => "ExternalToInternal",
        })
    }
}

/// Position of one value within a time series or multi-valued slot.
///
/// Persisted maps carry whatever the writer stored: an ordinal, a
/// simulation time step, or a textual index. Readers ask for the
/// interpretation they need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueIndex {
    /// Integer ordinal.
    Ordinal(i64),
    /// Simulation time step.
    TimeStep(f64),
    /// Any other textual index.
    Label(String),
}

impl ValueIndex {
    /// Integer reading of the index, when it has one.
    ///
    /// A time step qualifies only when it has no fractional part; a label
    /// only when it parses as an integer.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_ordinal(&self) -> Option<i64> {
        match self {
            Self::Ordinal(value) => Some(*value),
            Self::TimeStep(value) => {
                let in_range = value.is_finite()
                    && value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64;
                in_range.then_some(*value as i64)
            }
            Self::Label(text) => text.trim().parse().ok(),
        }
    }

    /// Time-step reading of the index, used to match recorded samples.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_time_step(&self) -> Option<f64> {
        match self {
            Self::Ordinal(value) => Some(*value as f64),
            Self::TimeStep(value) => Some(*value),
            Self::Label(text) => text.trim().parse().ok(),
        }
    }
}

impl std::fmt::Display for ValueIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ordinal(value) => write!(f, "{value}"),
            Self::TimeStep(value) => write!(f, "{value}"),
            Self::Label(value) => f.write_str(value),
        }
    }
}

/// External leg of a correspondence, stored verbatim as JSON inside each
/// [`IdCorrespondence`](crate::IdCorrespondence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExternalIdentifier {
    /// Opaque external address (the variable's node key).
    pub identifier: String,
    /// Direction of the mapping this leg belongs to.
    pub mapping_direction: MappingDirection,
    /// Index into a time/array series, for value-level correspondences.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_index: Option<ValueIndex>,
    /// Value slot the index refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_selection_kind: Option<ValueSelectionKind>,
}

impl ExternalIdentifier {
    /// Creates an identifier without value addressing.
    pub fn new(identifier: impl Into<String>, mapping_direction: MappingDirection) -> Self {
        Self {
            identifier: identifier.into(),
            mapping_direction,
            value_index: None,
            value_selection_kind: None,
        }
    }

    /// Adds a value index.
    pub fn with_value_index(mut self, value_index: ValueIndex) -> Self {
        self.value_index = Some(value_index);
        self
    }

    /// Adds a value selection kind.
    pub fn with_selection_kind(mut self, kind: ValueSelectionKind) -> Self {
        self.value_selection_kind = Some(kind);
        self
    }

    /// Serializes to the persisted text form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses the persisted text form.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}
