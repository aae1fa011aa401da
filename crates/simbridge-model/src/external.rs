// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! External (simulation-side) values and variables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamically typed value read from the simulation.
///
/// Values arriving as text keep the [`ExternalValue::Text`] variant until a
/// resolver classifies them; nothing here parses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ExternalValue {
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer.
    UnsignedInteger(u64),
    /// Floating point number.
    Real(f64),
    /// Boolean.
    Boolean(bool),
    /// Point in time.
    Temporal(DateTime<Utc>),
    /// Text, possibly holding a literal of another type.
    Text(String),
}

impl std::fmt::Display for ExternalValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::UnsignedInteger(v) => write!(f, "{v}"),
            Self::Real(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Temporal(v) => write!(f, "{}", v.to_rfc3339()),
            Self::Text(v) => f.write_str(v),
        }
    }
}

impl From<&str> for ExternalValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ExternalValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ExternalValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for ExternalValue {
    fn from(value: u64) -> Self {
        Self::UnsignedInteger(value)
    }
}

impl From<f64> for ExternalValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for ExternalValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime<Utc>> for ExternalValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Temporal(value)
    }
}

/// A simulation entity known to the data-source adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalEntity {
    /// Opaque address of the entity (the variable's node key).
    pub address: String,
    /// Display name.
    pub name: String,
    /// Current value, when one has been read.
    pub value: Option<ExternalValue>,
}

impl ExternalEntity {
    /// Creates an entity without a current value.
    pub fn new(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            name: name.into(),
            value: None,
        }
    }

    /// Sets the current value.
    pub fn with_value(mut self, value: impl Into<ExternalValue>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// One recorded sample of a variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeTaggedValue {
    /// Simulation time step the value was recorded at.
    pub time_step: f64,
    /// Recorded value.
    pub value: ExternalValue,
}

impl TimeTaggedValue {
    /// Creates a sample.
    pub fn new(time_step: f64, value: impl Into<ExternalValue>) -> Self {
        Self {
            time_step,
            value: value.into(),
        }
    }
}

/// A mappable simulation variable with its recorded history.
///
/// `selected_values` is caller-visible state: the mapping engine clears and
/// repopulates it when restoring a saved value selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    /// The entity this variable reads from.
    pub entity: ExternalEntity,
    /// Every recorded sample, in recording order.
    pub recorded_values: Vec<TimeTaggedValue>,
    /// Samples chosen for transfer.
    pub selected_values: Vec<TimeTaggedValue>,
}

impl Variable {
    /// Creates a variable with the given history and no selection.
    pub fn new(entity: ExternalEntity, recorded_values: Vec<TimeTaggedValue>) -> Self {
        Self {
            entity,
            recorded_values,
            selected_values: Vec::new(),
        }
    }

    /// External address of the variable.
    pub fn address(&self) -> &str {
        &self.entity.address
    }
}
