// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Parameter type declarations of the internal model.
//!
//! The type hierarchy is closed: every declaration is one of the
//! [`ParameterTypeKind`] variants and consumers match it exhaustively.
//! A parameter type is immutable once a mapping references it; changing its
//! structure means declaring a new type with a new id.

use serde::{Deserialize, Serialize};

use crate::ThingId;

/// Number set a measurement scale draws its values from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NumberSetKind {
    /// Signed integers.
    Integer,
    /// Non-negative integers.
    Natural,
    /// Rational numbers.
    Rational,
    /// Real numbers.
    Real,
}

/// Measurement scale attached to a quantity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeasurementScale {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name (e.g. "metre").
    pub name: String,
    /// Short name (e.g. "m").
    pub short_name: String,
    /// Number set of the scale values.
    pub number_set: NumberSetKind,
}

impl MeasurementScale {
    /// Creates a scale with a fresh id.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>, number_set: NumberSetKind) -> Self {
        Self {
            id: ThingId::random(),
            name: name.into(),
            short_name: short_name.into(),
            number_set,
        }
    }
}

/// Scalar parameter type variants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalarKind {
    /// `true` / `false`.
    Boolean,
    /// Free text.
    Text,
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Time of day without a date.
    TimeOfDay,
    /// Physical quantity; `scale` is the active measurement scale, if any.
    Quantity {
        /// Active scale selected for the quantity kind.
        scale: Option<MeasurementScale>,
    },
}

/// Named component of a compound or array parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterTypeComponent {
    /// Component short name, unique within its parent type.
    pub short_name: String,
    /// Type held by the component.
    pub parameter_type: ParameterType,
}

/// Independent or dependent axis of a sampled function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterTypeAssignment {
    /// Type of the axis.
    pub parameter_type: ParameterType,
}

/// Structural variant of a parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterTypeKind {
    /// Single value.
    Scalar(ScalarKind),
    /// One of a fixed set of names, compared case-insensitively.
    Enumeration {
        /// Allowed value names.
        allowed_values: Vec<String>,
    },
    /// Ordered record of named components.
    Compound {
        /// Components in declaration order.
        components: Vec<ParameterTypeComponent>,
    },
    /// Array of cells, each cell typed by a component.
    Array {
        /// Components in cell order.
        components: Vec<ParameterTypeComponent>,
        /// All cells share the type of the first component.
        has_single_component_type: bool,
    },
    /// Table of samples mapping independent values to dependent values.
    SampledFunction {
        /// Independent axes.
        independent: Vec<ParameterTypeAssignment>,
        /// Dependent axes.
        dependent: Vec<ParameterTypeAssignment>,
    },
}

/// A parameter type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterType {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
    /// Structure of the type.
    pub kind: ParameterTypeKind,
}

impl ParameterType {
    /// Creates a type with a fresh id.
    pub fn new(name: impl Into<String>, short_name: impl Into<String>, kind: ParameterTypeKind) -> Self {
        Self {
            id: ThingId::random(),
            name: name.into(),
            short_name: short_name.into(),
            kind,
        }
    }

    /// Name of the structural variant, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ParameterTypeKind::Scalar(ScalarKind::Boolean) => "BooleanParameterType",
            ParameterTypeKind::Scalar(ScalarKind::Text) => "TextParameterType",
            ParameterTypeKind::Scalar(ScalarKind::Date) => "DateParameterType",
            ParameterTypeKind::Scalar(ScalarKind::DateTime) => "DateTimeParameterType",
            ParameterTypeKind::Scalar(ScalarKind::TimeOfDay) => "TimeOfDayParameterType",
            ParameterTypeKind::Scalar(ScalarKind::Quantity { .. }) => "QuantityKind",
            ParameterTypeKind::Enumeration { .. } => "EnumerationParameterType",
            ParameterTypeKind::Compound { .. } => "CompoundParameterType",
            ParameterTypeKind::Array { .. } => "ArrayParameterType",
            ParameterTypeKind::SampledFunction { .. } => "SampledFunctionParameterType",
        }
    }

    /// Returns `true` for a quantity kind, whatever its scale.
    pub fn is_quantity_kind(&self) -> bool {
        matches!(self.kind, ParameterTypeKind::Scalar(ScalarKind::Quantity { .. }))
    }
}

impl std::fmt::Display for ParameterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}' ({})", self.kind_name(), self.short_name, self.id)
    }
}
