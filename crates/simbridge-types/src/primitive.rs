// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

/// Semantic primitive type shared by both resolvers.
///
/// Equality between two primitive types is the only compatibility test for
/// scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Signed integer.
    Integer,
    /// Unsigned integer.
    UnsignedInteger,
    /// Floating point number.
    Real,
    /// Boolean.
    Boolean,
    /// Date, date-time or time of day.
    Temporal,
    /// Anything else.
    Text,
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Integer => "Integer",
            Self::UnsignedInteger => "UnsignedInteger",
            Self::Real => "Real",
            Self::Boolean => "Boolean",
            Self::Temporal => "Temporal",
            Self::Text => "Text",
        };
        f.write_str(name)
    }
}
