// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Primitive type denoted by a scalar parameter type.

use simbridge_model::{NumberSetKind, ParameterType, ParameterTypeKind, ScalarKind};

use crate::{PrimitiveType, TypeResolutionError};

/// Maps scalar parameter types to primitive types.
///
/// Only scalar leaves are accepted. Enumerations, compounds, arrays and
/// sampled functions are wrappers the caller must unpack first; passing one
/// yields [`TypeResolutionError::UnsupportedType`].
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuredTypeResolver;

impl StructuredTypeResolver {
    /// Resolves `parameter_type`.
    ///
    /// A quantity kind resolves by its active scale: integer scale to
    /// `Integer`, natural scale to `UnsignedInteger`, anything else
    /// (rational, real, or no scale at all) to `Real`.
    pub fn resolve(parameter_type: &ParameterType) -> Result<PrimitiveType, TypeResolutionError> {
        match &parameter_type.kind {
            ParameterTypeKind::Scalar(scalar) => Ok(Self::resolve_scalar(scalar)),
            ParameterTypeKind::Enumeration { .. }
            | ParameterTypeKind::Compound { .. }
            | ParameterTypeKind::Array { .. }
            | ParameterTypeKind::SampledFunction { .. } => Err(TypeResolutionError::UnsupportedType {
                id: parameter_type.id,
                short_name: parameter_type.short_name.clone(),
                kind: parameter_type.kind_name(),
            }),
        }
    }

    fn resolve_scalar(scalar: &ScalarKind) -> PrimitiveType {
        match scalar {
            ScalarKind::Boolean => PrimitiveType::Boolean,
            ScalarKind::Text => PrimitiveType::Text,
            ScalarKind::Date | ScalarKind::DateTime | ScalarKind::TimeOfDay => PrimitiveType::Temporal,
            ScalarKind::Quantity { scale } => match scale.as_ref().map(|s| s.number_set) {
                Some(NumberSetKind::Integer) => PrimitiveType::Integer,
                Some(NumberSetKind::Natural) => PrimitiveType::UnsignedInteger,
                Some(NumberSetKind::Rational | NumberSetKind::Real) | None => PrimitiveType::Real,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simbridge_model::{MeasurementScale, ParameterTypeComponent};

    fn quantity(number_set: Option<NumberSetKind>) -> ParameterType {
        ParameterType::new(
            "length",
            "l",
            ParameterTypeKind::Scalar(ScalarKind::Quantity {
                scale: number_set.map(|n| MeasurementScale::new("metre", "m", n)),
            }),
        )
    }

    #[test]
    fn quantity_kind_follows_its_scale() {
        let cases = [
            (Some(NumberSetKind::Integer), PrimitiveType::Integer),
            (Some(NumberSetKind::Natural), PrimitiveType::UnsignedInteger),
            (Some(NumberSetKind::Rational), PrimitiveType::Real),
            (Some(NumberSetKind::Real), PrimitiveType::Real),
            (None, PrimitiveType::Real),
        ];
        for (number_set, expected) in cases {
            assert_eq!(
                StructuredTypeResolver::resolve(&quantity(number_set)),
                Ok(expected),
                "{number_set:?}"
            );
        }
    }

    #[test]
    fn temporal_scalars_collapse_to_temporal() {
        for scalar in [ScalarKind::Date, ScalarKind::DateTime, ScalarKind::TimeOfDay] {
            let pt = ParameterType::new("when", "t", ParameterTypeKind::Scalar(scalar));
            assert_eq!(StructuredTypeResolver::resolve(&pt), Ok(PrimitiveType::Temporal));
        }
    }

    #[test]
    fn compound_is_unsupported() {
        let pt = ParameterType::new(
            "vector",
            "v",
            ParameterTypeKind::Compound {
                components: vec![ParameterTypeComponent {
                    short_name: "x".into(),
                    parameter_type: quantity(None),
                }],
            },
        );
        let err = StructuredTypeResolver::resolve(&pt).unwrap_err();
        match err {
            TypeResolutionError::UnsupportedType { id, kind, .. } => {
                assert_eq!(id, pt.id);
                assert_eq!(kind, "CompoundParameterType");
            }
        }
    }
}
