// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Recursive compatibility between internal parameter types and external values.

use simbridge_model::{ExternalValue, ParameterType, ParameterTypeAssignment, ParameterTypeComponent, ParameterTypeKind};

use crate::diagnostics::{DiagnosticsPort, TracingDiagnostics};
use crate::{PrimitiveType, StructuredTypeResolver, ValueTypeResolver};

/// Decides whether a parameter type accepts an external value.
///
/// The answer is "could at least one slot of this type hold the value":
///
/// | variant          | compatible when                                              |
/// |------------------|--------------------------------------------------------------|
/// | scalar           | both resolvers agree on the primitive type                   |
/// | array            | the first component matches (single component type), else any |
/// | compound         | any component matches                                        |
/// | enumeration      | an allowed name equals the value text, ignoring case         |
/// | sampled function | one text/quantity independent axis, one matching dependent axis |
///
/// Resolution failures never escape: they are reported and answered `false`.
#[derive(Debug, Clone, Default)]
pub struct CompatibilityChecker<D = TracingDiagnostics> {
    diagnostics: D,
}

impl<D: DiagnosticsPort> CompatibilityChecker<D> {
    /// Creates a checker reporting to `diagnostics`.
    pub fn new(diagnostics: D) -> Self {
        Self { diagnostics }
    }

    /// Returns `true` when `parameter_type` could hold `value`.
    ///
    /// A missing type or value is never compatible and is reported as a
    /// warning.
    pub fn are_compatible(
        &self,
        parameter_type: Option<&ParameterType>,
        value: Option<&ExternalValue>,
    ) -> bool {
        let (Some(parameter_type), Some(value)) = (parameter_type, value) else {
            self.diagnostics.warn(&format!(
                "compatibility check skipped: parameter type present = {}, value present = {}",
                parameter_type.is_some(),
                value.is_some()
            ));
            return false;
        };

        self.check(parameter_type, value)
    }

    fn check(&self, parameter_type: &ParameterType, value: &ExternalValue) -> bool {
        match &parameter_type.kind {
            ParameterTypeKind::Scalar(_) => self.check_scalar(parameter_type, value),
            ParameterTypeKind::Array {
                components,
                has_single_component_type,
            } => self.check_array(components, *has_single_component_type, value),
            ParameterTypeKind::Compound { components } => self.any_component(components, value),
            ParameterTypeKind::Enumeration { allowed_values } => {
                let text = value.to_string().to_lowercase();
                allowed_values.iter().any(|allowed| allowed.to_lowercase() == text)
            }
            ParameterTypeKind::SampledFunction {
                independent,
                dependent,
            } => self.check_sampled_function(independent, dependent, value),
        }
    }

    fn check_scalar(&self, parameter_type: &ParameterType, value: &ExternalValue) -> bool {
        match StructuredTypeResolver::resolve(parameter_type) {
            Ok(expected) => {
                expected == ValueTypeResolver::new(&self.diagnostics).resolve_from_value(value)
            }
            Err(err) => {
                self.diagnostics.error(&err.to_string());
                false
            }
        }
    }

    fn check_array(
        &self,
        components: &[ParameterTypeComponent],
        has_single_component_type: bool,
        value: &ExternalValue,
    ) -> bool {
        match components.first() {
            None => false,
            Some(first) if has_single_component_type => self.check(&first.parameter_type, value),
            Some(_) => self.any_component(components, value),
        }
    }

    fn any_component(&self, components: &[ParameterTypeComponent], value: &ExternalValue) -> bool {
        components
            .iter()
            .any(|component| self.check(&component.parameter_type, value))
    }

    fn check_sampled_function(
        &self,
        independent: &[ParameterTypeAssignment],
        dependent: &[ParameterTypeAssignment],
        value: &ExternalValue,
    ) -> bool {
        let ([independent], [dependent]) = (independent, dependent) else {
            return false;
        };

        let independent_type = &independent.parameter_type;
        let independent_ok = match StructuredTypeResolver::resolve(independent_type) {
            Ok(PrimitiveType::Text) => true,
            Ok(_) => independent_type.is_quantity_kind(),
            Err(err) => {
                self.diagnostics.error(&err.to_string());
                false
            }
        };

        independent_ok && self.check(&dependent.parameter_type, value)
    }
}
