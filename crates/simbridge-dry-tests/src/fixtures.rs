// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Constructors for model fixtures.
//!
//! Every constructor assigns fresh ids; tests compare by id, never by name.

use simbridge_model::{
    ActualFiniteState, DomainOfExpertise, ElementDefinition, ElementUsage, ExternalEntity,
    MeasurementScale, ModelOption, NumberSetKind, Parameter, ParameterOverride, ParameterType,
    ParameterTypeAssignment, ParameterTypeComponent, ParameterTypeKind, ParameterValueSet,
    ScalarKind, ThingId, TimeTaggedValue, Variable,
};

/// A domain of expertise named after `short_name`.
pub fn domain(short_name: &str) -> DomainOfExpertise {
    DomainOfExpertise {
        id: ThingId::random(),
        name: format!("{short_name} domain"),
        short_name: short_name.to_owned(),
    }
}

/// Scalar type of the given kind.
pub fn scalar(kind: ScalarKind) -> ParameterType {
    ParameterType::new("scalar", "s", ParameterTypeKind::Scalar(kind))
}

/// Boolean type.
pub fn boolean_type() -> ParameterType {
    ParameterType::new("flag", "flag", ParameterTypeKind::Scalar(ScalarKind::Boolean))
}

/// Text type.
pub fn text_type() -> ParameterType {
    ParameterType::new("label", "label", ParameterTypeKind::Scalar(ScalarKind::Text))
}

/// Date-time type.
pub fn date_time_type() -> ParameterType {
    ParameterType::new("timestamp", "ts", ParameterTypeKind::Scalar(ScalarKind::DateTime))
}

/// Quantity kind whose active scale draws from `number_set` (no scale for `None`).
pub fn quantity_kind(number_set: Option<NumberSetKind>) -> ParameterType {
    ParameterType::new(
        "quantity",
        "q",
        ParameterTypeKind::Scalar(ScalarKind::Quantity {
            scale: number_set.map(|n| MeasurementScale::new("unit", "u", n)),
        }),
    )
}

/// Enumeration allowing `values`.
pub fn enumeration(values: &[&str]) -> ParameterType {
    ParameterType::new(
        "enumeration",
        "enum",
        ParameterTypeKind::Enumeration {
            allowed_values: values.iter().map(|v| (*v).to_owned()).collect(),
        },
    )
}

fn components(types: Vec<ParameterType>) -> Vec<ParameterTypeComponent> {
    types
        .into_iter()
        .enumerate()
        .map(|(i, parameter_type)| ParameterTypeComponent {
            short_name: format!("c{i}"),
            parameter_type,
        })
        .collect()
}

/// Compound of the given component types.
pub fn compound(types: Vec<ParameterType>) -> ParameterType {
    ParameterType::new(
        "compound",
        "cmp",
        ParameterTypeKind::Compound {
            components: components(types),
        },
    )
}

/// Array of the given component types.
pub fn array(types: Vec<ParameterType>, has_single_component_type: bool) -> ParameterType {
    ParameterType::new(
        "array",
        "arr",
        ParameterTypeKind::Array {
            components: components(types),
            has_single_component_type,
        },
    )
}

/// Sampled function with the given independent and dependent axis types.
pub fn sampled_function(independent: Vec<ParameterType>, dependent: Vec<ParameterType>) -> ParameterType {
    let assign = |types: Vec<ParameterType>| -> Vec<ParameterTypeAssignment> {
        types
            .into_iter()
            .map(|parameter_type| ParameterTypeAssignment { parameter_type })
            .collect()
    };
    ParameterType::new(
        "table",
        "tbl",
        ParameterTypeKind::SampledFunction {
            independent: assign(independent),
            dependent: assign(dependent),
        },
    )
}

/// Empty element definition owned by `owner`.
pub fn element_definition(short_name: &str, owner: &DomainOfExpertise) -> ElementDefinition {
    ElementDefinition {
        id: ThingId::random(),
        name: short_name.to_owned(),
        short_name: short_name.to_owned(),
        owner: owner.id,
        parameters: Vec::new(),
        contained_elements: Vec::new(),
    }
}

/// Parameter of `parameter_type` declared on `definition`, with one value set.
pub fn parameter(definition: &ElementDefinition, parameter_type: ParameterType) -> Parameter {
    let id = ThingId::random();
    Parameter {
        id,
        parameter_type,
        scale: None,
        owner: definition.owner,
        container: definition.id,
        value_sets: vec![ParameterValueSet::new(id)],
    }
}

/// Usage of `definition` with no overrides.
pub fn element_usage(short_name: &str, definition: &ElementDefinition) -> ElementUsage {
    ElementUsage {
        id: ThingId::random(),
        name: short_name.to_owned(),
        short_name: short_name.to_owned(),
        owner: definition.owner,
        element_definition: definition.id,
        parameter_overrides: Vec::new(),
    }
}

/// Override of `parameter` on `usage`, with one value set.
pub fn parameter_override(parameter: &Parameter, usage: &ElementUsage) -> ParameterOverride {
    let id = ThingId::random();
    ParameterOverride {
        id,
        parameter: parameter.id,
        container: usage.id,
        owner: usage.owner,
        value_sets: vec![ParameterValueSet::new(id)],
    }
}

/// Design option.
pub fn option(short_name: &str) -> ModelOption {
    ModelOption {
        id: ThingId::random(),
        name: short_name.to_owned(),
        short_name: short_name.to_owned(),
    }
}

/// Actual finite state.
pub fn state(short_name: &str) -> ActualFiniteState {
    ActualFiniteState {
        id: ThingId::random(),
        name: short_name.to_owned(),
        short_name: short_name.to_owned(),
    }
}

/// Variable at `address` whose history holds `(time_step, value)` samples.
pub fn variable(address: &str, samples: &[(f64, f64)]) -> Variable {
    let recorded = samples
        .iter()
        .map(|&(step, value)| TimeTaggedValue::new(step, value))
        .collect::<Vec<_>>();
    let current = recorded.last().map(|sample| sample.value.clone());
    let mut entity = ExternalEntity::new(address, address);
    entity.value = current;
    Variable::new(entity, recorded)
}
