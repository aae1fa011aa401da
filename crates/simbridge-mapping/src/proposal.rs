// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Direction-specific mapping proposals rebuilt from a correspondence map.

use simbridge_model::{
    ActualFiniteState, ElementDefinition, ElementUsage, ExternalEntity, ModelOption, Parameter,
    ParameterType, ParameterValueSet, ThingId, ValueSelectionKind,
};

use crate::IdCorrespondence;

/// Binds one value of an internal value set to an external variable.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalToExternalProposal {
    /// Value set the value is read from.
    pub value_set: ParameterValueSet,
    /// Parameter or override holding the value set.
    pub parameter_id: ThingId,
    /// Position of the value within the value set.
    pub value_index: i64,
    /// Slot of the value set the index refers to.
    pub value_selection_kind: Option<ValueSelectionKind>,
    /// Variable receiving the value.
    pub external: ExternalEntity,
}

/// Binds an external variable to an element/parameter/option/state chain.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalToInternalProposal {
    /// Variable the values come from.
    pub external: ExternalEntity,
    /// Target element definition.
    pub selected_element_definition: Option<ElementDefinition>,
    /// Usages of the target element the values also apply to.
    pub selected_element_usages: Vec<ElementUsage>,
    /// Target parameter.
    pub selected_parameter: Option<Parameter>,
    /// Type of the target parameter.
    pub selected_parameter_type: Option<ParameterType>,
    /// Option the values apply to.
    pub selected_option: Option<ModelOption>,
    /// State the values apply to.
    pub selected_state: Option<ActualFiniteState>,
    /// Records the proposal was rebuilt from.
    pub correspondences: Vec<IdCorrespondence>,
}

impl ExternalToInternalProposal {
    /// Creates an empty proposal for `external`.
    pub fn new(external: ExternalEntity) -> Self {
        Self {
            external,
            selected_element_definition: None,
            selected_element_usages: Vec::new(),
            selected_parameter: None,
            selected_parameter_type: None,
            selected_option: None,
            selected_state: None,
            correspondences: Vec::new(),
        }
    }

    /// Sets the target parameter and mirrors its type.
    pub fn select_parameter(&mut self, parameter: Parameter) {
        self.selected_parameter_type = Some(parameter.parameter_type.clone());
        self.selected_parameter = Some(parameter);
    }

    /// Returns `true` when the proposal names a target to write into.
    pub fn is_complete(&self) -> bool {
        self.selected_parameter.is_some() || self.selected_element_definition.is_some()
    }
}
