// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Internal-model things a correspondence may point at.

use serde::{Deserialize, Serialize};

use crate::{MeasurementScale, ParameterType, ThingId};

/// Value slot of a value set that a selection refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueSelectionKind {
    /// Value produced by a computation.
    Computed,
    /// Value entered by hand.
    Manual,
    /// Reference value.
    Reference,
}

/// Discipline that owns things in the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainOfExpertise {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
}

/// Design option of the engineering model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelOption {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
}

/// Actual finite state (a combination of possible states).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualFiniteState {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
}

/// Value set of a parameter or override, one per option/state combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterValueSet {
    /// Repository id.
    pub id: ThingId,
    /// Id of the parameter or override holding this value set.
    pub container: ThingId,
    /// Option this value set applies to, for option-dependent parameters.
    pub actual_option: Option<ThingId>,
    /// State this value set applies to, for state-dependent parameters.
    pub actual_state: Option<ThingId>,
    /// Computed values, one per cell.
    pub computed: Vec<String>,
    /// Manually entered values.
    pub manual: Vec<String>,
    /// Reference values.
    pub reference: Vec<String>,
    /// Slot currently published.
    pub value_switch: ValueSelectionKind,
}

impl ParameterValueSet {
    /// Creates an empty computed-switch value set for `container`.
    pub fn new(container: ThingId) -> Self {
        Self {
            id: ThingId::random(),
            container,
            actual_option: None,
            actual_state: None,
            computed: Vec::new(),
            manual: Vec::new(),
            reference: Vec::new(),
            value_switch: ValueSelectionKind::Computed,
        }
    }

    /// Values of the requested slot.
    pub fn values(&self, kind: ValueSelectionKind) -> &[String] {
        match kind {
            ValueSelectionKind::Computed => &self.computed,
            ValueSelectionKind::Manual => &self.manual,
            ValueSelectionKind::Reference => &self.reference,
        }
    }
}

/// Parameter declared on an element definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Repository id.
    pub id: ThingId,
    /// Declared type.
    pub parameter_type: ParameterType,
    /// Scale chosen for quantity-kind parameters.
    pub scale: Option<MeasurementScale>,
    /// Owning domain.
    pub owner: ThingId,
    /// Element definition declaring the parameter.
    pub container: ThingId,
    /// Value sets, one per option/state combination.
    pub value_sets: Vec<ParameterValueSet>,
}

/// Usage-level override of a definition parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterOverride {
    /// Repository id.
    pub id: ThingId,
    /// Parameter being overridden.
    pub parameter: ThingId,
    /// Element usage holding the override.
    pub container: ThingId,
    /// Owning domain.
    pub owner: ThingId,
    /// Value sets, one per option/state combination.
    pub value_sets: Vec<ParameterValueSet>,
}

/// Element occurrence inside another element definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementUsage {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
    /// Owning domain.
    pub owner: ThingId,
    /// Definition this usage instantiates.
    pub element_definition: ThingId,
    /// Overrides set on this usage.
    pub parameter_overrides: Vec<ParameterOverride>,
}

/// Element definition: the unit of product structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDefinition {
    /// Repository id.
    pub id: ThingId,
    /// Human readable name.
    pub name: String,
    /// Short name.
    pub short_name: String,
    /// Owning domain.
    pub owner: ThingId,
    /// Declared parameters.
    pub parameters: Vec<Parameter>,
    /// Usages of other definitions contained in this one.
    pub contained_elements: Vec<ElementUsage>,
}

/// Container an iteration-level artifact is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Iteration {
    /// Repository id.
    pub id: ThingId,
    /// Ids of correspondence maps attached to this iteration.
    pub external_identifier_maps: Vec<ThingId>,
}

/// Who holds a parameter or override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterContainer {
    /// Held by an element definition.
    ElementDefinition(ThingId),
    /// Held by an element usage.
    ElementUsage(ThingId),
}

/// Either a parameter or one of its overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParameterOrOverride {
    /// Definition-level parameter.
    Parameter(Parameter),
    /// Usage-level override.
    Override(ParameterOverride),
}

impl ParameterOrOverride {
    /// Repository id of the wrapped thing.
    pub fn id(&self) -> ThingId {
        match self {
            Self::Parameter(p) => p.id,
            Self::Override(o) => o.id,
        }
    }

    /// Holder of the wrapped thing.
    pub fn container(&self) -> ParameterContainer {
        match self {
            Self::Parameter(p) => ParameterContainer::ElementDefinition(p.container),
            Self::Override(o) => ParameterContainer::ElementUsage(o.container),
        }
    }

    /// Value sets of the wrapped thing.
    pub fn value_sets(&self) -> &[ParameterValueSet] {
        match self {
            Self::Parameter(p) => &p.value_sets,
            Self::Override(o) => &o.value_sets,
        }
    }
}

/// Discriminant of [`Thing`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThingKind {
    /// [`ElementDefinition`].
    ElementDefinition,
    /// [`ElementUsage`].
    ElementUsage,
    /// [`Parameter`].
    Parameter,
    /// [`ParameterOverride`].
    ParameterOverride,
    /// [`ParameterValueSet`].
    ParameterValueSet,
    /// [`ModelOption`].
    Option,
    /// [`ActualFiniteState`].
    ActualFiniteState,
    /// [`DomainOfExpertise`].
    DomainOfExpertise,
}

/// Any internal-model thing the repository can hand out by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Thing {
    /// An element definition.
    ElementDefinition(ElementDefinition),
    /// An element usage.
    ElementUsage(ElementUsage),
    /// A parameter.
    Parameter(Parameter),
    /// A parameter override.
    ParameterOverride(ParameterOverride),
    /// A parameter value set.
    ParameterValueSet(ParameterValueSet),
    /// A design option.
    Option(ModelOption),
    /// An actual finite state.
    ActualFiniteState(ActualFiniteState),
    /// A domain of expertise.
    DomainOfExpertise(DomainOfExpertise),
}

impl Thing {
    /// Repository id of the wrapped thing.
    pub fn id(&self) -> ThingId {
        match self {
            Self::ElementDefinition(t) => t.id,
            Self::ElementUsage(t) => t.id,
            Self::Parameter(t) => t.id,
            Self::ParameterOverride(t) => t.id,
            Self::ParameterValueSet(t) => t.id,
            Self::Option(t) => t.id,
            Self::ActualFiniteState(t) => t.id,
            Self::DomainOfExpertise(t) => t.id,
        }
    }

    /// Discriminant of the wrapped thing.
    pub fn kind(&self) -> ThingKind {
        match self {
            Self::ElementDefinition(_) => ThingKind::ElementDefinition,
            Self::ElementUsage(_) => ThingKind::ElementUsage,
            Self::Parameter(_) => ThingKind::Parameter,
            Self::ParameterOverride(_) => ThingKind::ParameterOverride,
            Self::ParameterValueSet(_) => ThingKind::ParameterValueSet,
            Self::Option(_) => ThingKind::Option,
            Self::ActualFiniteState(_) => ThingKind::ActualFiniteState,
            Self::DomainOfExpertise(_) => ThingKind::DomainOfExpertise,
        }
    }
}
