// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Data model shared by every SimBridge crate.
//!
//! Two worlds meet here:
//!
//! - the **internal model**: typed, hierarchical engineering data (element
//!   definitions, usages, parameters, parameter types, options, states);
//! - the **external model**: flat, dynamically typed simulation variables
//!   addressed by an opaque key and carrying a recorded value history.
//!
//! Nothing in this crate performs I/O. Repository access, transport and
//! persistence are ports owned by the crates above.

mod external;
mod ids;
mod parameter_type;
mod things;

pub use external::{ExternalEntity, ExternalValue, TimeTaggedValue, Variable};
pub use ids::ThingId;
pub use parameter_type::{
    MeasurementScale, NumberSetKind, ParameterType, ParameterTypeAssignment,
    ParameterTypeComponent, ParameterTypeKind, ScalarKind,
};
pub use things::{
    ActualFiniteState, DomainOfExpertise, ElementDefinition, ElementUsage, Iteration,
    ModelOption, Parameter, ParameterContainer, ParameterOrOverride, ParameterOverride,
    ParameterValueSet, Thing, ThingKind, ValueSelectionKind,
};
