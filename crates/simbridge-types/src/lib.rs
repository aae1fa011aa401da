// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Type resolution on both sides of the bridge.
//!
//! - [`ValueTypeResolver`] classifies a raw external value (native scalar or
//!   text literal) into a [`PrimitiveType`].
//! - [`StructuredTypeResolver`] maps a scalar internal parameter type to the
//!   [`PrimitiveType`] it denotes.
//! - [`CompatibilityChecker`] recursively decides whether an internal
//!   parameter type could hold a given external value.
//!
//! # Weak structural compatibility
//!
//! Structured types (compound, array, sampled function) are judged against a
//! *single* external value: a structure is compatible when at least one of
//! its slots could hold the value. This is an approximation used to narrow
//! candidate parameter types per sample, not a full record match.

mod compatibility;
mod diagnostics;
mod error;
mod primitive;
mod structured;
mod value;

pub use compatibility::CompatibilityChecker;
pub use diagnostics::{DiagnosticLevel, DiagnosticsPort, TracingDiagnostics};
pub use error::TypeResolutionError;
pub use primitive::PrimitiveType;
pub use structured::StructuredTypeResolver;
pub use value::ValueTypeResolver;
