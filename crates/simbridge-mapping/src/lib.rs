// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Correspondence maps between internal things and external identifiers.
//!
//! A correspondence map ([`ExternalIdentifierMap`]) is a named repository
//! artifact holding an ordered list of [`IdCorrespondence`] records. Each
//! record links an internal thing id to a serialized [`ExternalIdentifier`].
//! The text is opaque to the repository; only this crate reads it.
//!
//! [`MappingConfiguration`] owns the current map together with its
//! [`ParsedIndex`]. The index is rebuilt whenever the map is reassigned
//! (see [`MappingConfiguration::set_map`]) and drives:
//!
//! - reconstruction of mapping proposals in both directions,
//! - appending new correspondences when a mapping is confirmed,
//! - restoring saved value selections on variables,
//! - staging the map into a repository transaction.
//!
//! The engine is synchronous and performs no I/O of its own. Repository
//! access goes through [`RepositoryPort`].

mod correspondence;
mod engine;
mod error;
mod identifier;
mod index;
mod proposal;
mod repository;
mod transaction;

pub use correspondence::{ExternalIdentifierMap, IdCorrespondence};
pub use engine::{EngineOptions, MappingConfiguration, ValueSelectionEntry};
pub use error::MappingError;
pub use identifier::{ExternalIdentifier, MappingDirection, ValueIndex};
pub use index::{IndexedCorrespondence, ParsedIndex};
pub use proposal::{ExternalToInternalProposal, InternalToExternalProposal};
pub use repository::RepositoryPort;
pub use transaction::{StagedOperation, StagedTransaction};
