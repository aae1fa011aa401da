// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for SimBridge crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`diagnostics`] - Diagnostics sink that records every report
//! - [`fixtures`] - Parameter type, element and variable constructors
//! - [`repository`] - In-memory repository implementing `RepositoryPort`

pub mod config;
pub mod diagnostics;
pub mod fixtures;
pub mod repository;

pub use config::InMemoryConfigStore;
pub use diagnostics::RecordingDiagnostics;
pub use repository::InMemoryRepository;
