// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted settings for SimBridge tools.
//!
//! [`BridgeSettings`] is read and written through a [`ConfigService`], which
//! delegates storage to any [`ConfigStore`] adapter.

pub mod settings;
pub mod store;

pub use settings::{BridgeSettings, DiagnosticsSettings, MappingSettings};
pub use store::{check_key, ConfigError, ConfigService, ConfigStore};
