// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Persisted bridge settings.

use serde::{Deserialize, Serialize};
use simbridge_mapping::EngineOptions;

use crate::store::{ConfigError, ConfigService, ConfigStore};

/// Saved settings for a bridge session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BridgeSettings {
    /// Correspondence map behaviour.
    pub mapping: MappingSettings,
    /// Logging behaviour.
    pub diagnostics: DiagnosticsSettings,
}

impl BridgeSettings {
    /// Key the settings are stored under.
    pub const KEY: &'static str = "settings";

    /// Loads the stored settings, falling back to defaults when none exist.
    pub fn load_or_default<S: ConfigStore>(service: &ConfigService<S>) -> Result<Self, ConfigError> {
        service.load_or_default(Self::KEY)
    }

    /// Persists the settings.
    pub fn save<S: ConfigStore>(&self, service: &ConfigService<S>) -> Result<(), ConfigError> {
        service.save(Self::KEY, self)
    }

    /// Engine switches derived from these settings.
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            deduplicate_on_update: self.mapping.deduplicate_on_update,
        }
    }
}

/// Correspondence map settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingSettings {
    /// Name proposed for a newly created map.
    pub default_map_name: String,
    /// Seed new maps with the records of the transient map.
    pub carry_over_temporary: bool,
    /// Drop the duplicate append after an in-place correspondence update.
    pub deduplicate_on_update: bool,
}

impl Default for MappingSettings {
    fn default() -> Self {
        Self {
            default_map_name: "Default mapping".into(),
            carry_over_temporary: true,
            deduplicate_on_update: false,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosticsSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for DiagnosticsSettings {
    fn default() -> Self {
        Self {
            log_filter: "info".into(),
        }
    }
}
