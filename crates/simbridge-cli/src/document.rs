// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Correspondence map documents on disk and the repository view over them.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use simbridge_mapping::{ExternalIdentifierMap, RepositoryPort};
use simbridge_model::{DomainOfExpertise, Thing, ThingId};

/// Repository backed by a single map document.
///
/// A document carries no engineering model, so thing lookups always miss.
/// Records persisted in the document are live; the acting domain is the
/// map owner unless one is given explicitly.
pub struct DocumentRepository {
    owner: ThingId,
    live: HashSet<ThingId>,
}

impl DocumentRepository {
    pub fn for_owner(owner: ThingId) -> Self {
        Self {
            owner,
            live: HashSet::new(),
        }
    }

    pub fn for_map(map: &ExternalIdentifierMap) -> Self {
        Self {
            owner: map.owner,
            live: map
                .correspondences
                .iter()
                .filter(|record| record.is_persisted())
                .map(|record| record.id)
                .collect(),
        }
    }
}

impl RepositoryPort for DocumentRepository {
    fn thing(&self, _id: ThingId) -> Option<Thing> {
        None
    }

    fn external_identifier_map(&self, _id: ThingId) -> Option<ExternalIdentifierMap> {
        None
    }

    fn correspondence_exists(&self, id: ThingId) -> bool {
        self.live.contains(&id)
    }

    fn current_domain(&self) -> Option<DomainOfExpertise> {
        (!self.owner.is_nil()).then(|| DomainOfExpertise {
            id: self.owner,
            name: String::new(),
            short_name: String::new(),
        })
    }
}

pub fn read_map(path: &Path) -> Result<ExternalIdentifierMap> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("{} is not a correspondence map", path.display()))
}

pub fn write_map(path: &Path, map: &ExternalIdentifierMap) -> Result<()> {
    let mut json = serde_json::to_string_pretty(map)?;
    json.push('\n');
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
