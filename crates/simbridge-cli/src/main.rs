// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(clippy::print_stdout, clippy::print_stderr)]
//! SimBridge developer CLI.
//!
//! Tries the value resolver, checks a value against a parameter type, and
//! reads or edits correspondence map documents.

mod document;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::Table;
use serde::Serialize;
use simbridge_config::{BridgeSettings, ConfigService};
use simbridge_config_fs::FsConfigStore;
use simbridge_mapping::{
    ExternalIdentifier, MappingConfiguration, MappingDirection, ParsedIndex, RepositoryPort,
    StagedTransaction, ValueIndex,
};
use simbridge_model::{ExternalValue, Iteration, ParameterType, ThingId, ValueSelectionKind};
use simbridge_types::{CompatibilityChecker, TracingDiagnostics, ValueTypeResolver};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::document::{read_map, write_map, DocumentRepository};

#[derive(Parser, Debug)]
#[command(name = "simbridge", author, version, about, long_about = None)]
struct Cli {
    /// `tracing` filter directive; overrides RUST_LOG and the stored setting
    #[arg(long, global = true)]
    log_filter: Option<String>,

    /// Directory holding `settings.json` (defaults to the platform config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify text literals the way incoming simulation values are
    Resolve {
        /// Literals to classify
        #[arg(required = true, allow_negative_numbers = true)]
        texts: Vec<String>,
        /// Emit one JSON object per literal
        #[arg(long)]
        json: bool,
    },
    /// Write a new correspondence map document
    NewMap {
        /// Where to write the map; must not exist yet
        out: PathBuf,
        /// Domain of expertise owning the map
        #[arg(long)]
        owner: ThingId,
        /// Map name (defaults to mapping.default_map_name)
        #[arg(long)]
        name: Option<String>,
        /// Transient map whose records seed the new one when
        /// mapping.carry_over_temporary is set
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Confirm a correspondence in a map document, in place
    Link {
        /// Path to an ExternalIdentifierMap JSON document
        map: PathBuf,
        /// Internal thing id
        internal: ThingId,
        /// External address
        identifier: String,
        /// Which way values flow through the correspondence
        #[arg(long, value_enum, default_value_t = Direction::Inbound)]
        direction: Direction,
        /// Sample position: an integer, a time step or a label
        #[arg(long, allow_negative_numbers = true)]
        value_index: Option<String>,
        /// Value slot the selected samples feed
        #[arg(long, value_enum)]
        selection: Option<Selection>,
    },
    /// Print the records of a correspondence map document
    Inspect {
        /// Path to an ExternalIdentifierMap JSON document
        map: PathBuf,
    },
    /// Check whether a parameter type could hold a value
    Check {
        /// Path to a ParameterType JSON document
        parameter_type: PathBuf,
        /// Value as received from the simulation
        value: String,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    /// Simulation values flow into the model
    Inbound,
    /// Model values flow into the simulation
    Outbound,
}

impl From<Direction> for MappingDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Inbound => Self::ExternalToInternal,
            Direction::Outbound => Self::InternalToExternal,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Selection {
    Computed,
    Manual,
    Reference,
}

impl From<Selection> for ValueSelectionKind {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::Computed => Self::Computed,
            Selection::Manual => Self::Manual,
            Selection::Reference => Self::Reference,
        }
    }
}

#[derive(Serialize)]
struct Resolution<'a> {
    text: &'a str,
    primitive_type: String,
    value: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (settings, settings_problem) = load_settings(cli.config_dir.as_deref());
    init_tracing(cli.log_filter.as_deref(), &settings)?;
    if let Some(problem) = settings_problem {
        warn!("using default settings: {problem:#}");
    }

    match cli.command {
        Command::Resolve { texts, json } => resolve(&texts, json),
        Command::NewMap {
            out,
            owner,
            name,
            seed,
        } => new_map(&settings, &out, owner, name, seed.as_deref()),
        Command::Link {
            map,
            internal,
            identifier,
            direction,
            value_index,
            selection,
        } => {
            let mut identifier = ExternalIdentifier::new(identifier, direction.into());
            if let Some(text) = value_index {
                identifier = identifier.with_value_index(parse_value_index(&text));
            }
            if let Some(selection) = selection {
                identifier = identifier.with_selection_kind(selection.into());
            }
            link(&settings, &map, internal, identifier)
        }
        Command::Inspect { map } => inspect(&map),
        Command::Check {
            parameter_type,
            value,
        } => check(&parameter_type, value),
    }
}

fn load_settings(config_dir: Option<&Path>) -> (BridgeSettings, Option<anyhow::Error>) {
    let loaded = config_dir
        .map_or_else(FsConfigStore::open_default, FsConfigStore::at)
        .context("opening config directory")
        .and_then(|store| {
            BridgeSettings::load_or_default(&ConfigService::new(store)).context("reading settings")
        });
    match loaded {
        Ok(settings) => (settings, None),
        Err(err) => (BridgeSettings::default(), Some(err)),
    }
}

fn init_tracing(flag: Option<&str>, settings: &BridgeSettings) -> Result<()> {
    let filter = match flag {
        Some(directive) => EnvFilter::try_new(directive).context("parsing --log-filter")?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&settings.diagnostics.log_filter))
            .context("parsing diagnostics.log_filter")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn resolve(texts: &[String], json: bool) -> Result<()> {
    let resolver = ValueTypeResolver::new(TracingDiagnostics);
    for text in texts {
        let (primitive, value) = resolver.resolve_from_text(text);
        if json {
            let line = serde_json::to_string(&Resolution {
                text,
                primitive_type: primitive.to_string(),
                value: value.to_string(),
            })?;
            println!("{line}");
        } else {
            println!("{text}\t{primitive}\t{value}");
        }
    }
    Ok(())
}

fn new_map(
    settings: &BridgeSettings,
    out: &Path,
    owner: ThingId,
    name: Option<String>,
    seed: Option<&Path>,
) -> Result<()> {
    if out.exists() {
        bail!("{} already exists", out.display());
    }
    let mut engine = MappingConfiguration::new(DocumentRepository::for_owner(owner))
        .with_options(settings.engine_options());
    if let Some(seed) = seed {
        let seed_map = read_map(seed)?;
        if !seed_map.is_temporary() {
            warn!(seed = %seed.display(), "seed map is stored; nothing is carried over");
        }
        engine.set_map(seed_map)?;
    }

    let name = name.as_deref().unwrap_or(&settings.mapping.default_map_name);
    let map = engine.create_map(name, settings.mapping.carry_over_temporary)?;
    engine.set_map(map)?;
    save(&mut engine, out)
}

fn link(
    settings: &BridgeSettings,
    path: &Path,
    internal: ThingId,
    identifier: ExternalIdentifier,
) -> Result<()> {
    let map = read_map(path)?;
    let mut engine = MappingConfiguration::new(DocumentRepository::for_map(&map))
        .with_options(settings.engine_options());
    engine
        .set_map(map)
        .with_context(|| format!("indexing {}", path.display()))?;
    engine.add_correspondence(internal, identifier)?;
    save(&mut engine, path)
}

/// Stages the engine's map, which assigns ids to new records, and writes it.
fn save<R: RepositoryPort>(engine: &mut MappingConfiguration<R>, path: &Path) -> Result<()> {
    let mut transaction = StagedTransaction::new();
    engine.persist(&mut transaction, &mut Iteration::default())?;
    let map = engine.map();
    write_map(path, map)?;
    info!(
        operations = transaction.operations().len(),
        path = %path.display(),
        "map written"
    );
    println!("{} ({}): {} record(s)", map.name, map.id, map.correspondences.len());
    Ok(())
}

fn parse_value_index(text: &str) -> ValueIndex {
    if let Ok(ordinal) = text.parse::<i64>() {
        ValueIndex::Ordinal(ordinal)
    } else if let Some(step) = text.parse::<f64>().ok().filter(|v| v.is_finite()) {
        ValueIndex::TimeStep(step)
    } else {
        ValueIndex::Label(text.to_owned())
    }
}

fn inspect(path: &Path) -> Result<()> {
    let map = read_map(path)?;
    let index = ParsedIndex::parse(&map).with_context(|| format!("indexing map '{}'", map.name))?;
    debug!(records = index.len(), "map parsed");

    let mut table = Table::new();
    table.set_header(vec![
        "record",
        "internal",
        "identifier",
        "direction",
        "value index",
        "selection",
    ]);
    for entry in index.iter() {
        table.add_row(vec![
            entry.record_id.to_string(),
            entry.internal_id.to_string(),
            entry.identifier.identifier.clone(),
            entry.identifier.mapping_direction.to_string(),
            entry
                .identifier
                .value_index
                .as_ref()
                .map_or_else(|| "-".to_owned(), ToString::to_string),
            entry
                .identifier
                .value_selection_kind
                .map_or_else(|| "-".to_owned(), |kind| format!("{kind:?}")),
        ]);
    }

    let state = if map.is_temporary() { "transient" } else { "stored" };
    println!("{} ({}, {state}): {} record(s)", map.name, map.id, index.len());
    println!("{table}");
    Ok(())
}

fn check(path: &Path, value: String) -> Result<()> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let parameter_type: ParameterType = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a parameter type", path.display()))?;

    let checker = CompatibilityChecker::new(TracingDiagnostics);
    let value = ExternalValue::Text(value);
    if checker.are_compatible(Some(&parameter_type), Some(&value)) {
        println!("compatible");
    } else {
        println!("incompatible");
    }
    Ok(())
}
