// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Mapping configuration engine.

use simbridge_model::{
    ExternalEntity, Iteration, ParameterContainer, ParameterOrOverride, Thing, ThingId,
    ValueSelectionKind, Variable,
};
use simbridge_types::{DiagnosticsPort, TracingDiagnostics};
use tracing::{debug, instrument};

use crate::{
    ExternalIdentifier, ExternalIdentifierMap, ExternalToInternalProposal, IdCorrespondence,
    InternalToExternalProposal, MappingDirection, MappingError, ParsedIndex, RepositoryPort,
    StagedOperation, StagedTransaction, ValueIndex,
};

/// Behaviour switches for [`MappingConfiguration`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineOptions {
    /// Skip the append that normally follows an in-place update in
    /// [`MappingConfiguration::add_correspondence`].
    ///
    /// Off by default: existing maps were written with the update followed
    /// by an unconditional append, and readers rely on that record layout.
    pub deduplicate_on_update: bool,
}

/// A confirmed value selection: which samples of `variable` go into
/// `parameter`.
#[derive(Debug, Clone, Copy)]
pub struct ValueSelectionEntry<'a> {
    /// Target parameter or override.
    pub parameter: &'a ParameterOrOverride,
    /// Source variable; its `selected_values` are recorded.
    pub variable: &'a Variable,
    /// Value slot the selected samples are written to.
    pub selection_kind: Option<ValueSelectionKind>,
}

/// Owns the current correspondence map and its parsed index.
///
/// Lifecycle: a map is assigned (`new`, [`set_map`](Self::set_map),
/// [`refresh`](Self::refresh), [`persist`](Self::persist)) and parsed in the
/// same step. The index then stays as-is until the next assignment;
/// correspondences appended in between live in the map only.
///
/// The engine is single-threaded and synchronous. Operations that fill
/// caller-visible collections clear them first, so callers must not
/// interleave calls over the same collections.
pub struct MappingConfiguration<R, D = TracingDiagnostics> {
    repository: R,
    diagnostics: D,
    options: EngineOptions,
    map: ExternalIdentifierMap,
    index: ParsedIndex,
}

impl<R: RepositoryPort> MappingConfiguration<R> {
    /// Creates an engine over a transient map, reporting through `tracing`.
    pub fn new(repository: R) -> Self {
        Self::with_diagnostics(repository, TracingDiagnostics)
    }
}

impl<R: RepositoryPort, D: DiagnosticsPort> MappingConfiguration<R, D> {
    /// Creates an engine over a transient map owned by the current domain.
    pub fn with_diagnostics(repository: R, diagnostics: D) -> Self {
        let owner = repository
            .current_domain()
            .map_or(ThingId::NIL, |domain| domain.id);
        Self {
            repository,
            diagnostics,
            options: EngineOptions::default(),
            map: ExternalIdentifierMap::new_temporary(owner),
            index: ParsedIndex::default(),
        }
    }

    /// Replaces the behaviour switches.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// The current map.
    pub fn map(&self) -> &ExternalIdentifierMap {
        &self.map
    }

    /// The index parsed from the current map at assignment time.
    pub fn index(&self) -> &ParsedIndex {
        &self.index
    }

    /// Returns `true` while the current map has never been persisted.
    pub fn is_temporary(&self) -> bool {
        self.map.is_temporary()
    }

    /// Assigns a new current map and rebuilds the index.
    ///
    /// On a malformed payload nothing changes and the error is returned.
    #[instrument(skip_all, fields(map = %map.name))]
    pub fn set_map(&mut self, map: ExternalIdentifierMap) -> Result<(), MappingError> {
        let index = ParsedIndex::parse(&map)?;
        debug!(records = index.len(), "correspondence map indexed");
        self.map = map;
        self.index = index;
        Ok(())
    }

    /// Builds a fresh map named `name`, owned by the current domain.
    ///
    /// With `carry_over_temporary`, records of the current map are copied
    /// over when that map is the transient default one.
    pub fn create_map(
        &self,
        name: &str,
        carry_over_temporary: bool,
    ) -> Result<ExternalIdentifierMap, MappingError> {
        let owner = self
            .repository
            .current_domain()
            .ok_or(MappingError::MissingDomain)?;
        let mut map = ExternalIdentifierMap::new(name, owner.id);
        if carry_over_temporary && self.map.is_temporary() {
            map.correspondences
                .extend(self.map.correspondences.iter().cloned());
        }
        Ok(map)
    }

    /// Rebuilds internal-to-external proposals.
    ///
    /// Records are grouped by external identifier. A group is skipped when
    /// no entity in `known` has that address; a record is skipped when its
    /// internal id is not a value set or its value index is not an integer.
    #[instrument(skip_all, fields(known = known.len()))]
    pub fn load_internal_to_external(
        &self,
        known: &[ExternalEntity],
    ) -> Vec<InternalToExternalProposal> {
        let mut proposals = Vec::new();
        if self.map.is_empty() {
            return proposals;
        }

        for (identifier, records) in self
            .index
            .group_by_identifier(MappingDirection::InternalToExternal)
        {
            let Some(external) = find_entity(known, identifier) else {
                self.diagnostics
                    .trace(&format!("no known external entity for '{identifier}'"));
                continue;
            };

            for record in records {
                let Some(value_set) = self.repository.value_set(record.internal_id) else {
                    self.diagnostics.trace(&format!(
                        "value set {} not found, skipping record",
                        record.internal_id
                    ));
                    continue;
                };
                let Some(value_index) = record
                    .identifier
                    .value_index
                    .as_ref()
                    .and_then(ValueIndex::as_ordinal)
                else {
                    continue;
                };

                proposals.push(InternalToExternalProposal {
                    parameter_id: value_set.container,
                    value_set,
                    value_index,
                    value_selection_kind: record.identifier.value_selection_kind,
                    external: external.clone(),
                });
            }
        }

        debug!(proposals = proposals.len(), "internal-to-external proposals rebuilt");
        proposals
    }

    /// Rebuilds external-to-internal proposals, one per identifier group
    /// with a known entity.
    ///
    /// Each record of the group fills one slot of the proposal according to
    /// the kind of thing its internal id resolves to; other kinds and misses
    /// are ignored. The originating records are kept on the proposal.
    #[instrument(skip_all, fields(known = known.len()))]
    pub fn load_external_to_internal(
        &self,
        known: &[ExternalEntity],
    ) -> Vec<ExternalToInternalProposal> {
        let mut proposals = Vec::new();
        if self.map.is_empty() {
            return proposals;
        }

        for (identifier, records) in self
            .index
            .group_by_identifier(MappingDirection::ExternalToInternal)
        {
            let Some(external) = find_entity(known, identifier) else {
                self.diagnostics
                    .trace(&format!("no known external entity for '{identifier}'"));
                continue;
            };

            let mut proposal = ExternalToInternalProposal::new(external.clone());
            for record in records {
                match self.repository.thing(record.internal_id) {
                    Some(Thing::ElementDefinition(definition)) => {
                        proposal.selected_element_definition = Some(definition);
                    }
                    Some(Thing::ElementUsage(usage)) => proposal.selected_element_usages.push(usage),
                    Some(Thing::Parameter(parameter)) => proposal.select_parameter(parameter),
                    Some(Thing::Option(option)) => proposal.selected_option = Some(option),
                    Some(Thing::ActualFiniteState(state)) => proposal.selected_state = Some(state),
                    Some(_) | None => {}
                }

                if let Some(original) = self.map.correspondences.get(record.position) {
                    proposal.correspondences.push(original.clone());
                }
            }
            proposals.push(proposal);
        }

        debug!(proposals = proposals.len(), "external-to-internal proposals rebuilt");
        proposals
    }

    /// Records a confirmed correspondence.
    ///
    /// When the index already links `internal_id` to the same identifier and
    /// direction through a record that is still live in the repository, that
    /// record is rewritten in place. A new record carrying the same payload
    /// is then appended regardless, unless
    /// [`EngineOptions::deduplicate_on_update`] is set. With that option the
    /// lookup also requires an equal value index, so the markers of
    /// different samples never overwrite each other.
    pub fn add_correspondence(
        &mut self,
        internal_id: ThingId,
        identifier: ExternalIdentifier,
    ) -> Result<(), MappingError> {
        let serialized = identifier.to_json()?;

        let existing = if self.options.deduplicate_on_update {
            self.index.find_exact(internal_id, &identifier)
        } else {
            self.index.find(internal_id, &identifier)
        }
        .map(|entry| (entry.record_id, entry.position));

        let mut updated = false;
        if let Some((record_id, position)) = existing {
            if !record_id.is_nil() && self.repository.correspondence_exists(record_id) {
                if let Some(record) = self.map.correspondences.get_mut(position) {
                    record.internal_thing = internal_id;
                    record.external_id.clone_from(&serialized);
                    updated = true;
                }
            }
        }

        if updated && self.options.deduplicate_on_update {
            return Ok(());
        }

        self.map
            .correspondences
            .push(IdCorrespondence::new(internal_id, serialized));
        Ok(())
    }

    /// Records the value selections of a batch of confirmed mappings.
    ///
    /// Per entry: one value-index marker per selected sample (nil internal
    /// id), then the parameter link, then the link to the parameter's holder
    /// (usage for overrides, definition for parameters).
    #[instrument(skip_all, fields(entries = entries.len()))]
    pub fn add_many_from_value_selection(
        &mut self,
        entries: &[ValueSelectionEntry<'_>],
    ) -> Result<(), MappingError> {
        for entry in entries {
            let address = entry.variable.address();

            for sample in &entry.variable.selected_values {
                let marker = ExternalIdentifier {
                    identifier: address.to_owned(),
                    mapping_direction: MappingDirection::ExternalToInternal,
                    value_index: Some(ValueIndex::TimeStep(sample.time_step)),
                    value_selection_kind: entry.selection_kind,
                };
                self.add_correspondence(ThingId::NIL, marker)?;
            }

            let identifier = ExternalIdentifier::new(address, MappingDirection::ExternalToInternal);
            self.add_correspondence(entry.parameter.id(), identifier.clone())?;

            let holder = match entry.parameter.container() {
                ParameterContainer::ElementUsage(id) | ParameterContainer::ElementDefinition(id) => id,
            };
            self.add_correspondence(holder, identifier)?;
        }
        Ok(())
    }

    /// Stages the current map into `transaction`.
    ///
    /// A transient map is cloned under a fresh id and attached to
    /// `container`. Transient records get ids and are staged for creation,
    /// persisted ones for update; the map itself is staged last. Nothing is
    /// committed here.
    #[instrument(skip_all, fields(map = %self.map.name))]
    pub fn persist(
        &mut self,
        transaction: &mut StagedTransaction,
        container: &mut Iteration,
    ) -> Result<(), MappingError> {
        if self.map.is_temporary() {
            let mut persisted = self.map.clone();
            persisted.id = ThingId::random();
            container.external_identifier_maps.push(persisted.id);
            self.map = persisted;
        }

        for record in &mut self.map.correspondences {
            if record.is_persisted() {
                transaction.stage(StagedOperation::UpdateCorrespondence(record.clone()));
            } else {
                record.id = ThingId::random();
                transaction.stage(StagedOperation::CreateCorrespondence(record.clone()));
            }
        }
        transaction.stage(StagedOperation::CreateOrUpdateMap(self.map.clone()));

        self.index = ParsedIndex::parse(&self.map)?;
        debug!(
            operations = transaction.operations().len(),
            "correspondence map staged"
        );
        Ok(())
    }

    /// Re-fetches the current map from the repository and reassigns it.
    pub fn refresh(&mut self) -> Result<(), MappingError> {
        let id = self.map.id;
        let map = self
            .repository
            .external_identifier_map(id)
            .ok_or(MappingError::MapNotFound(id))?;
        self.set_map(map)
    }

    /// Restores saved value selections.
    ///
    /// Each variable's selection is cleared, then refilled with the recorded
    /// samples whose time step equals one of the value indices stored for
    /// the variable's address. Only exact matches are selected.
    pub fn select_values_for_variables(&self, variables: &mut [Variable]) {
        for variable in variables.iter_mut() {
            variable.selected_values.clear();

            for index in self.index.distinct_value_indices(variable.address()) {
                let Some(step) = index.as_time_step() else {
                    continue;
                };
                if let Some(sample) = variable
                    .recorded_values
                    .iter()
                    .find(|sample| (sample.time_step - step).abs() == 0.0)
                {
                    variable.selected_values.push(sample.clone());
                }
            }
        }
    }
}

fn find_entity<'a>(known: &'a [ExternalEntity], address: &str) -> Option<&'a ExternalEntity> {
    known.iter().find(|entity| entity.address == address)
}
