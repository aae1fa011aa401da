// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(missing_docs)]
//! Mapping engine scenarios against the in-memory repository.

use simbridge_dry_tests::{fixtures, InMemoryRepository, RecordingDiagnostics};
use simbridge_mapping::{
    EngineOptions, ExternalIdentifier, ExternalIdentifierMap, IdCorrespondence,
    MappingConfiguration, MappingDirection, MappingError, StagedOperation, StagedTransaction,
    ValueIndex, ValueSelectionEntry,
};
use simbridge_model::{
    DomainOfExpertise, ElementDefinition, ExternalEntity, Iteration, Parameter,
    ParameterOrOverride, Thing, ThingId, ValueSelectionKind, Variable,
};
use simbridge_types::DiagnosticLevel;

const ADDRESS: &str = "ns=2;s=Pump.Speed";

struct World {
    domain: DomainOfExpertise,
    repository: InMemoryRepository,
    definition: ElementDefinition,
    parameter: Parameter,
}

fn world() -> World {
    let domain = fixtures::domain("PWR");
    let mut definition = fixtures::element_definition("Pump", &domain);
    let parameter = fixtures::parameter(&definition, fixtures::quantity_kind(None));
    definition.parameters.push(parameter.clone());

    let repository = InMemoryRepository::with_domain(domain.clone());
    repository.insert_element_definition(&definition);
    World {
        domain,
        repository,
        definition,
        parameter,
    }
}

fn link(internal: ThingId, identifier: &ExternalIdentifier) -> IdCorrespondence {
    let mut record = IdCorrespondence::from_identifier(internal, identifier).unwrap();
    record.id = ThingId::random();
    record
}

fn stored_map(world: &World, records: Vec<IdCorrespondence>) -> ExternalIdentifierMap {
    let mut map = ExternalIdentifierMap::new("Pump run", world.domain.id);
    map.id = ThingId::random();
    map.correspondences = records;
    world.repository.insert_map(map.clone());
    map
}

fn inbound(identifier: &str) -> ExternalIdentifier {
    ExternalIdentifier::new(identifier, MappingDirection::ExternalToInternal)
}

fn outbound(identifier: &str, index: ValueIndex) -> ExternalIdentifier {
    ExternalIdentifier::new(identifier, MappingDirection::InternalToExternal).with_value_index(index)
}

fn parsed(record: &IdCorrespondence) -> ExternalIdentifier {
    ExternalIdentifier::from_json(&record.external_id).unwrap()
}

#[test]
fn empty_map_yields_no_proposals() {
    let world = world();
    let engine = MappingConfiguration::new(world.repository.clone());
    let known = [ExternalEntity::new(ADDRESS, "speed")];

    assert!(engine.is_temporary());
    assert!(engine.load_external_to_internal(&known).is_empty());
    assert!(engine.load_internal_to_external(&known).is_empty());
    assert_eq!(world.repository.lookup_count(), 0);
}

#[test]
fn shared_identifier_fills_one_proposal() {
    let world = world();
    let option = fixtures::option("baseline");
    world.repository.insert(Thing::Option(option.clone()));

    let map = stored_map(
        &world,
        vec![
            link(world.definition.id, &inbound("X")),
            link(world.parameter.id, &inbound("X")),
            link(option.id, &inbound("X")),
        ],
    );
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.set_map(map.clone()).unwrap();

    let proposals = engine.load_external_to_internal(&[ExternalEntity::new("X", "x")]);
    assert_eq!(proposals.len(), 1);

    let proposal = &proposals[0];
    assert_eq!(proposal.selected_element_definition.as_ref().map(|d| d.id), Some(world.definition.id));
    assert_eq!(proposal.selected_parameter.as_ref().map(|p| p.id), Some(world.parameter.id));
    assert_eq!(proposal.selected_parameter_type, Some(world.parameter.parameter_type.clone()));
    assert_eq!(proposal.selected_option, Some(option));
    assert!(proposal.selected_state.is_none());
    assert_eq!(proposal.correspondences, map.correspondences);
    assert!(proposal.is_complete());
}

#[test]
fn parameter_record_round_trips_into_a_proposal() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(&world, vec![link(world.parameter.id, &inbound("X"))]))
        .unwrap();

    let proposals = engine.load_external_to_internal(&[ExternalEntity::new("X", "x")]);
    assert_eq!(proposals.len(), 1);
    assert_eq!(proposals[0].selected_parameter.as_ref().map(|p| p.id), Some(world.parameter.id));
    assert!(proposals[0].selected_element_definition.is_none());
}

#[test]
fn groups_keep_first_appearance_order_and_skip_unknown_entities() {
    let world = world();
    let state = fixtures::state("hot");
    world.repository.insert(Thing::ActualFiniteState(state.clone()));
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(
            &world,
            vec![
                link(state.id, &inbound("B")),
                link(world.definition.id, &inbound("A")),
                link(world.parameter.id, &inbound("ghost")),
                link(ThingId::random(), &inbound("B")),
            ],
        ))
        .unwrap();

    let known = [ExternalEntity::new("A", "a"), ExternalEntity::new("B", "b")];
    let proposals = engine.load_external_to_internal(&known);
    let addresses: Vec<_> = proposals.iter().map(|p| p.external.address.as_str()).collect();
    assert_eq!(addresses, ["B", "A"]);
    assert_eq!(proposals[0].selected_state, Some(state));
    assert_eq!(proposals[0].correspondences.len(), 2);
}

#[test]
fn internal_to_external_skips_unusable_records() {
    let world = world();
    let value_set = world.parameter.value_sets[0].clone();
    let mut engine = MappingConfiguration::with_diagnostics(world.repository.clone(), RecordingDiagnostics::new());
    engine
        .set_map(stored_map(
            &world,
            vec![
                link(
                    value_set.id,
                    &outbound(ADDRESS, ValueIndex::Ordinal(2)).with_selection_kind(ValueSelectionKind::Manual),
                ),
                link(value_set.id, &outbound(ADDRESS, ValueIndex::TimeStep(1.5))),
                link(value_set.id, &outbound(ADDRESS, ValueIndex::Label("first".into()))),
                link(ThingId::random(), &outbound(ADDRESS, ValueIndex::Ordinal(0))),
                link(world.parameter.id, &outbound(ADDRESS, ValueIndex::Ordinal(0))),
                link(value_set.id, &outbound("unknown", ValueIndex::Ordinal(0))),
                link(value_set.id, &inbound(ADDRESS)),
            ],
        ))
        .unwrap();

    let known = [ExternalEntity::new(ADDRESS, "speed").with_value(12.0)];
    let proposals = engine.load_internal_to_external(&known);

    assert_eq!(proposals.len(), 1);
    let proposal = &proposals[0];
    assert_eq!(proposal.value_set, value_set);
    assert_eq!(proposal.parameter_id, world.parameter.id);
    assert_eq!(proposal.value_index, 2);
    assert_eq!(proposal.value_selection_kind, Some(ValueSelectionKind::Manual));
    assert_eq!(proposal.external, known[0]);
}

#[test]
fn integral_time_steps_and_numeric_labels_count_as_ordinals() {
    let world = world();
    let value_set = world.parameter.value_sets[0].clone();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(
            &world,
            vec![
                link(value_set.id, &outbound(ADDRESS, ValueIndex::TimeStep(3.0))),
                link(value_set.id, &outbound(ADDRESS, ValueIndex::Label("4".into()))),
            ],
        ))
        .unwrap();

    let proposals = engine.load_internal_to_external(&[ExternalEntity::new(ADDRESS, "speed")]);
    let indices: Vec<_> = proposals.iter().map(|p| p.value_index).collect();
    assert_eq!(indices, [3, 4]);
}

#[test]
fn malformed_record_keeps_the_previous_map() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    let good = stored_map(&world, vec![link(world.parameter.id, &inbound("X"))]);
    engine.set_map(good.clone()).unwrap();

    let mut bad = good.clone();
    bad.correspondences.push(IdCorrespondence::new(world.parameter.id, "{\"Identifier\":"));
    let err = engine.set_map(bad).unwrap_err();

    assert!(matches!(err, MappingError::MalformedCorrespondence { record_id, .. } if record_id.is_nil()));
    assert_eq!(engine.map(), &good);
    assert_eq!(engine.index().len(), 1);
}

#[test]
fn confirming_a_live_correspondence_updates_and_appends() {
    let world = world();
    let original = link(world.parameter.id, &inbound(ADDRESS));
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.set_map(stored_map(&world, vec![original.clone()])).unwrap();

    let confirmed = inbound(ADDRESS).with_selection_kind(ValueSelectionKind::Reference);
    engine.add_correspondence(world.parameter.id, confirmed.clone()).unwrap();

    let records = &engine.map().correspondences;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, original.id);
    assert_eq!(parsed(&records[0]), confirmed);
    assert!(!records[1].is_persisted());
    assert_eq!(parsed(&records[1]), confirmed);
    assert_eq!(engine.index().len(), 1, "appends are not indexed until reassignment");
}

#[test]
fn deduplication_option_skips_the_append() {
    let world = world();
    let original = link(world.parameter.id, &inbound(ADDRESS));
    let mut engine = MappingConfiguration::new(world.repository.clone()).with_options(EngineOptions {
        deduplicate_on_update: true,
    });
    engine.set_map(stored_map(&world, vec![original.clone()])).unwrap();

    let confirmed = inbound(ADDRESS).with_selection_kind(ValueSelectionKind::Computed);
    engine.add_correspondence(world.parameter.id, confirmed.clone()).unwrap();

    assert_eq!(engine.map().correspondences.len(), 1);
    assert_eq!(parsed(&engine.map().correspondences[0]), confirmed);
}

#[test]
fn deleted_record_is_not_updated() {
    let world = world();
    let original = link(world.parameter.id, &inbound(ADDRESS));
    let mut engine = MappingConfiguration::new(world.repository.clone()).with_options(EngineOptions {
        deduplicate_on_update: true,
    });
    engine.set_map(stored_map(&world, vec![original.clone()])).unwrap();
    world.repository.remove_correspondence(original.id);

    engine
        .add_correspondence(world.parameter.id, inbound(ADDRESS).with_selection_kind(ValueSelectionKind::Manual))
        .unwrap();

    let records = &engine.map().correspondences;
    assert_eq!(records.len(), 2);
    assert_eq!(records[0], original);
}

#[test]
fn value_selection_writes_markers_then_links() {
    let world = world();
    let mut variable = fixtures::variable(ADDRESS, &[(0.0, 1.0), (1.0, 2.0), (2.0, 3.0)]);
    variable.selected_values = vec![variable.recorded_values[0].clone(), variable.recorded_values[2].clone()];
    let target = ParameterOrOverride::Parameter(world.parameter.clone());

    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .add_many_from_value_selection(&[ValueSelectionEntry {
            parameter: &target,
            variable: &variable,
            selection_kind: Some(ValueSelectionKind::Manual),
        }])
        .unwrap();

    let records = &engine.map().correspondences;
    let internal: Vec<_> = records.iter().map(|r| r.internal_thing).collect();
    assert_eq!(
        internal,
        [ThingId::NIL, ThingId::NIL, world.parameter.id, world.definition.id]
    );

    let marker = parsed(&records[1]);
    assert_eq!(marker.identifier, ADDRESS);
    assert_eq!(marker.mapping_direction, MappingDirection::ExternalToInternal);
    assert_eq!(marker.value_index, Some(ValueIndex::TimeStep(2.0)));
    assert_eq!(marker.value_selection_kind, Some(ValueSelectionKind::Manual));
    assert_eq!(parsed(&records[2]), inbound(ADDRESS));
    assert_eq!(parsed(&records[3]), inbound(ADDRESS));
}

#[test]
fn override_selection_links_the_usage() {
    let world = world();
    let usage = fixtures::element_usage("pump-1", &world.definition);
    let over = fixtures::parameter_override(&world.parameter, &usage);
    let target = ParameterOrOverride::Override(over.clone());
    let variable = fixtures::variable(ADDRESS, &[(0.0, 1.0)]);

    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .add_many_from_value_selection(&[ValueSelectionEntry {
            parameter: &target,
            variable: &variable,
            selection_kind: None,
        }])
        .unwrap();

    let internal: Vec<_> = engine.map().correspondences.iter().map(|r| r.internal_thing).collect();
    assert_eq!(internal, [over.id, usage.id]);
}

#[test]
fn persisting_a_temporary_map_attaches_and_stages_everything() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.add_correspondence(world.parameter.id, inbound(ADDRESS)).unwrap();
    engine.add_correspondence(world.definition.id, inbound(ADDRESS)).unwrap();

    let mut transaction = StagedTransaction::new();
    let mut iteration = Iteration::default();
    engine.persist(&mut transaction, &mut iteration).unwrap();

    assert!(!engine.is_temporary());
    assert_eq!(iteration.external_identifier_maps, [engine.map().id]);
    assert_eq!(engine.index().len(), 2);

    let operations = transaction.operations();
    assert_eq!(operations.len(), 3);
    for (operation, record) in operations.iter().zip(&engine.map().correspondences) {
        assert!(record.is_persisted());
        assert_eq!(operation, &StagedOperation::CreateCorrespondence(record.clone()));
    }
    assert_eq!(operations[2], StagedOperation::CreateOrUpdateMap(engine.map().clone()));
}

#[test]
fn second_persist_updates_existing_records() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.add_correspondence(world.parameter.id, inbound(ADDRESS)).unwrap();

    let mut iteration = Iteration::default();
    let mut first = StagedTransaction::new();
    engine.persist(&mut first, &mut iteration).unwrap();
    let map_id = engine.map().id;
    world.repository.commit(first);

    engine.add_correspondence(world.definition.id, inbound(ADDRESS)).unwrap();
    let mut second = StagedTransaction::new();
    engine.persist(&mut second, &mut iteration).unwrap();

    assert_eq!(engine.map().id, map_id);
    assert_eq!(iteration.external_identifier_maps.len(), 1);
    let kinds: Vec<_> = second
        .operations()
        .iter()
        .map(|op| match op {
            StagedOperation::CreateCorrespondence(_) => "create",
            StagedOperation::UpdateCorrespondence(_) => "update",
            StagedOperation::CreateOrUpdateMap(_) => "map",
        })
        .collect();
    assert_eq!(kinds, ["update", "create", "map"]);
}

#[test]
fn refresh_picks_up_the_committed_map() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.add_correspondence(world.parameter.id, inbound(ADDRESS)).unwrap();

    let mut transaction = StagedTransaction::new();
    engine.persist(&mut transaction, &mut Iteration::default()).unwrap();
    let staged = engine.map().clone();
    world.repository.commit(transaction);

    engine.add_correspondence(world.definition.id, inbound(ADDRESS)).unwrap();
    assert_eq!(engine.map().correspondences.len(), 2);

    engine.refresh().unwrap();
    assert_eq!(engine.map(), &staged);
    assert_eq!(engine.index().len(), 1);
}

#[test]
fn saved_selections_are_restored_on_exact_time_steps() {
    let world = world();
    let mut variable = fixtures::variable(ADDRESS, &[(0.0, 1.0), (0.5, 1.5), (1.0, 2.0)]);
    variable.selected_values = vec![variable.recorded_values[1].clone(), variable.recorded_values[2].clone()];
    let target = ParameterOrOverride::Parameter(world.parameter.clone());

    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .add_many_from_value_selection(&[ValueSelectionEntry {
            parameter: &target,
            variable: &variable,
            selection_kind: Some(ValueSelectionKind::Computed),
        }])
        .unwrap();
    engine
        .persist(&mut StagedTransaction::new(), &mut Iteration::default())
        .unwrap();

    let mut restored = fixtures::variable(ADDRESS, &[(0.0, 1.0), (0.5, 1.5), (1.0, 2.0)]);
    restored.selected_values = vec![restored.recorded_values[0].clone()];
    let mut other = fixtures::variable("ns=2;s=Pump.Temp", &[(0.5, 9.0)]);
    other.selected_values = other.recorded_values.clone();

    let mut variables = [restored, other];
    engine.select_values_for_variables(&mut variables);

    let steps: Vec<_> = variables[0].selected_values.iter().map(|s| s.time_step).collect();
    assert_eq!(steps, [0.5, 1.0]);
    assert!(variables[1].selected_values.is_empty());
}

#[test]
fn unmatched_time_steps_select_nothing() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(
            &world,
            vec![link(
                ThingId::NIL,
                &inbound(ADDRESS).with_value_index(ValueIndex::TimeStep(0.25)),
            )],
        ))
        .unwrap();

    let mut variables = [fixtures::variable(ADDRESS, &[(0.2, 1.0), (0.3, 1.0)])];
    engine.select_values_for_variables(&mut variables);
    assert!(variables[0].selected_values.is_empty());
}

#[test]
fn new_map_carries_over_temporary_records() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.add_correspondence(world.parameter.id, inbound(ADDRESS)).unwrap();

    let carried = engine.create_map("Pump run", true).unwrap();
    assert_eq!(carried.owner, world.domain.id);
    assert!(carried.is_temporary());
    assert_eq!(carried.correspondences, engine.map().correspondences);

    let fresh = engine.create_map("Pump run", false).unwrap();
    assert!(fresh.is_empty());
}

#[test]
fn new_map_from_a_stored_map_starts_empty() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(&world, vec![link(world.parameter.id, &inbound(ADDRESS))]))
        .unwrap();

    assert!(engine.create_map("copy", true).unwrap().is_empty());
}

#[test]
fn unknown_entities_are_traced() {
    let world = world();
    let diagnostics = RecordingDiagnostics::new();
    let mut engine = MappingConfiguration::with_diagnostics(world.repository.clone(), diagnostics.clone());
    engine
        .set_map(stored_map(&world, vec![link(world.parameter.id, &inbound("gone"))]))
        .unwrap();

    assert!(engine.load_external_to_internal(&[]).is_empty());
    assert!(diagnostics.contains(DiagnosticLevel::Trace, "gone"));
}

fn selected_steps(variable: &Variable) -> Vec<f64> {
    variable.selected_values.iter().map(|s| s.time_step).collect()
}

/// Session one keeps step 0, session two adds steps 1 and 2 on the same
/// map; returns the steps a third reader restores.
fn restore_after_two_sessions(options: EngineOptions) -> Vec<f64> {
    let world = world();
    let samples = [(0.0, 10.0), (1.0, 11.0), (2.0, 12.0)];
    let target = ParameterOrOverride::Parameter(world.parameter.clone());

    let mut first_pick = fixtures::variable(ADDRESS, &samples);
    first_pick.selected_values = vec![first_pick.recorded_values[0].clone()];
    let mut first = MappingConfiguration::new(world.repository.clone()).with_options(options);
    first
        .add_many_from_value_selection(&[ValueSelectionEntry {
            parameter: &target,
            variable: &first_pick,
            selection_kind: None,
        }])
        .unwrap();
    let mut transaction = StagedTransaction::new();
    first.persist(&mut transaction, &mut Iteration::default()).unwrap();
    world.repository.commit(transaction);
    first.refresh().unwrap();

    let mut second_pick = fixtures::variable(ADDRESS, &samples);
    second_pick.selected_values = second_pick.recorded_values[1..].to_vec();
    let mut second = MappingConfiguration::new(world.repository.clone()).with_options(options);
    second.set_map(first.map().clone()).unwrap();
    second
        .add_many_from_value_selection(&[ValueSelectionEntry {
            parameter: &target,
            variable: &second_pick,
            selection_kind: None,
        }])
        .unwrap();
    let mut transaction = StagedTransaction::new();
    second.persist(&mut transaction, &mut Iteration::default()).unwrap();
    world.repository.commit(transaction);

    let mut variables = [fixtures::variable(ADDRESS, &samples)];
    second.select_values_for_variables(&mut variables);
    selected_steps(&variables[0])
}

#[test]
fn deduplication_keeps_every_saved_sample() {
    let steps = restore_after_two_sessions(EngineOptions {
        deduplicate_on_update: true,
    });
    assert_eq!(steps, [0.0, 1.0, 2.0]);
}

#[test]
fn latest_selection_survives_without_deduplication() {
    let mut steps = restore_after_two_sessions(EngineOptions::default());
    steps.sort_by(f64::total_cmp);
    assert_eq!(steps, [1.0, 2.0]);
}

#[test]
fn deduplicated_markers_of_the_same_sample_update_in_place() {
    let world = world();
    let marker = inbound(ADDRESS).with_value_index(ValueIndex::TimeStep(1.0));
    let mut engine = MappingConfiguration::new(world.repository.clone()).with_options(EngineOptions {
        deduplicate_on_update: true,
    });
    engine
        .set_map(stored_map(&world, vec![link(ThingId::NIL, &marker)]))
        .unwrap();

    let manual = marker.clone().with_selection_kind(ValueSelectionKind::Manual);
    engine.add_correspondence(ThingId::NIL, manual.clone()).unwrap();
    engine
        .add_correspondence(
            ThingId::NIL,
            inbound(ADDRESS).with_value_index(ValueIndex::TimeStep(2.0)),
        )
        .unwrap();

    let records = &engine.map().correspondences;
    assert_eq!(records.len(), 2);
    assert_eq!(parsed(&records[0]), manual);
    assert_eq!(parsed(&records[1]).value_index, Some(ValueIndex::TimeStep(2.0)));
}

#[test]
fn usages_collect_and_overrides_are_ignored() {
    let world = world();
    let first = fixtures::element_usage("pump-1", &world.definition);
    let second = fixtures::element_usage("pump-2", &world.definition);
    let over = fixtures::parameter_override(&world.parameter, &first);
    world.repository.insert(Thing::ElementUsage(first.clone()));
    world.repository.insert(Thing::ElementUsage(second.clone()));
    world.repository.insert(Thing::ParameterOverride(over.clone()));

    let map = stored_map(
        &world,
        vec![
            link(first.id, &inbound("X")),
            link(over.id, &inbound("X")),
            link(second.id, &inbound("X")),
        ],
    );
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine.set_map(map.clone()).unwrap();

    let proposals = engine.load_external_to_internal(&[ExternalEntity::new("X", "x")]);
    assert_eq!(proposals.len(), 1);

    let proposal = &proposals[0];
    let usages: Vec<_> = proposal.selected_element_usages.iter().map(|u| u.id).collect();
    assert_eq!(usages, [first.id, second.id]);
    assert!(proposal.selected_parameter.is_none());
    assert!(proposal.selected_parameter_type.is_none());
    assert!(proposal.selected_element_definition.is_none());
    assert_eq!(proposal.correspondences.len(), 3);
    assert_eq!(proposal.correspondences, map.correspondences);
}

#[test]
fn one_time_step_in_two_encodings_selects_one_sample() {
    let world = world();
    let mut engine = MappingConfiguration::new(world.repository.clone());
    engine
        .set_map(stored_map(
            &world,
            vec![
                link(ThingId::NIL, &inbound(ADDRESS).with_value_index(ValueIndex::Ordinal(1))),
                link(ThingId::NIL, &inbound(ADDRESS).with_value_index(ValueIndex::TimeStep(1.0))),
            ],
        ))
        .unwrap();

    let mut variables = [fixtures::variable(ADDRESS, &[(0.0, 5.0), (1.0, 6.0)])];
    engine.select_values_for_variables(&mut variables);
    assert_eq!(selected_steps(&variables[0]), [1.0]);
}
