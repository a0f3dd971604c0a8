// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    BIN_LOCATION, OTHER_LOCATION, barcode, create_test_warehouse, locker, name, pk,
};
use crate::{Command, CoreError, Topology, TransitionResult, apply};
use time::macros::datetime;
use wms_topology_domain::{
    AvailabilityState, Direction, DomainError, LocationGroup, LocationStateChange, OperationMode,
};
use wms_topology_events::TopologyEvent;

fn event_names(result: &TransitionResult) -> Vec<&'static str> {
    result.events.iter().map(TopologyEvent::name).collect()
}

#[test]
fn test_apply_does_not_modify_input() {
    let topology: Topology = create_test_warehouse();
    let before: Topology = topology.clone();

    let result: TransitionResult = apply(
        &topology,
        Command::ChangeGroupState {
            name: name("WH"),
            state_in: Some(AvailabilityState::NotAvailable),
            state_out: None,
        },
    )
    .unwrap();

    assert_eq!(topology, before);
    assert_ne!(result.new_topology, before);
    assert_eq!(result.events.len(), 3);
}

#[test]
fn test_create_group_below_locked_parent_inherits_lock() {
    let locked: Topology = apply(
        &create_test_warehouse(),
        Command::ChangeGroupState {
            name: name("WH"),
            state_in: None,
            state_out: Some(AvailabilityState::NotAvailable),
        },
    )
    .unwrap()
    .new_topology;

    let result: TransitionResult = apply(
        &locked,
        Command::CreateGroup {
            name: name("AISLE2"),
            description: Some(String::from("Second aisle")),
            group_type: Some(String::from("AISLE")),
            counting_active: false,
            max_fill_level: 0.8,
            parent: Some(name("WH")),
        },
    )
    .unwrap();

    let group: &LocationGroup = result.new_topology.group(&name("AISLE2")).unwrap();
    assert_eq!(group.parent, Some(name("WH")));
    assert_eq!(group.state_out(), AvailabilityState::NotAvailable);
    assert_eq!(
        locker(&result.new_topology, "AISLE2", Direction::Out),
        Some(String::from("WH"))
    );
    assert!(!group.counting_active);
    assert_eq!(
        event_names(&result),
        vec!["LocationGroupCreated", "LocationGroupChanged"]
    );
}

#[test]
fn test_create_group_rejects_invalid_fill_level() {
    let result: Result<TransitionResult, CoreError> = apply(
        &create_test_warehouse(),
        Command::CreateGroup {
            name: name("AISLE2"),
            description: None,
            group_type: None,
            counting_active: true,
            max_fill_level: 1.5,
            parent: None,
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidFillLevel(_)))
    ));
}

#[test]
fn test_create_group_with_unknown_parent_fails_atomically() {
    let topology: Topology = create_test_warehouse();

    let result: Result<TransitionResult, CoreError> = apply(
        &topology,
        Command::CreateGroup {
            name: name("AISLE2"),
            description: None,
            group_type: None,
            counting_active: true,
            max_fill_level: 1.0,
            parent: Some(name("NOPE")),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::GroupNotFound(_)))
    ));
    assert!(topology.group(&name("AISLE2")).is_none());
}

#[test]
fn test_add_child_emits_structure_and_state_events() {
    let mut topology: Topology = create_test_warehouse();
    topology
        .create_group(LocationGroup::new(name("DOCK")))
        .unwrap();
    topology
        .change_state_in(&name("WH"), AvailabilityState::NotAvailable)
        .unwrap();

    let result: TransitionResult = apply(
        &topology,
        Command::AddChild {
            parent: name("WH"),
            child: name("DOCK"),
        },
    )
    .unwrap();

    assert_eq!(
        event_names(&result),
        vec![
            "LocationGroupChanged",
            "LocationGroupChanged",
            "LocationGroupStateChanged"
        ]
    );
}

#[test]
fn test_remove_and_delete_group() {
    let topology: Topology = create_test_warehouse();

    let removed: TransitionResult = apply(
        &topology,
        Command::RemoveChild {
            parent: name("AISLE1"),
            child: name("BIN1"),
        },
    )
    .unwrap();
    let unassigned: TransitionResult = apply(
        &removed.new_topology,
        Command::UnassignLocation {
            pk: pk(BIN_LOCATION),
        },
    )
    .unwrap();
    let deleted: TransitionResult = apply(
        &unassigned.new_topology,
        Command::DeleteGroup { name: name("BIN1") },
    )
    .unwrap();

    assert!(deleted.new_topology.group(&name("BIN1")).is_none());
    assert_eq!(event_names(&deleted), vec!["LocationGroupDeleted"]);
}

#[test]
fn test_location_lifecycle() {
    let topology: Topology = create_test_warehouse();

    let created: TransitionResult = apply(
        &topology,
        Command::CreateLocation {
            pk: pk("WH01/AI01/0003/0000/0000"),
            description: None,
            plc_code: Some(String::from("PLC-3")),
            group: Some(name("BIN1")),
        },
    )
    .unwrap();
    assert_eq!(
        event_names(&created),
        vec!["LocationCreated", "LocationGroupChanged"]
    );

    let deleted: TransitionResult = apply(
        &created.new_topology,
        Command::DeleteLocation {
            pk: pk("WH01/AI01/0003/0000/0000"),
        },
    )
    .unwrap();
    assert_eq!(deleted.new_topology, topology);
}

#[test]
fn test_assign_location_moves_membership() {
    let result: TransitionResult = apply(
        &create_test_warehouse(),
        Command::AssignLocation {
            pk: pk(BIN_LOCATION),
            group: name("AISLE1"),
        },
    )
    .unwrap();

    assert_eq!(
        event_names(&result),
        vec![
            "LocationChanged",
            "LocationGroupChanged",
            "LocationGroupChanged"
        ]
    );
    assert!(
        result
            .new_topology
            .group(&name("BIN1"))
            .unwrap()
            .locations
            .is_empty()
    );
}

#[test]
fn test_noop_changes_emit_no_events() {
    let topology: Topology = create_test_warehouse();

    let state: TransitionResult = apply(
        &topology,
        Command::ChangeLocationState {
            pk: pk(BIN_LOCATION),
            change: LocationStateChange::default(),
        },
    )
    .unwrap();
    let mode: TransitionResult = apply(
        &topology,
        Command::SetOperationMode {
            name: name("WH"),
            mode: OperationMode::InfeedAndOutfeed,
        },
    )
    .unwrap();

    assert!(state.events.is_empty());
    assert!(mode.events.is_empty());
}

#[test]
fn test_transport_unit_commands() {
    let topology: Topology = create_test_warehouse();

    let created: TransitionResult = apply(
        &topology,
        Command::CreateTransportUnit {
            barcode: barcode("100"),
            unit_type: String::from("TOTE"),
            location: pk(OTHER_LOCATION),
        },
    )
    .unwrap();
    let moved: TransitionResult = apply(
        &created.new_topology,
        Command::MoveTransportUnit {
            barcode: barcode("100"),
            to: pk(BIN_LOCATION),
            at: datetime!(2026-05-04 12:00:00 UTC),
        },
    )
    .unwrap();

    assert_eq!(
        moved.events,
        vec![TopologyEvent::TransportUnitMoved {
            barcode: barcode("100").to_string(),
            from: OTHER_LOCATION.to_string(),
            to: BIN_LOCATION.to_string(),
        }]
    );
}

#[test]
fn test_transport_unit_requires_unit_type() {
    let result: Result<TransitionResult, CoreError> = apply(
        &create_test_warehouse(),
        Command::CreateTransportUnit {
            barcode: barcode("100"),
            unit_type: String::from("  "),
            location: pk(OTHER_LOCATION),
        },
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidUnitType(_)))
    ));
}

#[test]
fn test_core_error_display() {
    let err: CoreError = CoreError::Internal(String::from("broken"));
    assert_eq!(format!("{err}"), "Internal error: broken");

    let err: CoreError = CoreError::from(DomainError::GroupNotFound(String::from("WH")));
    assert!(format!("{err}").starts_with("Domain violation: "));
}
