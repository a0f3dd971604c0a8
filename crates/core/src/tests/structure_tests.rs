// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Topology;
use crate::tests::helpers::{
    BIN_LOCATION, OTHER_LOCATION, create_test_topology, create_test_warehouse, locker, name, pk,
    state,
};
use wms_topology_domain::{
    AvailabilityState, Direction, DomainError, GroupName, Location, LocationGroup, TargetRef,
};

#[test]
fn test_create_group_rejects_duplicates() {
    let mut topology: Topology = create_test_topology(&["WH"]);

    let result: Result<(), DomainError> = topology.create_group(LocationGroup::new(name("WH")));

    assert!(matches!(result, Err(DomainError::DuplicateGroup(_))));
}

#[test]
fn test_create_group_rejects_prebuilt_structure() {
    let mut topology: Topology = Topology::new();
    let mut group: LocationGroup = LocationGroup::new(name("WH"));
    group.parent = Some(name("ROOT"));

    assert!(matches!(
        topology.create_group(group),
        Err(DomainError::UnsupportedOperation(_))
    ));
}

#[test]
fn test_add_child_links_both_sides() {
    let topology: Topology = create_test_warehouse();

    let wh: &LocationGroup = topology.group(&name("WH")).unwrap();
    let aisle: &LocationGroup = topology.group(&name("AISLE1")).unwrap();

    assert!(wh.children.contains(&name("AISLE1")));
    assert_eq!(aisle.parent, Some(name("WH")));
    assert!(wh.is_root());
    assert_eq!(
        topology.descendants(&name("WH")).unwrap(),
        vec![name("AISLE1"), name("BIN1")]
    );
    assert_eq!(
        topology.ancestors(&name("BIN1")).unwrap(),
        vec![name("AISLE1"), name("WH")]
    );
}

#[test]
fn test_add_child_rejects_self_and_cycles() {
    let mut topology: Topology = create_test_warehouse();
    let before: Topology = topology.clone();

    assert!(matches!(
        topology.add_child(&name("WH"), &name("WH")),
        Err(DomainError::CyclicHierarchy { .. })
    ));
    assert!(matches!(
        topology.add_child(&name("BIN1"), &name("WH")),
        Err(DomainError::CyclicHierarchy { .. })
    ));
    assert_eq!(topology, before);
}

#[test]
fn test_add_child_moves_between_parents() {
    let mut topology: Topology = create_test_warehouse();
    topology.create_group(LocationGroup::new(name("AISLE2"))).unwrap();
    topology.add_child(&name("WH"), &name("AISLE2")).unwrap();

    topology.add_child(&name("AISLE2"), &name("BIN1")).unwrap();

    assert!(
        !topology
            .group(&name("AISLE1"))
            .unwrap()
            .children
            .contains(&name("BIN1"))
    );
    assert!(
        topology
            .group(&name("AISLE2"))
            .unwrap()
            .children
            .contains(&name("BIN1"))
    );
    assert_eq!(
        topology.group(&name("BIN1")).unwrap().parent,
        Some(name("AISLE2"))
    );
}

#[test]
fn test_attached_child_inherits_parent_state_and_locker() {
    let mut topology: Topology = create_test_warehouse();
    topology
        .change_state_in(&name("WH"), AvailabilityState::NotAvailable)
        .unwrap();
    topology.create_group(LocationGroup::new(name("AISLE2"))).unwrap();

    let changed: Vec<GroupName> = topology.add_child(&name("AISLE1"), &name("AISLE2")).unwrap();

    assert_eq!(changed, vec![name("AISLE2")]);
    assert_eq!(
        state(&topology, "AISLE2", Direction::In),
        AvailabilityState::NotAvailable
    );
    assert_eq!(
        locker(&topology, "AISLE2", Direction::In),
        locker(&topology, "BIN1", Direction::In)
    );
    assert_eq!(locker(&topology, "AISLE2", Direction::Out), None);

    topology
        .change_state_in(&name("WH"), AvailabilityState::Available)
        .unwrap();
    assert_eq!(
        state(&topology, "AISLE2", Direction::In),
        AvailabilityState::Available
    );
}

#[test]
fn test_attaching_keeps_child_own_lock() {
    let mut topology: Topology = create_test_topology(&["WH", "AISLE1"]);
    topology
        .change_state_out(&name("AISLE1"), AvailabilityState::NotAvailable)
        .unwrap();

    topology.add_child(&name("WH"), &name("AISLE1")).unwrap();

    assert_eq!(
        state(&topology, "AISLE1", Direction::Out),
        AvailabilityState::NotAvailable
    );
    assert_eq!(
        locker(&topology, "AISLE1", Direction::Out),
        Some(String::from("AISLE1"))
    );
}

#[test]
fn test_remove_child_keeps_state() {
    let mut topology: Topology = create_test_warehouse();
    topology
        .change_state_out(&name("WH"), AvailabilityState::NotAvailable)
        .unwrap();

    topology.remove_child(&name("WH"), &name("AISLE1")).unwrap();

    let aisle: &LocationGroup = topology.group(&name("AISLE1")).unwrap();
    assert!(aisle.is_root());
    assert_eq!(aisle.state_out(), AvailabilityState::NotAvailable);
    assert_eq!(aisle.state_out_locker(), Some(&name("WH")));
    assert!(topology.group(&name("WH")).unwrap().children.is_empty());
}

#[test]
fn test_remove_child_rejects_non_child() {
    let mut topology: Topology = create_test_warehouse();

    assert!(matches!(
        topology.remove_child(&name("WH"), &name("BIN1")),
        Err(DomainError::NotAChild { .. })
    ));
}

#[test]
fn test_delete_group_requires_empty_group() {
    let mut topology: Topology = create_test_warehouse();

    assert!(matches!(
        topology.delete_group(&name("AISLE1")),
        Err(DomainError::GroupNotEmpty { children: 1, locations: 0, .. })
    ));
    assert!(matches!(
        topology.delete_group(&name("BIN1")),
        Err(DomainError::GroupNotEmpty { children: 0, locations: 1, .. })
    ));
}

#[test]
fn test_delete_group_detaches_and_clears_its_locks() {
    let mut topology: Topology = create_test_topology(&["WH", "AISLE1"]);
    topology.add_child(&name("WH"), &name("AISLE1")).unwrap();
    topology
        .change_state_in(&name("WH"), AvailabilityState::NotAvailable)
        .unwrap();
    topology.remove_child(&name("WH"), &name("AISLE1")).unwrap();

    let released: Vec<GroupName> = topology.delete_group(&name("WH")).unwrap();

    assert_eq!(released, vec![name("AISLE1")]);
    assert!(topology.group(&name("WH")).is_none());
    assert_eq!(
        state(&topology, "AISLE1", Direction::In),
        AvailabilityState::NotAvailable
    );
    assert_eq!(locker(&topology, "AISLE1", Direction::In), None);
    topology
        .change_state_in(&name("AISLE1"), AvailabilityState::Available)
        .unwrap();
}

#[test]
fn test_location_membership_is_bidirectional() {
    let mut topology: Topology = create_test_warehouse();
    topology.group_mut(&name("AISLE1")).unwrap().counting_active = false;

    topology
        .assign_location(&pk(BIN_LOCATION), &name("AISLE1"))
        .unwrap();

    let location: &Location = topology.location(&pk(BIN_LOCATION)).unwrap();
    assert_eq!(location.location_group, Some(name("AISLE1")));
    assert!(!location.counting_active);
    assert!(
        topology
            .group(&name("AISLE1"))
            .unwrap()
            .locations
            .contains(&pk(BIN_LOCATION))
    );
    assert!(topology.group(&name("BIN1")).unwrap().locations.is_empty());

    topology.unassign_location(&pk(BIN_LOCATION)).unwrap();
    assert!(topology.group(&name("AISLE1")).unwrap().locations.is_empty());
    assert!(
        topology
            .location(&pk(BIN_LOCATION))
            .unwrap()
            .location_group
            .is_none()
    );
}

#[test]
fn test_create_location_with_unknown_group_changes_nothing() {
    let mut topology: Topology = create_test_warehouse();
    let before: Topology = topology.clone();
    let mut location: Location = Location::new(pk("WH01/AI01/0003/0000/0000"));
    location.location_group = Some(name("NOPE"));

    assert!(matches!(
        topology.create_location(location),
        Err(DomainError::GroupNotFound(_))
    ));
    assert_eq!(topology, before);
}

#[test]
fn test_delete_location_refuses_occupied_location() {
    let mut topology: Topology = create_test_warehouse();

    assert!(matches!(
        topology.delete_location(&pk(BIN_LOCATION)),
        Err(DomainError::UnsupportedOperation(_))
    ));

    let removed: Location = topology.delete_location(&pk(OTHER_LOCATION)).unwrap();
    assert_eq!(removed.pk, pk(OTHER_LOCATION));
    assert!(topology.location(&pk(OTHER_LOCATION)).is_none());
}

#[test]
fn test_resolve_target_routes_by_key_shape() {
    let topology: Topology = create_test_warehouse();

    assert_eq!(
        topology.resolve_target(BIN_LOCATION).unwrap(),
        TargetRef::Location(pk(BIN_LOCATION))
    );
    assert_eq!(
        topology.resolve_target("AISLE1").unwrap(),
        TargetRef::Group(name("AISLE1"))
    );
    assert!(matches!(
        topology.resolve_target("WH01/AI01/0009/0000/0000"),
        Err(DomainError::TargetNotFound(_))
    ));
    assert!(matches!(
        topology.resolve_target("UNKNOWN"),
        Err(DomainError::TargetNotFound(_))
    ));
}
