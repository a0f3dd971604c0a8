// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{BIN_LOCATION, OTHER_LOCATION, create_test_topology};
use crate::{
    ApiError, GroupQuery, LocationGroupView, LocationQuery, LocationView, find_groups,
    find_locations,
};
use wms_topology::Topology;

fn location_keys(views: &[LocationView]) -> Vec<&str> {
    views.iter().map(|view| view.location_pk.as_str()).collect()
}

#[test]
fn test_find_all_locations() {
    let topology: Topology = create_test_topology();

    let views: Vec<LocationView> = find_locations(&topology, &LocationQuery::default()).unwrap();

    assert_eq!(location_keys(&views), vec![BIN_LOCATION, OTHER_LOCATION]);
}

#[test]
fn test_find_location_by_key() {
    let topology: Topology = create_test_topology();
    let mut query: LocationQuery = LocationQuery::default();
    query.location_pk = Some(OTHER_LOCATION.to_string());

    let views: Vec<LocationView> = find_locations(&topology, &query).unwrap();

    assert_eq!(location_keys(&views), vec![OTHER_LOCATION]);
    assert_eq!(views[0].plc_code, Some(String::from("PLC-2")));
}

#[test]
fn test_find_unknown_location_by_key_is_not_found() {
    let topology: Topology = create_test_topology();
    let mut query: LocationQuery = LocationQuery::default();
    query.location_pk = Some(String::from("WH01/AI01/0099/0000/0000"));

    let result: Result<Vec<LocationView>, ApiError> = find_locations(&topology, &query);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_find_locations_by_coordinate_pattern() {
    let topology: Topology = create_test_topology();
    let mut query: LocationQuery = LocationQuery::default();
    query.area = Some(String::from("WH%"));
    query.x = Some(String::from("000_"));

    let all: Vec<LocationView> = find_locations(&topology, &query).unwrap();
    query.x = Some(String::from("%2"));
    let second: Vec<LocationView> = find_locations(&topology, &query).unwrap();

    assert_eq!(all.len(), 2);
    assert_eq!(location_keys(&second), vec![OTHER_LOCATION]);
}

#[test]
fn test_find_locations_by_group_and_plc_code() {
    let topology: Topology = create_test_topology();

    let mut by_group: LocationQuery = LocationQuery::default();
    by_group.location_group_names = Some(String::from("AISLE1, BIN1"));
    let mut by_plc: LocationQuery = LocationQuery::default();
    by_plc.plc_code = Some(String::from("PLC-2"));

    assert_eq!(
        location_keys(&find_locations(&topology, &by_group).unwrap()),
        vec![BIN_LOCATION]
    );
    assert_eq!(
        location_keys(&find_locations(&topology, &by_plc).unwrap()),
        vec![OTHER_LOCATION]
    );
}

#[test]
fn test_find_groups() {
    let topology: Topology = create_test_topology();

    let all: Vec<LocationGroupView> = find_groups(&topology, &GroupQuery::default()).unwrap();
    let named: Vec<LocationGroupView> = find_groups(
        &topology,
        &GroupQuery {
            name: Some(String::from("AISLE1")),
            names: None,
        },
    )
    .unwrap();
    let listed: Vec<LocationGroupView> = find_groups(
        &topology,
        &GroupQuery {
            name: None,
            names: Some(String::from("BIN1,WH,NOPE")),
        },
    )
    .unwrap();

    assert_eq!(all.len(), 3);
    assert_eq!(named[0].children, vec![String::from("BIN1")]);
    assert_eq!(
        listed.iter().map(|view| view.name.as_str()).collect::<Vec<&str>>(),
        vec!["BIN1", "WH"]
    );
}

#[test]
fn test_find_unknown_group_by_name_is_not_found() {
    let topology: Topology = create_test_topology();

    let result: Result<Vec<LocationGroupView>, ApiError> = find_groups(
        &topology,
        &GroupQuery {
            name: Some(String::from("NOPE")),
            names: None,
        },
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
