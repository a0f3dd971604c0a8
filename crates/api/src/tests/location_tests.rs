// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    BIN_LOCATION, OTHER_LOCATION, create_test_topology, event_names, group,
};
use crate::{
    ApiError, ApiResult, CreateLocationRequest, DeletedResponse, ErrorCodeRequest, LocationView,
    assign_location, change_location_state, create_location, delete_location,
};
use wms_topology::Topology;
use wms_topology_domain::MaskedErrorCodeTransformer;

fn location_request(pk: &str, group: Option<&str>) -> CreateLocationRequest {
    CreateLocationRequest {
        location_pk: pk.to_string(),
        description: Some(String::from("Test location")),
        plc_code: None,
        location_group_name: group.map(str::to_string),
    }
}

fn error_code(code: &str, plc_state: Option<i32>) -> ErrorCodeRequest {
    ErrorCodeRequest {
        error_code: code.to_string(),
        plc_state,
    }
}

#[test]
fn test_create_location_in_group() {
    let topology: Topology = create_test_topology();
    let before: Topology = topology.clone();

    let result: ApiResult<LocationView> = create_location(
        &topology,
        location_request("WH01/AI01/0003/0000/0000", Some("BIN1")),
    )
    .unwrap();

    assert_eq!(topology, before);
    assert_eq!(result.response.location_pk, "WH01/AI01/0003/0000/0000");
    assert_eq!(result.response.location_group_name, Some(String::from("BIN1")));
    assert!(result.response.incoming_active);
    assert!(result.response.outgoing_active);
    assert_eq!(
        event_names(&result),
        vec!["LocationCreated", "LocationGroupChanged"]
    );
    assert_eq!(group(&result.new_topology, "BIN1").locations.len(), 2);
}

#[test]
fn test_create_location_rejects_malformed_key() {
    let topology: Topology = create_test_topology();

    let result: Result<ApiResult<LocationView>, ApiError> =
        create_location(&topology, location_request("WH01/AI01", None));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "locationPK"
    ));
}

#[test]
fn test_create_duplicate_location_is_rejected() {
    let topology: Topology = create_test_topology();

    let result: Result<ApiResult<LocationView>, ApiError> =
        create_location(&topology, location_request(OTHER_LOCATION, None));

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { rule, .. }) if rule == "unique_location_pk"
    ));
}

#[test]
fn test_create_location_in_unknown_group_is_not_found() {
    let topology: Topology = create_test_topology();

    let result: Result<ApiResult<LocationView>, ApiError> = create_location(
        &topology,
        location_request("WH01/AI01/0003/0000/0000", Some("NOPE")),
    );

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_delete_location() {
    let topology: Topology = create_test_topology();

    let result: ApiResult<DeletedResponse> = delete_location(&topology, OTHER_LOCATION).unwrap();

    assert_eq!(result.response.business_key, OTHER_LOCATION);
    assert_eq!(result.new_topology.locations().count(), 1);
    assert_eq!(event_names(&result), vec!["LocationDeleted"]);
}

#[test]
fn test_delete_location_holding_transport_unit_is_unsupported() {
    let topology: Topology = create_test_topology();

    let result: Result<ApiResult<DeletedResponse>, ApiError> =
        delete_location(&topology, BIN_LOCATION);

    assert!(matches!(result, Err(ApiError::Unsupported { .. })));
}

#[test]
fn test_error_code_blocks_both_directions() {
    let topology: Topology = create_test_topology();

    let result: ApiResult<LocationView> = change_location_state(
        &topology,
        BIN_LOCATION,
        &error_code("******11", Some(3)),
        &MaskedErrorCodeTransformer,
    )
    .unwrap();

    assert!(!result.response.incoming_active);
    assert!(!result.response.outgoing_active);
    assert_eq!(result.response.plc_state, 3);
    assert_eq!(event_names(&result), vec!["LocationStateChanged"]);
}

#[test]
fn test_error_code_wildcard_leaves_flag_untouched() {
    let topology: Topology = create_test_topology();

    let result: ApiResult<LocationView> = change_location_state(
        &topology,
        BIN_LOCATION,
        &error_code("******1*", None),
        &MaskedErrorCodeTransformer,
    )
    .unwrap();

    assert!(result.response.incoming_active);
    assert!(!result.response.outgoing_active);
    assert_eq!(result.response.plc_state, 0);
}

#[test]
fn test_unchanged_error_code_emits_no_events() {
    let topology: Topology = create_test_topology();

    let result: ApiResult<LocationView> = change_location_state(
        &topology,
        BIN_LOCATION,
        &error_code("********", None),
        &MaskedErrorCodeTransformer,
    )
    .unwrap();

    assert!(result.events.is_empty());
    assert_eq!(result.new_topology, topology);
}

#[test]
fn test_malformed_error_code_is_invalid_input() {
    let topology: Topology = create_test_topology();

    let result: Result<ApiResult<LocationView>, ApiError> = change_location_state(
        &topology,
        BIN_LOCATION,
        &error_code("12", None),
        &MaskedErrorCodeTransformer,
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { field, .. }) if field == "errorCode"
    ));
}

#[test]
fn test_assign_location_moves_it_between_groups() {
    let topology: Topology = create_test_topology();

    let result: ApiResult<LocationView> =
        assign_location(&topology, "AISLE1", BIN_LOCATION).unwrap();

    assert_eq!(
        result.response.location_group_name,
        Some(String::from("AISLE1"))
    );
    assert!(group(&result.new_topology, "BIN1").locations.is_empty());
    assert_eq!(group(&result.new_topology, "AISLE1").locations.len(), 1);
}
