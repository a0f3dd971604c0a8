// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, TargetRef, route_business_key, validate_unit_type};

#[test]
fn test_location_shaped_key_routes_to_location() {
    let target: TargetRef = route_business_key("AREA/AISL/0001/0000/0000").unwrap();

    assert!(matches!(target, TargetRef::Location(_)));
}

#[test]
fn test_plain_name_routes_to_group() {
    let target: TargetRef = route_business_key("PICK01").unwrap();

    assert!(matches!(target, TargetRef::Group(ref name) if name.value() == "PICK01"));
}

#[test]
fn test_wrong_segment_count_routes_to_group() {
    let target: TargetRef = route_business_key("A/B/C").unwrap();

    assert!(matches!(target, TargetRef::Group(_)));
}

#[test]
fn test_unroutable_key_is_target_not_found() {
    assert!(matches!(
        route_business_key(""),
        Err(DomainError::TargetNotFound(_))
    ));
    assert!(matches!(
        route_business_key("THIS_NAME_IS_FAR_TOO_LONG"),
        Err(DomainError::TargetNotFound(_))
    ));
}

#[test]
fn test_unit_type_must_not_be_blank() {
    assert!(validate_unit_type("EURO").is_ok());
    assert!(matches!(
        validate_unit_type(" "),
        Err(DomainError::InvalidUnitType(_))
    ));
}
