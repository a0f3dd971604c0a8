// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Alignment, Barcode, BarcodeFormat, DomainError, GroupName, LocationGroup, LocationPk,
    TargetRef,
};

#[test]
fn test_location_pk_parses_five_segments() {
    let pk: LocationPk = LocationPk::parse("AREA/AISL/0001/0000/0000").unwrap();

    assert_eq!(pk.area(), "AREA");
    assert_eq!(pk.aisle(), "AISL");
    assert_eq!(pk.x(), "0001");
    assert_eq!(pk.y(), "0000");
    assert_eq!(pk.z(), "0000");
    assert_eq!(pk.to_string(), "AREA/AISL/0001/0000/0000");
}

#[test]
fn test_location_pk_rejects_wrong_segment_count() {
    let result = LocationPk::parse("AREA/AISL/0001/0000");

    assert!(matches!(result, Err(DomainError::InvalidLocationPk(_))));
    assert!(!LocationPk::is_location_pk("PICK01"));
    assert!(!LocationPk::is_location_pk("A/B/C/D/E/F"));
}

#[test]
fn test_location_pk_rejects_long_or_empty_segment() {
    assert!(LocationPk::parse("AREAX/AISL/0001/0000/0000").is_err());
    assert!(LocationPk::parse("AREA//0001/0000/0000").is_err());
    assert!(LocationPk::new("A", "B", "C", "D", "E").is_ok());
}

#[test]
fn test_location_pk_orders_by_segments() {
    let first: LocationPk = LocationPk::parse("A/B/0001/0000/0000").unwrap();
    let second: LocationPk = LocationPk::parse("A/B/0002/0000/0000").unwrap();

    assert!(first < second);
}

#[test]
fn test_location_pk_serializes_as_string() {
    let pk: LocationPk = LocationPk::parse("EXT/0000/0000/0000/0000").unwrap();

    let json: String = serde_json::to_string(&pk).unwrap();
    assert_eq!(json, "\"EXT/0000/0000/0000/0000\"");

    let back: LocationPk = serde_json::from_str(&json).unwrap();
    assert_eq!(back, pk);
    assert!(serde_json::from_str::<LocationPk>("\"EXT/0000\"").is_err());
}

#[test]
fn test_group_name_length_limit() {
    assert!(GroupName::new("ZILE").is_ok());
    assert!(GroupName::new("ABCDEFGHIJKLMNOPQRST").is_ok());
    assert!(matches!(
        GroupName::new("ABCDEFGHIJKLMNOPQRSTU"),
        Err(DomainError::InvalidGroupName(_))
    ));
    assert!(matches!(
        GroupName::new("   "),
        Err(DomainError::InvalidGroupName(_))
    ));
}

#[test]
fn test_target_ref_business_key() {
    let location: TargetRef = TargetRef::Location(LocationPk::parse("A/B/C/D/E").unwrap());
    let group: TargetRef = TargetRef::Group(GroupName::new("PICK01").unwrap());

    assert_eq!(location.business_key(), "A/B/C/D/E");
    assert_eq!(group.business_key(), "PICK01");
}

#[test]
fn test_new_group_is_available_root() {
    let group: LocationGroup = LocationGroup::new(GroupName::new("WH").unwrap());

    assert!(group.is_root());
    assert!(group.is_empty());
    assert!(group.is_infeed_allowed());
    assert!(group.is_outfeed_allowed());
    assert!(group.state_in_locker().is_none());
    assert!(group.state_out_locker().is_none());
}

#[test]
fn test_max_fill_level_must_be_a_fraction() {
    let mut group: LocationGroup = LocationGroup::new(GroupName::new("WH").unwrap());

    assert!(group.set_max_fill_level(0.75).is_ok());
    assert!((group.max_fill_level() - 0.75).abs() < f32::EPSILON);
    assert!(matches!(
        group.set_max_fill_level(1.5),
        Err(DomainError::InvalidFillLevel(_))
    ));
    assert!(group.set_max_fill_level(-0.1).is_err());
    assert!((group.max_fill_level() - 0.75).abs() < f32::EPSILON);
}

#[test]
fn test_barcode_right_aligned_padding() {
    let format: BarcodeFormat = BarcodeFormat {
        length: 8,
        pad: '0',
        alignment: Alignment::Right,
    };

    let barcode: Barcode = Barcode::new("4711", &format).unwrap();
    assert_eq!(barcode.value(), "00004711");
}

#[test]
fn test_barcode_left_aligned_padding() {
    let format: BarcodeFormat = BarcodeFormat {
        length: 6,
        pad: '*',
        alignment: Alignment::Left,
    };

    let barcode: Barcode = Barcode::new("TU1", &format).unwrap();
    assert_eq!(barcode.value(), "TU1***");
}

#[test]
fn test_barcode_rejects_blank_and_too_long() {
    let format: BarcodeFormat = BarcodeFormat {
        length: 4,
        ..BarcodeFormat::default()
    };

    assert!(matches!(
        Barcode::new("  ", &format),
        Err(DomainError::InvalidBarcode(_))
    ));
    assert!(Barcode::new("12345", &format).is_err());
    assert_eq!(Barcode::new("1234", &format).unwrap().value(), "1234");
}
