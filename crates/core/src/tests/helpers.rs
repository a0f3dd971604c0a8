// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Topology;
use wms_topology_domain::{
    AvailabilityState, Barcode, BarcodeFormat, Direction, GroupName, Location, LocationGroup,
    LocationPk, TransportUnit,
};

pub const BIN_LOCATION: &str = "WH01/AI01/0001/0000/0000";
pub const OTHER_LOCATION: &str = "WH01/AI01/0002/0000/0000";

pub fn name(value: &str) -> GroupName {
    GroupName::new(value).unwrap()
}

pub fn pk(value: &str) -> LocationPk {
    LocationPk::parse(value).unwrap()
}

pub fn barcode(value: &str) -> Barcode {
    Barcode::new(value, &BarcodeFormat::default()).unwrap()
}

/// Creates standalone groups with the given names.
pub fn create_test_topology(names: &[&str]) -> Topology {
    let mut topology: Topology = Topology::new();
    for value in names {
        topology.create_group(LocationGroup::new(name(value))).unwrap();
    }
    topology
}

/// `WH > AISLE1 > BIN1` with one location in `BIN1` and a transport unit on it.
pub fn create_test_warehouse() -> Topology {
    let mut topology: Topology = create_test_topology(&["WH", "AISLE1", "BIN1"]);
    topology.add_child(&name("WH"), &name("AISLE1")).unwrap();
    topology.add_child(&name("AISLE1"), &name("BIN1")).unwrap();

    let mut location: Location = Location::new(pk(BIN_LOCATION));
    location.location_group = Some(name("BIN1"));
    topology.create_location(location).unwrap();
    topology
        .create_location(Location::new(pk(OTHER_LOCATION)))
        .unwrap();
    topology
        .create_transport_unit(TransportUnit::new(
            barcode("4711"),
            String::from("EURO"),
            pk(BIN_LOCATION),
        ))
        .unwrap();
    topology
}

pub fn state(topology: &Topology, group: &str, direction: Direction) -> AvailabilityState {
    topology.group(&name(group)).unwrap().state(direction)
}

pub fn locker(topology: &Topology, group: &str, direction: Direction) -> Option<String> {
    topology
        .group(&name(group))
        .unwrap()
        .locker(direction)
        .map(ToString::to_string)
}
