// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use wms_topology::Topology;
use wms_topology_domain::{BarcodeFormat, GroupName, LocationGroup};
use wms_topology_events::TopologyEvent;

use crate::{ApiResult, GroupStateRequest, build_topology, load_seed};

pub const BIN_LOCATION: &str = "WH01/AI01/0001/0000/0000";
pub const OTHER_LOCATION: &str = "WH01/AI01/0002/0000/0000";

/// WH > AISLE1 > BIN1, with one location in BIN1 carrying transport unit
/// 4711 and one unassigned location.
pub const TEST_SEED: &str = r#"{
    "groups": [
        {
            "name": "WH",
            "groupType": "WAREHOUSE",
            "children": [
                {
                    "name": "AISLE1",
                    "groupType": "AISLE",
                    "children": [
                        {
                            "name": "BIN1",
                            "locations": ["WH01/AI01/0001/0000/0000"]
                        }
                    ]
                }
            ]
        }
    ],
    "locations": [
        { "locationPk": "WH01/AI01/0002/0000/0000", "plcCode": "PLC-2" }
    ],
    "transportUnits": [
        {
            "barcode": "4711",
            "transportUnitType": "EURO",
            "actualLocation": "WH01/AI01/0001/0000/0000"
        }
    ]
}"#;

pub fn create_test_topology() -> Topology {
    build_topology(&load_seed(TEST_SEED).unwrap(), &BarcodeFormat::default()).unwrap()
}

pub fn group<'a>(topology: &'a Topology, name: &str) -> &'a LocationGroup {
    topology.group(&GroupName::new(name).unwrap()).unwrap()
}

pub fn state_in(value: &str) -> GroupStateRequest {
    GroupStateRequest {
        statein: Some(value.to_string()),
        stateout: None,
    }
}

pub fn event_names<T>(result: &ApiResult<T>) -> Vec<&'static str> {
    result.events.iter().map(TopologyEvent::name).collect()
}
