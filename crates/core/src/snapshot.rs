// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::topology::Topology;
use wms_topology_domain::{GroupName, LocationPk};
use wms_topology_events::{GroupSnapshot, LocationSnapshot, TopologyEvent};

pub(crate) fn group_snapshot(
    topology: &Topology,
    name: &GroupName,
) -> Result<GroupSnapshot, CoreError> {
    topology
        .group(name)
        .map(GroupSnapshot::of)
        .ok_or_else(|| CoreError::Internal(format!("group '{name}' vanished during transition")))
}

pub(crate) fn location_snapshot(
    topology: &Topology,
    pk: &LocationPk,
) -> Result<LocationSnapshot, CoreError> {
    topology
        .location(pk)
        .map(LocationSnapshot::of)
        .ok_or_else(|| CoreError::Internal(format!("location '{pk}' vanished during transition")))
}

pub(crate) fn group_changed(
    topology: &Topology,
    name: &GroupName,
) -> Result<TopologyEvent, CoreError> {
    Ok(TopologyEvent::LocationGroupChanged {
        group: group_snapshot(topology, name)?,
    })
}

/// One `LocationGroupStateChanged` event per name, in the given order.
pub(crate) fn group_state_changed(
    topology: &Topology,
    names: &[GroupName],
) -> Result<Vec<TopologyEvent>, CoreError> {
    names
        .iter()
        .map(|name| {
            Ok(TopologyEvent::LocationGroupStateChanged {
                group: group_snapshot(topology, name)?,
            })
        })
        .collect()
}

pub(crate) fn location_changed(
    topology: &Topology,
    pk: &LocationPk,
) -> Result<TopologyEvent, CoreError> {
    Ok(TopologyEvent::LocationChanged {
        location: location_snapshot(topology, pk)?,
    })
}

pub(crate) fn location_state_changed(
    topology: &Topology,
    pk: &LocationPk,
) -> Result<TopologyEvent, CoreError> {
    Ok(TopologyEvent::LocationStateChanged {
        location: location_snapshot(topology, pk)?,
    })
}
