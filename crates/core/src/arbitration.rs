// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lock requests addressed to a target by business key.
//!
//! A target is either a location or a location group. Allocation locks
//! change availability, operation locks change the physical operation mode,
//! and permanent locks take a target out of service altogether.

use crate::error::CoreError;
use crate::snapshot::{group_changed, group_state_changed, location_state_changed};
use crate::topology::Topology;
use wms_topology_domain::{
    AvailabilityState, DomainError, GroupName, LocationPk, LocationStateChange, LockMode,
    LockType, OperationMode, TargetRef,
};
use wms_topology_events::TopologyEvent;

const MODE_LOCK: &str = "LOCK";
const MODE_UNLOCK: &str = "UNLOCK";

/// Applies an allocation or operation lock to the target.
///
/// Returns the entity events followed by one `TargetStateChanged` event.
pub(crate) fn change_target(
    topology: &mut Topology,
    business_key: &str,
    lock_type: LockType,
    lock_mode: LockMode,
    reallocation: bool,
) -> Result<Vec<TopologyEvent>, CoreError> {
    let target: TargetRef = topology.resolve_target(business_key)?;
    let mut events: Vec<TopologyEvent> = match (lock_type, &target) {
        (LockType::PermanentLock, _) => {
            return Err(DomainError::UnsupportedOperation(String::from(
                "permanent locks are set with lock and release",
            ))
            .into());
        }
        (LockType::AllocationLock, TargetRef::Location(pk)) => {
            let (state_in, state_out) = lock_mode.availability();
            set_location_flags(topology, pk, state_in, state_out)?
        }
        (LockType::AllocationLock, TargetRef::Group(name)) => {
            let (state_in, state_out) = lock_mode.availability();
            let changed: Vec<GroupName> =
                topology.change_state_in_and_out(name, state_in, state_out)?;
            group_state_changed(topology, &changed)?
        }
        (LockType::OperationLock, TargetRef::Location(pk)) => {
            return Err(DomainError::UnsupportedOperation(format!(
                "operation locks apply to location groups, '{pk}' is a location"
            ))
            .into());
        }
        (LockType::OperationLock, TargetRef::Group(name)) => {
            set_group_mode(topology, name, lock_mode.operation_mode())?
        }
    };
    events.push(TopologyEvent::TargetStateChanged {
        business_key: target.business_key(),
        lock_type,
        mode: lock_mode.as_str().to_string(),
        reallocation,
    });
    Ok(events)
}

/// Permanently locks the target: both directions become unavailable and a
/// group's operation mode drops to `NO_OPERATION`.
pub(crate) fn lock(
    topology: &mut Topology,
    business_key: &str,
    reallocation: bool,
) -> Result<Vec<TopologyEvent>, CoreError> {
    permanent(
        topology,
        business_key,
        AvailabilityState::NotAvailable,
        OperationMode::NoOperation,
        MODE_LOCK,
        reallocation,
    )
}

/// Releases a permanent lock: both directions become available and a
/// group's operation mode returns to `INFEED_AND_OUTFEED`.
pub(crate) fn release(
    topology: &mut Topology,
    business_key: &str,
    reallocation: bool,
) -> Result<Vec<TopologyEvent>, CoreError> {
    permanent(
        topology,
        business_key,
        AvailabilityState::Available,
        OperationMode::InfeedAndOutfeed,
        MODE_UNLOCK,
        reallocation,
    )
}

fn permanent(
    topology: &mut Topology,
    business_key: &str,
    state: AvailabilityState,
    mode: OperationMode,
    mode_name: &str,
    reallocation: bool,
) -> Result<Vec<TopologyEvent>, CoreError> {
    let target: TargetRef = topology.resolve_target(business_key)?;
    let mut events: Vec<TopologyEvent> = match &target {
        TargetRef::Location(pk) => set_location_flags(topology, pk, state, state)?,
        TargetRef::Group(name) => {
            let changed: Vec<GroupName> = topology.change_state_in_and_out(name, state, state)?;
            let mut events: Vec<TopologyEvent> = group_state_changed(topology, &changed)?;
            events.extend(set_group_mode(topology, name, mode)?);
            events
        }
    };
    events.push(TopologyEvent::TargetStateChanged {
        business_key: target.business_key(),
        lock_type: LockType::PermanentLock,
        mode: mode_name.to_string(),
        reallocation,
    });
    Ok(events)
}

fn set_location_flags(
    topology: &mut Topology,
    pk: &LocationPk,
    state_in: AvailabilityState,
    state_out: AvailabilityState,
) -> Result<Vec<TopologyEvent>, CoreError> {
    let change: LocationStateChange = LocationStateChange {
        plc_state: None,
        infeed_active: Some(state_in.is_available()),
        outfeed_active: Some(state_out.is_available()),
    };
    if topology.change_location_state(pk, &change)? {
        Ok(vec![location_state_changed(topology, pk)?])
    } else {
        Ok(Vec::new())
    }
}

fn set_group_mode(
    topology: &mut Topology,
    name: &GroupName,
    mode: OperationMode,
) -> Result<Vec<TopologyEvent>, CoreError> {
    if topology.set_operation_mode(name, mode)? {
        Ok(vec![group_changed(topology, name)?])
    } else {
        Ok(Vec::new())
    }
}
