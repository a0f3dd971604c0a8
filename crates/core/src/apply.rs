// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::arbitration::{change_target, lock, release};
use crate::command::Command;
use crate::error::CoreError;
use crate::snapshot::{
    group_changed, group_snapshot, group_state_changed, location_changed, location_snapshot,
    location_state_changed,
};
use crate::state::TransitionResult;
use crate::topology::Topology;
use wms_topology_domain::{
    GroupName, Location, LocationGroup, LocationPk, TransportUnit, validate_unit_type,
};
use wms_topology_events::TopologyEvent;

/// Applies a command to the topology, producing a new topology and the
/// events describing the change.
///
/// The input topology is never modified. On error nothing of the
/// command's effect is visible.
///
/// # Arguments
///
/// * `topology` - The current topology (immutable)
/// * `command` - The command to apply
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the new topology and events
/// * `Err(CoreError)` if the command is invalid
///
/// # Errors
///
/// Returns an error if:
/// - A referenced target, group, location or transport unit does not exist
/// - The command violates a lock, hierarchy or uniqueness rule
#[allow(clippy::too_many_lines)]
pub fn apply(topology: &Topology, command: Command) -> Result<TransitionResult, CoreError> {
    let mut next: Topology = topology.clone();

    let events: Vec<TopologyEvent> = match command {
        Command::ChangeTarget {
            business_key,
            lock_type,
            lock_mode,
            reallocation,
        } => change_target(&mut next, &business_key, lock_type, lock_mode, reallocation)?,
        Command::Lock {
            business_key,
            reallocation,
        } => lock(&mut next, &business_key, reallocation)?,
        Command::Release {
            business_key,
            reallocation,
        } => release(&mut next, &business_key, reallocation)?,
        Command::CreateGroup {
            name,
            description,
            group_type,
            counting_active,
            max_fill_level,
            parent,
        } => {
            let mut group: LocationGroup = LocationGroup::new(name.clone());
            group.description = description;
            group.group_type = group_type;
            group.counting_active = counting_active;
            group.set_max_fill_level(max_fill_level)?;
            next.create_group(group)?;

            let mut events: Vec<TopologyEvent> = Vec::new();
            if let Some(parent) = parent {
                next.add_child(&parent, &name)?;
                events.push(group_changed(&next, &parent)?);
            }
            events.insert(
                0,
                TopologyEvent::LocationGroupCreated {
                    group: group_snapshot(&next, &name)?,
                },
            );
            events
        }
        Command::DeleteGroup { name } => {
            let parent: Option<GroupName> = next.require_group(&name)?.parent.clone();
            let released: Vec<GroupName> = next.delete_group(&name)?;

            let mut events: Vec<TopologyEvent> = vec![TopologyEvent::LocationGroupDeleted {
                name: name.to_string(),
            }];
            if let Some(parent) = parent {
                events.push(group_changed(&next, &parent)?);
            }
            events.extend(group_state_changed(&next, &released)?);
            events
        }
        Command::AddChild { parent, child } => {
            let previous: Option<GroupName> = next.require_group(&child)?.parent.clone();
            let changed: Vec<GroupName> = next.add_child(&parent, &child)?;

            let mut events: Vec<TopologyEvent> = Vec::new();
            if let Some(previous) = previous.filter(|previous| *previous != parent) {
                events.push(group_changed(&next, &previous)?);
            }
            events.push(group_changed(&next, &parent)?);
            events.push(group_changed(&next, &child)?);
            events.extend(group_state_changed(&next, &changed)?);
            events
        }
        Command::RemoveChild { parent, child } => {
            next.remove_child(&parent, &child)?;
            vec![group_changed(&next, &parent)?, group_changed(&next, &child)?]
        }
        Command::ChangeGroupState {
            name,
            state_in,
            state_out,
        } => {
            let changed: Vec<GroupName> = next.change_state(&name, state_in, state_out)?;
            group_state_changed(&next, &changed)?
        }
        Command::SetOperationMode { name, mode } => {
            if next.set_operation_mode(&name, mode)? {
                vec![group_changed(&next, &name)?]
            } else {
                Vec::new()
            }
        }
        Command::CreateLocation {
            pk,
            description,
            plc_code,
            group,
        } => {
            let mut location: Location = Location::new(pk.clone());
            location.description = description;
            location.plc_code = plc_code;
            location.location_group = group.clone();
            next.create_location(location)?;

            let mut events: Vec<TopologyEvent> = vec![TopologyEvent::LocationCreated {
                location: location_snapshot(&next, &pk)?,
            }];
            if let Some(group) = group {
                events.push(group_changed(&next, &group)?);
            }
            events
        }
        Command::DeleteLocation { pk } => {
            let group: Option<GroupName> = next.require_location(&pk)?.location_group.clone();
            next.delete_location(&pk)?;

            let mut events: Vec<TopologyEvent> = vec![TopologyEvent::LocationDeleted {
                pk: pk.to_string(),
            }];
            if let Some(group) = group {
                events.push(group_changed(&next, &group)?);
            }
            events
        }
        Command::AssignLocation { pk, group } => {
            let previous: Option<GroupName> = next.require_location(&pk)?.location_group.clone();
            next.assign_location(&pk, &group)?;

            let mut events: Vec<TopologyEvent> = vec![location_changed(&next, &pk)?];
            if let Some(previous) = previous.filter(|previous| *previous != group) {
                events.push(group_changed(&next, &previous)?);
            }
            events.push(group_changed(&next, &group)?);
            events
        }
        Command::UnassignLocation { pk } => {
            let previous: Option<GroupName> = next.require_location(&pk)?.location_group.clone();
            next.unassign_location(&pk)?;

            let mut events: Vec<TopologyEvent> = vec![location_changed(&next, &pk)?];
            if let Some(previous) = previous {
                events.push(group_changed(&next, &previous)?);
            }
            events
        }
        Command::ChangeLocationState { pk, change } => {
            if next.change_location_state(&pk, &change)? {
                vec![location_state_changed(&next, &pk)?]
            } else {
                Vec::new()
            }
        }
        Command::CreateTransportUnit {
            barcode,
            unit_type,
            location,
        } => {
            validate_unit_type(&unit_type)?;
            let event: TopologyEvent = TopologyEvent::TransportUnitCreated {
                barcode: barcode.to_string(),
                unit_type: unit_type.clone(),
                location: location.to_string(),
            };
            next.create_transport_unit(TransportUnit::new(barcode, unit_type, location))?;
            vec![event]
        }
        Command::MoveTransportUnit { barcode, to, at } => {
            let from: LocationPk = next.move_transport_unit(&barcode, &to, at)?;
            vec![TopologyEvent::TransportUnitMoved {
                barcode: barcode.to_string(),
                from: from.to_string(),
                to: to.to_string(),
            }]
        }
    };

    Ok(TransitionResult {
        new_topology: next,
        events,
    })
}
