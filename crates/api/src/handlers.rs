// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Handler functions for API operations.
//!
//! Each handler translates an API request into a core [`Command`], applies
//! it to the current topology and translates the outcome back. Handlers
//! never mutate the topology they are given; the caller installs
//! [`ApiResult::new_topology`] and publishes [`ApiResult::events`].

use crate::ApiResult;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    ChangeTargetRequest, CreateLocationGroupRequest, CreateLocationRequest,
    CreateTransportUnitRequest, DeletedResponse, ErrorCodeRequest, GroupStateRequest,
    LocationGroupView, LocationView, TargetStateResponse, TransportUnitView,
};
use std::str::FromStr;
use time::OffsetDateTime;
use tracing::{debug, info, warn};
use wms_topology::{Command, CoreError, Topology, TransitionResult, apply};
use wms_topology_domain::{
    AvailabilityState, Barcode, BarcodeFormat, ErrorCode, ErrorCodeTransformer, GroupName,
    GroupStateChange, LocationPk, LocationStateChange, LockMode, LockType,
};

/// Applies a command, logging the outcome and translating core errors.
fn run(topology: &Topology, command: Command) -> Result<TransitionResult, ApiError> {
    let name: &'static str = command.name();
    match apply(topology, command) {
        Ok(result) => {
            debug!(command = name, events = result.events.len(), "Command applied");
            Ok(result)
        }
        Err(err) => {
            warn!(command = name, error = %err, "Command rejected");
            Err(translate_core_error(err))
        }
    }
}

fn parse_group_name(raw: &str) -> Result<GroupName, ApiError> {
    GroupName::new(raw).map_err(translate_domain_error)
}

fn parse_location_pk(raw: &str) -> Result<LocationPk, ApiError> {
    LocationPk::parse(raw).map_err(translate_domain_error)
}

fn parse_state(raw: Option<&str>) -> Result<Option<AvailabilityState>, ApiError> {
    raw.map(AvailabilityState::from_str)
        .transpose()
        .map_err(translate_domain_error)
}

fn location_view(topology: &Topology, pk: &LocationPk) -> Result<LocationView, ApiError> {
    topology
        .require_location(pk)
        .map(LocationView::of)
        .map_err(|err| translate_core_error(CoreError::Internal(err.to_string())))
}

fn group_view(topology: &Topology, name: &GroupName) -> Result<LocationGroupView, ApiError> {
    topology
        .require_group(name)
        .map(LocationGroupView::of)
        .map_err(|err| translate_core_error(CoreError::Internal(err.to_string())))
}

/// Creates a location, optionally attached to a group.
///
/// # Errors
///
/// Returns an error if:
/// - The location key or group name is malformed
/// - The location already exists
/// - The named group does not exist
pub fn create_location(
    topology: &Topology,
    request: CreateLocationRequest,
) -> Result<ApiResult<LocationView>, ApiError> {
    let pk: LocationPk = parse_location_pk(&request.location_pk)?;
    let group: Option<GroupName> = request
        .location_group_name
        .as_deref()
        .map(parse_group_name)
        .transpose()?;

    let result: TransitionResult = run(
        topology,
        Command::CreateLocation {
            pk: pk.clone(),
            description: request.description,
            plc_code: request.plc_code,
            group,
        },
    )?;

    info!(location = %pk, "Created location");
    Ok(ApiResult::new(
        location_view(&result.new_topology, &pk)?,
        result,
    ))
}

/// Deletes a location.
///
/// # Errors
///
/// Returns an error if the location does not exist or a transport unit
/// stands on it.
pub fn delete_location(
    topology: &Topology,
    location_pk: &str,
) -> Result<ApiResult<DeletedResponse>, ApiError> {
    let pk: LocationPk = parse_location_pk(location_pk)?;
    let result: TransitionResult = run(topology, Command::DeleteLocation { pk: pk.clone() })?;

    info!(location = %pk, "Deleted location");
    Ok(ApiResult::new(
        DeletedResponse {
            business_key: pk.to_string(),
            message: format!("Deleted location '{pk}'"),
        },
        result,
    ))
}

/// Changes a location's flags and PLC state from a PLC error code.
///
/// Wildcard positions in the code leave the corresponding flag unchanged.
///
/// # Errors
///
/// Returns an error if the location key or error code is malformed or the
/// location does not exist.
pub fn change_location_state(
    topology: &Topology,
    location_pk: &str,
    request: &ErrorCodeRequest,
    transformer: &dyn ErrorCodeTransformer,
) -> Result<ApiResult<LocationView>, ApiError> {
    let pk: LocationPk = parse_location_pk(location_pk)?;
    let code: ErrorCode =
        ErrorCode::new(&request.error_code, request.plc_state).map_err(translate_domain_error)?;
    let change: LocationStateChange = transformer.location_change(&code);

    let result: TransitionResult = run(
        topology,
        Command::ChangeLocationState {
            pk: pk.clone(),
            change,
        },
    )?;

    Ok(ApiResult::new(
        location_view(&result.new_topology, &pk)?,
        result,
    ))
}

/// Creates a location group, optionally below a parent.
///
/// A group created below a parent takes over the parent's state.
///
/// # Errors
///
/// Returns an error if:
/// - The group or parent name is malformed
/// - The group already exists
/// - The parent does not exist
/// - The fill level is outside `0.0..=1.0`
pub fn create_group(
    topology: &Topology,
    request: CreateLocationGroupRequest,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let name: GroupName = parse_group_name(&request.name)?;
    let parent: Option<GroupName> = request
        .parent
        .as_deref()
        .map(parse_group_name)
        .transpose()?;

    let result: TransitionResult = run(
        topology,
        Command::CreateGroup {
            name: name.clone(),
            description: request.description,
            group_type: request.group_type,
            counting_active: request.counting_active,
            max_fill_level: request.max_fill_level,
            parent,
        },
    )?;

    info!(group = %name, "Created location group");
    Ok(ApiResult::new(group_view(&result.new_topology, &name)?, result))
}

/// Deletes an empty location group.
///
/// # Errors
///
/// Returns an error if the group does not exist or still has children or
/// locations.
pub fn delete_group(
    topology: &Topology,
    group_name: &str,
) -> Result<ApiResult<DeletedResponse>, ApiError> {
    let name: GroupName = parse_group_name(group_name)?;
    let result: TransitionResult = run(topology, Command::DeleteGroup { name: name.clone() })?;

    info!(group = %name, "Deleted location group");
    Ok(ApiResult::new(
        DeletedResponse {
            business_key: name.to_string(),
            message: format!("Deleted location group '{name}'"),
        },
        result,
    ))
}

/// Changes a group's infeed and/or outfeed state.
///
/// Only directions that are given and differ from the current state are
/// touched.
///
/// # Errors
///
/// Returns an error if:
/// - A state value is not `AVAILABLE` or `NOT_AVAILABLE`
/// - The group does not exist
/// - A touched direction is locked by another group
/// - The parent is not available for a direction being made available
pub fn change_group_state(
    topology: &Topology,
    group_name: &str,
    request: &GroupStateRequest,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let name: GroupName = parse_group_name(group_name)?;
    let state_in: Option<AvailabilityState> = parse_state(request.statein.as_deref())?;
    let state_out: Option<AvailabilityState> = parse_state(request.stateout.as_deref())?;

    apply_group_state(topology, name, state_in, state_out)
}

/// Changes a group's state from a PLC error code.
///
/// # Errors
///
/// Returns an error if the error code is malformed, plus everything
/// [`change_group_state`] may return.
pub fn change_group_state_by_error_code(
    topology: &Topology,
    group_name: &str,
    request: &ErrorCodeRequest,
    transformer: &dyn ErrorCodeTransformer,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let name: GroupName = parse_group_name(group_name)?;
    let code: ErrorCode =
        ErrorCode::new(&request.error_code, request.plc_state).map_err(translate_domain_error)?;
    let change: GroupStateChange = transformer.group_change(&code);

    apply_group_state(topology, name, change.state_in, change.state_out)
}

fn apply_group_state(
    topology: &Topology,
    name: GroupName,
    state_in: Option<AvailabilityState>,
    state_out: Option<AvailabilityState>,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let result: TransitionResult = run(
        topology,
        Command::ChangeGroupState {
            name: name.clone(),
            state_in,
            state_out,
        },
    )?;

    info!(
        group = %name,
        changed = result.events.len(),
        "Changed location group state"
    );
    Ok(ApiResult::new(group_view(&result.new_topology, &name)?, result))
}

/// Attaches `child` below `parent`. Returns the parent.
///
/// # Errors
///
/// Returns an error if either group does not exist or the attachment
/// would create a cycle.
pub fn add_child(
    topology: &Topology,
    parent: &str,
    child: &str,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let parent: GroupName = parse_group_name(parent)?;
    let child: GroupName = parse_group_name(child)?;

    let result: TransitionResult = run(
        topology,
        Command::AddChild {
            parent: parent.clone(),
            child: child.clone(),
        },
    )?;

    info!(parent = %parent, child = %child, "Attached location group");
    Ok(ApiResult::new(
        group_view(&result.new_topology, &parent)?,
        result,
    ))
}

/// Detaches `child` from `parent`. Returns the parent.
///
/// # Errors
///
/// Returns an error if either group does not exist or `child` is not a
/// direct child of `parent`.
pub fn remove_child(
    topology: &Topology,
    parent: &str,
    child: &str,
) -> Result<ApiResult<LocationGroupView>, ApiError> {
    let parent: GroupName = parse_group_name(parent)?;
    let child: GroupName = parse_group_name(child)?;

    let result: TransitionResult = run(
        topology,
        Command::RemoveChild {
            parent: parent.clone(),
            child: child.clone(),
        },
    )?;

    info!(parent = %parent, child = %child, "Detached location group");
    Ok(ApiResult::new(
        group_view(&result.new_topology, &parent)?,
        result,
    ))
}

/// Attaches a location to a group, moving it out of any previous group.
///
/// # Errors
///
/// Returns an error if the location or group does not exist.
pub fn assign_location(
    topology: &Topology,
    group_name: &str,
    location_pk: &str,
) -> Result<ApiResult<LocationView>, ApiError> {
    let group: GroupName = parse_group_name(group_name)?;
    let pk: LocationPk = parse_location_pk(location_pk)?;

    let result: TransitionResult = run(
        topology,
        Command::AssignLocation {
            pk: pk.clone(),
            group: group.clone(),
        },
    )?;

    info!(group = %group, location = %pk, "Assigned location");
    Ok(ApiResult::new(
        location_view(&result.new_topology, &pk)?,
        result,
    ))
}

/// Applies a lock request to the target addressed by `business_key`.
///
/// `PERMANENT_LOCK` takes the mode `lock` or `unlock`; the other lock
/// types take `IN`, `OUT`, `IN_AND_OUT` or `NONE`.
///
/// # Errors
///
/// Returns an error if:
/// - The lock type or mode is not recognized
/// - No location or group has the business key
/// - The lock type does not apply to the target kind
/// - A group in the way is locked by another group
pub fn change_target(
    topology: &Topology,
    business_key: &str,
    request: &ChangeTargetRequest,
) -> Result<ApiResult<TargetStateResponse>, ApiError> {
    let lock_type: LockType =
        LockType::from_str(&request.lock_type).map_err(translate_domain_error)?;

    let command: Command = if lock_type == LockType::PermanentLock {
        match request.mode.to_ascii_lowercase().as_str() {
            "lock" => Command::Lock {
                business_key: business_key.to_string(),
                reallocation: request.reallocation,
            },
            "unlock" => Command::Release {
                business_key: business_key.to_string(),
                reallocation: request.reallocation,
            },
            other => {
                return Err(ApiError::InvalidInput {
                    field: String::from("mode"),
                    message: format!("Permanent locks take 'lock' or 'unlock', not '{other}'"),
                });
            }
        }
    } else {
        Command::ChangeTarget {
            business_key: business_key.to_string(),
            lock_type,
            lock_mode: LockMode::from_str(&request.mode).map_err(translate_domain_error)?,
            reallocation: request.reallocation,
        }
    };

    let result: TransitionResult = run(topology, command)?;
    let changed: usize = result.events.len().saturating_sub(1);

    info!(
        business_key,
        lock_type = %lock_type,
        mode = %request.mode,
        changed,
        "Changed target state"
    );
    Ok(ApiResult::new(
        TargetStateResponse {
            business_key: business_key.to_string(),
            lock_type: lock_type.to_string(),
            mode: request.mode.clone(),
            changed,
            message: format!("Applied {lock_type} '{}' to '{business_key}'", request.mode),
        },
        result,
    ))
}

/// Registers a transport unit at a location.
///
/// # Errors
///
/// Returns an error if the barcode or type is invalid, the barcode is
/// taken, or the location does not exist.
pub fn create_transport_unit(
    topology: &Topology,
    request: CreateTransportUnitRequest,
    format: &BarcodeFormat,
) -> Result<ApiResult<TransportUnitView>, ApiError> {
    let barcode: Barcode = Barcode::new(&request.barcode, format).map_err(translate_domain_error)?;
    let location: LocationPk = parse_location_pk(&request.actual_location)?;

    let result: TransitionResult = run(
        topology,
        Command::CreateTransportUnit {
            barcode: barcode.clone(),
            unit_type: request.transport_unit_type,
            location,
        },
    )?;

    info!(barcode = %barcode, "Created transport unit");
    let view: TransportUnitView = transport_unit_view(&result.new_topology, &barcode)?;
    Ok(ApiResult::new(view, result))
}

/// Moves a transport unit and stamps the movement time on the target
/// location.
///
/// # Errors
///
/// Returns an error if the barcode or location key is malformed or either
/// does not exist.
pub fn move_transport_unit(
    topology: &Topology,
    barcode: &str,
    actual_location: &str,
    format: &BarcodeFormat,
    at: OffsetDateTime,
) -> Result<ApiResult<TransportUnitView>, ApiError> {
    let barcode: Barcode = Barcode::new(barcode, format).map_err(translate_domain_error)?;
    let to: LocationPk = parse_location_pk(actual_location)?;

    let result: TransitionResult = run(
        topology,
        Command::MoveTransportUnit {
            barcode: barcode.clone(),
            to,
            at,
        },
    )?;

    let view: TransportUnitView = transport_unit_view(&result.new_topology, &barcode)?;
    Ok(ApiResult::new(view, result))
}

/// Looks up a transport unit by barcode.
///
/// # Errors
///
/// Returns an error if the barcode is malformed or unknown.
pub fn find_transport_unit(
    topology: &Topology,
    barcode: &str,
    format: &BarcodeFormat,
) -> Result<TransportUnitView, ApiError> {
    let barcode: Barcode = Barcode::new(barcode, format).map_err(translate_domain_error)?;
    topology
        .transport_unit(&barcode)
        .map(TransportUnitView::of)
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Transport unit"),
            message: format!("Transport unit '{barcode}' does not exist"),
        })
}

fn transport_unit_view(
    topology: &Topology,
    barcode: &Barcode,
) -> Result<TransportUnitView, ApiError> {
    topology
        .transport_unit(barcode)
        .map(TransportUnitView::of)
        .ok_or_else(|| ApiError::Internal {
            message: format!("transport unit '{barcode}' missing after transition"),
        })
}
