// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use wms_topology_domain::{
    AvailabilityState, Location, LocationGroup, OperationMode, TransportUnit,
};

/// API view of a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    /// The location key, `AREA/AISLE/X/Y/Z`.
    pub location_pk: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional PLC address.
    pub plc_code: Option<String>,
    /// The owning group name, if any.
    pub location_group_name: Option<String>,
    /// Whether infeed is allowed by the location itself.
    pub incoming_active: bool,
    /// Whether outfeed is allowed by the location itself.
    pub outgoing_active: bool,
    /// Whether the location counts toward fill levels.
    pub counting_active: bool,
    /// State reported by the PLC.
    pub plc_state: i32,
    /// When a transport unit last arrived.
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_movement: Option<OffsetDateTime>,
}

impl LocationView {
    /// Builds the view of `location`.
    #[must_use]
    pub fn of(location: &Location) -> Self {
        Self {
            location_pk: location.pk.to_string(),
            description: location.description.clone(),
            plc_code: location.plc_code.clone(),
            location_group_name: location.location_group.as_ref().map(ToString::to_string),
            incoming_active: location.infeed_active,
            outgoing_active: location.outfeed_active,
            counting_active: location.counting_active,
            plc_state: location.plc_state,
            last_movement: location.last_movement,
        }
    }
}

/// API view of a location group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationGroupView {
    /// The group name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional classification.
    pub group_type: Option<String>,
    /// The parent group name, if any.
    pub parent: Option<String>,
    /// Direct child group names.
    pub children: Vec<String>,
    /// Keys of attached locations.
    pub locations: Vec<String>,
    /// Infeed state.
    pub group_state_in: AvailabilityState,
    /// Outfeed state.
    pub group_state_out: AvailabilityState,
    /// Group holding the infeed lock.
    pub state_in_locker: Option<String>,
    /// Group holding the outfeed lock.
    pub state_out_locker: Option<String>,
    /// Physical operation mode.
    pub operation_mode: OperationMode,
    /// Whether attached locations count toward fill levels.
    pub counting_active: bool,
    /// Maximum fill level in `0.0..=1.0`.
    pub max_fill_level: f32,
}

impl LocationGroupView {
    /// Builds the view of `group`.
    #[must_use]
    pub fn of(group: &LocationGroup) -> Self {
        Self {
            name: group.name.to_string(),
            description: group.description.clone(),
            group_type: group.group_type.clone(),
            parent: group.parent.as_ref().map(ToString::to_string),
            children: group.children.iter().map(ToString::to_string).collect(),
            locations: group.locations.iter().map(ToString::to_string).collect(),
            group_state_in: group.state_in(),
            group_state_out: group.state_out(),
            state_in_locker: group.state_in_locker().map(ToString::to_string),
            state_out_locker: group.state_out_locker().map(ToString::to_string),
            operation_mode: group.operation_mode,
            counting_active: group.counting_active,
            max_fill_level: group.max_fill_level(),
        }
    }
}

/// API view of a transport unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportUnitView {
    /// The normalized barcode.
    pub barcode: String,
    /// The transport unit type.
    pub transport_unit_type: String,
    /// Where the unit stands.
    pub actual_location: String,
    /// When the unit was last moved.
    #[serde(with = "time::serde::rfc3339::option")]
    pub actual_location_date: Option<OffsetDateTime>,
}

impl TransportUnitView {
    /// Builds the view of `unit`.
    #[must_use]
    pub fn of(unit: &TransportUnit) -> Self {
        Self {
            barcode: unit.barcode.to_string(),
            transport_unit_type: unit.unit_type.clone(),
            actual_location: unit.actual_location.to_string(),
            actual_location_date: unit.moved_at,
        }
    }
}

/// API request to create a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationRequest {
    /// The location key, `AREA/AISLE/X/Y/Z`.
    pub location_pk: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional PLC address.
    #[serde(default)]
    pub plc_code: Option<String>,
    /// The owning group name, if any.
    #[serde(default)]
    pub location_group_name: Option<String>,
}

/// API request to create a location group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationGroupRequest {
    /// The group name.
    pub name: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Optional classification.
    #[serde(default)]
    pub group_type: Option<String>,
    /// Whether attached locations count toward fill levels.
    #[serde(default = "default_true")]
    pub counting_active: bool,
    /// Maximum fill level in `0.0..=1.0`.
    #[serde(default = "default_fill_level")]
    pub max_fill_level: f32,
    /// The parent group name, if any.
    #[serde(default)]
    pub parent: Option<String>,
}

pub(crate) const fn default_true() -> bool {
    true
}

pub(crate) const fn default_fill_level() -> f32 {
    1.0
}

/// API request carrying a PLC error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCodeRequest {
    /// Eight characters over `0`, `1` and `*`.
    pub error_code: String,
    /// PLC state reported with the code.
    #[serde(default)]
    pub plc_state: Option<i32>,
}

/// API request to change a group's availability directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupStateRequest {
    /// New infeed state (`AVAILABLE` / `NOT_AVAILABLE`).
    #[serde(default)]
    pub statein: Option<String>,
    /// New outfeed state (`AVAILABLE` / `NOT_AVAILABLE`).
    #[serde(default)]
    pub stateout: Option<String>,
}

/// API request to lock or unlock a target. The target itself is
/// addressed by business key in the path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeTargetRequest {
    /// `ALLOCATION_LOCK`, `OPERATION_LOCK` or `PERMANENT_LOCK`.
    #[serde(rename = "type")]
    pub lock_type: String,
    /// `IN`, `OUT`, `IN_AND_OUT`, `NONE`; `lock` or `unlock` for permanent locks.
    pub mode: String,
    /// Hint that open work may need to be allocated again.
    #[serde(default)]
    pub reallocation: bool,
}

/// API response for an applied lock request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetStateResponse {
    /// The business key the request addressed.
    pub business_key: String,
    /// The applied lock type.
    pub lock_type: String,
    /// The applied mode.
    pub mode: String,
    /// Number of entities whose state changed.
    pub changed: usize,
    /// A success message.
    pub message: String,
}

/// API request to register a transport unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransportUnitRequest {
    /// The raw barcode, normalized on the way in.
    pub barcode: String,
    /// The transport unit type.
    pub transport_unit_type: String,
    /// Where the unit stands.
    pub actual_location: String,
}

/// API response for a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    /// The deleted entity's business key.
    pub business_key: String,
    /// A success message.
    pub message: String,
}

/// Filter for location lookups. All given criteria must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQuery {
    /// Exact location key.
    #[serde(default, rename = "locationPK")]
    pub location_pk: Option<String>,
    /// Exact PLC code.
    #[serde(default)]
    pub plc_code: Option<String>,
    /// Comma separated group names; a location must belong to one of them.
    #[serde(default)]
    pub location_group_names: Option<String>,
    /// Area pattern.
    #[serde(default)]
    pub area: Option<String>,
    /// Aisle pattern.
    #[serde(default)]
    pub aisle: Option<String>,
    /// X pattern.
    #[serde(default)]
    pub x: Option<String>,
    /// Y pattern.
    #[serde(default)]
    pub y: Option<String>,
    /// Z pattern.
    #[serde(default)]
    pub z: Option<String>,
}

/// Filter for location group lookups.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupQuery {
    /// A single group name; unknown names are an error.
    #[serde(default)]
    pub name: Option<String>,
    /// Comma separated group names; unknown names are skipped.
    #[serde(default)]
    pub names: Option<String>,
}
