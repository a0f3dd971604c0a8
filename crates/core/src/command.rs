// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::OffsetDateTime;
use wms_topology_domain::{
    AvailabilityState, Barcode, GroupName, LocationPk, LocationStateChange, LockMode, LockType,
    OperationMode,
};

/// A command represents operator or system intent as data only.
///
/// Commands are the only way to request topology changes through [`crate::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Apply a lock request to a location or location group.
    ChangeTarget {
        /// Location key or group name of the target.
        business_key: String,
        /// The kind of lock.
        lock_type: LockType,
        /// Which directions the lock covers.
        lock_mode: LockMode,
        /// Hint that open work may need to be allocated again.
        reallocation: bool,
    },
    /// Permanently lock a target in both directions.
    Lock {
        /// Location key or group name of the target.
        business_key: String,
        /// Hint that open work may need to be allocated again.
        reallocation: bool,
    },
    /// Release a permanent lock.
    Release {
        /// Location key or group name of the target.
        business_key: String,
        /// Hint that open work may need to be allocated again.
        reallocation: bool,
    },
    /// Create a location group, optionally below a parent.
    CreateGroup {
        /// The group name.
        name: GroupName,
        /// Optional description.
        description: Option<String>,
        /// Optional classification.
        group_type: Option<String>,
        /// Whether locations below the group count toward fill levels.
        counting_active: bool,
        /// Maximum fill level in `0.0..=1.0`.
        max_fill_level: f32,
        /// The parent group, if any.
        parent: Option<GroupName>,
    },
    /// Delete an empty location group.
    DeleteGroup {
        /// The group name.
        name: GroupName,
    },
    /// Attach a group below another group.
    AddChild {
        /// The new parent.
        parent: GroupName,
        /// The group to attach.
        child: GroupName,
    },
    /// Detach a group from its parent.
    RemoveChild {
        /// The current parent.
        parent: GroupName,
        /// The group to detach.
        child: GroupName,
    },
    /// Change either or both availability directions of a group.
    ChangeGroupState {
        /// The group name.
        name: GroupName,
        /// New infeed state, if any.
        state_in: Option<AvailabilityState>,
        /// New outfeed state, if any.
        state_out: Option<AvailabilityState>,
    },
    /// Set a group's operation mode.
    SetOperationMode {
        /// The group name.
        name: GroupName,
        /// The new mode.
        mode: OperationMode,
    },
    /// Create a location, optionally attached to a group.
    CreateLocation {
        /// The location key.
        pk: LocationPk,
        /// Optional description.
        description: Option<String>,
        /// Optional PLC address.
        plc_code: Option<String>,
        /// The owning group, if any.
        group: Option<GroupName>,
    },
    /// Delete a location.
    DeleteLocation {
        /// The location key.
        pk: LocationPk,
    },
    /// Attach a location to a group.
    AssignLocation {
        /// The location key.
        pk: LocationPk,
        /// The new owning group.
        group: GroupName,
    },
    /// Detach a location from its group.
    UnassignLocation {
        /// The location key.
        pk: LocationPk,
    },
    /// Change a location's flags or PLC state.
    ChangeLocationState {
        /// The location key.
        pk: LocationPk,
        /// The fields to change.
        change: LocationStateChange,
    },
    /// Register a transport unit at a location.
    CreateTransportUnit {
        /// The normalized barcode.
        barcode: Barcode,
        /// The transport unit type.
        unit_type: String,
        /// Where the unit stands.
        location: LocationPk,
    },
    /// Move a transport unit to another location.
    MoveTransportUnit {
        /// The normalized barcode.
        barcode: Barcode,
        /// The target location.
        to: LocationPk,
        /// When the move happened.
        at: OffsetDateTime,
    },
}

impl Command {
    /// Returns the command name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ChangeTarget { .. } => "ChangeTarget",
            Self::Lock { .. } => "Lock",
            Self::Release { .. } => "Release",
            Self::CreateGroup { .. } => "CreateGroup",
            Self::DeleteGroup { .. } => "DeleteGroup",
            Self::AddChild { .. } => "AddChild",
            Self::RemoveChild { .. } => "RemoveChild",
            Self::ChangeGroupState { .. } => "ChangeGroupState",
            Self::SetOperationMode { .. } => "SetOperationMode",
            Self::CreateLocation { .. } => "CreateLocation",
            Self::DeleteLocation { .. } => "DeleteLocation",
            Self::AssignLocation { .. } => "AssignLocation",
            Self::UnassignLocation { .. } => "UnassignLocation",
            Self::ChangeLocationState { .. } => "ChangeLocationState",
            Self::CreateTransportUnit { .. } => "CreateTransportUnit",
            Self::MoveTransportUnit { .. } => "MoveTransportUnit",
        }
    }
}
