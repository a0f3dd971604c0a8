// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability::Direction;

/// Errors that can occur during domain validation and state arbitration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The business key resolves to neither a location nor a location group.
    TargetNotFound(String),
    /// A direct state change was attempted on a group locked by another owner.
    StateChangeConflict {
        /// The group that was addressed.
        group: String,
        /// The direction of the attempted change.
        direction: Direction,
        /// The group currently holding the lock.
        locker: String,
    },
    /// A group cannot become available while its parent forbids it.
    ParentLockedConflict {
        /// The group that was addressed.
        group: String,
        /// The direction of the attempted change.
        direction: Direction,
        /// The parent group that is not available.
        parent: String,
    },
    /// The lock type / target / mode combination is not defined.
    UnsupportedOperation(String),
    /// Location group does not exist.
    GroupNotFound(String),
    /// Location does not exist.
    LocationNotFound(String),
    /// Transport unit does not exist.
    TransportUnitNotFound(String),
    /// Location group already exists.
    DuplicateGroup(String),
    /// Location already exists.
    DuplicateLocation(String),
    /// Transport unit already exists.
    DuplicateTransportUnit(String),
    /// Attaching the child would create a cycle in the hierarchy.
    CyclicHierarchy {
        /// The intended parent.
        parent: String,
        /// The intended child.
        child: String,
    },
    /// The group is not a direct child of the given parent.
    NotAChild {
        /// The presumed parent.
        parent: String,
        /// The presumed child.
        child: String,
    },
    /// The group still has child groups or locations attached.
    GroupNotEmpty {
        /// The group name.
        group: String,
        /// Number of attached child groups.
        children: usize,
        /// Number of attached locations.
        locations: usize,
    },
    /// Location key is malformed.
    InvalidLocationPk(String),
    /// Location group name is empty or too long.
    InvalidGroupName(String),
    /// Maximum fill level is outside `0.0..=1.0`.
    InvalidFillLevel(String),
    /// Barcode is empty or does not fit the configured format.
    InvalidBarcode(String),
    /// Transport unit type is empty.
    InvalidUnitType(String),
    /// PLC error code is malformed.
    InvalidErrorCode(String),
    /// Availability state string is not recognised.
    InvalidAvailabilityState(String),
    /// Lock type string is not recognised.
    InvalidLockType(String),
    /// Lock mode string is not recognised.
    InvalidLockMode(String),
    /// Operation mode string is not recognised.
    InvalidOperationMode(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TargetNotFound(key) => {
                write!(f, "No location or location group found for '{key}'")
            }
            Self::StateChangeConflict {
                group,
                direction,
                locker,
            } => {
                write!(
                    f,
                    "Location group '{group}' is locked for {direction} by '{locker}' and cannot be changed"
                )
            }
            Self::ParentLockedConflict {
                group,
                direction,
                parent,
            } => {
                write!(
                    f,
                    "Location group '{group}' cannot become available for {direction}: parent '{parent}' is not available"
                )
            }
            Self::UnsupportedOperation(msg) => write!(f, "Unsupported operation: {msg}"),
            Self::GroupNotFound(name) => write!(f, "Location group '{name}' not found"),
            Self::LocationNotFound(pk) => write!(f, "Location '{pk}' not found"),
            Self::TransportUnitNotFound(barcode) => {
                write!(f, "Transport unit '{barcode}' not found")
            }
            Self::DuplicateGroup(name) => write!(f, "Location group '{name}' already exists"),
            Self::DuplicateLocation(pk) => write!(f, "Location '{pk}' already exists"),
            Self::DuplicateTransportUnit(barcode) => {
                write!(f, "Transport unit '{barcode}' already exists")
            }
            Self::CyclicHierarchy { parent, child } => {
                write!(
                    f,
                    "Cannot attach '{child}' to '{parent}': '{parent}' is '{child}' or one of its descendants"
                )
            }
            Self::NotAChild { parent, child } => {
                write!(f, "Location group '{child}' is not a child of '{parent}'")
            }
            Self::GroupNotEmpty {
                group,
                children,
                locations,
            } => {
                write!(
                    f,
                    "Location group '{group}' still has {children} child group(s) and {locations} location(s)"
                )
            }
            Self::InvalidLocationPk(msg) => write!(f, "Invalid location key: {msg}"),
            Self::InvalidGroupName(msg) => write!(f, "Invalid location group name: {msg}"),
            Self::InvalidFillLevel(msg) => write!(f, "Invalid fill level: {msg}"),
            Self::InvalidBarcode(msg) => write!(f, "Invalid barcode: {msg}"),
            Self::InvalidUnitType(msg) => write!(f, "Invalid transport unit type: {msg}"),
            Self::InvalidErrorCode(msg) => write!(f, "Invalid error code: {msg}"),
            Self::InvalidAvailabilityState(value) => {
                write!(f, "Invalid availability state: '{value}'")
            }
            Self::InvalidLockType(value) => write!(f, "Invalid lock type: '{value}'"),
            Self::InvalidLockMode(value) => write!(f, "Invalid lock mode: '{value}'"),
            Self::InvalidOperationMode(value) => write!(f, "Invalid operation mode: '{value}'"),
        }
    }
}

impl std::error::Error for DomainError {}
