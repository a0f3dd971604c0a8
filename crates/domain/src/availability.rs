// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Availability of a location group for one flow direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityState {
    /// Transport units may flow in this direction.
    #[default]
    Available,
    /// Flow in this direction is blocked.
    NotAvailable,
}

impl AvailabilityState {
    /// Converts this state to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::NotAvailable => "NOT_AVAILABLE",
        }
    }

    /// Maps a "locked" flag onto a state.
    #[must_use]
    pub const fn from_locked(locked: bool) -> Self {
        if locked {
            Self::NotAvailable
        } else {
            Self::Available
        }
    }

    /// Returns whether this state permits flow.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl FromStr for AvailabilityState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "NOT_AVAILABLE" => Ok(Self::NotAvailable),
            _ => Err(DomainError::InvalidAvailabilityState(s.to_string())),
        }
    }
}

impl std::fmt::Display for AvailabilityState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Flow direction a state or lock applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Direction {
    /// Infeed: transport units moving into a location.
    In,
    /// Outfeed: transport units moving out of a location.
    Out,
}

impl Direction {
    /// Both directions, infeed first.
    pub const BOTH: [Self; 2] = [Self::In, Self::Out];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::In => write!(f, "infeed"),
            Self::Out => write!(f, "outfeed"),
        }
    }
}

/// Physical capability of the subsystem behind a location group.
///
/// This is independent of the availability state and never cascades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationMode {
    /// Only infeed is possible.
    Infeed,
    /// Only outfeed is possible.
    Outfeed,
    /// Neither direction is possible.
    NoOperation,
    /// Both directions are possible.
    #[default]
    InfeedAndOutfeed,
}

impl OperationMode {
    /// Converts this mode to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Infeed => "INFEED",
            Self::Outfeed => "OUTFEED",
            Self::NoOperation => "NO_OPERATION",
            Self::InfeedAndOutfeed => "INFEED_AND_OUTFEED",
        }
    }
}

impl FromStr for OperationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INFEED" => Ok(Self::Infeed),
            "OUTFEED" => Ok(Self::Outfeed),
            "NO_OPERATION" => Ok(Self::NoOperation),
            "INFEED_AND_OUTFEED" => Ok(Self::InfeedAndOutfeed),
            _ => Err(DomainError::InvalidOperationMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for OperationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Kind of lock requested on a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockType {
    /// Blocks allocation of new work in the locked direction(s).
    AllocationLock,
    /// Describes what the physical subsystem can currently do.
    OperationLock,
    /// Long-lived lock of both directions; see `lock` / `release`.
    PermanentLock,
}

impl LockType {
    /// Converts this lock type to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AllocationLock => "ALLOCATION_LOCK",
            Self::OperationLock => "OPERATION_LOCK",
            Self::PermanentLock => "PERMANENT_LOCK",
        }
    }
}

impl FromStr for LockType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ALLOCATION_LOCK" => Ok(Self::AllocationLock),
            "OPERATION_LOCK" => Ok(Self::OperationLock),
            "PERMANENT_LOCK" => Ok(Self::PermanentLock),
            _ => Err(DomainError::InvalidLockType(s.to_string())),
        }
    }
}

impl std::fmt::Display for LockType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which directions a lock request covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LockMode {
    /// Lock infeed, release outfeed.
    In,
    /// Release infeed, lock outfeed.
    Out,
    /// Lock both directions.
    InAndOut,
    /// Release both directions.
    None,
}

impl LockMode {
    /// Converts this mode to its wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
            Self::InAndOut => "IN_AND_OUT",
            Self::None => "NONE",
        }
    }

    /// Returns `(infeed_locked, outfeed_locked)` for this mode.
    #[must_use]
    pub const fn locked_directions(&self) -> (bool, bool) {
        match self {
            Self::In => (true, false),
            Self::Out => (false, true),
            Self::InAndOut => (true, true),
            Self::None => (false, false),
        }
    }

    /// Returns the `(state_in, state_out)` pair this mode requests.
    #[must_use]
    pub const fn availability(&self) -> (AvailabilityState, AvailabilityState) {
        let (locked_in, locked_out) = self.locked_directions();
        (
            AvailabilityState::from_locked(locked_in),
            AvailabilityState::from_locked(locked_out),
        )
    }

    /// Returns the operation mode left over once the locked directions are removed.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        match self {
            Self::In => OperationMode::Outfeed,
            Self::Out => OperationMode::Infeed,
            Self::InAndOut => OperationMode::NoOperation,
            Self::None => OperationMode::InfeedAndOutfeed,
        }
    }
}

impl FromStr for LockMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            "IN_AND_OUT" => Ok(Self::InAndOut),
            "NONE" => Ok(Self::None),
            _ => Err(DomainError::InvalidLockMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for LockMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
