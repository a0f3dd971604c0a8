// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::availability::{AvailabilityState, Direction, OperationMode};
use crate::error::DomainError;
use crate::types::{GroupName, LocationPk};
use std::collections::BTreeSet;

/// A node of the location group tree.
///
/// Structure (`parent`, `children`, `locations`) and lock state are
/// maintained by the topology arena; the setters here are the raw field
/// writes it builds on and perform no arbitration of their own.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationGroup {
    /// The unique business key.
    pub name: GroupName,
    /// Optional free text description.
    pub description: Option<String>,
    /// Optional classification, e.g. "AISLE" or "BUFFER".
    pub group_type: Option<String>,
    /// The parent group; `None` for a root.
    pub parent: Option<GroupName>,
    /// Direct child groups.
    pub children: BTreeSet<GroupName>,
    /// Locations attached to this group.
    pub locations: BTreeSet<LocationPk>,
    /// Whether locations below this group count toward fill levels.
    pub counting_active: bool,
    /// Physical capability of the subsystem behind this group.
    pub operation_mode: OperationMode,
    max_fill_level: f32,
    state_in: AvailabilityState,
    state_out: AvailabilityState,
    state_in_locker: Option<GroupName>,
    state_out_locker: Option<GroupName>,
}

impl LocationGroup {
    /// Creates a standalone root group, available in both directions and unlocked.
    #[must_use]
    pub const fn new(name: GroupName) -> Self {
        Self {
            name,
            description: None,
            group_type: None,
            parent: None,
            children: BTreeSet::new(),
            locations: BTreeSet::new(),
            counting_active: true,
            operation_mode: OperationMode::InfeedAndOutfeed,
            max_fill_level: 1.0,
            state_in: AvailabilityState::Available,
            state_out: AvailabilityState::Available,
            state_in_locker: None,
            state_out_locker: None,
        }
    }

    /// Returns the maximum fill level in `0.0..=1.0`.
    #[must_use]
    pub const fn max_fill_level(&self) -> f32 {
        self.max_fill_level
    }

    /// Sets the maximum fill level.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not within `0.0..=1.0`.
    pub fn set_max_fill_level(&mut self, level: f32) -> Result<(), DomainError> {
        if !(0.0..=1.0).contains(&level) {
            return Err(DomainError::InvalidFillLevel(format!(
                "{level} is not between 0 and 1"
            )));
        }
        self.max_fill_level = level;
        Ok(())
    }

    /// Returns the infeed state.
    #[must_use]
    pub const fn state_in(&self) -> AvailabilityState {
        self.state_in
    }

    /// Returns the outfeed state.
    #[must_use]
    pub const fn state_out(&self) -> AvailabilityState {
        self.state_out
    }

    /// Returns the group holding the infeed lock.
    #[must_use]
    pub const fn state_in_locker(&self) -> Option<&GroupName> {
        self.state_in_locker.as_ref()
    }

    /// Returns the group holding the outfeed lock.
    #[must_use]
    pub const fn state_out_locker(&self) -> Option<&GroupName> {
        self.state_out_locker.as_ref()
    }

    /// Returns the state for `direction`.
    #[must_use]
    pub const fn state(&self, direction: Direction) -> AvailabilityState {
        match direction {
            Direction::In => self.state_in,
            Direction::Out => self.state_out,
        }
    }

    /// Returns the locker for `direction`.
    #[must_use]
    pub const fn locker(&self, direction: Direction) -> Option<&GroupName> {
        match direction {
            Direction::In => self.state_in_locker.as_ref(),
            Direction::Out => self.state_out_locker.as_ref(),
        }
    }

    /// Overwrites state and locker for `direction`.
    pub fn set_state(
        &mut self,
        direction: Direction,
        state: AvailabilityState,
        locker: Option<GroupName>,
    ) {
        match direction {
            Direction::In => {
                self.state_in = state;
                self.state_in_locker = locker;
            }
            Direction::Out => {
                self.state_out = state;
                self.state_out_locker = locker;
            }
        }
    }

    /// Returns whether `owner` may change this group's state for `direction`.
    ///
    /// A group is owned by whoever locked it; an unlocked group is owned by nobody
    /// and may be changed by anyone.
    #[must_use]
    pub fn is_owned_by(&self, direction: Direction, owner: &GroupName) -> bool {
        self.locker(direction).is_none_or(|locker| locker == owner)
    }

    /// Returns whether infeed is allowed.
    #[must_use]
    pub const fn is_infeed_allowed(&self) -> bool {
        self.state_in.is_available()
    }

    /// Returns whether infeed is blocked.
    #[must_use]
    pub const fn is_infeed_blocked(&self) -> bool {
        !self.is_infeed_allowed()
    }

    /// Returns whether outfeed is allowed.
    #[must_use]
    pub const fn is_outfeed_allowed(&self) -> bool {
        self.state_out.is_available()
    }

    /// Returns whether outfeed is blocked.
    #[must_use]
    pub const fn is_outfeed_blocked(&self) -> bool {
        !self.is_outfeed_allowed()
    }

    /// Returns whether this group has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns whether nothing is attached to this group.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.locations.is_empty()
    }
}
