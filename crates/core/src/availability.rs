// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::topology::{Topology, dedup};
use wms_topology_domain::{
    AvailabilityState, Direction, DomainError, GroupName, LocationGroup, OperationMode,
};

impl Topology {
    /// Changes a group's infeed state and cascades it to the subtree.
    ///
    /// Returns the groups whose state or locker changed.
    ///
    /// # Errors
    ///
    /// Returns `StateChangeConflict` if another group holds the infeed lock,
    /// even when the requested state equals the current one, and
    /// `ParentLockedConflict` when asking for `AVAILABLE` below a parent that
    /// is not available for infeed.
    pub fn change_state_in(
        &mut self,
        name: &GroupName,
        state: AvailabilityState,
    ) -> Result<Vec<GroupName>, DomainError> {
        self.change_directions(name, &[(Direction::In, state)])
    }

    /// Changes a group's outfeed state and cascades it to the subtree.
    ///
    /// Returns the groups whose state or locker changed.
    ///
    /// # Errors
    ///
    /// Same rules as [`Topology::change_state_in`], applied to outfeed.
    pub fn change_state_out(
        &mut self,
        name: &GroupName,
        state: AvailabilityState,
    ) -> Result<Vec<GroupName>, DomainError> {
        self.change_directions(name, &[(Direction::Out, state)])
    }

    /// Changes either or both directions of a group.
    ///
    /// A direction is only touched when a state is supplied and it differs
    /// from the current one. Both directions are checked before either is
    /// changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or a touched direction
    /// is locked by another group or vetoed by the parent.
    pub fn change_state(
        &mut self,
        name: &GroupName,
        state_in: Option<AvailabilityState>,
        state_out: Option<AvailabilityState>,
    ) -> Result<Vec<GroupName>, DomainError> {
        let group: &LocationGroup = self.require_group(name)?;
        let requested: Vec<(Direction, AvailabilityState)> =
            [(Direction::In, state_in), (Direction::Out, state_out)]
                .into_iter()
                .filter_map(|(direction, desired)| {
                    desired
                        .filter(|desired| *desired != group.state(direction))
                        .map(|desired| (direction, desired))
                })
                .collect();
        self.change_directions(name, &requested)
    }

    /// Applies `change_state_in` and `change_state_out` as one request.
    ///
    /// Unlike [`Topology::change_state`], both directions are checked even
    /// when they already hold the requested state, so a group locked by
    /// another group always refuses.
    ///
    /// # Errors
    ///
    /// Same rules as [`Topology::change_state_in`], for both directions.
    pub fn change_state_in_and_out(
        &mut self,
        name: &GroupName,
        state_in: AvailabilityState,
        state_out: AvailabilityState,
    ) -> Result<Vec<GroupName>, DomainError> {
        self.change_directions(name, &[(Direction::In, state_in), (Direction::Out, state_out)])
    }

    /// Sets a group's operation mode. Returns whether it changed.
    ///
    /// The mode describes physical capability and never cascades.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist.
    pub fn set_operation_mode(
        &mut self,
        name: &GroupName,
        mode: OperationMode,
    ) -> Result<bool, DomainError> {
        let group: &mut LocationGroup = self.group_mut(name)?;
        if group.operation_mode == mode {
            return Ok(false);
        }
        group.operation_mode = mode;
        Ok(true)
    }

    fn change_directions(
        &mut self,
        name: &GroupName,
        requested: &[(Direction, AvailabilityState)],
    ) -> Result<Vec<GroupName>, DomainError> {
        for (direction, desired) in requested {
            self.check_direct_change(name, *direction, *desired)?;
        }
        let mut changed: Vec<GroupName> = Vec::new();
        for (direction, desired) in requested {
            changed.extend(self.propagate(name, *direction, *desired, name));
        }
        Ok(dedup(changed))
    }

    fn check_direct_change(
        &self,
        name: &GroupName,
        direction: Direction,
        desired: AvailabilityState,
    ) -> Result<(), DomainError> {
        let group: &LocationGroup = self.require_group(name)?;
        if let Some(locker) = group.locker(direction)
            && locker != name
        {
            return Err(DomainError::StateChangeConflict {
                group: name.to_string(),
                direction,
                locker: locker.to_string(),
            });
        }
        if desired.is_available()
            && let Some(parent) = &group.parent
            && !self.require_group(parent)?.state(direction).is_available()
        {
            return Err(DomainError::ParentLockedConflict {
                group: name.to_string(),
                direction,
                parent: parent.to_string(),
            });
        }
        Ok(())
    }

    /// Pushes `state` for `direction` down the subtree rooted at `start`
    /// on behalf of `owner`.
    ///
    /// A node is changed only if it is unlocked or locked by `owner`; a
    /// node locked by anyone else is skipped together with everything
    /// below it. Changed nodes are locked by `owner` when not available and
    /// unlocked when available.
    ///
    /// Returns the groups whose state or locker changed, in visit order.
    pub(crate) fn propagate(
        &mut self,
        start: &GroupName,
        direction: Direction,
        state: AvailabilityState,
        owner: &GroupName,
    ) -> Vec<GroupName> {
        let locker: Option<GroupName> = (!state.is_available()).then(|| owner.clone());
        let mut changed: Vec<GroupName> = Vec::new();
        let mut stack: Vec<GroupName> = vec![start.clone()];

        while let Some(current) = stack.pop() {
            let Some(group) = self.groups.get_mut(&current) else {
                continue;
            };
            if !group.is_owned_by(direction, owner) {
                continue;
            }
            if group.state(direction) != state || group.locker(direction) != locker.as_ref() {
                group.set_state(direction, state, locker.clone());
                changed.push(current);
            }
            stack.extend(group.children.iter().rev().cloned());
        }
        changed
    }
}
