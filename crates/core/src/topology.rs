// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::{BTreeMap, BTreeSet};
use wms_topology_domain::{
    AvailabilityState, Barcode, Direction, DomainError, GroupName, Location, LocationGroup,
    LocationPk, TargetRef, TransportUnit, route_business_key,
};

/// The complete warehouse topology.
///
/// Groups, locations and transport units are kept in arenas keyed by their
/// business keys. Parent, child and membership links are stored as keys
/// and resolved through the arena on demand, so there are no owning
/// back-references.
///
/// All mutating operations either succeed completely or return an error
/// before touching any state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Topology {
    pub(crate) groups: BTreeMap<GroupName, LocationGroup>,
    pub(crate) locations: BTreeMap<LocationPk, Location>,
    pub(crate) transport_units: BTreeMap<Barcode, TransportUnit>,
}

impl Topology {
    /// Creates an empty topology.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
            locations: BTreeMap::new(),
            transport_units: BTreeMap::new(),
        }
    }

    /// Returns the group with the given name.
    #[must_use]
    pub fn group(&self, name: &GroupName) -> Option<&LocationGroup> {
        self.groups.get(name)
    }

    /// Returns all groups ordered by name.
    pub fn groups(&self) -> impl Iterator<Item = &LocationGroup> {
        self.groups.values()
    }

    /// Returns the location with the given key.
    #[must_use]
    pub fn location(&self, pk: &LocationPk) -> Option<&Location> {
        self.locations.get(pk)
    }

    /// Returns all locations ordered by key.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.locations.values()
    }

    /// Returns the transport unit with the given barcode.
    #[must_use]
    pub fn transport_unit(&self, barcode: &Barcode) -> Option<&TransportUnit> {
        self.transport_units.get(barcode)
    }

    /// Returns all transport units ordered by barcode.
    pub fn transport_units(&self) -> impl Iterator<Item = &TransportUnit> {
        self.transport_units.values()
    }

    /// Looks up a group or fails with `GroupNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist.
    pub fn require_group(&self, name: &GroupName) -> Result<&LocationGroup, DomainError> {
        self.groups
            .get(name)
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))
    }

    /// Looks up a location or fails with `LocationNotFound`.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn require_location(&self, pk: &LocationPk) -> Result<&Location, DomainError> {
        self.locations
            .get(pk)
            .ok_or_else(|| DomainError::LocationNotFound(pk.to_string()))
    }

    pub(crate) fn group_mut(&mut self, name: &GroupName) -> Result<&mut LocationGroup, DomainError> {
        self.groups
            .get_mut(name)
            .ok_or_else(|| DomainError::GroupNotFound(name.to_string()))
    }

    pub(crate) fn location_mut(&mut self, pk: &LocationPk) -> Result<&mut Location, DomainError> {
        self.locations
            .get_mut(pk)
            .ok_or_else(|| DomainError::LocationNotFound(pk.to_string()))
    }

    /// Resolves a business key to an existing location or group.
    ///
    /// Keys shaped like a location key are looked up as locations; anything
    /// else is looked up as a group name.
    ///
    /// # Errors
    ///
    /// Returns `TargetNotFound` if nothing with that key exists.
    pub fn resolve_target(&self, business_key: &str) -> Result<TargetRef, DomainError> {
        let target: TargetRef = route_business_key(business_key)?;
        let exists: bool = match &target {
            TargetRef::Location(pk) => self.locations.contains_key(pk),
            TargetRef::Group(name) => self.groups.contains_key(name),
        };
        if exists {
            Ok(target)
        } else {
            Err(DomainError::TargetNotFound(business_key.to_string()))
        }
    }

    /// Returns every group below `name`, depth first. The group itself is
    /// not included.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist.
    pub fn descendants(&self, name: &GroupName) -> Result<Vec<GroupName>, DomainError> {
        let root: &LocationGroup = self.require_group(name)?;
        let mut result: Vec<GroupName> = Vec::new();
        let mut stack: Vec<GroupName> = root.children.iter().rev().cloned().collect();
        while let Some(current) = stack.pop() {
            if let Some(group) = self.groups.get(&current) {
                stack.extend(group.children.iter().rev().cloned());
            }
            result.push(current);
        }
        Ok(result)
    }

    /// Returns the ancestors of `name`, nearest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist.
    pub fn ancestors(&self, name: &GroupName) -> Result<Vec<GroupName>, DomainError> {
        let mut current: &LocationGroup = self.require_group(name)?;
        let mut result: Vec<GroupName> = Vec::new();
        while let Some(parent) = &current.parent {
            result.push(parent.clone());
            current = self.require_group(parent)?;
        }
        Ok(result)
    }

    /// Registers a new standalone group.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is taken or the group already carries
    /// structure (parent, children or locations). Structure is built with
    /// [`Topology::add_child`] and [`Topology::assign_location`].
    pub fn create_group(&mut self, group: LocationGroup) -> Result<(), DomainError> {
        if self.groups.contains_key(&group.name) {
            return Err(DomainError::DuplicateGroup(group.name.to_string()));
        }
        if group.parent.is_some() || !group.is_empty() {
            return Err(DomainError::UnsupportedOperation(format!(
                "group '{}' must be created without parent, children or locations",
                group.name
            )));
        }
        self.groups.insert(group.name.clone(), group);
        Ok(())
    }

    /// Removes an empty group and detaches it from its parent.
    ///
    /// Locks the deleted group still holds on groups elsewhere keep their
    /// state but lose their locker, so any caller may release them. Returns
    /// the groups whose locker was cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the group does not exist or still has children or
    /// locations.
    pub fn delete_group(&mut self, name: &GroupName) -> Result<Vec<GroupName>, DomainError> {
        let group: &LocationGroup = self.require_group(name)?;
        if !group.is_empty() {
            return Err(DomainError::GroupNotEmpty {
                group: name.to_string(),
                children: group.children.len(),
                locations: group.locations.len(),
            });
        }
        if let Some(parent) = group.parent.clone() {
            self.group_mut(&parent)?.children.remove(name);
        }
        self.groups.remove(name);

        let mut released: Vec<GroupName> = Vec::new();
        for other in self.groups.values_mut() {
            for direction in Direction::BOTH {
                if other.locker(direction) == Some(name) {
                    let state: AvailabilityState = other.state(direction);
                    other.set_state(direction, state, None);
                    released.push(other.name.clone());
                }
            }
        }
        Ok(dedup(released))
    }

    /// Attaches `child` below `parent`, detaching it from any previous parent.
    ///
    /// The child subtree takes over the parent's current state in both
    /// directions. The lock owner passed down is the parent's own locker,
    /// or the parent itself when it is unlocked, so the attached subtree
    /// ends up with the same lockers as its siblings. Nodes locked by some
    /// other group keep their state.
    ///
    /// Returns the groups whose state changed.
    ///
    /// # Errors
    ///
    /// Returns an error if either group does not exist or the attachment
    /// would create a cycle.
    pub fn add_child(
        &mut self,
        parent: &GroupName,
        child: &GroupName,
    ) -> Result<Vec<GroupName>, DomainError> {
        self.require_group(child)?;
        let parent_group: &LocationGroup = self.require_group(parent)?;
        if parent == child || self.ancestors(parent)?.contains(child) {
            return Err(DomainError::CyclicHierarchy {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }

        let inherited: Vec<(Direction, AvailabilityState, GroupName)> = Direction::BOTH
            .into_iter()
            .map(|direction| {
                let owner: GroupName = parent_group
                    .locker(direction)
                    .cloned()
                    .unwrap_or_else(|| parent.clone());
                (direction, parent_group.state(direction), owner)
            })
            .collect();

        let previous: Option<GroupName> = self.group_mut(child)?.parent.replace(parent.clone());
        if let Some(previous) = previous
            && previous != *parent
        {
            self.group_mut(&previous)?.children.remove(child);
        }

        let mut changed: Vec<GroupName> = Vec::new();
        for (direction, state, owner) in inherited {
            changed.extend(self.propagate(child, direction, state, &owner));
        }
        self.group_mut(parent)?.children.insert(child.clone());
        Ok(dedup(changed))
    }

    /// Detaches `child` from `parent`. The child keeps its current state
    /// and lockers and becomes a root.
    ///
    /// # Errors
    ///
    /// Returns an error if either group does not exist or `child` is not a
    /// direct child of `parent`.
    pub fn remove_child(&mut self, parent: &GroupName, child: &GroupName) -> Result<(), DomainError> {
        self.require_group(child)?;
        if !self.require_group(parent)?.children.contains(child) {
            return Err(DomainError::NotAChild {
                parent: parent.to_string(),
                child: child.to_string(),
            });
        }
        self.group_mut(parent)?.children.remove(child);
        self.group_mut(child)?.parent = None;
        Ok(())
    }

    /// Registers a new location, attaching it to the group it names.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is taken or the named group does not exist.
    pub fn create_location(&mut self, mut location: Location) -> Result<(), DomainError> {
        if self.locations.contains_key(&location.pk) {
            return Err(DomainError::DuplicateLocation(location.pk.to_string()));
        }
        let group: Option<GroupName> = location.location_group.take();
        if let Some(group) = &group {
            self.require_group(group)?;
        }
        let pk: LocationPk = location.pk.clone();
        self.locations.insert(pk.clone(), location);
        if let Some(group) = group {
            self.assign_location(&pk, &group)?;
        }
        Ok(())
    }

    /// Removes a location and detaches it from its group.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist or a transport unit
    /// still stands on it.
    pub fn delete_location(&mut self, pk: &LocationPk) -> Result<Location, DomainError> {
        self.require_location(pk)?;
        if let Some(unit) = self
            .transport_units
            .values()
            .find(|unit| unit.actual_location == *pk)
        {
            return Err(DomainError::UnsupportedOperation(format!(
                "location '{pk}' still holds transport unit '{}'",
                unit.barcode
            )));
        }
        self.unassign_location(pk)?;
        self.locations
            .remove(pk)
            .ok_or_else(|| DomainError::LocationNotFound(pk.to_string()))
    }

    /// Attaches a location to a group, moving it out of any previous group.
    ///
    /// The location takes over the group's counting flag. Its infeed and
    /// outfeed flags are left alone.
    ///
    /// # Errors
    ///
    /// Returns an error if the location or group does not exist.
    pub fn assign_location(&mut self, pk: &LocationPk, group: &GroupName) -> Result<(), DomainError> {
        let counting_active: bool = self.require_group(group)?.counting_active;
        self.require_location(pk)?;
        self.unassign_location(pk)?;

        self.group_mut(group)?.locations.insert(pk.clone());
        let location: &mut Location = self.location_mut(pk)?;
        location.location_group = Some(group.clone());
        location.counting_active = counting_active;
        Ok(())
    }

    /// Detaches a location from its group. Unassigned locations are left
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn unassign_location(&mut self, pk: &LocationPk) -> Result<(), DomainError> {
        let previous: Option<GroupName> = self.location_mut(pk)?.location_group.take();
        if let Some(previous) = previous
            && let Some(group) = self.groups.get_mut(&previous)
        {
            group.locations.remove(pk);
        }
        Ok(())
    }
}

/// Drops repeated names, keeping the first occurrence.
pub(crate) fn dedup(names: Vec<GroupName>) -> Vec<GroupName> {
    let mut seen: BTreeSet<GroupName> = BTreeSet::new();
    names
        .into_iter()
        .filter(|name| seen.insert(name.clone()))
        .collect()
}
