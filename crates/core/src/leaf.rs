// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::topology::Topology;
use time::OffsetDateTime;
use wms_topology_domain::{
    Barcode, DomainError, Location, LocationGroup, LocationPk, LocationStateChange, TransportUnit,
};

impl Topology {
    /// Sets a location's infeed flag. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn set_location_infeed(&mut self, pk: &LocationPk, active: bool) -> Result<bool, DomainError> {
        self.change_location_state(
            pk,
            &LocationStateChange {
                infeed_active: Some(active),
                ..LocationStateChange::default()
            },
        )
    }

    /// Sets a location's outfeed flag. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn set_location_outfeed(
        &mut self,
        pk: &LocationPk,
        active: bool,
    ) -> Result<bool, DomainError> {
        self.change_location_state(
            pk,
            &LocationStateChange {
                outfeed_active: Some(active),
                ..LocationStateChange::default()
            },
        )
    }

    /// Sets a location's PLC state. Returns whether it changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn set_location_plc_state(
        &mut self,
        pk: &LocationPk,
        plc_state: i32,
    ) -> Result<bool, DomainError> {
        self.change_location_state(
            pk,
            &LocationStateChange {
                plc_state: Some(plc_state),
                ..LocationStateChange::default()
            },
        )
    }

    /// Applies a partial state change to a location. Location flags never
    /// cascade. Returns whether anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn change_location_state(
        &mut self,
        pk: &LocationPk,
        change: &LocationStateChange,
    ) -> Result<bool, DomainError> {
        Ok(self.location_mut(pk)?.apply_state_change(change))
    }

    /// Returns whether infeed to the location is allowed by both the
    /// location's own flag and its group's infeed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn is_location_infeed_allowed(&self, pk: &LocationPk) -> Result<bool, DomainError> {
        let location: &Location = self.require_location(pk)?;
        Ok(location.infeed_active
            && self
                .owning_group(location)
                .is_none_or(LocationGroup::is_infeed_allowed))
    }

    /// Returns whether outfeed from the location is allowed by both the
    /// location's own flag and its group's outfeed state.
    ///
    /// # Errors
    ///
    /// Returns an error if the location does not exist.
    pub fn is_location_outfeed_allowed(&self, pk: &LocationPk) -> Result<bool, DomainError> {
        let location: &Location = self.require_location(pk)?;
        Ok(location.outfeed_active
            && self
                .owning_group(location)
                .is_none_or(LocationGroup::is_outfeed_allowed))
    }

    fn owning_group(&self, location: &Location) -> Option<&LocationGroup> {
        location
            .location_group
            .as_ref()
            .and_then(|name| self.groups.get(name))
    }

    /// Registers a transport unit at its actual location.
    ///
    /// # Errors
    ///
    /// Returns an error if the barcode is taken or the location does not
    /// exist.
    pub fn create_transport_unit(&mut self, unit: TransportUnit) -> Result<(), DomainError> {
        if self.transport_units.contains_key(&unit.barcode) {
            return Err(DomainError::DuplicateTransportUnit(unit.barcode.to_string()));
        }
        self.require_location(&unit.actual_location)?;
        self.transport_units.insert(unit.barcode.clone(), unit);
        Ok(())
    }

    /// Moves a transport unit and stamps the movement time on the target
    /// location. Returns the location the unit came from.
    ///
    /// # Errors
    ///
    /// Returns an error if the unit or target location does not exist.
    pub fn move_transport_unit(
        &mut self,
        barcode: &Barcode,
        to: &LocationPk,
        at: OffsetDateTime,
    ) -> Result<LocationPk, DomainError> {
        if !self.transport_units.contains_key(barcode) {
            return Err(DomainError::TransportUnitNotFound(barcode.to_string()));
        }
        self.location_mut(to)?.stamp_movement(at);

        let unit: &mut TransportUnit = self
            .transport_units
            .get_mut(barcode)
            .ok_or_else(|| DomainError::TransportUnitNotFound(barcode.to_string()))?;
        let from: LocationPk = std::mem::replace(&mut unit.actual_location, to.clone());
        unit.moved_at = Some(at);
        Ok(from)
    }
}
