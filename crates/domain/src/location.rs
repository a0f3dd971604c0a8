// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error_code::LocationStateChange;
use crate::types::{GroupName, LocationPk};
use time::OffsetDateTime;

/// PLC state value meaning "no error reported".
pub const PLC_STATE_OK: i32 = 0;

/// A storage location: a leaf of the topology.
///
/// Locations carry their own infeed/outfeed flags. These are mutated
/// directly and never cascade. Group membership is maintained by the
/// topology together with the group's location set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    /// The natural key.
    pub pk: LocationPk,
    /// Optional free text description.
    pub description: Option<String>,
    /// Optional address used by the PLC for this location.
    pub plc_code: Option<String>,
    /// The owning location group, if any.
    pub location_group: Option<GroupName>,
    /// Whether infeed to this location is allowed.
    pub infeed_active: bool,
    /// Whether outfeed from this location is allowed.
    pub outfeed_active: bool,
    /// Whether this location counts toward fill level calculations.
    /// Copied from the owning group when the location is attached.
    pub counting_active: bool,
    /// State reported by the PLC: 0 = ok, negative = undefined, positive = error code.
    pub plc_state: i32,
    /// When a transport unit last arrived at this location.
    pub last_movement: Option<OffsetDateTime>,
}

impl Location {
    /// Creates an unassigned location with both directions active.
    #[must_use]
    pub const fn new(pk: LocationPk) -> Self {
        Self {
            pk,
            description: None,
            plc_code: None,
            location_group: None,
            infeed_active: true,
            outfeed_active: true,
            counting_active: true,
            plc_state: PLC_STATE_OK,
            last_movement: None,
        }
    }

    /// Sets the infeed flag.
    pub const fn set_infeed(&mut self, active: bool) {
        self.infeed_active = active;
    }

    /// Sets the outfeed flag.
    pub const fn set_outfeed(&mut self, active: bool) {
        self.outfeed_active = active;
    }

    /// Sets the PLC state.
    pub const fn set_plc_state(&mut self, plc_state: i32) {
        self.plc_state = plc_state;
    }

    /// Applies the fields of `change` that differ from the current values.
    ///
    /// Returns `true` if anything was modified.
    pub fn apply_state_change(&mut self, change: &LocationStateChange) -> bool {
        let mut changed: bool = false;
        if let Some(plc_state) = change.plc_state
            && plc_state != self.plc_state
        {
            self.set_plc_state(plc_state);
            changed = true;
        }
        if let Some(infeed) = change.infeed_active
            && infeed != self.infeed_active
        {
            self.set_infeed(infeed);
            changed = true;
        }
        if let Some(outfeed) = change.outfeed_active
            && outfeed != self.outfeed_active
        {
            self.set_outfeed(outfeed);
            changed = true;
        }
        changed
    }

    /// Records the arrival of a transport unit.
    pub const fn stamp_movement(&mut self, at: OffsetDateTime) {
        self.last_movement = Some(at);
    }

    /// Returns whether the PLC reports a defined error.
    #[must_use]
    pub const fn has_plc_error(&self) -> bool {
        self.plc_state > PLC_STATE_OK
    }

    /// Returns whether the PLC state is undefined.
    #[must_use]
    pub const fn is_plc_state_undefined(&self) -> bool {
        self.plc_state < PLC_STATE_OK
    }
}
