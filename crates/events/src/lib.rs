// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};
use std::sync::{Mutex, PoisonError};
use wms_topology_domain::{
    AvailabilityState, Location, LocationGroup, LockType, OperationMode,
};

/// State of a location group at the moment an event was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSnapshot {
    /// The group name.
    pub name: String,
    /// The parent group name, if any.
    pub parent: Option<String>,
    /// Infeed state.
    pub state_in: AvailabilityState,
    /// Outfeed state.
    pub state_out: AvailabilityState,
    /// Group holding the infeed lock.
    pub state_in_locker: Option<String>,
    /// Group holding the outfeed lock.
    pub state_out_locker: Option<String>,
    /// Operation mode.
    pub operation_mode: OperationMode,
}

impl GroupSnapshot {
    /// Captures the current state of `group`.
    #[must_use]
    pub fn of(group: &LocationGroup) -> Self {
        Self {
            name: group.name.to_string(),
            parent: group.parent.as_ref().map(ToString::to_string),
            state_in: group.state_in(),
            state_out: group.state_out(),
            state_in_locker: group.state_in_locker().map(ToString::to_string),
            state_out_locker: group.state_out_locker().map(ToString::to_string),
            operation_mode: group.operation_mode,
        }
    }
}

/// State of a location at the moment an event was raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSnapshot {
    /// The location key.
    pub pk: String,
    /// The owning group name, if any.
    pub location_group: Option<String>,
    /// Infeed flag.
    pub infeed_active: bool,
    /// Outfeed flag.
    pub outfeed_active: bool,
    /// PLC state.
    pub plc_state: i32,
}

impl LocationSnapshot {
    /// Captures the current state of `location`.
    #[must_use]
    pub fn of(location: &Location) -> Self {
        Self {
            pk: location.pk.to_string(),
            location_group: location.location_group.as_ref().map(ToString::to_string),
            infeed_active: location.infeed_active,
            outfeed_active: location.outfeed_active,
            plc_state: location.plc_state,
        }
    }
}

/// A fact about a change in the topology.
///
/// Events are derived from successful transitions and never drive state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TopologyEvent {
    /// A location group was created.
    LocationGroupCreated {
        /// The created group.
        group: GroupSnapshot,
    },
    /// A location group's structure or attributes changed.
    LocationGroupChanged {
        /// The group after the change.
        group: GroupSnapshot,
    },
    /// A location group was deleted.
    LocationGroupDeleted {
        /// The deleted group's name.
        name: String,
    },
    /// A location group's availability state changed.
    LocationGroupStateChanged {
        /// The group after the change.
        group: GroupSnapshot,
    },
    /// A location was created.
    LocationCreated {
        /// The created location.
        location: LocationSnapshot,
    },
    /// A location's attributes or group membership changed.
    LocationChanged {
        /// The location after the change.
        location: LocationSnapshot,
    },
    /// A location was deleted.
    LocationDeleted {
        /// The deleted location's key.
        pk: String,
    },
    /// A location's infeed/outfeed flags or PLC state changed.
    LocationStateChanged {
        /// The location after the change.
        location: LocationSnapshot,
    },
    /// A lock request on a target was applied.
    TargetStateChanged {
        /// The business key the request addressed.
        business_key: String,
        /// The applied lock type.
        lock_type: LockType,
        /// The resulting mode (`IN`, `OUT`, `IN_AND_OUT`, `NONE`, `LOCK`, `UNLOCK`).
        mode: String,
        /// Hint that open work may need to be allocated again.
        reallocation: bool,
    },
    /// A transport unit was registered.
    TransportUnitCreated {
        /// The transport unit barcode.
        barcode: String,
        /// The transport unit type.
        unit_type: String,
        /// Where the unit stands.
        location: String,
    },
    /// A transport unit changed its actual location.
    TransportUnitMoved {
        /// The transport unit barcode.
        barcode: String,
        /// The previous location.
        from: String,
        /// The new location.
        to: String,
    },
}

impl TopologyEvent {
    /// Returns the business key of the affected entity.
    #[must_use]
    pub fn business_key(&self) -> &str {
        match self {
            Self::LocationGroupCreated { group }
            | Self::LocationGroupChanged { group }
            | Self::LocationGroupStateChanged { group } => &group.name,
            Self::LocationGroupDeleted { name } => name,
            Self::LocationCreated { location }
            | Self::LocationChanged { location }
            | Self::LocationStateChanged { location } => &location.pk,
            Self::LocationDeleted { pk } => pk,
            Self::TargetStateChanged { business_key, .. } => business_key,
            Self::TransportUnitCreated { barcode, .. }
            | Self::TransportUnitMoved { barcode, .. } => barcode,
        }
    }

    /// Returns the event name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LocationGroupCreated { .. } => "LocationGroupCreated",
            Self::LocationGroupChanged { .. } => "LocationGroupChanged",
            Self::LocationGroupDeleted { .. } => "LocationGroupDeleted",
            Self::LocationGroupStateChanged { .. } => "LocationGroupStateChanged",
            Self::LocationCreated { .. } => "LocationCreated",
            Self::LocationChanged { .. } => "LocationChanged",
            Self::LocationDeleted { .. } => "LocationDeleted",
            Self::LocationStateChanged { .. } => "LocationStateChanged",
            Self::TargetStateChanged { .. } => "TargetStateChanged",
            Self::TransportUnitCreated { .. } => "TransportUnitCreated",
            Self::TransportUnitMoved { .. } => "TransportUnitMoved",
        }
    }
}

/// Fire-and-forget sink for topology events.
///
/// Publishing never fails from the caller's point of view; a publisher that
/// cannot deliver drops the event.
pub trait EventPublisher: Send + Sync {
    /// Publishes a single event.
    fn publish(&self, event: &TopologyEvent);

    /// Publishes events in order.
    fn publish_all(&self, events: &[TopologyEvent]) {
        for event in events {
            self.publish(event);
        }
    }
}

/// Publisher that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<TopologyEvent>>,
}

impl RecordingPublisher {
    /// Creates an empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// Returns a copy of all recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<TopologyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: &TopologyEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use wms_topology_domain::{GroupName, LocationPk};

    fn create_test_group() -> LocationGroup {
        LocationGroup::new(GroupName::new("WH").unwrap())
    }

    #[test]
    fn test_group_snapshot_captures_state() {
        let group: LocationGroup = create_test_group();

        let snapshot: GroupSnapshot = GroupSnapshot::of(&group);

        assert_eq!(snapshot.name, "WH");
        assert_eq!(snapshot.parent, None);
        assert_eq!(snapshot.state_in, AvailabilityState::Available);
        assert_eq!(snapshot.state_out_locker, None);
        assert_eq!(snapshot.operation_mode, OperationMode::InfeedAndOutfeed);
    }

    #[test]
    fn test_location_snapshot_captures_state() {
        let mut location: Location = Location::new(LocationPk::parse("A/B/C/D/E").unwrap());
        location.set_outfeed(false);

        let snapshot: LocationSnapshot = LocationSnapshot::of(&location);

        assert_eq!(snapshot.pk, "A/B/C/D/E");
        assert!(snapshot.infeed_active);
        assert!(!snapshot.outfeed_active);
    }

    #[test]
    fn test_event_business_key_and_name() {
        let event: TopologyEvent = TopologyEvent::TargetStateChanged {
            business_key: String::from("PICK01"),
            lock_type: LockType::AllocationLock,
            mode: String::from("IN"),
            reallocation: true,
        };

        assert_eq!(event.business_key(), "PICK01");
        assert_eq!(event.name(), "TargetStateChanged");
    }

    #[test]
    fn test_event_serialization_is_tagged() {
        let event: TopologyEvent = TopologyEvent::LocationGroupStateChanged {
            group: GroupSnapshot::of(&create_test_group()),
        };

        let json: String = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"location_group_state_changed\""));
        assert!(json.contains("\"state_in\":\"AVAILABLE\""));

        let back: TopologyEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn test_recording_publisher_keeps_order() {
        let publisher: RecordingPublisher = RecordingPublisher::new();

        publisher.publish_all(&[
            TopologyEvent::LocationGroupDeleted {
                name: String::from("A"),
            },
            TopologyEvent::LocationDeleted {
                pk: String::from("A/B/C/D/E"),
            },
        ]);

        let events: Vec<TopologyEvent> = publisher.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name(), "LocationGroupDeleted");
        assert_eq!(events[1].business_key(), "A/B/C/D/E");
    }
}
