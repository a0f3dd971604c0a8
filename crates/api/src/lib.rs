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

//! API boundary for the warehouse topology.
//!
//! Requests arrive as plain DTOs, are validated into domain types and
//! applied to the topology as core commands. Errors are translated into
//! [`ApiError`] so that neither domain nor core errors leak to callers.

mod error;
pub mod handlers;
mod query;
mod request_response;
mod seed;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    add_child, assign_location, change_group_state, change_group_state_by_error_code,
    change_location_state, change_target, create_group, create_location, create_transport_unit,
    delete_group, delete_location, find_transport_unit, move_transport_unit, remove_child,
};
pub use query::{find_groups, find_locations, matches_pattern};
pub use request_response::{
    ChangeTargetRequest, CreateLocationGroupRequest, CreateLocationRequest,
    CreateTransportUnitRequest, DeletedResponse, ErrorCodeRequest, GroupQuery, GroupStateRequest,
    LocationGroupView, LocationQuery, LocationView, TargetStateResponse, TransportUnitView,
};
pub use seed::{GroupSeed, SeedError, TopologySeed, build_topology, load_seed, load_seed_file};

use wms_topology::{Topology, TransitionResult};
use wms_topology_events::{EventPublisher, TopologyEvent};

/// Result of an API operation that changes the topology.
///
/// The topology passed to a handler is never modified. Callers install
/// `new_topology` and publish `events`, in that order, or drop the result
/// to discard the change.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// Events describing the change, in order.
    pub events: Vec<TopologyEvent>,
    /// The topology after the operation.
    pub new_topology: Topology,
}

impl<T> ApiResult<T> {
    /// Pairs a response with the transition that produced it.
    #[must_use]
    pub fn new(response: T, transition: TransitionResult) -> Self {
        Self {
            response,
            events: transition.events,
            new_topology: transition.new_topology,
        }
    }

    /// Installs the new topology, publishes the events and returns the
    /// response.
    pub fn commit(self, topology: &mut Topology, publisher: &dyn EventPublisher) -> T {
        *topology = self.new_topology;
        publisher.publish_all(&self.events);
        self.response
    }
}
