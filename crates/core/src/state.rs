// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::topology::Topology;
use wms_topology_events::TopologyEvent;

/// The result of a successful topology transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects on the input topology.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The topology after the transition.
    pub new_topology: Topology,
    /// Events describing the transition, entity events first.
    pub events: Vec<TopologyEvent>,
}
