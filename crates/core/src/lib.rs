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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! Hierarchical availability state machine for a warehouse topology.
//!
//! Location groups form a tree. Locking a group for infeed or outfeed
//! cascades down the subtree, and the group that set a lock is recorded as
//! its locker so that only it can lift the lock again. Locations are the
//! leaves and carry their own independent flags.

mod apply;
mod arbitration;
mod availability;
mod command;
mod error;
mod leaf;
mod snapshot;
mod state;
mod topology;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use state::TransitionResult;
pub use topology::Topology;
