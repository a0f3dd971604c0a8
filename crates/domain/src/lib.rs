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

mod availability;
mod error;
mod error_code;
mod location;
mod location_group;
mod transport_unit;
mod types;
mod validation;

#[cfg(test)]
mod tests;

// Re-export public types
pub use availability::{AvailabilityState, Direction, LockMode, LockType, OperationMode};
pub use error::DomainError;
pub use error_code::{
    ERROR_CODE_LENGTH, ErrorCode, ErrorCodeTransformer, GroupStateChange, LocationStateChange,
    MaskedErrorCodeTransformer,
};
pub use location::{Location, PLC_STATE_OK};
pub use location_group::LocationGroup;
pub use transport_unit::{Alignment, Barcode, BarcodeFormat, TransportUnit};
pub use types::{
    GROUP_NAME_MAX, GroupName, LOCATION_PK_SEGMENT_MAX, LOCATION_PK_SEGMENTS,
    LOCATION_PK_SEPARATOR, LocationPk, TargetRef,
};
pub use validation::{route_business_key, validate_unit_type};
