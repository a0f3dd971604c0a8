// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{GroupName, LocationPk, TargetRef};

/// Routes a business key to the kind of target it addresses.
///
/// Keys shaped like a location key (`AREA/AISLE/X/Y/Z`) address a location;
/// everything else is taken as a location group name. Whether the target
/// actually exists is checked by the topology.
///
/// # Errors
///
/// Returns `DomainError::TargetNotFound` if the key is neither a location key
/// nor a syntactically valid group name.
pub fn route_business_key(business_key: &str) -> Result<TargetRef, DomainError> {
    if let Ok(pk) = LocationPk::parse(business_key) {
        return Ok(TargetRef::Location(pk));
    }
    GroupName::new(business_key)
        .map(TargetRef::Group)
        .map_err(|_| DomainError::TargetNotFound(business_key.to_string()))
}

/// Validates that a transport unit type name is present.
///
/// # Errors
///
/// Returns an error if the type name is blank.
pub fn validate_unit_type(unit_type: &str) -> Result<(), DomainError> {
    if unit_type.trim().is_empty() {
        return Err(DomainError::InvalidUnitType(String::from(
            "Type cannot be empty",
        )));
    }
    Ok(())
}
