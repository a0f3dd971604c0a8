// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Number of segments in a location key.
pub const LOCATION_PK_SEGMENTS: usize = 5;

/// Maximum length of a single location key segment.
pub const LOCATION_PK_SEGMENT_MAX: usize = 4;

/// Maximum length of a location group name.
pub const GROUP_NAME_MAX: usize = 20;

/// Separator between location key segments.
pub const LOCATION_PK_SEPARATOR: char = '/';

/// Natural key of a location: `AREA/AISLE/X/Y/Z`.
///
/// Every segment is between 1 and 4 characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationPk {
    area: String,
    aisle: String,
    x: String,
    y: String,
    z: String,
}

impl LocationPk {
    /// Creates a location key from its five segments.
    ///
    /// # Errors
    ///
    /// Returns an error if any segment is empty or longer than 4 characters.
    pub fn new(area: &str, aisle: &str, x: &str, y: &str, z: &str) -> Result<Self, DomainError> {
        for (label, segment) in [("area", area), ("aisle", aisle), ("x", x), ("y", y), ("z", z)] {
            validate_segment(label, segment)?;
        }
        Ok(Self {
            area: area.to_string(),
            aisle: aisle.to_string(),
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        })
    }

    /// Parses a `/`-separated location key.
    ///
    /// # Errors
    ///
    /// Returns an error if the string does not have exactly five valid segments.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let segments: Vec<&str> = value.split(LOCATION_PK_SEPARATOR).collect();
        if segments.len() != LOCATION_PK_SEGMENTS {
            return Err(DomainError::InvalidLocationPk(format!(
                "'{value}' must have exactly {LOCATION_PK_SEGMENTS} segments, found {}",
                segments.len()
            )));
        }
        Self::new(
            segments[0],
            segments[1],
            segments[2],
            segments[3],
            segments[4],
        )
    }

    /// Returns whether a business key has the shape of a location key.
    #[must_use]
    pub fn is_location_pk(value: &str) -> bool {
        Self::parse(value).is_ok()
    }

    /// Returns the area segment.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Returns the aisle segment.
    #[must_use]
    pub fn aisle(&self) -> &str {
        &self.aisle
    }

    /// Returns the x coordinate segment.
    #[must_use]
    pub fn x(&self) -> &str {
        &self.x
    }

    /// Returns the y coordinate segment.
    #[must_use]
    pub fn y(&self) -> &str {
        &self.y
    }

    /// Returns the z coordinate segment.
    #[must_use]
    pub fn z(&self) -> &str {
        &self.z
    }

    /// Returns all five segments in key order.
    #[must_use]
    pub fn segments(&self) -> [&str; LOCATION_PK_SEGMENTS] {
        [&self.area, &self.aisle, &self.x, &self.y, &self.z]
    }
}

fn validate_segment(label: &str, segment: &str) -> Result<(), DomainError> {
    let len: usize = segment.chars().count();
    if len == 0 {
        return Err(DomainError::InvalidLocationPk(format!(
            "{label} segment cannot be empty"
        )));
    }
    if len > LOCATION_PK_SEGMENT_MAX {
        return Err(DomainError::InvalidLocationPk(format!(
            "{label} segment '{segment}' exceeds {LOCATION_PK_SEGMENT_MAX} characters"
        )));
    }
    if segment.contains(LOCATION_PK_SEPARATOR) {
        return Err(DomainError::InvalidLocationPk(format!(
            "{label} segment '{segment}' contains '{LOCATION_PK_SEPARATOR}'"
        )));
    }
    Ok(())
}

impl FromStr for LocationPk {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for LocationPk {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LocationPk> for String {
    fn from(pk: LocationPk) -> Self {
        pk.to_string()
    }
}

impl std::fmt::Display for LocationPk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}/{}/{}/{}/{}",
            self.area, self.aisle, self.x, self.y, self.z
        )
    }
}

/// Business key of a location group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GroupName {
    value: String,
}

impl GroupName {
    /// Creates a validated group name.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or longer than 20 characters.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidGroupName(String::from(
                "Name cannot be empty",
            )));
        }
        if value.chars().count() > GROUP_NAME_MAX {
            return Err(DomainError::InvalidGroupName(format!(
                "'{value}' exceeds {GROUP_NAME_MAX} characters"
            )));
        }
        Ok(Self {
            value: value.to_string(),
        })
    }

    /// Returns the name value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for GroupName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for GroupName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<GroupName> for String {
    fn from(name: GroupName) -> Self {
        name.value
    }
}

impl std::fmt::Display for GroupName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A resolved lock target.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TargetRef {
    /// A single storage location.
    Location(LocationPk),
    /// A node of the location group tree.
    Group(GroupName),
}

impl TargetRef {
    /// Returns the business key this target is addressed by.
    #[must_use]
    pub fn business_key(&self) -> String {
        match self {
            Self::Location(pk) => pk.to_string(),
            Self::Group(name) => name.value().to_string(),
        }
    }
}
