// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::LocationPk;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Which side of a barcode keeps the significant characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Characters start at the left; padding is appended.
    Left,
    /// Characters end at the right; padding is prepended.
    #[default]
    Right,
}

impl FromStr for Alignment {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(DomainError::InvalidBarcode(format!(
                "Unknown alignment '{s}', expected 'left' or 'right'"
            ))),
        }
    }
}

/// How barcodes are normalized.
///
/// Passed explicitly wherever barcodes are built; there is no global default
/// that can change at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeFormat {
    /// Total length after padding.
    pub length: usize,
    /// Character used for padding.
    pub pad: char,
    /// Alignment of the significant characters.
    pub alignment: Alignment,
}

impl Default for BarcodeFormat {
    fn default() -> Self {
        Self {
            length: 20,
            pad: '0',
            alignment: Alignment::Right,
        }
    }
}

/// The identifier printed on a transport unit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Barcode {
    value: String,
}

impl Barcode {
    /// Creates a barcode normalized to `format`.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is blank or longer than the format allows.
    pub fn new(raw: &str, format: &BarcodeFormat) -> Result<Self, DomainError> {
        let trimmed: &str = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidBarcode(String::from(
                "Barcode cannot be empty",
            )));
        }
        let len: usize = trimmed.chars().count();
        if len > format.length {
            return Err(DomainError::InvalidBarcode(format!(
                "'{trimmed}' exceeds {} characters",
                format.length
            )));
        }
        let padding: String = std::iter::repeat_n(format.pad, format.length - len).collect();
        let value: String = match format.alignment {
            Alignment::Left => format!("{trimmed}{padding}"),
            Alignment::Right => format!("{padding}{trimmed}"),
        };
        Ok(Self { value })
    }

    /// Returns the normalized value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for Barcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A carrier (pallet, bin, tote) moving between locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportUnit {
    /// The unique barcode.
    pub barcode: Barcode,
    /// Name of the transport unit type, e.g. "EURO".
    pub unit_type: String,
    /// Where the unit currently is.
    pub actual_location: LocationPk,
    /// When the unit was last moved.
    pub moved_at: Option<OffsetDateTime>,
}

impl TransportUnit {
    /// Creates a transport unit standing at `actual_location`.
    #[must_use]
    pub const fn new(barcode: Barcode, unit_type: String, actual_location: LocationPk) -> Self {
        Self {
            barcode,
            unit_type,
            actual_location,
            moved_at: None,
        }
    }
}
