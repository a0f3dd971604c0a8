// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! PLC error codes and their translation into availability changes.
//!
//! A PLC reports an 8 character code over `0`, `1` and `*`. The last
//! character describes infeed, the one before it outfeed: `1` means
//! blocked, `0` means free and `*` leaves the current value untouched.

use crate::availability::AvailabilityState;
use crate::error::DomainError;

/// Length of a PLC error code.
pub const ERROR_CODE_LENGTH: usize = 8;

const BLOCKED: char = '1';
const FREE: char = '0';
const WILDCARD: char = '*';

/// A PLC-reported error code with an optional numeric PLC state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorCode {
    code: String,
    plc_state: Option<i32>,
}

impl ErrorCode {
    /// Creates a validated error code.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is not 8 characters of `0`, `1` or `*`.
    pub fn new(code: &str, plc_state: Option<i32>) -> Result<Self, DomainError> {
        if code.chars().count() != ERROR_CODE_LENGTH {
            return Err(DomainError::InvalidErrorCode(format!(
                "'{code}' must be exactly {ERROR_CODE_LENGTH} characters"
            )));
        }
        if let Some(bad) = code
            .chars()
            .find(|c| !matches!(*c, BLOCKED | FREE | WILDCARD))
        {
            return Err(DomainError::InvalidErrorCode(format!(
                "'{code}' contains '{bad}', only '0', '1' and '*' are allowed"
            )));
        }
        Ok(Self {
            code: code.to_string(),
            plc_state,
        })
    }

    /// Returns the raw code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the numeric PLC state, if reported.
    #[must_use]
    pub const fn plc_state(&self) -> Option<i32> {
        self.plc_state
    }

    /// Position counted from the right, zero based.
    fn flag_from_right(&self, position: usize) -> Option<bool> {
        match self.code.chars().rev().nth(position) {
            Some(BLOCKED) => Some(true),
            Some(FREE) => Some(false),
            _ => None,
        }
    }
}

/// Changes to apply to a location, `None` meaning "leave as is".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LocationStateChange {
    /// New PLC state.
    pub plc_state: Option<i32>,
    /// New infeed flag.
    pub infeed_active: Option<bool>,
    /// New outfeed flag.
    pub outfeed_active: Option<bool>,
}

/// Changes to apply to a location group, `None` meaning "leave as is".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupStateChange {
    /// New infeed state.
    pub state_in: Option<AvailabilityState>,
    /// New outfeed state.
    pub state_out: Option<AvailabilityState>,
}

/// Translates PLC error codes into state changes.
pub trait ErrorCodeTransformer {
    /// Derives the location changes described by `code`.
    fn location_change(&self, code: &ErrorCode) -> LocationStateChange;

    /// Derives the group changes described by `code`.
    fn group_change(&self, code: &ErrorCode) -> GroupStateChange;
}

/// Default transformer reading the two rightmost characters of the code.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedErrorCodeTransformer;

impl MaskedErrorCodeTransformer {
    const INFEED_POSITION: usize = 0;
    const OUTFEED_POSITION: usize = 1;
}

impl ErrorCodeTransformer for MaskedErrorCodeTransformer {
    fn location_change(&self, code: &ErrorCode) -> LocationStateChange {
        LocationStateChange {
            plc_state: code.plc_state(),
            infeed_active: code
                .flag_from_right(Self::INFEED_POSITION)
                .map(|blocked| !blocked),
            outfeed_active: code
                .flag_from_right(Self::OUTFEED_POSITION)
                .map(|blocked| !blocked),
        }
    }

    fn group_change(&self, code: &ErrorCode) -> GroupStateChange {
        GroupStateChange {
            state_in: code
                .flag_from_right(Self::INFEED_POSITION)
                .map(AvailabilityState::from_locked),
            state_out: code
                .flag_from_right(Self::OUTFEED_POSITION)
                .map(AvailabilityState::from_locked),
        }
    }
}
