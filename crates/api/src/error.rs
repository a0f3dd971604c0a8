// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use wms_topology::CoreError;
use wms_topology_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request collides with a lock held by another group.
    Conflict {
        /// The lock rule that blocked the request.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// The request combines a target and operation that cannot go together.
    Unsupported {
        /// A human-readable description.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { rule, message } => {
                write!(f, "Conflict ({rule}): {message}")
            }
            Self::Unsupported { message } => {
                write!(f, "Unsupported: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::TargetNotFound(key) => not_found(
            "Target",
            format!("No location or location group found for '{key}'"),
        ),
        DomainError::GroupNotFound(name) => not_found(
            "Location group",
            format!("Location group '{name}' does not exist"),
        ),
        DomainError::LocationNotFound(pk) => {
            not_found("Location", format!("Location '{pk}' does not exist"))
        }
        DomainError::TransportUnitNotFound(barcode) => not_found(
            "Transport unit",
            format!("Transport unit '{barcode}' does not exist"),
        ),
        DomainError::StateChangeConflict { .. } => ApiError::Conflict {
            rule: String::from("lock_owner"),
            message,
        },
        DomainError::ParentLockedConflict { .. } => ApiError::Conflict {
            rule: String::from("parent_available"),
            message,
        },
        DomainError::UnsupportedOperation(msg) => ApiError::Unsupported { message: msg },
        DomainError::DuplicateGroup(_) => rule("unique_group_name", message),
        DomainError::DuplicateLocation(_) => rule("unique_location_pk", message),
        DomainError::DuplicateTransportUnit(_) => rule("unique_barcode", message),
        DomainError::CyclicHierarchy { .. } => rule("acyclic_hierarchy", message),
        DomainError::NotAChild { .. } => rule("direct_child", message),
        DomainError::GroupNotEmpty { .. } => rule("empty_group", message),
        DomainError::InvalidLocationPk(msg) => invalid("locationPK", msg),
        DomainError::InvalidGroupName(msg) => invalid("name", msg),
        DomainError::InvalidFillLevel(msg) => invalid("maxFillLevel", msg),
        DomainError::InvalidBarcode(msg) => invalid("barcode", msg),
        DomainError::InvalidUnitType(msg) => invalid("transportUnitType", msg),
        DomainError::InvalidErrorCode(msg) => invalid("errorCode", msg),
        DomainError::InvalidAvailabilityState(msg) => invalid("state", msg),
        DomainError::InvalidLockType(msg) => invalid("type", msg),
        DomainError::InvalidLockMode(msg) => invalid("mode", msg),
        DomainError::InvalidOperationMode(msg) => invalid("operationMode", msg),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}
