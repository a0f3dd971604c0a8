// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Initial topology loading.
//!
//! A seed file is a JSON document describing the group tree, the locations
//! in it and any transport units already on site. Every entity is created
//! through the same handlers the HTTP surface uses, so a seed is subject to
//! exactly the same validation.

use crate::ApiResult;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CreateLocationGroupRequest, CreateLocationRequest, CreateTransportUnitRequest,
    LocationGroupView, LocationView, TransportUnitView, default_fill_level, default_true,
};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::info;
use wms_topology::Topology;
use wms_topology_domain::BarcodeFormat;

/// Seed loading errors.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Seed file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Seed file could not be read: {0}")]
    Io(#[from] std::io::Error),

    #[error("Seed entry '{entity}' was rejected: {source}")]
    Rejected { entity: String, source: ApiError },
}

/// The root of a seed document.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologySeed {
    /// Root groups, each with its subtree.
    #[serde(default)]
    pub groups: Vec<GroupSeed>,
    /// Locations listed outside any group entry.
    #[serde(default)]
    pub locations: Vec<CreateLocationRequest>,
    /// Transport units standing on seeded locations.
    #[serde(default)]
    pub transport_units: Vec<CreateTransportUnitRequest>,
}

/// A group with its nested children and locations.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSeed {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub group_type: Option<String>,
    #[serde(default = "default_true")]
    pub counting_active: bool,
    #[serde(default = "default_fill_level")]
    pub max_fill_level: f32,
    #[serde(default)]
    pub children: Vec<GroupSeed>,
    /// Keys of locations created inside this group.
    #[serde(default)]
    pub locations: Vec<String>,
}

/// Parses a seed document.
///
/// # Errors
///
/// Returns an error if `json` is not a valid seed document.
pub fn load_seed(json: &str) -> Result<TopologySeed, SeedError> {
    Ok(serde_json::from_str(json)?)
}

/// Reads and parses a seed file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid seed
/// document.
pub fn load_seed_file(path: &Path) -> Result<TopologySeed, SeedError> {
    let contents: String = std::fs::read_to_string(path)?;
    load_seed(&contents)
}

/// Builds a topology from a seed.
///
/// Groups are created parents first, each followed by its own locations;
/// loose locations and then transport units come last.
///
/// # Errors
///
/// Returns [`SeedError::Rejected`] for the first entry the handlers refuse.
pub fn build_topology(
    seed: &TopologySeed,
    format: &BarcodeFormat,
) -> Result<Topology, SeedError> {
    let mut topology: Topology = Topology::new();

    for group in &seed.groups {
        seed_group(&mut topology, group, None)?;
    }

    for location in &seed.locations {
        let result: Result<ApiResult<LocationView>, ApiError> =
            handlers::create_location(&topology, location.clone());
        step(&mut topology, &location.location_pk, result)?;
    }

    for unit in &seed.transport_units {
        let result: Result<ApiResult<TransportUnitView>, ApiError> =
            handlers::create_transport_unit(&topology, unit.clone(), format);
        step(&mut topology, &unit.barcode, result)?;
    }

    info!(
        groups = topology.groups().count(),
        locations = topology.locations().count(),
        transport_units = topology.transport_units().count(),
        "Seeded topology"
    );
    Ok(topology)
}

fn seed_group(
    topology: &mut Topology,
    group: &GroupSeed,
    parent: Option<&str>,
) -> Result<(), SeedError> {
    let request: CreateLocationGroupRequest = CreateLocationGroupRequest {
        name: group.name.clone(),
        description: group.description.clone(),
        group_type: group.group_type.clone(),
        counting_active: group.counting_active,
        max_fill_level: group.max_fill_level,
        parent: parent.map(str::to_string),
    };
    let result: Result<ApiResult<LocationGroupView>, ApiError> =
        handlers::create_group(topology, request);
    step(topology, &group.name, result)?;

    for location_pk in &group.locations {
        let request: CreateLocationRequest = CreateLocationRequest {
            location_pk: location_pk.clone(),
            description: None,
            plc_code: None,
            location_group_name: Some(group.name.clone()),
        };
        let result: Result<ApiResult<LocationView>, ApiError> =
            handlers::create_location(topology, request);
        step(topology, location_pk, result)?;
    }

    for child in &group.children {
        seed_group(topology, child, Some(&group.name))?;
    }
    Ok(())
}

fn step<T>(
    topology: &mut Topology,
    entity: &str,
    result: Result<ApiResult<T>, ApiError>,
) -> Result<(), SeedError> {
    let result: ApiResult<T> = result.map_err(|source| SeedError::Rejected {
        entity: entity.to_string(),
        source,
    })?;
    *topology = result.new_topology;
    Ok(())
}
