// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only lookups over the topology.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{GroupQuery, LocationGroupView, LocationQuery, LocationView};
use wms_topology::Topology;
use wms_topology_domain::{GroupName, Location, LocationGroup, LocationPk};

/// Matches `value` against a pattern where `%` stands for any run of
/// characters (including none) and `_` for exactly one character.
#[must_use]
pub fn matches_pattern(pattern: &str, value: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let value: Vec<char> = value.chars().collect();

    // Greedy wildcard matching with backtracking to the last `%`.
    let (mut p, mut v) = (0_usize, 0_usize);
    let mut star: Option<(usize, usize)> = None;
    while v < value.len() {
        match pattern.get(p).copied() {
            Some('%') => {
                star = Some((p, v));
                p += 1;
            }
            Some(c) if c == '_' || c == value[v] => {
                p += 1;
                v += 1;
            }
            _ => match star {
                Some((star_p, star_v)) => {
                    p = star_p + 1;
                    v = star_v + 1;
                    star = Some((star_p, star_v + 1));
                }
                None => return false,
            },
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}

fn split_names(names: &str) -> Vec<&str> {
    names
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .collect()
}

fn location_matches(location: &Location, query: &LocationQuery, groups: &[GroupName]) -> bool {
    let coordinates: [(&Option<String>, &str); 5] = [
        (&query.area, location.pk.area()),
        (&query.aisle, location.pk.aisle()),
        (&query.x, location.pk.x()),
        (&query.y, location.pk.y()),
        (&query.z, location.pk.z()),
    ];
    coordinates.iter().all(|(pattern, segment)| {
        pattern
            .as_deref()
            .is_none_or(|pattern| matches_pattern(pattern, segment))
    }) && query
        .plc_code
        .as_deref()
        .is_none_or(|code| location.plc_code.as_deref() == Some(code))
        && (query.location_group_names.is_none()
            || location
                .location_group
                .as_ref()
                .is_some_and(|group| groups.contains(group)))
}

/// Returns the locations matching every criterion of `query`, ordered by key.
///
/// # Errors
///
/// Returns an error if `locationPK` is malformed or names a location that
/// does not exist.
pub fn find_locations(
    topology: &Topology,
    query: &LocationQuery,
) -> Result<Vec<LocationView>, ApiError> {
    if let Some(raw) = &query.location_pk {
        let pk: LocationPk = LocationPk::parse(raw).map_err(translate_domain_error)?;
        let location: &Location = topology
            .require_location(&pk)
            .map_err(translate_domain_error)?;
        return Ok(vec![LocationView::of(location)]);
    }

    let groups: Vec<GroupName> = query
        .location_group_names
        .as_deref()
        .map(split_names)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|name| GroupName::new(name).ok())
        .collect();

    Ok(topology
        .locations()
        .filter(|location| location_matches(location, query, &groups))
        .map(LocationView::of)
        .collect())
}

/// Returns the groups selected by `query`, ordered by name. Without
/// criteria every group is returned.
///
/// # Errors
///
/// Returns an error if `name` is given and does not exist.
pub fn find_groups(
    topology: &Topology,
    query: &GroupQuery,
) -> Result<Vec<LocationGroupView>, ApiError> {
    if let Some(raw) = &query.name {
        let name: GroupName = GroupName::new(raw).map_err(translate_domain_error)?;
        let group: &LocationGroup = topology
            .require_group(&name)
            .map_err(translate_domain_error)?;
        return Ok(vec![LocationGroupView::of(group)]);
    }

    match query.names.as_deref() {
        Some(names) => {
            let wanted: Vec<&str> = split_names(names);
            Ok(topology
                .groups()
                .filter(|group| wanted.contains(&group.name.value()))
                .map(LocationGroupView::of)
                .collect())
        }
        None => Ok(topology.groups().map(LocationGroupView::of).collect()),
    }
}
