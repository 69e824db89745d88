// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use smallvec::SmallVec;

use super::ids::BoxId;

/// One step of a link end's path through the box tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WayPoint {
    box_id: BoxId,
    box_name: Option<String>,
}

impl WayPoint {
    pub fn new(box_id: BoxId) -> Self {
        Self { box_id, box_name: None }
    }

    pub fn named(box_id: BoxId, box_name: impl Into<String>) -> Self {
        Self { box_id, box_name: Some(box_name.into()) }
    }

    pub fn box_id(&self) -> &BoxId {
        &self.box_id
    }

    /// Human readable name, only used for diagnostics.
    pub fn box_name(&self) -> Option<&str> {
        self.box_name.as_deref()
    }
}

impl fmt::Display for WayPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.box_name {
            Some(name) => write!(f, "{name} ({})", self.box_id),
            None => write!(f, "{}", self.box_id),
        }
    }
}

/// Ordered waypoints from a link's managing box down to the terminal node of one end.
///
/// Paths are short (nesting depth of the box tree), so they live inline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WayPointPath {
    waypoints: SmallVec<[WayPoint; 8]>,
}

impl WayPointPath {
    pub fn new(waypoints: impl IntoIterator<Item = WayPoint>) -> Self {
        Self { waypoints: waypoints.into_iter().collect() }
    }

    pub fn from_ids<'a>(ids: impl IntoIterator<Item = &'a BoxId>) -> Self {
        Self::new(ids.into_iter().cloned().map(WayPoint::new))
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WayPoint> {
        self.waypoints.iter()
    }

    pub fn first(&self) -> Option<&WayPoint> {
        self.waypoints.first()
    }

    /// The terminal waypoint of this end.
    pub fn last(&self) -> Option<&WayPoint> {
        self.waypoints.last()
    }

    pub fn contains(&self, box_id: &BoxId) -> bool {
        self.waypoints.iter().any(|waypoint| waypoint.box_id() == box_id)
    }

    /// Drops the managing box if the path starts with it.
    ///
    /// Persisted paths may or may not include their managing box as head.
    pub fn without_head(&self, managing_box: &BoxId) -> &[WayPoint] {
        match self.waypoints.split_first() {
            Some((head, rest)) if head.box_id() == managing_box => rest,
            _ => &self.waypoints,
        }
    }
}

impl<'a> IntoIterator for &'a WayPointPath {
    type Item = &'a WayPoint;
    type IntoIter = std::slice::Iter<'a, WayPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for WayPointPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, waypoint) in self.waypoints.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", waypoint.box_id())?;
        }
        Ok(())
    }
}
