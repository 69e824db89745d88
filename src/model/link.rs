// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::{BoxId, LinkId};
use super::waypoint::{WayPoint, WayPointPath};

/// Which end of a link a path or traversal belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkEnd {
    From,
    To,
}

impl LinkEnd {
    pub const BOTH: [LinkEnd; 2] = [LinkEnd::From, LinkEnd::To];

    /// Links bordering a box on this end's side run in this direction.
    ///
    /// The `from` end walks down to the link's source, where bundlable links leave
    /// the box; the `to` end walks down to the target, where they enter it.
    pub fn bordering_direction(self) -> LinkDirection {
        match self {
            Self::From => LinkDirection::Outgoing,
            Self::To => LinkDirection::Ingoing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
        }
    }
}

impl fmt::Display for LinkEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LinkDirection {
    Outgoing,
    Ingoing,
}

/// A directed link between two nodes of the box tree, as persisted by its managing box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    id: LinkId,
    managing_box: BoxId,
    from: WayPointPath,
    to: WayPointPath,
}

impl Link {
    pub fn new(id: LinkId, managing_box: BoxId, from: WayPointPath, to: WayPointPath) -> Self {
        Self { id, managing_box, from, to }
    }

    pub fn id(&self) -> &LinkId {
        &self.id
    }

    /// Lowest box containing both ends; every path starts below (or at) it.
    pub fn managing_box(&self) -> &BoxId {
        &self.managing_box
    }

    pub fn from_path(&self) -> &WayPointPath {
        &self.from
    }

    pub fn to_path(&self) -> &WayPointPath {
        &self.to
    }

    pub fn path(&self, end: LinkEnd) -> &WayPointPath {
        match end {
            LinkEnd::From => &self.from,
            LinkEnd::To => &self.to,
        }
    }

    /// Terminal waypoint of `end`, i.e. the node the link is attached to.
    pub fn end_waypoint(&self, end: LinkEnd) -> Option<&WayPoint> {
        self.path(end).last()
    }

    pub fn end_node_id(&self, end: LinkEnd) -> Option<&BoxId> {
        self.end_waypoint(end).map(WayPoint::box_id)
    }

    pub fn is_box_in_path(&self, box_id: &BoxId) -> bool {
        self.from.contains(box_id) || self.to.contains(box_id)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} -> {}] in {}", self.id, self.from, self.to, self.managing_box)
    }
}

#[cfg(test)]
mod tests {
    use super::{Link, LinkDirection, LinkEnd};
    use crate::model::{BoxId, LinkId, WayPointPath};

    fn bid(value: &str) -> BoxId {
        BoxId::new(value).expect("box id")
    }

    #[test]
    fn ends_map_to_bordering_directions() {
        assert_eq!(LinkEnd::From.bordering_direction(), LinkDirection::Outgoing);
        assert_eq!(LinkEnd::To.bordering_direction(), LinkDirection::Ingoing);
    }

    #[test]
    fn describes_itself_with_both_paths() {
        let link = Link::new(
            LinkId::new("l1").expect("link id"),
            bid("root"),
            WayPointPath::from_ids(&[bid("root"), bid("x")]),
            WayPointPath::from_ids(&[bid("root"), bid("y"), bid("y1")]),
        );

        assert_eq!(link.to_string(), "l1 [root/x -> root/y/y1] in root");
        assert_eq!(link.end_node_id(LinkEnd::To), Some(&bid("y1")));
        assert!(link.is_box_in_path(&bid("y")));
        assert!(!link.is_box_in_path(&bid("z")));
    }
}
