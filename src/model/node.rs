// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use super::ids::BoxId;

/// A box-local terminal node where two links can meet without crossing another border.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Knot {
    id: BoxId,
    parent: BoxId,
}

impl Knot {
    pub fn new(id: BoxId, parent: BoxId) -> Self {
        Self { id, parent }
    }

    pub fn id(&self) -> &BoxId {
        &self.id
    }

    /// The box whose node registry holds this knot.
    pub fn parent(&self) -> &BoxId {
        &self.parent
    }
}

/// What a waypoint resolved to while walking down the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaypointNode {
    Box(BoxId),
    Knot(Knot),
    /// Present in the tree but not classified yet (e.g. still rendering).
    Unresolved(BoxId),
}

impl WaypointNode {
    pub fn id(&self) -> &BoxId {
        match self {
            Self::Box(id) | Self::Unresolved(id) => id,
            Self::Knot(knot) => knot.id(),
        }
    }

    /// Only boxes have children to descend into.
    pub fn as_box(&self) -> Option<&BoxId> {
        match self {
            Self::Box(id) => Some(id),
            Self::Knot(_) | Self::Unresolved(_) => None,
        }
    }

    pub fn to_route_node(&self) -> Option<RouteNode> {
        match self {
            Self::Box(id) => Some(RouteNode::Box(id.clone())),
            Self::Knot(knot) => Some(RouteNode::Knot(knot.clone())),
            Self::Unresolved(_) => None,
        }
    }
}

/// Where one end of a common route currently stops.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteNode {
    /// Dangling at a box border.
    Box(BoxId),
    /// Terminated at a real knot.
    Knot(Knot),
}

impl RouteNode {
    pub fn id(&self) -> &BoxId {
        match self {
            Self::Box(id) => id,
            Self::Knot(knot) => knot.id(),
        }
    }

    pub fn is_knot(&self) -> bool {
        matches!(self, Self::Knot(_))
    }
}

impl fmt::Display for RouteNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box(id) => write!(f, "box {id}"),
            Self::Knot(knot) => write!(f, "knot {} in {}", knot.id(), knot.parent()),
        }
    }
}
