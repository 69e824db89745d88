// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model: ids, waypoint paths, links and the nodes they thread through.

pub mod ids;
pub mod link;
pub mod node;
pub mod waypoint;

pub use ids::{BoxId, Id, IdError, LinkId};
pub use link::{Link, LinkDirection, LinkEnd};
pub use node::{Knot, RouteNode, WaypointNode};
pub use waypoint::{WayPoint, WayPointPath};
