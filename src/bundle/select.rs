// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{LinkEnd, RouteNode};
use crate::tree::KnotRegistry;

use super::builder::knot_if_link_end_connected;
use super::common_route::CommonRoute;

/// Picks the bundle to draw among `candidates` (most recently extended first).
///
/// Only the longest routes compete. Each of them gets its box ends moved onto
/// the knot its end link is attached to, if there is one; the route with the
/// most knot ends wins and the earlier candidate wins a tie.
pub fn select_longest_route<R: KnotRegistry + ?Sized>(
    registry: &R,
    candidates: Vec<CommonRoute>,
) -> Option<CommonRoute> {
    let longest = candidates.iter().map(CommonRoute::length).max().unwrap_or(0);

    let mut best: Option<CommonRoute> = None;
    for mut route in candidates.into_iter().filter(|route| route.length() >= longest) {
        for end in LinkEnd::BOTH {
            terminate_end_at_knot(registry, &mut route, end);
        }
        let better = best
            .as_ref()
            .map_or(true, |best| route.count_end_knots() > best.count_end_knots());
        if better {
            best = Some(route);
        }
    }
    best
}

fn terminate_end_at_knot<R: KnotRegistry + ?Sized>(registry: &R, route: &mut CommonRoute, end: LinkEnd) {
    let RouteNode::Box(parent) = route.end_node(end) else {
        return;
    };
    if let Some(knot) = knot_if_link_end_connected(registry, route.end_link(end), end, parent) {
        route.terminate_at_knot(end, knot);
    }
}
