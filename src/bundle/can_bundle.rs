// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::geometry::{nearly_equal, Edge, Line, Point, Rect};

use super::settings::BundleSettings;

/// Whether two links crossing `rect` run in parallel closely enough to be drawn as one.
///
/// Uses the default tolerances; see [`shared_crossing_edge`].
pub fn can_bundle(line: &Line, other_line: &Line, rect: &Rect) -> bool {
    can_bundle_with(line, other_line, rect, &BundleSettings::default())
}

pub fn can_bundle_with(
    line: &Line,
    other_line: &Line,
    rect: &Rect,
    settings: &BundleSettings,
) -> bool {
    shared_crossing_edge(line, other_line, rect, settings).is_some()
}

/// The edge of `rect` that both lines cross, if they cross the same one.
///
/// Both lines are elongated first so links ending right on the border still
/// count as crossing it. Edges are tested left, right, top, bottom; the first
/// edge whose coordinate both crossings share (within tolerance) wins.
pub fn shared_crossing_edge(
    line: &Line,
    other_line: &Line,
    rect: &Rect,
    settings: &BundleSettings,
) -> Option<Edge> {
    let elongation = settings.elongation_epsilon(rect);
    let crossing = single_crossing(rect, &line.elongate(elongation), "line")?;
    let other_crossing = single_crossing(rect, &other_line.elongate(elongation), "other_line")?;

    let horizontal = settings.horizontal_epsilon(rect);
    let vertical = settings.vertical_epsilon(rect);
    let candidates = [
        (Edge::Left, [rect.x, crossing.x, other_crossing.x], horizontal),
        (Edge::Right, [rect.right_x(), crossing.x, other_crossing.x], horizontal),
        (Edge::Top, [rect.y, crossing.y, other_crossing.y], vertical),
        (Edge::Bottom, [rect.bottom_y(), crossing.y, other_crossing.y], vertical),
    ];

    candidates
        .into_iter()
        .find(|(_, values, epsilon)| nearly_equal(values, *epsilon))
        .map(|(edge, _, _)| edge)
}

fn single_crossing(rect: &Rect, line: &Line, which: &'static str) -> Option<Point> {
    let crossings = rect.intersections(line);
    match crossings.len() {
        0 => {
            tracing::warn!(which, ?line, ?rect, "no intersection with rect, cannot bundle");
            None
        }
        1 => Some(crossings[0]),
        count => {
            tracing::warn!(
                which,
                ?line,
                ?rect,
                count,
                "expected exactly one intersection with rect, using the nearest"
            );
            Some(crossings[0])
        }
    }
}
