// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crate::model::{Link, LinkEnd, RouteNode, WaypointNode};
use crate::tree::{BoxTree, BoxWatcher};

use super::can_bundle::can_bundle_with;
use super::settings::BundleSettings;

/// A bordering link found bundlable with the analysed link at `node`.
#[derive(Debug, Clone)]
pub(crate) struct BorderingHit {
    pub(crate) node: RouteNode,
    pub(crate) link: Arc<Link>,
}

/// Outcome of walking one end of a link down the tree.
#[derive(Debug)]
pub(crate) struct EndTrace {
    pub(crate) end: LinkEnd,
    /// Watcher on the deepest node reached; the caller releases it.
    pub(crate) deepest: BoxWatcher,
    /// Bundlable bordering links in the order they were found.
    pub(crate) hits: Vec<BorderingHit>,
}

/// Walks `end` of `link` from its managing box towards its terminal node.
///
/// Exactly one watcher is held at any time: the next node's watcher is
/// acquired by the lookup and the previous one released right after. The walk
/// stops early (keeping the deepest watcher) when a lookup misses or the node
/// reached has no children to descend into.
pub(crate) async fn trace_end<T: BoxTree>(
    tree: &T,
    settings: &BundleSettings,
    link: &Link,
    end: LinkEnd,
) -> EndTrace {
    let managing_box = link.managing_box();
    let mut node = WaypointNode::Box(managing_box.clone());
    let mut watcher = tree.watch(managing_box).await;
    let mut hits = Vec::new();

    for waypoint in link.path(end).without_head(managing_box) {
        let Some(parent) = node.as_box() else {
            tracing::warn!(
                link = %link,
                %end,
                node = %node.id(),
                "waypoint is not a box, cannot descend further"
            );
            break;
        };

        let Some(child) = tree.resolve_child(parent, waypoint.box_id()).await else {
            tracing::warn!(
                link = %link,
                %end,
                parent = %parent,
                %waypoint,
                "node not found for waypoint"
            );
            break;
        };

        let previous = std::mem::replace(&mut watcher, child.watcher);
        previous.unwatch();
        node = child.node;

        let Some(route_node) = node.to_route_node() else {
            tracing::warn!(link = %link, %end, node = %node.id(), "node is not resolved yet");
            continue;
        };
        collect_bundlable(tree, settings, link, end, &route_node, &mut hits).await;
    }

    EndTrace { end, deepest: watcher, hits }
}

async fn collect_bundlable<T: BoxTree>(
    tree: &T,
    settings: &BundleSettings,
    link: &Link,
    end: LinkEnd,
    node: &RouteNode,
    hits: &mut Vec<BorderingHit>,
) {
    let bordering = tree.bordering_links(node.id(), end.bordering_direction());
    if bordering.iter().all(|other| other.id() == link.id()) {
        return;
    }

    let Some(rect) = tree.client_rect(node.id()).await else {
        tracing::warn!(link = %link, %end, node = %node, "no client rect for node");
        return;
    };
    let Some(line) = tree.line_in_client_coords(link.id()).await else {
        tracing::warn!(link = %link, %end, "no client line for link");
        return;
    };

    for other in bordering {
        if other.id() == link.id() {
            continue;
        }
        let Some(other_line) = tree.line_in_client_coords(other.id()).await else {
            tracing::warn!(link = %link, other = %other, %end, "no client line for bordering link");
            continue;
        };
        if !can_bundle_with(&line, &other_line, &rect, settings) {
            continue;
        }

        tracing::debug!(link = %link.id(), other = %other.id(), %end, node = %node, "bundlable");
        hits.push(BorderingHit { node: node.clone(), link: other });
    }
}
