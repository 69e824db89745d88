// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The box tree as seen by the bundler.
//!
//! The tree itself (rendering, layout, persistence) lives elsewhere; the bundler
//! only needs lookups by id, current client-space geometry, bordering links and
//! scoped watchers. Every geometry query reflects the layout at the time of the
//! call and may be stale right after it, so callers re-query instead of caching.

pub mod memory;
pub mod watcher;

use std::sync::Arc;

use crate::geometry::{Line, Rect};
use crate::model::{BoxId, Knot, Link, LinkDirection, LinkId, WaypointNode};

pub use memory::{MemoryBoxTree, MemoryNodeKind, TreeError, WatchLedger, WatchStats};
pub use watcher::{BoxWatcher, WatchRelease};

/// A child looked up (and materialized if necessary) below a box.
#[derive(Debug)]
pub struct ResolvedChild {
    pub node: WaypointNode,
    pub watcher: BoxWatcher,
}

/// Box-local node registry.
pub trait KnotRegistry {
    /// Looks up a knot registered directly in `parent`.
    fn node_by_id(&self, parent: &BoxId, id: &BoxId) -> Option<Knot>;
}

/// Async view on the live box tree.
///
/// Each `async` method is a suspension point: the renderer may relayout or
/// re-render between any two calls.
#[allow(async_fn_in_trait)]
pub trait BoxTree: KnotRegistry {
    async fn watch(&self, box_id: &BoxId) -> BoxWatcher;

    /// `None` when `child` is not (or no longer) a child of `parent`.
    async fn resolve_child(&self, parent: &BoxId, child: &BoxId) -> Option<ResolvedChild>;

    async fn client_rect(&self, node: &BoxId) -> Option<Rect>;

    async fn line_in_client_coords(&self, link: &LinkId) -> Option<Line>;

    /// Links leaving (`Outgoing`) or entering (`Ingoing`) `node`.
    fn bordering_links(&self, node: &BoxId, direction: LinkDirection) -> Vec<Arc<Link>>;
}
