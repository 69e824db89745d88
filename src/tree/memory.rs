// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use super::watcher::{BoxWatcher, WatchRelease};
use super::{BoxTree, KnotRegistry, ResolvedChild};
use crate::geometry::{Line, Rect};
use crate::model::{BoxId, Knot, Link, LinkDirection, LinkEnd, LinkId, WaypointNode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoryNodeKind {
    Box,
    Knot,
    /// Known to the tree but not classified yet.
    Pending,
}

#[derive(Debug, Clone)]
struct MemoryNode {
    parent: Option<BoxId>,
    kind: MemoryNodeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    UnknownParent { id: BoxId, parent: BoxId },
    DuplicateNode { id: BoxId },
    ParentNotABox { id: BoxId, parent: BoxId },
    DuplicateLink { link_id: LinkId },
    UnknownManagingBox { link_id: LinkId, managing_box: BoxId },
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownParent { id, parent } => {
                write!(f, "node {id} references unknown parent {parent}")
            }
            Self::DuplicateNode { id } => write!(f, "node {id} is defined more than once"),
            Self::ParentNotABox { id, parent } => {
                write!(f, "node {id} cannot be nested in {parent}, which is not a box")
            }
            Self::DuplicateLink { link_id } => write!(f, "link {link_id} is defined more than once"),
            Self::UnknownManagingBox { link_id, managing_box } => {
                write!(f, "link {link_id} references unknown managing box {managing_box}")
            }
        }
    }
}

impl std::error::Error for TreeError {}

/// Snapshot of watcher bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatchStats {
    pub acquired: usize,
    pub released: usize,
}

impl WatchStats {
    pub fn live(&self) -> usize {
        self.acquired.saturating_sub(self.released)
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    stats: WatchStats,
    live: BTreeMap<BoxId, usize>,
}

/// Counts watcher acquisitions and releases per node.
#[derive(Debug, Default)]
pub struct WatchLedger {
    state: Mutex<LedgerState>,
}

impl WatchLedger {
    fn acquire(&self, box_id: &BoxId) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.stats.acquired += 1;
        *state.live.entry(box_id.clone()).or_default() += 1;
    }

    pub fn stats(&self) -> WatchStats {
        self.state.lock().unwrap_or_else(PoisonError::into_inner).stats
    }

    /// Number of watchers currently held on `box_id`.
    pub fn live_on(&self, box_id: &BoxId) -> usize {
        let state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.live.get(box_id).copied().unwrap_or(0)
    }
}

impl WatchRelease for WatchLedger {
    fn release(&self, box_id: &BoxId) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.stats.released += 1;
        match state.live.get_mut(box_id) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                state.live.remove(box_id);
            }
            None => tracing::warn!(box_id = %box_id, "released a watcher that was never acquired"),
        }
    }
}

/// A box tree held entirely in memory.
///
/// Geometry sits behind locks so it can be moved while a search is in flight,
/// the way a live layout would. Every async lookup yields once before answering.
#[derive(Debug)]
pub struct MemoryBoxTree {
    root: BoxId,
    nodes: BTreeMap<BoxId, MemoryNode>,
    rects: RwLock<BTreeMap<BoxId, Rect>>,
    links: BTreeMap<LinkId, Arc<Link>>,
    lines: RwLock<BTreeMap<LinkId, Line>>,
    outgoing: BTreeMap<BoxId, Vec<Arc<Link>>>,
    ingoing: BTreeMap<BoxId, Vec<Arc<Link>>>,
    ledger: Arc<WatchLedger>,
}

impl MemoryBoxTree {
    pub fn new(root: BoxId, root_rect: Rect) -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert(root.clone(), MemoryNode { parent: None, kind: MemoryNodeKind::Box });
        let mut rects = BTreeMap::new();
        rects.insert(root.clone(), root_rect);

        Self {
            root,
            nodes,
            rects: RwLock::new(rects),
            links: BTreeMap::new(),
            lines: RwLock::new(BTreeMap::new()),
            outgoing: BTreeMap::new(),
            ingoing: BTreeMap::new(),
            ledger: Arc::new(WatchLedger::default()),
        }
    }

    pub fn root(&self) -> &BoxId {
        &self.root
    }

    pub fn add_box(&mut self, parent: &BoxId, id: BoxId, rect: Rect) -> Result<(), TreeError> {
        self.add_node(parent, id, MemoryNodeKind::Box, Some(rect))
    }

    pub fn add_knot(&mut self, parent: &BoxId, id: BoxId, rect: Rect) -> Result<(), TreeError> {
        self.add_node(parent, id, MemoryNodeKind::Knot, Some(rect))
    }

    pub fn add_node(
        &mut self,
        parent: &BoxId,
        id: BoxId,
        kind: MemoryNodeKind,
        rect: Option<Rect>,
    ) -> Result<(), TreeError> {
        if self.nodes.contains_key(&id) {
            return Err(TreeError::DuplicateNode { id });
        }
        match self.nodes.get(parent) {
            None => return Err(TreeError::UnknownParent { id, parent: parent.clone() }),
            Some(node) if node.kind != MemoryNodeKind::Box => {
                return Err(TreeError::ParentNotABox { id, parent: parent.clone() });
            }
            Some(_) => {}
        }

        if let Some(rect) = rect {
            self.rects_mut().insert(id.clone(), rect);
        }
        self.nodes.insert(id, MemoryNode { parent: Some(parent.clone()), kind });
        Ok(())
    }

    /// Registers `link` as bordering every node below its managing box on either path.
    pub fn add_link(&mut self, link: Link, line: Line) -> Result<Arc<Link>, TreeError> {
        if self.links.contains_key(link.id()) {
            return Err(TreeError::DuplicateLink { link_id: link.id().clone() });
        }
        if !self.nodes.contains_key(link.managing_box()) {
            return Err(TreeError::UnknownManagingBox {
                link_id: link.id().clone(),
                managing_box: link.managing_box().clone(),
            });
        }

        let link = Arc::new(link);
        for end in LinkEnd::BOTH {
            let index = match end.bordering_direction() {
                LinkDirection::Outgoing => &mut self.outgoing,
                LinkDirection::Ingoing => &mut self.ingoing,
            };
            for waypoint in link.path(end).without_head(link.managing_box()) {
                index.entry(waypoint.box_id().clone()).or_default().push(link.clone());
            }
        }

        self.lines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(link.id().clone(), line);
        self.links.insert(link.id().clone(), link.clone());
        Ok(link)
    }

    pub fn link(&self, id: &LinkId) -> Option<Arc<Link>> {
        self.links.get(id).cloned()
    }

    pub fn links(&self) -> impl Iterator<Item = &Arc<Link>> + '_ {
        self.links.values()
    }

    pub fn node_kind(&self, id: &BoxId) -> Option<MemoryNodeKind> {
        self.nodes.get(id).map(|node| node.kind)
    }

    /// Moves or resizes a node on screen.
    pub fn set_client_rect(&self, id: &BoxId, rect: Rect) {
        self.rects_write().insert(id.clone(), rect);
    }

    /// Moves a link on screen.
    pub fn set_line(&self, id: &LinkId, line: Line) {
        self.lines.write().unwrap_or_else(PoisonError::into_inner).insert(id.clone(), line);
    }

    pub fn ledger(&self) -> &Arc<WatchLedger> {
        &self.ledger
    }

    pub fn watch_stats(&self) -> WatchStats {
        self.ledger.stats()
    }

    fn new_watcher(&self, box_id: &BoxId) -> BoxWatcher {
        self.ledger.acquire(box_id);
        BoxWatcher::new(box_id.clone(), self.ledger.clone())
    }

    fn rects_mut(&mut self) -> &mut BTreeMap<BoxId, Rect> {
        self.rects.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    fn rects_write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<BoxId, Rect>> {
        self.rects.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KnotRegistry for MemoryBoxTree {
    fn node_by_id(&self, parent: &BoxId, id: &BoxId) -> Option<Knot> {
        let node = self.nodes.get(id)?;
        if node.kind != MemoryNodeKind::Knot || node.parent.as_ref() != Some(parent) {
            return None;
        }
        Some(Knot::new(id.clone(), parent.clone()))
    }
}

impl BoxTree for MemoryBoxTree {
    async fn watch(&self, box_id: &BoxId) -> BoxWatcher {
        tokio::task::yield_now().await;
        self.new_watcher(box_id)
    }

    async fn resolve_child(&self, parent: &BoxId, child: &BoxId) -> Option<ResolvedChild> {
        tokio::task::yield_now().await;
        let node = self.nodes.get(child)?;
        if node.parent.as_ref() != Some(parent) {
            return None;
        }

        let resolved = match node.kind {
            MemoryNodeKind::Box => WaypointNode::Box(child.clone()),
            MemoryNodeKind::Knot => WaypointNode::Knot(Knot::new(child.clone(), parent.clone())),
            MemoryNodeKind::Pending => WaypointNode::Unresolved(child.clone()),
        };
        Some(ResolvedChild { node: resolved, watcher: self.new_watcher(child) })
    }

    async fn client_rect(&self, node: &BoxId) -> Option<Rect> {
        tokio::task::yield_now().await;
        self.rects.read().unwrap_or_else(PoisonError::into_inner).get(node).copied()
    }

    async fn line_in_client_coords(&self, link: &LinkId) -> Option<Line> {
        tokio::task::yield_now().await;
        self.lines.read().unwrap_or_else(PoisonError::into_inner).get(link).copied()
    }

    fn bordering_links(&self, node: &BoxId, direction: LinkDirection) -> Vec<Arc<Link>> {
        let index = match direction {
            LinkDirection::Outgoing => &self.outgoing,
            LinkDirection::Ingoing => &self.ingoing,
        };
        index.get(node).cloned().unwrap_or_default()
    }
}
