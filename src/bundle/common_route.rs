// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::VecDeque;
use std::sync::Arc;

use serde::Serialize;

use crate::model::{Knot, Link, LinkEnd, LinkId, RouteNode};

/// A candidate bundle: links that share a stretch of route with the analysed link.
///
/// Links are kept in traversal order (`from` side first). Consecutive links are
/// joined by the knot stored between them.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonRoute {
    links: VecDeque<Arc<Link>>,
    knots: VecDeque<Knot>,
    from: RouteNode,
    to: RouteNode,
    length: usize,
}

impl CommonRoute {
    /// A route consisting of `link` alone, with both ends at `node`.
    ///
    /// The seed step itself is not counted: a fresh route has length 0 and every
    /// later elongation adds one.
    pub fn seed(link: Arc<Link>, node: RouteNode) -> Self {
        Self {
            links: VecDeque::from([link]),
            knots: VecDeque::new(),
            from: node.clone(),
            to: node,
            length: 0,
        }
    }

    pub fn links(&self) -> impl ExactSizeIterator<Item = &Arc<Link>> + '_ {
        self.links.iter()
    }

    pub fn knots(&self) -> impl ExactSizeIterator<Item = &Knot> + '_ {
        self.knots.iter()
    }

    pub fn from(&self) -> &RouteNode {
        &self.from
    }

    pub fn to(&self) -> &RouteNode {
        &self.to
    }

    pub fn end_node(&self, end: LinkEnd) -> &RouteNode {
        match end {
            LinkEnd::From => &self.from,
            LinkEnd::To => &self.to,
        }
    }

    pub fn end_link(&self, end: LinkEnd) -> &Arc<Link> {
        let link = match end {
            LinkEnd::From => self.links.front(),
            LinkEnd::To => self.links.back(),
        };
        // A route is never without its seed link.
        link.unwrap_or_else(|| unreachable!("common route without links"))
    }

    /// Number of shared nodes past the seed.
    ///
    /// Every step along the route counts, whether it stays on the current end link
    /// or joins a new one, so two routes over the same links can differ in length.
    pub fn length(&self) -> usize {
        self.length
    }

    /// How many ends (0, 1 or 2) terminate at a real knot instead of a box border.
    pub fn count_end_knots(&self) -> usize {
        usize::from(self.from.is_knot()) + usize::from(self.to.is_knot())
    }

    pub fn contains_link(&self, id: &LinkId) -> bool {
        self.links.iter().any(|link| link.id() == id)
    }

    /// Moves `end` one node further along the same end link.
    pub fn elongate_with_waypoint(&mut self, end: LinkEnd, node: RouteNode) {
        self.set_end_node(end, node);
        self.length += 1;
    }

    /// Appends `link` on `end`, joined to the current end link through `connecting_knot`.
    pub fn elongate_with_link(
        &mut self,
        end: LinkEnd,
        connecting_knot: Knot,
        link: Arc<Link>,
        node: RouteNode,
    ) {
        match end {
            LinkEnd::From => {
                self.knots.push_front(connecting_knot);
                self.links.push_front(link);
            }
            LinkEnd::To => {
                self.knots.push_back(connecting_knot);
                self.links.push_back(link);
            }
        }
        self.set_end_node(end, node);
        self.length += 1;
    }

    /// Lets `end` stop at the knot its end link is attached to. Length is unchanged.
    pub fn terminate_at_knot(&mut self, end: LinkEnd, knot: Knot) {
        self.set_end_node(end, RouteNode::Knot(knot));
    }

    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            links: self.links.iter().map(|link| link.id().to_string()).collect(),
            knots: self.knots.iter().map(|knot| knot.id().to_string()).collect(),
            from: self.from.id().to_string(),
            to: self.to.id().to_string(),
            length: self.length,
            end_knots: self.count_end_knots(),
        }
    }

    fn set_end_node(&mut self, end: LinkEnd, node: RouteNode) {
        match end {
            LinkEnd::From => self.from = node,
            LinkEnd::To => self.to = node,
        }
    }
}

/// Flat, serializable view of a [`CommonRoute`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub links: Vec<String>,
    pub knots: Vec<String>,
    pub from: String,
    pub to: String,
    pub length: usize,
    pub end_knots: usize,
}
