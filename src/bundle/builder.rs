// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use crate::model::{BoxId, Knot, Link, LinkEnd, LinkId, RouteNode};
use crate::tree::KnotRegistry;

use super::common_route::CommonRoute;
use super::traversal::{BorderingHit, EndTrace};

/// Grows candidate routes from the bundlable links found while walking a link's ends.
///
/// Candidates are kept oldest first and searched newest first, so the route that
/// was extended last is the first one offered for the next extension. Extending
/// a route copies it; the shorter route it came from stays a candidate.
pub(crate) struct CommonRouteBuilder<'r, R: ?Sized> {
    registry: &'r R,
    analysed: LinkId,
    routes: Vec<CommonRoute>,
}

/// How the candidate at `index` takes the next hit.
enum RouteToExtend {
    /// The hit is on the route's own end link.
    Continue { index: usize },
    /// The hit is on a new link attached to the end link through `knot`.
    Join { index: usize, knot: Knot },
}

impl<'r, R: KnotRegistry + ?Sized> CommonRouteBuilder<'r, R> {
    pub(crate) fn new(registry: &'r R, analysed: LinkId) -> Self {
        Self { registry, analysed, routes: Vec::new() }
    }

    /// Replays the hits of one end in the order they were found.
    pub(crate) fn apply_trace(&mut self, trace: &EndTrace) {
        for hit in &trace.hits {
            self.extend(trace.end, hit);
        }
    }

    pub(crate) fn extend(&mut self, end: LinkEnd, hit: &BorderingHit) {
        let found = self.find_route_to_extend(end, &hit.link);

        let route = match found {
            None => {
                tracing::debug!(
                    link = %self.analysed,
                    other = %hit.link.id(),
                    %end,
                    node = %hit.node,
                    "seeding common route"
                );
                CommonRoute::seed(hit.link.clone(), hit.node.clone())
            }
            Some(RouteToExtend::Continue { index }) => {
                let mut route = self.routes[index].clone();
                route.elongate_with_waypoint(end, hit.node.clone());
                self.log_extended(end, hit, &route);
                route
            }
            Some(RouteToExtend::Join { index, knot }) => {
                let mut route = self.routes[index].clone();
                route.elongate_with_link(end, knot, hit.link.clone(), hit.node.clone());
                self.log_extended(end, hit, &route);
                route
            }
        };

        self.routes.push(route);
    }

    fn log_extended(&self, end: LinkEnd, hit: &BorderingHit, route: &CommonRoute) {
        tracing::debug!(
            link = %self.analysed,
            other = %hit.link.id(),
            %end,
            node = %hit.node,
            length = route.length(),
            "extended common route"
        );
    }

    /// All candidates, most recently extended first.
    pub(crate) fn into_candidates(self) -> Vec<CommonRoute> {
        let mut routes = self.routes;
        routes.reverse();
        routes
    }

    fn find_route_to_extend(&self, end: LinkEnd, bordering: &Arc<Link>) -> Option<RouteToExtend> {
        for (index, route) in self.routes.iter().enumerate().rev() {
            let end_link = route.end_link(end);
            if end_link.id() == bordering.id() {
                return Some(RouteToExtend::Continue { index });
            }

            // Joining a new link needs a knot inside the box the route currently stops at.
            let RouteNode::Box(end_box) = route.end_node(end) else {
                continue;
            };
            if let Some(knot) = knot_between_links(self.registry, end_link, bordering, end_box) {
                return Some(RouteToExtend::Join { index, knot });
            }
        }
        None
    }
}

/// The knot in `parent` where one of the links ends and the other one starts.
///
/// Only the first match is returned, `link -> other` before `other -> link`.
pub fn knot_between_links<R: KnotRegistry + ?Sized>(
    registry: &R,
    link: &Link,
    other: &Link,
    parent: &BoxId,
) -> Option<Knot> {
    knot_between_links_directed(registry, link, other, parent)
        .or_else(|| knot_between_links_directed(registry, other, link, parent))
}

fn knot_between_links_directed<R: KnotRegistry + ?Sized>(
    registry: &R,
    link: &Link,
    follow_up: &Link,
    parent: &BoxId,
) -> Option<Knot> {
    let Some(link_target) = link.end_node_id(LinkEnd::To) else {
        tracing::warn!(link = %link, "link has an empty 'to' path");
        return None;
    };
    let Some(follow_up_source) = follow_up.end_node_id(LinkEnd::From) else {
        tracing::warn!(link = %follow_up, "link has an empty 'from' path");
        return None;
    };
    if link_target != follow_up_source {
        return None;
    }
    registry.node_by_id(parent, link_target)
}

/// The knot in `parent` that `end` of `link` is attached to, if any.
pub fn knot_if_link_end_connected<R: KnotRegistry + ?Sized>(
    registry: &R,
    link: &Link,
    end: LinkEnd,
    parent: &BoxId,
) -> Option<Knot> {
    let Some(target) = link.end_node_id(end) else {
        tracing::warn!(link = %link, %end, "link has an empty path");
        return None;
    };
    registry.node_by_id(parent, target)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use rstest::{fixture, rstest};
    use tracing_test::traced_test;

    use super::{knot_between_links, knot_if_link_end_connected, CommonRouteBuilder};
    use crate::bundle::traversal::BorderingHit;
    use crate::model::{BoxId, Knot, Link, LinkEnd, LinkId, RouteNode, WayPointPath};
    use crate::tree::KnotRegistry;

    /// Knots by `(parent, id)`.
    #[derive(Default)]
    struct Knots(BTreeMap<(BoxId, BoxId), Knot>);

    impl Knots {
        fn with(mut self, parent: &str, id: &str) -> Self {
            let knot = Knot::new(bid(id), bid(parent));
            self.0.insert((bid(parent), bid(id)), knot);
            self
        }
    }

    impl KnotRegistry for Knots {
        fn node_by_id(&self, parent: &BoxId, id: &BoxId) -> Option<Knot> {
            self.0.get(&(parent.clone(), id.clone())).cloned()
        }
    }

    fn bid(value: &str) -> BoxId {
        BoxId::new(value).expect("box id")
    }

    fn link(id: &str, from: &[&str], to: &[&str]) -> Arc<Link> {
        let from = from.iter().map(|id| bid(id)).collect::<Vec<_>>();
        let to = to.iter().map(|id| bid(id)).collect::<Vec<_>>();
        Arc::new(Link::new(
            LinkId::new(id).expect("link id"),
            bid("root"),
            WayPointPath::from_ids(&from),
            WayPointPath::from_ids(&to),
        ))
    }

    fn at_box(link: &Arc<Link>, node: &str) -> BorderingHit {
        BorderingHit { node: RouteNode::Box(bid(node)), link: link.clone() }
    }

    #[fixture]
    fn knots() -> Knots {
        // `b` holds a knot `hub` where `ab` ends and `bc` starts.
        Knots::default().with("b", "hub")
    }

    #[rstest]
    fn first_hit_seeds_and_repeated_hits_continue_the_same_link(knots: Knots) {
        let other = link("other", &["root", "a"], &["root", "b", "hub"]);
        let mut builder = CommonRouteBuilder::new(&knots, LinkId::new("analysed").expect("id"));

        builder.extend(LinkEnd::To, &at_box(&other, "b"));
        builder.extend(LinkEnd::To, &at_box(&other, "inner"));

        let candidates = builder.into_candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].length(), 1);
        assert_eq!(candidates[0].to(), &RouteNode::Box(bid("inner")));
        assert_eq!(candidates[1].length(), 0, "the shorter route stays a candidate");
    }

    #[rstest]
    fn joins_a_follow_up_link_through_the_knot_in_the_route_end_box(knots: Knots) {
        let ab = link("ab", &["root", "a"], &["root", "b", "hub"]);
        let bc = link("bc", &["root", "b", "hub"], &["root", "c"]);
        let mut builder = CommonRouteBuilder::new(&knots, LinkId::new("analysed").expect("id"));

        builder.extend(LinkEnd::To, &at_box(&ab, "b"));
        builder.extend(LinkEnd::To, &at_box(&bc, "c"));

        let candidates = builder.into_candidates();
        let joined = &candidates[0];
        assert_eq!(joined.length(), 1);
        let ids = joined.links().map(|l| l.id().to_string()).collect::<Vec<_>>();
        assert_eq!(ids, ["ab", "bc"]);
        let knots = joined.knots().map(|k| k.id().to_string()).collect::<Vec<_>>();
        assert_eq!(knots, ["hub"]);
        assert_eq!(joined.to(), &RouteNode::Box(bid("c")));
    }

    #[rstest]
    fn continuing_the_end_link_records_no_knot(knots: Knots) {
        // `ab` ends on the knot `hub` in `b`, but a second hit on `ab` itself
        // only moves the route along.
        let ab = link("ab", &["root", "a"], &["root", "b", "hub"]);
        let mut builder = CommonRouteBuilder::new(&knots, LinkId::new("analysed").expect("id"));

        builder.extend(LinkEnd::To, &at_box(&ab, "b"));
        builder.extend(LinkEnd::To, &at_box(&ab, "b"));

        let candidates = builder.into_candidates();
        assert_eq!(candidates[0].length(), 1);
        assert_eq!(candidates[0].links().len(), 1);
        assert_eq!(candidates[0].knots().len(), 0);
    }

    #[rstest]
    fn unrelated_links_seed_separate_routes(knots: Knots) {
        let ab = link("ab", &["root", "a"], &["root", "b", "hub"]);
        let xy = link("xy", &["root", "x"], &["root", "y"]);
        let mut builder = CommonRouteBuilder::new(&knots, LinkId::new("analysed").expect("id"));

        builder.extend(LinkEnd::To, &at_box(&ab, "b"));
        builder.extend(LinkEnd::To, &at_box(&xy, "y"));

        let candidates = builder.into_candidates();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|route| route.length() == 0));
        assert_eq!(candidates[0].end_link(LinkEnd::To).id().as_str(), "xy");
    }

    #[rstest]
    fn newest_matching_route_is_extended(knots: Knots) {
        let other = link("other", &["root", "a"], &["root", "b", "hub"]);
        let mut builder = CommonRouteBuilder::new(&knots, LinkId::new("analysed").expect("id"));

        builder.extend(LinkEnd::From, &at_box(&other, "a"));
        builder.extend(LinkEnd::To, &at_box(&other, "b"));
        builder.extend(LinkEnd::To, &at_box(&other, "hub-box"));

        let candidates = builder.into_candidates();
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].length(), 2);
        assert_eq!(candidates[0].from(), &RouteNode::Box(bid("a")));
        assert_eq!(candidates[0].to(), &RouteNode::Box(bid("hub-box")));
    }

    #[rstest]
    fn knot_lookup_works_in_both_directions(knots: Knots) {
        let ab = link("ab", &["root", "a"], &["root", "b", "hub"]);
        let bc = link("bc", &["root", "b", "hub"], &["root", "c"]);

        assert_eq!(knot_between_links(&knots, &ab, &bc, &bid("b")), Some(Knot::new(bid("hub"), bid("b"))));
        assert_eq!(knot_between_links(&knots, &bc, &ab, &bid("b")), Some(Knot::new(bid("hub"), bid("b"))));
        assert_eq!(knot_between_links(&knots, &ab, &bc, &bid("a")), None);
        assert_eq!(
            knot_if_link_end_connected(&knots, &ab, LinkEnd::To, &bid("b")),
            Some(Knot::new(bid("hub"), bid("b")))
        );
        assert_eq!(knot_if_link_end_connected(&knots, &ab, LinkEnd::From, &bid("b")), None);
    }

    #[test]
    #[traced_test]
    fn empty_paths_are_reported_and_never_connect() {
        let knots = Knots::default().with("b", "hub");
        let dangling = link("dangling", &[], &[]);
        let bc = link("bc", &["root", "b", "hub"], &["root", "c"]);

        assert_eq!(knot_between_links(&knots, &dangling, &bc, &bid("b")), None);
        assert_eq!(knot_if_link_end_connected(&knots, &dangling, LinkEnd::To, &bid("b")), None);
        assert!(logs_contain("empty"));
    }
}
