// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Finding the longest stretch of route a link shares with its neighbours.
//!
//! Both ends of the analysed link are walked from the managing box down to the
//! link's terminal nodes. Wherever another link leaves (`from` end) or enters
//! (`to` end) the same node across the same edge, it is recorded as bundlable.
//! The hits of both walks are then replayed into candidate routes and the
//! longest, best connected candidate is returned.

mod builder;
mod can_bundle;
mod common_route;
mod select;
mod settings;
mod traversal;


pub use builder::{knot_between_links, knot_if_link_end_connected};
pub use can_bundle::{can_bundle, can_bundle_with, shared_crossing_edge};
pub use common_route::{CommonRoute, RouteSummary};
pub use select::select_longest_route;
pub use settings::{BundleSettings, SettingsError};

use crate::model::{Link, LinkEnd};
use crate::tree::{BoxTree, BoxWatcher};

use builder::CommonRouteBuilder;
use traversal::trace_end;

/// Result of a search that still holds the deepest box of each end.
///
/// Both watchers are released when dropped; call [`BoxWatcher::unwatch`] to
/// release them at a specific point instead.
#[derive(Debug)]
pub struct BundleOutcome {
    pub route: Option<CommonRoute>,
    pub deepest_box_in_from_path: BoxWatcher,
    pub deepest_box_in_to_path: BoxWatcher,
}

impl BundleOutcome {
    /// Releases both watchers and keeps the route.
    pub fn into_route(self) -> Option<CommonRoute> {
        self.deepest_box_in_from_path.unwatch();
        self.deepest_box_in_to_path.unwatch();
        self.route
    }
}

/// Runs route searches against one box tree.
#[derive(Debug)]
pub struct RouteFinder<'t, T> {
    tree: &'t T,
    settings: BundleSettings,
}

impl<'t, T: BoxTree> RouteFinder<'t, T> {
    pub fn new(tree: &'t T) -> Self {
        Self::with_settings(tree, BundleSettings::default())
    }

    pub fn with_settings(tree: &'t T, settings: BundleSettings) -> Self {
        Self { tree, settings }
    }

    pub fn settings(&self) -> &BundleSettings {
        &self.settings
    }

    /// The longest common route of `link`, with both watchers already released.
    pub async fn find_longest_common_route(&self, link: &Link) -> Option<CommonRoute> {
        self.find_longest_common_route_with_watchers(link).await.into_route()
    }

    /// Like [`Self::find_longest_common_route`], but hands the watchers on the
    /// deepest box reached on each end to the caller.
    ///
    /// The two ends are walked concurrently. Their hits are merged afterwards,
    /// `from` before `to`, so a route seeded on one end can be continued on the
    /// other.
    pub async fn find_longest_common_route_with_watchers(&self, link: &Link) -> BundleOutcome {
        let (from, to) = tokio::join!(
            trace_end(self.tree, &self.settings, link, LinkEnd::From),
            trace_end(self.tree, &self.settings, link, LinkEnd::To),
        );

        let mut builder = CommonRouteBuilder::new(self.tree, link.id().clone());
        builder.apply_trace(&from);
        builder.apply_trace(&to);
        let route = select_longest_route(self.tree, builder.into_candidates());

        match &route {
            Some(route) => tracing::debug!(
                link = %link,
                length = route.length(),
                end_knots = route.count_end_knots(),
                links = route.links().len(),
                "found common route"
            ),
            None => tracing::debug!(link = %link, "no common route"),
        }

        BundleOutcome {
            route,
            deepest_box_in_from_path: from.deepest,
            deepest_box_in_to_path: to.deepest,
        }
    }
}

/// [`RouteFinder::find_longest_common_route`] with default settings.
pub async fn find_longest_common_route<T: BoxTree>(tree: &T, link: &Link) -> Option<CommonRoute> {
    RouteFinder::new(tree).find_longest_common_route(link).await
}

/// [`RouteFinder::find_longest_common_route_with_watchers`] with default settings.
pub async fn find_longest_common_route_with_watchers<T: BoxTree>(
    tree: &T,
    link: &Link,
) -> BundleOutcome {
    RouteFinder::new(tree).find_longest_common_route_with_watchers(link).await
}
