// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::sync::Arc;

use crate::model::BoxId;

/// Hook the box tree installs to learn when a watched node may be let go.
pub trait WatchRelease: Send + Sync {
    fn release(&self, box_id: &BoxId);
}

/// Keeps one node of the box tree observed (and therefore materialized) while held.
///
/// The watch is released exactly once: by [`BoxWatcher::unwatch`], or when the
/// guard is dropped on any other exit path.
pub struct BoxWatcher {
    box_id: BoxId,
    release: Option<Arc<dyn WatchRelease>>,
}

impl BoxWatcher {
    pub fn new(box_id: BoxId, release: Arc<dyn WatchRelease>) -> Self {
        Self { box_id, release: Some(release) }
    }

    /// A watcher for trees that do not track observation.
    pub fn detached(box_id: BoxId) -> Self {
        Self { box_id, release: None }
    }

    pub fn box_id(&self) -> &BoxId {
        &self.box_id
    }

    pub fn is_watching(&self) -> bool {
        self.release.is_some()
    }

    pub fn unwatch(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release.release(&self.box_id);
        }
    }
}

impl Drop for BoxWatcher {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for BoxWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxWatcher")
            .field("box_id", &self.box_id)
            .field("watching", &self.is_watching())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::{BoxWatcher, WatchRelease};
    use crate::model::BoxId;

    #[derive(Default)]
    struct CountingRelease {
        released: AtomicUsize,
    }

    impl WatchRelease for CountingRelease {
        fn release(&self, _box_id: &BoxId) {
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn bid(value: &str) -> BoxId {
        BoxId::new(value).expect("box id")
    }

    #[test]
    fn unwatch_releases_once_and_drop_does_not_release_again() {
        let counter = Arc::new(CountingRelease::default());
        let watcher = BoxWatcher::new(bid("a"), counter.clone());
        assert!(watcher.is_watching());

        watcher.unwatch();
        assert_eq!(counter.released.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dropping_releases_on_early_exit() {
        let counter = Arc::new(CountingRelease::default());

        let find = |stop_early: bool| -> Option<BoxWatcher> {
            let watcher = BoxWatcher::new(bid("a"), counter.clone());
            if stop_early {
                return None;
            }
            Some(watcher)
        };

        assert!(find(true).is_none());
        assert_eq!(counter.released.load(Ordering::SeqCst), 1);

        let kept = find(false).expect("watcher");
        assert_eq!(counter.released.load(Ordering::SeqCst), 1);
        drop(kept);
        assert_eq!(counter.released.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn detached_watchers_have_nothing_to_release() {
        let watcher = BoxWatcher::detached(bid("a"));
        assert!(!watcher.is_watching());
        assert_eq!(watcher.box_id(), &bid("a"));
    }
}
