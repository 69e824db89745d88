// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::sync::Arc;

use routebundle::geometry::{Line, Point, Rect};
use routebundle::model::{BoxId, Link, LinkId, WayPointPath};
use routebundle::tree::MemoryBoxTree;

pub struct FanScene {
    pub tree: MemoryBoxTree,
    pub analysed: Arc<Link>,
}

fn bid(value: impl AsRef<str>) -> BoxId {
    BoxId::new(value).expect("box id")
}

/// `links` parallel links from one source box into the innermost of `depth`
/// nested boxes, all crossing every left edge on the way.
pub fn fan_scene(depth: usize, links: usize) -> FanScene {
    assert!(depth >= 1 && depth <= 12, "fan scene depth must be in 1..=12");
    assert!(links >= 2, "fan scene needs >= 2 links");

    let root = bid("root");
    let mut tree = MemoryBoxTree::new(root.clone(), Rect::new(0.0, 0.0, 4000.0, 4000.0));
    tree.add_box(&root, bid("src"), Rect::new(10.0, 1000.0, 80.0, 800.0)).expect("src");

    let mut target_path = vec![root.clone()];
    let mut parent = root.clone();
    for level in 0..depth {
        let inset = 40.0 * level as f64;
        let size = 2000.0 - 2.0 * inset;
        let id = bid(format!("d{level}"));
        tree.add_box(&parent, id.clone(), Rect::new(1000.0 + inset, 500.0 + inset, size, size))
            .expect("nested box");
        target_path.push(id.clone());
        parent = id;
    }
    let source_path = [root.clone(), bid("src")];

    let spacing = 600.0 / links as f64;
    let mut analysed = None;
    for idx in 0..links {
        let y = 1100.0 + spacing * idx as f64;
        let link = Link::new(
            LinkId::new(format!("link_{idx:04}")).expect("link id"),
            root.clone(),
            WayPointPath::from_ids(&source_path),
            WayPointPath::from_ids(&target_path),
        );
        let line = Line::new(Point::new(50.0, y), Point::new(2000.0, y));
        let link = tree.add_link(link, line).expect("link");
        analysed.get_or_insert(link);
    }

    FanScene { tree, analysed: analysed.expect("at least one link") }
}
