// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::{BundleSettings, SettingsError};
use crate::geometry::{Line, Rect};
use crate::model::{BoxId, IdError, Link, LinkId, WayPoint, WayPointPath};
use crate::tree::{MemoryBoxTree, MemoryNodeKind, TreeError};

/// A box tree plus the settings to search it with, as read from a scene file.
#[derive(Debug)]
pub struct Scene {
    pub tree: MemoryBoxTree,
    pub settings: BundleSettings,
}

#[derive(Debug)]
pub enum SceneError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    MissingRect {
        id: BoxId,
    },
    Tree {
        source: TreeError,
    },
    Settings {
        source: SettingsError,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path: Some(path), source } => {
                write!(f, "json error at {path:?}: {source}")
            }
            Self::Json { path: None, source } => write!(f, "json error: {source}"),
            Self::InvalidId { field, value, source } => {
                write!(f, "invalid id for {field}: {value:?}: {source}")
            }
            Self::MissingRect { id } => write!(f, "node {id} needs a rect"),
            Self::Tree { source } => write!(f, "invalid scene tree: {source}"),
            Self::Settings { source } => write!(f, "invalid settings: {source}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::MissingRect { .. } => None,
            Self::Tree { source } => Some(source),
            Self::Settings { source } => Some(source),
        }
    }
}

impl From<TreeError> for SceneError {
    fn from(source: TreeError) -> Self {
        Self::Tree { source }
    }
}

impl From<SettingsError> for SceneError {
    fn from(source: SettingsError) -> Self {
        Self::Settings { source }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SceneJson {
    #[serde(default)]
    settings: BundleSettings,
    root: RootJson,
    #[serde(default)]
    nodes: Vec<NodeJson>,
    #[serde(default)]
    links: Vec<LinkJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RootJson {
    id: String,
    rect: Rect,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct NodeJson {
    id: String,
    parent: String,
    #[serde(default)]
    kind: NodeKindJson,
    #[serde(default)]
    rect: Option<Rect>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum NodeKindJson {
    #[default]
    Box,
    Knot,
    Pending,
}

impl From<NodeKindJson> for MemoryNodeKind {
    fn from(kind: NodeKindJson) -> Self {
        match kind {
            NodeKindJson::Box => Self::Box,
            NodeKindJson::Knot => Self::Knot,
            NodeKindJson::Pending => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinkJson {
    id: String,
    managing_box: String,
    from: Vec<WayPointJson>,
    to: Vec<WayPointJson>,
    line: Line,
}

/// A waypoint is either a bare box id or an object carrying the box name too.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum WayPointJson {
    Id(String),
    Named {
        box_id: String,
        #[serde(default)]
        box_name: Option<String>,
    },
}

/// Reads and validates the scene file at `path`.
pub fn load_scene(path: impl AsRef<Path>) -> Result<Scene, SceneError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| SceneError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let scene_json: SceneJson = serde_json::from_str(&raw).map_err(|source| SceneError::Json {
        path: Some(path.to_path_buf()),
        source,
    })?;
    scene_from_json(scene_json)
}

/// Like [`load_scene`], for a scene already in memory.
pub fn parse_scene(raw: &str) -> Result<Scene, SceneError> {
    let scene_json: SceneJson =
        serde_json::from_str(raw).map_err(|source| SceneError::Json { path: None, source })?;
    scene_from_json(scene_json)
}

fn scene_from_json(scene_json: SceneJson) -> Result<Scene, SceneError> {
    scene_json.settings.validate()?;

    let root = box_id("root.id", scene_json.root.id)?;
    let mut tree = MemoryBoxTree::new(root, scene_json.root.rect);

    // Parents must be listed before their children.
    for node_json in scene_json.nodes {
        let id = box_id("nodes.id", node_json.id)?;
        let parent = box_id("nodes.parent", node_json.parent)?;
        if node_json.rect.is_none() && node_json.kind != NodeKindJson::Pending {
            return Err(SceneError::MissingRect { id });
        }
        tree.add_node(&parent, id, node_json.kind.into(), node_json.rect)?;
    }

    for link_json in scene_json.links {
        let id = LinkId::new(&link_json.id).map_err(|source| SceneError::InvalidId {
            field: "links.id",
            value: link_json.id.clone(),
            source,
        })?;
        let managing_box = box_id("links.managing_box", link_json.managing_box)?;
        let from = path_from_json("links.from", link_json.from)?;
        let to = path_from_json("links.to", link_json.to)?;
        tree.add_link(Link::new(id, managing_box, from, to), link_json.line)?;
    }

    tracing::debug!(
        root = %tree.root(),
        links = tree.links().count(),
        "loaded scene"
    );
    Ok(Scene { tree, settings: scene_json.settings })
}

fn box_id(field: &'static str, value: String) -> Result<BoxId, SceneError> {
    BoxId::new(&value).map_err(|source| SceneError::InvalidId { field, value, source })
}

fn path_from_json(
    field: &'static str,
    waypoints: Vec<WayPointJson>,
) -> Result<WayPointPath, SceneError> {
    let waypoints = waypoints
        .into_iter()
        .map(|waypoint| match waypoint {
            WayPointJson::Id(value) => box_id(field, value).map(WayPoint::new),
            WayPointJson::Named { box_id: value, box_name } => {
                let id = box_id(field, value)?;
                Ok(match box_name {
                    Some(name) => WayPoint::named(id, name),
                    None => WayPoint::new(id),
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(WayPointPath::new(waypoints))
}
