// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scene files on disk.
//!
//! A scene is a JSON document describing a box tree, its links with their
//! current client-space lines and optional bundling settings. The CLI and the
//! integration tests load scenes through here.

pub mod scene_file;

pub use scene_file::{load_scene, parse_scene, Scene, SceneError};
