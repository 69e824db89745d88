// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routebundle: finds the stretch of route a link shares with its neighbours
//! in a tree of nested boxes, so the renderer can draw them as one bundle.

pub mod bundle;
pub mod geometry;
pub mod model;
pub mod store;
pub mod tree;
