// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routebundle and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geometry::Rect;

const DEFAULT_DIVISOR: f64 = 100.0;

/// Tolerances of the bundling test, expressed relative to the box being crossed.
///
/// Both values divide a box measure, so the test behaves the same at every zoom level:
/// - lines are elongated by `diagonal / elongation_divisor`
/// - crossings count as "on the same edge" within `width / edge_tolerance_divisor`
///   (left/right) or `height / edge_tolerance_divisor` (top/bottom)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleSettings {
    pub elongation_divisor: f64,
    pub edge_tolerance_divisor: f64,
}

impl Default for BundleSettings {
    fn default() -> Self {
        Self {
            elongation_divisor: DEFAULT_DIVISOR,
            edge_tolerance_divisor: DEFAULT_DIVISOR,
        }
    }
}

impl BundleSettings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_divisor("elongation_divisor", self.elongation_divisor)?;
        check_divisor("edge_tolerance_divisor", self.edge_tolerance_divisor)
    }

    pub fn elongation_epsilon(&self, rect: &Rect) -> f64 {
        rect.diagonal() / self.elongation_divisor
    }

    pub fn horizontal_epsilon(&self, rect: &Rect) -> f64 {
        rect.width / self.edge_tolerance_divisor
    }

    pub fn vertical_epsilon(&self, rect: &Rect) -> f64 {
        rect.height / self.edge_tolerance_divisor
    }
}

fn check_divisor(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        return Ok(());
    }
    Err(SettingsError::InvalidDivisor { field, value })
}

#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    InvalidDivisor { field: &'static str, value: f64 },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDivisor { field, value } => {
                write!(f, "{field} must be a finite number greater than 0 (got {value})")
            }
        }
    }
}

impl std::error::Error for SettingsError {}
