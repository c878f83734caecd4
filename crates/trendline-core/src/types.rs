// File: crates/trendline-core/src/types.rs
// Summary: Shared types and constants (sizes, margins, default boundary).

use chrono::NaiveDate;
use serde::Deserialize;

/// Default surface width in pixels.
pub const WIDTH: u32 = 1200;
/// Default surface height in pixels.
pub const HEIGHT: u32 = 500;

/// Boundary used when the date control holds no value yet.
pub fn default_start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2018, 6, 1).unwrap_or_default()
}

/// Screen margins around the drawable area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Insets {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Insets {
    /// Create new insets (non-negative by type).
    pub const fn new(left: u32, right: u32, top: u32, bottom: u32) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub const fn hsum(&self) -> u32 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub const fn vsum(&self) -> u32 { self.top + self.bottom }
}

impl Default for Insets {
    fn default() -> Self {
        Self::new(50, 80, 20, 30)
    }
}

/// Drawable area left after removing the insets from the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    pub fn new(surface_width: u32, surface_height: u32, insets: &Insets) -> Self {
        Self {
            width: surface_width.saturating_sub(insets.hsum()).max(1) as f64,
            height: surface_height.saturating_sub(insets.vsum()).max(1) as f64,
        }
    }
}
