// File: crates/trendline-core/src/config.rs
// Summary: Chart configuration loaded from TOML, with defaults matching the stock chart.

use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::color::parse_hex;
use crate::error::{ChartError, Result};
use crate::landmark::{default_landmarks, Landmark};
use crate::theme::{self, Theme};
use crate::types::{default_start, Insets, HEIGHT, WIDTH};

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Insets,
    pub theme: String,
    pub default_start: NaiveDate,
    pub y_label: String,
    pub y_ticks: usize,
    pub legend_slots: usize,
    /// Hex colours replacing the theme's series palette when non-empty.
    pub palette: Vec<String>,
    pub landmarks: Vec<Landmark>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            margin: Insets::default(),
            theme: "light".to_string(),
            default_start: default_start(),
            y_label: "Tests".to_string(),
            y_ticks: 6,
            legend_slots: 12,
            palette: Vec::new(),
            landmarks: default_landmarks(),
        }
    }
}

impl ChartConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(content)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= self.margin.hsum() || self.height <= self.margin.vsum() {
            return Err(ChartError::Config(format!(
                "{}x{} leaves no drawable area inside the margins",
                self.width, self.height
            )));
        }
        if self.legend_slots == 0 {
            return Err(ChartError::Config("legend_slots must be at least 1".into()));
        }
        self.resolve_theme().map(|_| ())
    }

    /// Named preset with the configured palette applied.
    pub fn resolve_theme(&self) -> Result<Theme> {
        let base = theme::find(&self.theme)
            .ok_or_else(|| ChartError::Config(format!("unknown theme '{}'", self.theme)))?;
        let palette = self.palette.iter().map(|s| parse_hex(s)).collect::<Result<Vec<_>>>()?;
        Ok(base.with_series_palette(palette))
    }
}
