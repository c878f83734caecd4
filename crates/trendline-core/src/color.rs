// File: crates/trendline-core/src/color.rs
// Summary: Ordinal series colouring and CSS colour parsing/formatting.

use std::collections::BTreeMap;
use std::str::FromStr;

use palette::{Srgb, Srgba};

use crate::error::{ChartError, Result};
use crate::theme::Color;

/// Assigns palette entries to series ids in first-seen order, cycling when the
/// palette runs out. The same ids in the same order always get the same colours.
#[derive(Clone, Debug)]
pub struct OrdinalColors {
    mapping: BTreeMap<String, Color>,
    fallback: Color,
}

impl OrdinalColors {
    pub fn new<'a>(ids: impl IntoIterator<Item = &'a str>, palette: &[Color]) -> Self {
        let fallback = Srgba::new(0x7f, 0x7f, 0x7f, 255);
        let mut mapping = BTreeMap::new();
        if !palette.is_empty() {
            for id in ids {
                let next = palette[mapping.len() % palette.len()];
                mapping.entry(id.to_string()).or_insert(next);
            }
        }
        Self { mapping, fallback }
    }

    pub fn color_for(&self, id: &str) -> Color {
        self.mapping.get(id).copied().unwrap_or(self.fallback)
    }
}

/// Parse `#rrggbb` (or `rrggbb`) into an opaque colour.
pub fn parse_hex(s: &str) -> Result<Color> {
    let rgb = Srgb::<u8>::from_str(s.trim())
        .map_err(|e| ChartError::Config(format!("bad colour '{s}': {e}")))?;
    Ok(Srgba::new(rgb.red, rgb.green, rgb.blue, 255))
}

/// `#rrggbb` when opaque, `rgba(r, g, b, a)` otherwise.
pub fn to_css(c: Color) -> String {
    if c.alpha == 255 {
        format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)
    } else {
        let a = (c.alpha as f64 / 255.0 * 100.0).round() / 100.0;
        format!("rgba({}, {}, {}, {})", c.red, c.green, c.blue, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::category10;

    #[test]
    fn colours_cycle_in_series_order() {
        let palette = category10();
        let ids: Vec<String> = (0..12).map(|i| format!("s{i}")).collect();
        let colors = OrdinalColors::new(ids.iter().map(String::as_str), &palette);
        assert_eq!(colors.color_for("s0"), palette[0]);
        assert_eq!(colors.color_for("s9"), palette[9]);
        assert_eq!(colors.color_for("s10"), palette[0]);
        assert_eq!(colors.color_for("unknown"), Srgba::new(0x7f, 0x7f, 0x7f, 255));
    }

    #[test]
    fn css_round_trip_for_landmark_stroke() {
        assert_eq!(to_css(Srgba::new(0, 0, 0, 102)), "rgba(0, 0, 0, 0.4)");
        assert_eq!(to_css(parse_hex("#1f77b4").unwrap()), "#1f77b4");
        assert!(parse_hex("not-a-colour").is_err());
    }
}
