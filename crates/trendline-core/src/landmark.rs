// File: crates/trendline-core/src/landmark.rs
// Summary: Dated annotations and their placement as dashed verticals with stacked rotated labels.

use chrono::NaiveDate;
use log::debug;
use serde::Deserialize;

use crate::scale::TimeScale;

/// Approximate glyph advance at 10px used to stack labels.
const CHAR_ADVANCE: f64 = 6.0;
/// Gap between stacked labels.
const LABEL_GAP: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Landmark {
    pub date: NaiveDate,
    pub labels: Vec<String>,
}

impl Landmark {
    pub fn new(date: NaiveDate, labels: &[&str]) -> Self {
        Self { date, labels: labels.iter().map(|s| s.to_string()).collect() }
    }
}

/// Project history annotations shown by default.
pub fn default_landmarks() -> Vec<Landmark> {
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap_or_default();
    vec![
        Landmark::new(d(2018, 5, 31), &["Added Chromium NeverFixTests"]),
        Landmark::new(d(2020, 4, 1), &["Missing Chromium data"]),
        Landmark::new(d(2020, 7, 31), &["Fixed Chromium data"]),
        Landmark::new(d(2020, 12, 11), &["Stopped running"]),
        Landmark::new(d(2023, 9, 18), &["Added Gecko flaky+timeout", "Fork revival"]),
    ]
}

/// A label at `offset` along the rotated axis (negative is upward on screen).
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    pub offset: f64,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LandmarkPlacement {
    pub date: NaiveDate,
    pub x: f64,
    pub labels: Vec<PlacedLabel>,
}

/// Stack labels so that consecutive texts at one landmark do not overlap.
pub fn stack_labels(labels: &[String]) -> Vec<PlacedLabel> {
    let mut offset = 0.0;
    labels
        .iter()
        .map(|text| {
            offset -= text.chars().count() as f64 * CHAR_ADVANCE;
            let placed = PlacedLabel { offset, text: text.clone() };
            offset -= LABEL_GAP;
            placed
        })
        .collect()
}

/// Landmarks dated inside the x-domain whose x falls in `[0, width)`; the rest
/// are skipped, not clamped. A single-day domain maps every date to 0, so the
/// date check is what rejects far-away landmarks there.
pub fn place_landmarks(landmarks: &[Landmark], x: &TimeScale, width: f64) -> Vec<LandmarkPlacement> {
    let mut out = Vec::new();
    for lm in landmarks {
        if lm.date < x.first || lm.date > x.last {
            debug!("landmark {} is outside [{}, {}]; skipped", lm.date, x.first, x.last);
            continue;
        }
        let px = x.to_px(lm.date);
        if !(px >= 0.0 && px < width) {
            debug!("landmark {} at x={:.1} is outside [0, {:.1}); skipped", lm.date, px, width);
            continue;
        }
        out.push(LandmarkPlacement { date: lm.date, x: px, labels: stack_labels(&lm.labels) });
    }
    out
}
