// File: crates/trendline-core/src/view.rs
// Summary: View state (the start-date boundary) and the visible data ranges it selects.

use chrono::NaiveDate;

use crate::series::Series;
use crate::types::default_start;

/// The only state that survives a redraw: the exclusive lower date bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub start: NaiveDate,
}

impl ViewState {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// Use the control's value when it has one, otherwise `fallback`.
    pub fn resolve(control: Option<NaiveDate>, fallback: NaiveDate) -> Self {
        Self { start: control.unwrap_or(fallback) }
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self { start: default_start() }
    }
}

/// Global (min, max) over every present value of every series.
pub fn visible_y_range(series: &[Series]) -> Option<(f64, f64)> {
    series
        .iter()
        .filter_map(Series::value_extent)
        .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
}
