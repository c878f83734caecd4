// File: crates/trendline-core/src/scale.rs
// Summary: Time (X) and Value (Y) scale transforms between data space and plot pixels.

use chrono::{Datelike, NaiveDate};

use crate::grid::{format_date_tick, format_tick, linear_ticks, tick_step, TimeInterval};

/// Day number used as the continuous X coordinate.
pub type Logical = f64;
/// Value Y coordinate (test count).
pub type Value = f64;

#[inline]
pub fn day_number(date: NaiveDate) -> Logical {
    date.num_days_from_ce() as f64
}

/// A tick position in pixels plus its formatted label.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    pub px: f64,
    pub label: String,
}

/// Horizontal time scale mapping [first, last] dates onto [left_px, right_px].
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub first: NaiveDate,
    pub last: NaiveDate,
    pub left_px: f64,
    pub right_px: f64,
}

impl TimeScale {
    pub fn new(first: NaiveDate, last: NaiveDate, left_px: f64, right_px: f64) -> Self {
        Self { first, last, left_px, right_px }
    }

    fn span(&self) -> f64 {
        day_number(self.last) - day_number(self.first)
    }

    #[inline]
    pub fn to_px(&self, date: NaiveDate) -> f64 {
        let span = self.span();
        if span.abs() < 1e-9 {
            return self.left_px;
        }
        self.left_px + (day_number(date) - day_number(self.first)) / span * (self.right_px - self.left_px)
    }

    /// Calendar day containing the instant under `px`.
    pub fn from_px(&self, px: f64) -> Option<NaiveDate> {
        let width = self.right_px - self.left_px;
        let day = if width.abs() < 1e-9 {
            day_number(self.first)
        } else {
            day_number(self.first) + (px - self.left_px) / width * self.span()
        };
        if !day.is_finite() {
            return None;
        }
        NaiveDate::from_num_days_from_ce_opt(day.floor() as i32)
    }

    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let interval = TimeInterval::for_span(self.span().max(1.0), count);
        interval
            .range(self.first, self.last)
            .into_iter()
            .map(|d| Tick { px: self.to_px(d), label: format_date_tick(d) })
            .collect()
    }
}

/// Vertical value scale mapping [vmin, vmax] onto [bottom_px, top_px].
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f64,
    pub bottom_px: f64,
    pub vmin: Value,
    pub vmax: Value,
}

impl ValueScale {
    pub fn new_linear(top_px: f64, bottom_px: f64, vmin: Value, vmax: Value) -> Self {
        Self { top_px, bottom_px, vmin, vmax }
    }

    #[inline]
    pub fn to_px(&self, y: Value) -> f64 {
        let span = self.vmax - self.vmin;
        if span.abs() < 1e-12 {
            return self.bottom_px;
        }
        self.bottom_px - (y - self.vmin) / span * (self.bottom_px - self.top_px)
    }

    #[inline]
    pub fn from_px(&self, py: f64) -> Value {
        let h = self.bottom_px - self.top_px;
        if h.abs() < 1e-12 {
            return self.vmin;
        }
        self.vmin + (self.bottom_px - py) / h * (self.vmax - self.vmin)
    }

    pub fn ticks(&self, count: usize) -> Vec<Tick> {
        let step = tick_step(self.vmin, self.vmax, count);
        linear_ticks(self.vmin, self.vmax, count)
            .into_iter()
            .map(|v| Tick { px: self.to_px(v), label: format_tick(v, step) })
            .collect()
    }
}
