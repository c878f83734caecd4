// File: crates/trendline-core/src/axis.rs
// Summary: Axis model with label, orientation and resolved ticks.

use crate::scale::{Tick, TimeScale, ValueScale};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
}

impl AxisSide {
    pub fn class(&self) -> &'static str {
        match self {
            AxisSide::Bottom => "axis axis--x",
            AxisSide::Left => "axis axis--y",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Axis {
    pub label: Option<String>,
    pub side: AxisSide,
    pub ticks: Vec<Tick>,
}

impl Axis {
    pub fn bottom(x: &TimeScale) -> Self {
        Self { label: None, side: AxisSide::Bottom, ticks: x.ticks(10) }
    }

    pub fn left(y: &ValueScale, ticks: usize, label: impl Into<String>) -> Self {
        Self { label: Some(label.into()), side: AxisSide::Left, ticks: y.ticks(ticks) }
    }
}
