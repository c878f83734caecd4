// File: crates/trendline-core/src/series.rs
// Summary: Series model: one identifier plus its dated test counts in source order.

use chrono::NaiveDate;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    /// `None` when the CSV cell was empty or the row was short; breaks the line.
    pub value: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    pub id: String,
    pub points: Vec<SeriesPoint>,
}

impl Series {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), points: Vec::new() }
    }

    pub fn with_points(id: impl Into<String>, points: Vec<SeriesPoint>) -> Self {
        Self { id: id.into(), points }
    }

    pub fn push(&mut self, date: NaiveDate, value: Option<f64>) {
        self.points.push(SeriesPoint { date, value });
    }

    /// Number of points that carry a value and therefore end up on the line.
    pub fn plotted_len(&self) -> usize {
        self.points.iter().filter(|p| p.value.is_some()).count()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().filter_map(|p| p.value)
    }

    /// (min, max) over present values.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        self.values().fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    pub fn last_value(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.value)
    }

    /// Value of the first point dated strictly after `date`, skipping gaps.
    pub fn value_after(&self, date: NaiveDate) -> Option<f64> {
        self.points.iter().filter(|p| p.date > date).find_map(|p| p.value)
    }

    /// Split into runs of consecutive present values. Each run becomes one subpath.
    pub fn runs(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for p in &self.points {
            match p.value {
                Some(v) => current.push((p.date, v)),
                None => {
                    if !current.is_empty() {
                        runs.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}
