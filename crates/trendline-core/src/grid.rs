// File: crates/trendline-core/src/grid.rs
// Summary: Tick layout helpers: nice linear steps and calendar intervals for time axes.

use chrono::{Datelike, Duration, NaiveDate};

/// Increment for roughly `count` ticks over [start, stop], snapped to 1/2/5 x 10^k.
/// Returns a negative value `-n` when the increment is `1/n`, mirroring d3.
pub fn tick_increment(start: f64, stop: f64, count: usize) -> f64 {
    let step = (stop - start) / (count.max(1) as f64);
    if !(step > 0.0) || !step.is_finite() {
        return 0.0;
    }
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= 50f64.sqrt() {
        10.0
    } else if error >= 10f64.sqrt() {
        5.0
    } else if error >= 2f64.sqrt() {
        2.0
    } else {
        1.0
    };
    if power >= 0.0 {
        factor * 10f64.powf(power)
    } else {
        -(10f64.powf(-power) / factor)
    }
}

/// Nice tick values inside [lo, hi], ascending.
pub fn linear_ticks(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if lo == hi {
        return vec![lo];
    }
    let inc = tick_increment(lo, hi, count);
    if inc == 0.0 {
        return Vec::new();
    }
    if inc > 0.0 {
        let first = (lo / inc).ceil() as i64;
        let last = (hi / inc).floor() as i64;
        (first..=last).map(|i| i as f64 * inc).collect()
    } else {
        let inv = -inc;
        let first = (lo * inv).ceil() as i64;
        let last = (hi * inv).floor() as i64;
        (first..=last).map(|i| i as f64 / inv).collect()
    }
}

/// Step between consecutive ticks, used to pick label precision.
pub fn tick_step(lo: f64, hi: f64, count: usize) -> f64 {
    let inc = tick_increment(lo.min(hi), lo.max(hi), count);
    if inc < 0.0 { -1.0 / inc } else { inc }
}

/// Format a tick value with thousands separators and only as many decimals as `step` needs.
pub fn format_tick(value: f64, step: f64) -> String {
    let decimals = if step > 0.0 && step < 1.0 {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let s = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (s, None),
    };
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let negative = value < 0.0 && grouped.chars().any(|c| c != '0' && c != ',');
    let mut out = String::new();
    if negative {
        out.push('−');
    }
    out.push_str(&grouped);
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(&f);
    }
    out
}

/// Calendar interval between time-axis ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimeInterval {
    Days(u32),
    Week,
    Months(u32),
    Years(u32),
}

impl TimeInterval {
    /// Approximate length in days, used to pick the interval closest to the target.
    pub fn approx_days(&self) -> f64 {
        match *self {
            TimeInterval::Days(n) => n as f64,
            TimeInterval::Week => 7.0,
            TimeInterval::Months(n) => 30.0 * n as f64,
            TimeInterval::Years(n) => 365.0 * n as f64,
        }
    }

    /// Choose the interval whose length is closest to `span_days / count`.
    pub fn for_span(span_days: f64, count: usize) -> Self {
        let target = span_days / count.max(1) as f64;
        const FIXED: [TimeInterval; 6] = [
            TimeInterval::Days(1),
            TimeInterval::Days(2),
            TimeInterval::Week,
            TimeInterval::Months(1),
            TimeInterval::Months(3),
            TimeInterval::Years(1),
        ];
        if target > 365.0 {
            let years = tick_step(0.0, span_days / 365.0, count).max(1.0).round() as u32;
            return TimeInterval::Years(years.max(1));
        }
        let mut best = FIXED[0];
        for cand in FIXED {
            if (cand.approx_days() - target).abs() < (best.approx_days() - target).abs() {
                best = cand;
            }
        }
        best
    }

    /// Smallest boundary of this interval that is >= `date`.
    pub fn ceil(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            TimeInterval::Days(n) => {
                // Day steps restart at the first of each month (1, 1+n, 1+2n, ...).
                let mut d = date;
                loop {
                    if (d.day() - 1) % n == 0 {
                        return Some(d);
                    }
                    d = d.succ_opt()?;
                }
            }
            TimeInterval::Week => {
                let back = date.weekday().num_days_from_sunday() as i64;
                let sunday = date - Duration::days(back);
                Some(if sunday == date { date } else { sunday + Duration::days(7) })
            }
            TimeInterval::Months(n) => {
                let mut y = date.year();
                let mut m0 = date.month0();
                if date.day() != 1 {
                    m0 += 1;
                }
                loop {
                    if m0 >= 12 {
                        y += 1;
                        m0 -= 12;
                    }
                    if m0 % n == 0 {
                        return NaiveDate::from_ymd_opt(y, m0 + 1, 1);
                    }
                    m0 += 1;
                }
            }
            TimeInterval::Years(n) => {
                let mut y = date.year();
                if date.ordinal() != 1 {
                    y += 1;
                }
                let n = n as i32;
                while y.rem_euclid(n) != 0 {
                    y += 1;
                }
                NaiveDate::from_ymd_opt(y, 1, 1)
            }
        }
    }

    /// The boundary following `date`, which must already lie on a boundary.
    pub fn next(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            TimeInterval::Days(_) => self.ceil(date.succ_opt()?),
            TimeInterval::Week => Some(date + Duration::days(7)),
            TimeInterval::Months(n) => {
                let total = date.year() * 12 + date.month0() as i32 + n as i32;
                NaiveDate::from_ymd_opt(total.div_euclid(12), total.rem_euclid(12) as u32 + 1, 1)
            }
            TimeInterval::Years(n) => NaiveDate::from_ymd_opt(date.year() + n as i32, 1, 1),
        }
    }

    /// All boundaries within [lo, hi].
    pub fn range(&self, lo: NaiveDate, hi: NaiveDate) -> Vec<NaiveDate> {
        let mut out = Vec::new();
        let mut cur = self.ceil(lo);
        while let Some(d) = cur {
            if d > hi {
                break;
            }
            out.push(d);
            cur = self.next(d);
        }
        out
    }
}

/// Multi-scale label: the year on Jan 1, the month name on the 1st, otherwise "Mon DD".
pub fn format_date_tick(date: NaiveDate) -> String {
    if date.ordinal() == 1 {
        date.format("%Y").to_string()
    } else if date.day() == 1 {
        date.format("%B").to_string()
    } else {
        date.format("%b %d").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn increments_snap_to_one_two_five() {
        assert_eq!(tick_increment(0.0, 10.0, 10), 1.0);
        assert_eq!(tick_increment(0.0, 100.0, 6), 20.0);
        assert_eq!(tick_increment(0.0, 1.0, 10), -10.0);
        assert_eq!(tick_increment(6.0, 15.0, 6), 2.0);
    }

    #[test]
    fn linear_ticks_stay_inside_domain() {
        assert_eq!(linear_ticks(6.0, 15.0, 6), vec![6.0, 8.0, 10.0, 12.0, 14.0]);
        assert_eq!(linear_ticks(0.0, 0.5, 5), vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
        assert_eq!(linear_ticks(3.0, 3.0, 6), vec![3.0]);
    }

    #[test]
    fn tick_labels_group_thousands() {
        assert_eq!(format_tick(1500.0, 500.0), "1,500");
        assert_eq!(format_tick(250.0, 50.0), "250");
        assert_eq!(format_tick(0.2, 0.1), "0.2");
        assert_eq!(format_tick(1234567.0, 1.0), "1,234,567");
    }

    #[test]
    fn interval_choice_tracks_span() {
        assert_eq!(TimeInterval::for_span(10.0, 10), TimeInterval::Days(1));
        assert_eq!(TimeInterval::for_span(70.0, 10), TimeInterval::Week);
        assert_eq!(TimeInterval::for_span(365.0, 10), TimeInterval::Months(1));
        assert_eq!(TimeInterval::for_span(3.0 * 365.0, 10), TimeInterval::Months(3));
        assert_eq!(TimeInterval::for_span(8.0 * 365.0, 10), TimeInterval::Years(1));
    }

    #[test]
    fn month_ticks_land_on_firsts() {
        let ticks = TimeInterval::Months(3).range(d(2019, 2, 15), d(2019, 12, 31));
        assert_eq!(ticks, vec![d(2019, 4, 1), d(2019, 7, 1), d(2019, 10, 1)]);
        let years = TimeInterval::Years(2).range(d(2018, 6, 1), d(2024, 1, 1));
        assert_eq!(years, vec![d(2020, 1, 1), d(2022, 1, 1), d(2024, 1, 1)]);
    }

    #[test]
    fn date_labels_follow_granularity() {
        assert_eq!(format_date_tick(d(2020, 1, 1)), "2020");
        assert_eq!(format_date_tick(d(2020, 7, 1)), "July");
        assert_eq!(format_date_tick(d(2020, 7, 12)), "Jul 12");
    }
}
