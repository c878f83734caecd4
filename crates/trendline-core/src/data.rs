// File: crates/trendline-core/src/data.rs
// Summary: CSV dataset loading, boundary filtering, series extraction and one-row-per-day upserts.

use std::io::{Read, Write};
use std::path::Path;

use chrono::NaiveDate;
use log::debug;

use crate::error::{ChartError, Result};
use crate::series::Series;

pub const DATE_COLUMN: &str = "date";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq)]
pub struct DataRow {
    pub date: NaiveDate,
    /// One slot per series column, in header order.
    pub values: Vec<Option<f64>>,
}

/// Header series names plus rows in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub columns: Vec<String>,
    pub rows: Vec<DataRow>,
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Load `path`. Any open/read/tokenise failure is a `ResourceLoad`.
    pub fn load_csv(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let resource = path.display().to_string();
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|source| ChartError::ResourceLoad { resource: resource.clone(), source })?;
        Self::from_csv_reader(&resource, rdr)
    }

    /// Parse CSV text from any reader; `resource` names it in errors.
    pub fn from_reader<R: Read>(resource: &str, reader: R) -> Result<Self> {
        let rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        Self::from_csv_reader(resource, rdr)
    }

    fn from_csv_reader<R: Read>(resource: &str, mut rdr: csv::Reader<R>) -> Result<Self> {
        let load_err = |source| ChartError::ResourceLoad { resource: resource.to_string(), source };

        let headers = rdr.headers().map_err(load_err)?.clone();
        match headers.get(0) {
            Some(h) if h.eq_ignore_ascii_case(DATE_COLUMN) => {}
            _ => return Err(ChartError::MissingDateColumn { resource: resource.to_string() }),
        }
        let columns: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

        let mut rows = Vec::new();
        for (i, rec) in rdr.records().enumerate() {
            let rec = rec.map_err(load_err)?;
            let row = i + 1;
            let raw_date = rec.get(0).unwrap_or("");
            let date = parse_date(raw_date)
                .ok_or_else(|| ChartError::InvalidDate { row, value: raw_date.to_string() })?;

            let mut values = Vec::with_capacity(columns.len());
            for (ci, column) in columns.iter().enumerate() {
                let cell = rec.get(ci + 1).unwrap_or("");
                if cell.is_empty() {
                    values.push(None);
                    continue;
                }
                let v = cell.parse::<f64>().ok().filter(|v| v.is_finite()).ok_or_else(|| {
                    ChartError::InvalidCell { row, column: column.clone(), value: cell.to_string() }
                })?;
                values.push(Some(v));
            }
            rows.push(DataRow { date, values });
        }
        debug!("loaded {} rows x {} series from {}", rows.len(), columns.len(), resource);
        Ok(Self { columns, rows })
    }

    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Rows dated strictly after `start`. A row dated exactly `start` is dropped.
    pub fn after(&self, start: NaiveDate) -> Dataset {
        let rows: Vec<DataRow> = self.rows.iter().filter(|r| r.date > start).cloned().collect();
        debug!("boundary {}: kept {} of {} rows", start, rows.len(), self.rows.len());
        Dataset { columns: self.columns.clone(), rows }
    }

    /// (earliest, latest) date over the rows.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let lo = self.rows.iter().map(|r| r.date).min()?;
        let hi = self.rows.iter().map(|r| r.date).max()?;
        Some((lo, hi))
    }

    /// One series per non-date column, points in row order.
    pub fn series(&self) -> Vec<Series> {
        self.columns
            .iter()
            .enumerate()
            .map(|(ci, id)| {
                let mut s = Series::new(id.clone());
                for r in &self.rows {
                    s.push(r.date, r.values.get(ci).copied().flatten());
                }
                s
            })
            .collect()
    }

    /// Insert or replace the row for `date`. Rows need not be sorted: an
    /// existing row for the day is replaced in place, a new day goes before the
    /// first later row.
    pub fn upsert(&mut self, date: NaiveDate, values: Vec<f64>) -> Result<()> {
        if values.len() != self.columns.len() {
            return Err(ChartError::ValueCount { expected: self.columns.len(), got: values.len() });
        }
        if let Some((column, &value)) = self.columns.iter().zip(&values).find(|(_, v)| !v.is_finite()) {
            return Err(ChartError::NonFiniteValue { column: column.clone(), value });
        }
        let row = DataRow { date, values: values.into_iter().map(Some).collect() };
        match self.rows.iter().position(|r| r.date == date) {
            Some(ix) => self.rows[ix] = row,
            None => {
                let ix = self.rows.iter().position(|r| r.date > date).unwrap_or(self.rows.len());
                self.rows.insert(ix, row);
            }
        }
        Ok(())
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        let io_err = |e: csv::Error| ChartError::Io(e.into());

        let mut header = vec![DATE_COLUMN.to_string()];
        header.extend(self.columns.iter().cloned());
        wtr.write_record(&header).map_err(io_err)?;

        for r in &self.rows {
            let mut rec = vec![r.date.format(DATE_FORMAT).to_string()];
            rec.extend(r.values.iter().map(|v| v.map(format_count).unwrap_or_default()));
            wtr.write_record(&rec).map_err(io_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    pub fn save_csv(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        self.write_csv(file)
    }
}

/// Counts are integral in practice; keep them free of a trailing ".0".
fn format_count(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}
