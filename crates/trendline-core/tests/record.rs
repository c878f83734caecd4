// File: crates/trendline-core/tests/record.rs
// Purpose: One-row-per-day upserts and CSV write-back.

use chrono::NaiveDate;
use trendline_core::{ChartError, Dataset};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

const DATA: &str = "date,chromium,firefox\n2024-01-01,10,5\n2024-01-03,12,7\n";

#[test]
fn same_day_replaces_values() {
    let mut data = Dataset::from_reader("data", DATA.as_bytes()).unwrap();
    data.upsert(d(2024, 1, 3), vec![13.0, 8.0]).unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data.rows[1].values, vec![Some(13.0), Some(8.0)]);
}

#[test]
fn new_day_is_inserted_in_order() {
    let mut data = Dataset::from_reader("data", DATA.as_bytes()).unwrap();
    data.upsert(d(2024, 1, 2), vec![11.0, 6.0]).unwrap();
    data.upsert(d(2023, 12, 31), vec![9.0, 4.0]).unwrap();
    data.upsert(d(2024, 1, 4), vec![14.0, 9.0]).unwrap();

    let dates: Vec<NaiveDate> = data.rows.iter().map(|r| r.date).collect();
    assert_eq!(dates, [d(2023, 12, 31), d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 4)]);
}

#[test]
fn value_count_must_match_header() {
    let mut data = Dataset::from_reader("data", DATA.as_bytes()).unwrap();
    let err = data.upsert(d(2024, 1, 4), vec![1.0]).unwrap_err();
    assert!(matches!(err, ChartError::ValueCount { expected: 2, got: 1 }));
    assert_eq!(data.len(), 2);
}

#[test]
fn write_csv_keeps_integral_counts_and_gaps() {
    let text = "date,chromium,firefox\n2024-01-01,10,\n";
    let mut data = Dataset::from_reader("data", text.as_bytes()).unwrap();
    data.upsert(d(2024, 1, 2), vec![11.0, 2.5]).unwrap();

    let mut out = Vec::new();
    data.write_csv(&mut out).unwrap();
    let written = String::from_utf8(out).unwrap();
    assert_eq!(written, "date,chromium,firefox\n2024-01-01,10,\n2024-01-02,11,2.5\n");

    let reloaded = Dataset::from_reader("written", written.as_bytes()).unwrap();
    assert_eq!(reloaded, data);
}

#[test]
fn save_and_load_from_disk() {
    let path = std::path::PathBuf::from("target/test_out/record.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let mut data = Dataset::from_reader("data", DATA.as_bytes()).unwrap();
    data.upsert(d(2024, 1, 5), vec![20.0, 1.0]).unwrap();
    data.save_csv(&path).unwrap();

    let loaded = Dataset::load_csv(&path).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.rows[2].date, d(2024, 1, 5));
}

#[test]
fn non_finite_counts_are_rejected_before_writing() {
    let mut data = Dataset::from_reader("data", DATA.as_bytes()).unwrap();
    for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = data.upsert(d(2024, 1, 2), vec![1.0, bad]).unwrap_err();
        assert!(matches!(err, ChartError::NonFiniteValue { ref column, .. } if column == "firefox"), "got {err:?}");
    }
    assert_eq!(data.len(), 2);

    let mut out = Vec::new();
    data.write_csv(&mut out).unwrap();
    assert!(Dataset::from_reader("written", out.as_slice()).is_ok());
}

#[test]
fn unsorted_file_still_keeps_one_row_per_day() {
    let text = "date,chromium,firefox\n2024-01-05,1,1\n2024-01-01,2,2\n2024-01-03,3,3\n2024-01-02,4,4\n";
    let mut data = Dataset::from_reader("unsorted", text.as_bytes()).unwrap();

    data.upsert(d(2024, 1, 1), vec![20.0, 20.0]).unwrap();
    data.upsert(d(2024, 1, 2), vec![40.0, 40.0]).unwrap();
    assert_eq!(data.len(), 4);
    for day in [d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3), d(2024, 1, 5)] {
        assert_eq!(data.rows.iter().filter(|r| r.date == day).count(), 1, "{day}");
    }
    assert_eq!(data.rows[1].values, vec![Some(20.0), Some(20.0)]);
    assert_eq!(data.rows[3].values, vec![Some(40.0), Some(40.0)]);

    data.upsert(d(2024, 1, 4), vec![5.0, 5.0]).unwrap();
    assert_eq!(data.len(), 5);
    assert_eq!(data.rows.iter().filter(|r| r.date == d(2024, 1, 4)).count(), 1);
}
