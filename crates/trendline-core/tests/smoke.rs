// File: crates/trendline-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing an SVG (and a PNG with the "png" feature).

use chrono::NaiveDate;
use trendline_core::{render, CsvText, RenderOptions};

const DATA: &str = "date,chromium,gecko,webkit\n\
2020-03-01,120,80,60\n\
2020-04-01,118,82,61\n\
2020-05-01,,85,63\n\
2020-06-01,110,83,64\n\
2020-07-01,105,90,66\n";

#[test]
fn render_smoke_svg() {
    let opts = RenderOptions::default();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let chart = render(&CsvText::new("smoke", DATA), start, &opts).expect("render should succeed");

    let out = std::path::PathBuf::from("target/test_out/smoke.svg");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    chart.render_to_svg(&opts, &out).expect("write svg");

    let svg = std::fs::read_to_string(&out).expect("output exists");
    assert!(svg.starts_with("<svg"), "should be an svg document");
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<g class=\"group\"").count(), 3);
    // gap in chromium splits its line into two subpaths
    assert!(svg.lines().any(|l| l.contains("class=\"line\"") && l.matches('M').count() == 2));
}

#[cfg(feature = "png")]
#[test]
fn render_smoke_png() {
    let opts = RenderOptions::default();
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let chart = render(&CsvText::new("smoke", DATA), start, &opts).unwrap();

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    chart.render_to_png(&opts, &out).expect("render should succeed");
    let bytes = std::fs::read(&out).expect("output exists");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
}
