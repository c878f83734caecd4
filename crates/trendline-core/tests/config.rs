// File: crates/trendline-core/tests/config.rs
// Purpose: TOML configuration parsing, defaults and validation.

use chrono::NaiveDate;
use trendline_core::{ChartConfig, ChartError, Landmark, RenderOptions};

#[test]
fn empty_file_gives_stock_chart() {
    let cfg = ChartConfig::from_toml("").unwrap();
    assert_eq!(cfg, ChartConfig::default());
    assert_eq!((cfg.width, cfg.height), (1200, 500));
    assert_eq!(cfg.default_start, NaiveDate::from_ymd_opt(2018, 6, 1).unwrap());
    assert_eq!(cfg.y_label, "Tests");
    assert_eq!(cfg.landmarks.len(), 5);

    let opts = RenderOptions::from_config(&cfg).unwrap();
    let plot = opts.plot_area();
    assert_eq!((plot.width, plot.height), (1070.0, 450.0));
}

#[test]
fn keys_override_defaults() {
    let cfg = ChartConfig::from_toml(
        r##"
        width = 800
        height = 400
        theme = "dark"
        default_start = "2020-01-01"
        y_label = "Failing tests"
        legend_slots = 4
        palette = ["#ff0000", "#00ff00"]

        [margin]
        left = 60

        [[landmarks]]
        date = "2020-06-15"
        labels = ["Mid-year", "Second line"]
        "##,
    )
    .unwrap();

    assert_eq!(cfg.width, 800);
    assert_eq!(cfg.margin.left, 60);
    assert_eq!(cfg.margin.right, 80);
    assert_eq!(cfg.default_start, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
    assert_eq!(
        cfg.landmarks,
        vec![Landmark::new(NaiveDate::from_ymd_opt(2020, 6, 15).unwrap(), &["Mid-year", "Second line"])]
    );

    let theme = cfg.resolve_theme().unwrap();
    assert_eq!(theme.name, "dark");
    assert_eq!(theme.series.len(), 2);
    assert_eq!((theme.series[0].red, theme.series[0].green), (255, 0));
}

#[test]
fn unknown_theme_is_rejected() {
    let err = ChartConfig::from_toml(r#"theme = "neon""#).unwrap_err();
    assert!(matches!(err, ChartError::Config(ref m) if m.contains("neon")));
}

#[test]
fn bad_palette_colour_is_rejected() {
    let err = ChartConfig::from_toml(r#"palette = ["not-a-colour"]"#).unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn unknown_keys_are_rejected() {
    assert!(matches!(ChartConfig::from_toml("colour = 3").unwrap_err(), ChartError::Config(_)));
}

#[test]
fn margins_must_leave_room() {
    let err = ChartConfig::from_toml("width = 100\n[margin]\nleft = 50\nright = 80\n").unwrap_err();
    assert!(matches!(err, ChartError::Config(_)));
}

#[test]
fn config_file_round_trip_through_disk() {
    let path = std::path::PathBuf::from("target/test_out/chart.toml");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "y_ticks = 4\n").unwrap();
    let cfg = ChartConfig::from_file(&path).unwrap();
    assert_eq!(cfg.y_ticks, 4);
}
