// File: crates/trendline-cli/src/main.rs
// Summary: `trendline` CLI: render the test-count chart, redraw on start-date edits, record daily counts.

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::{error, info, warn};
use trendline_core::{
    parse_date, ChartConfig, ChartSession, CsvFile, Dataset, RenderOptions, RenderOutcome,
    SvgFileSurface,
};

#[derive(Parser, Debug)]
#[command(name = "trendline", about = "Render per-series test counts from a CSV as an annotated SVG line chart")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render once and print the boundary that was used.
    Render(ChartArgs),
    /// Render, then redraw for every start date read from stdin (one per line).
    Watch(ChartArgs),
    /// Insert or replace one day's counts in the CSV.
    Record {
        /// CSV file to update.
        #[arg(long, default_value = "data.csv")]
        data: PathBuf,

        /// Day to record (YYYY-MM-DD).
        #[arg(long, value_parser = parse_date_arg)]
        date: NaiveDate,

        /// One count per series column, in header order.
        #[arg(required = true)]
        values: Vec<f64>,
    },
}

#[derive(Args, Debug, Clone)]
struct ChartArgs {
    /// CSV with a leading `date` column (supports .csv/.cvs swap).
    #[arg(long, default_value = "data.csv")]
    data: PathBuf,

    /// Exclusive lower date bound (YYYY-MM-DD). Defaults to the configured start.
    #[arg(long, value_parser = parse_date_arg)]
    start: Option<NaiveDate>,

    /// TOML chart configuration.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output SVG path.
    #[arg(long, default_value = "chart.svg")]
    out: PathBuf,

    /// Also write a PNG (requires the "png" feature).
    #[arg(long)]
    png: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long)]
    width: Option<u32>,

    /// Surface height in pixels.
    #[arg(long)]
    height: Option<u32>,

    /// Theme preset: light or dark.
    #[arg(long)]
    theme: Option<String>,
}

fn parse_date_arg(s: &str) -> Result<NaiveDate, String> {
    parse_date(s).ok_or_else(|| format!("'{s}' is not a YYYY-MM-DD date"))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => {
            let session = build_session(&args)?;
            let (start, _) = session.initial_load().context("initial render failed")?;
            println!("{start}");
        }
        Commands::Watch(args) => watch(&args)?,
        Commands::Record { data, date, values } => record(&data, date, values)?,
    }
    Ok(())
}

fn load_config(args: &ChartArgs) -> Result<ChartConfig> {
    let mut cfg = match &args.config {
        Some(p) => ChartConfig::from_file(p).with_context(|| format!("reading config '{}'", p.display()))?,
        None => ChartConfig::default(),
    };
    if let Some(w) = args.width {
        cfg.width = w;
    }
    if let Some(h) = args.height {
        cfg.height = h;
    }
    if let Some(t) = &args.theme {
        cfg.theme = t.clone();
    }
    cfg.validate()?;
    Ok(cfg)
}

fn build_session(args: &ChartArgs) -> Result<ChartSession<CsvFile, SvgFileSurface>> {
    let cfg = load_config(args)?;
    let opts = RenderOptions::from_config(&cfg)?;

    let (path, used_alt) = resolve_path(&args.data)?;
    info!("Using input file: {}", path.display());
    if used_alt {
        info!("  (extension swapped between .csv/.cvs)");
    }

    let surface = SvgFileSurface::new(&args.out).with_png(args.png.clone());
    Ok(ChartSession::new(CsvFile::new(path), surface, opts, cfg.default_start).with_control(args.start))
}

/// Initial render, then one redraw per stdin line. Each redraw runs on its own
/// thread so a slow load is superseded by a newer edit rather than queued.
fn watch(args: &ChartArgs) -> Result<()> {
    let session = Arc::new(build_session(args)?);
    match session.initial_load() {
        Ok((start, _)) => println!("{start}"),
        Err(e) => error!("initial render failed: {e}"),
    }

    let mut workers = Vec::new();
    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        let Some(start) = parse_date(text) else {
            warn!("ignoring '{text}': not a YYYY-MM-DD date");
            continue;
        };
        let session = Arc::clone(&session);
        workers.push(std::thread::spawn(move || match session.on_start_date_change(start) {
            Ok(RenderOutcome::Presented { .. }) => println!("{start}"),
            Ok(RenderOutcome::Superseded { .. }) => {}
            Err(e) => error!("render for {start} failed: {e}"),
        }));
        workers.retain(|w| !w.is_finished());
    }
    for w in workers {
        let _ = w.join();
    }
    Ok(())
}

fn record(data: &Path, date: NaiveDate, values: Vec<f64>) -> Result<()> {
    let mut dataset = Dataset::load_csv(data).with_context(|| format!("loading '{}'", data.display()))?;
    let replaced = dataset.rows.iter().any(|r| r.date == date);
    dataset.upsert(date, values)?;
    dataset.save_csv(data).with_context(|| format!("writing '{}'", data.display()))?;
    info!("{} {} in {}", if replaced { "replaced" } else { "added" }, date, data.display());
    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(p: &Path) -> Result<(PathBuf, bool)> {
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let mut alt = p.to_path_buf();
    let ext = p.extension()?.to_string_lossy().to_lowercase();
    match ext.as_str() {
        "cvs" => {
            alt.set_extension("csv");
            Some(alt)
        }
        "csv" => {
            alt.set_extension("cvs");
            Some(alt)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_args_parse_dates() {
        let cli = Cli::try_parse_from(["trendline", "render", "--data", "x.csv", "--start", "2020-01-31"]).unwrap();
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.start, NaiveDate::from_ymd_opt(2020, 1, 31));
                assert_eq!(args.out, PathBuf::from("chart.svg"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn bad_start_is_rejected() {
        assert!(Cli::try_parse_from(["trendline", "render", "--start", "31/01/2020"]).is_err());
    }

    #[test]
    fn record_requires_values() {
        assert!(Cli::try_parse_from(["trendline", "record", "--date", "2024-01-01"]).is_err());
        let cli = Cli::try_parse_from(["trendline", "record", "--date", "2024-01-01", "1", "2", "3"]).unwrap();
        match cli.command {
            Commands::Record { values, .. } => assert_eq!(values, vec![1.0, 2.0, 3.0]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn extension_swap() {
        assert_eq!(swap_ext(Path::new("data.cvs")), Some(PathBuf::from("data.csv")));
        assert_eq!(swap_ext(Path::new("data.csv")), Some(PathBuf::from("data.cvs")));
        assert_eq!(swap_ext(Path::new("data.txt")), None);
    }
}
