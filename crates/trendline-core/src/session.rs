// File: crates/trendline-core/src/session.rs
// Summary: Data sources, drawing surfaces and the redraw session that owns the start-date control.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use log::{info, warn};

use crate::chart::{Chart, RenderOptions};
use crate::data::Dataset;
use crate::error::Result;
use crate::view::ViewState;

/// Where the rows come from. Loaded afresh on every render.
pub trait DataSource: Send + Sync {
    fn describe(&self) -> String;
    fn load(&self) -> Result<Dataset>;
}

#[derive(Clone, Debug)]
pub struct CsvFile {
    path: PathBuf,
}

impl CsvFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl DataSource for CsvFile {
    fn describe(&self) -> String { self.path.display().to_string() }
    fn load(&self) -> Result<Dataset> { Dataset::load_csv(&self.path) }
}

/// CSV held in memory, mostly for tests and piping.
#[derive(Clone, Debug)]
pub struct CsvText {
    name: String,
    text: String,
}

impl CsvText {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }
}

impl DataSource for CsvText {
    fn describe(&self) -> String { self.name.clone() }
    fn load(&self) -> Result<Dataset> { Dataset::from_reader(&self.name, self.text.as_bytes()) }
}

/// Load `source` and lay out the chart for `start`. No state is read or written.
pub fn render(source: &dyn DataSource, start: NaiveDate, opts: &RenderOptions) -> Result<Chart> {
    let data = source.load()?;
    Chart::build(&data, start, opts)
}

/// Drawing target owned by a session.
pub trait Surface: Send + Sync {
    fn clear(&self) -> Result<()>;
    fn present(&self, chart: &Chart, opts: &RenderOptions) -> Result<()>;
}

/// What a surface currently shows.
#[derive(Clone, Debug, PartialEq)]
pub struct Presented {
    pub start: NaiveDate,
    pub svg: String,
}

#[derive(Debug, Default)]
pub struct MemorySurface {
    current: Mutex<Option<Presented>>,
}

impl MemorySurface {
    pub fn new() -> Self { Self::default() }

    pub fn current(&self) -> Option<Presented> {
        lock(&self.current).clone()
    }
}

impl Surface for MemorySurface {
    fn clear(&self) -> Result<()> {
        *lock(&self.current) = None;
        Ok(())
    }

    fn present(&self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        *lock(&self.current) = Some(Presented { start: chart.start, svg: chart.render_svg(opts) });
        Ok(())
    }
}

/// Writes the chart to an SVG file (and optionally a PNG) on every present.
#[derive(Clone, Debug)]
pub struct SvgFileSurface {
    path: PathBuf,
    png: Option<PathBuf>,
}

impl SvgFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), png: None }
    }

    /// Also rasterise to `path`. Ignored unless built with the "png" feature.
    pub fn with_png(mut self, path: Option<PathBuf>) -> Self {
        self.png = path;
        self
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl Surface for SvgFileSurface {
    fn clear(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, "<svg xmlns=\"http://www.w3.org/2000/svg\"/>\n")?;
        Ok(())
    }

    fn present(&self, chart: &Chart, opts: &RenderOptions) -> Result<()> {
        chart.render_to_svg(opts, &self.path)?;
        if let Some(png) = &self.png {
            write_png(chart, opts, png)?;
        }
        Ok(())
    }
}

#[cfg(feature = "png")]
fn write_png(chart: &Chart, opts: &RenderOptions, path: &Path) -> Result<()> {
    chart.render_to_png(opts, path)
}

#[cfg(not(feature = "png"))]
fn write_png(_chart: &Chart, _opts: &RenderOptions, path: &Path) -> Result<()> {
    warn!("built without the \"png\" feature; not writing {}", path.display());
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// This request's chart is on the surface.
    Presented { generation: u64 },
    /// A newer request started before this one finished; its result was dropped.
    Superseded { generation: u64, latest: u64 },
}

/// Owns the date control, the surface and the request counter.
///
/// Every request bumps the generation and clears the surface. A finished
/// render is presented only if no newer request has started in the meantime,
/// so a slow, stale load can never draw over a newer chart.
pub struct ChartSession<S, F> {
    source: S,
    surface: F,
    opts: RenderOptions,
    fallback: NaiveDate,
    control: Mutex<Option<NaiveDate>>,
    generation: AtomicU64,
    present: Mutex<()>,
}

impl<S: DataSource, F: Surface> ChartSession<S, F> {
    pub fn new(source: S, surface: F, opts: RenderOptions, fallback: NaiveDate) -> Self {
        Self {
            source,
            surface,
            opts,
            fallback,
            control: Mutex::new(None),
            generation: AtomicU64::new(0),
            present: Mutex::new(()),
        }
    }

    /// Seed the control before the first load, like a pre-filled date input.
    pub fn with_control(self, value: Option<NaiveDate>) -> Self {
        *lock(&self.control) = value;
        self
    }

    pub fn control_value(&self) -> Option<NaiveDate> {
        *lock(&self.control)
    }

    pub fn surface(&self) -> &F { &self.surface }

    pub fn options(&self) -> &RenderOptions { &self.opts }

    /// Render once with the control's value or the fallback, then write the
    /// resolved boundary back into the control.
    pub fn initial_load(&self) -> Result<(NaiveDate, RenderOutcome)> {
        let (view, generation) = {
            let mut control = lock(&self.control);
            let view = ViewState::resolve(*control, self.fallback);
            *control = Some(view.start);
            (view, self.generation.fetch_add(1, Ordering::SeqCst) + 1)
        };
        let outcome = self.render_with(view, generation)?;
        Ok((view.start, outcome))
    }

    /// The user edited the control: store the value and redraw immediately.
    pub fn on_start_date_change(&self, start: NaiveDate) -> Result<RenderOutcome> {
        let generation = {
            let mut control = lock(&self.control);
            *control = Some(start);
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };
        self.render_with(ViewState::new(start), generation)
    }

    /// The control lock orders value writes and generations together, so the
    /// newest generation always renders the value the control holds.
    fn render_with(&self, view: ViewState, generation: u64) -> Result<RenderOutcome> {
        {
            let _guard = lock(&self.present);
            if self.generation.load(Ordering::SeqCst) == generation {
                self.surface.clear()?;
            }
        }

        let chart = render(&self.source, view.start, &self.opts)?;

        let _guard = lock(&self.present);
        let latest = self.generation.load(Ordering::SeqCst);
        if latest != generation {
            warn!(
                "dropping render #{generation} for {} (start {}); #{latest} is newer",
                self.source.describe(),
                view.start
            );
            return Ok(RenderOutcome::Superseded { generation, latest });
        }
        self.surface.present(&chart, &self.opts)?;
        info!(
            "render #{generation}: {} rows after {} from {}",
            chart.plotted_rows(),
            view.start,
            self.source.describe()
        );
        Ok(RenderOutcome::Presented { generation })
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
