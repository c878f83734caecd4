// File: crates/trendline-core/src/lib.rs
// Summary: Core library entry point; exports public API for loading CSV data, building and rendering charts.

pub mod axis;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod grid;
pub mod landmark;
#[cfg(feature = "png")]
pub mod raster;
pub mod scale;
pub mod scene;
pub mod series;
pub mod session;
pub mod svg;
pub mod theme;
pub mod types;
pub mod view;

pub use chart::{Chart, RenderOptions, SeriesLabel};
pub use config::ChartConfig;
pub use data::{parse_date, DataRow, Dataset};
pub use error::{ChartError, Result};
pub use landmark::{default_landmarks, Landmark, LandmarkPlacement};
pub use scale::{TimeScale, ValueScale};
pub use series::{Series, SeriesPoint};
pub use session::{
    render, ChartSession, CsvFile, CsvText, DataSource, MemorySurface, Presented, RenderOutcome,
    Surface, SvgFileSurface,
};
pub use theme::Theme;
pub use view::ViewState;
