// File: crates/trendline-core/src/chart.rs
// Summary: Chart struct: boundary filtering, scales, colours, label/landmark layout and scene building.

use std::path::Path;

use chrono::NaiveDate;
use log::debug;

use crate::axis::{Axis, AxisSide};
use crate::color::OrdinalColors;
use crate::config::ChartConfig;
use crate::data::Dataset;
use crate::error::{ChartError, Result};
use crate::landmark::{default_landmarks, place_landmarks, Landmark, LandmarkPlacement};
use crate::scale::{TimeScale, ValueScale};
use crate::scene::{Anchor, Node, Scene, Stroke, Text};
use crate::series::Series;
use crate::theme::{Color, Theme};
use crate::types::{Insets, PlotArea, HEIGHT, WIDTH};
use crate::view::visible_y_range;

/// Tick mark length in pixels.
const TICK_SIZE: f64 = 6.0;
/// Gap between tick mark and tick label.
const TICK_PADDING: f64 = 3.0;
/// Series labels sit this far above their line.
const LABEL_LIFT: f64 = 8.0;

#[derive(Clone, Debug)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub insets: Insets,
    pub theme: Theme,
    pub y_label: String,
    pub y_ticks: usize,
    pub legend_slots: usize,
    pub landmarks: Vec<Landmark>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: WIDTH,
            height: HEIGHT,
            insets: Insets::default(),
            theme: Theme::default(),
            y_label: "Tests".to_string(),
            y_ticks: 6,
            legend_slots: 12,
            landmarks: default_landmarks(),
        }
    }
}

impl RenderOptions {
    pub fn from_config(cfg: &ChartConfig) -> Result<Self> {
        Ok(Self {
            width: cfg.width,
            height: cfg.height,
            insets: cfg.margin,
            theme: cfg.resolve_theme()?,
            y_label: cfg.y_label.clone(),
            y_ticks: cfg.y_ticks,
            legend_slots: cfg.legend_slots.max(1),
            landmarks: cfg.landmarks.clone(),
        })
    }

    pub fn plot_area(&self) -> PlotArea {
        PlotArea::new(self.width, self.height, &self.insets)
    }
}

/// Where a series name is written, in plot coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesLabel {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub color: Color,
}

/// A fully laid-out chart for one boundary. Pure function of (data, start, options).
#[derive(Clone, Debug)]
pub struct Chart {
    pub start: NaiveDate,
    pub series: Vec<Series>,
    pub x: TimeScale,
    pub y: ValueScale,
    pub plot: PlotArea,
    pub colors: OrdinalColors,
    pub labels: Vec<SeriesLabel>,
    pub landmarks: Vec<LandmarkPlacement>,
    rows: usize,
}

impl Chart {
    /// Filter `data` to rows after `start` and lay everything out.
    pub fn build(data: &Dataset, start: NaiveDate, opts: &RenderOptions) -> Result<Self> {
        let visible = data.after(start);
        let (first, last) = visible.date_extent().ok_or(ChartError::EmptyRange { start })?;
        let series = visible.series();
        let plot = opts.plot_area();

        let x = TimeScale::new(first, last, 0.0, plot.width);
        let (vmin, vmax) = visible_y_range(&series).unwrap_or((0.0, 1.0));
        let y = ValueScale::new_linear(0.0, plot.height, vmin, vmax);
        debug!("x domain [{first}, {last}], y domain [{vmin}, {vmax}]");
        debug!("x.invert(100) = {:?}", x.from_px(100.0));

        let colors = OrdinalColors::new(series.iter().map(|s| s.id.as_str()), &opts.theme.series);

        let slot = plot.width / opts.legend_slots.max(1) as f64;
        let labels = series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let px = slot * (i + 1) as f64;
                let value = x
                    .from_px(px)
                    .and_then(|d| s.value_after(d))
                    .or_else(|| s.last_value())
                    .unwrap_or(vmin);
                SeriesLabel { id: s.id.clone(), x: px, y: y.to_px(value) - LABEL_LIFT, color: colors.color_for(&s.id) }
            })
            .collect();

        let landmarks = place_landmarks(&opts.landmarks, &x, plot.width);

        Ok(Self { start, series, x, y, plot, colors, labels, landmarks, rows: visible.len() })
    }

    /// Number of rows that survived the boundary filter.
    pub fn plotted_rows(&self) -> usize { self.rows }

    pub fn x_domain(&self) -> (NaiveDate, NaiveDate) { (self.x.first, self.x.last) }

    pub fn y_domain(&self) -> (f64, f64) { (self.y.vmin, self.y.vmax) }

    /// Compile the chart into a backend-neutral scene.
    pub fn scene(&self, opts: &RenderOptions) -> Scene {
        let theme = &opts.theme;
        let mut body = Vec::new();

        body.push(self.axis_node(&Axis::bottom(&self.x), theme));
        body.push(self.axis_node(&Axis::left(&self.y, opts.y_ticks, opts.y_label.clone()), theme));

        let dashed = Stroke { color: theme.landmark_stroke, width: 1.0, dash: Some(4.0) };
        for lm in &self.landmarks {
            let mut children = vec![Node::Line { from: (0.0, 0.0), to: (0.0, self.plot.height), stroke: dashed }];
            children.extend(lm.labels.iter().map(|l| {
                Node::Text(Text {
                    x: l.offset,
                    y: 5.0,
                    dy: 0.71,
                    rotate: Some(-90.0),
                    anchor: Anchor::Start,
                    size: theme.font_size,
                    fill: theme.landmark_label,
                    content: l.text.clone(),
                })
            }));
            body.push(Node::group(Some("landmark"), (lm.x, 0.0), children));
        }

        for (s, label) in self.series.iter().zip(&self.labels) {
            let subpaths: Vec<Vec<(f64, f64)>> = s
                .runs()
                .into_iter()
                .map(|run| run.into_iter().map(|(d, v)| (self.x.to_px(d), self.y.to_px(v))).collect())
                .collect();
            let line = Node::Polyline {
                class: Some("line"),
                subpaths,
                stroke: Stroke { color: label.color, width: theme.line_width, dash: None },
            };
            let text = Node::Text(Text {
                x: label.x,
                y: label.y,
                dy: 0.0,
                rotate: None,
                anchor: Anchor::Start,
                size: theme.font_size,
                fill: label.color,
                content: label.id.clone(),
            });
            body.push(Node::group(Some("group"), (0.0, 0.0), vec![line, text]));
        }

        Scene {
            width: opts.width,
            height: opts.height,
            background: theme.background,
            font_family: theme.font_family,
            root: vec![Node::group(None, (opts.insets.left as f64, opts.insets.top as f64), body)],
        }
    }

    fn axis_node(&self, axis: &Axis, theme: &Theme) -> Node {
        let stroke = Stroke { color: theme.axis_line, width: 1.0, dash: None };
        let tick_stroke = Stroke { color: theme.tick, ..stroke };
        let text = |x: f64, y: f64, dy: f64, anchor: Anchor, content: String| Text {
            x,
            y,
            dy,
            rotate: None,
            anchor,
            size: theme.font_size,
            fill: theme.axis_label,
            content,
        };

        let mut children = Vec::new();
        match axis.side {
            AxisSide::Bottom => {
                children.push(Node::Line { from: (0.0, 0.0), to: (self.plot.width, 0.0), stroke });
                for t in &axis.ticks {
                    children.push(Node::group(None, (t.px, 0.0), vec![
                        Node::Line { from: (0.0, 0.0), to: (0.0, TICK_SIZE), stroke: tick_stroke },
                        Node::Text(text(0.0, TICK_SIZE + TICK_PADDING, 0.71, Anchor::Middle, t.label.clone())),
                    ]));
                }
                Node::group(Some(axis.side.class()), (0.0, self.plot.height), children)
            }
            AxisSide::Left => {
                children.push(Node::Line { from: (0.0, 0.0), to: (0.0, self.plot.height), stroke });
                for t in &axis.ticks {
                    children.push(Node::group(None, (0.0, t.px), vec![
                        Node::Line { from: (0.0, 0.0), to: (-TICK_SIZE, 0.0), stroke: tick_stroke },
                        Node::Text(text(-(TICK_SIZE + TICK_PADDING), 0.0, 0.32, Anchor::End, t.label.clone())),
                    ]));
                }
                if let Some(label) = &axis.label {
                    let mut title = text(0.0, 6.0, 0.71, Anchor::End, label.clone());
                    title.rotate = Some(-90.0);
                    children.push(Node::Text(title));
                }
                Node::group(Some(axis.side.class()), (0.0, 0.0), children)
            }
        }
    }

    /// Render to an SVG document string.
    pub fn render_svg(&self, opts: &RenderOptions) -> String {
        crate::svg::to_svg(&self.scene(opts))
    }

    /// Render the chart to an SVG file at `output_svg_path`.
    pub fn render_to_svg(&self, opts: &RenderOptions, output_svg_path: impl AsRef<Path>) -> Result<()> {
        let path = output_svg_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, self.render_svg(opts))?;
        Ok(())
    }

    /// Render the chart to a PNG at `output_png_path` using a CPU raster surface.
    #[cfg(feature = "png")]
    pub fn render_to_png(&self, opts: &RenderOptions, output_png_path: impl AsRef<Path>) -> Result<()> {
        let bytes = crate::raster::to_png_bytes(&self.scene(opts))?;
        let path = output_png_path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
