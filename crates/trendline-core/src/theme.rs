// File: crates/trendline-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors and the series palette.

use palette::Srgba;

pub type Color = Srgba<u8>;

/// d3's category10 qualitative scheme.
pub const CATEGORY10: [(u8, u8, u8); 10] = [
    (0x1f, 0x77, 0xb4),
    (0xff, 0x7f, 0x0e),
    (0x2c, 0xa0, 0x2c),
    (0xd6, 0x27, 0x28),
    (0x94, 0x67, 0xbd),
    (0x8c, 0x56, 0x4b),
    (0xe3, 0x77, 0xc2),
    (0x7f, 0x7f, 0x7f),
    (0xbc, 0xbd, 0x22),
    (0x17, 0xbe, 0xcf),
];

pub fn category10() -> Vec<Color> {
    CATEGORY10.iter().map(|&(r, g, b)| Srgba::new(r, g, b, 255)).collect()
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub axis_line: Color,
    pub axis_label: Color,
    pub tick: Color,
    pub landmark_stroke: Color,
    pub landmark_label: Color,
    pub series: Vec<Color>,
    pub font_family: &'static str,
    pub font_size: f32,
    pub line_width: f32,
}

impl Theme {
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Srgba::new(255, 255, 255, 255),
            axis_line: Srgba::new(0, 0, 0, 255),
            axis_label: Srgba::new(0, 0, 0, 255),
            tick: Srgba::new(0, 0, 0, 255),
            landmark_stroke: Srgba::new(0, 0, 0, 102),
            landmark_label: Srgba::new(0, 0, 0, 255),
            series: category10(),
            font_family: "sans-serif",
            font_size: 10.0,
            line_width: 1.5,
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Srgba::new(18, 18, 20, 255),
            axis_line: Srgba::new(180, 180, 190, 255),
            axis_label: Srgba::new(235, 235, 245, 255),
            tick: Srgba::new(150, 150, 160, 255),
            landmark_stroke: Srgba::new(255, 255, 255, 102),
            landmark_label: Srgba::new(235, 235, 245, 255),
            series: category10(),
            font_family: "sans-serif",
            font_size: 10.0,
            line_width: 1.5,
        }
    }

    pub fn with_series_palette(mut self, palette: Vec<Color>) -> Self {
        if !palette.is_empty() {
            self.series = palette;
        }
        self
    }
}

impl Default for Theme {
    fn default() -> Self { Theme::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`.
pub fn find(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name))
}
