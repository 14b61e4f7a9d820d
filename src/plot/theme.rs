//! Chart styling, passed explicitly to every renderer.

use std::path::PathBuf;

use plotters::style::RGBColor;

/// The eight-colour "husl" palette (evenly spaced hues, equal lightness).
pub const HUSL_8: [RGBColor; 8] = [
    RGBColor(247, 113, 137),
    RGBColor(206, 144, 50),
    RGBColor(151, 164, 49),
    RGBColor(50, 177, 102),
    RGBColor(54, 173, 164),
    RGBColor(57, 167, 208),
    RGBColor(164, 140, 244),
    RGBColor(245, 97, 221),
];

pub const MIN_DPI: u32 = 10;
pub const MAX_DPI: u32 = 600;

#[derive(Debug, Clone)]
pub struct ChartTheme {
    pub palette: [RGBColor; 8],
    /// Pixels per inch; figure sizes are given in inches.
    pub dpi: u32,
    /// Figure background.
    pub background: RGBColor,
    /// Plot panel background ("darkgrid" look).
    pub panel: RGBColor,
    /// Major grid lines drawn over the panel.
    pub grid: RGBColor,
    pub ink: RGBColor,
    /// TTF that `apply_chart_font` registers for chart text; `None` searches
    /// well-known system paths. Holds the registered file afterwards.
    pub font: Option<PathBuf>,
    /// Whether text (titles, ticks, annotations) is drawn. Only true once a
    /// font has been registered.
    pub text: bool,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            palette: HUSL_8,
            dpi: 100,
            background: RGBColor(255, 255, 255),
            panel: RGBColor(234, 234, 242),
            grid: RGBColor(255, 255, 255),
            ink: RGBColor(40, 40, 40),
            font: None,
            text: false,
        }
    }
}

impl ChartTheme {
    pub fn color(&self, idx: usize) -> RGBColor {
        self.palette[idx % self.palette.len()]
    }

    /// Pixel size of a figure given in inches.
    pub fn figure_px(&self, inches: (f64, f64)) -> (u32, u32) {
        let dpi = f64::from(self.dpi);
        (
            ((inches.0 * dpi).round() as u32).max(1),
            ((inches.1 * dpi).round() as u32).max(1),
        )
    }

    /// Pixel height of a font given in points.
    pub fn font_px(&self, points: f64) -> f64 {
        (points * f64::from(self.dpi) / 72.0).max(1.0)
    }

    /// Pixel length for a distance given in points (margins, label areas).
    pub fn px(&self, points: f64) -> u32 {
        (points * f64::from(self.dpi) / 72.0).round().max(0.0) as u32
    }

    /// Label area size: the requested size with text, nothing without.
    /// A zero-sized area is never created, so no tick text is drawn into it.
    pub fn label_area(&self, points: f64) -> u32 {
        if self.text { self.px(points) } else { 0 }
    }
}
