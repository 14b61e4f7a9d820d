//! Annotated correlation heatmap with a colour bar.

use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartTheme, DrawResult, FONT_FAMILY, segment_label};
use crate::domain::SalesDataset;
use crate::math::correlation_matrix;

/// Diverging red → yellow → blue stops, for values -1 → 0 → 1.
const RD_YL_BU: [(f64, (u8, u8, u8)); 5] = [
    (0.0, (165, 0, 38)),
    (0.25, (244, 109, 67)),
    (0.5, (255, 255, 191)),
    (0.75, (116, 173, 209)),
    (1.0, (49, 54, 149)),
];

const MISSING: RGBColor = RGBColor(200, 200, 200);
const DARK_TEXT: RGBColor = RGBColor(30, 30, 30);

/// Colour for a correlation coefficient, centred on 0.
pub fn diverging_color(value: f64) -> RGBColor {
    if !value.is_finite() {
        return MISSING;
    }
    let t = ((value.clamp(-1.0, 1.0) + 1.0) / 2.0).clamp(0.0, 1.0);
    for w in RD_YL_BU.windows(2) {
        let (t0, c0) = w[0];
        let (t1, c1) = w[1];
        if t <= t1 {
            let u = (t - t0) / (t1 - t0);
            let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * u).round() as u8;
            return RGBColor(mix(c0.0, c1.0), mix(c0.1, c1.1), mix(c0.2, c1.2));
        }
    }
    let (_, last) = RD_YL_BU[RD_YL_BU.len() - 1];
    RGBColor(last.0, last.1, last.2)
}

/// Whether annotations on `background` need light text to stay readable.
fn wants_light_text(background: RGBColor) -> bool {
    let RGBColor(r, g, b) = background;
    0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b) < 128.0
}

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let matrix = correlation_matrix(dataset).map_err(|e| e.message().to_string())?;
    let k = matrix.size();
    let names: Vec<String> = matrix.columns.iter().map(|c| c.header().to_string()).collect();
    // Row 0 is drawn at the top, so the y axis runs through the names reversed.
    let y_names: Vec<String> = names.iter().rev().cloned().collect();

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let bar_width = (size.0 / 8).max(1);
    let (left, right) = root.split_horizontally(size.0.saturating_sub(bar_width));

    let mut builder = ChartBuilder::on(&left);
    builder
        .margin(theme.px(14.0))
        .x_label_area_size(theme.label_area(30.0))
        .y_label_area_size(theme.label_area(80.0));
    if theme.text {
        builder.caption("Correlation Heatmap", (FONT_FAMILY, theme.font_px(14.0)));
    }
    let mut chart = builder.build_cartesian_2d((0..k).into_segmented(), (0..k).into_segmented())?;

    let fmt_x = |v: &SegmentValue<usize>| segment_label(v, &names);
    let fmt_y = |v: &SegmentValue<usize>| segment_label(v, &y_names);

    let mut mesh = chart.configure_mesh();
    mesh.disable_mesh()
        .axis_style(&theme.ink)
        .x_labels(k)
        .x_label_formatter(&fmt_x)
        .y_labels(k)
        .y_label_formatter(&fmt_y);
    if theme.text {
        mesh.label_style((FONT_FAMILY, theme.font_px(9.0)));
    }
    mesh.draw()?;

    let mut cells = Vec::with_capacity(k * k);
    for i in 0..k {
        let row = k - 1 - i;
        for j in 0..k {
            cells.push((row, j, matrix.get(i, j)));
        }
    }

    chart.draw_series(cells.iter().map(|&(row, j, v)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(j), SegmentValue::Exact(row)),
                (SegmentValue::Exact(j + 1), SegmentValue::Exact(row + 1)),
            ],
            diverging_color(v).filled(),
        )
    }))?;

    if theme.text {
        let style = TextStyle::from((FONT_FAMILY, theme.font_px(10.0)).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center));
        let light = style.color(&WHITE);
        let dark = style.color(&DARK_TEXT);
        chart.draw_series(cells.iter().map(|&(row, j, v)| {
            let label = if v.is_finite() { format!("{v:.2}") } else { "nan".to_string() };
            let text_style = if wants_light_text(diverging_color(v)) { &light } else { &dark };
            Text::new(
                label,
                (SegmentValue::CenterOf(j), SegmentValue::CenterOf(row)),
                text_style.clone(),
            )
        }))?;
    }

    draw_color_bar(&right, theme)?;

    root.present()?;
    Ok(())
}

fn draw_color_bar(area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>, theme: &ChartTheme) -> DrawResult<()> {
    let mut builder = ChartBuilder::on(area);
    builder
        .margin_top(theme.px(40.0))
        .margin_bottom(theme.px(40.0))
        .margin_left(theme.px(8.0))
        .margin_right(theme.px(8.0))
        .y_label_area_size(theme.label_area(30.0));
    let mut bar = builder.build_cartesian_2d(0.0..1.0, -1.0..1.0)?;

    let fmt_y = |v: &f64| format!("{v:.1}");
    let mut mesh = bar.configure_mesh();
    mesh.disable_mesh()
        .disable_x_axis()
        .axis_style(&theme.ink)
        .y_labels(5)
        .y_label_formatter(&fmt_y);
    if theme.text {
        mesh.label_style((FONT_FAMILY, theme.font_px(8.0)));
    }
    mesh.draw()?;

    let steps = 100;
    bar.draw_series((0..steps).map(|s| {
        let y0 = -1.0 + 2.0 * s as f64 / steps as f64;
        let y1 = -1.0 + 2.0 * (s + 1) as f64 / steps as f64;
        Rectangle::new([(0.0, y0), (1.0, y1)], diverging_color((y0 + y1) / 2.0).filled())
    }))?;
    Ok(())
}
