//! Vertical bar chart shared by the category and weekday charts.

use std::path::Path;

use plotters::prelude::*;

use super::{ChartTheme, DrawResult, FONT_FAMILY, segment_label};
use crate::report::format_lakhs;

pub(crate) struct BarChart<'a> {
    pub title: &'a str,
    pub x_desc: &'a str,
    pub y_desc: &'a str,
    pub labels: Vec<String>,
    /// `None` leaves an empty slot for that label.
    pub values: Vec<Option<f64>>,
    pub color: RGBColor,
}

pub(crate) fn draw_bars(path: &Path, size: (u32, u32), theme: &ChartTheme, bars: &BarChart<'_>) -> DrawResult<()> {
    let n = bars.labels.len().max(1);
    let top = bars
        .values
        .iter()
        .flatten()
        .copied()
        .fold(0.0f64, f64::max);
    let top = if top > 0.0 { top * 1.1 } else { 1.0 };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(theme.px(14.0))
        .x_label_area_size(theme.label_area(36.0))
        .y_label_area_size(theme.label_area(56.0));
    if theme.text {
        builder.caption(bars.title, (FONT_FAMILY, theme.font_px(14.0)));
    }
    let mut chart = builder.build_cartesian_2d((0..n).into_segmented(), 0.0..top)?;
    chart.plotting_area().fill(&theme.panel)?;

    let fmt_x = |v: &SegmentValue<usize>| segment_label(v, &bars.labels);
    let fmt_y = |v: &f64| format_lakhs(*v);

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .bold_line_style(&theme.grid)
        .light_line_style(&theme.panel)
        .axis_style(&theme.ink)
        .x_labels(n)
        .x_label_formatter(&fmt_x)
        .y_labels(6)
        .y_label_formatter(&fmt_y);
    if theme.text {
        mesh.x_desc(bars.x_desc)
            .y_desc(bars.y_desc)
            .label_style((FONT_FAMILY, theme.font_px(9.0)))
            .axis_desc_style((FONT_FAMILY, theme.font_px(11.0)));
    }
    mesh.draw()?;

    let gap = (chart.plotting_area().dim_in_pixel().0 / n as u32) / 8;
    chart.draw_series(bars.values.iter().enumerate().filter_map(|(i, v)| {
        let v = (*v)?;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), v)],
            bars.color.filled(),
        );
        bar.set_margin(0, 0, gap, gap);
        Some(bar)
    }))?;

    root.present()?;
    Ok(())
}
