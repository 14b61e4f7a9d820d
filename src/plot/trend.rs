//! Monthly sales trend: one point per calendar month, joined by a line.

use std::path::Path;

use plotters::prelude::*;

use super::{ChartTheme, DrawResult, FONT_FAMILY, padded_range, segment_label};
use crate::domain::SalesDataset;
use crate::math::monthly_totals;
use crate::report::format_lakhs;

/// More month ticks than this get thinned out.
const MAX_MONTH_LABELS: usize = 18;

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let months = monthly_totals(dataset);
    let labels: Vec<String> = months
        .iter()
        .map(|((y, m), _)| format!("{y}-{m:02}"))
        .collect();
    let n = months.len().max(1);

    let lo = months.iter().map(|(_, v)| *v).fold(f64::INFINITY, f64::min);
    let hi = months.iter().map(|(_, v)| *v).fold(f64::NEG_INFINITY, f64::max);
    let (y0, y1) = padded_range(lo, hi, 0.08);

    let title = match dataset.year_span() {
        Some((a, b)) if a != b => format!("Monthly Sales Trend ({a}-{b})"),
        Some((a, _)) => format!("Monthly Sales Trend ({a})"),
        None => "Monthly Sales Trend".to_string(),
    };

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(theme.px(14.0))
        .x_label_area_size(theme.label_area(36.0))
        .y_label_area_size(theme.label_area(56.0));
    if theme.text {
        builder.caption(&title, (FONT_FAMILY, theme.font_px(14.0)));
    }
    let mut chart = builder.build_cartesian_2d((0..n).into_segmented(), y0..y1)?;
    chart.plotting_area().fill(&theme.panel)?;

    let fmt_x = |v: &SegmentValue<usize>| segment_label(v, &labels);
    let fmt_y = |v: &f64| format_lakhs(*v);

    let mut mesh = chart.configure_mesh();
    mesh.bold_line_style(&theme.grid)
        .light_line_style(&theme.panel)
        .axis_style(&theme.ink)
        .x_labels(n.min(MAX_MONTH_LABELS))
        .x_label_formatter(&fmt_x)
        .y_labels(6)
        .y_label_formatter(&fmt_y);
    if theme.text {
        mesh.x_desc("Month")
            .y_desc("Total Sales (₹)")
            .label_style((FONT_FAMILY, theme.font_px(8.0)))
            .axis_desc_style((FONT_FAMILY, theme.font_px(11.0)));
    }
    mesh.draw()?;

    let color = theme.color(0);
    let points: Vec<(SegmentValue<usize>, f64)> = months
        .iter()
        .enumerate()
        .map(|(i, (_, v))| (SegmentValue::CenterOf(i), *v))
        .collect();

    chart.draw_series(LineSeries::new(
        points.iter().cloned(),
        color.stroke_width(theme.px(1.5).max(1)),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new(p.clone(), theme.px(3.0).max(1), color.filled())),
    )?;

    root.present()?;
    Ok(())
}
