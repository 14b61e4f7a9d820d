//! Box-and-whisker plot of sales per category.

use std::path::Path;

use plotters::prelude::*;

use super::{ChartTheme, DrawResult, FONT_FAMILY, padded_range, segment_label};
use crate::domain::SalesDataset;
use crate::math::category_distributions;
use crate::report::format_lakhs;

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let groups = category_distributions(dataset);
    let labels: Vec<String> = groups
        .iter()
        .map(|(c, _)| c.display_name().to_string())
        .collect();
    let n = groups.len().max(1);

    let lo = dataset.iter().map(|r| r.sales_amount).fold(f64::INFINITY, f64::min);
    let hi = dataset.iter().map(|r| r.sales_amount).fold(f64::NEG_INFINITY, f64::max);
    let (y0, y1) = padded_range(lo, hi, 0.05);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let mut builder = ChartBuilder::on(&root);
    builder
        .margin(theme.px(14.0))
        .x_label_area_size(theme.label_area(36.0))
        .y_label_area_size(theme.label_area(56.0));
    if theme.text {
        builder.caption(
            "Sales Distribution by Category (Box Plot)",
            (FONT_FAMILY, theme.font_px(14.0)),
        );
    }
    let mut chart = builder.build_cartesian_2d((0..n).into_segmented(), y0..y1)?;
    chart.plotting_area().fill(&theme.panel)?;

    let fmt_x = |v: &SegmentValue<usize>| segment_label(v, &labels);
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
        mesh.x_desc("Category")
            .y_desc("Sales Amount (₹)")
            .label_style((FONT_FAMILY, theme.font_px(9.0)))
            .axis_desc_style((FONT_FAMILY, theme.font_px(11.0)));
    }
    mesh.draw()?;

    let segment_px = chart.plotting_area().dim_in_pixel().0 / n as u32;
    let box_margin = segment_px / 5;
    let cap_margin = segment_px * 3 / 8;
    let stroke = theme.px(1.0).max(1);
    let line = || theme.ink.stroke_width(stroke);

    for (i, (_, stats)) in groups.iter().enumerate() {
        let left = SegmentValue::Exact(i);
        let right = SegmentValue::Exact(i + 1);
        let mid = SegmentValue::CenterOf(i);

        // Whiskers first so the box covers their inner ends.
        chart.draw_series([
            PathElement::new(vec![(mid.clone(), stats.lower_whisker), (mid.clone(), stats.q1)], line()),
            PathElement::new(vec![(mid.clone(), stats.q3), (mid.clone(), stats.upper_whisker)], line()),
        ])?;

        let mut caps = [
            Rectangle::new([(left.clone(), stats.lower_whisker), (right.clone(), stats.lower_whisker)], line()),
            Rectangle::new([(left.clone(), stats.upper_whisker), (right.clone(), stats.upper_whisker)], line()),
        ];
        for cap in caps.iter_mut() {
            cap.set_margin(0, 0, cap_margin, cap_margin);
        }
        chart.draw_series(caps)?;

        let mut body = Rectangle::new([(left.clone(), stats.q1), (right.clone(), stats.q3)], theme.color(i).filled());
        body.set_margin(0, 0, box_margin, box_margin);
        let mut outline = Rectangle::new([(left.clone(), stats.q1), (right.clone(), stats.q3)], line());
        outline.set_margin(0, 0, box_margin, box_margin);
        let mut median = Rectangle::new([(left.clone(), stats.median), (right.clone(), stats.median)], line());
        median.set_margin(0, 0, box_margin, box_margin);
        chart.draw_series([body, outline, median])?;

        chart.draw_series(stats.outliers.iter().map(|v| {
            Circle::new((mid.clone(), *v), theme.px(2.5).max(1), theme.ink.stroke_width(1))
        }))?;
    }

    root.present()?;
    Ok(())
}
