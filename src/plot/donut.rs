//! City share of total sales as a donut chart.
//!
//! Drawn straight in pixel space: slices start at 12 o'clock and run
//! counter-clockwise, the hole is 70% of the outer radius, and percentage
//! labels sit in the middle of the ring.

use std::f64::consts::{FRAC_PI_2, PI};
use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartTheme, DrawResult, FONT_FAMILY};
use crate::domain::SalesDataset;
use crate::math::city_totals;

const HOLE_RATIO: f64 = 0.70;
const PCT_DISTANCE: f64 = 0.85;
const LABEL_DISTANCE: f64 = 1.12;
/// Arc resolution: one polygon vertex per this many radians.
const ARC_STEP: f64 = PI / 180.0;

/// One slice of the donut: start angle and sweep, both in radians.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub start: f64,
    pub sweep: f64,
    pub fraction: f64,
}

impl Slice {
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Lay out slices for `values`. Non-positive values get an empty slice.
pub fn layout_slices(values: &[f64]) -> Vec<Slice> {
    let total: f64 = values.iter().filter(|v| **v > 0.0).sum();
    let mut angle = FRAC_PI_2;
    values
        .iter()
        .map(|v| {
            let fraction = if total > 0.0 && *v > 0.0 { v / total } else { 0.0 };
            let slice = Slice {
                start: angle,
                sweep: fraction * 2.0 * PI,
                fraction,
            };
            angle += slice.sweep;
            slice
        })
        .collect()
}

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let totals = city_totals(dataset);
    let values: Vec<f64> = totals.iter().map(|(_, v)| *v).collect();
    let slices = layout_slices(&values);

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&theme.background)?;

    let area = if theme.text {
        root.titled("Sales Distribution by City", (FONT_FAMILY, theme.font_px(14.0)))?
    } else {
        root.margin(0, 0, 0, 0)
    };

    let (w, h) = area.dim_in_pixel();
    let center = (w as f64 / 2.0, h as f64 / 2.0);
    let radius = f64::from(w.min(h)) * 0.38;
    let at = |angle: f64, r: f64| -> (i32, i32) {
        (
            (center.0 + r * angle.cos()).round() as i32,
            (center.1 - r * angle.sin()).round() as i32,
        )
    };
    let center_px = at(0.0, 0.0);

    for (i, slice) in slices.iter().enumerate() {
        if slice.sweep <= 0.0 {
            continue;
        }
        let steps = ((slice.sweep / ARC_STEP).ceil() as usize).max(2);
        let mut points = Vec::with_capacity(steps + 2);
        points.push(center_px);
        for s in 0..=steps {
            let angle = slice.start + slice.sweep * s as f64 / steps as f64;
            points.push(at(angle, radius));
        }
        area.draw(&Polygon::new(points, theme.color(i).filled()))?;
    }

    // Slice separators.
    if slices.iter().filter(|s| s.sweep > 0.0).count() > 1 {
        for slice in slices.iter().filter(|s| s.sweep > 0.0) {
            area.draw(&PathElement::new(
                vec![center_px, at(slice.start, radius)],
                theme.background.stroke_width(theme.px(1.5).max(1)),
            ))?;
        }
    }

    let hole = (radius * HOLE_RATIO).round() as i32;
    area.draw(&Circle::new(center_px, hole, theme.background.filled()))?;

    if theme.text {
        let centred = Pos::new(HPos::Center, VPos::Center);
        let pct_style = TextStyle::from((FONT_FAMILY, theme.font_px(10.0)).into_font())
            .color(&theme.ink)
            .pos(centred);
        let name_style = TextStyle::from((FONT_FAMILY, theme.font_px(11.0)).into_font())
            .color(&theme.ink)
            .pos(centred);

        for ((city, _), slice) in totals.iter().zip(&slices) {
            if slice.sweep <= 0.0 {
                continue;
            }
            let mid = slice.mid_angle();
            area.draw(&Text::new(
                format!("{:.1}%", slice.fraction * 100.0),
                at(mid, radius * PCT_DISTANCE),
                pct_style.clone(),
            ))?;
            area.draw(&Text::new(
                city.display_name(),
                at(mid, radius * LABEL_DISTANCE),
                name_style.clone(),
            ))?;
        }
    }

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slices_cover_full_circle() {
        let slices = layout_slices(&[1.0, 1.0, 2.0]);
        assert_eq!(slices.len(), 3);
        assert!((slices[0].start - FRAC_PI_2).abs() < 1e-12);
        assert!((slices[2].fraction - 0.5).abs() < 1e-12);

        let swept: f64 = slices.iter().map(|s| s.sweep).sum();
        assert!((swept - 2.0 * PI).abs() < 1e-9);
        assert!((slices[1].start - (slices[0].start + slices[0].sweep)).abs() < 1e-12);
    }

    #[test]
    fn empty_values_get_empty_slices() {
        let slices = layout_slices(&[0.0, 3.0]);
        assert_eq!(slices[0].sweep, 0.0);
        assert!((slices[1].fraction - 1.0).abs() < 1e-12);

        assert!(layout_slices(&[0.0]).iter().all(|s| s.sweep == 0.0));
    }
}
