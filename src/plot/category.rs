//! Total sales per category, largest first.

use std::path::Path;

use super::bars::{BarChart, draw_bars};
use super::{ChartTheme, DrawResult};
use crate::domain::SalesDataset;
use crate::math::category_totals_desc;

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let totals = category_totals_desc(dataset);

    draw_bars(
        path,
        size,
        theme,
        &BarChart {
            title: "Sales Distribution by Category",
            x_desc: "Category",
            y_desc: "Total Sales (₹)",
            labels: totals.iter().map(|(c, _)| c.display_name().to_string()).collect(),
            values: totals.iter().map(|(_, v)| Some(*v)).collect(),
            color: theme.color(1),
        },
    )
}
