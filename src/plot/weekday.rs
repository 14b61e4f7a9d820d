//! Mean sale per weekday, always Monday through Sunday.

use std::path::Path;

use super::bars::{BarChart, draw_bars};
use super::{ChartTheme, DrawResult};
use crate::domain::SalesDataset;
use crate::math::{weekday_means, weekday_name};

pub fn render(dataset: &SalesDataset, path: &Path, size: (u32, u32), theme: &ChartTheme) -> DrawResult<()> {
    let means = weekday_means(dataset);

    draw_bars(
        path,
        size,
        theme,
        &BarChart {
            title: "Average Daily Sales Pattern",
            x_desc: "Day of Week",
            y_desc: "Average Sales (₹)",
            labels: means.iter().map(|(d, _)| weekday_name(*d).to_string()).collect(),
            values: means.iter().map(|(_, v)| *v).collect(),
            color: theme.color(4),
        },
    )
}
