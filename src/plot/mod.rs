//! PNG chart rendering.
//!
//! Each chart is a standalone call: it takes the dataset, an output path and
//! the theme, owns its bitmap for the duration of the call, and drops it
//! before returning whatever the outcome. There is no shared drawing state
//! between charts, so a failure in one never affects the others.

use std::fmt;
use std::path::{Path, PathBuf};

use plotters::prelude::SegmentValue;

use crate::domain::SalesDataset;
use crate::error::AppError;

mod bars;
pub mod boxplot;
pub mod category;
pub mod donut;
pub mod fonts;
pub mod heatmap;
pub mod theme;
pub mod trend;
pub mod weekday;

pub use fonts::{FONT_FAMILY, apply_chart_font, register_chart_font};
pub use theme::{ChartTheme, MAX_DPI, MIN_DPI};

/// Result type inside the renderers; plotters errors are boxed and mapped to
/// `AppError` at the `render_chart` boundary.
pub(crate) type DrawResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    MonthlyTrend,
    CategoryTotals,
    CityShare,
    Correlation,
    WeekdayPattern,
    CategoryBoxplot,
}

impl ChartKind {
    pub const ALL: [ChartKind; 6] = [
        ChartKind::MonthlyTrend,
        ChartKind::CategoryTotals,
        ChartKind::CityShare,
        ChartKind::Correlation,
        ChartKind::WeekdayPattern,
        ChartKind::CategoryBoxplot,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            ChartKind::MonthlyTrend => "monthly_sales_trend.png",
            ChartKind::CategoryTotals => "category_sales.png",
            ChartKind::CityShare => "city_sales_pie.png",
            ChartKind::Correlation => "correlation_heatmap.png",
            ChartKind::WeekdayPattern => "daily_sales_pattern.png",
            ChartKind::CategoryBoxplot => "category_sales_boxplot.png",
        }
    }

    /// Figure size in inches.
    pub fn figure_inches(self) -> (f64, f64) {
        match self {
            ChartKind::MonthlyTrend => (15.0, 7.0),
            ChartKind::CategoryTotals => (12.0, 6.0),
            ChartKind::CityShare => (12.0, 8.0),
            ChartKind::Correlation => (10.0, 8.0),
            ChartKind::WeekdayPattern => (15.0, 7.0),
            ChartKind::CategoryBoxplot => (15.0, 7.0),
        }
    }

    pub fn file_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|k| k.file_name()).collect()
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Outcome of rendering every chart.
#[derive(Debug, Default)]
pub struct ChartReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(ChartKind, AppError)>,
}

impl ChartReport {
    /// `Err` naming every chart that failed, if any did.
    pub fn into_result(self) -> Result<Vec<PathBuf>, AppError> {
        if self.failed.is_empty() {
            return Ok(self.written);
        }
        let details: Vec<String> = self
            .failed
            .iter()
            .map(|(kind, err)| format!("{kind}: {err}"))
            .collect();
        Err(AppError::render(format!(
            "{} chart(s) failed to render: {}",
            self.failed.len(),
            details.join("; ")
        )))
    }
}

/// Create `dir` if needed. Succeeds when it already exists.
pub fn ensure_output_dir(dir: &Path) -> Result<(), AppError> {
    std::fs::create_dir_all(dir).map_err(|e| {
        AppError::input(format!("Failed to create output directory '{}': {e}", dir.display()))
    })
}

/// Render one chart to `path`.
pub fn render_chart(
    kind: ChartKind,
    dataset: &SalesDataset,
    path: &Path,
    theme: &ChartTheme,
) -> Result<(), AppError> {
    if dataset.is_empty() {
        return Err(AppError::render(format!("{kind}: dataset is empty")));
    }

    let size = theme.figure_px(kind.figure_inches());
    let result = match kind {
        ChartKind::MonthlyTrend => trend::render(dataset, path, size, theme),
        ChartKind::CategoryTotals => category::render(dataset, path, size, theme),
        ChartKind::CityShare => donut::render(dataset, path, size, theme),
        ChartKind::Correlation => heatmap::render(dataset, path, size, theme),
        ChartKind::WeekdayPattern => weekday::render(dataset, path, size, theme),
        ChartKind::CategoryBoxplot => boxplot::render(dataset, path, size, theme),
    };

    result.map_err(|e| AppError::render(format!("{kind}: {e}")))
}

/// Render all six charts into `out_dir`, attempting every chart even when
/// an earlier one fails.
pub fn render_all(
    dataset: &SalesDataset,
    out_dir: &Path,
    theme: &ChartTheme,
) -> Result<ChartReport, AppError> {
    ensure_output_dir(out_dir)?;

    let mut report = ChartReport::default();
    for kind in ChartKind::ALL {
        let path = out_dir.join(kind.file_name());
        match render_chart(kind, dataset, &path, theme) {
            Ok(()) => {
                tracing::info!(chart = %kind, path = %path.display(), "chart written");
                report.written.push(path);
            }
            Err(err) => {
                tracing::error!(chart = %kind, error = %err, "chart failed");
                report.failed.push((kind, err));
            }
        }
    }
    Ok(report)
}

/// Tick label for a categorical axis; only segment centres are labelled.
pub(crate) fn segment_label(value: &SegmentValue<usize>, labels: &[String]) -> String {
    match value {
        SegmentValue::CenterOf(i) => labels.get(*i).cloned().unwrap_or_default(),
        _ => String::new(),
    }
}

/// Padded `(min, max)` for an axis; never an empty range.
pub(crate) fn padded_range(min: f64, max: f64, pad_fraction: f64) -> (f64, f64) {
    if !(min.is_finite() && max.is_finite()) {
        return (0.0, 1.0);
    }
    let span = max - min;
    if span <= f64::EPSILON * max.abs().max(1.0) {
        let pad = (max.abs() * 0.1).max(1.0);
        return (min - pad, max + pad);
    }
    (min - span * pad_fraction, max + span * pad_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_sales;

    fn small_theme() -> ChartTheme {
        ChartTheme {
            dpi: 20,
            ..ChartTheme::default()
        }
    }

    #[test]
    fn six_distinct_file_names() {
        let mut names = ChartKind::file_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn render_all_writes_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("plots");
        let ds = generate_sales(60, 42, None).unwrap();

        let report = render_all(&ds, &out, &small_theme()).unwrap();
        let written = report.into_result().unwrap();
        assert_eq!(written.len(), 6);
        for kind in ChartKind::ALL {
            let meta = std::fs::metadata(out.join(kind.file_name())).unwrap();
            assert!(meta.len() > 0, "{kind} is empty");
        }

        // A second run into the same directory is fine.
        assert!(render_all(&ds, &out, &small_theme()).unwrap().failed.is_empty());
    }

    #[test]
    fn renders_without_text_for_any_size() {
        let theme = ChartTheme {
            text: false,
            ..small_theme()
        };
        for count in [1, 7, 1000] {
            let dir = tempfile::tempdir().unwrap();
            let ds = generate_sales(count, 42, None).unwrap();

            let written = render_all(&ds, dir.path(), &theme)
                .unwrap()
                .into_result()
                .unwrap();
            assert_eq!(written.len(), 6, "count {count}");
            for kind in ChartKind::ALL {
                let meta = std::fs::metadata(dir.path().join(kind.file_name())).unwrap();
                assert!(meta.len() > 0, "{kind} is empty for count {count}");
            }
        }
    }

    #[test]
    fn renders_with_text_when_a_font_is_available() {
        let Some(_) = register_chart_font(None).unwrap() else {
            return;
        };
        let dir = tempfile::tempdir().unwrap();
        let theme = ChartTheme {
            text: true,
            ..small_theme()
        };
        let ds = generate_sales(40, 3, None).unwrap();
        let report = render_all(&ds, dir.path(), &theme).unwrap();
        assert!(report.failed.is_empty(), "{:?}", report.failed);
    }

    #[test]
    fn one_failure_does_not_stop_the_rest() {
        let dir = tempfile::tempdir().unwrap();
        // Occupy one chart's file name with a directory so that write fails.
        std::fs::create_dir(dir.path().join(ChartKind::Correlation.file_name())).unwrap();

        let ds = generate_sales(30, 42, None).unwrap();
        let report = render_all(&ds, dir.path(), &small_theme()).unwrap();
        assert_eq!(report.written.len(), 5);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, ChartKind::Correlation);

        let err = report.into_result().unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RENDER);
        assert!(err.message().contains("correlation_heatmap.png"));
    }

    #[test]
    fn empty_dataset_fails_to_render() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_chart(
            ChartKind::MonthlyTrend,
            &SalesDataset::default(),
            &dir.path().join("x.png"),
            &small_theme(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_RENDER);
    }

    #[test]
    fn segment_labels_only_at_centres() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(segment_label(&SegmentValue::CenterOf(1), &labels), "b");
        assert_eq!(segment_label(&SegmentValue::Exact(1), &labels), "");
        assert_eq!(segment_label(&SegmentValue::CenterOf(5), &labels), "");
    }

    #[test]
    fn padded_range_never_collapses() {
        assert_eq!(padded_range(0.0, 10.0, 0.1), (-1.0, 11.0));
        let (lo, hi) = padded_range(5.0, 5.0, 0.1);
        assert!(lo < 5.0 && hi > 5.0);
        assert_eq!(padded_range(f64::NAN, 1.0, 0.1), (0.0, 1.0));
    }
}
