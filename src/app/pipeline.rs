//! The run workflow shared by every subcommand:
//! generate -> persist -> visualize -> summarize.
//!
//! Only two failures are absorbed here: saving the CSV (logged, the run goes
//! on) and currency formatting (handled inside `report`). Anything else stops
//! the run.

use std::path::{Path, PathBuf};

use crate::data::generate_sales;
use crate::domain::{RunConfig, SalesDataset};
use crate::error::AppError;
use crate::io::write_sales_csv;
use crate::plot::{MAX_DPI, MIN_DPI, render_all};
use crate::report::{SalesSummary, compute_summary};

/// What happened to the CSV.
#[derive(Debug, Clone)]
pub enum PersistOutcome {
    Saved(PathBuf),
    Failed(AppError),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved(_))
    }
}

/// All outputs of a full run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub dataset: SalesDataset,
    pub persisted: PersistOutcome,
    pub charts: Vec<PathBuf>,
    pub summary: SalesSummary,
}

pub fn validate_config(config: &RunConfig) -> Result<(), AppError> {
    if config.count == 0 {
        return Err(AppError::input("Record count must be > 0."));
    }
    if !(MIN_DPI..=MAX_DPI).contains(&config.chart.dpi) {
        return Err(AppError::input(format!(
            "DPI must be between {MIN_DPI} and {MAX_DPI} (got {}).",
            config.chart.dpi
        )));
    }
    Ok(())
}

pub fn generate(config: &RunConfig) -> Result<SalesDataset, AppError> {
    tracing::info!(count = config.count, seed = config.seed, "generating sales data");
    generate_sales(config.count, config.seed, config.categorical_seed)
}

/// Save the dataset, logging instead of failing when the write does not work.
pub fn persist(dataset: &SalesDataset, path: &Path) -> PersistOutcome {
    match write_sales_csv(path, dataset) {
        Ok(()) => {
            tracing::info!(path = %path.display(), rows = dataset.len(), "data saved");
            PersistOutcome::Saved(path.to_path_buf())
        }
        Err(err) => {
            tracing::error!(path = %path.display(), error = %err, "error saving file");
            PersistOutcome::Failed(err)
        }
    }
}

/// Execute the full pipeline.
pub fn run_pipeline(config: &RunConfig) -> Result<RunOutput, AppError> {
    validate_config(config)?;

    let dataset = generate(config)?;
    let persisted = persist(&dataset, &config.csv_path);

    tracing::info!(out_dir = %config.out_dir.display(), "creating visualizations");
    let charts = render_all(&dataset, &config.out_dir, &config.chart)?.into_result()?;

    tracing::info!("generating summary report");
    let summary = compute_summary(&dataset)?;

    Ok(RunOutput {
        dataset,
        persisted,
        charts,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::read_sales_csv;
    use crate::plot::{ChartKind, ChartTheme};

    fn config_in(dir: &Path, count: usize) -> RunConfig {
        RunConfig {
            count,
            seed: 42,
            categorical_seed: None,
            csv_path: dir.join("indian_sales_data.csv"),
            out_dir: dir.join("indian_sales_plots"),
            chart: ChartTheme {
                dpi: 20,
                ..ChartTheme::default()
            },
        }
    }

    #[test]
    fn end_to_end_small_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), 10);

        let out = run_pipeline(&config).unwrap();
        assert_eq!(out.summary.total_transactions, "10");
        assert_eq!(out.dataset.len(), 10);
        assert!(out.persisted.is_saved());

        let text = std::fs::read_to_string(&config.csv_path).unwrap();
        assert_eq!(text.lines().count(), 11);
        assert_eq!(read_sales_csv(&config.csv_path).unwrap().dataset.len(), 10);

        assert_eq!(out.charts.len(), 6);
        for kind in ChartKind::ALL {
            let meta = std::fs::metadata(config.out_dir.join(kind.file_name())).unwrap();
            assert!(meta.len() > 0);
        }
    }

    #[test]
    fn persistence_failure_does_not_stop_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), 12);
        // The CSV path is an existing directory, so the write fails.
        config.csv_path = dir.path().to_path_buf();

        let out = run_pipeline(&config).unwrap();
        assert!(matches!(out.persisted, PersistOutcome::Failed(_)));
        assert_eq!(out.summary.total_transactions, "12");
        assert_eq!(out.charts.len(), 6);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();

        let zero = config_in(dir.path(), 0);
        assert!(run_pipeline(&zero).is_err());

        let mut dpi = config_in(dir.path(), 5);
        dpi.chart.dpi = 5_000;
        assert_eq!(validate_config(&dpi).unwrap_err().exit_code(), crate::error::EXIT_INPUT);
    }

    #[test]
    fn same_seed_same_summary() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let out_a = run_pipeline(&config_in(a.path(), 25)).unwrap();
        let out_b = run_pipeline(&config_in(b.path(), 25)).unwrap();
        assert_eq!(out_a.summary, out_b.summary);
        assert_eq!(
            std::fs::read(a.path().join("indian_sales_data.csv")).unwrap(),
            std::fs::read(b.path().join("indian_sales_data.csv")).unwrap()
        );
    }
}
