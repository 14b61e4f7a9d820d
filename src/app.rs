//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - resolves the run configuration (including the chart font)
//! - runs the pipeline and prints the summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, DatasetArgs, GenerateArgs, RunArgs, SummaryArgs};
use crate::domain::RunConfig;
use crate::error::AppError;
use crate::plot::{ChartKind, ChartTheme, apply_chart_font};
use crate::report::{compute_summary, format_chart_list, format_summary};

pub mod pipeline;

/// Entry point for the `salesrep` binary.
pub fn run() -> Result<(), AppError> {
    // Missing `.env` is the normal case.
    dotenvy::dotenv().ok();

    // `salesrep` and `salesrep -n 500` behave like `salesrep run ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Run(args) => handle_run(args),
        Command::Generate(args) => handle_generate(args),
        Command::Summary(args) => handle_summary(args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    // Logs go to stderr; stdout carries the summary.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_run(args: RunArgs) -> Result<(), AppError> {
    let mut config = run_config_from_args(&args);

    apply_chart_font(&mut config.chart)?;
    match &config.chart.font {
        Some(path) => tracing::debug!(font = %path.display(), "chart font registered"),
        None => tracing::warn!("no usable font found; charts are drawn without text (set SALES_FONT)"),
    }

    let out = pipeline::run_pipeline(&config)?;
    tracing::info!(
        rows = out.dataset.len(),
        charts = out.charts.len(),
        saved = out.persisted.is_saved(),
        "run complete"
    );

    println!();
    println!("{}", format_summary(&out.summary));
    print!("{}", format_chart_list(&config.out_dir, &ChartKind::file_names()));
    Ok(())
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let config = RunConfig {
        csv_path: args.csv.clone(),
        ..dataset_config(&args.dataset)
    };
    pipeline::validate_config(&config)?;

    let dataset = pipeline::generate(&config)?;
    match pipeline::persist(&dataset, &config.csv_path) {
        pipeline::PersistOutcome::Saved(path) => {
            println!("Data saved to {}", path.display());
            Ok(())
        }
        pipeline::PersistOutcome::Failed(err) => Err(err),
    }
}

fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let dataset = match &args.input {
        Some(path) => {
            let ingested = crate::io::read_sales_csv(path)?;
            if !ingested.row_errors.is_empty() {
                tracing::warn!(
                    skipped = ingested.row_errors.len(),
                    rows = ingested.rows_read,
                    "some rows could not be read"
                );
            }
            ingested.dataset
        }
        None => {
            let config = dataset_config(&args.dataset);
            pipeline::validate_config(&config)?;
            pipeline::generate(&config)?
        }
    };

    let summary = compute_summary(&dataset)?;
    println!("{}", format_summary(&summary));
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> RunConfig {
    RunConfig {
        csv_path: args.csv.clone(),
        out_dir: args.out_dir.clone(),
        chart: ChartTheme {
            dpi: args.dpi,
            font: args.font.clone(),
            ..ChartTheme::default()
        },
        ..dataset_config(&args.dataset)
    }
}

fn dataset_config(args: &DatasetArgs) -> RunConfig {
    RunConfig {
        count: args.count,
        seed: args.seed,
        categorical_seed: args.categorical_seed,
        ..RunConfig::default()
    }
}

/// Rewrite argv so `salesrep` defaults to `salesrep run`.
///
/// Rules:
/// - `salesrep`                     -> `salesrep run`
/// - `salesrep -n 500 ...`          -> `salesrep run -n 500 ...`
/// - `salesrep --help/--version/-h` -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("run".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "run" | "generate" | "summary");
    if is_subcommand {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "run".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_runs() {
        assert_eq!(rewrite_args(argv(&["salesrep"])), argv(&["salesrep", "run"]));
        assert_eq!(
            rewrite_args(argv(&["salesrep", "-n", "50"])),
            argv(&["salesrep", "run", "-n", "50"])
        );
    }

    #[test]
    fn explicit_subcommands_and_help_untouched() {
        for args in [
            argv(&["salesrep", "summary", "--input", "a.csv"]),
            argv(&["salesrep", "--help"]),
            argv(&["salesrep", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn config_carries_args() {
        let cli = crate::cli::Cli::try_parse_from([
            "salesrep", "run", "-n", "25", "--seed", "7", "--dpi", "72", "--out-dir", "plots",
        ])
        .unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        let config = run_config_from_args(&args);
        assert_eq!(config.count, 25);
        assert_eq!(config.seed, 7);
        assert_eq!(config.chart.dpi, 72);
        assert_eq!(config.out_dir, std::path::PathBuf::from("plots"));
        assert!(!config.chart.text);
    }
}
