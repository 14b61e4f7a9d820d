//! Command-line parsing.
//!
//! Argument parsing and dispatch stay separate from generation, aggregation
//! and plotting. Every run option can also come from the environment (or a
//! `.env` file, loaded before parsing).

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "salesrep",
    version,
    about = "Synthetic retail sales dataset with summary report and charts"
)]
pub struct Cli {
    /// Log debug details.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate the dataset, save it, render the charts and print the summary.
    Run(RunArgs),
    /// Generate the dataset and save it as CSV only.
    Generate(GenerateArgs),
    /// Print the summary for a generated dataset or an existing CSV.
    Summary(SummaryArgs),
}

/// How the dataset is generated.
#[derive(Debug, Args, Clone)]
pub struct DatasetArgs {
    /// Number of records to generate.
    #[arg(short = 'n', long, env = "SALES_COUNT", default_value_t = 1000)]
    pub count: usize,

    /// Seed for the random generator.
    #[arg(long, env = "SALES_SEED", default_value_t = 42)]
    pub seed: u64,

    /// Separate seed for the category/city draws (default: drawn from `--seed`).
    #[arg(long, env = "SALES_CATEGORICAL_SEED")]
    pub categorical_seed: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Where to save the generated dataset.
    #[arg(long, env = "SALES_CSV", default_value = "indian_sales_data.csv")]
    pub csv: PathBuf,

    /// Directory for the chart images (created if missing).
    #[arg(long, env = "SALES_OUT_DIR", default_value = "indian_sales_plots")]
    pub out_dir: PathBuf,

    /// Chart resolution in pixels per inch.
    #[arg(long, env = "SALES_DPI", default_value_t = 100)]
    pub dpi: u32,

    /// TrueType font for chart text (default: search system fonts).
    #[arg(long, env = "SALES_FONT")]
    pub font: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Where to save the generated dataset.
    #[arg(long, env = "SALES_CSV", default_value = "indian_sales_data.csv")]
    pub csv: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    /// Summarise this CSV instead of generating a dataset.
    #[arg(long, value_name = "CSV")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub dataset: DatasetArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_defaults() {
        let cli = Cli::try_parse_from(["salesrep", "run"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.csv, PathBuf::from("indian_sales_data.csv"));
        assert_eq!(args.out_dir, PathBuf::from("indian_sales_plots"));
        assert!(args.dataset.count > 0);
    }

    #[test]
    fn summary_with_input() {
        let cli = Cli::try_parse_from(["salesrep", "-q", "summary", "--input", "x.csv"]).unwrap();
        assert!(cli.quiet);
        let Command::Summary(args) = cli.command else {
            panic!("expected summary");
        };
        assert_eq!(args.input, Some(PathBuf::from("x.csv")));
    }

    #[test]
    fn verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["salesrep", "-v", "-q", "run"]).is_err());
    }
}
