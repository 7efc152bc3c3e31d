use benchviz_report::prepare::buckets::{AggregationMode, MergePolicy};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_OUTPUT_DIR: &str = "benchviz_output";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct BenchvizArgs {
    /// Chart kind
    #[command(subcommand)]
    pub command: BenchvizCommand,

    /// Output directory for the generated charts and index.html
    #[arg(long, short = 'o', global = true, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// TOML or JSON chart configuration file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Render charts with the dark theme
    #[arg(long, global = true, default_value_t = false)]
    pub dark: bool,

    /// Trend aggregation: all, 24h or weekdays
    #[arg(long, global = true, value_parser = AggregationMode::from_str)]
    pub aggregation: Option<AggregationMode>,

    /// How points sharing a trend bucket are merged: pairwise-average or running-mean
    #[arg(long, global = true, value_parser = MergePolicy::from_str)]
    pub merge_policy: Option<MergePolicy>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum BenchvizCommand {
    /// Compare results files test by test with bar charts
    Compare(CompareArgs),
    /// Plot every test over time, one point per results file
    Trend(TrendArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Results files, or directories of results files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Results file the others are measured against
    #[arg(long, short = 'r')]
    pub reference: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct TrendArgs {
    /// Results files, or directories of results files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

impl BenchvizCommand {
    pub fn inputs(&self) -> &[PathBuf] {
        match self {
            BenchvizCommand::Compare(args) => &args.inputs,
            BenchvizCommand::Trend(args) => &args.inputs,
        }
    }
}
