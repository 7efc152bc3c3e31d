mod args;
mod config;
mod loader;
mod page;
mod plot;

use crate::args::{BenchvizArgs, BenchvizCommand};
use anyhow::{Context, Result};
use benchviz_report::comparison::BenchmarkComparison;
use benchviz_report::results::load_results;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = BenchvizArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(&args).inspect_err(|error| error!("{error:#}"))
}

fn run(args: &BenchvizArgs) -> Result<()> {
    let config = config::resolve(args).context("Cannot load chart configuration")?;
    let files = loader::load_inputs(args.command.inputs())?;
    let comparison = BenchmarkComparison::organize(&files)?;
    comparison.print_summary();

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Cannot create output directory: {}",
            args.output_dir.display()
        )
    })?;

    let (charts, reference) = match &args.command {
        BenchvizCommand::Compare(compare) => {
            let reference = compare
                .reference
                .as_deref()
                .map(load_results)
                .transpose()
                .context("Cannot load reference results")?;
            let charts = plot::plot_comparison(
                &comparison,
                reference.as_ref(),
                &config,
                &args.output_dir,
            )?;
            (charts, reference)
        }
        BenchvizCommand::Trend(_) => {
            let charts = plot::plot_trends(&comparison, &config, &args.output_dir)?;
            (charts, None)
        }
    };

    let index = page::write_index(&comparison, reference.as_ref(), &charts, &args.output_dir)
        .context("Cannot write overview page")?;
    info!("Finished, {} charts, overview at: {}", charts.len(), index.display());
    Ok(())
}
