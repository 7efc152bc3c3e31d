use benchviz_report::comparison::BenchmarkComparison;
use benchviz_report::config::ChartConfig;
use benchviz_report::error::ChartDataError;
use benchviz_report::prepare::bar::BarChartData;
use benchviz_report::prepare::trend::TrendChartData;
use benchviz_report::results::BenchmarkResults;
use benchviz_report::time_series::SeriesBundle;
use benchviz_report::utils::element_id;
use benchviz_report::{create_bar_chart, create_trend_chart, ChartKind};
use charming::theme::Theme;
use charming::{Chart, HtmlRenderer};
use human_repr::HumanCount;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// A chart written to the output directory
#[derive(Debug, Clone, PartialEq)]
pub struct ChartFile {
    pub kind: ChartKind,
    pub bench: String,
    pub test: String,
    pub file_name: String,
}

impl ChartFile {
    fn new(kind: ChartKind, bench: &str, test: &str) -> Self {
        let file_name = format!(
            "{}_{}.html",
            kind.file_prefix(),
            element_id(&format!("{bench}/{test}"))
        );
        Self {
            kind,
            bench: bench.to_owned(),
            test: test.to_owned(),
            file_name,
        }
    }
}

pub fn plot_comparison(
    comparison: &BenchmarkComparison,
    reference: Option<&BenchmarkResults>,
    config: &ChartConfig,
    output_directory: &Path,
) -> Result<Vec<ChartFile>, ChartDataError> {
    let mut charts = Vec::new();
    for (bench, bench_comparison) in &comparison.benches {
        for test in bench_comparison.tests.keys() {
            let data_processing_start = Instant::now();
            let records = comparison.bar_records(bench, test, reference)?;
            if records.is_empty() {
                warn!("No values for {bench}/{test}, skipping chart");
                continue;
            }
            let data = BarChartData::prepare(&records, &config.bar)?;
            let chart_file = ChartFile::new(ChartKind::Comparison, bench, test);
            let chart = create_bar_chart(&data, &chart_file.kind.title(bench, test), config);
            let data_processing_time = data_processing_start.elapsed();

            render(&chart, &chart_file, config, output_directory, data.bars.len())?;
            info!("Data processing of {bench}/{test}: {data_processing_time:.2?}");
            charts.push(chart_file);
        }
    }
    Ok(charts)
}

pub fn plot_trends(
    comparison: &BenchmarkComparison,
    config: &ChartConfig,
    output_directory: &Path,
) -> Result<Vec<ChartFile>, ChartDataError> {
    let mut charts = Vec::new();
    for (bench, bench_comparison) in &comparison.benches {
        for test in bench_comparison.tests.keys() {
            let bundle = comparison.trend_series(bench, test)?;
            let chart_file = ChartFile::new(ChartKind::Trend, bench, test);
            if plot_trend(&bundle, &chart_file, config, output_directory)? {
                charts.push(chart_file);
            }
        }
    }

    for key in comparison.chartable_sysinfos() {
        let bundle = comparison.sysinfo_series(key)?;
        let chart_file = ChartFile::new(ChartKind::SystemInfo, "", key);
        if plot_trend(&bundle, &chart_file, config, output_directory)? {
            charts.push(chart_file);
        }
    }
    Ok(charts)
}

/// Returns `false` when the series holds no timed measurement.
fn plot_trend(
    bundle: &SeriesBundle,
    chart_file: &ChartFile,
    config: &ChartConfig,
    output_directory: &Path,
) -> Result<bool, ChartDataError> {
    if bundle.meas.is_empty() {
        warn!(
            "No timed values for {}, skipping chart",
            chart_file.kind.title(&chart_file.bench, &chart_file.test)
        );
        return Ok(false);
    }
    let data = TrendChartData::prepare(bundle, &config.trend)?;
    let title = chart_file.kind.title(&chart_file.bench, &chart_file.test);
    let chart = create_trend_chart(&data, &title, config)?;
    render(&chart, chart_file, config, output_directory, data.points.len())?;
    Ok(true)
}

fn render(
    chart: &Chart,
    chart_file: &ChartFile,
    config: &ChartConfig,
    output_directory: &Path,
    samples: usize,
) -> Result<(), ChartDataError> {
    let chart_render_start = Instant::now();
    save_chart(
        chart,
        &chart_file.file_name,
        output_directory,
        config.width,
        config.height,
        config.dark,
    )?;
    info!(
        "Generated {} plot at: {} ({} samples, chart render: {:.2?})",
        chart_file.kind,
        output_directory.join(&chart_file.file_name).display(),
        samples.human_count_bare(),
        chart_render_start.elapsed()
    );
    Ok(())
}

fn save_chart(
    chart: &Chart,
    file_name: &str,
    output_directory: &Path,
    width: u64,
    height: u64,
    dark: bool,
) -> Result<(), ChartDataError> {
    let full_output_path = output_directory.join(file_name);
    let theme = if dark { Theme::Dark } else { Theme::Default };

    let mut renderer = HtmlRenderer::new(file_name, width, height).theme(theme);
    renderer
        .save(chart, &full_output_path)
        .map_err(|e| ChartDataError::ChartRender(format!("Failed to save HTML plot: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comparison() -> BenchmarkComparison {
        let files = [("2017-09-23 08:16:03", 1.0, 10.0), ("2017-09-24 08:16:03", 2.0, 20.0)]
            .iter()
            .enumerate()
            .map(|(index, (time, insert, mem))| {
                let results: BenchmarkResults = serde_json::from_value(json!({
                    "Sysinfos": { "time": time, "mem_used": mem },
                    "results": {
                        "sqlite": {
                            "args": {},
                            "data": { "insert": { "type": "time", "unit": "s", "value": insert } }
                        }
                    }
                }))
                .unwrap();
                (format!("run{index}.json"), results)
            })
            .collect::<Vec<_>>();
        BenchmarkComparison::organize(&files).unwrap()
    }

    #[test]
    fn test_chart_file_name_is_dom_safe() {
        let chart_file = ChartFile::new(ChartKind::Comparison, "sqlite", "insert/select");
        assert!(chart_file.file_name.starts_with("comparison_"));
        assert!(chart_file.file_name.ends_with(".html"));
        assert!(!chart_file.file_name[..chart_file.file_name.len() - 5].contains(['/', '.', '=']));
    }

    #[test]
    fn test_plot_comparison_writes_one_chart_per_test() {
        let dir = tempfile::tempdir().unwrap();
        let charts =
            plot_comparison(&comparison(), None, &ChartConfig::default(), dir.path()).unwrap();
        assert_eq!(charts.len(), 1);
        assert!(dir.path().join(&charts[0].file_name).is_file());
    }

    #[test]
    fn test_plot_trends_includes_changing_sysinfos() {
        let dir = tempfile::tempdir().unwrap();
        let charts = plot_trends(&comparison(), &ChartConfig::default(), dir.path()).unwrap();
        let kinds = charts.iter().map(|chart| chart.kind).collect::<Vec<_>>();
        assert_eq!(kinds, vec![ChartKind::Trend, ChartKind::SystemInfo]);
        assert_eq!(charts[1].test, "mem_used");
    }
}
