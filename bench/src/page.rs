use crate::plot::ChartFile;
use benchviz_report::bounds::BoundMark;
use benchviz_report::comparison::{display_value, BenchComparison, BenchmarkComparison};
use benchviz_report::prepare::stats::SeriesAggregates;
use benchviz_report::results::{BenchmarkResults, TestValue};
use benchviz_report::utils::{element_id, format_value};
use std::path::{Path, PathBuf};
use tracing::info;

const INDEX_FILE: &str = "index.html";
const DECIMALS: usize = 3;

const STYLE: &str = r#"<style>
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; margin-bottom: 1.5em; }
th, td { border: 1px solid #ccc; padding: 4px 8px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.warning { color: #D00000; font-weight: bold; }
</style>"#;

/// Writes `index.html` next to the charts and returns its path.
pub fn write_index(
    comparison: &BenchmarkComparison,
    reference: Option<&BenchmarkResults>,
    charts: &[ChartFile],
    output_directory: &Path,
) -> std::io::Result<PathBuf> {
    let path = output_directory.join(INDEX_FILE);
    std::fs::write(&path, render_index(comparison, reference, charts))?;
    info!("Generated overview page at: {}", path.display());
    Ok(path)
}

pub fn render_index(
    comparison: &BenchmarkComparison,
    reference: Option<&BenchmarkResults>,
    charts: &[ChartFile],
) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n");
    html.push_str("<title>Benchmark results</title>\n");
    html.push_str(STYLE);
    html.push_str("\n</head>\n<body>\n<h1>Benchmark results</h1>\n");

    html.push_str(&sysinfo_table(comparison));
    for (bench_name, bench) in &comparison.benches {
        html.push_str(&bench_section(
            bench_name,
            bench,
            &comparison.files,
            reference,
            charts,
        ));
    }

    let sysinfo_charts = charts
        .iter()
        .filter(|chart| chart.bench.is_empty())
        .collect::<Vec<_>>();
    if !sysinfo_charts.is_empty() {
        html.push_str("<h2>System info charts</h2>\n");
        html.push_str(&chart_links(sysinfo_charts));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn sysinfo_table(comparison: &BenchmarkComparison) -> String {
    let mut html = String::from("<h2>System info</h2>\n<table>\n");
    html.push_str(&header_row("", &comparison.files));
    for (key, values) in &comparison.sysinfos {
        html.push_str(&format!("<tr><td>{}</td>", escape(key)));
        for value in values {
            let text = value.as_ref().map(display_value).unwrap_or_default();
            html.push_str(&format!("<td>{}</td>", escape(&text)));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html
}

fn bench_section(
    bench_name: &str,
    bench: &BenchComparison,
    files: &[String],
    reference: Option<&BenchmarkResults>,
    charts: &[ChartFile],
) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        "<h2 id=\"{}\">{}</h2>\n",
        element_id(bench_name),
        escape(bench_name)
    ));

    if bench.args_mismatch {
        html.push_str(
            "<p class=\"warning\">Arguments differ between the compared files, \
             the arguments of the first file are shown.</p>\n",
        );
    }
    if !bench.args.is_empty() {
        html.push_str("<table>\n<tr><th>Argument</th><th>Value</th></tr>\n");
        for (key, value) in &bench.args {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(key),
                escape(&display_value(value))
            ));
        }
        html.push_str("</table>\n");
    }

    let mut columns = vec!["Type".to_owned(), "Unit".to_owned()];
    columns.extend(files.iter().cloned());
    html.push_str("<table>\n");
    html.push_str(&header_row("Test", &columns));
    for (test_name, test) in &bench.tests {
        let reference_value = reference
            .and_then(|reference| reference.test(bench_name, test_name))
            .and_then(|result| result.value.representative());
        html.push_str(&format!(
            "<tr><td id=\"{}\">{}</td><td>{}</td><td>{}</td>",
            element_id(&format!("{bench_name}/{test_name}")),
            escape(test_name),
            test.kind,
            escape(&test.unit)
        ));
        for value in &test.values {
            let Some(value) = value else {
                html.push_str("<td></td>");
                continue;
            };
            let color = reference_value
                .zip(value.representative())
                .and_then(|(reference, current)| {
                    BoundMark::classify(reference, current, test.kind).color(test.kind)
                });
            let cell = match color {
                Some(color) => format!(
                    "<td style=\"background-color: {color}\">{}</td>",
                    describe(value)
                ),
                None => format!("<td>{}</td>", describe(value)),
            };
            html.push_str(&cell);
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");

    let bench_charts = charts
        .iter()
        .filter(|chart| chart.bench == bench_name)
        .collect::<Vec<_>>();
    if !bench_charts.is_empty() {
        html.push_str(&chart_links(bench_charts));
    }
    html
}

fn describe(value: &TestValue) -> String {
    match value {
        TestValue::Single(value) => format_value(*value, DECIMALS),
        TestValue::Series(values) => match SeriesAggregates::from_values(values) {
            Ok(aggregates) => format!(
                "avg {} (min {}, max {}, sum {})",
                format_value(aggregates.avg, DECIMALS),
                format_value(aggregates.min, DECIMALS),
                format_value(aggregates.max, DECIMALS),
                format_value(aggregates.sum, DECIMALS)
            ),
            Err(_) => String::new(),
        },
    }
}

fn chart_links(charts: Vec<&ChartFile>) -> String {
    let mut html = String::from("<ul>\n");
    for chart in charts {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            chart.file_name,
            escape(&chart.kind.title(&chart.bench, &chart.test))
        ));
    }
    html.push_str("</ul>\n");
    html
}

fn header_row(first: &str, columns: &[String]) -> String {
    let mut html = format!("<tr><th>{}</th>", escape(first));
    for column in columns {
        html.push_str(&format!("<th>{}</th>", escape(column)));
    }
    html.push_str("</tr>\n");
    html
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
