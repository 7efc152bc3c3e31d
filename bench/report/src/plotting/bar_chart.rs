use super::chart::BenchChart;
use crate::config::{CategoryAxis, ChartConfig};
use crate::prepare::bar::BarChartData;
use charming::Chart;
use tracing::warn;

const FILES_STACK: &str = "files";

/// Horizontal bars, one series per results file, colored by the file's legend
/// position. On the name axis every category holds one bar per file; on the
/// file axis each file owns its category and the series are stacked so that
/// the bar sits centered.
pub fn create_bar_chart(data: &BarChartData, title: &str, config: &ChartConfig) -> Chart {
    let bar_config = &config.bar;
    let subtext = data.subtext(bar_config.label_decimals);
    let mut chart = BenchChart::new(
        title,
        &subtext,
        config.dark,
        &bar_config.legend,
        &bar_config.margins,
    )
    .with_category_y_axis(&bar_config.category_axis_name, data.categories.clone())
    .with_value_x_axis(&bar_config.value_axis_name);

    for (file_index, file) in data.files.iter().enumerate() {
        let values = match bar_config.category_axis {
            CategoryAxis::Name => data
                .categories
                .iter()
                .map(|name| {
                    data.bar(name, file)
                        .map_or(f64::NAN, |bar| bar.labelled_value())
                })
                .collect::<Vec<_>>(),
            CategoryAxis::File => {
                let file_bars = data.bars.iter().filter(|bar| &bar.file == file).count();
                if file_bars > 1 {
                    warn!(
                        "File '{}' has {} bars on a file axis, only the first one is drawn",
                        file, file_bars
                    );
                }
                data.categories
                    .iter()
                    .map(|category| {
                        if category != file {
                            return f64::NAN;
                        }
                        data.bars
                            .iter()
                            .find(|bar| &bar.file == file)
                            .map_or(f64::NAN, |bar| bar.labelled_value())
                    })
                    .collect::<Vec<_>>()
            }
        };
        let stack = match bar_config.category_axis {
            CategoryAxis::Name => None,
            CategoryAxis::File => Some(FILES_STACK),
        };
        chart = chart.add_bar_series(file, values, config.color(file_index), stack);
    }

    if bar_config.show_statistics {
        let categories = data.categories.len();
        chart = chart
            .add_reference_line("Median", vec![data.median; categories], &config.median_color)
            .add_reference_line("Mean", vec![data.mean; categories], &config.mean_color);
    }

    chart.inner
}
