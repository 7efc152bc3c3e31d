use super::chart::BenchChart;
use crate::config::ChartConfig;
use crate::error::ChartDataError;
use crate::prepare::trend::TrendChartData;
use charming::Chart;

pub fn create_trend_chart(
    data: &TrendChartData,
    title: &str,
    config: &ChartConfig,
) -> Result<Chart, ChartDataError> {
    let trend_config = &config.trend;
    let points = data.as_time_value_pairs()?;
    let first = data.time_extent.0.and_utc().timestamp_millis() as f64;
    let last = data.time_extent.1.and_utc().timestamp_millis() as f64;
    let color = config.color(0);

    let mut chart = BenchChart::new(
        title,
        &data.subtext(),
        config.dark,
        &trend_config.legend,
        &trend_config.margins,
    )
    .with_time_x_axis(
        &trend_config.time_axis_name,
        trend_config.time_axis_format_for_mode(),
    )
    .with_value_y_axis(&trend_config.value_axis_name)
    .add_area_series(&data.name, points.clone(), color)
    .add_scatter_series(&data.name, points, color, trend_config.symbol_size)
    .with_point_tooltips(data.tooltips());

    if trend_config.show_statistics {
        chart = chart
            .add_reference_segment(
                "Median",
                vec![vec![first, data.median], vec![last, data.median]],
                &config.median_color,
            )
            .add_reference_segment(
                "Mean",
                vec![vec![first, data.mean], vec![last, data.mean]],
                &config.mean_color,
            );
    }

    Ok(chart.inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrendChartConfig;
    use crate::prepare::buckets::AggregationMode;
    use crate::time_series::{SeriesBundle, TimeSeriesPoint};

    fn bundle() -> SeriesBundle {
        SeriesBundle::new(
            "insert",
            vec![
                TimeSeriesPoint::new("2017-09-24T08:16:10.000000", 20.0),
                TimeSeriesPoint::new("2017-09-23T08:16:03.000000", 10.0),
            ],
        )
    }

    #[test]
    fn test_trend_chart_uses_epoch_millis() {
        let config = ChartConfig::default();
        let data = TrendChartData::prepare(&bundle(), &config.trend).unwrap();
        let json = create_trend_chart(&data, "Trend", &config)
            .unwrap()
            .to_string();

        // 2017-09-23T08:16:03Z
        assert!(json.contains("1506154563000"));
        assert!(json.contains("\"Mean\""));
        assert!(json.contains("{HH}h"));
    }

    #[test]
    fn test_scatter_tooltips_carry_point_details() {
        let config = ChartConfig::default();
        let bundle = SeriesBundle::new(
            "insert",
            vec![
                TimeSeriesPoint::new("2017-09-23T08:16:03.000000", 10.0)
                    .with_tooltip("cpu_percent", "12.5")
                    .with_tooltip("mem_percent", "40.1"),
            ],
        );
        let data = TrendChartData::prepare(&bundle, &config.trend).unwrap();
        let json = create_trend_chart(&data, "Trend", &config)
            .unwrap()
            .to_string();

        assert!(json.contains("function (params)"));
        assert!(json.contains("Value: 10<br/>cpu_percent: 12.5<br/>mem_percent: 40.1"));
    }

    #[test]
    fn test_weekday_trend_chart_uses_weekday_labels() {
        let config = ChartConfig {
            trend: TrendChartConfig {
                aggregation: AggregationMode::Weekday,
                show_statistics: false,
                ..TrendChartConfig::default()
            },
            ..ChartConfig::default()
        };
        let data = TrendChartData::prepare(&bundle(), &config.trend).unwrap();
        let json = create_trend_chart(&data, "Trend", &config)
            .unwrap()
            .to_string();

        assert!(json.contains("{ee}"));
        assert!(!json.contains("\"Median\""));
    }
}
