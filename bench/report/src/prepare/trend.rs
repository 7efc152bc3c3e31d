use super::buckets::{bucket_by_time_of_day, bucket_by_weekday, AggregationMode};
use super::ordering::sort_by_time_ascending;
use super::stats::{extent, mean, median};
use crate::config::TrendChartConfig;
use crate::error::ChartDataError;
use crate::time_series::{format_timestamp, SeriesBundle, TimeSeriesPoint};
use chrono::NaiveDateTime;
use tracing::{debug, warn};

/// Geometry inputs of a trend chart
#[derive(Debug, Clone, PartialEq)]
pub struct TrendChartData {
    pub name: String,
    pub aggregation: AggregationMode,
    pub points: Vec<TimeSeriesPoint>,
    pub mean: f64,
    pub median: f64,
    pub extent: (f64, f64),
    pub time_extent: (NaiveDateTime, NaiveDateTime),
}

impl TrendChartData {
    pub fn prepare(
        bundle: &SeriesBundle,
        config: &TrendChartConfig,
    ) -> Result<Self, ChartDataError> {
        if bundle.meas.is_empty() {
            warn!("Series '{}' has no measurements", bundle.name);
            return Err(ChartDataError::EmptyInput);
        }
        let canonical = bundle
            .meas
            .iter()
            .map(|point| canonicalize(&bundle.name, point))
            .collect::<Result<Vec<_>, _>>()?;

        let sorted = sort_by_time_ascending(&canonical);
        let points = match config.aggregation {
            AggregationMode::All => sorted,
            AggregationMode::TimeOfDay => {
                sort_by_time_ascending(&bucket_by_time_of_day(&sorted, config.merge_policy)?)
            }
            AggregationMode::Weekday => {
                sort_by_time_ascending(&bucket_by_weekday(&sorted, config.merge_policy)?)
            }
        };

        let values = points.iter().map(|p| p.value).collect::<Vec<_>>();
        let mean = mean(&values)?;
        let median = median(&values)?;
        let extent = extent(&values).ok_or(ChartDataError::EmptyInput)?;
        let first = points[0].parsed_time()?;
        let last = points[points.len() - 1].parsed_time()?;

        debug!(
            "Prepared trend chart '{}' ({}): {} of {} points",
            bundle.name,
            config.aggregation,
            points.len(),
            bundle.meas.len()
        );

        Ok(Self {
            name: bundle.name.clone(),
            aggregation: config.aggregation,
            points,
            mean,
            median,
            extent,
            time_extent: (first, last),
        })
    }

    /// Hover text of every point, in point order.
    pub fn tooltips(&self) -> Vec<String> {
        self.points
            .iter()
            .map(|point| point.tooltip_lines().join("<br/>"))
            .collect()
    }

    /// `[epoch millis, value]` pairs for a time axis.
    pub fn as_time_value_pairs(&self) -> Result<Vec<Vec<f64>>, ChartDataError> {
        self.points
            .iter()
            .map(|point| {
                let time = point.parsed_time()?;
                Ok(vec![
                    time.and_utc().timestamp_millis() as f64,
                    point.value,
                ])
            })
            .collect()
    }
}

/// Rejects non-finite values and rewrites the timestamp into the fixed-width
/// UTC layout, so that string order is time order.
fn canonicalize(series: &str, point: &TimeSeriesPoint) -> Result<TimeSeriesPoint, ChartDataError> {
    if !point.value.is_finite() {
        return Err(ChartDataError::NonFinitePoint {
            series: series.to_owned(),
            time: point.time.clone(),
            value: point.value,
        });
    }
    Ok(TimeSeriesPoint {
        time: format_timestamp(&point.parsed_time()?),
        value: point.value,
        tooltip: point.tooltip.clone(),
    })
}
