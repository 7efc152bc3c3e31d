use crate::error::ChartDataError;
use crate::time_series::{format_timestamp, TimeSeriesPoint};
use chrono::{Datelike, NaiveDateTime, TimeDelta, Timelike};
use derive_more::derive::Display;
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// How a trend chart groups its measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, Default)]
pub enum AggregationMode {
    #[default]
    #[display("all")]
    #[serde(rename = "all")]
    All,
    #[display("24h")]
    #[serde(rename = "24h")]
    TimeOfDay,
    #[display("weekdays")]
    #[serde(rename = "weekdays")]
    Weekday,
}

impl FromStr for AggregationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(AggregationMode::All),
            "24h" | "time-of-day" => Ok(AggregationMode::TimeOfDay),
            "weekdays" | "weekday" => Ok(AggregationMode::Weekday),
            _ => Err(format!("Unknown aggregation mode: {s}")),
        }
    }
}

/// How a point is merged into a bucket that already holds a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, Default)]
pub enum MergePolicy {
    /// `new = (existing + incoming) / 2`; order dependent, later points weigh more.
    #[default]
    #[display("pairwise-average")]
    #[serde(rename = "pairwise_average")]
    PairwiseAverage,
    /// Arithmetic mean of every point in the bucket.
    #[display("running-mean")]
    #[serde(rename = "running_mean")]
    RunningMean,
}

impl FromStr for MergePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pairwise-average" | "legacy" => Ok(MergePolicy::PairwiseAverage),
            "running-mean" | "mean" => Ok(MergePolicy::RunningMean),
            _ => Err(format!("Unknown merge policy: {s}")),
        }
    }
}

struct Bucket {
    point: TimeSeriesPoint,
    sum: f64,
    count: usize,
}

impl Bucket {
    fn open(time: &NaiveDateTime, point: &TimeSeriesPoint) -> Self {
        Self {
            point: TimeSeriesPoint {
                time: format_timestamp(time),
                value: point.value,
                tooltip: point.tooltip.clone(),
            },
            sum: point.value,
            count: 1,
        }
    }

    fn merge(&mut self, value: f64, policy: MergePolicy) {
        self.sum += value;
        self.count += 1;
        self.point.value = match policy {
            MergePolicy::PairwiseAverage => (self.point.value + value) / 2.0,
            MergePolicy::RunningMean => self.sum / self.count as f64,
        };
    }
}

fn merge_into_buckets(
    points: &[TimeSeriesPoint],
    policy: MergePolicy,
    bucket_of: impl Fn(&NaiveDateTime) -> NaiveDateTime,
) -> Result<Vec<TimeSeriesPoint>, ChartDataError> {
    let mut buckets: IndexMap<NaiveDateTime, Bucket> = IndexMap::with_capacity(points.len());
    for point in points {
        let key = bucket_of(&point.parsed_time()?);
        match buckets.entry(key) {
            Entry::Occupied(mut entry) => entry.get_mut().merge(point.value, policy),
            Entry::Vacant(entry) => {
                let bucket = Bucket::open(entry.key(), point);
                entry.insert(bucket);
            }
        }
    }
    Ok(buckets.into_values().map(|bucket| bucket.point).collect())
}

/// Groups points by minute of day on a synthetic date (1970-01-01), seconds zeroed.
/// Buckets are returned in first-seen order.
pub fn bucket_by_time_of_day(
    points: &[TimeSeriesPoint],
    policy: MergePolicy,
) -> Result<Vec<TimeSeriesPoint>, ChartDataError> {
    merge_into_buckets(points, policy, |time| {
        NaiveDateTime::default()
            + TimeDelta::minutes(i64::from(time.hour() * 60 + time.minute()))
    })
}

/// Groups points by weekday on synthetic dates 1970-01-05 (Monday) through 1970-01-11 (Sunday).
/// Buckets are returned in first-seen order.
pub fn bucket_by_weekday(
    points: &[TimeSeriesPoint],
    policy: MergePolicy,
) -> Result<Vec<TimeSeriesPoint>, ChartDataError> {
    // 1970-01-01 was a Thursday.
    const FIRST_MONDAY_OFFSET_DAYS: i64 = 4;
    merge_into_buckets(points, policy, |time| {
        NaiveDateTime::default()
            + TimeDelta::days(
                FIRST_MONDAY_OFFSET_DAYS + i64::from(time.weekday().num_days_from_monday()),
            )
    })
}
