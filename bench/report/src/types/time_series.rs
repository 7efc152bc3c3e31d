use crate::error::ChartDataError;
use chrono::{DateTime, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Fixed-width timestamp layout; lexicographic order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A single measurement in a trend series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TimeSeriesPoint {
    pub time: String,
    pub value: f64,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub tooltip: IndexMap<String, String>,
}

impl TimeSeriesPoint {
    pub fn new(time: impl Into<String>, value: f64) -> Self {
        Self {
            time: time.into(),
            value,
            tooltip: IndexMap::new(),
        }
    }

    pub fn with_tooltip(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tooltip.insert(key.into(), value.into());
        self
    }

    pub fn parsed_time(&self) -> Result<NaiveDateTime, ChartDataError> {
        parse_timestamp(&self.time)
    }

    /// Lines shown when hovering the point: time, value, then each tooltip entry.
    pub fn tooltip_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.tooltip.len() + 2);
        lines.push(format!("Time: {}", self.time));
        lines.push(format!("Value: {}", self.value));
        lines.extend(self.tooltip.iter().map(|(key, value)| format!("{key}: {value}")));
        lines
    }
}

/// Named, ordered sequence of measurements
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, derive_new::new)]
pub struct SeriesBundle {
    #[new(into)]
    pub name: String,
    pub meas: Vec<TimeSeriesPoint>,
}

pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, ChartDataError> {
    if let Ok(time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(time);
    }
    if let Ok(time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(time);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|time| time.naive_utc())
        .map_err(|_| ChartDataError::InvalidTimestamp(value.to_owned()))
}

pub fn format_timestamp(time: &NaiveDateTime) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_timestamp_with_micros() {
        let time = parse_timestamp("2017-09-23T08:16:03.777000").unwrap();
        assert_eq!(time.hour(), 8);
        assert_eq!(time.minute(), 16);
        assert_eq!(time.second(), 3);
        assert_eq!(time.nanosecond(), 777_000_000);
    }

    #[test]
    fn test_parse_timestamp_without_fraction() {
        let time = parse_timestamp("2017-09-23T08:16:03").unwrap();
        assert_eq!(time.second(), 3);
    }

    #[test]
    fn test_parse_timestamp_rfc3339_is_converted_to_utc() {
        let time = parse_timestamp("2017-09-23T10:16:03+02:00").unwrap();
        assert_eq!(time.hour(), 8);
    }

    #[test]
    fn test_parse_invalid_timestamp() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, ChartDataError::InvalidTimestamp(ref s) if s == "yesterday"));
    }

    #[test]
    fn test_format_timestamp_is_fixed_width() {
        let time = parse_timestamp("2017-09-23T08:16:03").unwrap();
        assert_eq!(format_timestamp(&time), "2017-09-23T08:16:03.000000");
    }

    #[test]
    fn test_tooltip_lines_keep_insertion_order() {
        let point = TimeSeriesPoint::new("2017-09-23T08:16:03.000000", 1.5)
            .with_tooltip("mem_percent", "40.1")
            .with_tooltip("cpu_percent", "12.0");
        assert_eq!(
            point.tooltip_lines(),
            vec![
                "Time: 2017-09-23T08:16:03.000000",
                "Value: 1.5",
                "mem_percent: 40.1",
                "cpu_percent: 12.0",
            ]
        );
    }
}
