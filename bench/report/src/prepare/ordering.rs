use crate::record::MeasurementRecord;
use crate::time_series::TimeSeriesPoint;
use indexmap::IndexSet;
use std::cmp::Ordering;

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Sorts descending by name and ascending by file, both case-insensitive.
/// Records with equal keys keep their relative order.
pub fn sort_by_name_then_file(records: &[MeasurementRecord]) -> Vec<MeasurementRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| {
        compare_ignore_case(&b.name, &a.name).then_with(|| compare_ignore_case(&a.file, &b.file))
    });
    sorted
}

/// Unique file names in first-seen order.
pub fn distinct_files(records: &[MeasurementRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.file.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Unique test names in first-seen order.
pub fn distinct_names(records: &[MeasurementRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.name.as_str())
        .collect::<IndexSet<_>>()
        .into_iter()
        .map(str::to_owned)
        .collect()
}

/// Lexicographic sort on the timestamp string, stable for equal timestamps.
pub fn sort_by_time_ascending(points: &[TimeSeriesPoint]) -> Vec<TimeSeriesPoint> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.time.cmp(&b.time));
    sorted
}
