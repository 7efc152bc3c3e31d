use super::record::MeasurementRecord;
use super::results::{BenchmarkResults, TestValue};
use super::test_kind::TestKind;
use super::time_series::{SeriesBundle, TimeSeriesPoint};
use crate::error::ChartDataError;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

pub const REFERENCE_FILE: &str = "reference";
const TIME_SYSINFO: &str = "time";
const TOOLTIP_SYSINFOS: [&str; 2] = ["cpu_percent", "mem_percent"];

/// Results of one test across all compared files
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestComparison {
    pub kind: TestKind,
    pub unit: String,
    /// One entry per compared file, `None` where the file lacks the test.
    pub values: Vec<Option<TestValue>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BenchComparison {
    pub args: IndexMap<String, Value>,
    pub args_mismatch: bool,
    pub tests: IndexMap<String, TestComparison>,
}

/// Several results files aligned bench by bench and test by test
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct BenchmarkComparison {
    pub files: Vec<String>,
    /// One entry per compared file, `None` where the file lacks the info.
    pub sysinfos: IndexMap<String, Vec<Option<Value>>>,
    pub benches: IndexMap<String, BenchComparison>,
}

impl BenchmarkComparison {
    pub fn organize(files: &[(String, BenchmarkResults)]) -> Result<Self, ChartDataError> {
        let mut comparison = BenchmarkComparison {
            files: files.iter().map(|(name, _)| name.clone()).collect(),
            ..Default::default()
        };

        for (_, results) in files {
            for key in results.sysinfos.keys() {
                if !comparison.sysinfos.contains_key(key) {
                    let values = files
                        .iter()
                        .map(|(_, results)| results.sysinfos.get(key).cloned())
                        .collect();
                    comparison.sysinfos.insert(key.clone(), values);
                }
            }
        }

        for (file_name, results) in files {
            for (bench_name, bench) in &results.results {
                let first_seen = !comparison.benches.contains_key(bench_name);
                let entry = comparison.benches.entry(bench_name.clone()).or_default();
                if first_seen {
                    entry.args = bench.args.clone();
                } else if entry.args != bench.args && !entry.args_mismatch {
                    warn!(
                        "The arguments of bench '{}' in {} differ from the other benchmarks",
                        bench_name, file_name
                    );
                    entry.args_mismatch = true;
                }

                for (test_name, test) in &bench.data {
                    if let Some(existing) = entry.tests.get(test_name) {
                        if existing.unit != test.unit {
                            return Err(incompatible(file_name, bench_name, test_name, "units"));
                        }
                        if existing.kind != test.kind {
                            return Err(incompatible(file_name, bench_name, test_name, "types"));
                        }
                        continue;
                    }
                    let values = files
                        .iter()
                        .map(|(_, results)| {
                            results
                                .test(bench_name, test_name)
                                .map(|result| result.value.clone())
                        })
                        .collect();
                    entry.tests.insert(
                        test_name.clone(),
                        TestComparison {
                            kind: test.kind,
                            unit: test.unit.clone(),
                            values,
                        },
                    );
                }
            }
        }

        debug!(
            "Organized {} files: {} benches, {} system infos",
            comparison.files.len(),
            comparison.benches.len(),
            comparison.sysinfos.len()
        );
        Ok(comparison)
    }

    pub fn bench(&self, bench: &str) -> Result<&BenchComparison, ChartDataError> {
        self.benches
            .get(bench)
            .ok_or_else(|| ChartDataError::UnknownBench(bench.to_owned()))
    }

    pub fn test(&self, bench: &str, test: &str) -> Result<&TestComparison, ChartDataError> {
        self.bench(bench)?
            .tests
            .get(test)
            .ok_or_else(|| ChartDataError::UnknownTest {
                bench: bench.to_owned(),
                test: test.to_owned(),
            })
    }

    /// Bar chart input for one test: the reference first (if given), then every file
    /// holding a value. Series are reduced to their average.
    pub fn bar_records(
        &self,
        bench: &str,
        test: &str,
        reference: Option<&BenchmarkResults>,
    ) -> Result<Vec<MeasurementRecord>, ChartDataError> {
        let comparison = self.test(bench, test)?;
        let mut records = Vec::with_capacity(self.files.len() + 1);

        if let Some(value) = reference
            .and_then(|reference| reference.test(bench, test))
            .and_then(|result| result.value.representative())
        {
            records.push(MeasurementRecord::new(test, REFERENCE_FILE, value));
        }

        for (file, value) in self.files.iter().zip(&comparison.values) {
            match value.as_ref().and_then(TestValue::representative) {
                Some(value) => records.push(MeasurementRecord::new(test, file.as_str(), value)),
                None => debug!("No value for {bench}/{test} in {file}, skipping"),
            }
        }
        Ok(records)
    }

    /// Trend of one test over the compared files, timed by each file's `time` system info.
    pub fn trend_series(&self, bench: &str, test: &str) -> Result<SeriesBundle, ChartDataError> {
        let comparison = self.test(bench, test)?;
        let times = self.times()?;
        let meas = comparison
            .values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| {
                let value = value.as_ref()?.representative()?;
                let time = times[index].clone()?;
                Some(self.with_tooltip(TimeSeriesPoint::new(time, value), index))
            })
            .collect();
        Ok(SeriesBundle::new(test, meas))
    }

    /// Trend of a numeric system info (memory, load, ...) over the compared files.
    pub fn sysinfo_series(&self, key: &str) -> Result<SeriesBundle, ChartDataError> {
        let values = self
            .sysinfos
            .get(key)
            .ok_or_else(|| ChartDataError::MissingSysinfo(key.to_owned()))?;
        let times = self.times()?;
        let meas = values
            .iter()
            .zip(times)
            .filter_map(|(value, time)| {
                Some(TimeSeriesPoint::new(time?, numeric(value.as_ref()?)?))
            })
            .collect();
        Ok(SeriesBundle::new(key, meas))
    }

    /// System infos worth a trend chart: numeric and not constant across files.
    pub fn chartable_sysinfos(&self) -> Vec<&str> {
        self.sysinfos
            .iter()
            .filter(|(key, _)| key.as_str() != TIME_SYSINFO)
            .filter(|(_, values)| {
                values
                    .first()
                    .and_then(|value| value.as_ref())
                    .is_some_and(|value| numeric(value).is_some())
                    && values.windows(2).any(|pair| pair[0] != pair[1])
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    fn times(&self) -> Result<Vec<Option<String>>, ChartDataError> {
        let times = self
            .sysinfos
            .get(TIME_SYSINFO)
            .ok_or_else(|| ChartDataError::MissingSysinfo(TIME_SYSINFO.to_owned()))?;
        Ok(times
            .iter()
            .map(|time| match time {
                Some(Value::String(time)) => Some(time.clone()),
                _ => None,
            })
            .collect())
    }

    fn with_tooltip(&self, mut point: TimeSeriesPoint, index: usize) -> TimeSeriesPoint {
        for key in TOOLTIP_SYSINFOS {
            if let Some(Some(value)) = self.sysinfos.get(key).and_then(|values| values.get(index)) {
                point = point.with_tooltip(key, display_value(value));
            }
        }
        point
    }
}

fn incompatible(file: &str, bench: &str, test: &str, reason: &str) -> ChartDataError {
    ChartDataError::IncompatibleTest {
        file: file.to_owned(),
        bench: bench.to_owned(),
        test: test.to_owned(),
        reason: reason.to_owned(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn results(time: &str, cpu: f64, insert: Value, rows: u64) -> BenchmarkResults {
        serde_json::from_value(json!({
            "Sysinfos": { "time": time, "cpu_percent": cpu, "os": "Linux" },
            "results": {
                "sqlite": {
                    "args": { "rows": rows },
                    "data": {
                        "insert": { "type": "time_series", "unit": "s", "value": insert },
                        "select": { "type": "time", "unit": "s", "value": 0.5 }
                    }
                }
            }
        }))
        .unwrap()
    }

    fn two_files() -> Vec<(String, BenchmarkResults)> {
        vec![
            (
                "run1.json".to_owned(),
                results("2017-09-23T08:16:03.000000", 10.0, json!([1.0, 3.0]), 100),
            ),
            (
                "run2.json".to_owned(),
                results("2017-09-24T08:16:03.000000", 20.0, json!([4.0, 6.0]), 100),
            ),
        ]
    }

    #[test]
    fn test_organize_aligns_values_per_file() {
        let comparison = BenchmarkComparison::organize(&two_files()).unwrap();
        assert_eq!(comparison.files, vec!["run1.json", "run2.json"]);
        let insert = comparison.test("sqlite", "insert").unwrap();
        assert_eq!(insert.kind, TestKind::TimeSeries);
        assert_eq!(insert.values.len(), 2);
        assert!(!comparison.bench("sqlite").unwrap().args_mismatch);
    }

    #[test]
    fn test_missing_test_becomes_none() {
        let mut files = two_files();
        files[1]
            .1
            .results
            .get_mut("sqlite")
            .unwrap()
            .data
            .shift_remove("select");
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        let select = comparison.test("sqlite", "select").unwrap();
        assert_eq!(select.values[0], Some(TestValue::Single(0.5)));
        assert_eq!(select.values[1], None);
    }

    #[test]
    fn test_missing_sysinfo_becomes_none() {
        let mut files = two_files();
        files[1].1.sysinfos.shift_remove("os");
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        assert_eq!(comparison.sysinfos["os"], vec![Some(json!("Linux")), None]);
    }

    #[test]
    fn test_args_mismatch_is_flagged() {
        let mut files = two_files();
        files[1].1 = results("2017-09-24T08:16:03.000000", 20.0, json!([4.0]), 500);
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        assert!(comparison.bench("sqlite").unwrap().args_mismatch);
    }

    #[test]
    fn test_different_units_are_incompatible() {
        let mut files = two_files();
        files[1]
            .1
            .results
            .get_mut("sqlite")
            .unwrap()
            .data
            .get_mut("select")
            .unwrap()
            .unit = "ms".to_owned();
        let err = BenchmarkComparison::organize(&files).unwrap_err();
        assert!(matches!(
            err,
            ChartDataError::IncompatibleTest { ref reason, ref file, .. }
                if reason == "units" && file == "run2.json"
        ));
    }

    #[test]
    fn test_different_types_are_incompatible() {
        let mut files = two_files();
        files[1]
            .1
            .results
            .get_mut("sqlite")
            .unwrap()
            .data
            .get_mut("select")
            .unwrap()
            .kind = TestKind::Count;
        let err = BenchmarkComparison::organize(&files).unwrap_err();
        assert!(matches!(err, ChartDataError::IncompatibleTest { ref reason, .. } if reason == "types"));
    }

    #[test]
    fn test_bar_records_with_reference() {
        let comparison = BenchmarkComparison::organize(&two_files()).unwrap();
        let reference = results("2017-09-01T00:00:00", 5.0, json!([10.0]), 100);
        let records = comparison
            .bar_records("sqlite", "insert", Some(&reference))
            .unwrap();
        assert_eq!(
            records,
            vec![
                MeasurementRecord::new("insert", REFERENCE_FILE, 10.0),
                MeasurementRecord::new("insert", "run1.json", 2.0),
                MeasurementRecord::new("insert", "run2.json", 5.0),
            ]
        );
    }

    #[test]
    fn test_bar_records_skip_empty_series() {
        let mut files = two_files();
        files[0] = (
            "run1.json".to_owned(),
            results("2017-09-23T08:16:03.000000", 10.0, json!([]), 100),
        );
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        let records = comparison.bar_records("sqlite", "insert", None).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].file, "run2.json");
    }

    #[test]
    fn test_unknown_bench_and_test() {
        let comparison = BenchmarkComparison::organize(&two_files()).unwrap();
        assert!(matches!(
            comparison.bar_records("blobstore", "insert", None),
            Err(ChartDataError::UnknownBench(_))
        ));
        assert!(matches!(
            comparison.bar_records("sqlite", "delete", None),
            Err(ChartDataError::UnknownTest { .. })
        ));
    }

    #[test]
    fn test_trend_series_uses_time_and_tooltip() {
        let comparison = BenchmarkComparison::organize(&two_files()).unwrap();
        let series = comparison.trend_series("sqlite", "insert").unwrap();
        assert_eq!(series.name, "insert");
        assert_eq!(series.meas.len(), 2);
        assert_eq!(series.meas[0].time, "2017-09-23T08:16:03.000000");
        assert_eq!(series.meas[0].value, 2.0);
        assert_eq!(series.meas[1].tooltip["cpu_percent"], "20.0");
    }

    #[test]
    fn test_trend_requires_time_sysinfo() {
        let mut files = two_files();
        for (_, results) in files.iter_mut() {
            results.sysinfos.shift_remove("time");
        }
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        assert!(matches!(
            comparison.trend_series("sqlite", "insert"),
            Err(ChartDataError::MissingSysinfo(_))
        ));
    }

    #[test]
    fn test_sysinfo_series_and_chartable_keys() {
        let comparison = BenchmarkComparison::organize(&two_files()).unwrap();
        assert_eq!(comparison.chartable_sysinfos(), vec!["cpu_percent"]);
        let series = comparison.sysinfo_series("cpu_percent").unwrap();
        let values = series.meas.iter().map(|p| p.value).collect::<Vec<_>>();
        assert_eq!(values, vec![10.0, 20.0]);
    }

    #[test]
    fn test_non_finite_sysinfo_strings_are_not_numeric() {
        assert_eq!(numeric(&json!("nan")), None);
        assert_eq!(numeric(&json!("inf")), None);
        assert_eq!(numeric(&json!(" 42.5 ")), Some(42.5));

        let mut files = two_files();
        files[1].1.sysinfos.insert("cpu_percent".to_owned(), json!("NaN"));
        let comparison = BenchmarkComparison::organize(&files).unwrap();
        let series = comparison.sysinfo_series("cpu_percent").unwrap();
        assert_eq!(series.meas.len(), 1);
    }
}
