use super::test_kind::TestKind;
use crate::error::ChartDataError;
use crate::prepare::stats::mean;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Results file as written by the benchmark runner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchmarkResults {
    #[serde(rename = "Sysinfos", default)]
    pub sysinfos: IndexMap<String, Value>,
    #[serde(default)]
    pub results: IndexMap<String, BenchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BenchResult {
    #[serde(default)]
    pub args: IndexMap<String, Value>,
    #[serde(default)]
    pub data: IndexMap<String, TestResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestResult {
    #[serde(rename = "type")]
    pub kind: TestKind,
    #[serde(default)]
    pub unit: String,
    pub value: TestValue,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TestValue {
    Single(f64),
    Series(Vec<f64>),
}

impl TestValue {
    /// Value drawn for a test: the number itself, or the average of a series.
    pub fn representative(&self) -> Option<f64> {
        match self {
            TestValue::Single(value) => Some(*value),
            TestValue::Series(values) => mean(values).ok(),
        }
    }
}

impl BenchmarkResults {
    pub fn test(&self, bench: &str, test: &str) -> Option<&TestResult> {
        self.results.get(bench)?.data.get(test)
    }
}

pub fn load_results(path: &Path) -> Result<BenchmarkResults, ChartDataError> {
    let content =
        std::fs::read_to_string(path).map_err(|error| ChartDataError::CannotLoadResults {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;
    let results: BenchmarkResults =
        serde_json::from_str(&content).map_err(|error| ChartDataError::CannotLoadResults {
            path: path.display().to_string(),
            reason: error.to_string(),
        })?;
    debug!(
        "Loaded {} benches from {}",
        results.results.len(),
        path.display()
    );
    Ok(results)
}

/// Loads every `*.json` file of a directory, ordered by file name.
pub fn load_results_dir(path: &Path) -> Result<Vec<(String, BenchmarkResults)>, ChartDataError> {
    let entries = std::fs::read_dir(path).map_err(|error| ChartDataError::CannotLoadResults {
        path: path.display().to_string(),
        reason: error.to_string(),
    })?;

    let mut files = entries
        .filter_map(|entry| entry.ok().map(|entry| entry.path()))
        .filter(|file| file.is_file() && file.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    files.sort();

    let mut loaded = Vec::with_capacity(files.len());
    for file in files {
        let name = file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.display().to_string());
        loaded.push((name, load_results(&file)?));
    }
    info!(
        "Number of loaded json files in {}: {}",
        path.display(),
        loaded.len()
    );
    Ok(loaded)
}
