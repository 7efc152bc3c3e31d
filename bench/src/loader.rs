use benchviz_report::error::ChartDataError;
use benchviz_report::results::{load_results, load_results_dir, BenchmarkResults};
use std::path::{Path, PathBuf};
use tracing::info;

/// Loads every input in command line order; directories expand to their `*.json` files.
pub fn load_inputs(inputs: &[PathBuf]) -> Result<Vec<(String, BenchmarkResults)>, ChartDataError> {
    let mut loaded = Vec::new();
    for input in inputs {
        if input.is_dir() {
            loaded.extend(load_results_dir(input)?);
        } else {
            loaded.push((file_label(input), load_results(input)?));
        }
    }
    if loaded.is_empty() {
        return Err(ChartDataError::EmptyInput);
    }
    info!("Loaded {} results files", loaded.len());
    Ok(loaded)
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
