use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartDataError {
    #[error("Cannot compute statistics over empty input")]
    EmptyInput,
    #[error("Non-finite value {value} for test '{name}' in file '{file}'")]
    NonFiniteValue {
        name: String,
        file: String,
        value: f64,
    },
    #[error("Non-finite value {value} at {time} in series '{series}'")]
    NonFinitePoint {
        series: String,
        time: String,
        value: f64,
    },
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
    #[error("Can not compare given benchmarks. Different test {reason} found in {file} - {bench} - {test}")]
    IncompatibleTest {
        file: String,
        bench: String,
        test: String,
        reason: String,
    },
    #[error("Unknown bench: {0}")]
    UnknownBench(String),
    #[error("Unknown test '{test}' in bench '{bench}'")]
    UnknownTest { bench: String, test: String },
    #[error("Missing system info: {0}")]
    MissingSysinfo(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Cannot load benchmark results from '{path}': {reason}")]
    CannotLoadResults { path: String, reason: String },
    #[error("Failed to render chart: {0}")]
    ChartRender(String),
}
