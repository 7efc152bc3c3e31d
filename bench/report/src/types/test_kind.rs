use derive_more::derive::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize, Default)]
pub enum TestKind {
    #[default]
    #[display("time")]
    #[serde(rename = "time")]
    Time,
    #[display("time_series")]
    #[serde(rename = "time_series")]
    TimeSeries,
    #[display("count")]
    #[serde(rename = "count")]
    Count,
    #[display("count_series")]
    #[serde(rename = "count_series")]
    CountSeries,
}

impl TestKind {
    /// Durations improve when they shrink, counts when they grow.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, TestKind::Time | TestKind::TimeSeries)
    }
}
