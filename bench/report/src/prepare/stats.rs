use crate::error::ChartDataError;
use serde::{Deserialize, Serialize};

pub fn mean(values: &[f64]) -> Result<f64, ChartDataError> {
    if values.is_empty() {
        return Err(ChartDataError::EmptyInput);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle element of the sorted values, or the average of the two middle
/// elements for an even count.
pub fn median(values: &[f64]) -> Result<f64, ChartDataError> {
    if values.is_empty() {
        return Err(ChartDataError::EmptyInput);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Smallest and largest value, used as the value axis domain.
pub fn extent(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |acc, &value| match acc {
        None => Some((value, value)),
        Some((min, max)) => Some((min.min(value), max.max(value))),
    })
}

/// Aggregations shown for a series result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesAggregates {
    pub max: f64,
    pub min: f64,
    pub sum: f64,
    pub avg: f64,
}

impl SeriesAggregates {
    pub fn from_values(values: &[f64]) -> Result<Self, ChartDataError> {
        let (min, max) = extent(values).ok_or(ChartDataError::EmptyInput)?;
        let sum = values.iter().sum::<f64>();
        Ok(Self {
            max,
            min,
            sum,
            avg: sum / values.len() as f64,
        })
    }
}
