use crate::error::ChartDataError;
use crate::prepare::buckets::{AggregationMode, MergePolicy};
use derive_more::derive::Display;
use serde::{Deserialize, Serialize};
use tracing::error;

const MAX_LABEL_DECIMALS: usize = 12;

/// d3 category20 palette
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#1f77b4", "#aec7e8", "#ff7f0e", "#ffbb78", "#2ca02c", "#98df8a", "#d62728", "#ff9896",
    "#9467bd", "#c5b0d5", "#8c564b", "#c49c94", "#e377c2", "#f7b6d2", "#7f7f7f", "#c7c7c7",
    "#bcbd22", "#dbdb8d", "#17becf", "#9edae5",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChartConfig {
    pub width: u64,
    pub height: u64,
    pub dark: bool,
    pub palette: Vec<String>,
    pub mean_color: String,
    pub median_color: String,
    pub bar: BarChartConfig,
    pub trend: TrendChartConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Margins {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, Default)]
pub enum LegendOrient {
    #[default]
    #[display("vertical")]
    #[serde(rename = "vertical")]
    Vertical,
    #[display("horizontal")]
    #[serde(rename = "horizontal")]
    Horizontal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LegendLayout {
    pub show: bool,
    pub orient: LegendOrient,
    pub right: String,
    pub top: String,
}

/// Which record field the category axis of a bar chart is built from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize, Default)]
pub enum CategoryAxis {
    #[default]
    #[display("file")]
    #[serde(rename = "file")]
    File,
    #[display("name")]
    #[serde(rename = "name")]
    Name,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarChartConfig {
    pub margins: Margins,
    pub legend: LegendLayout,
    pub category_axis: CategoryAxis,
    pub label_decimals: usize,
    pub value_axis_name: String,
    pub category_axis_name: String,
    pub show_statistics: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrendChartConfig {
    pub margins: Margins,
    pub legend: LegendLayout,
    pub aggregation: AggregationMode,
    pub merge_policy: MergePolicy,
    pub time_axis_format: String,
    pub value_axis_name: String,
    pub time_axis_name: String,
    pub symbol_size: f64,
    pub show_statistics: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960,
            height: 500,
            dark: false,
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            mean_color: "red".to_owned(),
            median_color: "orange".to_owned(),
            bar: BarChartConfig::default(),
            trend: TrendChartConfig::default(),
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Margins::new(20, 30, 40, 100)
    }
}

impl Margins {
    pub fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self {
            top: top.to_string(),
            right: right.to_string(),
            bottom: bottom.to_string(),
            left: left.to_string(),
        }
    }
}

impl Default for LegendLayout {
    fn default() -> Self {
        Self {
            show: true,
            orient: LegendOrient::Vertical,
            right: "2%".to_owned(),
            top: "middle".to_owned(),
        }
    }
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::new(20, 200, 40, 100),
            legend: LegendLayout::default(),
            category_axis: CategoryAxis::File,
            label_decimals: 5,
            value_axis_name: "Values".to_owned(),
            category_axis_name: "Files".to_owned(),
            show_statistics: true,
        }
    }
}

impl Default for TrendChartConfig {
    fn default() -> Self {
        Self {
            margins: Margins::new(20, 100, 40, 100),
            legend: LegendLayout {
                top: "top".to_owned(),
                ..LegendLayout::default()
            },
            aggregation: AggregationMode::All,
            merge_policy: MergePolicy::PairwiseAverage,
            time_axis_format: "{HH}h".to_owned(),
            value_axis_name: "Measurements".to_owned(),
            time_axis_name: "Time".to_owned(),
            symbol_size: 10.0,
            show_statistics: true,
        }
    }
}

impl TrendChartConfig {
    /// Axis label template matching the aggregation mode.
    pub fn time_axis_format_for_mode(&self) -> &str {
        match self.aggregation {
            AggregationMode::All => &self.time_axis_format,
            AggregationMode::TimeOfDay => "{HH}:{mm}",
            AggregationMode::Weekday => "{ee}",
        }
    }
}

impl ChartConfig {
    pub fn validate(&self) -> Result<(), ChartDataError> {
        if self.width == 0 || self.height == 0 {
            error!("Chart configuration -> width and height must be greater than 0.");
            return Err(ChartDataError::InvalidConfiguration(format!(
                "chart size {}x{}",
                self.width, self.height
            )));
        }

        if self.palette.is_empty() {
            error!("Chart configuration -> palette cannot be empty.");
            return Err(ChartDataError::InvalidConfiguration(
                "empty palette".to_owned(),
            ));
        }

        if self.bar.label_decimals > MAX_LABEL_DECIMALS {
            error!(
                "Chart configuration -> label decimals cannot be greater than: {}.",
                MAX_LABEL_DECIMALS
            );
            return Err(ChartDataError::InvalidConfiguration(format!(
                "label decimals {}",
                self.bar.label_decimals
            )));
        }

        if self.trend.symbol_size <= 0.0 {
            error!("Chart configuration -> trend symbol size must be positive.");
            return Err(ChartDataError::InvalidConfiguration(format!(
                "symbol size {}",
                self.trend.symbol_size
            )));
        }

        Ok(())
    }

    /// Palette color, wrapping around. An empty palette falls back to the default one.
    pub fn color(&self, index: usize) -> &str {
        if self.palette.is_empty() {
            return DEFAULT_PALETTE[index % DEFAULT_PALETTE.len()];
        }
        &self.palette[index % self.palette.len()]
    }
}
