use super::ordering::{distinct_files, distinct_names, sort_by_name_then_file};
use super::stats::{extent, mean, median};
use crate::config::{BarChartConfig, CategoryAxis};
use crate::error::ChartDataError;
use crate::record::MeasurementRecord;
use crate::utils::format_value;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub name: String,
    pub file: String,
    pub value: f64,
    pub label: String,
    /// `position mod files`, the legacy per-bar coloring. `create_bar_chart`
    /// draws one series per file and colors it by the file's legend position
    /// instead, so a bar always matches its legend swatch.
    pub color_index: usize,
}

impl Bar {
    /// Value as shown by the label, so a drawn bar and its text agree.
    pub fn labelled_value(&self) -> f64 {
        self.label.parse().unwrap_or(self.value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatisticKind {
    Median,
    Mean,
}

/// One legend row: either a results file (colored swatch) or a statistic overlay (dashed line).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum LegendEntry {
    File { name: String, color_index: usize },
    Statistic { kind: StatisticKind },
}

impl LegendEntry {
    pub fn label(&self) -> &str {
        match self {
            LegendEntry::File { name, .. } => name,
            LegendEntry::Statistic {
                kind: StatisticKind::Median,
            } => "Median",
            LegendEntry::Statistic {
                kind: StatisticKind::Mean,
            } => "Mean",
        }
    }
}

/// Geometry inputs of a bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChartData {
    pub bars: Vec<Bar>,
    pub categories: Vec<String>,
    pub files: Vec<String>,
    pub names: Vec<String>,
    pub legend: Vec<LegendEntry>,
    pub mean: f64,
    pub median: f64,
    pub extent: (f64, f64),
}

impl BarChartData {
    pub fn prepare(
        records: &[MeasurementRecord],
        config: &BarChartConfig,
    ) -> Result<Self, ChartDataError> {
        if records.is_empty() {
            return Err(ChartDataError::EmptyInput);
        }
        records.iter().try_for_each(MeasurementRecord::validate)?;

        let sorted = sort_by_name_then_file(records);
        let files = distinct_files(&sorted);
        let names = distinct_names(&sorted);
        let num_files = files.len();

        let bars = sorted
            .into_iter()
            .enumerate()
            .map(|(index, record)| Bar {
                label: format_value(record.value, config.label_decimals),
                color_index: index % num_files,
                name: record.name,
                file: record.file,
                value: record.value,
            })
            .collect::<Vec<_>>();

        let values = bars.iter().map(|bar| bar.value).collect::<Vec<_>>();
        let mean = mean(&values)?;
        let median = median(&values)?;
        let extent = extent(&values).ok_or(ChartDataError::EmptyInput)?;

        let categories = match config.category_axis {
            CategoryAxis::File => files.clone(),
            CategoryAxis::Name => names.clone(),
        };

        let mut legend = files
            .iter()
            .enumerate()
            .map(|(color_index, name)| LegendEntry::File {
                name: name.clone(),
                color_index,
            })
            .collect::<Vec<_>>();
        if config.show_statistics {
            legend.push(LegendEntry::Statistic {
                kind: StatisticKind::Median,
            });
            legend.push(LegendEntry::Statistic {
                kind: StatisticKind::Mean,
            });
        }

        debug!(
            "Prepared bar chart: {} bars, {} files, mean: {}, median: {}",
            bars.len(),
            num_files,
            mean,
            median
        );

        Ok(Self {
            bars,
            categories,
            files,
            names,
            legend,
            mean,
            median,
            extent,
        })
    }

    /// Bar of `name` measured in `file`, if present.
    pub fn bar(&self, name: &str, file: &str) -> Option<&Bar> {
        self.bars
            .iter()
            .find(|bar| bar.name == name && bar.file == file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_to_end_two_records() {
        let records = vec![
            MeasurementRecord::new("A", "f1", 1.0),
            MeasurementRecord::new("B", "f1", 3.0),
        ];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        let order = data.bars.iter().map(|b| b.name.as_str()).collect::<Vec<_>>();
        assert_eq!(order, vec!["B", "A"]);
        assert_eq!(data.files, vec!["f1"]);
        assert_eq!(data.mean, 2.0);
        assert_eq!(data.median, 2.0);
        assert_eq!(data.extent, (1.0, 3.0));
    }

    #[test]
    fn test_labels_use_fixed_decimals() {
        let records = vec![MeasurementRecord::new("insert", "run1", 0.123456789)];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        assert_eq!(data.bars[0].label, "0.12346");
    }

    #[test]
    fn test_color_index_cycles_over_files() {
        let records = vec![
            MeasurementRecord::new("insert", "run1", 1.0),
            MeasurementRecord::new("insert", "run2", 2.0),
            MeasurementRecord::new("select", "run1", 3.0),
            MeasurementRecord::new("select", "run2", 4.0),
        ];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        let colors = data
            .bars
            .iter()
            .map(|b| (b.file.as_str(), b.color_index))
            .collect::<Vec<_>>();
        assert_eq!(
            colors,
            vec![("run1", 0), ("run2", 1), ("run1", 0), ("run2", 1)]
        );
    }

    #[test]
    fn test_categories_follow_config() {
        let records = vec![
            MeasurementRecord::new("insert", "run1", 1.0),
            MeasurementRecord::new("select", "run1", 2.0),
        ];
        let by_file = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        assert_eq!(by_file.categories, vec!["run1"]);

        let config = BarChartConfig {
            category_axis: CategoryAxis::Name,
            ..BarChartConfig::default()
        };
        let by_name = BarChartData::prepare(&records, &config).unwrap();
        assert_eq!(by_name.categories, vec!["select", "insert"]);
    }

    #[test]
    fn test_legend_lists_files_then_statistics() {
        let records = vec![
            MeasurementRecord::new("insert", "reference", 1.0),
            MeasurementRecord::new("insert", "run1", 2.0),
        ];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        let labels = data.legend.iter().map(LegendEntry::label).collect::<Vec<_>>();
        assert_eq!(labels, vec!["reference", "run1", "Median", "Mean"]);
    }

    #[test]
    fn test_legend_without_statistics() {
        let records = vec![MeasurementRecord::new("insert", "run1", 2.0)];
        let config = BarChartConfig {
            show_statistics: false,
            ..BarChartConfig::default()
        };
        let data = BarChartData::prepare(&records, &config).unwrap();
        assert_eq!(data.legend.len(), 1);
    }

    #[test]
    fn test_empty_records_fail() {
        let err = BarChartData::prepare(&[], &BarChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartDataError::EmptyInput));
    }

    #[test]
    fn test_nan_record_is_rejected() {
        let records = vec![
            MeasurementRecord::new("insert", "run1", 1.0),
            MeasurementRecord::new("insert", "run2", f64::NAN),
        ];
        let err = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap_err();
        assert!(matches!(err, ChartDataError::NonFiniteValue { .. }));
    }

    #[test]
    fn test_bar_lookup() {
        let records = vec![MeasurementRecord::new("insert", "run1", 2.123456789)];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        let bar = data.bar("insert", "run1").unwrap();
        assert_eq!(bar.value, 2.123456789);
        assert_eq!(bar.labelled_value(), 2.12346);
        assert!(data.bar("insert", "run2").is_none());
    }

    #[test]
    fn test_legacy_color_index_differs_from_file_position() {
        let records = vec![
            MeasurementRecord::new("B", "f1", 2.0),
            MeasurementRecord::new("A", "f1", 1.0),
            MeasurementRecord::new("A", "f2", 3.0),
        ];
        let data = BarChartData::prepare(&records, &BarChartConfig::default()).unwrap();
        let bar = data.bar("A", "f1").unwrap();
        assert_eq!(bar.color_index, 1);
        assert_eq!(data.files, vec!["f1", "f2"]);
    }
}
