use crate::prepare::bar::BarChartData;
use crate::prepare::buckets::AggregationMode;
use crate::prepare::trend::TrendChartData;
use crate::utils::format_value;
use human_repr::HumanCount;

impl BarChartData {
    pub fn subtext(&self, decimals: usize) -> String {
        format!(
            "{} Files  •  {} Bars  •  Mean: {}  •  Median: {}",
            self.files.len().human_count_bare(),
            self.bars.len().human_count_bare(),
            format_value(self.mean, decimals),
            format_value(self.median, decimals),
        )
    }
}

impl TrendChartData {
    pub fn subtext(&self) -> String {
        let (first, last) = self.time_extent;
        let range = match self.aggregation {
            AggregationMode::All => format!(
                "{} - {}",
                first.format("%Y-%m-%d %H:%M"),
                last.format("%Y-%m-%d %H:%M")
            ),
            AggregationMode::TimeOfDay => "Aggregated per minute of day".to_owned(),
            AggregationMode::Weekday => "Aggregated per weekday".to_owned(),
        };
        format!(
            "{}  •  {} Points  •  Mean: {:.5}  •  Median: {:.5}",
            range,
            self.points.len().human_count_bare(),
            self.mean,
            self.median,
        )
    }
}
