use crate::bounds::BoundMark;
use crate::comparison::{BenchmarkComparison, TestComparison};
use crate::prepare::stats::SeriesAggregates;
use crate::results::TestValue;
use colored::{Color, ColoredString, Colorize};
use human_repr::HumanCount;
use tracing::info;

impl BenchmarkComparison {
    /// Logs one colored line per bench test, values relative to the first file.
    pub fn print_summary(&self) {
        let tests: usize = self.benches.values().map(|bench| bench.tests.len()).sum();
        let header = format!(
            "Compared files: {}, benches: {}, tests: {}\n",
            self.files.join(", "),
            self.benches.len().human_count_bare(),
            tests.human_count_bare(),
        )
        .blue();
        info!("{}", header);

        for (bench_name, bench) in &self.benches {
            if bench.args_mismatch {
                info!("{}", format!("{bench_name}: arguments differ between files").yellow());
            }
            for (test_name, test) in &bench.tests {
                info!("{}", test.formatted_string(bench_name, test_name, &self.files));
            }
        }
    }
}

impl TestComparison {
    pub fn formatted_string(&self, bench: &str, test: &str, files: &[String]) -> ColoredString {
        let reference = self
            .values
            .first()
            .and_then(|value| value.as_ref().and_then(TestValue::representative));

        let mut worst = BoundMark::Within;
        let values = self
            .values
            .iter()
            .zip(files)
            .map(|(value, file)| {
                let Some(value) = value else {
                    return format!("{file}: -");
                };
                if let (Some(reference), Some(current)) = (reference, value.representative()) {
                    let mark = BoundMark::classify(reference, current, self.kind);
                    if severity(mark) > severity(worst) {
                        worst = mark;
                    }
                }
                format!("{file}: {}", describe(value, &self.unit))
            })
            .collect::<Vec<_>>()
            .join(", ");

        let color = if worst == BoundMark::Within {
            Color::White
        } else if regressed(worst, self.kind.lower_is_better()) {
            Color::Red
        } else {
            Color::Green
        };

        format!("{bench}/{test} ({}): {values}", self.kind).color(color)
    }
}

fn describe(value: &TestValue, unit: &str) -> String {
    match value {
        TestValue::Single(value) => format!("{value:.3} {unit}"),
        TestValue::Series(values) => match SeriesAggregates::from_values(values) {
            Ok(aggregates) => format!(
                "avg {:.3} {unit} (min {:.3}, max {:.3}, {} samples)",
                aggregates.avg,
                aggregates.min,
                aggregates.max,
                values.len()
            ),
            Err(_) => "no samples".to_owned(),
        },
    }
}

fn severity(mark: BoundMark) -> u8 {
    match mark {
        BoundMark::Within => 0,
        BoundMark::Above | BoundMark::Below => 1,
        BoundMark::FarAbove | BoundMark::FarBelow => 2,
    }
}

fn regressed(mark: BoundMark, lower_is_better: bool) -> bool {
    match mark {
        BoundMark::Within => false,
        BoundMark::Above | BoundMark::FarAbove => lower_is_better,
        BoundMark::Below | BoundMark::FarBelow => !lower_is_better,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_kind::TestKind;

    fn comparison(values: Vec<Option<TestValue>>) -> TestComparison {
        TestComparison {
            kind: TestKind::Time,
            unit: "s".to_owned(),
            values,
        }
    }

    #[test]
    fn test_formatted_string_lists_every_file() {
        let files = vec!["reference".to_owned(), "new".to_owned()];
        let test = comparison(vec![Some(TestValue::Single(1.0)), None]);
        let line = test.formatted_string("sqlite", "insert", &files);
        assert!(line.contains("sqlite/insert (time)"));
        assert!(line.contains("reference: 1.000 s"));
        assert!(line.contains("new: -"));
    }

    #[test]
    fn test_series_values_are_described_by_aggregates() {
        let description = describe(&TestValue::Series(vec![1.0, 2.0, 3.0]), "ms");
        assert_eq!(description, "avg 2.000 ms (min 1.000, max 3.000, 3 samples)");
    }

    #[test]
    fn test_slower_time_is_a_regression() {
        assert!(regressed(BoundMark::FarAbove, TestKind::Time.lower_is_better()));
        assert!(!regressed(BoundMark::FarAbove, TestKind::Count.lower_is_better()));
        assert!(!regressed(BoundMark::Within, true));
    }
}
