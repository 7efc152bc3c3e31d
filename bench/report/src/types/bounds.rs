use super::test_kind::TestKind;
use serde::Serialize;

const FIRST_INTERVAL: f64 = 0.3;
const SECOND_INTERVAL: f64 = 0.5;

const LIGHT_RED: &str = "#e57373";
const RED: &str = "#D00000";
const LIGHT_GREEN: &str = "#d2e175";
const GREEN: &str = "#ADC902";

/// Position of a value relative to the bounds derived from a reference value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoundMark {
    Within,
    Above,
    FarAbove,
    Below,
    FarBelow,
}

impl BoundMark {
    /// Time-like tests are marked against `[0.7, 1.0] .. [1.3, 1.5] × reference`,
    /// count-like tests against `[0.5, 0.7] .. [1.0, 1.3] × reference`.
    pub fn classify(reference: f64, value: f64, kind: TestKind) -> Self {
        let (first_lower, second_lower, first_upper, second_upper) = if kind.lower_is_better() {
            (
                reference,
                reference * (1.0 - FIRST_INTERVAL),
                reference * (1.0 + FIRST_INTERVAL),
                reference * (1.0 + SECOND_INTERVAL),
            )
        } else {
            (
                reference * (1.0 - FIRST_INTERVAL),
                reference * (1.0 - SECOND_INTERVAL),
                reference,
                reference * (1.0 + FIRST_INTERVAL),
            )
        };

        if value > first_upper {
            if value > second_upper {
                BoundMark::FarAbove
            } else {
                BoundMark::Above
            }
        } else if value < first_lower {
            if value < second_lower {
                BoundMark::FarBelow
            } else {
                BoundMark::Below
            }
        } else {
            BoundMark::Within
        }
    }

    /// Highlight color; red shades for regressions, green shades for improvements.
    pub fn color(&self, kind: TestKind) -> Option<&'static str> {
        let lower_is_better = kind.lower_is_better();
        match self {
            BoundMark::Within => None,
            BoundMark::Above if lower_is_better => Some(LIGHT_RED),
            BoundMark::FarAbove if lower_is_better => Some(RED),
            BoundMark::Below if lower_is_better => Some(LIGHT_GREEN),
            BoundMark::FarBelow if lower_is_better => Some(GREEN),
            BoundMark::Above => Some(LIGHT_GREEN),
            BoundMark::FarAbove => Some(GREEN),
            BoundMark::Below => Some(LIGHT_RED),
            BoundMark::FarBelow => Some(RED),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bounds() {
        let kind = TestKind::Time;
        assert_eq!(BoundMark::classify(10.0, 10.0, kind), BoundMark::Within);
        assert_eq!(BoundMark::classify(10.0, 12.0, kind), BoundMark::Within);
        assert_eq!(BoundMark::classify(10.0, 14.0, kind), BoundMark::Above);
        assert_eq!(BoundMark::classify(10.0, 16.0, kind), BoundMark::FarAbove);
        assert_eq!(BoundMark::classify(10.0, 8.0, kind), BoundMark::Below);
        assert_eq!(BoundMark::classify(10.0, 6.0, kind), BoundMark::FarBelow);
    }

    #[test]
    fn test_count_bounds() {
        let kind = TestKind::Count;
        assert_eq!(BoundMark::classify(10.0, 8.0, kind), BoundMark::Within);
        assert_eq!(BoundMark::classify(10.0, 12.0, kind), BoundMark::Above);
        assert_eq!(BoundMark::classify(10.0, 14.0, kind), BoundMark::FarAbove);
        assert_eq!(BoundMark::classify(10.0, 6.0, kind), BoundMark::Below);
        assert_eq!(BoundMark::classify(10.0, 4.0, kind), BoundMark::FarBelow);
    }

    #[test]
    fn test_colors_depend_on_direction() {
        assert_eq!(BoundMark::FarAbove.color(TestKind::TimeSeries), Some(RED));
        assert_eq!(BoundMark::FarAbove.color(TestKind::CountSeries), Some(GREEN));
        assert_eq!(BoundMark::Below.color(TestKind::Time), Some(LIGHT_GREEN));
        assert_eq!(BoundMark::Below.color(TestKind::Count), Some(LIGHT_RED));
        assert_eq!(BoundMark::Within.color(TestKind::Time), None);
    }
}
