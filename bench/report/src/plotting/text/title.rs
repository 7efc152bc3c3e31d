use crate::plotting::chart_kind::ChartKind;

/// Returns a title for a chart of one bench test
impl ChartKind {
    pub fn title(&self, bench: &str, test: &str) -> String {
        if bench.is_empty() {
            format!("{} - {}", self, test)
        } else {
            format!("{} - {}: {}", self, bench, test)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_bench() {
        assert_eq!(
            ChartKind::Comparison.title("sqlite", "insert"),
            "Comparison - sqlite: insert"
        );
    }

    #[test]
    fn test_title_without_bench() {
        assert_eq!(
            ChartKind::SystemInfo.title("", "mem_used"),
            "System Info - mem_used"
        );
    }
}
