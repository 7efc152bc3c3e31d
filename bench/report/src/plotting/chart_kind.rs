use derive_more::derive::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ChartKind {
    #[display("Comparison")]
    Comparison,
    #[display("Trend")]
    Trend,
    #[display("System Info")]
    SystemInfo,
}

impl ChartKind {
    pub fn file_prefix(&self) -> &'static str {
        match self {
            ChartKind::Comparison => "comparison",
            ChartKind::Trend => "trend",
            ChartKind::SystemInfo => "sysinfo",
        }
    }
}
