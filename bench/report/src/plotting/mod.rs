pub mod bar_chart;
pub mod chart;
pub mod chart_kind;
pub mod trend_chart;
pub mod text {
    pub mod subtext;
    pub mod title;
}
