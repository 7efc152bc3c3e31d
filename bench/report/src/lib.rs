pub mod config;
pub mod error;
mod plotting;
pub mod prepare;
mod prints;
mod types;
pub mod utils;

pub use plotting::bar_chart::create_bar_chart;
pub use plotting::chart_kind::ChartKind;
pub use plotting::trend_chart::create_trend_chart;
pub use types::*;
