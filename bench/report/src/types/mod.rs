pub mod bounds;
pub mod comparison;
pub mod record;
pub mod results;
pub mod test_kind;
pub mod time_series;
