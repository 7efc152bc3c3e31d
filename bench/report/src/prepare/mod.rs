pub mod bar;
pub mod buckets;
pub mod ordering;
pub mod stats;
pub mod trend;
