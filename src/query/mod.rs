pub mod engine;
pub mod analytics;

pub use engine::QueryEngine;
pub use analytics::{Analytics, CollectionReport, YearTrend};
