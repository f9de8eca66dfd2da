//! Business logic services.

pub mod alert_lifecycle;
pub mod assignments;
pub mod evaluator;
pub mod ingestion;
pub mod presets;
pub mod reports;
pub mod sites;
pub mod thresholds;
