//! Database models and DTOs for all domain entities.

pub mod alert;
pub mod framework;
pub mod indicator;
pub mod measurement;
pub mod report;
pub mod site;
pub mod threshold;
