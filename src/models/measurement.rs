//! Measurement ingestion request and acknowledgement shapes.
//!
//! Stored measurements are append-only and never read back whole; the
//! reporting aggregator projects the columns it needs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::indicator::Indicator;

/// One indicator reading inside an ingestion batch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MeasurementReading {
    pub indicator: Indicator,
    pub value: f64,
}

/// Inbound measurement batch: several indicator readings sharing one
/// timestamp and IT-load percentage.
#[derive(Debug, Deserialize, Validate)]
pub struct MetricsIngestRequest {
    pub site_id: Uuid,
    /// Defaults to server time when absent.
    pub measured_at: Option<DateTime<Utc>>,
    #[validate(range(min = 0, max = 100, message = "it_load_pct must be 0-100"))]
    pub it_load_pct: Option<i32>,
    #[validate(length(min = 1, message = "measurements[] required"))]
    pub measurements: Vec<MeasurementReading>,
}

/// Ingestion acknowledgement.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub site_id: Uuid,
    pub ingested: usize,
}
