//! Data-center site model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// A monitored data-center site. Tenant scoping lives here: every other
/// entity is scoped through its owning site's `company_id`.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Site {
    pub site_id: Uuid,
    pub name: String,
    pub country: String,
    pub timezone: String,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_at_excluded_from_listing() {
        let site = Site {
            site_id: Uuid::nil(),
            name: "DC-SG3".to_string(),
            country: "SG".to_string(),
            timezone: "Asia/Singapore".to_string(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&site).unwrap();
        assert_eq!(json["name"], "DC-SG3");
        assert!(json.get("created_at").is_none());
    }
}
