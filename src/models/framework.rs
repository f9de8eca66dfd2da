//! Framework catalog and per-site framework assignments.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::indicator::PueMode;

/// Compliance framework catalog entry. Static reference data seeded by
/// migration, never created through this service.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Framework {
    pub framework_code: String,
    pub name: String,
    pub version: String,
    pub jurisdiction: String,
    pub notes: Option<String>,
    pub supports_load_aware: bool,
    pub default_pue_mode: PueMode,
}

/// Catalog listing response.
#[derive(Debug, Serialize)]
pub struct FrameworksResponse {
    pub frameworks: Vec<Framework>,
}

/// One framework assigned to a site with an explicit precedence.
///
/// Lower precedence number = higher priority. Active assignments for a
/// site carry distinct precedence values; read ordering additionally
/// tiebreaks on `framework_code` ascending.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct SiteFrameworkAssignment {
    pub framework_code: String,
    pub framework_name: String,
    pub is_active: bool,
    pub precedence: i32,
}

/// Assignments for a site, ordered by ascending precedence.
#[derive(Debug, Serialize)]
pub struct SiteFrameworksResponse {
    pub site_id: Uuid,
    pub frameworks: Vec<SiteFrameworkAssignment>,
}

/// Full-replace write of a site's assignments.
#[derive(Debug, Deserialize)]
pub struct SetAssignmentsRequest {
    pub site_id: Uuid,
    pub assignments: Vec<AssignmentEntry>,
}

/// One entry in an assignment replace request.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentEntry {
    pub framework_code: String,
    pub is_active: bool,
    pub precedence: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignment_wire_shape() {
        let a = SiteFrameworkAssignment {
            framework_code: "GMDC_SG_2024".to_string(),
            framework_name: "GMDC Singapore 2024".to_string(),
            is_active: true,
            precedence: 10,
        };
        let json = serde_json::to_value(&a).unwrap();
        assert_eq!(json["framework_code"], "GMDC_SG_2024");
        assert_eq!(json["is_active"], true);
        assert_eq!(json["precedence"], 10);
    }

    #[test]
    fn set_assignments_request_deserialization() {
        let json = r#"{
            "site_id": "6b7d8f1a-51e0-4a8c-9b08-6b2a9f0f0a10",
            "assignments": [
                {"framework_code": "GMDC_SG_2024", "is_active": true, "precedence": 10},
                {"framework_code": "CORP_DEFAULT", "is_active": false, "precedence": 20}
            ]
        }"#;
        let req: SetAssignmentsRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.assignments.len(), 2);
        assert_eq!(req.assignments[1].framework_code, "CORP_DEFAULT");
        assert!(!req.assignments[1].is_active);
    }
}
