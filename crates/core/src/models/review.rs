use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub employee_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    /// 1–5.
    pub rating: i16,
    pub comment: Option<String>,
}

/// Per-employee review aggregate shown on the staff picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewAggregate {
    pub avg_rating: f64,
    pub reviews_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeReviewsResponse {
    pub employee_id: Uuid,
    pub avg_rating: f64,
    pub reviews_count: i64,
    pub reviews: Vec<Review>,
}
