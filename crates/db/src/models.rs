use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSalon {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub open_from: String,
    pub open_to: String,
    pub margin_type: String,
    pub margin_value: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbService {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub name: String,
    pub duration_minutes: i32,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbEmployee {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub display_name: String,
    pub password_hash: String,
    pub work_days: String,
    pub breaks: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleOverride {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub is_working: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: String,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Occupied-slot row: stored start time plus the linked service's
/// current duration (NULL when the service row is gone).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBusySlot {
    pub time: String,
    pub duration_minutes: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub appointment_id: Uuid,
    pub employee_id: Uuid,
    pub rating: i16,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// AVG/COUNT aggregate for an employee's reviews.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReviewAggregate {
    pub avg_rating: Option<f64>,
    pub reviews_count: i64,
}

/// One completed appointment with its service price, for the revenue
/// report. Price is NULL when the service row no longer resolves.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCompletedAppointment {
    pub employee_id: Uuid,
    pub display_name: String,
    pub price: Option<f64>,
}
