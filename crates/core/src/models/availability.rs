//! Response shapes for availability queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::TimeOfDay;

/// Bookable start times for one (employee, date, service) triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotsResponse {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    /// Ascending, aligned to the slot granularity.
    pub slots: Vec<TimeOfDay>,
    /// Populated only when `slots` is empty: the first later date within
    /// the search horizon that has at least one opening, if any.
    pub next_available_date: Option<NaiveDate>,
}

/// One staff member on the booking flow's employee picker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAvailabilityEntry {
    pub employee_id: Uuid,
    pub display_name: String,
    /// Whether the employee works on the requested date at all; says
    /// nothing about free capacity.
    pub is_working: bool,
    /// First later working date, filled in when `is_working` is false.
    pub next_working_date: Option<NaiveDate>,
    pub avg_rating: f64,
    pub reviews_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffAvailabilityResponse {
    pub salon_id: Uuid,
    pub date: NaiveDate,
    pub staff: Vec<StaffAvailabilityEntry>,
}
