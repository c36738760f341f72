use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::TimeOfDay;

/// How a salon takes its cut of a completed appointment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginType {
    /// `margin_value` percent of the service price.
    Percent,
    /// Flat `margin_value` per appointment.
    Flat,
}

impl MarginType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginType::Percent => "percent",
            MarginType::Flat => "flat",
        }
    }

    /// Unknown stored values fall back to percent, the original default.
    pub fn from_stored(s: &str) -> Self {
        match s {
            "flat" => MarginType::Flat,
            _ => MarginType::Percent,
        }
    }

    /// The salon's cut of a single service price.
    pub fn cut(&self, price: f64, margin_value: f64) -> f64 {
        match self {
            MarginType::Percent => price * (margin_value / 100.0),
            MarginType::Flat => margin_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Salon {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub open_from: TimeOfDay,
    pub open_to: TimeOfDay,
    pub margin_type: MarginType,
    pub margin_value: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSalonRequest {
    pub name: String,
    pub address: String,
    pub open_from: TimeOfDay,
    pub open_to: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalonHoursRequest {
    pub open_from: TimeOfDay,
    pub open_to: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSalonMarginRequest {
    pub margin_type: MarginType,
    pub margin_value: f64,
}

/// Salon listing entry with its review aggregate, for the booking flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalonListEntry {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub avg_rating: f64,
    pub reviews_count: i64,
}

/// Manager-facing revenue report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueReportResponse {
    pub salon_id: Uuid,
    /// Salon's total cut across completed appointments.
    pub salon_net_profit: f64,
    pub staff: Vec<StaffReportEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffReportEntry {
    pub employee_id: Uuid,
    pub display_name: String,
    /// Total price of completed appointments.
    pub gross: f64,
    /// Gross minus the salon's cut, floored at zero per appointment.
    pub net: f64,
    pub completed_count: i64,
    pub avg_rating: f64,
    pub reviews_count: i64,
}
