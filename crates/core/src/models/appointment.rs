//! Appointments and their status lifecycle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::{TimeOfDay, TimeWindow};

/// Appointment lifecycle. Every status except [`Rejected`] occupies its
/// slot for conflict purposes.
///
/// [`Rejected`]: AppointmentStatus::Rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    RescheduleProposed,
    Rejected,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::RescheduleProposed => "reschedule_proposed",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Completed => "completed",
        }
    }

    pub fn from_stored(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(AppointmentStatus::Pending),
            "confirmed" => Some(AppointmentStatus::Confirmed),
            "reschedule_proposed" => Some(AppointmentStatus::RescheduleProposed),
            "rejected" => Some(AppointmentStatus::Rejected),
            "completed" => Some(AppointmentStatus::Completed),
            _ => None,
        }
    }

    pub fn occupies_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Rejected)
    }
}

/// An occupied stretch of an employee's day, as seen by the conflict
/// check: the stored start time plus the linked service's *current*
/// duration.
///
/// `duration_minutes` is `None` when the linked service can no longer
/// be resolved; the engine skips such intervals instead of failing the
/// whole query (see DESIGN.md for the trade-off).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusyInterval {
    pub start: TimeOfDay,
    pub duration_minutes: Option<u16>,
}

impl BusyInterval {
    /// The occupied window, if the duration is known.
    pub fn window(&self) -> Option<TimeWindow> {
        let d = self.duration_minutes?;
        Some(TimeWindow::new(self.start, self.start.plus(d)))
    }
}

// ── API DTOs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub status: AppointmentStatus,
    pub proposed_date: Option<NaiveDate>,
    pub proposed_time: Option<TimeOfDay>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub salon_id: Uuid,
    pub employee_id: Uuid,
    pub service_id: Uuid,
    pub client_name: String,
    pub date: NaiveDate,
    pub time: TimeOfDay,
}

/// Staff-side status transitions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    Confirm,
    Reject,
    Complete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub action: StatusAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposeRescheduleRequest {
    pub new_date: NaiveDate,
    pub new_time: TimeOfDay,
}

/// Client's answer to a reschedule proposal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProposalResponse {
    Accept,
    Reject,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RespondToProposalRequest {
    pub response: ProposalResponse,
}

/// Compact appointment line for calendar views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: Uuid,
    pub time: TimeOfDay,
    pub client_name: String,
    pub service_name: String,
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_rejected_frees_the_slot() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::RescheduleProposed,
            AppointmentStatus::Completed,
        ] {
            assert!(status.occupies_slot(), "{status:?} should occupy");
        }
        assert!(!AppointmentStatus::Rejected.occupies_slot());
    }

    #[test]
    fn status_storage_roundtrip() {
        for status in [
            AppointmentStatus::Pending,
            AppointmentStatus::Confirmed,
            AppointmentStatus::RescheduleProposed,
            AppointmentStatus::Rejected,
            AppointmentStatus::Completed,
        ] {
            assert_eq!(AppointmentStatus::from_stored(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::from_stored("unknown"), None);
    }

    #[test]
    fn busy_interval_without_service_has_no_window() {
        let b = BusyInterval {
            start: TimeOfDay::from_hm(10, 0),
            duration_minutes: None,
        };
        assert!(b.window().is_none());
    }
}
