//! Row-to-DTO conversions shared by the handlers.
//!
//! Stored text columns (times, status, work day CSV) are parsed here with
//! the same tolerance the scheduling core applies: a value that doesn't
//! parse degrades the field instead of failing the whole response.

use salonsync_core::models::appointment::{Appointment, AppointmentStatus};
use salonsync_core::models::employee::{Employee, WeeklyPattern};
use salonsync_core::models::salon::{MarginType, Salon};
use salonsync_core::models::service::Service;
use salonsync_core::models::time::TimeOfDay;
use salonsync_db::models::{DbAppointment, DbEmployee, DbSalon, DbService};

/// Parse a stored "HH:MM" column, degrading to midnight.
pub(crate) fn stored_time(s: &str) -> TimeOfDay {
    s.parse().unwrap_or(TimeOfDay::from_minutes(0))
}

pub(crate) fn salon_dto(row: DbSalon) -> Salon {
    Salon {
        id: row.id,
        name: row.name,
        address: row.address,
        open_from: stored_time(&row.open_from),
        open_to: stored_time(&row.open_to),
        margin_type: MarginType::from_stored(&row.margin_type),
        margin_value: row.margin_value,
        created_at: row.created_at,
    }
}

pub(crate) fn service_dto(row: DbService) -> Service {
    Service {
        id: row.id,
        salon_id: row.salon_id,
        name: row.name,
        duration_minutes: service_duration(row.duration_minutes),
        price: row.price,
        created_at: row.created_at,
    }
}

/// The schema enforces a positive duration; clamp anyway so a manual
/// edit can't wrap on the i32 -> u16 narrowing.
pub(crate) fn service_duration(stored: i32) -> u16 {
    stored.clamp(0, u16::MAX as i32) as u16
}

pub(crate) fn employee_dto(row: DbEmployee) -> Employee {
    let pattern = WeeklyPattern::from_stored(&row.work_days, &row.breaks.to_string());
    Employee {
        id: row.id,
        salon_id: row.salon_id,
        display_name: row.display_name,
        work_days: pattern.working_days().to_vec(),
        created_at: row.created_at,
    }
}

pub(crate) fn appointment_dto(row: DbAppointment) -> Appointment {
    Appointment {
        id: row.id,
        salon_id: row.salon_id,
        employee_id: row.employee_id,
        service_id: row.service_id,
        client_name: row.client_name,
        date: row.date,
        time: stored_time(&row.time),
        // Unknown stored statuses fall back to pending, which still
        // occupies the slot.
        status: AppointmentStatus::from_stored(&row.status).unwrap_or(AppointmentStatus::Pending),
        proposed_date: row.proposed_date,
        proposed_time: row.proposed_time.as_deref().and_then(|t| t.parse().ok()),
        created_at: row.created_at,
    }
}
