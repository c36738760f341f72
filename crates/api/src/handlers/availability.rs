//! # Availability Handlers
//!
//! Handlers for the booking flow's read side: the slot list for one
//! employee and date, and the staff picker for a salon.
//!
//! Both are pure reads. The slot list is advisory — the booking handler
//! re-validates inside its own transaction — so these endpoints never
//! take locks, and a stale answer costs nothing worse than a 409 at
//! booking time.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use std::sync::Arc;
use salonsync_core::{
    errors::SalonError,
    models::availability::{SlotsResponse, StaffAvailabilityEntry, StaffAvailabilityResponse},
    scheduling::Availability,
};
use salonsync_db::ledger::PgBookingLedger;
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

/// Query parameters for the slot list endpoint
#[derive(Debug, Deserialize)]
pub struct SlotsQuery {
    pub salon_id: Uuid,
    pub employee_id: Uuid,
    /// The service decides the duration each slot must fit.
    pub service_id: Uuid,
    pub date: NaiveDate,
}

/// Lists bookable start times for an employee on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/slots?salon_id=...&employee_id=...&service_id=...&date=2025-06-02
/// ```
///
/// When the requested day has no openings, the response carries the
/// first later date within the search horizon that does, so the client
/// can offer "next available" without a second round trip.
#[axum::debug_handler]
pub async fn get_slots(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<SlotsQuery>,
) -> Result<Json<SlotsResponse>, AppError> {
    let service =
        salonsync_db::repositories::service::get_service_by_id(&state.db_pool, query.service_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Service with ID {} not found", query.service_id))
            })?;

    if service.salon_id != query.salon_id {
        return Err(AppError(SalonError::Validation(
            "Service does not belong to this salon".to_string(),
        )));
    }

    let employee =
        salonsync_db::repositories::employee::get_employee_by_id(&state.db_pool, query.employee_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Employee with ID {} not found", query.employee_id))
            })?;

    if employee.salon_id != query.salon_id {
        return Err(AppError(SalonError::Validation(
            "Employee does not belong to this salon".to_string(),
        )));
    }

    let duration = convert::service_duration(service.duration_minutes);
    let ledger = PgBookingLedger::new(state.db_pool.clone());
    let availability = Availability::new(&ledger);
    let now = Local::now().naive_local();

    let slots = availability
        .slots_for_date(query.salon_id, query.employee_id, duration, query.date, now)
        .await?;

    let next_available_date = if slots.is_empty() {
        availability
            .next_open_date(query.salon_id, query.employee_id, duration, query.date, now)
            .await?
    } else {
        None
    };

    Ok(Json(SlotsResponse {
        employee_id: query.employee_id,
        date: query.date,
        slots,
        next_available_date,
    }))
}

/// Query parameters for the staff picker endpoint
#[derive(Debug, Deserialize)]
pub struct StaffQuery {
    pub salon_id: Uuid,
    pub date: NaiveDate,
}

/// Lists a salon's staff with their availability on a date
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/staff?salon_id=...&date=2025-06-02
/// ```
///
/// For each employee: whether they work that date at all (schedule
/// only, not capacity), the next working date when they don't, and
/// their review aggregate.
#[axum::debug_handler]
pub async fn get_staff_availability(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<StaffQuery>,
) -> Result<Json<StaffAvailabilityResponse>, AppError> {
    let salon = salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, query.salon_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Salon with ID {} not found", query.salon_id))
        })?;

    let employees =
        salonsync_db::repositories::employee::list_employees_by_salon(&state.db_pool, salon.id)
            .await
            .map_err(SalonError::Database)?;

    let ledger = PgBookingLedger::new(state.db_pool.clone());
    let availability = Availability::new(&ledger);

    let mut staff = Vec::with_capacity(employees.len());
    for employee in employees {
        let schedule = availability
            .day_schedule(salon.id, employee.id, query.date)
            .await?;
        let is_working = schedule.is_working();

        let next_working_date = if is_working {
            None
        } else {
            availability
                .next_working_date(salon.id, employee.id, query.date)
                .await?
        };

        let aggregate = salonsync_db::repositories::review::aggregate_for_employee(
            &state.db_pool,
            employee.id,
        )
        .await
        .map_err(SalonError::Database)?;

        staff.push(StaffAvailabilityEntry {
            employee_id: employee.id,
            display_name: employee.display_name,
            is_working,
            next_working_date,
            avg_rating: aggregate.avg_rating.unwrap_or(0.0),
            reviews_count: aggregate.reviews_count,
        });
    }

    Ok(Json(StaffAvailabilityResponse {
        salon_id: salon.id,
        date: query.date,
        staff,
    }))
}
