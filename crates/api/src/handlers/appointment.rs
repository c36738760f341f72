//! # Appointment Handlers
//!
//! The booking write path and the appointment lifecycle: staff
//! confirm/reject/complete, the reschedule proposal round trip, and
//! client-side listing and cancellation.
//!
//! Booking checks the requested time against the freshly computed slot
//! list, then hands off to the transactional write path, which re-runs
//! the overlap check under a per-(employee, date) lock. Losing that
//! race is a 409, never a double booking.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde::Deserialize;
use std::sync::Arc;
use salonsync_core::{
    errors::SalonError,
    models::appointment::{
        Appointment, AppointmentStatus, BookAppointmentRequest, ProposalResponse,
        ProposeRescheduleRequest, RespondToProposalRequest, StatusAction, UpdateStatusRequest,
    },
    scheduling::Availability,
};
use salonsync_db::ledger::PgBookingLedger;
use salonsync_db::repositories::appointment::BookingOutcome;
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

/// Books an appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// The requested time must be one of the currently bookable slots for
/// the employee, date, and service. A slot lost to a concurrent booking
/// between the availability query and this request returns 409.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<BookAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    if payload.client_name.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Client name must not be empty".to_string(),
        )));
    }

    let service =
        salonsync_db::repositories::service::get_service_by_id(&state.db_pool, payload.service_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Service with ID {} not found", payload.service_id))
            })?;

    if service.salon_id != payload.salon_id {
        return Err(AppError(SalonError::Validation(
            "Service does not belong to this salon".to_string(),
        )));
    }

    let employee = salonsync_db::repositories::employee::get_employee_by_id(
        &state.db_pool,
        payload.employee_id,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| {
        SalonError::NotFound(format!("Employee with ID {} not found", payload.employee_id))
    })?;

    if employee.salon_id != payload.salon_id {
        return Err(AppError(SalonError::Validation(
            "Employee does not belong to this salon".to_string(),
        )));
    }

    let now = Local::now().naive_local();
    if payload.date < now.date() {
        return Err(AppError(SalonError::Validation(
            "Cannot book an appointment in the past".to_string(),
        )));
    }

    let duration = convert::service_duration(service.duration_minutes);
    let ledger = PgBookingLedger::new(state.db_pool.clone());
    let availability = Availability::new(&ledger);
    let slots = availability
        .slots_for_date(
            payload.salon_id,
            payload.employee_id,
            duration,
            payload.date,
            now,
        )
        .await?;

    if !slots.contains(&payload.time) {
        return Err(AppError(SalonError::Conflict(format!(
            "{} on {} is not available",
            payload.time, payload.date
        ))));
    }

    let outcome = salonsync_db::repositories::appointment::book_appointment(
        &state.db_pool,
        payload.salon_id,
        payload.employee_id,
        payload.service_id,
        &payload.client_name,
        payload.date,
        payload.time,
        duration,
    )
    .await
    .map_err(SalonError::Database)?;

    match outcome {
        BookingOutcome::Booked(row) => Ok(Json(convert::appointment_dto(row))),
        BookingOutcome::Conflict => Err(AppError(SalonError::Conflict(format!(
            "{} on {} was just taken",
            payload.time, payload.date
        )))),
    }
}

#[axum::debug_handler]
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, AppError> {
    let row = salonsync_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(convert::appointment_dto(row)))
}

/// Query parameters for the client appointment list
#[derive(Debug, Deserialize)]
pub struct ClientQuery {
    pub client_name: String,
}

/// Lists a client's appointments, past and future
///
/// # Endpoint
///
/// ```text
/// GET /api/appointments?client_name=Anna
/// ```
#[axum::debug_handler]
pub async fn list_client_appointments(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<ClientQuery>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let rows = salonsync_db::repositories::appointment::list_by_client(
        &state.db_pool,
        &query.client_name,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(rows.into_iter().map(convert::appointment_dto).collect()))
}

/// Lists an employee's pending appointments awaiting a decision
#[axum::debug_handler]
pub async fn list_pending_appointments(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Vec<Appointment>>, AppError> {
    salonsync_db::repositories::employee::get_employee_by_id(&state.db_pool, employee_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
        })?;

    let rows = salonsync_db::repositories::appointment::list_pending_by_employee(
        &state.db_pool,
        employee_id,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(rows.into_iter().map(convert::appointment_dto).collect()))
}

/// Applies a staff-side status transition
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/:id/status
/// ```
///
/// Allowed transitions: confirm a pending appointment, reject anything
/// not yet completed, complete a confirmed appointment. Everything else
/// is a validation error.
#[axum::debug_handler]
pub async fn update_status(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<Appointment>, AppError> {
    let row = salonsync_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let current = AppointmentStatus::from_stored(&row.status).unwrap_or(AppointmentStatus::Pending);

    let next = match (payload.action, current) {
        (StatusAction::Confirm, AppointmentStatus::Pending) => AppointmentStatus::Confirmed,
        (StatusAction::Complete, AppointmentStatus::Confirmed) => AppointmentStatus::Completed,
        (
            StatusAction::Reject,
            AppointmentStatus::Pending
            | AppointmentStatus::Confirmed
            | AppointmentStatus::RescheduleProposed,
        ) => AppointmentStatus::Rejected,
        (action, current) => {
            return Err(AppError(SalonError::Validation(format!(
                "Cannot {:?} an appointment in status {}",
                action,
                current.as_str()
            ))));
        }
    };

    let updated = salonsync_db::repositories::appointment::update_status(
        &state.db_pool,
        id,
        next.as_str(),
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(convert::appointment_dto(updated)))
}

/// Staff proposes a new date and time for an appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/:id/propose
/// ```
///
/// The appointment moves to `reschedule_proposed` and keeps occupying
/// its original slot until the client responds.
#[axum::debug_handler]
pub async fn propose_reschedule(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProposeRescheduleRequest>,
) -> Result<Json<Appointment>, AppError> {
    let row = salonsync_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let current = AppointmentStatus::from_stored(&row.status).unwrap_or(AppointmentStatus::Pending);
    if !matches!(
        current,
        AppointmentStatus::Pending | AppointmentStatus::Confirmed
    ) {
        return Err(AppError(SalonError::Validation(format!(
            "Cannot propose a reschedule for an appointment in status {}",
            current.as_str()
        ))));
    }

    let updated = salonsync_db::repositories::appointment::propose_reschedule(
        &state.db_pool,
        id,
        payload.new_date,
        &payload.new_time.to_string(),
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    Ok(Json(convert::appointment_dto(updated)))
}

/// Client answers a reschedule proposal
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/:id/respond
/// ```
///
/// Accepting moves the appointment to the proposed date and time and
/// confirms it; rejecting frees the slot.
#[axum::debug_handler]
pub async fn respond_to_proposal(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RespondToProposalRequest>,
) -> Result<Json<Appointment>, AppError> {
    let row = salonsync_db::repositories::appointment::get_appointment_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?;

    let current = AppointmentStatus::from_stored(&row.status).unwrap_or(AppointmentStatus::Pending);
    if current != AppointmentStatus::RescheduleProposed {
        return Err(AppError(SalonError::Validation(
            "Appointment has no open reschedule proposal".to_string(),
        )));
    }

    let updated = match payload.response {
        ProposalResponse::Accept => {
            salonsync_db::repositories::appointment::accept_proposal(&state.db_pool, id)
                .await
                .map_err(SalonError::Database)?
                .ok_or_else(|| {
                    SalonError::Validation(
                        "Appointment has no open reschedule proposal".to_string(),
                    )
                })?
        }
        ProposalResponse::Reject => salonsync_db::repositories::appointment::update_status(
            &state.db_pool,
            id,
            AppointmentStatus::Rejected.as_str(),
        )
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Appointment with ID {} not found", id)))?,
    };

    Ok(Json(convert::appointment_dto(updated)))
}

/// Client cancels an appointment outright
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted =
        salonsync_db::repositories::appointment::delete_appointment(&state.db_pool, id)
            .await
            .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Appointment with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}
