//! # Review Handlers
//!
//! Clients review completed appointments; the aggregates feed the
//! salon list and the staff picker.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use salonsync_core::{
    errors::SalonError,
    models::appointment::AppointmentStatus,
    models::review::{CreateReviewRequest, EmployeeReviewsResponse, Review},
};
use uuid::Uuid;

use crate::{middleware::error_handling::AppError, ApiState};

/// Creates a review for a completed appointment
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments/:id/review
/// ```
///
/// Only completed appointments can be reviewed, and each at most once.
#[axum::debug_handler]
pub async fn create_review(
    State(state): State<Arc<ApiState>>,
    Path(appointment_id): Path<Uuid>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<Json<Review>, AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError(SalonError::Validation(
            "Rating must be between 1 and 5".to_string(),
        )));
    }

    let appointment = salonsync_db::repositories::appointment::get_appointment_by_id(
        &state.db_pool,
        appointment_id,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| {
        SalonError::NotFound(format!("Appointment with ID {} not found", appointment_id))
    })?;

    let status =
        AppointmentStatus::from_stored(&appointment.status).unwrap_or(AppointmentStatus::Pending);
    if status != AppointmentStatus::Completed {
        return Err(AppError(SalonError::Validation(
            "Only completed appointments can be reviewed".to_string(),
        )));
    }

    // The status was checked above, so the remaining failure mode of
    // the guarded INSERT is the unique constraint on appointment_id.
    let review = salonsync_db::repositories::review::create_review(
        &state.db_pool,
        appointment_id,
        payload.rating,
        payload.comment.as_deref(),
    )
    .await
    .map_err(|_| SalonError::Conflict("Appointment has already been reviewed".to_string()))?;

    Ok(Json(Review {
        id: review.id,
        appointment_id: review.appointment_id,
        employee_id: review.employee_id,
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
    }))
}

/// Lists an employee's reviews with their aggregate
#[axum::debug_handler]
pub async fn list_employee_reviews(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<EmployeeReviewsResponse>, AppError> {
    salonsync_db::repositories::employee::get_employee_by_id(&state.db_pool, employee_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
        })?;

    let aggregate =
        salonsync_db::repositories::review::aggregate_for_employee(&state.db_pool, employee_id)
            .await
            .map_err(SalonError::Database)?;

    let reviews = salonsync_db::repositories::review::list_by_employee(&state.db_pool, employee_id)
        .await
        .map_err(SalonError::Database)?
        .into_iter()
        .map(|r| Review {
            id: r.id,
            appointment_id: r.appointment_id,
            employee_id: r.employee_id,
            rating: r.rating,
            comment: r.comment,
            created_at: r.created_at,
        })
        .collect();

    Ok(Json(EmployeeReviewsResponse {
        employee_id,
        avg_rating: aggregate.avg_rating.unwrap_or(0.0),
        reviews_count: aggregate.reviews_count,
        reviews,
    }))
}
