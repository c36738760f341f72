//! # Salon Handlers
//!
//! Salon administration: the salon record itself, its service catalogue,
//! its staff accounts, and the manager's revenue report.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use salonsync_core::{
    errors::SalonError,
    models::employee::{CreateEmployeeRequest, Employee},
    models::salon::{
        CreateSalonRequest, MarginType, RevenueReportResponse, Salon, SalonListEntry,
        StaffReportEntry, UpdateSalonHoursRequest, UpdateSalonMarginRequest,
    },
    models::service::{CreateServiceRequest, Service},
};
use uuid::Uuid;

use crate::{
    handlers::convert,
    middleware::{auth, error_handling::AppError},
    ApiState,
};

#[axum::debug_handler]
pub async fn create_salon(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateSalonRequest>,
) -> Result<Json<Salon>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Salon name must not be empty".to_string(),
        )));
    }
    if payload.open_from >= payload.open_to {
        return Err(AppError(SalonError::Validation(
            "Salon must open before it closes".to_string(),
        )));
    }

    let salon = salonsync_db::repositories::salon::create_salon(
        &state.db_pool,
        &payload.name,
        &payload.address,
        &payload.open_from.to_string(),
        &payload.open_to.to_string(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(convert::salon_dto(salon)))
}

/// Lists all salons with their review aggregates, for the booking flow
#[axum::debug_handler]
pub async fn list_salons(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<SalonListEntry>>, AppError> {
    let salons = salonsync_db::repositories::salon::list_salons(&state.db_pool)
        .await
        .map_err(SalonError::Database)?;

    let mut entries = Vec::with_capacity(salons.len());
    for salon in salons {
        let aggregate =
            salonsync_db::repositories::review::aggregate_for_salon(&state.db_pool, salon.id)
                .await
                .map_err(SalonError::Database)?;
        entries.push(SalonListEntry {
            id: salon.id,
            name: salon.name,
            address: salon.address,
            avg_rating: aggregate.avg_rating.unwrap_or(0.0),
            reviews_count: aggregate.reviews_count,
        });
    }

    Ok(Json(entries))
}

#[axum::debug_handler]
pub async fn get_salon(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Salon>, AppError> {
    let salon = salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", id)))?;

    Ok(Json(convert::salon_dto(salon)))
}

/// Updates a salon's opening hours
///
/// The new hours affect availability immediately: weekly-default days
/// open the new window on the next query. Per-date overrides are
/// untouched — they carry their own window.
#[axum::debug_handler]
pub async fn update_salon_hours(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalonHoursRequest>,
) -> Result<Json<Salon>, AppError> {
    if payload.open_from >= payload.open_to {
        return Err(AppError(SalonError::Validation(
            "Salon must open before it closes".to_string(),
        )));
    }

    let salon = salonsync_db::repositories::salon::update_salon_hours(
        &state.db_pool,
        id,
        &payload.open_from.to_string(),
        &payload.open_to.to_string(),
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", id)))?;

    Ok(Json(convert::salon_dto(salon)))
}

#[axum::debug_handler]
pub async fn update_salon_margin(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSalonMarginRequest>,
) -> Result<Json<Salon>, AppError> {
    if payload.margin_value < 0.0 {
        return Err(AppError(SalonError::Validation(
            "Margin value must not be negative".to_string(),
        )));
    }
    if payload.margin_type == MarginType::Percent && payload.margin_value > 100.0 {
        return Err(AppError(SalonError::Validation(
            "Percent margin cannot exceed 100".to_string(),
        )));
    }

    let salon = salonsync_db::repositories::salon::update_salon_margin(
        &state.db_pool,
        id,
        payload.margin_type.as_str(),
        payload.margin_value,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", id)))?;

    Ok(Json(convert::salon_dto(salon)))
}

#[axum::debug_handler]
pub async fn delete_salon(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salonsync_db::repositories::salon::delete_salon(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Salon with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn create_service(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<Json<Service>, AppError> {
    salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, salon_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", salon_id)))?;

    if payload.duration_minutes == 0 {
        return Err(AppError(SalonError::Validation(
            "Service duration must be positive".to_string(),
        )));
    }
    if payload.price < 0.0 {
        return Err(AppError(SalonError::Validation(
            "Service price must not be negative".to_string(),
        )));
    }

    let service = salonsync_db::repositories::service::create_service(
        &state.db_pool,
        salon_id,
        &payload.name,
        i32::from(payload.duration_minutes),
        payload.price,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(convert::service_dto(service)))
}

#[axum::debug_handler]
pub async fn list_services(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<Service>>, AppError> {
    let services =
        salonsync_db::repositories::service::list_services_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(services.into_iter().map(convert::service_dto).collect()))
}

#[axum::debug_handler]
pub async fn delete_service(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salonsync_db::repositories::service::delete_service(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Service with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Creates a staff account with a hashed password
#[axum::debug_handler]
pub async fn create_employee(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, salon_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", salon_id)))?;

    if payload.display_name.trim().is_empty() {
        return Err(AppError(SalonError::Validation(
            "Display name must not be empty".to_string(),
        )));
    }

    let work_days = match &payload.work_days {
        Some(days) => {
            if days.iter().any(|d| *d > 6) {
                return Err(AppError(SalonError::Validation(
                    "Weekday indices must be 0 (Monday) through 6 (Sunday)".to_string(),
                )));
            }
            days.iter()
                .map(|d| d.to_string())
                .collect::<Vec<_>>()
                .join(",")
        }
        // Monday through Friday.
        None => "0,1,2,3,4".to_string(),
    };

    let password_hash = auth::hash_password(&payload.password)?;

    let employee = salonsync_db::repositories::employee::create_employee(
        &state.db_pool,
        salon_id,
        &payload.display_name,
        &password_hash,
        &work_days,
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(convert::employee_dto(employee)))
}

#[axum::debug_handler]
pub async fn list_employees(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<Vec<Employee>>, AppError> {
    let employees =
        salonsync_db::repositories::employee::list_employees_by_salon(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    Ok(Json(employees.into_iter().map(convert::employee_dto).collect()))
}

#[axum::debug_handler]
pub async fn delete_employee(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let deleted = salonsync_db::repositories::employee::delete_employee(&state.db_pool, id)
        .await
        .map_err(SalonError::Database)?;

    if !deleted {
        return Err(AppError(SalonError::NotFound(format!(
            "Employee with ID {} not found",
            id
        ))));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Manager-facing revenue report over completed appointments
///
/// # Endpoint
///
/// ```text
/// GET /api/salons/:id/report
/// ```
///
/// Per staff member: gross (sum of completed service prices), net after
/// the salon's margin, completed count, and review aggregate. The
/// salon's cut of any single appointment is capped at the service
/// price, so a flat margin never drives a staff net below zero.
#[axum::debug_handler]
pub async fn revenue_report(
    State(state): State<Arc<ApiState>>,
    Path(salon_id): Path<Uuid>,
) -> Result<Json<RevenueReportResponse>, AppError> {
    let salon = salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, salon_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", salon_id)))?;

    let margin_type = MarginType::from_stored(&salon.margin_type);

    let completed =
        salonsync_db::repositories::appointment::completed_with_prices(&state.db_pool, salon_id)
            .await
            .map_err(SalonError::Database)?;

    struct Tally {
        display_name: String,
        gross: f64,
        net: f64,
        completed_count: i64,
    }

    // BTreeMap keeps the report order stable across runs.
    let mut by_employee: BTreeMap<Uuid, Tally> = BTreeMap::new();
    let mut salon_net_profit = 0.0;
    for row in completed {
        // An appointment whose service row is gone still counts as
        // completed work, just with no revenue attached.
        let price = row.price.unwrap_or(0.0);
        let cut = margin_type.cut(price, salon.margin_value).clamp(0.0, price);
        salon_net_profit += cut;

        let tally = by_employee.entry(row.employee_id).or_insert_with(|| Tally {
            display_name: row.display_name.clone(),
            gross: 0.0,
            net: 0.0,
            completed_count: 0,
        });
        tally.gross += price;
        tally.net += price - cut;
        tally.completed_count += 1;
    }

    let mut staff = Vec::with_capacity(by_employee.len());
    for (employee_id, tally) in by_employee {
        let aggregate =
            salonsync_db::repositories::review::aggregate_for_employee(&state.db_pool, employee_id)
                .await
                .map_err(SalonError::Database)?;
        staff.push(StaffReportEntry {
            employee_id,
            display_name: tally.display_name,
            gross: tally.gross,
            net: tally.net,
            completed_count: tally.completed_count,
            avg_rating: aggregate.avg_rating.unwrap_or(0.0),
            reviews_count: aggregate.reviews_count,
        });
    }
    staff.sort_by(|a, b| a.display_name.cmp(&b.display_name));

    Ok(Json(RevenueReportResponse {
        salon_id,
        salon_net_profit,
        staff,
    }))
}
