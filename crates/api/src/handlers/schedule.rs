//! # Schedule Handlers
//!
//! Staff-facing schedule management: the recurring weekly defaults, the
//! per-date overrides that replace them, and the month calendar view
//! that shows the resolved result alongside booked appointments.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Datelike, Days, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use salonsync_core::{
    errors::SalonError,
    models::appointment::{AppointmentStatus, AppointmentSummary},
    models::employee::{
        CalendarDay, DayOverride, Employee, MonthScheduleResponse, UpdateWeeklyPatternRequest,
        UpsertDayOverrideRequest, WeeklyPattern,
    },
    models::time::{weekday_index, TimeOfDay, TimeWindow},
    scheduling::{resolve_day, DaySchedule},
};
use uuid::Uuid;

use crate::{handlers::convert, middleware::error_handling::AppError, ApiState};

/// Replaces an employee's recurring weekly defaults
///
/// # Endpoint
///
/// ```text
/// PUT /api/employees/:id/schedule/week
/// ```
///
/// The request carries the full pattern: working weekdays (Monday = 0)
/// and an optional break per weekday. Omitted weekdays lose any break
/// they had — this is a replace, not a merge.
#[axum::debug_handler]
pub async fn update_weekly_pattern(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
    Json(payload): Json<UpdateWeeklyPatternRequest>,
) -> Result<Json<Employee>, AppError> {
    if payload.work_days.iter().any(|d| *d > 6) {
        return Err(AppError(SalonError::Validation(
            "Weekday indices must be 0 (Monday) through 6 (Sunday)".to_string(),
        )));
    }
    for (day, b) in &payload.breaks {
        if *day > 6 {
            return Err(AppError(SalonError::Validation(
                "Break weekday indices must be 0 (Monday) through 6 (Sunday)".to_string(),
            )));
        }
        if b.start >= b.end {
            return Err(AppError(SalonError::Validation(format!(
                "Break on weekday {} must start before it ends",
                day
            ))));
        }
    }

    let work_days = payload
        .work_days
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(",");

    let breaks = serde_json::Value::Object(
        payload
            .breaks
            .iter()
            .map(|(day, b)| {
                (
                    day.to_string(),
                    json!({ "start": b.start.to_string(), "end": b.end.to_string() }),
                )
            })
            .collect(),
    );

    let employee = salonsync_db::repositories::employee::update_weekly_pattern(
        &state.db_pool,
        employee_id,
        &work_days,
        &breaks,
    )
    .await
    .map_err(SalonError::Database)?
    .ok_or_else(|| SalonError::NotFound(format!("Employee with ID {} not found", employee_id)))?;

    Ok(Json(convert::employee_dto(employee)))
}

/// Creates or replaces the override for one (employee, date)
///
/// # Endpoint
///
/// ```text
/// PUT /api/employees/:id/schedule/:date
/// ```
///
/// An override governs its date completely: a non-working override
/// closes a day the weekly pattern would open, and a working override's
/// window is taken verbatim regardless of salon hours.
#[axum::debug_handler]
pub async fn upsert_day_override(
    State(state): State<Arc<ApiState>>,
    Path((employee_id, date)): Path<(Uuid, NaiveDate)>,
    Json(payload): Json<UpsertDayOverrideRequest>,
) -> Result<Json<DayOverride>, AppError> {
    salonsync_db::repositories::employee::get_employee_by_id(&state.db_pool, employee_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
        })?;

    if payload.working {
        let (Some(start), Some(end)) = (payload.start_time, payload.end_time) else {
            return Err(AppError(SalonError::Validation(
                "A working override requires start_time and end_time".to_string(),
            )));
        };
        if start >= end {
            return Err(AppError(SalonError::Validation(
                "Override must start before it ends".to_string(),
            )));
        }
        match (payload.break_start, payload.break_end) {
            (None, None) => {}
            (Some(bs), Some(be)) if bs < be => {}
            (Some(_), Some(_)) => {
                return Err(AppError(SalonError::Validation(
                    "Break must start before it ends".to_string(),
                )));
            }
            _ => {
                return Err(AppError(SalonError::Validation(
                    "Break requires both break_start and break_end".to_string(),
                )));
            }
        }
    }

    let as_stored = |t: Option<TimeOfDay>| t.map(|t| t.to_string());
    let row = salonsync_db::repositories::schedule_override::upsert_override(
        &state.db_pool,
        employee_id,
        date,
        payload.working,
        as_stored(payload.start_time).as_deref(),
        as_stored(payload.end_time).as_deref(),
        as_stored(payload.break_start).as_deref(),
        as_stored(payload.break_end).as_deref(),
    )
    .await
    .map_err(SalonError::Database)?;

    Ok(Json(DayOverride {
        date: row.date,
        working: row.is_working,
        start_time: row.start_time,
        end_time: row.end_time,
        break_start: row.break_start,
        break_end: row.break_end,
    }))
}

/// Query parameters for the month calendar endpoint
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: i32,
    /// 1–12.
    pub month: u32,
}

/// Returns an employee's resolved calendar for one month
///
/// # Endpoint
///
/// ```text
/// GET /api/employees/:id/schedule?year=2025&month=6
/// ```
///
/// Each day carries the resolved working window (override, weekly
/// default, or closed), whether an override is in effect, and the
/// day's appointments.
#[axum::debug_handler]
pub async fn get_month_schedule(
    State(state): State<Arc<ApiState>>,
    Path(employee_id): Path<Uuid>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthScheduleResponse>, AppError> {
    let Some(from) = NaiveDate::from_ymd_opt(query.year, query.month, 1) else {
        return Err(AppError(SalonError::Validation(format!(
            "{}-{} is not a valid month",
            query.year, query.month
        ))));
    };
    let to = next_month_start(from);

    let employee =
        salonsync_db::repositories::employee::get_employee_by_id(&state.db_pool, employee_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
            })?;

    let salon =
        salonsync_db::repositories::salon::get_salon_by_id(&state.db_pool, employee.salon_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Salon with ID {} not found", employee.salon_id))
            })?;

    let salon_hours = TimeWindow::parse_opt(Some(&salon.open_from), Some(&salon.open_to))
        .unwrap_or(TimeWindow::new(
            TimeOfDay::from_minutes(0),
            TimeOfDay::from_minutes(0),
        ));
    let pattern = WeeklyPattern::from_stored(&employee.work_days, &employee.breaks.to_string());

    let overrides: HashMap<NaiveDate, DayOverride> =
        salonsync_db::repositories::schedule_override::list_overrides_in_range(
            &state.db_pool,
            employee_id,
            from,
            to,
        )
        .await
        .map_err(SalonError::Database)?
        .into_iter()
        .map(|r| {
            (
                r.date,
                DayOverride {
                    date: r.date,
                    working: r.is_working,
                    start_time: r.start_time,
                    end_time: r.end_time,
                    break_start: r.break_start,
                    break_end: r.break_end,
                },
            )
        })
        .collect();

    let service_names: HashMap<Uuid, String> =
        salonsync_db::repositories::service::list_services_by_salon(&state.db_pool, salon.id)
            .await
            .map_err(SalonError::Database)?
            .into_iter()
            .map(|s| (s.id, s.name))
            .collect();

    let mut appointments_by_day: HashMap<NaiveDate, Vec<AppointmentSummary>> = HashMap::new();
    let rows = salonsync_db::repositories::appointment::list_by_employee_and_range(
        &state.db_pool,
        employee_id,
        from,
        to,
    )
    .await
    .map_err(SalonError::Database)?;
    for row in rows {
        let summary = AppointmentSummary {
            id: row.id,
            time: convert::stored_time(&row.time),
            client_name: row.client_name,
            service_name: service_names
                .get(&row.service_id)
                .cloned()
                .unwrap_or_else(|| "unknown".to_string()),
            status: AppointmentStatus::from_stored(&row.status)
                .unwrap_or(AppointmentStatus::Pending),
        };
        appointments_by_day.entry(row.date).or_default().push(summary);
    }

    let mut days = Vec::new();
    let mut date = from;
    while date < to {
        let day_override = overrides.get(&date);
        let schedule = resolve_day(day_override, &pattern, salon_hours, weekday_index(date));
        let (start, end, break_start, break_end) = match schedule {
            DaySchedule::NotWorking => (None, None, None, None),
            DaySchedule::Working {
                window,
                break_window,
            } => (
                Some(window.start),
                Some(window.end),
                break_window.map(|b| b.start),
                break_window.map(|b| b.end),
            ),
        };
        days.push(CalendarDay {
            date,
            is_working: schedule.is_working(),
            start,
            end,
            break_start,
            break_end,
            has_override: day_override.is_some(),
            appointments: appointments_by_day.remove(&date).unwrap_or_default(),
        });
        let Some(next) = date.checked_add_days(Days::new(1)) else {
            break;
        };
        date = next;
    }

    Ok(Json(MonthScheduleResponse {
        year: query.year,
        month: query.month,
        days,
    }))
}

fn next_month_start(first_of_month: NaiveDate) -> NaiveDate {
    let (year, month) = if first_of_month.month() == 12 {
        (first_of_month.year() + 1, 1)
    } else {
        (first_of_month.year(), first_of_month.month() + 1)
    };
    // Day 1 of any real year/month is always constructible.
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(first_of_month)
}
