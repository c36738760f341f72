use crate::models::{DbAppointment, DbBusySlot, DbCompletedAppointment};
use chrono::NaiveDate;
use eyre::Result;
use salonsync_core::models::appointment::BusyInterval;
use salonsync_core::models::time::{TimeOfDay, TimeWindow};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const APPOINTMENT_COLUMNS: &str = "id, salon_id, employee_id, service_id, client_name, \
     date, time, status, proposed_date, proposed_time, created_at";

/// Outcome of a booking attempt. A `Conflict` means another request won
/// the slot between the advisory listing and this transaction.
#[derive(Debug)]
pub enum BookingOutcome {
    Booked(DbAppointment),
    Conflict,
}

/// Book an appointment, re-validating non-overlap inside a single
/// transaction.
///
/// The slot list previously rendered to the client is advisory only:
/// two clients can both see 10:00 free and race to book it. The
/// transaction takes an advisory lock keyed on (employee, date), so
/// concurrent bookings for the same column of the calendar serialize,
/// then re-runs the overlap check against the rows visible under the
/// lock before inserting.
pub async fn book_appointment(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    employee_id: Uuid,
    service_id: Uuid,
    client_name: &str,
    date: NaiveDate,
    time: TimeOfDay,
    duration_minutes: u16,
) -> Result<BookingOutcome> {
    let mut tx = pool.begin().await?;

    // Serialize bookings per (employee, date). hashtext is stable for
    // the lifetime of the transaction's lock space, which is all we need.
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1 || ':' || $2))")
        .bind(employee_id.to_string())
        .bind(date.to_string())
        .execute(&mut *tx)
        .await?;

    let existing = sqlx::query_as::<_, DbBusySlot>(
        r#"
        SELECT a.time, s.duration_minutes
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        WHERE a.employee_id = $1 AND a.date = $2 AND a.status != 'rejected'
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_all(&mut *tx)
    .await?;

    let requested = TimeWindow::new(time, time.plus(duration_minutes));
    let conflict = existing
        .iter()
        .filter_map(busy_window)
        .any(|occupied| requested.overlaps(&occupied));
    if conflict {
        tracing::debug!(
            "Booking conflict: employee={}, date={}, time={}",
            employee_id,
            date,
            time
        );
        tx.rollback().await?;
        return Ok(BookingOutcome::Conflict);
    }

    let id = Uuid::new_v4();
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        INSERT INTO appointments (id, salon_id, employee_id, service_id, client_name, date, time)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {APPOINTMENT_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(salon_id)
    .bind(employee_id)
    .bind(service_id)
    .bind(client_name)
    .bind(date)
    .bind(time.to_string())
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(BookingOutcome::Booked(appointment))
}

/// Convert a busy row to its occupied window. Rows whose stored time is
/// garbled or whose service no longer resolves are skipped, matching
/// the read path's conflict check.
fn busy_window(row: &DbBusySlot) -> Option<TimeWindow> {
    let interval = busy_interval(row)?;
    interval.window()
}

pub(crate) fn busy_interval(row: &DbBusySlot) -> Option<BusyInterval> {
    let start: TimeOfDay = row.time.parse().ok()?;
    Some(BusyInterval {
        start,
        duration_minutes: row
            .duration_minutes
            .and_then(|d| u16::try_from(d).ok()),
    })
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE id = $1
        "#,
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Occupied intervals for (employee, date): non-rejected appointments
/// with the linked service's current duration (NULL when unresolvable).
pub async fn busy_slots_for_day(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Vec<DbBusySlot>> {
    let rows = sqlx::query_as::<_, DbBusySlot>(
        r#"
        SELECT a.time, s.duration_minutes
        FROM appointments a
        LEFT JOIN services s ON s.id = a.service_id
        WHERE a.employee_id = $1 AND a.date = $2 AND a.status != 'rejected'
        ORDER BY a.time ASC
        "#,
    )
    .bind(employee_id)
    .bind(date)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_by_employee_and_range(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE employee_id = $1 AND date >= $2 AND date < $3 AND status != 'rejected'
        ORDER BY date ASC, time ASC
        "#,
    ))
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_by_client(
    pool: &Pool<Postgres>,
    client_name: &str,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE client_name = $1
        ORDER BY date ASC, time ASC
        "#,
    ))
    .bind(client_name)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn list_pending_by_employee(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<Vec<DbAppointment>> {
    let rows = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        SELECT {APPOINTMENT_COLUMNS}
        FROM appointments
        WHERE employee_id = $1 AND status = 'pending'
        ORDER BY date ASC, time ASC
        "#,
    ))
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: &str,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET status = $2
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(status)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Staff proposes a new date/time; status moves to reschedule_proposed
/// until the client responds.
pub async fn propose_reschedule(
    pool: &Pool<Postgres>,
    id: Uuid,
    new_date: NaiveDate,
    new_time: &str,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET proposed_date = $2, proposed_time = $3, status = 'reschedule_proposed'
        WHERE id = $1
        RETURNING {APPOINTMENT_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(new_date)
    .bind(new_time)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Client accepts a proposal: the proposed date/time becomes the real
/// one and the appointment is confirmed.
pub async fn accept_proposal(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(&format!(
        r#"
        UPDATE appointments
        SET date = proposed_date,
            time = proposed_time,
            proposed_date = NULL,
            proposed_time = NULL,
            status = 'confirmed'
        WHERE id = $1 AND status = 'reschedule_proposed' AND proposed_date IS NOT NULL
        RETURNING {APPOINTMENT_COLUMNS}
        "#,
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

pub async fn delete_appointment(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Completed appointments with prices for the salon revenue report.
pub async fn completed_with_prices(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbCompletedAppointment>> {
    let rows = sqlx::query_as::<_, DbCompletedAppointment>(
        r#"
        SELECT a.employee_id, e.display_name, s.price
        FROM appointments a
        JOIN employees e ON e.id = a.employee_id
        LEFT JOIN services s ON s.id = a.service_id
        WHERE a.salon_id = $1 AND a.status = 'completed'
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
