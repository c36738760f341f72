use crate::models::DbScheduleOverride;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const OVERRIDE_COLUMNS: &str =
    "id, employee_id, date, is_working, start_time, end_time, break_start, break_end";

/// Create or replace the override for (employee, date). The unique
/// constraint on that pair makes this an upsert rather than a second
/// row — at most one override per day, ever.
pub async fn upsert_override(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    date: NaiveDate,
    is_working: bool,
    start_time: Option<&str>,
    end_time: Option<&str>,
    break_start: Option<&str>,
    break_end: Option<&str>,
) -> Result<DbScheduleOverride> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Upserting schedule override: employee={}, date={}, working={}",
        employee_id,
        date,
        is_working
    );

    let row = sqlx::query_as::<_, DbScheduleOverride>(&format!(
        r#"
        INSERT INTO schedule_overrides
            (id, employee_id, date, is_working, start_time, end_time, break_start, break_end)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (employee_id, date) DO UPDATE SET
            is_working = EXCLUDED.is_working,
            start_time = EXCLUDED.start_time,
            end_time = EXCLUDED.end_time,
            break_start = EXCLUDED.break_start,
            break_end = EXCLUDED.break_end
        RETURNING {OVERRIDE_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(employee_id)
    .bind(date)
    .bind(is_working)
    .bind(start_time)
    .bind(end_time)
    .bind(break_start)
    .bind(break_end)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

pub async fn get_override(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    date: NaiveDate,
) -> Result<Option<DbScheduleOverride>> {
    let row = sqlx::query_as::<_, DbScheduleOverride>(&format!(
        r#"
        SELECT {OVERRIDE_COLUMNS}
        FROM schedule_overrides
        WHERE employee_id = $1 AND date = $2
        "#,
    ))
    .bind(employee_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// All overrides for an employee in `[from, to)` — the month calendar
/// view. Past dates are included; overrides never expire.
pub async fn list_overrides_in_range(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbScheduleOverride>> {
    let rows = sqlx::query_as::<_, DbScheduleOverride>(&format!(
        r#"
        SELECT {OVERRIDE_COLUMNS}
        FROM schedule_overrides
        WHERE employee_id = $1 AND date >= $2 AND date < $3
        ORDER BY date ASC
        "#,
    ))
    .bind(employee_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
