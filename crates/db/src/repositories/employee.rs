use crate::models::DbEmployee;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

const EMPLOYEE_COLUMNS: &str =
    "id, salon_id, display_name, password_hash, work_days, breaks, created_at";

pub async fn create_employee(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    display_name: &str,
    password_hash: &str,
    work_days: &str,
) -> Result<DbEmployee> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating employee: id={}, salon={}", id, salon_id);

    let employee = sqlx::query_as::<_, DbEmployee>(&format!(
        r#"
        INSERT INTO employees (id, salon_id, display_name, password_hash, work_days)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING {EMPLOYEE_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(salon_id)
    .bind(display_name)
    .bind(password_hash)
    .bind(work_days)
    .fetch_one(pool)
    .await?;

    Ok(employee)
}

pub async fn get_employee_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(&format!(
        r#"
        SELECT {EMPLOYEE_COLUMNS}
        FROM employees
        WHERE id = $1
        "#,
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn list_employees_by_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<Vec<DbEmployee>> {
    let employees = sqlx::query_as::<_, DbEmployee>(&format!(
        r#"
        SELECT {EMPLOYEE_COLUMNS}
        FROM employees
        WHERE salon_id = $1
        ORDER BY display_name ASC
        "#,
    ))
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(employees)
}

/// Replace the recurring weekly defaults: CSV working-day list and the
/// JSON break map (weekday -> {start, end}).
pub async fn update_weekly_pattern(
    pool: &Pool<Postgres>,
    id: Uuid,
    work_days: &str,
    breaks: &serde_json::Value,
) -> Result<Option<DbEmployee>> {
    let employee = sqlx::query_as::<_, DbEmployee>(&format!(
        r#"
        UPDATE employees
        SET work_days = $2, breaks = $3
        WHERE id = $1
        RETURNING {EMPLOYEE_COLUMNS}
        "#,
    ))
    .bind(id)
    .bind(work_days)
    .bind(breaks)
    .fetch_optional(pool)
    .await?;

    Ok(employee)
}

pub async fn delete_employee(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM employees
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
