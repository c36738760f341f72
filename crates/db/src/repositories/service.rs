use crate::models::DbService;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_service(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
    name: &str,
    duration_minutes: i32,
    price: f64,
) -> Result<DbService> {
    let id = Uuid::new_v4();

    let service = sqlx::query_as::<_, DbService>(
        r#"
        INSERT INTO services (id, salon_id, name, duration_minutes, price)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, salon_id, name, duration_minutes, price, created_at
        "#,
    )
    .bind(id)
    .bind(salon_id)
    .bind(name)
    .bind(duration_minutes)
    .bind(price)
    .fetch_one(pool)
    .await?;

    Ok(service)
}

pub async fn get_service_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbService>> {
    let service = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, salon_id, name, duration_minutes, price, created_at
        FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(service)
}

pub async fn list_services_by_salon(pool: &Pool<Postgres>, salon_id: Uuid) -> Result<Vec<DbService>> {
    let services = sqlx::query_as::<_, DbService>(
        r#"
        SELECT id, salon_id, name, duration_minutes, price, created_at
        FROM services
        WHERE salon_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(salon_id)
    .fetch_all(pool)
    .await?;

    Ok(services)
}

/// Deletion is refused while appointments still reference the service
/// (the appointments FK has no cascade); surfaced as `Ok(false)` would
/// hide the cause, so the FK violation propagates to the caller.
pub async fn delete_service(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM services
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
