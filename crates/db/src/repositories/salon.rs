use crate::models::DbSalon;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_salon(
    pool: &Pool<Postgres>,
    name: &str,
    address: &str,
    open_from: &str,
    open_to: &str,
) -> Result<DbSalon> {
    let id = Uuid::new_v4();

    tracing::debug!("Creating salon: id={}, name={}", id, name);

    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        INSERT INTO salons (id, name, address, open_from, open_to)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, address, open_from, open_to, margin_type, margin_value, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(address)
    .bind(open_from)
    .bind(open_to)
    .fetch_one(pool)
    .await?;

    Ok(salon)
}

pub async fn get_salon_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbSalon>> {
    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        SELECT id, name, address, open_from, open_to, margin_type, margin_value, created_at
        FROM salons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(salon)
}

pub async fn list_salons(pool: &Pool<Postgres>) -> Result<Vec<DbSalon>> {
    let salons = sqlx::query_as::<_, DbSalon>(
        r#"
        SELECT id, name, address, open_from, open_to, margin_type, margin_value, created_at
        FROM salons
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(salons)
}

pub async fn update_salon_hours(
    pool: &Pool<Postgres>,
    id: Uuid,
    open_from: &str,
    open_to: &str,
) -> Result<Option<DbSalon>> {
    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        UPDATE salons
        SET open_from = $2, open_to = $3
        WHERE id = $1
        RETURNING id, name, address, open_from, open_to, margin_type, margin_value, created_at
        "#,
    )
    .bind(id)
    .bind(open_from)
    .bind(open_to)
    .fetch_optional(pool)
    .await?;

    Ok(salon)
}

pub async fn update_salon_margin(
    pool: &Pool<Postgres>,
    id: Uuid,
    margin_type: &str,
    margin_value: f64,
) -> Result<Option<DbSalon>> {
    let salon = sqlx::query_as::<_, DbSalon>(
        r#"
        UPDATE salons
        SET margin_type = $2, margin_value = $3
        WHERE id = $1
        RETURNING id, name, address, open_from, open_to, margin_type, margin_value, created_at
        "#,
    )
    .bind(id)
    .bind(margin_type)
    .bind(margin_value)
    .fetch_optional(pool)
    .await?;

    Ok(salon)
}

pub async fn delete_salon(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM salons
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
