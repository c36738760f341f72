use crate::models::{DbReview, DbReviewAggregate};
use eyre::{eyre, Result};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Create a review for a completed, not-yet-reviewed appointment. The
/// completed-status guard lives in the INSERT itself so a stale caller
/// can't review a pending appointment; the unique constraint on
/// appointment_id rejects duplicates.
pub async fn create_review(
    pool: &Pool<Postgres>,
    appointment_id: Uuid,
    rating: i16,
    comment: Option<&str>,
) -> Result<DbReview> {
    let id = Uuid::new_v4();

    let review = sqlx::query_as::<_, DbReview>(
        r#"
        INSERT INTO reviews (id, appointment_id, employee_id, rating, comment)
        SELECT $1, a.id, a.employee_id, $3, $4
        FROM appointments a
        WHERE a.id = $2 AND a.status = 'completed'
        RETURNING id, appointment_id, employee_id, rating, comment, created_at
        "#,
    )
    .bind(id)
    .bind(appointment_id)
    .bind(rating)
    .bind(comment)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Appointment is not completed or does not exist"))?;

    Ok(review)
}

pub async fn list_by_employee(pool: &Pool<Postgres>, employee_id: Uuid) -> Result<Vec<DbReview>> {
    let reviews = sqlx::query_as::<_, DbReview>(
        r#"
        SELECT id, appointment_id, employee_id, rating, comment, created_at
        FROM reviews
        WHERE employee_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(employee_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

pub async fn aggregate_for_employee(
    pool: &Pool<Postgres>,
    employee_id: Uuid,
) -> Result<DbReviewAggregate> {
    let aggregate = sqlx::query_as::<_, DbReviewAggregate>(
        r#"
        SELECT AVG(rating)::DOUBLE PRECISION AS avg_rating, COUNT(*) AS reviews_count
        FROM reviews
        WHERE employee_id = $1
        "#,
    )
    .bind(employee_id)
    .fetch_one(pool)
    .await?;

    Ok(aggregate)
}

/// Salon-wide aggregate across all of its staff.
pub async fn aggregate_for_salon(
    pool: &Pool<Postgres>,
    salon_id: Uuid,
) -> Result<DbReviewAggregate> {
    let aggregate = sqlx::query_as::<_, DbReviewAggregate>(
        r#"
        SELECT AVG(r.rating)::DOUBLE PRECISION AS avg_rating, COUNT(*) AS reviews_count
        FROM reviews r
        JOIN employees e ON e.id = r.employee_id
        WHERE e.salon_id = $1
        "#,
    )
    .bind(salon_id)
    .fetch_one(pool)
    .await?;

    Ok(aggregate)
}
