use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create salons table. Opening hours are stored as "HH:MM" text —
    // the wire contract shared with pre-existing data.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS salons (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            address VARCHAR(255) NOT NULL,
            open_from VARCHAR(5) NOT NULL DEFAULT '09:00',
            open_to VARCHAR(5) NOT NULL DEFAULT '17:00',
            margin_type VARCHAR(10) NOT NULL DEFAULT 'percent',
            margin_value DOUBLE PRECISION NOT NULL DEFAULT 0,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create services table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS services (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id) ON DELETE CASCADE,
            name VARCHAR(255) NOT NULL,
            duration_minutes INTEGER NOT NULL,
            price DOUBLE PRECISION NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT positive_duration CHECK (duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create employees table. work_days is a CSV of weekday indices
    // (Monday = 0), breaks a JSON map weekday -> {start, end}.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id) ON DELETE CASCADE,
            display_name VARCHAR(255) NOT NULL,
            password_hash VARCHAR(255) NOT NULL,
            work_days VARCHAR(20) NOT NULL DEFAULT '0,1,2,3,4',
            breaks JSONB NOT NULL DEFAULT '{}',
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create schedule_overrides table. One override per (employee, date)
    // is a hard invariant; the unique constraint enforces it.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schedule_overrides (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            date DATE NOT NULL,
            is_working BOOLEAN NOT NULL DEFAULT TRUE,
            start_time VARCHAR(5) NULL,
            end_time VARCHAR(5) NULL,
            break_start VARCHAR(5) NULL,
            break_end VARCHAR(5) NULL,
            CONSTRAINT employee_date_unique UNIQUE (employee_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create appointments table. No ON DELETE CASCADE from services:
    // an appointment keeps its service reference for duration lookup.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            salon_id UUID NOT NULL REFERENCES salons(id) ON DELETE CASCADE,
            employee_id UUID NOT NULL REFERENCES employees(id),
            service_id UUID NOT NULL REFERENCES services(id),
            client_name VARCHAR(255) NOT NULL,
            date DATE NOT NULL,
            time VARCHAR(5) NOT NULL,
            status VARCHAR(20) NOT NULL DEFAULT 'pending',
            proposed_date DATE NULL,
            proposed_time VARCHAR(5) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reviews table — at most one per appointment.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reviews (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            appointment_id UUID NOT NULL UNIQUE REFERENCES appointments(id) ON DELETE CASCADE,
            employee_id UUID NOT NULL REFERENCES employees(id) ON DELETE CASCADE,
            rating SMALLINT NOT NULL,
            comment VARCHAR(500) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT rating_range CHECK (rating BETWEEN 1 AND 5)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_services_salon_id ON services(salon_id);
        CREATE INDEX IF NOT EXISTS idx_employees_salon_id ON employees(salon_id);
        CREATE INDEX IF NOT EXISTS idx_overrides_employee_date ON schedule_overrides(employee_id, date);
        CREATE INDEX IF NOT EXISTS idx_appointments_employee_date ON appointments(employee_id, date);
        CREATE INDEX IF NOT EXISTS idx_appointments_salon_status ON appointments(salon_id, status);
        CREATE INDEX IF NOT EXISTS idx_reviews_employee_id ON reviews(employee_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
