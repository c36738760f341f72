//! [`BookingLedger`] implementation backed by Postgres.
//!
//! This is the read side of the availability engine: the scheduling
//! core calls through this port and never sees SQL. Stored text is
//! converted to core value types here, with the tolerance rules the
//! core expects (malformed salon hours become a degenerate window,
//! malformed appointment times are dropped).

use async_trait::async_trait;
use chrono::NaiveDate;
use salonsync_core::errors::{SalonError, SalonResult};
use salonsync_core::models::appointment::BusyInterval;
use salonsync_core::models::employee::{DayOverride, WeeklyPattern};
use salonsync_core::models::time::{TimeOfDay, TimeWindow};
use salonsync_core::scheduling::BookingLedger;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repositories::{appointment, employee, salon, schedule_override};

pub struct PgBookingLedger {
    pool: Pool<Postgres>,
}

impl PgBookingLedger {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingLedger for PgBookingLedger {
    async fn day_override(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Option<DayOverride>> {
        let row = schedule_override::get_override(&self.pool, employee_id, date)
            .await
            .map_err(SalonError::Database)?;

        Ok(row.map(|r| DayOverride {
            date: r.date,
            working: r.is_working,
            start_time: r.start_time,
            end_time: r.end_time,
            break_start: r.break_start,
            break_end: r.break_end,
        }))
    }

    async fn weekly_pattern(&self, employee_id: Uuid) -> SalonResult<WeeklyPattern> {
        let row = employee::get_employee_by_id(&self.pool, employee_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| {
                SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
            })?;

        Ok(WeeklyPattern::from_stored(
            &row.work_days,
            &row.breaks.to_string(),
        ))
    }

    async fn salon_hours(&self, salon_id: Uuid) -> SalonResult<TimeWindow> {
        let row = salon::get_salon_by_id(&self.pool, salon_id)
            .await
            .map_err(SalonError::Database)?
            .ok_or_else(|| SalonError::NotFound(format!("Salon with ID {} not found", salon_id)))?;

        // Garbled stored hours resolve to a degenerate window, which the
        // engine reports as "no slots" rather than an error.
        Ok(
            TimeWindow::parse_opt(Some(&row.open_from), Some(&row.open_to)).unwrap_or(
                TimeWindow::new(TimeOfDay::from_minutes(0), TimeOfDay::from_minutes(0)),
            ),
        )
    }

    async fn busy_intervals(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Vec<BusyInterval>> {
        let rows = appointment::busy_slots_for_day(&self.pool, employee_id, date)
            .await
            .map_err(SalonError::Database)?;

        Ok(rows
            .iter()
            .filter_map(appointment::busy_interval)
            .collect())
    }
}
