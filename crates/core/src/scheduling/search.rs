//! Availability queries against the booking ledger.
//!
//! The ledger is a read-only port: the scheduling core never mutates
//! appointments, and the slot lists it produces are advisory — the
//! write path re-validates conflicts inside its own transaction.

use async_trait::async_trait;
use chrono::{Days, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::errors::SalonResult;
use crate::models::appointment::BusyInterval;
use crate::models::employee::{DayOverride, WeeklyPattern};
use crate::models::time::{weekday_index, TimeOfDay, TimeWindow};

use super::resolver::{resolve_day, DaySchedule};
use super::slots::{list_slots, SlotParams};

/// Read-only persistence port for availability queries.
#[async_trait]
pub trait BookingLedger: Send + Sync {
    /// The per-date override for an employee, if one exists.
    async fn day_override(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Option<DayOverride>>;

    /// The employee's recurring weekly defaults.
    async fn weekly_pattern(&self, employee_id: Uuid) -> SalonResult<WeeklyPattern>;

    /// The salon's open/close window, used when no override applies.
    async fn salon_hours(&self, salon_id: Uuid) -> SalonResult<TimeWindow>;

    /// Occupied intervals for (employee, date): every non-rejected
    /// appointment, with the linked service's current duration (or
    /// `None` when the service cannot be resolved).
    async fn busy_intervals(
        &self,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Vec<BusyInterval>>;
}

/// Availability queries for one salon, parameterized over the ledger.
pub struct Availability<'a, L: BookingLedger> {
    ledger: &'a L,
    params: SlotParams,
}

impl<'a, L: BookingLedger> Availability<'a, L> {
    pub fn new(ledger: &'a L) -> Self {
        Self {
            ledger,
            params: SlotParams::default(),
        }
    }

    pub fn with_params(ledger: &'a L, params: SlotParams) -> Self {
        Self { ledger, params }
    }

    /// Resolve the employee's schedule for `date`.
    pub async fn day_schedule(
        &self,
        salon_id: Uuid,
        employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<DaySchedule> {
        let day_override = self.ledger.day_override(employee_id, date).await?;
        if let Some(ov) = &day_override {
            if !ov.working {
                return Ok(DaySchedule::NotWorking);
            }
        }
        let pattern = self.ledger.weekly_pattern(employee_id).await?;
        let salon_hours = self.ledger.salon_hours(salon_id).await?;
        Ok(resolve_day(
            day_override.as_ref(),
            &pattern,
            salon_hours,
            weekday_index(date),
        ))
    }

    /// Bookable start times for (employee, date, service duration),
    /// ascending. Pure read: two calls with no intervening ledger
    /// mutation return identical output.
    ///
    /// `now` is the caller's clock; only its date component decides
    /// whether the "already past" cutoff applies.
    pub async fn slots_for_date(
        &self,
        salon_id: Uuid,
        employee_id: Uuid,
        service_duration_minutes: u16,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> SalonResult<Vec<TimeOfDay>> {
        let schedule = self.day_schedule(salon_id, employee_id, date).await?;
        if !schedule.is_working() {
            return Ok(Vec::new());
        }
        let busy = self.ledger.busy_intervals(employee_id, date).await?;
        let today_cutoff = (date == now.date()).then(|| TimeOfDay::from_naive(now.time()));
        Ok(list_slots(
            &schedule,
            service_duration_minutes,
            &busy,
            today_cutoff,
            &self.params,
        ))
    }

    /// First date after `after` (exclusive) with at least one bookable
    /// slot, scanning at most `params.horizon_days` dates. `None` when
    /// the horizon is exhausted — a defined result, not an error.
    pub async fn next_open_date(
        &self,
        salon_id: Uuid,
        employee_id: Uuid,
        service_duration_minutes: u16,
        after: NaiveDate,
        now: NaiveDateTime,
    ) -> SalonResult<Option<NaiveDate>> {
        for offset in 1..=self.params.horizon_days {
            let Some(date) = after.checked_add_days(Days::new(offset as u64)) else {
                break;
            };
            let slots = self
                .slots_for_date(salon_id, employee_id, service_duration_minutes, date, now)
                .await?;
            if !slots.is_empty() {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }

    /// First date after `after` on which the employee is working at
    /// all. This is the staff-picker variant: it consults only the
    /// schedule resolver and says nothing about free slots.
    pub async fn next_working_date(
        &self,
        salon_id: Uuid,
        employee_id: Uuid,
        after: NaiveDate,
    ) -> SalonResult<Option<NaiveDate>> {
        for offset in 1..=self.params.horizon_days {
            let Some(date) = after.checked_add_days(Days::new(offset as u64)) else {
                break;
            };
            let schedule = self.day_schedule(salon_id, employee_id, date).await?;
            if schedule.is_working() {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }
}
