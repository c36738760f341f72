use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use salonsync_core::errors::SalonResult;
use salonsync_core::models::appointment::BusyInterval;
use salonsync_core::models::employee::{DayOverride, WeeklyPattern};
use salonsync_core::models::time::{TimeOfDay, TimeWindow};
use salonsync_core::scheduling::{Availability, BookingLedger, SlotParams};
use uuid::Uuid;

/// In-memory ledger fixture. Counts calls so tests can assert the
/// horizon is a hard cap.
struct FakeLedger {
    pattern: WeeklyPattern,
    salon_hours: TimeWindow,
    overrides: HashMap<NaiveDate, DayOverride>,
    busy: HashMap<NaiveDate, Vec<BusyInterval>>,
    override_lookups: Mutex<u32>,
}

impl FakeLedger {
    fn new(pattern: WeeklyPattern) -> Self {
        Self {
            pattern,
            salon_hours: TimeWindow::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(17, 0)),
            overrides: HashMap::new(),
            busy: HashMap::new(),
            override_lookups: Mutex::new(0),
        }
    }

    fn closed() -> Self {
        Self::new(WeeklyPattern::from_stored("", "{}"))
    }

    fn with_override(mut self, ov: DayOverride) -> Self {
        self.overrides.insert(ov.date, ov);
        self
    }

    fn override_lookups(&self) -> u32 {
        *self.override_lookups.lock().unwrap()
    }
}

#[async_trait]
impl BookingLedger for FakeLedger {
    async fn day_override(
        &self,
        _employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Option<DayOverride>> {
        *self.override_lookups.lock().unwrap() += 1;
        Ok(self.overrides.get(&date).cloned())
    }

    async fn weekly_pattern(&self, _employee_id: Uuid) -> SalonResult<WeeklyPattern> {
        Ok(self.pattern.clone())
    }

    async fn salon_hours(&self, _salon_id: Uuid) -> SalonResult<TimeWindow> {
        Ok(self.salon_hours)
    }

    async fn busy_intervals(
        &self,
        _employee_id: Uuid,
        date: NaiveDate,
    ) -> SalonResult<Vec<BusyInterval>> {
        Ok(self.busy.get(&date).cloned().unwrap_or_default())
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn noon(d: NaiveDate) -> NaiveDateTime {
    d.and_hms_opt(12, 0, 0).unwrap()
}

fn working_override(d: NaiveDate) -> DayOverride {
    DayOverride {
        date: d,
        working: true,
        start_time: Some("10:00".to_string()),
        end_time: Some("12:00".to_string()),
        break_start: None,
        break_end: None,
    }
}

#[tokio::test]
async fn not_working_override_hides_all_slots() {
    // Monday 2025-06-02 would be open per the weekly default, but the
    // override says no.
    let d = date(2025, 6, 2);
    let ledger = FakeLedger::new(WeeklyPattern::from_stored("0,1,2,3,4", "{}")).with_override(
        DayOverride {
            date: d,
            working: false,
            start_time: None,
            end_time: None,
            break_start: None,
            break_end: None,
        },
    );
    let availability = Availability::new(&ledger);

    let slots = availability
        .slots_for_date(Uuid::new_v4(), Uuid::new_v4(), 30, d, noon(date(2025, 5, 1)))
        .await
        .unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn exhausted_horizon_returns_none() {
    let ledger = FakeLedger::closed();
    let availability = Availability::new(&ledger);

    let start = date(2025, 6, 1);
    let found = availability
        .next_open_date(Uuid::new_v4(), Uuid::new_v4(), 30, start, noon(start))
        .await
        .unwrap();
    assert_eq!(found, None);
    // 14 distinct dates examined, then stop — no unbounded scanning.
    assert_eq!(ledger.override_lookups(), 14);
}

#[tokio::test]
async fn finds_first_date_with_capacity() {
    // Everything closed except day 10 after the start date.
    let start = date(2025, 6, 1);
    let open = date(2025, 6, 11);
    let ledger = FakeLedger::closed().with_override(working_override(open));
    let availability = Availability::new(&ledger);

    let found = availability
        .next_open_date(Uuid::new_v4(), Uuid::new_v4(), 30, start, noon(start))
        .await
        .unwrap();
    assert_eq!(found, Some(open));
}

#[tokio::test]
async fn search_starts_the_day_after() {
    // The start date itself is open but must not be suggested.
    let start = date(2025, 6, 11);
    let next = date(2025, 6, 12);
    let ledger = FakeLedger::closed()
        .with_override(working_override(start))
        .with_override(working_override(next));
    let availability = Availability::new(&ledger);

    let found = availability
        .next_open_date(Uuid::new_v4(), Uuid::new_v4(), 30, start, noon(start))
        .await
        .unwrap();
    assert_eq!(found, Some(next));
}

#[tokio::test]
async fn fully_booked_day_is_skipped_by_slot_search() {
    // Day 1 after start is working 10:00-12:00 but a 120-minute booking
    // fills it; day 2 is open. The slot-level search must skip day 1.
    let start = date(2025, 6, 1);
    let full = date(2025, 6, 2);
    let open = date(2025, 6, 3);
    let mut ledger = FakeLedger::closed()
        .with_override(working_override(full))
        .with_override(working_override(open));
    ledger.busy.insert(
        full,
        vec![BusyInterval {
            start: TimeOfDay::from_hm(10, 0),
            duration_minutes: Some(120),
        }],
    );
    let availability = Availability::new(&ledger);

    let found = availability
        .next_open_date(Uuid::new_v4(), Uuid::new_v4(), 30, start, noon(start))
        .await
        .unwrap();
    assert_eq!(found, Some(open));
}

#[tokio::test]
async fn working_date_search_ignores_bookings() {
    // Same setup as above: the staff-picker variant answers "working at
    // all", so the fully booked day is still a hit.
    let start = date(2025, 6, 1);
    let full = date(2025, 6, 2);
    let mut ledger = FakeLedger::closed().with_override(working_override(full));
    ledger.busy.insert(
        full,
        vec![BusyInterval {
            start: TimeOfDay::from_hm(10, 0),
            duration_minutes: Some(120),
        }],
    );
    let availability = Availability::new(&ledger);

    let found = availability
        .next_working_date(Uuid::new_v4(), Uuid::new_v4(), start)
        .await
        .unwrap();
    assert_eq!(found, Some(full));
}

#[tokio::test]
async fn today_queries_respect_the_clock() {
    // Query today at 12:00 sharp: the 12:00 slot itself is excluded
    // (<= boundary), 12:05 is the first offer.
    let today = date(2025, 6, 2); // Monday
    let ledger = FakeLedger::new(WeeklyPattern::from_stored("0,1,2,3,4", "{}"));
    let availability = Availability::new(&ledger);

    let slots = availability
        .slots_for_date(Uuid::new_v4(), Uuid::new_v4(), 30, today, noon(today))
        .await
        .unwrap();
    assert!(!slots.contains(&TimeOfDay::from_hm(12, 0)));
    assert_eq!(slots.first().copied(), Some(TimeOfDay::from_hm(12, 5)));
}

#[tokio::test]
async fn custom_horizon_is_honored() {
    let start = date(2025, 6, 1);
    let open = date(2025, 6, 11); // 10 days out
    let ledger = FakeLedger::closed().with_override(working_override(open));
    let short = Availability::with_params(
        &ledger,
        SlotParams {
            granularity_minutes: 5,
            horizon_days: 7,
        },
    );

    let found = short
        .next_open_date(Uuid::new_v4(), Uuid::new_v4(), 30, start, noon(start))
        .await
        .unwrap();
    assert_eq!(found, None);
}
