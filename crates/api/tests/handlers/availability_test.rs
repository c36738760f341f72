use chrono::NaiveDate;
use mockall::predicate;
use salonsync_core::models::availability::{SlotsResponse, StaffAvailabilityEntry};
use salonsync_core::models::employee::{DayOverride, WeeklyPattern};
use salonsync_core::models::time::{weekday_index, TimeOfDay, TimeWindow};
use salonsync_core::scheduling::{resolve_day, DaySchedule};
use salonsync_db::models::DbScheduleOverride;
use uuid::Uuid;

use crate::test_utils::TestContext;

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

// Mirror of the ledger's row-to-override conversion, so the mock repo
// rows flow through the same resolution the handler performs.
fn override_from_row(row: DbScheduleOverride) -> DayOverride {
    DayOverride {
        date: row.date,
        working: row.is_working,
        start_time: row.start_time,
        end_time: row.end_time,
        break_start: row.break_start,
        break_end: row.break_end,
    }
}

#[tokio::test]
async fn test_non_working_override_resolves_closed() {
    let mut ctx = TestContext::new();
    let employee_id = Uuid::new_v4();
    let date = d("2025-06-02");

    ctx.override_repo
        .expect_get_override()
        .with(predicate::eq(employee_id), predicate::eq(date))
        .returning(move |_, _| {
            Ok(Some(DbScheduleOverride {
                id: Uuid::new_v4(),
                employee_id,
                date,
                is_working: false,
                start_time: None,
                end_time: None,
                break_start: None,
                break_end: None,
            }))
        });

    let row = ctx
        .override_repo
        .get_override(employee_id, date)
        .await
        .unwrap()
        .map(override_from_row);

    // Monday with a weekly default that would open the day; the
    // override still closes it.
    let pattern = WeeklyPattern::from_stored("0,1,2,3,4", "{}");
    let hours = TimeWindow::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(17, 0));
    let schedule = resolve_day(row.as_ref(), &pattern, hours, weekday_index(date));
    assert_eq!(schedule, DaySchedule::NotWorking);
}

#[tokio::test]
async fn test_working_override_window_taken_verbatim() {
    let mut ctx = TestContext::new();
    let employee_id = Uuid::new_v4();
    let date = d("2025-06-07");

    ctx.override_repo
        .expect_get_override()
        .returning(move |_, _| {
            Ok(Some(DbScheduleOverride {
                id: Uuid::new_v4(),
                employee_id,
                date,
                is_working: true,
                start_time: Some("10:00".to_string()),
                end_time: Some("14:00".to_string()),
                break_start: None,
                break_end: None,
            }))
        });

    let row = ctx
        .override_repo
        .get_override(employee_id, date)
        .await
        .unwrap()
        .map(override_from_row);

    // Saturday is not in the weekly pattern, but the override opens it
    // anyway with its own hours rather than the salon's.
    let pattern = WeeklyPattern::from_stored("0,1,2,3,4", "{}");
    let hours = TimeWindow::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(17, 0));
    let schedule = resolve_day(row.as_ref(), &pattern, hours, weekday_index(date));
    assert_eq!(
        schedule,
        DaySchedule::Working {
            window: TimeWindow::new(TimeOfDay::from_hm(10, 0), TimeOfDay::from_hm(14, 0)),
            break_window: None,
        }
    );
}

#[test]
fn test_slots_response_wire_format() {
    let response = SlotsResponse {
        employee_id: Uuid::nil(),
        date: d("2025-06-02"),
        slots: vec![TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(9, 5)],
        next_available_date: None,
    };

    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(json["date"], "2025-06-02");
    assert_eq!(json["slots"][0], "09:00");
    assert_eq!(json["slots"][1], "09:05");
    assert!(json["next_available_date"].is_null());
}

#[test]
fn test_staff_entry_carries_next_working_date_when_closed() {
    let entry = StaffAvailabilityEntry {
        employee_id: Uuid::nil(),
        display_name: "Marta".to_string(),
        is_working: false,
        next_working_date: Some(d("2025-06-09")),
        avg_rating: 4.5,
        reviews_count: 12,
    };

    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["is_working"], false);
    assert_eq!(json["next_working_date"], "2025-06-09");
    assert_eq!(json["reviews_count"], 12);
}
