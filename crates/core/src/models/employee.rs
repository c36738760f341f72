//! Staff members and their recurring weekly schedule.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::time::{TimeOfDay, TimeWindow};

/// An employee's recurring weekly defaults: which weekdays they work
/// (Monday = 0) and an optional recurring break per weekday.
///
/// Built from stored text — a CSV day list (`"0,1,2,3,4"`) and a JSON
/// break map (`{"0": {"start": "12:00", "end": "12:30"}}`). Stored data
/// predates this service and is occasionally garbled, so construction
/// is deliberately lossy: entries that don't parse are dropped, and a
/// break missing either endpoint counts as no break. Nothing here ever
/// raises to a caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyPattern {
    working_days: Vec<u8>,
    breaks: BTreeMap<u8, TimeWindow>,
}

/// JSON shape of one entry in the stored break map.
#[derive(Debug, Clone, Deserialize)]
struct StoredBreak {
    start: Option<String>,
    end: Option<String>,
}

impl WeeklyPattern {
    pub fn new(working_days: Vec<u8>, breaks: BTreeMap<u8, TimeWindow>) -> Self {
        Self { working_days, breaks }
    }

    /// Parse the stored representation, tolerating malformed input.
    pub fn from_stored(work_days_csv: &str, breaks_json: &str) -> Self {
        let working_days: Vec<u8> = work_days_csv
            .split(',')
            .filter_map(|d| d.trim().parse::<u8>().ok())
            .filter(|d| *d < 7)
            .collect();

        let breaks = serde_json::from_str::<BTreeMap<String, StoredBreak>>(breaks_json)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(day, b)| {
                let day: u8 = day.parse().ok()?;
                let window = TimeWindow::parse_opt(b.start.as_deref(), b.end.as_deref())?;
                (day < 7).then_some((day, window))
            })
            .collect();

        Self { working_days, breaks }
    }

    pub fn works_on(&self, weekday: u8) -> bool {
        self.working_days.contains(&weekday)
    }

    pub fn break_for(&self, weekday: u8) -> Option<TimeWindow> {
        self.breaks.get(&weekday).copied()
    }

    pub fn working_days(&self) -> &[u8] {
        &self.working_days
    }
}

/// A per-(employee, date) exception that fully replaces the weekly
/// default for that date. At most one exists per (employee, date); the
/// database enforces the uniqueness. Overrides never expire — past
/// dates stay queryable as history.
///
/// Times are carried as stored text and parsed by the resolver, which
/// treats malformed values as "not working" / "no break" rather than
/// failing the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayOverride {
    pub date: NaiveDate,
    pub working: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub break_start: Option<String>,
    pub break_end: Option<String>,
}

impl DayOverride {
    /// The working window, if the stored times parse. `None` means the
    /// override is unusable and the day counts as not working.
    pub fn window(&self) -> Option<TimeWindow> {
        TimeWindow::parse_opt(self.start_time.as_deref(), self.end_time.as_deref())
    }

    pub fn break_window(&self) -> Option<TimeWindow> {
        TimeWindow::parse_opt(self.break_start.as_deref(), self.break_end.as_deref())
    }
}

// ── API DTOs ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub salon_id: Uuid,
    pub display_name: String,
    pub work_days: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    pub display_name: String,
    pub password: String,
    /// Weekday indices (Monday = 0). Defaults to Mon–Fri.
    pub work_days: Option<Vec<u8>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateWeeklyPatternRequest {
    pub work_days: Vec<u8>,
    /// Weekday index → break window. Omitted weekdays have no break.
    #[serde(default)]
    pub breaks: BTreeMap<u8, BreakRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakRequest {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDayOverrideRequest {
    pub working: bool,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub break_start: Option<TimeOfDay>,
    pub break_end: Option<TimeOfDay>,
}

/// One day in the employee's month calendar view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_working: bool,
    pub start: Option<TimeOfDay>,
    pub end: Option<TimeOfDay>,
    pub break_start: Option<TimeOfDay>,
    pub break_end: Option<TimeOfDay>,
    pub has_override: bool,
    pub appointments: Vec<super::appointment::AppointmentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthScheduleResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}
