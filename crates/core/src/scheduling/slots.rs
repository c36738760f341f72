//! Slot enumeration and conflict filtering.

use crate::models::appointment::BusyInterval;
use crate::models::time::{TimeOfDay, TimeWindow};

use super::resolver::DaySchedule;

/// The two tunables of the availability engine. Call sites take these
/// as parameters; nothing in the engine hard-codes either number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotParams {
    /// Candidate step in minutes, independent of service duration.
    pub granularity_minutes: u16,
    /// How many future dates the next-available search examines.
    pub horizon_days: u32,
}

impl Default for SlotParams {
    fn default() -> Self {
        Self {
            granularity_minutes: 5,
            horizon_days: 14,
        }
    }
}

/// Enumerate bookable start times for one resolved day.
///
/// Candidates start at the window's opening time and advance by
/// `params.granularity_minutes` while the full service interval still
/// fits (`candidate + duration <= window.end`, so the last slot may end
/// exactly at close). A candidate survives unless it
///
/// - starts at or before `today_cutoff` (set only when the queried date
///   is the current date — note `<=`, a slot starting exactly now is
///   already gone),
/// - overlaps the break window, or
/// - overlaps a busy interval. Intervals without a resolvable duration
///   are skipped, not treated as blocking.
///
/// Output is ascending by construction. Degenerate windows and
/// `NotWorking` yield an empty list, never an error.
pub fn list_slots(
    schedule: &DaySchedule,
    service_duration_minutes: u16,
    busy: &[BusyInterval],
    today_cutoff: Option<TimeOfDay>,
    params: &SlotParams,
) -> Vec<TimeOfDay> {
    let DaySchedule::Working { window, break_window } = schedule else {
        return Vec::new();
    };
    if window.is_degenerate() || params.granularity_minutes == 0 {
        return Vec::new();
    }

    let occupied: Vec<TimeWindow> = busy.iter().filter_map(BusyInterval::window).collect();

    let mut slots = Vec::new();
    let mut candidate = window.start;
    while candidate.plus(service_duration_minutes) <= window.end {
        let interval = TimeWindow::new(candidate, candidate.plus(service_duration_minutes));

        let past = today_cutoff.is_some_and(|now| candidate <= now);
        let in_break = break_window.is_some_and(|b| interval.overlaps(&b));
        let taken = occupied.iter().any(|o| interval.overlaps(o));

        if !past && !in_break && !taken {
            slots.push(candidate);
        }
        candidate = candidate.plus(params.granularity_minutes);
    }
    slots
}
