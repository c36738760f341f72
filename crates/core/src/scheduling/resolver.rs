//! Three-tier schedule resolution.
//!
//! For a given employee and date the effective schedule is decided by a
//! strict priority order:
//!
//! 1. a [`DayOverride`] for that exact date, which governs completely —
//!    including "not working" on a day the weekly default would open;
//! 2. the employee's [`WeeklyPattern`], which opens the **salon's**
//!    hours plus the recurring break for that weekday;
//! 3. otherwise the employee is not working.

use crate::models::employee::{DayOverride, WeeklyPattern};
use crate::models::time::TimeWindow;

/// Resolved schedule for one employee on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySchedule {
    NotWorking,
    Working {
        window: TimeWindow,
        break_window: Option<TimeWindow>,
    },
}

impl DaySchedule {
    pub fn is_working(&self) -> bool {
        matches!(self, DaySchedule::Working { .. })
    }
}

/// Apply the three-tier policy. Pure; never fails.
///
/// Malformed stored times are tolerated: an override whose start/end
/// don't parse resolves to `NotWorking`, and an unparseable break is
/// dropped rather than surfaced as an error.
pub fn resolve_day(
    day_override: Option<&DayOverride>,
    pattern: &WeeklyPattern,
    salon_hours: TimeWindow,
    weekday: u8,
) -> DaySchedule {
    if let Some(ov) = day_override {
        if !ov.working {
            return DaySchedule::NotWorking;
        }
        // Override window is taken verbatim — the weekday is irrelevant.
        return match ov.window() {
            Some(window) => DaySchedule::Working {
                window,
                break_window: ov.break_window(),
            },
            None => DaySchedule::NotWorking,
        };
    }

    if pattern.works_on(weekday) {
        DaySchedule::Working {
            window: salon_hours,
            break_window: pattern.break_for(weekday),
        }
    } else {
        DaySchedule::NotWorking
    }
}
