use pretty_assertions::assert_eq;
use rstest::rstest;
use salonsync_core::models::appointment::BusyInterval;
use salonsync_core::models::time::{TimeOfDay, TimeWindow};
use salonsync_core::scheduling::{list_slots, DaySchedule, SlotParams};

fn t(h: u16, m: u16) -> TimeOfDay {
    TimeOfDay::from_hm(h, m)
}

fn working(start: TimeOfDay, end: TimeOfDay, break_window: Option<TimeWindow>) -> DaySchedule {
    DaySchedule::Working {
        window: TimeWindow::new(start, end),
        break_window,
    }
}

fn busy(start: TimeOfDay, duration: u16) -> BusyInterval {
    BusyInterval {
        start,
        duration_minutes: Some(duration),
    }
}

#[test]
fn not_working_yields_no_slots() {
    let slots = list_slots(&DaySchedule::NotWorking, 30, &[], None, &SlotParams::default());
    assert!(slots.is_empty());
}

#[rstest]
#[case(t(17, 0), t(9, 0))] // inverted
#[case(t(12, 0), t(12, 0))] // empty
fn degenerate_window_yields_no_slots(#[case] start: TimeOfDay, #[case] end: TimeOfDay) {
    let slots = list_slots(&working(start, end, None), 30, &[], None, &SlotParams::default());
    assert!(slots.is_empty());
}

#[test]
fn slot_count_matches_closed_form() {
    // Window [S, E) with no break and no bookings: for (E-S) divisible
    // by the 5-minute step and d <= E-S, expect floor((E-S-d)/5) + 1.
    let cases = [(9u16, 17u16, 30u16), (9, 12, 60), (10, 11, 5), (9, 10, 60)];
    for (start_h, end_h, duration) in cases {
        let window_min = (end_h - start_h) * 60;
        let expected = ((window_min - duration) / 5 + 1) as usize;
        let slots = list_slots(
            &working(t(start_h, 0), t(end_h, 0), None),
            duration,
            &[],
            None,
            &SlotParams::default(),
        );
        assert_eq!(slots.len(), expected, "window {start_h}-{end_h}, d={duration}");
    }
}

#[test]
fn last_slot_may_end_exactly_at_close() {
    let slots = list_slots(
        &working(t(9, 0), t(17, 0), None),
        30,
        &[],
        None,
        &SlotParams::default(),
    );
    assert_eq!(slots.first().copied(), Some(t(9, 0)));
    // 16:30 + 30min == 17:00 fits; 16:35 would overflow.
    assert_eq!(slots.last().copied(), Some(t(16, 30)));
}

#[test]
fn slots_are_strictly_ascending() {
    let slots = list_slots(
        &working(
            t(9, 0),
            t(17, 0),
            Some(TimeWindow::new(t(12, 0), t(12, 30))),
        ),
        45,
        &[busy(t(14, 0), 30)],
        None,
        &SlotParams::default(),
    );
    assert!(slots.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn break_window_scenario_from_booking_flow() {
    // 09:00–17:00, break 12:00–12:30, 30-minute service, future date.
    // Last pre-break start is 11:30 (ends exactly at 12:00, which does
    // not intersect the half-open break); 11:35 through 12:25 all
    // overlap the break; enumeration resumes at 12:30 and the final
    // start is 16:30.
    let slots = list_slots(
        &working(
            t(9, 0),
            t(17, 0),
            Some(TimeWindow::new(t(12, 0), t(12, 30))),
        ),
        30,
        &[],
        None,
        &SlotParams::default(),
    );

    assert!(slots.contains(&t(9, 0)));
    assert!(slots.contains(&t(11, 30))); // ends 12:00, adjacent to break
    for blocked in [t(11, 35), t(11, 55), t(12, 0), t(12, 25)] {
        assert!(!slots.contains(&blocked), "{blocked} should overlap the break");
    }
    assert!(slots.contains(&t(12, 30)));
    assert_eq!(slots.last().copied(), Some(t(16, 30)));
}

#[test]
fn existing_appointment_blocks_overlapping_starts() {
    // Confirmed 30-minute appointment at 10:00: every start in
    // (09:30, 10:30) intersects [10:00, 10:30); 09:30 (ends 10:00) and
    // 10:30 survive.
    let slots = list_slots(
        &working(t(9, 0), t(17, 0), None),
        30,
        &[busy(t(10, 0), 30)],
        None,
        &SlotParams::default(),
    );

    assert!(slots.contains(&t(9, 30)));
    for blocked in [t(9, 35), t(9, 45), t(10, 0), t(10, 25)] {
        assert!(!slots.contains(&blocked), "{blocked} should conflict");
    }
    assert!(slots.contains(&t(10, 30)));
}

#[test]
fn today_cutoff_excludes_slot_starting_exactly_now() {
    // The boundary is <=: a slot starting at the current minute is gone.
    let slots = list_slots(
        &working(t(9, 0), t(17, 0), None),
        30,
        &[],
        Some(t(10, 0)),
        &SlotParams::default(),
    );
    assert!(!slots.contains(&t(10, 0)));
    assert_eq!(slots.first().copied(), Some(t(10, 5)));
}

#[test]
fn no_cutoff_on_future_dates() {
    let slots = list_slots(
        &working(t(9, 0), t(17, 0), None),
        30,
        &[],
        None,
        &SlotParams::default(),
    );
    assert_eq!(slots.first().copied(), Some(t(9, 0)));
}

#[test]
fn busy_interval_without_service_does_not_block() {
    // An appointment whose service can't be resolved carries no
    // duration and is skipped by the conflict check (fail-open,
    // documented in DESIGN.md).
    let orphan = BusyInterval {
        start: t(10, 0),
        duration_minutes: None,
    };
    let slots = list_slots(
        &working(t(9, 0), t(17, 0), None),
        30,
        &[orphan],
        None,
        &SlotParams::default(),
    );
    assert!(slots.contains(&t(10, 0)));
}

#[test]
fn service_longer_than_window_yields_nothing() {
    let slots = list_slots(
        &working(t(9, 0), t(10, 0), None),
        90,
        &[],
        None,
        &SlotParams::default(),
    );
    assert!(slots.is_empty());
}

#[test]
fn idempotent_given_same_inputs() {
    let schedule = working(
        t(9, 0),
        t(17, 0),
        Some(TimeWindow::new(t(12, 0), t(13, 0))),
    );
    let bookings = [busy(t(9, 30), 45), busy(t(15, 0), 30)];
    let first = list_slots(&schedule, 30, &bookings, Some(t(10, 0)), &SlotParams::default());
    let second = list_slots(&schedule, 30, &bookings, Some(t(10, 0)), &SlotParams::default());
    assert_eq!(first, second);
}

#[test]
fn custom_granularity_is_honored() {
    let params = SlotParams {
        granularity_minutes: 15,
        ..SlotParams::default()
    };
    let slots = list_slots(&working(t(9, 0), t(10, 0), None), 30, &[], None, &params);
    assert_eq!(slots, vec![t(9, 0), t(9, 15), t(9, 30)]);
}

#[test]
fn back_to_back_bookings_leave_no_gap_slots() {
    let slots = list_slots(
        &working(t(9, 0), t(11, 0), None),
        30,
        &[busy(t(9, 30), 30), busy(t(10, 0), 30)],
        None,
        &SlotParams::default(),
    );
    assert_eq!(slots, vec![t(9, 0), t(10, 30)]);
}
