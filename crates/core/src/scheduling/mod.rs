//! The scheduling core: schedule resolution, slot enumeration, and
//! look-ahead search.
//!
//! [`resolver`] and [`slots`] are pure functions over already-loaded
//! data; [`search`] drives them against the [`BookingLedger`] port.

pub mod resolver;
pub mod search;
pub mod slots;

pub use resolver::{resolve_day, DaySchedule};
pub use search::{Availability, BookingLedger};
pub use slots::{list_slots, SlotParams};
