/// Appointment booking and lifecycle handlers
pub mod appointment;
/// Availability query handlers
pub mod availability;
/// Review creation and listing handlers
pub mod review;
/// Salon administration handlers
pub mod salon;
/// Staff schedule management handlers
pub mod schedule;

pub(crate) mod convert;
