/// Appointment booking and lifecycle routes
pub mod appointment;
/// Availability query routes
pub mod availability;
/// Health check routes
pub mod health;
/// Review routes
pub mod review;
/// Salon administration routes
pub mod salon;
/// Staff schedule routes
pub mod schedule;
