pub mod appointment;
pub mod employee;
pub mod review;
pub mod salon;
pub mod schedule_override;
pub mod service;
