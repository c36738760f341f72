pub mod appointment;
pub mod availability;
pub mod employee;
pub mod review;
pub mod salon;
pub mod service;
pub mod time;
