//! # SalonSync Core
//!
//! Domain models and the scheduling core for the SalonSync booking
//! service. This crate is free of database and HTTP dependencies: the
//! resolver and slot engine are pure functions, and the look-ahead
//! search talks to persistence only through the [`scheduling::BookingLedger`]
//! port.

pub mod errors;
pub mod models;
pub mod scheduling;
