/// Credential hashing and verification for staff accounts
pub mod auth;
/// Error handling and HTTP status code mapping
pub mod error_handling;
