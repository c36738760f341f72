//! # Authentication Module
//!
//! This module provides authentication-related utilities for the SalonSync
//! API: password hashing and verification for staff accounts.
//!
//! The implementation uses Argon2, a secure password hashing algorithm,
//! to protect staff passwords from common attacks like rainbow tables
//! and brute force attempts.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, SaltString},
    Argon2, PasswordHasher, PasswordVerifier,
};
use eyre::Result;
use salonsync_core::errors::{SalonError, SalonResult};
use uuid::Uuid;

/// Hashes a password using the Argon2 algorithm
///
/// This function securely hashes passwords before storage in the database,
/// automatically generating a random salt and using default Argon2
/// parameters. The result is in PHC string format (includes algorithm,
/// version, parameters, salt, and hash).
pub fn hash_password(password: &str) -> Result<String> {
    // Generate a fresh, random salt
    let salt = SaltString::generate(&mut OsRng);

    // Create default Argon2 instance
    let argon2 = Argon2::default();

    // Hash the password with salt
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| eyre::eyre!("Error hashing password: {}", e))?
        .to_string();

    Ok(password_hash)
}

/// Verifies a password against the stored hash for a staff account
///
/// Looks up the employee and checks the provided password against the
/// stored Argon2 hash. A hash that fails to parse counts as a failed
/// verification rather than an internal error.
pub async fn verify_employee_password(
    pool: &sqlx::PgPool,
    employee_id: Uuid,
    password: &str,
) -> SalonResult<bool> {
    let employee = salonsync_db::repositories::employee::get_employee_by_id(pool, employee_id)
        .await
        .map_err(SalonError::Database)?
        .ok_or_else(|| {
            SalonError::NotFound(format!("Employee with ID {} not found", employee_id))
        })?;

    let Ok(parsed) = PasswordHash::new(&employee.password_hash) else {
        return Ok(false);
    };

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
