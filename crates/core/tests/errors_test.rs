use std::error::Error;
use salonsync_core::errors::{SalonError, SalonResult};

#[test]
fn test_salon_error_display() {
    let not_found = SalonError::NotFound("Employee not found".to_string());
    let validation = SalonError::Validation("Invalid input".to_string());
    let authentication = SalonError::Authentication("Invalid password".to_string());
    let authorization = SalonError::Authorization("Not authorized".to_string());
    let conflict = SalonError::Conflict("Slot already taken".to_string());
    let database = SalonError::Database(eyre::eyre!("Database connection failed"));

    assert_eq!(
        not_found.to_string(),
        "Resource not found: Employee not found"
    );
    assert_eq!(validation.to_string(), "Validation error: Invalid input");
    assert_eq!(
        authentication.to_string(),
        "Authentication error: Invalid password"
    );
    assert_eq!(
        authorization.to_string(),
        "Authorization error: Not authorized"
    );
    assert_eq!(conflict.to_string(), "Booking conflict: Slot already taken");
    assert!(database.to_string().contains("Database error:"));
}

#[test]
fn test_error_conversion() {
    let io_error = std::io::Error::other("IO error");
    let salon_error = SalonError::Internal(Box::new(io_error));

    assert!(salon_error.source().is_some());
    assert!(salon_error.to_string().contains("IO error"));
}

#[test]
fn test_salon_result() {
    let result: SalonResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: SalonResult<i32> = Err(SalonError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
