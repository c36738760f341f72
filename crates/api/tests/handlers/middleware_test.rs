use argon2::PasswordVerifier;
use salonsync_api::middleware::auth;
use salonsync_api::middleware::error_handling::map_error;
use salonsync_core::errors::SalonError;

#[tokio::test]
async fn test_error_handling_not_found() {
    let error = SalonError::NotFound("Resource not found".to_string());
    let response = map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_error_handling_validation() {
    let error = SalonError::Validation("Invalid input".to_string());
    let response = map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_error_handling_authentication() {
    let error = SalonError::Authentication("Invalid password".to_string());
    let response = map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_error_handling_authorization() {
    let error = SalonError::Authorization("Not authorized".to_string());
    let response = map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_error_handling_conflict_is_409() {
    // A lost booking race must surface as 409, not as a server error.
    let error = SalonError::Conflict("10:00 on 2025-06-02 was just taken".to_string());
    let response = map_error(error);
    assert_eq!(response.status(), axum::http::StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_error_handling_database() {
    let error = SalonError::Database(eyre::eyre!("Database error"));
    let response = map_error(error);
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_error_handling_internal() {
    let error = SalonError::Internal(Box::new(std::io::Error::new(
        std::io::ErrorKind::Other,
        "Internal error",
    )));
    let response = map_error(error);
    assert_eq!(
        response.status(),
        axum::http::StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_hash_password() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    // The hash is in PHC format and never the plain password.
    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));
}

#[tokio::test]
async fn test_password_verification_roundtrip() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    let argon2 = argon2::Argon2::default();
    let parsed_hash = argon2::PasswordHash::new(&hashed).unwrap();

    assert!(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok());
    assert!(argon2
        .verify_password("wrong_password".as_bytes(), &parsed_hash)
        .is_err());
}

#[tokio::test]
async fn test_hashes_are_salted() {
    // Same password, different salt, different hash.
    let a = auth::hash_password("same_password").unwrap();
    let b = auth::hash_password("same_password").unwrap();
    assert_ne!(a, b);
}
