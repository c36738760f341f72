use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments/:id/review",
            post(handlers::review::create_review),
        )
        .route(
            "/api/employees/:id/reviews",
            get(handlers::review::list_employee_reviews),
        )
}
