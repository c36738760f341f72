use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/salons",
            post(handlers::salon::create_salon).get(handlers::salon::list_salons),
        )
        .route(
            "/api/salons/:id",
            get(handlers::salon::get_salon).delete(handlers::salon::delete_salon),
        )
        .route(
            "/api/salons/:id/hours",
            put(handlers::salon::update_salon_hours),
        )
        .route(
            "/api/salons/:id/margin",
            put(handlers::salon::update_salon_margin),
        )
        .route(
            "/api/salons/:id/services",
            post(handlers::salon::create_service).get(handlers::salon::list_services),
        )
        .route("/api/services/:id", delete(handlers::salon::delete_service))
        .route(
            "/api/salons/:id/employees",
            post(handlers::salon::create_employee).get(handlers::salon::list_employees),
        )
        .route("/api/employees/:id", delete(handlers::salon::delete_employee))
        .route(
            "/api/salons/:id/report",
            get(handlers::salon::revenue_report),
        )
}
