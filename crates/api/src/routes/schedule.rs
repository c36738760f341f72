use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/employees/:id/schedule",
            get(handlers::schedule::get_month_schedule),
        )
        .route(
            "/api/employees/:id/schedule/week",
            put(handlers::schedule::update_weekly_pattern),
        )
        .route(
            "/api/employees/:id/schedule/:date",
            put(handlers::schedule::upsert_day_override),
        )
}
