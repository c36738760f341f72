use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/appointments",
            post(handlers::appointment::book_appointment)
                .get(handlers::appointment::list_client_appointments),
        )
        .route(
            "/api/appointments/:id",
            get(handlers::appointment::get_appointment)
                .delete(handlers::appointment::cancel_appointment),
        )
        .route(
            "/api/appointments/:id/status",
            post(handlers::appointment::update_status),
        )
        .route(
            "/api/appointments/:id/propose",
            post(handlers::appointment::propose_reschedule),
        )
        .route(
            "/api/appointments/:id/respond",
            post(handlers::appointment::respond_to_proposal),
        )
        .route(
            "/api/employees/:id/appointments/pending",
            get(handlers::appointment::list_pending_appointments),
        )
}
