use axum::Router;
use axum_test::TestServer;
use std::sync::Arc;

use salonsync_api::{routes, ApiState};

// Merging every route module the way the server does must not panic;
// this catches conflicting path registrations.
#[test]
fn test_all_routes_merge_cleanly() {
    let _app: Router<Arc<ApiState>> = Router::new()
        .merge(routes::health::routes())
        .merge(routes::availability::routes())
        .merge(routes::schedule::routes())
        .merge(routes::appointment::routes())
        .merge(routes::review::routes())
        .merge(routes::salon::routes());
}

#[tokio::test]
async fn test_health_and_version_respond() {
    let ctx = crate::test_utils::TestContext::new();
    let app = Router::new()
        .merge(routes::health::routes())
        .with_state(ctx.build_state());
    let server = TestServer::new(app).unwrap();

    let health = server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<serde_json::Value>()["status"], "ok");

    let version = server.get("/version").await;
    version.assert_status_ok();
    assert_eq!(
        version.json::<serde_json::Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );
}

#[tokio::test]
async fn test_state_is_shared() {
    let ctx = crate::test_utils::TestContext::new();
    let state = ctx.build_state();
    let second = Arc::clone(&state);
    assert_eq!(Arc::strong_count(&second), 2);
}
