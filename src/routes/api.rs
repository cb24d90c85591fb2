use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, events, skill};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router
///
/// The skill endpoint is public: the platform calls it without credentials.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(api::root))
        .route("/alexa", post(skill::skill_request))
        .route("/health", get(api::health_check))
        .route("/n8n-status", get(api::workflow_status))
        .route("/send-test-event", post(events::send_test_event))
        .route("/test-alexa-request", post(skill::test_skill_request))
}

/// API router mounted at the root and again under each of `prefixes`
///
/// With an `/alexa` prefix the skill endpoint answers at both `/alexa` and
/// `/alexa/alexa`; `GET /alexa` is the nested banner.
pub fn create_app_router(prefixes: &[String]) -> Router<Arc<AppState>> {
    let api = create_api_router();
    prefixes
        .iter()
        .fold(api.clone(), |router, prefix| router.nest(prefix, api.clone()))
        .layer(TraceLayer::new_for_http())
}
