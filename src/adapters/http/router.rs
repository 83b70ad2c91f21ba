//! Top-level router: every module router, the auth layer and tower-http middleware.

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

use super::contact::{admin_contact_routes, public_contact_routes};
use super::membership::{admin_membership_routes, member_routes};
use super::middleware::{auth_middleware, AuthState};
use super::packages::{admin_package_routes, public_package_routes};
use super::relay::relay_routes;
use super::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Routes without cross-cutting layers; `app_router` adds those.
pub fn api_routes() -> Router<AppState> {
    let admin = admin_membership_routes()
        .nest("/packages", admin_package_routes())
        .nest("/messages", admin_contact_routes());

    let api = relay_routes()
        .nest("/me", member_routes())
        .nest("/packages", public_package_routes())
        .nest("/contact", public_contact_routes())
        .nest("/admin", admin);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .allow_origin(allow_origin)
}

/// Builds the full application.
pub fn app_router(state: AppState, server: &ServerConfig) -> Router {
    let sessions: AuthState = state.sessions.clone();

    api_routes()
        .layer(middleware::from_fn_with_state(sessions, auth_middleware))
        .with_state(state)
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}
