//! Axum routers for package endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::super::state::AppState;
use super::handlers::{
    create_package, delete_package, list_all, list_on_sale, toggle_active, toggle_popular,
    update_package,
};

/// Public catalogue, mounted at `/api/packages`.
pub fn public_package_routes() -> Router<AppState> {
    Router::new().route("/", get(list_on_sale))
}

/// Package administration, mounted at `/api/admin/packages`.
pub fn admin_package_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_all).post(create_package))
        .route("/:id", put(update_package).delete(delete_package))
        .route("/:id/toggle-active", post(toggle_active))
        .route("/:id/toggle-popular", post(toggle_popular))
}
