//! # Coop POS Server Library
//!
//! Router and shared state for the HTTP JSON API. Kept as a library so
//! integration tests can drive the full router without binding a socket.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use coop_db::Database;

use crate::config::ServerConfig;

// =============================================================================
// Shared State
// =============================================================================

/// Shared application state, cloned into every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
}

// =============================================================================
// Router
// =============================================================================

/// Builds the full API router.
///
/// ## Route Map
/// ```text
/// GET    /api/health                   - liveness + database check
/// POST   /api/checkout                 - process a sale          [create-sale]
/// GET    /api/products                 - list (?in_stock=true)   [any user]
/// POST   /api/products                 - create                  [manage-stock]
/// GET    /api/products/:id             - read                    [any user]
/// PUT    /api/products/:id             - update                  [manage-stock]
/// DELETE /api/products/:id             - delete                  [manage-stock]
/// GET    /api/members                  - list                    [any user]
/// POST   /api/members                  - create                  [manage-members]
/// GET    /api/members/:id              - read                    [any user]
/// PUT    /api/members/:id              - update                  [manage-members]
/// DELETE /api/members/:id              - delete                  [manage-members]
/// GET    /api/users                    - list                    [manage-users]
/// POST   /api/users                    - create                  [manage-users]
/// GET    /api/users/:id                - read                    [manage-users]
/// PUT    /api/users/:id                - update                  [manage-users]
/// DELETE /api/users/:id                - delete                  [manage-users]
/// GET    /api/roles                    - role catalog            [manage-users]
/// GET    /api/dashboard                - summary statistics      [view-all-reports]
/// ```
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/checkout", post(handlers::checkout::process_checkout))
        .route(
            "/api/products",
            get(handlers::product::list_products).post(handlers::product::create_product),
        )
        .route(
            "/api/products/:id",
            get(handlers::product::get_product)
                .put(handlers::product::update_product)
                .delete(handlers::product::delete_product),
        )
        .route(
            "/api/members",
            get(handlers::member::list_members).post(handlers::member::create_member),
        )
        .route(
            "/api/members/:id",
            get(handlers::member::get_member)
                .put(handlers::member::update_member)
                .delete(handlers::member::delete_member),
        )
        .route(
            "/api/users",
            get(handlers::user::list_users).post(handlers::user::create_user),
        )
        .route(
            "/api/users/:id",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .delete(handlers::user::delete_user),
        )
        .route("/api/roles", get(handlers::user::list_roles))
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
