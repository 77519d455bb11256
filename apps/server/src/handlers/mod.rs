//! # HTTP Handlers
//!
//! One module per resource, mirroring the route map in the router.

pub mod checkout;
pub mod dashboard;
pub mod member;
pub mod product;
pub mod user;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// Liveness endpoint: no identity required.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = state.db.health_check().await;
    Json(HealthResponse {
        status: if database { "ok" } else { "degraded" },
        database,
    })
}
