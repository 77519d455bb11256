//! # Checkout Handler

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use coop_core::{CheckoutRequest, Permission};
use coop_db::CheckoutReceipt;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Success acknowledgement: one human-readable message plus the receipt
/// data. Nothing is persisted to look up later.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub message: String,
    #[serde(flatten)]
    pub receipt: CheckoutReceipt,
}

/// POST /api/checkout
pub async fn process_checkout(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    user.require(Permission::CreateSale)?;

    debug!(
        cashier = %user.0.email,
        lines = request.cart.len(),
        "process_checkout"
    );

    let receipt = state.db.checkout().process(&request).await?;

    Ok(Json(CheckoutResponse {
        message: "Sale processed successfully!".to_string(),
        receipt,
    }))
}
