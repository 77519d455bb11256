//! # Product Handlers

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use coop_core::validation::ProductInput;
use coop_core::{CoreError, Permission, Product};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductListParams {
    /// When true, only products with stock on hand (the POS catalog).
    #[serde(default)]
    pub in_stock: bool,
}

/// GET /api/products
pub async fn list_products(
    State(state): State<AppState>,
    _user: CurrentUser,
    Query(params): Query<ProductListParams>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = if params.in_stock {
        state.db.products().list_in_stock().await?
    } else {
        state.db.products().list().await?
    };

    Ok(Json(products))
}

/// GET /api/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let product = state
        .db
        .products()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", &id))?;

    Ok(Json(product))
}

/// POST /api/products
pub async fn create_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    user.require(Permission::ManageStock)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, name = %input.name, "create_product");

    let product = state.db.products().create(&input).await?;
    Ok(Json(product))
}

/// PUT /api/products/:id
pub async fn update_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    user.require(Permission::ManageStock)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, id = %id, "update_product");

    let product = state.db.products().update(&id, &input).await?;
    Ok(Json(product))
}

/// DELETE /api/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require(Permission::ManageStock)?;

    debug!(actor = %user.0.email, id = %id, "delete_product");

    state.db.products().delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Item deleted successfully." })))
}
