//! # User & Role Handlers
//!
//! User administration is gated by the manage-users permission, which
//! only the Super Admin role carries. The role catalog is read-only:
//! roles and their permission sets are code, not rows.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use tracing::debug;

use coop_core::validation::{NewUser, UserUpdate};
use coop_core::{CoreError, Permission, Role, User};

use crate::auth::{hash_password, CurrentUser};
use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Users
// =============================================================================

/// GET /api/users
pub async fn list_users(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    user.require(Permission::ManageUsers)?;

    let users = state.db.users().list().await?;
    Ok(Json(users))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<User>, ApiError> {
    user.require(Permission::ManageUsers)?;

    let found = state
        .db
        .users()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("User", &id))?;

    Ok(Json(found))
}

/// POST /api/users
pub async fn create_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<NewUser>,
) -> Result<Json<User>, ApiError> {
    user.require(Permission::ManageUsers)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, email = %input.email, role = ?input.role, "create_user");

    let password_hash = hash_password(&input.password)?;
    let created = state
        .db
        .users()
        .create(&input.name, &input.email, &password_hash, input.role)
        .await?;

    Ok(Json(created))
}

/// PUT /api/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    user.require(Permission::ManageUsers)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, id = %id, "update_user");

    // Absent password keeps the stored hash.
    let password_hash = match input.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let updated = state
        .db
        .users()
        .update(
            &id,
            &input.name,
            &input.email,
            password_hash.as_deref(),
            input.role,
        )
        .await?;

    Ok(Json(updated))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require(Permission::ManageUsers)?;

    debug!(actor = %user.0.email, id = %id, "delete_user");

    state.db.users().delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "User deleted successfully." })))
}

// =============================================================================
// Roles
// =============================================================================

/// One entry of the role catalog.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    pub role: Role,
    pub label: &'static str,
    pub permissions: Vec<Permission>,
}

/// GET /api/roles
pub async fn list_roles(user: CurrentUser) -> Result<Json<Vec<RoleInfo>>, ApiError> {
    user.require(Permission::ManageUsers)?;

    let catalog = Role::ALL
        .into_iter()
        .map(|role| RoleInfo {
            role,
            label: role.label(),
            permissions: role.permissions().to_vec(),
        })
        .collect();

    Ok(Json(catalog))
}
