//! # Member Handlers

use axum::extract::{Path, State};
use axum::Json;
use tracing::debug;

use coop_core::validation::MemberInput;
use coop_core::{CoreError, Member, Permission};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// GET /api/members
pub async fn list_members(
    State(state): State<AppState>,
    _user: CurrentUser,
) -> Result<Json<Vec<Member>>, ApiError> {
    let members = state.db.members().list().await?;
    Ok(Json(members))
}

/// GET /api/members/:id
pub async fn get_member(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Member>, ApiError> {
    let member = state
        .db
        .members()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Member", &id))?;

    Ok(Json(member))
}

/// POST /api/members
pub async fn create_member(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<MemberInput>,
) -> Result<Json<Member>, ApiError> {
    user.require(Permission::ManageMembers)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, member_code = %input.member_code, "create_member");

    let member = state.db.members().create(&input).await?;
    Ok(Json(member))
}

/// PUT /api/members/:id
pub async fn update_member(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(input): Json<MemberInput>,
) -> Result<Json<Member>, ApiError> {
    user.require(Permission::ManageMembers)?;
    input.validate().map_err(CoreError::from)?;

    debug!(actor = %user.0.email, id = %id, "update_member");

    let member = state.db.members().update(&id, &input).await?;
    Ok(Json(member))
}

/// DELETE /api/members/:id
pub async fn delete_member(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    user.require(Permission::ManageMembers)?;

    debug!(actor = %user.0.email, id = %id, "delete_member");

    state.db.members().delete(&id).await?;
    Ok(Json(serde_json::json!({ "message": "Member deleted successfully." })))
}
