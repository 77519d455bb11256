//! # Dashboard Handler
//!
//! Assembles the summary statistics screen from the aggregate queries.
//! The client renders the charts; this endpoint only ships data series.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use coop_core::Permission;
use coop_db::repository::dashboard::{
    DashboardStats, MonthlyCount, RecentMember, TopShopper, UnpaidMember,
};

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// The full dashboard payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub top_shoppers: Vec<TopShopper>,
    pub members_with_unpaid: Vec<UnpaidMember>,
    pub recent_members: Vec<RecentMember>,
    pub member_growth: Vec<MonthlyCount>,
}

/// GET /api/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<DashboardResponse>, ApiError> {
    user.require(Permission::ViewAllReports)?;

    let dashboard = state.db.dashboard();

    let stats = dashboard.stats().await?;
    let top_shoppers = dashboard.top_shoppers(10).await?;
    let members_with_unpaid = dashboard.members_with_unpaid(10).await?;
    let recent_members = dashboard.recent_members(5).await?;
    let member_growth = dashboard.member_growth().await?;

    Ok(Json(DashboardResponse {
        stats,
        top_shoppers,
        members_with_unpaid,
        recent_members,
        member_growth,
    }))
}
