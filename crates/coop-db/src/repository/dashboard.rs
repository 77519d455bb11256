//! # Dashboard Repository
//!
//! Read-only aggregate queries backing the dashboard summary: counts,
//! unpaid totals, top shoppers, and the monthly member-growth series.
//! Chart rendering is the client's business; this module only produces
//! the data series.

use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate, Utc};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::error::DbResult;

// =============================================================================
// Row Types
// =============================================================================

/// Headline counters shown at the top of the dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_members: i64,
    pub total_products: i64,
    pub total_users: i64,
    /// SUM of member balances (accumulated unpaid amounts).
    pub total_unpaid_cents: i64,
    /// SUM of member lifetime spend.
    pub total_revenue_cents: i64,
}

/// A member ranked by lifetime spend.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TopShopper {
    pub name: String,
    pub email: Option<String>,
    pub total_spent_cents: i64,
    pub balance_cents: i64,
}

/// A member carrying an unpaid balance.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UnpaidMember {
    pub name: String,
    pub email: Option<String>,
    pub balance_cents: i64,
}

/// A recently joined member.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RecentMember {
    pub name: String,
    pub email: Option<String>,
    pub join_date: NaiveDate,
}

/// One month of the member-growth series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    /// Display label, e.g. "Mar 2026".
    pub month: String,
    pub count: i64,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for dashboard aggregate queries.
#[derive(Debug, Clone)]
pub struct DashboardRepository {
    pool: SqlitePool,
}

impl DashboardRepository {
    /// Creates a new DashboardRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DashboardRepository { pool }
    }

    /// Headline counters: entity counts plus the two ledger sums.
    pub async fn stats(&self) -> DbResult<DashboardStats> {
        let total_members: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;
        let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        // SUM is NULL on an empty table
        let total_unpaid: Option<i64> = sqlx::query_scalar("SELECT SUM(balance_cents) FROM members")
            .fetch_one(&self.pool)
            .await?;
        let total_revenue: Option<i64> =
            sqlx::query_scalar("SELECT SUM(total_spent_cents) FROM members")
                .fetch_one(&self.pool)
                .await?;

        Ok(DashboardStats {
            total_members,
            total_products,
            total_users,
            total_unpaid_cents: total_unpaid.unwrap_or(0),
            total_revenue_cents: total_revenue.unwrap_or(0),
        })
    }

    /// Top shoppers by lifetime spend.
    pub async fn top_shoppers(&self, limit: u32) -> DbResult<Vec<TopShopper>> {
        let shoppers = sqlx::query_as::<_, TopShopper>(
            r#"
            SELECT name, email, total_spent_cents, balance_cents
            FROM members
            ORDER BY total_spent_cents DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(shoppers)
    }

    /// Members with an unpaid balance, highest first.
    pub async fn members_with_unpaid(&self, limit: u32) -> DbResult<Vec<UnpaidMember>> {
        let members = sqlx::query_as::<_, UnpaidMember>(
            r#"
            SELECT name, email, balance_cents
            FROM members
            WHERE balance_cents > 0
            ORDER BY balance_cents DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Most recently joined members.
    pub async fn recent_members(&self, limit: u32) -> DbResult<Vec<RecentMember>> {
        let members = sqlx::query_as::<_, RecentMember>(
            r#"
            SELECT name, email, join_date
            FROM members
            ORDER BY join_date DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Members joined per month over the trailing twelve months.
    ///
    /// Months with no joiners appear with a zero count so the series is
    /// always twelve points long, oldest first.
    pub async fn member_growth(&self) -> DbResult<Vec<MonthlyCount>> {
        let today = Utc::now().date_naive();
        // First day of the current month, then back 11 months.
        let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
            .unwrap_or(today);
        let window_start = this_month
            .checked_sub_months(Months::new(11))
            .unwrap_or(this_month);

        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT strftime('%Y-%m', join_date) AS month, COUNT(*) AS joined
            FROM members
            WHERE join_date >= ?1
            GROUP BY month
            "#,
        )
        .bind(window_start)
        .fetch_all(&self.pool)
        .await?;

        let counts: HashMap<String, i64> = rows.into_iter().collect();

        let mut series = Vec::with_capacity(12);
        for offset in 0..12 {
            let month = window_start
                .checked_add_months(Months::new(offset))
                .unwrap_or(window_start);
            let key = month.format("%Y-%m").to_string();
            series.push(MonthlyCount {
                month: month.format("%b %Y").to_string(),
                count: counts.get(&key).copied().unwrap_or(0),
            });
        }

        Ok(series)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use coop_core::validation::MemberInput;
    use coop_core::MemberStatus;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_member(db: &Database, code: &str, join_date: NaiveDate, spent: i64, balance: i64) {
        let member = db
            .members()
            .create(&MemberInput {
                name: format!("Member {code}"),
                email: None,
                phone: None,
                member_code: code.to_string(),
                join_date,
                status: MemberStatus::Active,
                notes: None,
            })
            .await
            .unwrap();

        sqlx::query("UPDATE members SET total_spent_cents = ?2, balance_cents = ?3 WHERE id = ?1")
            .bind(&member.id)
            .bind(spent)
            .bind(balance)
            .execute(db.pool())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_stats_on_empty_database() {
        let db = test_db().await;
        let stats = db.dashboard().stats().await.unwrap();

        assert_eq!(stats.total_members, 0);
        assert_eq!(stats.total_products, 0);
        assert_eq!(stats.total_unpaid_cents, 0);
        assert_eq!(stats.total_revenue_cents, 0);
    }

    #[tokio::test]
    async fn test_stats_sums_ledgers() {
        let db = test_db().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        seed_member(&db, "MBR-001", date, 5000, 1200).await;
        seed_member(&db, "MBR-002", date, 9000, 0).await;

        let stats = db.dashboard().stats().await.unwrap();
        assert_eq!(stats.total_members, 2);
        assert_eq!(stats.total_unpaid_cents, 1200);
        assert_eq!(stats.total_revenue_cents, 14000);
    }

    #[tokio::test]
    async fn test_top_shoppers_ordered_by_spend() {
        let db = test_db().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        seed_member(&db, "MBR-001", date, 5000, 0).await;
        seed_member(&db, "MBR-002", date, 9000, 0).await;
        seed_member(&db, "MBR-003", date, 100, 0).await;

        let top = db.dashboard().top_shoppers(2).await.unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "Member MBR-002");
        assert_eq!(top[1].name, "Member MBR-001");
    }

    #[tokio::test]
    async fn test_unpaid_excludes_settled_members() {
        let db = test_db().await;
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        seed_member(&db, "MBR-001", date, 0, 1200).await;
        seed_member(&db, "MBR-002", date, 0, 0).await;

        let unpaid = db.dashboard().members_with_unpaid(10).await.unwrap();
        assert_eq!(unpaid.len(), 1);
        assert_eq!(unpaid[0].balance_cents, 1200);
    }

    #[tokio::test]
    async fn test_member_growth_is_twelve_points() {
        let db = test_db().await;
        // One joiner this month, the rest of the window empty.
        let today = Utc::now().date_naive();
        let this_month = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap();
        seed_member(&db, "MBR-001", this_month, 0, 0).await;

        let series = db.dashboard().member_growth().await.unwrap();
        assert_eq!(series.len(), 12);
        assert_eq!(series.last().unwrap().count, 1);
        assert_eq!(series.iter().map(|m| m.count).sum::<i64>(), 1);
    }
}
