//! # Member Repository
//!
//! Database operations for the member ledger.
//!
//! ## Ledger Fields
//! `balance_cents` and `total_spent_cents` are ledger fields: the CRUD
//! path never writes them. The balance moves only through the checkout
//! repository's guarded update; new members start at zero.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use coop_core::validation::MemberInput;
use coop_core::Member;

/// Every member column, in table order. Shared by the SELECT queries
/// here and in the checkout transaction.
pub(crate) const MEMBER_COLUMNS: &str = "id, name, email, phone, member_code, join_date, status, notes, \
     balance_cents, total_spent_cents, created_at, updated_at";

/// Repository for member database operations.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: SqlitePool,
}

impl MemberRepository {
    /// Creates a new MemberRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MemberRepository { pool }
    }

    /// Lists all members ordered by name.
    pub async fn list(&self) -> DbResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Gets a member by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Gets a member by its member code.
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>(&format!(
            "SELECT {MEMBER_COLUMNS} FROM members WHERE member_code = ?1"
        ))
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(member)
    }

    /// Creates a member from a validated input.
    ///
    /// Balance and lifetime spend start at zero.
    ///
    /// ## Returns
    /// * `Ok(Member)` - Inserted member with generated id and timestamps
    /// * `Err(DbError::UniqueViolation)` - member_code, email or phone taken
    pub async fn create(&self, input: &MemberInput) -> DbResult<Member> {
        let now = Utc::now();
        let member = Member {
            id: Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            email: input.email.clone(),
            phone: input.phone.clone(),
            member_code: input.member_code.trim().to_string(),
            join_date: input.join_date,
            status: input.status,
            notes: input.notes.clone(),
            balance_cents: 0,
            total_spent_cents: 0,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %member.id, member_code = %member.member_code, "Inserting member");

        sqlx::query(
            r#"
            INSERT INTO members (
                id, name, email, phone, member_code, join_date, status, notes,
                balance_cents, total_spent_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
        )
        .bind(&member.id)
        .bind(&member.name)
        .bind(&member.email)
        .bind(&member.phone)
        .bind(&member.member_code)
        .bind(member.join_date)
        .bind(member.status)
        .bind(&member.notes)
        .bind(member.balance_cents)
        .bind(member.total_spent_cents)
        .bind(member.created_at)
        .bind(member.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(member)
    }

    /// Updates an existing member from a validated input.
    ///
    /// Balance and lifetime spend are preserved as-is.
    pub async fn update(&self, id: &str, input: &MemberInput) -> DbResult<Member> {
        debug!(id = %id, "Updating member");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE members SET
                name = ?2,
                email = ?3,
                phone = ?4,
                member_code = ?5,
                join_date = ?6,
                status = ?7,
                notes = ?8,
                updated_at = ?9
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.email)
        .bind(&input.phone)
        .bind(input.member_code.trim())
        .bind(input.join_date)
        .bind(input.status)
        .bind(&input.notes)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Member", id))
    }

    /// Deletes a member. Hard delete, matching the member screen.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting member");

        let result = sqlx::query("DELETE FROM members WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Member", id));
        }

        Ok(())
    }

    /// Counts total members.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM members")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use coop_core::MemberStatus;

    fn alice_input() -> MemberInput {
        MemberInput {
            name: "Alice".to_string(),
            email: Some("alice@coop.example".to_string()),
            phone: None,
            member_code: "MBR-001".to_string(),
            join_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            status: MemberStatus::Active,
            notes: None,
        }
    }

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_starts_with_zero_ledger() {
        let db = test_db().await;
        let member = db.members().create(&alice_input()).await.unwrap();

        assert_eq!(member.balance_cents, 0);
        assert_eq!(member.total_spent_cents, 0);

        let loaded = db.members().get_by_id(&member.id).await.unwrap().unwrap();
        assert_eq!(loaded.member_code, "MBR-001");
        assert_eq!(loaded.status, MemberStatus::Active);
        assert_eq!(loaded.join_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_member_code_rejected() {
        let db = test_db().await;
        db.members().create(&alice_input()).await.unwrap();

        let mut dup = alice_input();
        dup.email = Some("other@coop.example".to_string());
        let err = db.members().create(&dup).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { field } if field == "member_code"));
    }

    #[tokio::test]
    async fn test_update_preserves_ledger_fields() {
        let db = test_db().await;
        let member = db.members().create(&alice_input()).await.unwrap();

        // Put some balance on the account outside the CRUD path.
        sqlx::query("UPDATE members SET balance_cents = 1500 WHERE id = ?1")
            .bind(&member.id)
            .execute(db.pool())
            .await
            .unwrap();

        let mut input = alice_input();
        input.name = "Alice B".to_string();
        let updated = db.members().update(&member.id, &input).await.unwrap();

        assert_eq!(updated.name, "Alice B");
        assert_eq!(updated.balance_cents, 1500);
    }

    #[tokio::test]
    async fn test_get_by_code() {
        let db = test_db().await;
        db.members().create(&alice_input()).await.unwrap();

        let found = db.members().get_by_code("MBR-001").await.unwrap();
        assert!(found.is_some());
        assert!(db.members().get_by_code("MBR-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let member = db.members().create(&alice_input()).await.unwrap();

        db.members().delete(&member.id).await.unwrap();
        assert!(db.members().get_by_id(&member.id).await.unwrap().is_none());
    }
}
