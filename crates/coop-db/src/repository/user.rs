//! # User Repository
//!
//! Database operations for staff user accounts.
//!
//! Password hashing happens in the application layer; this repository
//! only ever sees the finished argon2 hash string.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use coop_core::{Role, User};

/// Every user column, in table order. Shared by the SELECT queries.
const USER_COLUMNS: &str = "id, name, email, password_hash, role, created_at, updated_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Lists all users ordered by name.
    pub async fn list(&self) -> DbResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Gets a user by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by e-mail (the identity the API boundary resolves).
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Creates a user with an already-hashed password.
    ///
    /// ## Returns
    /// * `Ok(User)` - Inserted user with generated id and timestamps
    /// * `Err(DbError::UniqueViolation)` - e-mail already registered
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
        role: Role,
    ) -> DbResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password_hash: password_hash.to_string(),
            role,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %user.id, email = %user.email, role = ?user.role, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Updates a user. When `password_hash` is `None` the stored hash is
    /// kept unchanged.
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        email: &str,
        password_hash: Option<&str>,
        role: Role,
    ) -> DbResult<User> {
        debug!(id = %id, "Updating user");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?2,
                email = ?3,
                password_hash = COALESCE(?4, password_hash),
                role = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(name.trim())
        .bind(email.trim())
        .bind(password_hash)
        .bind(role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("User", id))
    }

    /// Deletes a user. Hard delete.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting user");

        let result = sqlx::query("DELETE FROM users WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", id));
        }

        Ok(())
    }

    /// Counts total users.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
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

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_resolve_by_email() {
        let db = test_db().await;
        let user = db
            .users()
            .create("Admin", "admin@coop.example", "$argon2$fake", Role::SuperAdmin)
            .await
            .unwrap();

        let found = db
            .users()
            .get_by_email("admin@coop.example")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.role, Role::SuperAdmin);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let db = test_db().await;
        db.users()
            .create("Admin", "admin@coop.example", "$argon2$fake", Role::SuperAdmin)
            .await
            .unwrap();

        let err = db
            .users()
            .create("Other", "admin@coop.example", "$argon2$fake", Role::Viewer)
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { field } if field == "email"));
    }

    #[tokio::test]
    async fn test_update_keeps_hash_when_password_absent() {
        let db = test_db().await;
        let user = db
            .users()
            .create("Cash", "cash@coop.example", "$argon2$original", Role::Cashier)
            .await
            .unwrap();

        let updated = db
            .users()
            .update(&user.id, "Cashier One", "cash@coop.example", None, Role::Cashier)
            .await
            .unwrap();
        assert_eq!(updated.name, "Cashier One");
        assert_eq!(updated.password_hash, "$argon2$original");

        let rehashed = db
            .users()
            .update(
                &user.id,
                "Cashier One",
                "cash@coop.example",
                Some("$argon2$new"),
                Role::Treasurer,
            )
            .await
            .unwrap();
        assert_eq!(rehashed.password_hash, "$argon2$new");
        assert_eq!(rehashed.role, Role::Treasurer);
    }

    #[tokio::test]
    async fn test_delete() {
        let db = test_db().await;
        let user = db
            .users()
            .create("Admin", "admin@coop.example", "$argon2$fake", Role::SuperAdmin)
            .await
            .unwrap();

        db.users().delete(&user.id).await.unwrap();
        assert!(db.users().get_by_id(&user.id).await.unwrap().is_none());
    }
}
