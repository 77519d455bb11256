//! # Identity & Permission Boundary
//!
//! Resolves the acting user and enforces permissions at the API boundary.
//!
//! ## Trusted Identity Header
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Identity Resolution                                  │
//! │                                                                         │
//! │  Upstream (gateway / session terminator)                               │
//! │       │  x-user-email: treasurer@coop.example                          │
//! │       ▼                                                                 │
//! │  CurrentUser extractor (this module)                                   │
//! │       │  users table lookup by e-mail                                  │
//! │       ├── header missing / unknown user → 401 UNAUTHORIZED             │
//! │       ▼                                                                 │
//! │  handler calls user.require(Permission::...)                           │
//! │       ├── role lacks permission → 403 PERMISSION_DENIED                │
//! │       ▼                                                                 │
//! │  handler body runs                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Login and session management live upstream; this service only maps an
//! already-authenticated identity to a role and checks the role's
//! permission set. Permissions are enum values - role names are never
//! string-compared.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use tracing::debug;

use coop_core::{Permission, User};

use crate::error::ApiError;
use crate::AppState;

/// Header carrying the upstream-authenticated identity.
pub const IDENTITY_HEADER: &str = "x-user-email";

// =============================================================================
// Current User Extractor
// =============================================================================

/// The resolved acting user, extracted once per request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    /// Ensures the acting user's role grants `permission`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// async fn create_product(user: CurrentUser, ...) -> Result<..., ApiError> {
    ///     user.require(Permission::ManageStock)?;
    ///     ...
    /// }
    /// ```
    pub fn require(&self, permission: Permission) -> Result<(), ApiError> {
        if self.0.role.allows(permission) {
            return Ok(());
        }

        debug!(
            user = %self.0.email,
            role = ?self.0.role,
            permission = permission.as_str(),
            "Permission denied"
        );

        Err(ApiError::permission_denied(format!(
            "{} requires the {} permission",
            self.0.role.label(),
            permission.as_str()
        )))
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Missing identity header"))?;

        let user = state
            .db
            .users()
            .get_by_email(email)
            .await
            .map_err(ApiError::from)?
            .ok_or_else(|| ApiError::unauthorized("Unknown user"))?;

        Ok(CurrentUser(user))
    }
}

// =============================================================================
// Password Hashing
// =============================================================================

/// Hashes a password with argon2 for storage on a user record.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    use argon2::password_hash::{rand_core::OsRng, SaltString};
    use argon2::{Argon2, PasswordHasher};

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            ApiError::internal("Password hashing failed")
        })?;

    Ok(hash.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use coop_core::Role;

    fn user(role: Role) -> CurrentUser {
        let now = Utc::now();
        CurrentUser(User {
            id: "u-1".to_string(),
            name: "Test".to_string(),
            email: "test@coop.example".to_string(),
            password_hash: "$argon2$fake".to_string(),
            role,
            created_at: now,
            updated_at: now,
        })
    }

    #[test]
    fn test_require_grants_and_denies() {
        assert!(user(Role::Cashier).require(Permission::CreateSale).is_ok());

        let err = user(Role::Cashier)
            .require(Permission::ManageStock)
            .unwrap_err();
        assert!(err.message.contains("manage-stock"));
    }

    #[test]
    fn test_hash_password_produces_argon2_hash() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2"));
        // Salted: hashing twice never produces the same string
        let other = hash_password("correct horse battery staple").unwrap();
        assert_ne!(hash, other);
    }
}
