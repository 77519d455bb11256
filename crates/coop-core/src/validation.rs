//! # Validation Module
//!
//! Input validation for Coop POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP deserialization (serde)                                 │
//! │  ├── Type validation (strings, integers, dates, enums)                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - per-operation input structs                    │
//! │  ├── Each operation has an input struct whose validate() method        │
//! │  │   enumerates every field constraint explicitly                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / UNIQUE / CHECK constraints                             │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use coop_core::validation::{validate_required_string, validate_quantity};
//!
//! validate_required_string("name", "Rice 5kg", 255).unwrap();
//! validate_quantity(5).unwrap();
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::rbac::Role;
use crate::types::MemberStatus;
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a required string field.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must not exceed `max` characters
pub fn validate_required_string(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an optional string field.
///
/// ## Rules
/// - `None` and empty strings are fine
/// - When present, must not exceed `max` characters
pub fn validate_optional_string(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> ValidationResult<()> {
    if let Some(value) = value {
        if value.len() > max {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max,
            });
        }
    }

    Ok(())
}

/// Validates an e-mail address.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 255 characters
/// - Must contain a single `@` with text on both sides
/// - Must be lowercase (stored canonically)
pub fn validate_email(field: &str, value: &str) -> ValidationResult<()> {
    validate_required_string(field, value, 255)?;

    let value = value.trim();
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a valid e-mail address".to_string(),
        });
    }

    if value != value.to_lowercase() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be lowercase".to_string(),
        });
    }

    Ok(())
}

/// Validates a password for a staff user.
///
/// ## Rules
/// - Minimum 8 characters
pub fn validate_password(value: &str) -> ValidationResult<()> {
    if value.len() < 8 {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value for a cart line.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Checkout: cart line                                                    │
/// │                                                                         │
/// │  Cashier enters quantity: 5                                            │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity(5) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── qty <= 0? → Error: "quantity must be positive"               │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 1 and 999"     │
/// │       │                                                                 │
/// │       └── OK → Proceed with checkout                                   │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free or donated items)
pub fn validate_price_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a stock count.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock(field: &str, count: i64) -> ValidationResult<()> {
    if count < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validator
// =============================================================================

/// Validates a UUID string format.
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Per-Operation Input Structs
// =============================================================================
// Each write operation has an input struct that enumerates its field
// constraints in validate(). Handlers deserialize straight into these.

/// Input for creating or updating a product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub barcode: Option<String>,
    pub sku: Option<String>,
    pub category: String,
    pub selling_price_cents: i64,
    pub cost_price_cents: i64,
    pub current_stock: i64,
    pub min_stock: i64,
    pub unit: String,
    pub description: Option<String>,
}

impl ProductInput {
    /// Validates every field constraint.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_string("name", &self.name, 255)?;
        validate_optional_string("barcode", self.barcode.as_deref(), 255)?;
        validate_optional_string("sku", self.sku.as_deref(), 255)?;
        validate_required_string("category", &self.category, 255)?;
        validate_price_cents("selling_price_cents", self.selling_price_cents)?;
        validate_price_cents("cost_price_cents", self.cost_price_cents)?;
        validate_stock("current_stock", self.current_stock)?;
        validate_stock("min_stock", self.min_stock)?;
        validate_required_string("unit", &self.unit, 255)?;
        Ok(())
    }
}

/// Input for creating or updating a member.
///
/// Balance and lifetime spend are ledger fields maintained by the sale
/// path and are deliberately absent here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberInput {
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub member_code: String,
    pub join_date: NaiveDate,
    #[serde(default)]
    pub status: MemberStatus,
    pub notes: Option<String>,
}

impl MemberInput {
    /// Validates every field constraint.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_string("name", &self.name, 255)?;
        if let Some(email) = self.email.as_deref() {
            validate_email("email", email)?;
        }
        validate_optional_string("phone", self.phone.as_deref(), 255)?;
        validate_required_string("member_code", &self.member_code, 255)?;
        Ok(())
    }
}

/// Input for creating a staff user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Validates every field constraint.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_string("name", &self.name, 255)?;
        validate_email("email", &self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

/// Input for updating a staff user. Password is optional: when absent
/// the stored hash is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: Role,
}

impl UserUpdate {
    /// Validates every field constraint.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_required_string("name", &self.name, 255)?;
        validate_email("email", &self.email)?;
        if let Some(password) = self.password.as_deref() {
            validate_password(password)?;
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
