//! # Domain Types
//!
//! Core domain types used throughout Coop POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Member      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  sku (business) │   │  member_code    │   │  email          │       │
//! │  │  price_cents    │   │  balance_cents  │   │  password_hash  │       │
//! │  │  current_stock  │   │  total_spent    │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  MemberStatus   │   │ PaymentMethod   │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Active         │   │  Cash           │                             │
//! │  │  Inactive       │   │  Card           │                             │
//! │  └─────────────────┘   │  Mpesa          │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (member_code, sku, email) - human-readable, potentially mutable

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::rbac::Role;
use crate::CREDIT_CEILING_CENTS;

// =============================================================================
// Product
// =============================================================================

/// A sellable item in the shop ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown on the POS screen.
    pub name: String,

    /// Barcode (EAN-13, UPC-A, etc.).
    pub barcode: Option<String>,

    /// Stock Keeping Unit - business identifier.
    pub sku: Option<String>,

    /// Free-form category label ("Grocery", "Household", ...).
    pub category: String,

    /// Selling price in cents (smallest currency unit).
    pub selling_price_cents: i64,

    /// Cost price in cents (for margin reporting).
    pub cost_price_cents: i64,

    /// Units currently on hand. Never negative after a sale.
    pub current_stock: i64,

    /// Reorder threshold; at or below this the product is "low stock".
    pub min_stock: i64,

    /// Sale unit ("piece", "kg", "litre").
    pub unit: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the selling price as a Money type.
    #[inline]
    pub fn selling_price(&self) -> Money {
        Money::from_cents(self.selling_price_cents)
    }

    /// Returns the cost price as a Money type.
    #[inline]
    pub fn cost_price(&self) -> Money {
        Money::from_cents(self.cost_price_cents)
    }

    /// Checks whether the requested quantity can be filled from stock.
    #[inline]
    pub fn can_fill(&self, quantity: i64) -> bool {
        self.current_stock >= quantity
    }

    /// Checks whether stock has fallen to the reorder threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.current_stock <= self.min_stock
    }
}

// =============================================================================
// Member Status
// =============================================================================

/// Whether a member is an active participant of the cooperative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    /// Member in good standing, can purchase.
    Active,
    /// Membership lapsed or suspended.
    Inactive,
}

impl Default for MemberStatus {
    fn default() -> Self {
        MemberStatus::Active
    }
}

// =============================================================================
// Member
// =============================================================================

/// A cooperative member with a running unpaid balance.
///
/// `balance_cents` is the accumulated unpaid amount (store credit owed by
/// the member). New sales for the member are blocked once the balance
/// reaches the credit ceiling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Member {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Member's full name.
    pub name: String,

    /// Optional e-mail, unique when present.
    pub email: Option<String>,

    /// Optional phone number, unique when present.
    pub phone: Option<String>,

    /// Business identifier printed on the membership card. Unique.
    pub member_code: String,

    /// Date the member joined the cooperative.
    pub join_date: NaiveDate,

    /// Membership status.
    pub status: MemberStatus,

    /// Free-form notes.
    pub notes: Option<String>,

    /// Accumulated unpaid amount in cents.
    pub balance_cents: i64,

    /// Lifetime spend in cents (maintained outside the sale path).
    pub total_spent_cents: i64,

    /// When the member record was created.
    pub created_at: DateTime<Utc>,

    /// When the member record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Member {
    /// Returns the unpaid balance as Money.
    #[inline]
    pub fn balance(&self) -> Money {
        Money::from_cents(self.balance_cents)
    }

    /// Returns the lifetime spend as Money.
    #[inline]
    pub fn total_spent(&self) -> Money {
        Money::from_cents(self.total_spent_cents)
    }

    /// Checks whether the member may make a new purchase.
    ///
    /// A member whose unpaid balance has reached the credit ceiling is
    /// blocked until the balance is settled.
    #[inline]
    pub fn can_purchase(&self) -> bool {
        self.balance_cents < CREDIT_CEILING_CENTS
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer tendered the sale.
///
/// Note: the balance ledger treats every member sale as store credit
/// regardless of the tendered method; the method is accepted and logged
/// but does not branch the ledger mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card payment on external terminal.
    Card,
    /// Mobile money transfer.
    Mpesa,
}

impl PaymentMethod {
    /// Stable lowercase name, used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Mpesa => "mpesa",
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A staff user of the management application.
///
/// Users are distinct from members: users operate the system, members
/// shop in it. Each user carries exactly one role which determines the
/// permission set enforced at the API boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Login e-mail. Unique, stored lowercase.
    pub email: String,

    /// Argon2 hash of the user's password. Never serialized to callers.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// The user's role.
    pub role: Role,

    /// When the user was created.
    pub created_at: DateTime<Utc>,

    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
