//! # coop-core: Pure Business Logic for Coop POS
//!
//! This crate is the **heart** of Coop POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coop POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    HTTP API (axum)                              │   │
//! │  │    checkout, products, members, users, roles, dashboard        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ coop-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ CartLine  │  │   rules   │  │   │
//! │  │   │  Member   │  │           │  │   plan    │  │  inputs   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │          ┌───────────┐                                         │   │
//! │  │          │   rbac    │   NO I/O • NO DATABASE • NO NETWORK     │   │
//! │  │          │ Role/Perm │   PURE FUNCTIONS                        │   │
//! │  │          └───────────┘                                         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    coop-db (Database Layer)                     │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Member, User, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - Sale Processor validation and planning
//! - [`rbac`] - Role and Permission enums with fixed permission sets
//! - [`error`] - Domain error types
//! - [`validation`] - Field validators and per-operation input structs
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use coop_core::money::Money;
//!
//! // Create money from cents (never from floats!)
//! let price = Money::from_cents(1250); // 12.50
//! let line_total = price.multiply_quantity(2);
//! assert_eq!(line_total.cents(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod rbac;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use coop_core::Money` instead of
// `use coop_core::money::Money`

pub use checkout::{CartLine, CheckoutPlan, CheckoutRequest, StockDecrement};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use rbac::{Permission, Role};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Credit ceiling in cents: 2000 currency units.
///
/// ## Business Reason
/// A member whose accumulated unpaid balance has reached this amount is
/// blocked from new purchases until the balance is settled. The whole
/// sale is rejected - there is no partial application.
pub const CREDIT_CEILING_CENTS: i64 = 200_000;

/// Maximum lines allowed in a single checkout cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line in a cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
