//! # Checkout Module
//!
//! The pure core of the Sale Processor.
//!
//! ## Validate Everything, Then Mutate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Pipeline                                   │
//! │                                                                         │
//! │  CheckoutRequest {member_id?, cart, total_cents, payment_method}       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate_request()   ← shape: non-empty cart, qty range, total >= 1   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  plan_checkout()      ← business rules against loaded ledger rows:     │
//! │       │                 credit ceiling FIRST, then every line's stock  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CheckoutPlan         ← the full mutation set, computed before any     │
//! │       │                 write happens                                   │
//! │       ▼                                                                 │
//! │  coop-db applies the plan in ONE transaction with guarded updates      │
//! │                                                                         │
//! │  A failing line can never leave earlier lines half-applied: nothing    │
//! │  is mutated until every rule has passed.                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module holds no I/O: the caller loads the referenced products and
//! member, and this module decides whether the sale may proceed and what
//! the ledger mutation is.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Member, PaymentMethod, Product};
use crate::validation::validate_quantity;
use crate::{CREDIT_CEILING_CENTS, MAX_CART_LINES};

// =============================================================================
// Request Types
// =============================================================================

/// One product/quantity pair within a checkout request.
///
/// Transient: exists only for the duration of the checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product UUID.
    #[serde(alias = "id")]
    pub product_id: String,

    /// Requested quantity, must be >= 1.
    pub quantity: i64,
}

/// A checkout submission.
///
/// `total_cents` is computed by the till. There is deliberately no sale
/// record behind this type: the request is consumed entirely by the
/// ledger mutation, and resubmitting the same cart is a new,
/// independent sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutRequest {
    /// Member buying on their cooperative account, if any.
    pub member_id: Option<String>,

    /// Cart lines, must be non-empty.
    pub cart: Vec<CartLine>,

    /// Sale total in cents, must be at least 1.
    pub total_cents: i64,

    /// How the sale was tendered.
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Plan Types
// =============================================================================

/// A single stock decrement within a checkout plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockDecrement {
    pub product_id: String,
    pub quantity: i64,
}

/// The full mutation set for a validated checkout.
///
/// Produced only after every business rule has passed; applying it is
/// the data layer's job.
#[derive(Debug, Clone)]
pub struct CheckoutPlan {
    /// Member whose balance increases by `total`, if any.
    pub member_id: Option<String>,

    /// Sale total.
    pub total: Money,

    /// Stock decrement per cart line, in cart order.
    pub decrements: Vec<StockDecrement>,

    /// Tendered method (logged, does not branch the ledger mutation).
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Validation
// =============================================================================

/// Validates the shape of a checkout request.
///
/// ## Rules
/// - Cart must be non-empty and at most MAX_CART_LINES lines
/// - Every line quantity must be within 1..=999
/// - Total must be at least 1 cent
pub fn validate_request(request: &CheckoutRequest) -> CoreResult<()> {
    if request.cart.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    if request.cart.len() > MAX_CART_LINES {
        return Err(CoreError::CartTooLarge {
            max: MAX_CART_LINES,
        });
    }

    for line in &request.cart {
        validate_quantity(line.quantity)?;
    }

    if request.total_cents < 1 {
        return Err(CoreError::InvalidTotal {
            total_cents: request.total_cents,
        });
    }

    Ok(())
}

/// Decides whether a sale may proceed and computes the ledger mutation.
///
/// ## Arguments
/// * `request` - the (shape-validated) checkout request
/// * `products` - the loaded product row for every cart line
/// * `member` - the loaded member row when `request.member_id` is set
///
/// ## Rule Order
/// 1. Credit ceiling: a member whose unpaid balance has reached the
///    ceiling blocks the whole sale, before any stock is considered.
/// 2. Stock: every line's product must exist and have enough stock.
///
/// No mutation has happened when this function returns an error - the
/// partial-application failure mode is impossible by construction.
pub fn plan_checkout(
    request: &CheckoutRequest,
    products: &[Product],
    member: Option<&Member>,
) -> CoreResult<CheckoutPlan> {
    if let Some(member) = member {
        if !member.can_purchase() {
            return Err(CoreError::CreditCeilingReached {
                member_id: member.id.clone(),
                balance_cents: member.balance_cents,
                ceiling_cents: CREDIT_CEILING_CENTS,
            });
        }
    }

    let mut decrements = Vec::with_capacity(request.cart.len());

    for line in &request.cart {
        let product = products
            .iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

        if !product.can_fill(line.quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.current_stock,
                requested: line.quantity,
            });
        }

        decrements.push(StockDecrement {
            product_id: product.id.clone(),
            quantity: line.quantity,
        });
    }

    Ok(CheckoutPlan {
        member_id: member.map(|m| m.id.clone()),
        total: Money::from_cents(request.total_cents),
        decrements,
        payment_method: request.payment_method,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
