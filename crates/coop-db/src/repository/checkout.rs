//! # Checkout Repository
//!
//! The data side of the Sale Processor: applies a validated checkout to
//! the product and member ledgers in one transaction.
//!
//! ## Atomicity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                 Checkout Flow                                           │
//! │                                                                         │
//! │  load member row (if referenced)     ← snapshot reads                  │
//! │  load every cart line's product row                                     │
//! │  plan_checkout()                     ← every rule checked, nothing     │
//! │    │                                   written yet                      │
//! │  BEGIN                               ← write-only transaction          │
//! │    ├── UPDATE members SET balance = balance + total                     │
//! │    │          WHERE id = ? AND balance < ceiling      ── 0 rows? ──┐    │
//! │    ├── UPDATE products SET stock = stock - qty                     │    │
//! │    │          WHERE id = ? AND stock >= qty           ── 0 rows? ──┤    │
//! │    │                                                               ▼    │
//! │  COMMIT                                                        ROLLBACK │
//! │                                                                         │
//! │  The WHERE guards re-check every invariant under the SQLite write      │
//! │  lock, so the snapshot reads can afford to be optimistic: two          │
//! │  checkouts racing on the last unit produce exactly one success and     │
//! │  one clean rejection - never negative stock, never a lost update.      │
//! │  The transaction issues no reads before its first write, so a queued   │
//! │  writer waits on the busy timeout instead of failing on a stale        │
//! │  snapshot.                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No sale row is written: the checkout is consumed entirely by the two
//! ledger mutations, and resubmitting the same cart is a new sale.

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{debug, info};

use crate::error::DbError;
use crate::repository::member::MEMBER_COLUMNS;
use crate::repository::product::PRODUCT_COLUMNS;
use coop_core::checkout::{self, CheckoutRequest};
use coop_core::{CoreError, Member, PaymentMethod, Product, CREDIT_CEILING_CENTS};

// =============================================================================
// Error & Receipt Types
// =============================================================================

/// Errors surfaced by the checkout path.
///
/// Business-rule rejections and infrastructure failures are distinct:
/// the API layer maps the former to client errors and the latter to 500s.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// A business rule rejected the sale (ceiling, stock, unknown rows).
    #[error(transparent)]
    Domain(#[from] CoreError),

    /// The database failed.
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for CheckoutError {
    fn from(err: sqlx::Error) -> Self {
        CheckoutError::Db(err.into())
    }
}

/// Acknowledgement of a processed sale.
///
/// This is all the caller gets: no sale record exists to look up later.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    /// Sale total in cents.
    pub total_cents: i64,

    /// Number of cart lines applied.
    pub line_count: usize,

    /// Member whose balance was increased, if any.
    pub member_id: Option<String>,

    /// How the sale was tendered.
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Repository
// =============================================================================

/// Repository applying checkouts to the ledgers.
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: SqlitePool,
}

impl CheckoutRepository {
    /// Creates a new CheckoutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CheckoutRepository { pool }
    }

    /// Processes a checkout end to end.
    ///
    /// ## Steps
    /// 1. Shape validation (non-empty cart, quantity range, total >= 1)
    /// 2. Snapshot reads of every referenced row, then every business rule
    /// 3. One write-only transaction applying the guarded updates; any
    ///    zero-row guard rolls the whole transaction back
    ///
    /// ## Returns
    /// * `Ok(CheckoutReceipt)` - both ledgers mutated atomically
    /// * `Err(CheckoutError::Domain)` - a rule rejected the sale, nothing mutated
    /// * `Err(CheckoutError::Db)` - infrastructure failure, nothing mutated
    pub async fn process(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, CheckoutError> {
        checkout::validate_request(request)?;

        debug!(
            lines = request.cart.len(),
            total_cents = request.total_cents,
            member = ?request.member_id,
            "Processing checkout"
        );

        // Snapshot reads: load the member row, if the sale names one.
        let member = match &request.member_id {
            Some(id) => {
                let member = sqlx::query_as::<_, Member>(&format!(
                    "SELECT {MEMBER_COLUMNS} FROM members WHERE id = ?1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await
                .map_err(DbError::from)?
                .ok_or_else(|| CoreError::MemberNotFound(id.clone()))?;
                Some(member)
            }
            None => None,
        };

        // Load every cart line's product row, in cart order.
        let mut products = Vec::with_capacity(request.cart.len());
        for line in &request.cart {
            let product = sqlx::query_as::<_, Product>(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
            ))
            .bind(&line.product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(DbError::from)?
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;
            products.push(product);
        }

        // Every rule must pass before anything is written. The plan holds
        // the full mutation set.
        let plan = checkout::plan_checkout(request, &products, member.as_ref())?;

        let now = Utc::now();

        // The transaction starts with a write, never a read: its first
        // statement takes the SQLite write lock, and a queued writer
        // waits on the busy timeout.
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // Balance first, mirroring the rule order: the ceiling guard
        // re-checks under the write lock what the plan checked on the
        // snapshot.
        if let Some(member) = &member {
            let result = sqlx::query(
                r#"
                UPDATE members SET
                    balance_cents = balance_cents + ?2,
                    updated_at = ?3
                WHERE id = ?1 AND balance_cents < ?4
                "#,
            )
            .bind(&member.id)
            .bind(plan.total.cents())
            .bind(now)
            .bind(CREDIT_CEILING_CENTS)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            if result.rows_affected() == 0 {
                tx.rollback().await.ok();
                return Err(CoreError::CreditCeilingReached {
                    member_id: member.id.clone(),
                    balance_cents: member.balance_cents,
                    ceiling_cents: CREDIT_CEILING_CENTS,
                }
                .into());
            }
        }

        // Stock decrements, each guarded against concurrent sales.
        for (decrement, product) in plan.decrements.iter().zip(&products) {
            let result = sqlx::query(
                r#"
                UPDATE products SET
                    current_stock = current_stock - ?2,
                    updated_at = ?3
                WHERE id = ?1 AND current_stock >= ?2
                "#,
            )
            .bind(&decrement.product_id)
            .bind(decrement.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            if result.rows_affected() == 0 {
                // A concurrent sale took the stock between our snapshot
                // and this guard. Roll back everything, including the
                // balance increase above.
                tx.rollback().await.ok();
                return Err(CoreError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.current_stock,
                    requested: decrement.quantity,
                }
                .into());
            }
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        info!(
            total_cents = plan.total.cents(),
            lines = plan.decrements.len(),
            member = ?plan.member_id,
            payment_method = plan.payment_method.as_str(),
            "Sale processed"
        );

        Ok(CheckoutReceipt {
            total_cents: plan.total.cents(),
            line_count: plan.decrements.len(),
            member_id: plan.member_id,
            payment_method: plan.payment_method,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
