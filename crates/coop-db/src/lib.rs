//! # coop-db: Database Layer for Coop POS
//!
//! This crate provides database access for the Coop POS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Coop POS Data Flow                               │
//! │                                                                         │
//! │  HTTP Handler (process_checkout)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      coop-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (product.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  member.rs,   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  checkout.rs, │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  user.rs,     │    │ 002_idx.sql  │  │   │
//! │  │   │ Management    │    │  dashboard.rs)│    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (WAL mode)                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coop_db::{Database, DbConfig};
//!
//! // Create database with default config
//! let config = DbConfig::new("path/to/coop.db");
//! let db = Database::new(config).await?;
//!
//! // Use repositories
//! let catalog = db.products().list_in_stock().await?;
//! let receipt = db.checkout().process(&request).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::DbError;
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::checkout::{CheckoutError, CheckoutReceipt, CheckoutRepository};
pub use repository::dashboard::DashboardRepository;
pub use repository::member::MemberRepository;
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
