//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Repository Pattern                                 │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository (this module) ← Owns all SQL for one aggregate             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqlitePool → SQLite                                                   │
//! │                                                                         │
//! │  Handlers never write SQL; repositories never format HTTP.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Repositories
//! - [`product`] - Product ledger CRUD and the in-stock catalog
//! - [`member`] - Member ledger CRUD
//! - [`user`] - Staff account CRUD
//! - [`checkout`] - The transactional Sale Processor data side
//! - [`dashboard`] - Read-only aggregates

pub mod checkout;
pub mod dashboard;
pub mod member;
pub mod product;
pub mod user;
