//! # Kiraya DB
//!
//! SQLite persistence layer for Kiraya Rentals.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         kiraya-db                                        │
//! │                                                                         │
//! │  ┌───────────────┐                                                     │
//! │  │   Database    │ ── connection pool (WAL mode) + migrations          │
//! │  └───────┬───────┘                                                     │
//! │          │                                                              │
//! │          ├──► ItemRepository    item CRUD + stock ledger               │
//! │          ├──► RentalRepository  create / settle / delete lifecycle     │
//! │          └──► ReportRepository  historical range queries               │
//! │                                                                         │
//! │  Domain types and the billing math come from kiraya-core; this crate   │
//! │  owns only the SQL and the transaction boundaries.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use kiraya_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./kiraya.db")).await?;
//! let items = db.items().list().await?;
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::item::ItemRepository;
pub use repository::rental::RentalRepository;
pub use repository::report::ReportRepository;
