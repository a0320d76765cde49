//! # Repository Module
//!
//! Database repository implementations for Kiraya Rentals.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Caller                                                                 │
//! │       │                                                                 │
//! │       │  db.rentals().create(new_rental)                               │
//! │       ▼                                                                 │
//! │  RentalRepository                                                      │
//! │  ├── create(&self, new)          ← one transaction: reserve + insert   │
//! │  ├── settle(&self, id, discount) ← one transaction: release + mark     │
//! │  ├── delete(&self, id)                                                 │
//! │  └── list_by_status(&self, status)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  The item `quantity` column has a locking discipline: it is only ever  │
//! │  mutated through the ledger operations in [`item`], never via a blind  │
//! │  overwrite from elsewhere.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Item CRUD and the stock ledger
//! - [`rental::RentalRepository`] - Rental lifecycle operations
//! - [`report::ReportRepository`] - Historical range queries

pub mod item;
pub mod rental;
pub mod report;
