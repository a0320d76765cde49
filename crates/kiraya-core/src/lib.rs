//! # kiraya-core: Pure Business Logic for Kiraya Rentals
//!
//! This crate is the **heart** of Kiraya Rentals. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Kiraya Rentals Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Screens / external shell                       │   │
//! │  │    Stock UI ──► Rental UI ──► Bill PDF ──► Rents / Reports     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kiraya-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  billing  │  │   bill    │  │ validation│  │   │
//! │  │   │  Rental   │  │ day count │  │ HTML bill │  │   rules   │  │   │
//! │  │   │   Item    │  │  totals   │  │  report   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  kiraya-db (Database Layer)                     │   │
//! │  │        SQLite queries, migrations, ledger transactions          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (InventoryItem, RentalRecord, BillDraft)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`billing`] - Day counting and rental amount calculations
//! - [`bill`] - Bill/invoice HTML rendering for the PDF exporter
//! - [`report`] - Report aggregation and HTML rendering
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in minor units (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use kiraya_core::billing;
//! use kiraya_core::money::Money;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = NaiveDate::from_ymd_opt(2024, 1, 3).unwrap();
//!
//! // Inclusive day counting: 1st, 2nd and 3rd = 3 days
//! let days = billing::number_of_days(start, end);
//! assert_eq!(days, 3);
//!
//! // 3 units at 100.00/day for 3 days
//! let total = billing::compute_total(3, Money::from_cents(10_000), days);
//! assert_eq!(total.cents(), 90_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod billing;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kiraya_core::Money` instead of
// `use kiraya_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;
