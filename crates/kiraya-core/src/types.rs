//! # Domain Types
//!
//! Core domain types used throughout Kiraya Rentals.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ InventoryItem   │   │  RentalRecord   │   │   BillDraft     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  ephemeral      │       │
//! │  │  name           │   │  item snapshot  │   │  billing subset │       │
//! │  │  rate_cents     │   │  status         │   │  + ad hoc       │       │
//! │  │  quantity       │   │  period, money  │   │    discount     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A RentalRecord copies `item_name` and `rate_cents` from the InventoryItem
//! at creation time and never re-reads them. Historical bills stay stable
//! even if the item's rate changes later; `item_id` is a lookup reference
//! only, not ownership.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::billing;
use crate::error::ValidationError;
use crate::money::Money;
use crate::validation;

// =============================================================================
// Inventory Item
// =============================================================================

/// A rentable item with a per-day rate and an available unit count.
///
/// `quantity` is the only shared mutable resource in the system. It must
/// only ever be mutated through the ledger's transactional operations,
/// never via a blind field overwrite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique identifier (UUID v4), store-assigned.
    pub id: String,

    /// Display name shown on bills and reports.
    pub name: String,

    /// Rental rate per day, in minor currency units.
    pub rate_cents: i64,

    /// Units currently available. Never negative.
    pub quantity: i64,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Returns the per-day rate as a Money type.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }
}

// =============================================================================
// Rental Status
// =============================================================================

/// The lifecycle status of a rental agreement.
///
/// Transitions only `Pending -> Paid`, one-way, exactly once. There is no
/// cancelled state; deletion is a separate destructive admin action, not a
/// lifecycle transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum RentalStatus {
    /// Rental is open; stock is reserved, payment outstanding.
    Pending,
    /// Rental has been settled: stock restored, amounts persisted.
    Paid,
}

impl Default for RentalStatus {
    fn default() -> Self {
        RentalStatus::Pending
    }
}

// =============================================================================
// Rental Record
// =============================================================================

/// One rental agreement: a quantity of one item lent to a customer for a
/// date range.
///
/// `item_name` and `rate_cents` are frozen snapshots (see module docs);
/// `total_amount_cents`/`final_amount_cents` are populated at settlement
/// for audit and are never the source of truth for reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct RentalRecord {
    pub id: String,
    pub customer_name: String,
    pub phone_number: String,

    /// Back-reference to the InventoryItem (lookup only, no ownership).
    pub item_id: String,

    /// Item name at rental time (frozen).
    pub item_name: String,

    /// Per-day rate at rental time (frozen).
    pub rate_cents: i64,

    /// Units rented. Always > 0.
    pub quantity: i64,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Amount paid up front. Defaults to 0.
    pub advance_paid_cents: i64,

    /// Discount granted at bill time. Stored at settlement, 0 until then.
    pub discount_cents: i64,

    pub status: RentalStatus,

    /// Set once at creation.
    pub created_at: DateTime<Utc>,

    /// Set once at settlement.
    pub paid_at: Option<DateTime<Utc>>,

    /// Computed total, persisted at settlement for audit.
    pub total_amount_cents: Option<i64>,

    /// Computed final amount, persisted at settlement for audit.
    pub final_amount_cents: Option<i64>,

    /// Optional file reference to the customer's captured ID photo.
    pub aadhaar_photo: Option<String>,

    /// Optional file reference to the customer's vehicle photo.
    pub vehicle_photo: Option<String>,
}

impl RentalRecord {
    /// Returns the snapshot per-day rate as Money.
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }

    /// Returns the advance paid as Money.
    #[inline]
    pub fn advance_paid(&self) -> Money {
        Money::from_cents(self.advance_paid_cents)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    /// Inclusive day count of the rental period.
    #[inline]
    pub fn days(&self) -> i64 {
        billing::number_of_days(self.start_date, self.end_date)
    }

    /// Recomputes the rental total from the raw snapshot fields.
    ///
    /// Reports use this rather than `total_amount_cents` so historical rows
    /// stay consistent even when a stored total was never persisted.
    #[inline]
    pub fn computed_total(&self) -> Money {
        billing::compute_total(self.quantity, self.rate(), self.days())
    }
}

// =============================================================================
// New Rental (creation input)
// =============================================================================

/// Validated input for creating a rental agreement.
///
/// The item snapshot fields are *not* part of this struct; they are read
/// inside the creation transaction, after the stock reservation succeeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRental {
    pub customer_name: String,
    pub phone_number: String,
    pub item_id: String,
    pub quantity: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub advance_paid_cents: i64,
}

impl NewRental {
    /// Checks every field-level precondition for rental creation.
    ///
    /// Runs before any write, so a failed validation never leaves partial
    /// state. Each failure names the offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validation::validate_customer_name(&self.customer_name)?;
        validation::validate_phone_number(&self.phone_number)?;
        validation::validate_quantity(self.quantity)?;
        validation::validate_date_range(self.start_date, self.end_date)?;
        validation::validate_amount_cents("advance paid", self.advance_paid_cents)?;
        Ok(())
    }
}

// =============================================================================
// Bill Draft
// =============================================================================

/// Ephemeral billing view of a rental, plus an ad hoc discount.
///
/// Used to preview bill output before anything is persisted; the amounts it
/// computes are exactly what settlement stores back onto the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub customer_name: String,
    pub phone_number: String,
    pub item_name: String,
    pub quantity: i64,
    pub rate_cents: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub advance_paid_cents: i64,
    pub discount_cents: i64,
}

impl BillDraft {
    /// Builds a draft from a stored rental, applying a bill-time discount.
    pub fn from_record(record: &RentalRecord, discount: Money) -> Self {
        BillDraft {
            customer_name: record.customer_name.clone(),
            phone_number: record.phone_number.clone(),
            item_name: record.item_name.clone(),
            quantity: record.quantity,
            rate_cents: record.rate_cents,
            start_date: record.start_date,
            end_date: record.end_date,
            advance_paid_cents: record.advance_paid_cents,
            discount_cents: discount.cents(),
        }
    }

    /// Inclusive day count of the billed period.
    #[inline]
    pub fn days(&self) -> i64 {
        billing::number_of_days(self.start_date, self.end_date)
    }

    /// Total amount: quantity × rate × days.
    #[inline]
    pub fn total(&self) -> Money {
        billing::compute_total(self.quantity, Money::from_cents(self.rate_cents), self.days())
    }

    /// Final amount after advance and discount, clamped at zero.
    #[inline]
    pub fn final_amount(&self) -> Money {
        billing::compute_final(
            self.total(),
            Money::from_cents(self.advance_paid_cents),
            Money::from_cents(self.discount_cents),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
