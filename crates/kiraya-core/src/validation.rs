//! # Validation Module
//!
//! Input validation utilities for Kiraya Rentals.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form screen (outer shell)                                    │
//! │  ├── Basic format checks (empty, numeric input)                        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE - business rule validation                       │
//! │  └── Runs before any write; failure means nothing was persisted        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    validate_non_empty("customer name", name, 200)
}

/// Validates a customer phone number.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 20 characters
pub fn validate_phone_number(phone: &str) -> ValidationResult<()> {
    validate_non_empty("phone number", phone, 20)
}

/// Validates an inventory item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    validate_non_empty("item name", name, 200)
}

fn validate_non_empty(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a rental quantity.
///
/// ## Rules
/// - Must be positive (> 0); a rental of zero units is meaningless
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a per-day rate in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free loans)
pub fn validate_rate_cents(cents: i64) -> ValidationResult<()> {
    validate_amount_cents("rate", cents)
}

/// Validates a money amount (advance, discount) in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_amount_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an initial stock count.
///
/// ## Rules
/// - Must be non-negative (>= 0); an item may be listed with nothing in stock
pub fn validate_stock_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Date Validators
// =============================================================================

/// Validates a rental period.
///
/// ## Rules
/// - `end` must not be before `start` (same day is a valid one-day rental)
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if end < start {
        return Err(ValidationError::InvalidDateRange { start, end });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
