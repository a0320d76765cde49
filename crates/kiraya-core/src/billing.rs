//! # Billing Calculator
//!
//! Pure functions turning a rental's quantity/rate/date-range/advance/
//! discount into a total and a final amount.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Billing Pipeline                                   │
//! │                                                                         │
//! │  start_date, end_date                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  number_of_days() ── inclusive count, 0 when inverted                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_total(quantity, rate, days) = q × rate × days                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  compute_final(total, advance, discount) = max(total − a − d, 0)       │
//! │                                                                         │
//! │  Same pipeline everywhere: bill preview, settlement persistence,       │
//! │  and historical report rows all re-derive from these functions.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::money::Money;

/// Inclusive day count of a rental period.
///
/// A one-day rental (start == end) counts as 1 day; renting the 1st through
/// the 3rd counts as 3 days. An inverted range yields 0, never a negative
/// number, and this function never fails.
///
/// ## Example
/// ```rust
/// use chrono::NaiveDate;
/// use kiraya_core::billing::number_of_days;
///
/// let d = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
/// assert_eq!(number_of_days(d(2024, 1, 1), d(2024, 1, 1)), 1);
/// assert_eq!(number_of_days(d(2024, 1, 1), d(2024, 1, 3)), 3);
/// assert_eq!(number_of_days(d(2024, 1, 3), d(2024, 1, 1)), 0);
/// ```
pub fn number_of_days(start: NaiveDate, end: NaiveDate) -> i64 {
    if end < start {
        return 0;
    }
    (end - start).num_days() + 1
}

/// Total rental amount: quantity × rate × days.
///
/// Monotonically non-decreasing in each argument (for non-negative inputs).
pub fn compute_total(quantity: i64, rate: Money, days: i64) -> Money {
    rate.multiply_quantity(quantity).multiply_quantity(days)
}

/// Final amount after advance and discount: max(total − advance − discount, 0).
///
/// Never negative, even when advance + discount exceed the total.
pub fn compute_final(total: Money, advance_paid: Money, discount: Money) -> Money {
    total.saturating_sub(advance_paid).saturating_sub(discount)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_number_of_days_inclusive() {
        // start == end counts as one day
        assert_eq!(number_of_days(date(2024, 1, 1), date(2024, 1, 1)), 1);
        assert_eq!(number_of_days(date(2024, 1, 1), date(2024, 1, 3)), 3);
        // across a month boundary
        assert_eq!(number_of_days(date(2024, 1, 31), date(2024, 2, 1)), 2);
        // leap day
        assert_eq!(number_of_days(date(2024, 2, 28), date(2024, 3, 1)), 3);
    }

    #[test]
    fn test_number_of_days_inverted_range_is_zero() {
        assert_eq!(number_of_days(date(2024, 1, 3), date(2024, 1, 1)), 0);
        assert_eq!(number_of_days(date(2024, 1, 2), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_compute_total() {
        // 3 units * 100.00/day * 3 days = 900.00
        let total = compute_total(3, Money::from_cents(10_000), 3);
        assert_eq!(total.cents(), 90_000);

        // zero in any argument zeroes the total
        assert_eq!(compute_total(0, Money::from_cents(10_000), 3).cents(), 0);
        assert_eq!(compute_total(3, Money::zero(), 3).cents(), 0);
        assert_eq!(compute_total(3, Money::from_cents(10_000), 0).cents(), 0);
    }

    #[test]
    fn test_compute_total_monotonic() {
        let rate = Money::from_cents(250);
        let base = compute_total(2, rate, 4);
        assert!(compute_total(3, rate, 4) >= base);
        assert!(compute_total(2, Money::from_cents(300), 4) >= base);
        assert!(compute_total(2, rate, 5) >= base);
    }

    #[test]
    fn test_compute_final() {
        let total = Money::from_cents(50_000);
        let final_amount = compute_final(total, Money::from_cents(30_000), Money::from_cents(10_000));
        assert_eq!(final_amount.cents(), 10_000);
    }

    #[test]
    fn test_compute_final_never_negative() {
        // 500.00 total, 300.00 advance, 400.00 discount -> 0.00, not -200.00
        let final_amount = compute_final(
            Money::from_cents(50_000),
            Money::from_cents(30_000),
            Money::from_cents(40_000),
        );
        assert_eq!(final_amount, Money::zero());
        assert!(!final_amount.is_negative());
    }
}
