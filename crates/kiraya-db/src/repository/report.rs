//! # Report Repository (Historical Range Queries)
//!
//! Fetches the rental rows a period report is built from. The aggregation
//! itself is pure and lives in [`kiraya_core::report`]; this module only
//! answers "which rentals were created in this window".
//!
//! Both `pending` and `paid` rentals are included: the report reflects
//! business written in the period, not cash collected.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use kiraya_core::RentalRecord;

const RENTAL_COLUMNS: &str = "id, customer_name, phone_number, item_id, item_name, rate_cents, \
     quantity, start_date, end_date, advance_paid_cents, discount_cents, status, created_at, \
     paid_at, total_amount_cents, final_amount_cents, aadhaar_photo, vehicle_photo";

/// Repository for report range queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Rentals created within the date range, both bounds inclusive,
    /// newest first.
    ///
    /// The window is on `created_at` (when the rental was written), not on
    /// the rental period. Bounds are whole days: `start` at midnight up to
    /// but not including the midnight after `end`.
    pub async fn rentals_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<RentalRecord>> {
        let window_start = Utc.from_utc_datetime(&start.and_time(NaiveTime::MIN));
        // exclusive upper bound: midnight after the last included day
        let after_end = end.succ_opt().unwrap_or(NaiveDate::MAX);
        let window_end = Utc.from_utc_datetime(&after_end.and_time(NaiveTime::MIN));

        debug!(%start, %end, "Fetching rentals for report window");

        let records = sqlx::query_as::<_, RentalRecord>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals \
             WHERE created_at >= ?1 AND created_at < ?2 \
             ORDER BY created_at DESC"
        ))
        .bind(window_start)
        .bind(window_end)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
