//! # Rental Repository (Lifecycle)
//!
//! Database operations for rental agreements.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Rental Lifecycle                                      │
//! │                                                                         │
//! │  create()                              settle()                         │
//! │  ┌──────────────────────┐              ┌──────────────────────┐        │
//! │  │ one transaction:     │              │ one transaction:     │        │
//! │  │ 1. reserve stock     │   pending    │ 1. release stock     │  paid  │
//! │  │ 2. snapshot name/rate│ ───────────► │ 2. persist amounts   │ ─────► │
//! │  │ 3. insert rental     │              │ 3. mark paid_at      │        │
//! │  └──────────────────────┘              └──────────────────────┘        │
//! │                                                                         │
//! │  Reservation happens FIRST: if stock is short, nothing was snapshotted │
//! │  and nothing was inserted. Settlement is one-way, exactly once.        │
//! │                                                                         │
//! │  delete() is NOT a lifecycle transition. It removes the row and does   │
//! │  NOT touch inventory; a pending rental's reserved units stay deducted. │
//! │  Operators who want the stock back settle first, then delete.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::StoreResult;
use crate::repository::item::{release_on, reserve_on};
use kiraya_core::{
    validation, BillDraft, CoreError, Money, NewRental, RentalRecord, RentalStatus,
};

const RENTAL_COLUMNS: &str = "id, customer_name, phone_number, item_id, item_name, rate_cents, \
     quantity, start_date, end_date, advance_paid_cents, discount_cents, status, created_at, \
     paid_at, total_amount_cents, final_amount_cents, aadhaar_photo, vehicle_photo";

/// Repository for rental database operations.
#[derive(Debug, Clone)]
pub struct RentalRepository {
    pool: SqlitePool,
}

impl RentalRepository {
    /// Creates a new RentalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RentalRepository { pool }
    }

    /// Creates a rental agreement, reserving stock atomically.
    ///
    /// ## Transaction Steps
    /// 1. Reserve the requested units (guarded decrement)
    /// 2. Snapshot the item's current name and rate
    /// 3. Insert the rental row as `pending`
    ///
    /// The snapshot is read *after* the reservation succeeds, inside the same
    /// transaction, so a failed reservation never produces a half-built
    /// record.
    ///
    /// ## Errors
    /// * `Validation` - a field precondition failed; nothing was written
    /// * `InsufficientStock` / `ItemNotFound` - from the reservation
    pub async fn create(&self, new: &NewRental) -> StoreResult<RentalRecord> {
        new.validate()?;

        let mut tx = self.pool.begin().await?;

        // Reserve first; only then is the snapshot worth taking.
        reserve_on(&mut tx, &new.item_id, new.quantity).await?;

        let (item_name, rate_cents): (String, i64) =
            sqlx::query_as("SELECT name, rate_cents FROM items WHERE id = ?1")
                .bind(&new.item_id)
                .fetch_one(&mut *tx)
                .await?;

        let record = RentalRecord {
            id: Uuid::new_v4().to_string(),
            customer_name: new.customer_name.trim().to_string(),
            phone_number: new.phone_number.trim().to_string(),
            item_id: new.item_id.clone(),
            item_name,
            rate_cents,
            quantity: new.quantity,
            start_date: new.start_date,
            end_date: new.end_date,
            advance_paid_cents: new.advance_paid_cents,
            discount_cents: 0,
            status: RentalStatus::Pending,
            created_at: Utc::now(),
            paid_at: None,
            total_amount_cents: None,
            final_amount_cents: None,
            aadhaar_photo: None,
            vehicle_photo: None,
        };

        sqlx::query(
            r#"
            INSERT INTO rentals (
                id, customer_name, phone_number, item_id, item_name, rate_cents,
                quantity, start_date, end_date, advance_paid_cents, discount_cents,
                status, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            "#,
        )
        .bind(&record.id)
        .bind(&record.customer_name)
        .bind(&record.phone_number)
        .bind(&record.item_id)
        .bind(&record.item_name)
        .bind(record.rate_cents)
        .bind(record.quantity)
        .bind(record.start_date)
        .bind(record.end_date)
        .bind(record.advance_paid_cents)
        .bind(record.discount_cents)
        .bind(record.status)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            id = %record.id,
            item = %record.item_name,
            quantity = %record.quantity,
            "Rental created"
        );

        Ok(record)
    }

    /// Settles a pending rental: restores stock, persists the computed
    /// amounts, and marks it paid. One-way, exactly once.
    ///
    /// ## Transaction Steps
    /// 1. Load the rental; reject if missing or already paid
    /// 2. Release the reserved units back to inventory
    /// 3. Persist `discount_cents`, the computed total/final amounts,
    ///    `status = paid` and `paid_at`
    ///
    /// The `status = 'pending'` guard on the UPDATE catches a concurrent
    /// settlement that slipped in between the read and the write.
    ///
    /// ## Errors
    /// * `RentalNotFound` - no such rental
    /// * `AlreadySettled` - rental is already `paid`; inventory untouched
    pub async fn settle(&self, id: &str, discount: Money) -> StoreResult<RentalRecord> {
        validation::validate_amount_cents("discount", discount.cents())?;

        let mut tx = self.pool.begin().await?;

        let record = sqlx::query_as::<_, RentalRecord>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| CoreError::RentalNotFound(id.to_string()))?;

        if record.status == RentalStatus::Paid {
            return Err(CoreError::AlreadySettled(id.to_string()).into());
        }

        // Same pipeline the bill preview uses; the persisted amounts and the
        // printed bill can never disagree.
        let draft = BillDraft::from_record(&record, discount);
        let total = draft.total();
        let final_amount = draft.final_amount();

        release_on(&mut tx, &record.item_id, record.quantity).await?;

        let paid_at = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET status = 'paid',
                paid_at = ?2,
                discount_cents = ?3,
                total_amount_cents = ?4,
                final_amount_cents = ?5
            WHERE id = ?1 AND status = 'pending'
            "#,
        )
        .bind(id)
        .bind(paid_at)
        .bind(discount.cents())
        .bind(total.cents())
        .bind(final_amount.cents())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::AlreadySettled(id.to_string()).into());
        }

        tx.commit().await?;

        info!(
            id = %id,
            total = %total,
            final_amount = %final_amount,
            "Rental settled"
        );

        let mut settled = record;
        settled.status = RentalStatus::Paid;
        settled.paid_at = Some(paid_at);
        settled.discount_cents = discount.cents();
        settled.total_amount_cents = Some(total.cents());
        settled.final_amount_cents = Some(final_amount.cents());

        Ok(settled)
    }

    /// Deletes a rental record.
    ///
    /// Inventory is NOT adjusted: deleting a pending rental leaves its
    /// reserved units deducted. Settle first to restore them. Cleaning up
    /// settled history is the common case and must not double-restore.
    pub async fn delete(&self, id: &str) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::RentalNotFound(id.to_string()).into());
        }

        debug!(id = %id, "Rental deleted");
        Ok(())
    }

    /// Gets a rental by its ID.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<RentalRecord>> {
        let record = sqlx::query_as::<_, RentalRecord>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Lists rentals with the given status, newest first.
    pub async fn list_by_status(&self, status: RentalStatus) -> StoreResult<Vec<RentalRecord>> {
        let records = sqlx::query_as::<_, RentalRecord>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals WHERE status = ?1 ORDER BY created_at DESC"
        ))
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Pending rentals whose period ends on the given date (the due-today
    /// reminder list).
    pub async fn due_on(&self, date: NaiveDate) -> StoreResult<Vec<RentalRecord>> {
        let records = sqlx::query_as::<_, RentalRecord>(&format!(
            "SELECT {RENTAL_COLUMNS} FROM rentals \
             WHERE status = 'pending' AND end_date = ?1 \
             ORDER BY created_at DESC"
        ))
        .bind(date)
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    /// Attaches customer photo references to a rental.
    ///
    /// Passing `None` for a slot leaves the stored value as it is; photos
    /// can be captured one at a time.
    pub async fn attach_photos(
        &self,
        id: &str,
        aadhaar_photo: Option<&str>,
        vehicle_photo: Option<&str>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET aadhaar_photo = COALESCE(?2, aadhaar_photo),
                vehicle_photo = COALESCE(?3, vehicle_photo)
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(aadhaar_photo)
        .bind(vehicle_photo)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::RentalNotFound(id.to_string()).into());
        }

        debug!(id = %id, "Photos attached to rental");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use kiraya_core::InventoryItem;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn seed_item(db: &Database, quantity: i64) -> InventoryItem {
        db.items()
            .insert("Concrete Mixer", 10_000, quantity)
            .await
            .unwrap()
    }

    fn new_rental(item_id: &str, quantity: i64) -> NewRental {
        NewRental {
            customer_name: "Asha".to_string(),
            phone_number: "9876543210".to_string(),
            item_id: item_id.to_string(),
            quantity,
            start_date: date(2024, 1, 1),
            end_date: date(2024, 1, 3),
            advance_paid_cents: 0,
        }
    }

    #[tokio::test]
    async fn test_create_reserves_stock_and_snapshots() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;

        let record = db.rentals().create(&new_rental(&item.id, 3)).await.unwrap();
        assert_eq!(record.item_name, "Concrete Mixer");
        assert_eq!(record.rate_cents, 10_000);
        assert_eq!(record.status, RentalStatus::Pending);
        assert!(record.paid_at.is_none());

        let stock = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 7);
    }

    #[tokio::test]
    async fn test_create_insufficient_stock_writes_nothing() {
        let db = test_db().await;
        let item = seed_item(&db, 2).await;

        let err = db.rentals().create(&new_rental(&item.id, 5)).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::InsufficientStock { .. })
        ));

        // no rental row, no stock movement
        let pending = db.rentals().list_by_status(RentalStatus::Pending).await.unwrap();
        assert!(pending.is_empty());
        let stock = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 2);
    }

    #[tokio::test]
    async fn test_snapshot_survives_rate_change() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;

        let record = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();
        db.items().update_rate(&item.id, 99_999).await.unwrap();

        let fetched = db.rentals().get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched.rate_cents, 10_000);
    }

    #[tokio::test]
    async fn test_settle_restores_stock_and_persists_amounts() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;
        let record = db.rentals().create(&new_rental(&item.id, 3)).await.unwrap();

        let settled = db
            .rentals()
            .settle(&record.id, Money::zero())
            .await
            .unwrap();

        // 3 units * 100.00/day * 3 inclusive days = 900.00
        assert_eq!(settled.status, RentalStatus::Paid);
        assert_eq!(settled.total_amount_cents, Some(90_000));
        assert_eq!(settled.final_amount_cents, Some(90_000));
        assert!(settled.paid_at.is_some());

        let stock = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 10);
    }

    #[tokio::test]
    async fn test_settle_applies_discount_and_advance() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;

        let mut new = new_rental(&item.id, 3);
        new.advance_paid_cents = 20_000;
        let record = db.rentals().create(&new).await.unwrap();

        let settled = db
            .rentals()
            .settle(&record.id, Money::from_cents(5_000))
            .await
            .unwrap();

        // 900.00 - 200.00 advance - 50.00 discount = 650.00
        assert_eq!(settled.total_amount_cents, Some(90_000));
        assert_eq!(settled.final_amount_cents, Some(65_000));
        assert_eq!(settled.discount_cents, 5_000);
    }

    #[tokio::test]
    async fn test_settle_is_one_way_exactly_once() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;
        let record = db.rentals().create(&new_rental(&item.id, 3)).await.unwrap();

        let first = db.rentals().settle(&record.id, Money::zero()).await.unwrap();

        let err = db
            .rentals()
            .settle(&record.id, Money::zero())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::AlreadySettled(_))
        ));

        // second attempt changed nothing: no double stock restore
        let stock = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 10);
        let fetched = db.rentals().get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched.paid_at, first.paid_at);
    }

    #[tokio::test]
    async fn test_settle_unknown_rental() {
        let db = test_db().await;
        let err = db.rentals().settle("missing", Money::zero()).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::RentalNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_does_not_restore_stock() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;
        let record = db.rentals().create(&new_rental(&item.id, 3)).await.unwrap();

        db.rentals().delete(&record.id).await.unwrap();

        assert!(db.rentals().get_by_id(&record.id).await.unwrap().is_none());
        // the reserved units stay deducted
        let stock = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(stock.quantity, 7);
    }

    #[tokio::test]
    async fn test_list_by_status_newest_first() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;

        let first = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();

        db.rentals().settle(&second.id, Money::zero()).await.unwrap();

        let pending = db.rentals().list_by_status(RentalStatus::Pending).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, first.id);

        let paid = db.rentals().list_by_status(RentalStatus::Paid).await.unwrap();
        assert_eq!(paid.len(), 1);
        assert_eq!(paid[0].id, second.id);
    }

    #[tokio::test]
    async fn test_due_on_lists_pending_ending_that_day() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;

        let due = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();

        let mut later = new_rental(&item.id, 1);
        later.end_date = date(2024, 1, 10);
        db.rentals().create(&later).await.unwrap();

        let settled = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();
        db.rentals().settle(&settled.id, Money::zero()).await.unwrap();

        let due_today = db.rentals().due_on(date(2024, 1, 3)).await.unwrap();
        assert_eq!(due_today.len(), 1);
        assert_eq!(due_today[0].id, due.id);
    }

    #[tokio::test]
    async fn test_attach_photos_one_slot_at_a_time() {
        let db = test_db().await;
        let item = seed_item(&db, 10).await;
        let record = db.rentals().create(&new_rental(&item.id, 1)).await.unwrap();

        db.rentals()
            .attach_photos(&record.id, Some("photos/aadhaar.jpg"), None)
            .await
            .unwrap();
        db.rentals()
            .attach_photos(&record.id, None, Some("photos/vehicle.jpg"))
            .await
            .unwrap();

        let fetched = db.rentals().get_by_id(&record.id).await.unwrap().unwrap();
        assert_eq!(fetched.aadhaar_photo.as_deref(), Some("photos/aadhaar.jpg"));
        assert_eq!(fetched.vehicle_photo.as_deref(), Some("photos/vehicle.jpg"));

        let err = db
            .rentals()
            .attach_photos("missing", Some("x.jpg"), None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::RentalNotFound(_))
        ));
    }
}
