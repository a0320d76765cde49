//! # Item Repository (Inventory Ledger)
//!
//! Database operations for rentable items, including the stock ledger.
//!
//! ## Ledger Discipline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Mutation Strategy                              │
//! │                                                                         │
//! │  ❌ WRONG: blind overwrite (races with concurrent rentals)             │
//! │     UPDATE items SET quantity = 7 WHERE id = ?                         │
//! │                                                                         │
//! │  ✅ CORRECT: conditional delta inside a transaction                    │
//! │     UPDATE items SET quantity = quantity - ?                           │
//! │     WHERE id = ? AND quantity >= ?                                     │
//! │                                                                         │
//! │  Two rentals racing for the last units: the UPDATE's guard makes one   │
//! │  of them fail with InsufficientStock instead of driving the count      │
//! │  negative. `quantity` never goes below zero.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Releases have no upper cap: returns may push `quantity` above any nominal
//! starting figure. That mirrors the shop's actual bookkeeping.

use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use kiraya_core::{validation, CoreError, InventoryItem};

const ITEM_COLUMNS: &str = "id, name, rate_cents, quantity, created_at, updated_at";

/// Repository for item database operations and the stock ledger.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Inserts a new rentable item.
    ///
    /// ## Arguments
    /// * `name` - Display name (non-empty)
    /// * `rate_cents` - Per-day rate in minor units (>= 0)
    /// * `quantity` - Initial stock (>= 0)
    pub async fn insert(&self, name: &str, rate_cents: i64, quantity: i64) -> StoreResult<InventoryItem> {
        validation::validate_item_name(name)?;
        validation::validate_rate_cents(rate_cents)?;
        validation::validate_stock_quantity(quantity)?;

        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            rate_cents,
            quantity,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        debug!(id = %item.id, name = %item.name, "Inserting item");

        sqlx::query(
            r#"
            INSERT INTO items (id, name, rate_cents, quantity, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.rate_cents)
        .bind(item.quantity)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets an item by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(InventoryItem))` - Item found
    /// * `Ok(None)` - Item not found
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<InventoryItem>> {
        let item = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists all items sorted by name (the available-items screen).
    pub async fn list(&self) -> StoreResult<Vec<InventoryItem>> {
        let items = sqlx::query_as::<_, InventoryItem>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Updates an item's per-day rate.
    ///
    /// Deliberately does NOT touch `quantity`; stock only moves through the
    /// ledger operations below.
    pub async fn update_rate(&self, id: &str, rate_cents: i64) -> StoreResult<()> {
        validation::validate_rate_cents(rate_cents)?;

        debug!(id = %id, rate_cents = %rate_cents, "Updating item rate");

        let result = sqlx::query(
            r#"
            UPDATE items SET rate_cents = ?2, updated_at = ?3
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(rate_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::ItemNotFound(id.to_string()).into());
        }

        Ok(())
    }

    /// Reserves stock for a rental: atomically decrements `quantity`.
    ///
    /// ## Returns
    /// The new available quantity after the reservation.
    ///
    /// ## Errors
    /// * `InsufficientStock` - fewer units available than requested; names
    ///   the item and both counts
    /// * `ItemNotFound` - no such item
    pub async fn reserve_stock(&self, item_id: &str, quantity: i64) -> StoreResult<i64> {
        validation::validate_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;
        let new_quantity = reserve_on(&mut tx, item_id, quantity).await?;
        tx.commit().await?;

        debug!(item_id = %item_id, reserved = %quantity, remaining = %new_quantity, "Stock reserved");
        Ok(new_quantity)
    }

    /// Releases previously reserved stock: atomically increments `quantity`.
    ///
    /// ## Returns
    /// The new available quantity after the release.
    pub async fn release_stock(&self, item_id: &str, quantity: i64) -> StoreResult<i64> {
        validation::validate_quantity(quantity)?;

        let mut tx = self.pool.begin().await?;
        let new_quantity = release_on(&mut tx, item_id, quantity).await?;
        tx.commit().await?;

        debug!(item_id = %item_id, released = %quantity, available = %new_quantity, "Stock released");
        Ok(new_quantity)
    }
}

// =============================================================================
// Transaction-Scoped Ledger Operations
// =============================================================================
// The rental lifecycle needs the same two mutations inside its own
// transactions (reservation during creation, release during settlement),
// so the SQL lives here and both paths share it.

/// Conditionally decrements stock inside an open transaction.
///
/// The `quantity >= ?` guard is what makes concurrent reservations safe:
/// the read-check-write collapses into one statement, so two racing rentals
/// can never over-allocate the same units.
pub(crate) async fn reserve_on(
    tx: &mut Transaction<'_, Sqlite>,
    item_id: &str,
    quantity: i64,
) -> StoreResult<i64> {
    let result = sqlx::query(
        r#"
        UPDATE items
        SET quantity = quantity - ?2, updated_at = ?3
        WHERE id = ?1 AND quantity >= ?2
        "#,
    )
    .bind(item_id)
    .bind(quantity)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        // Distinguish a missing item from short stock, naming the item
        let row: Option<(String, i64)> =
            sqlx::query_as("SELECT name, quantity FROM items WHERE id = ?1")
                .bind(item_id)
                .fetch_optional(&mut **tx)
                .await?;

        return match row {
            None => Err(CoreError::ItemNotFound(item_id.to_string()).into()),
            Some((name, available)) => Err(StoreError::Domain(CoreError::InsufficientStock {
                item: name,
                available,
                requested: quantity,
            })),
        };
    }

    current_quantity(tx, item_id).await
}

/// Increments stock inside an open transaction.
pub(crate) async fn release_on(
    tx: &mut Transaction<'_, Sqlite>,
    item_id: &str,
    quantity: i64,
) -> StoreResult<i64> {
    let result = sqlx::query(
        r#"
        UPDATE items
        SET quantity = quantity + ?2, updated_at = ?3
        WHERE id = ?1
        "#,
    )
    .bind(item_id)
    .bind(quantity)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(CoreError::ItemNotFound(item_id.to_string()).into());
    }

    current_quantity(tx, item_id).await
}

async fn current_quantity(tx: &mut Transaction<'_, Sqlite>, item_id: &str) -> StoreResult<i64> {
    let quantity: i64 = sqlx::query_scalar("SELECT quantity FROM items WHERE id = ?1")
        .bind(item_id)
        .fetch_one(&mut **tx)
        .await?;

    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};
    use kiraya_core::CoreError;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = test_db().await;
        let item = db.items().insert("Concrete Mixer", 10_000, 10).await.unwrap();

        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Concrete Mixer");
        assert_eq!(fetched.rate_cents, 10_000);
        assert_eq!(fetched.quantity, 10);
    }

    #[tokio::test]
    async fn test_insert_rejects_bad_input() {
        let db = test_db().await;

        assert!(db.items().insert("", 100, 1).await.is_err());
        assert!(db.items().insert("Ladder", -1, 1).await.is_err());
        assert!(db.items().insert("Ladder", 100, -1).await.is_err());
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = test_db().await;
        db.items().insert("Scaffold", 500, 1).await.unwrap();
        db.items().insert("Ladder", 300, 1).await.unwrap();

        let items = db.items().list().await.unwrap();
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Ladder", "Scaffold"]);
    }

    #[tokio::test]
    async fn test_reserve_and_release_round_trip() {
        let db = test_db().await;
        let item = db.items().insert("Mixer", 10_000, 10).await.unwrap();

        let remaining = db.items().reserve_stock(&item.id, 3).await.unwrap();
        assert_eq!(remaining, 7);

        let restored = db.items().release_stock(&item.id, 3).await.unwrap();
        assert_eq!(restored, 10);
    }

    #[tokio::test]
    async fn test_reserve_insufficient_stock() {
        let db = test_db().await;
        let item = db.items().insert("Mixer", 10_000, 2).await.unwrap();

        let err = db.items().reserve_stock(&item.id, 5).await.unwrap_err();
        match err {
            StoreError::Domain(CoreError::InsufficientStock {
                item: name,
                available,
                requested,
            }) => {
                assert_eq!(name, "Mixer");
                assert_eq!(available, 2);
                assert_eq!(requested, 5);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // failed reservation leaves the count untouched
        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.quantity, 2);
    }

    #[tokio::test]
    async fn test_reserve_unknown_item() {
        let db = test_db().await;

        let err = db.items().reserve_stock("missing", 1).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::ItemNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_release_has_no_upper_cap() {
        let db = test_db().await;
        let item = db.items().insert("Mixer", 10_000, 2).await.unwrap();

        // a release without a matching reservation still lands
        let quantity = db.items().release_stock(&item.id, 5).await.unwrap();
        assert_eq!(quantity, 7);
    }

    #[tokio::test]
    async fn test_update_rate_leaves_quantity_alone() {
        let db = test_db().await;
        let item = db.items().insert("Mixer", 10_000, 4).await.unwrap();

        db.items().update_rate(&item.id, 12_000).await.unwrap();

        let fetched = db.items().get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(fetched.rate_cents, 12_000);
        assert_eq!(fetched.quantity, 4);

        let err = db.items().update_rate("missing", 100).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::ItemNotFound(_))
        ));
    }
}
