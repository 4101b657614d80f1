//! # Product Repository
//!
//! Database operations for the product registry.
//!
//! ## Key Operations
//! - Registry reads (all products, by tag, by record id)
//! - Stock adjustment with a non-negative guard
//! - Ticket sequence bump
//!
//! ## Conditional Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Why the UPDATEs carry WHERE guards                         │
//! │                                                                         │
//! │  ❌ Lost-update shape (read, compute, write back):                      │
//! │     stock = SELECT current_stock ...          ← both callers read 5     │
//! │     UPDATE products SET current_stock = 4     ← both write 4            │
//! │                                                                         │
//! │  ✅ Conditional shape (single guarded statement):                       │
//! │     UPDATE products                                                     │
//! │     SET current_stock = current_stock + ?delta                          │
//! │     WHERE id = ? AND current_stock + ?delta >= 0                        │
//! │                                                                         │
//! │  The database applies each statement atomically, so two concurrent      │
//! │  adjustments compose instead of clobbering, and the stock can never     │
//! │  be driven below zero. Sequence bumps use UPDATE ... RETURNING for      │
//! │  the same reason: no two callers can observe the same prior value.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use labstock_core::Product;

/// Columns selected for every Product read, in declaration order.
const PRODUCT_COLUMNS: &str =
    "id, tag, name, current_stock, unit, latest_ticket_seq, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let all = repo.list_all().await?;
/// let gloves = repo.get_by_tag("GLOVE").await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product in the registry.
    ///
    /// Ordering follows insertion order (rowid). An empty registry returns
    /// an empty vec, never an error.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY rowid"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its record ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Gets a product by its tag (exact match).
    ///
    /// Absence is not an error; the caller decides what a missing tag means.
    pub async fn get_by_tag(&self, tag: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE tag = ?1"
        ))
        .bind(tag)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// ## Returns
    /// * `Ok(())` - Inserted
    /// * `Err(DbError::UniqueViolation)` - Tag already exists
    pub async fn insert(&self, product: &Product) -> DbResult<()> {
        debug!(tag = %product.tag, "Inserting product");

        sqlx::query(
            r#"
            INSERT INTO products (
                id, tag, name, current_stock, unit,
                latest_ticket_seq, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&product.id)
        .bind(&product.tag)
        .bind(&product.name)
        .bind(product.current_stock)
        .bind(&product.unit)
        .bind(product.latest_ticket_seq)
        .bind(product.created_at)
        .bind(product.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Adjusts product stock by `delta` (negative for usage, positive for
    /// restocking) and returns the updated product.
    ///
    /// A single guarded UPDATE; the write only lands when the resulting
    /// stock stays non-negative, so concurrent adjustments compose and the
    /// invariant holds without an in-process lock.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product no longer exists
    /// * `DbError::CheckViolation` - Delta would drive stock below zero
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> DbResult<Product> {
        debug!(id = %id, delta = %delta, "Adjusting stock");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET current_stock = current_stock + ?2, updated_at = ?3
            WHERE id = ?1 AND current_stock + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Distinguish a missing product from a rejected delta.
            return match self.get_by_id(id).await? {
                Some(product) => Err(DbError::CheckViolation {
                    message: format!(
                        "stock for '{}' cannot go below zero (current {}, delta {})",
                        product.tag, product.current_stock, delta
                    ),
                }),
                None => Err(DbError::not_found("Product", id)),
            };
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Bumps the per-product ticket sequence and returns the new value.
    ///
    /// `UPDATE ... RETURNING` makes the increment-and-read atomic: two
    /// concurrent bumps always produce distinct numbers, which is what
    /// keeps ticket identifiers unique.
    pub async fn bump_sequence(&self, id: &str) -> DbResult<i64> {
        debug!(id = %id, "Bumping ticket sequence");

        let now = Utc::now();

        let seq: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE products
            SET latest_ticket_seq = latest_ticket_seq + 1, updated_at = ?2
            WHERE id = ?1
            RETURNING latest_ticket_seq
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_optional(&self.pool)
        .await?;

        seq.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Counts products (for diagnostics and the seed binary).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Helper to generate a new product record ID.
pub fn generate_product_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
