//! # Ticket Repository
//!
//! Database operations for tickets: issuance and redemption.
//!
//! ## The redemption transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  redeem(ticket_id) - one transaction                    │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    SELECT ticket by ticket_id ──── absent ────► TicketNotFound          │
//! │    status == used ────────────────────────────► AlreadyUsed             │
//! │    SELECT product by reference ─── absent ────► ProductMissing          │
//! │    current_stock <= 0 ────────────────────────► OutOfStock              │
//! │    UPDATE products  SET stock = stock - 1  WHERE stock > 0              │
//! │    UPDATE tickets   SET status = 'used'    WHERE status = 'unused'      │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  Every early exit drops the transaction: no partial writes, ever.       │
//! │  Two scans of the same ticket serialize at the database, so exactly     │
//! │  one of them decrements stock and the other sees AlreadyUsed.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Issuance is the same shape: sequence bump and ticket insert commit
//! together, so a failed insert never burns a sequence number.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use labstock_core::ticket::format_ticket_id;
use labstock_core::{Product, RedeemOutcome, Redemption, Ticket, TicketStatus};

/// Columns selected for every Ticket read, in declaration order.
const TICKET_COLUMNS: &str = "id, ticket_id, product_id, status, created_at, used_at";

/// Repository for ticket database operations.
#[derive(Debug, Clone)]
pub struct TicketRepository {
    pool: SqlitePool,
}

impl TicketRepository {
    /// Creates a new TicketRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TicketRepository { pool }
    }

    /// Gets a ticket by its business identifier (the printed QR value).
    ///
    /// ## Returns
    /// * `Ok(Some(Ticket))` - Ticket found
    /// * `Ok(None)` - Never issued
    pub async fn get_by_ticket_id(&self, ticket_id: &str) -> DbResult<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?1"
        ))
        .bind(ticket_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// Lists all tickets issued for one product, oldest first.
    pub async fn list_for_product(&self, product_id: &str) -> DbResult<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE product_id = ?1 ORDER BY rowid"
        ))
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    /// Issues a new ticket for a product.
    ///
    /// Bumps the product's sequence and inserts the ticket record in one
    /// transaction. The returned ticket carries the new business identifier
    /// `"{tag}_{sequence}"` with status `unused`.
    ///
    /// ## Errors
    /// * `DbError::NotFound` - Product does not exist
    /// * Any storage error; in that case the sequence bump is rolled back
    pub async fn issue(&self, product_id: &str) -> DbResult<Ticket> {
        debug!(product_id = %product_id, "Issuing ticket");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        // Bump-and-read in one statement so concurrent issuance for the
        // same product can never mint the same number.
        let row: Option<(String, i64)> = sqlx::query_as(
            r#"
            UPDATE products
            SET latest_ticket_seq = latest_ticket_seq + 1, updated_at = ?2
            WHERE id = ?1
            RETURNING tag, latest_ticket_seq
            "#,
        )
        .bind(product_id)
        .bind(now)
        .fetch_optional(&mut *tx)
        .await?;

        let (tag, sequence) = row.ok_or_else(|| DbError::not_found("Product", product_id))?;

        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            ticket_id: format_ticket_id(&tag, sequence),
            product_id: product_id.to_string(),
            status: TicketStatus::Unused,
            created_at: now,
            used_at: None,
        };

        sqlx::query(
            r#"
            INSERT INTO tickets (id, ticket_id, product_id, status, created_at, used_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.ticket_id)
        .bind(&ticket.product_id)
        .bind(ticket.status)
        .bind(ticket.created_at)
        .bind(ticket.used_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(ticket_id = %ticket.ticket_id, "Ticket issued");
        Ok(ticket)
    }

    /// Redeems a ticket: decrements the product's stock by exactly 1 and
    /// marks the ticket used, atomically.
    ///
    /// The whole sequence is keyed by the ticket identifier and runs in one
    /// transaction, so re-running it for an already-used ticket is a pure
    /// rejection and a crash mid-way leaves no half-applied state.
    ///
    /// ## Returns
    /// [`RedeemOutcome`] describing which check failed, or the successful
    /// [`Redemption`]. Storage failures (not rule rejections) surface as
    /// `Err(DbError)`.
    pub async fn redeem(&self, ticket_id: &str) -> DbResult<RedeemOutcome> {
        debug!(ticket_id = %ticket_id, "Redeeming ticket");

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            "SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?1"
        ))
        .bind(ticket_id)
        .fetch_optional(&mut *tx)
        .await?;

        let ticket = match ticket {
            Some(t) => t,
            None => return Ok(RedeemOutcome::TicketNotFound),
        };

        if ticket.is_used() {
            return Ok(RedeemOutcome::AlreadyUsed);
        }

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, tag, name, current_stock, unit, latest_ticket_seq, created_at, updated_at
            FROM products WHERE id = ?1
            "#,
        )
        .bind(&ticket.product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let product = match product {
            Some(p) => p,
            None => return Ok(RedeemOutcome::ProductMissing),
        };

        if !product.in_stock() {
            // The ticket stays unused; the transaction drops without writing.
            return Ok(RedeemOutcome::OutOfStock {
                product_name: product.name,
            });
        }

        let decremented = sqlx::query(
            r#"
            UPDATE products
            SET current_stock = current_stock - 1, updated_at = ?2
            WHERE id = ?1 AND current_stock > 0
            "#,
        )
        .bind(&product.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            return Ok(RedeemOutcome::OutOfStock {
                product_name: product.name,
            });
        }

        let marked = sqlx::query(
            r#"
            UPDATE tickets
            SET status = 'used', used_at = ?2
            WHERE id = ?1 AND status = 'unused'
            "#,
        )
        .bind(&ticket.id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if marked.rows_affected() == 0 {
            // Guard tripped: someone flipped the status since our read.
            // Dropping the transaction also rolls the decrement back.
            return Ok(RedeemOutcome::AlreadyUsed);
        }

        tx.commit().await?;

        info!(
            ticket_id = %ticket.ticket_id,
            product = %product.tag,
            remaining = product.current_stock - 1,
            "Ticket redeemed"
        );

        Ok(RedeemOutcome::Redeemed(Redemption {
            ticket_id: ticket.ticket_id,
            product_name: product.name,
            unit: product.unit,
            remaining_stock: product.current_stock - 1,
        }))
    }

    /// Counts tickets (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tickets")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::product::generate_product_id;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn insert_product(db: &Database, tag: &str, stock: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: generate_product_id(),
            tag: tag.to_string(),
            name: format!("{} (test)", tag),
            current_stock: stock,
            unit: "box".to_string(),
            latest_ticket_seq: 0,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await.unwrap();
        product
    }

    #[tokio::test]
    async fn test_issue_builds_sequential_ids() {
        let db = test_db().await;
        let product = insert_product(&db, "GLOVE", 5).await;

        let first = db.tickets().issue(&product.id).await.unwrap();
        let second = db.tickets().issue(&product.id).await.unwrap();

        assert_eq!(first.ticket_id, "GLOVE_1");
        assert_eq!(second.ticket_id, "GLOVE_2");
        assert_eq!(first.status, TicketStatus::Unused);
        assert!(first.used_at.is_none());

        // The bump is persisted on the product
        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.latest_ticket_seq, 2);
    }

    #[tokio::test]
    async fn test_issue_missing_product() {
        let db = test_db().await;
        let err = db.tickets().issue("no-such-id").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_issue_sequences_are_per_product() {
        let db = test_db().await;
        let gloves = insert_product(&db, "GLOVE", 5).await;
        let tips = insert_product(&db, "TIP", 5).await;

        assert_eq!(db.tickets().issue(&gloves.id).await.unwrap().ticket_id, "GLOVE_1");
        assert_eq!(db.tickets().issue(&tips.id).await.unwrap().ticket_id, "TIP_1");
        assert_eq!(db.tickets().issue(&gloves.id).await.unwrap().ticket_id, "GLOVE_2");
    }

    #[tokio::test]
    async fn test_redeem_happy_path_then_already_used() {
        let db = test_db().await;
        let product = insert_product(&db, "PIPETTE", 5).await;
        let ticket = db.tickets().issue(&product.id).await.unwrap();
        assert_eq!(ticket.ticket_id, "PIPETTE_1");

        // First scan: success, stock 5 -> 4
        let outcome = db.tickets().redeem("PIPETTE_1").await.unwrap();
        match outcome {
            RedeemOutcome::Redeemed(redemption) => {
                assert_eq!(redemption.ticket_id, "PIPETTE_1");
                assert_eq!(redemption.remaining_stock, 4);
            }
            other => panic!("expected Redeemed, got {:?}", other),
        }

        let stored = db.tickets().get_by_ticket_id("PIPETTE_1").await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Used);
        assert!(stored.used_at.is_some());

        // Second scan: rejected, stock stays 4
        let outcome = db.tickets().redeem("PIPETTE_1").await.unwrap();
        assert!(matches!(outcome, RedeemOutcome::AlreadyUsed));

        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.current_stock, 4);
    }

    #[tokio::test]
    async fn test_redeem_unknown_ticket() {
        let db = test_db().await;
        let outcome = db.tickets().redeem("NEVER_9").await.unwrap();
        assert!(matches!(outcome, RedeemOutcome::TicketNotFound));
    }

    #[tokio::test]
    async fn test_redeem_out_of_stock_leaves_ticket_unused() {
        let db = test_db().await;
        let product = insert_product(&db, "TUBE", 0).await;
        let ticket = db.tickets().issue(&product.id).await.unwrap();

        let outcome = db.tickets().redeem(&ticket.ticket_id).await.unwrap();
        match outcome {
            RedeemOutcome::OutOfStock { product_name } => {
                assert_eq!(product_name, "TUBE (test)");
            }
            other => panic!("expected OutOfStock, got {:?}", other),
        }

        // No write happened: stock stays 0, ticket stays unused
        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.current_stock, 0);
        let stored = db
            .tickets()
            .get_by_ticket_id(&ticket.ticket_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, TicketStatus::Unused);
    }

    #[tokio::test]
    async fn test_redeem_drains_stock_to_zero_not_below() {
        let db = test_db().await;
        let product = insert_product(&db, "FILTER", 2).await;

        let t1 = db.tickets().issue(&product.id).await.unwrap();
        let t2 = db.tickets().issue(&product.id).await.unwrap();
        let t3 = db.tickets().issue(&product.id).await.unwrap();

        assert!(matches!(
            db.tickets().redeem(&t1.ticket_id).await.unwrap(),
            RedeemOutcome::Redeemed(_)
        ));
        assert!(matches!(
            db.tickets().redeem(&t2.ticket_id).await.unwrap(),
            RedeemOutcome::Redeemed(_)
        ));
        assert!(matches!(
            db.tickets().redeem(&t3.ticket_id).await.unwrap(),
            RedeemOutcome::OutOfStock { .. }
        ));

        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.current_stock, 0);
    }

    #[tokio::test]
    async fn test_list_for_product() {
        let db = test_db().await;
        let product = insert_product(&db, "GLOVE", 5).await;
        db.tickets().issue(&product.id).await.unwrap();
        db.tickets().issue(&product.id).await.unwrap();

        let tickets = db.tickets().list_for_product(&product.id).await.unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].ticket_id, "GLOVE_1");
        assert_eq!(tickets[1].ticket_id, "GLOVE_2");
    }
}
