//! # Scan Redemption Engine
//!
//! Turns a scan into a stock decrement.
//!
//! Two entry points funnel into the same path: a decoded camera frame
//! (the full URL string) and a page-load query parameter (the bare ticket
//! identifier). The engine does not care which one delivered the scan.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Redemption Flow                                  │
//! │                                                                         │
//! │  camera frame ──► redeem_scan(payload) ── extract "qrcode" param ──┐    │
//! │                                                                    ▼    │
//! │  query param ───► redeem(ticket_id) ──────────────────────────► storage │
//! │                                                 (one transaction)  │    │
//! │                                                                    ▼    │
//! │          Redemption { product_name, unit, remaining_stock }             │
//! │          or NotFound / AlreadyUsed / OutOfStock / Store                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::{debug, info};

use labstock_core::ticket::{extract_ticket_id, parse_ticket_id};
use labstock_core::{RedeemOutcome, Redemption};
use labstock_db::Database;

use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

/// Service for redeeming scanned tickets.
#[derive(Debug, Clone)]
pub struct RedemptionEngine {
    db: Database,
}

impl RedemptionEngine {
    /// Creates a new RedemptionEngine.
    pub fn new(db: Database) -> Self {
        RedemptionEngine { db }
    }

    /// Redeems a ticket by its identifier.
    ///
    /// Idempotent with respect to re-submission: the same identifier can
    /// only ever decrement stock once; every later attempt is rejected
    /// with `AlreadyUsed` and changes nothing.
    ///
    /// On success the session's scan memory is cleared, so a page reload
    /// does not re-submit the ticket.
    pub async fn redeem(&self, session: &mut Session, ticket_id: &str) -> ServiceResult<Redemption> {
        debug!(ticket_id = %ticket_id, "Processing scan");
        session.remember_scan(ticket_id);

        // An identifier that doesn't decode as "{tag}_{sequence}" can't
        // match any issued ticket; reject it without a storage round trip.
        if parse_ticket_id(ticket_id).is_err() {
            return Err(ServiceError::NotFound {
                entity: "Ticket".to_string(),
                id: ticket_id.to_string(),
            });
        }

        let outcome = self.db.tickets().redeem(ticket_id).await?;

        match outcome {
            RedeemOutcome::Redeemed(redemption) => {
                info!(
                    ticket_id = %redemption.ticket_id,
                    remaining = redemption.remaining_stock,
                    "Scan redeemed"
                );
                session.clear_scan();
                Ok(redemption)
            }
            RedeemOutcome::TicketNotFound => Err(ServiceError::NotFound {
                entity: "Ticket".to_string(),
                id: ticket_id.to_string(),
            }),
            RedeemOutcome::AlreadyUsed => Err(ServiceError::AlreadyUsed(ticket_id.to_string())),
            RedeemOutcome::ProductMissing => Err(ServiceError::NotFound {
                entity: "Product".to_string(),
                id: ticket_id.to_string(),
            }),
            RedeemOutcome::OutOfStock { product_name } => {
                Err(ServiceError::OutOfStock(product_name))
            }
        }
    }

    /// Redeems from a raw scanned payload (the URL read out of a QR code).
    ///
    /// Payloads that are not a URL carrying the expected query parameter
    /// are rejected as a ticket lookup failure; random QR codes in the
    /// camera's view must not produce surprising errors.
    pub async fn redeem_scan(
        &self,
        session: &mut Session,
        payload: &str,
    ) -> ServiceResult<Redemption> {
        let ticket_id = extract_ticket_id(payload).ok_or_else(|| ServiceError::NotFound {
            entity: "Ticket".to_string(),
            id: payload.to_string(),
        })?;

        self.redeem(session, &ticket_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceConfig;
    use crate::error::ErrorCode;
    use crate::issuer::TicketIssuer;
    use chrono::Utc;
    use labstock_core::Product;
    use labstock_db::DbConfig;
    use uuid::Uuid;

    async fn test_setup() -> (Database, TicketIssuer, RedemptionEngine) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let issuer = TicketIssuer::new(db.clone(), ServiceConfig::default());
        let engine = RedemptionEngine::new(db.clone());
        (db, issuer, engine)
    }

    async fn insert_product(db: &Database, tag: &str, stock: i64) -> Product {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4().to_string(),
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
    async fn test_redeem_clears_scan_memory_on_success() {
        let (db, issuer, engine) = test_setup().await;
        let product = insert_product(&db, "PIPETTE", 5).await;
        let issued = issuer.issue(&product.id).await.unwrap();

        let mut session = Session::new();
        let redemption = engine
            .redeem(&mut session, &issued.ticket.ticket_id)
            .await
            .unwrap();

        assert_eq!(redemption.remaining_stock, 4);
        assert!(session.last_scanned_ticket_id.is_none());
    }

    #[tokio::test]
    async fn test_failed_redeem_keeps_scan_memory() {
        let (_db, _issuer, engine) = test_setup().await;
        let mut session = Session::new();

        let err = engine.redeem(&mut session, "GHOST_1").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(session.last_scanned_ticket_id.as_deref(), Some("GHOST_1"));
    }

    #[tokio::test]
    async fn test_redeem_rejects_malformed_id() {
        let (_db, _issuer, engine) = test_setup().await;
        let mut session = Session::new();

        // No underscore, no sequence, zero sequence
        for bad in ["GLOVE", "GLOVE_", "GLOVE_0", "not a ticket"] {
            let err = engine.redeem(&mut session, bad).await.unwrap_err();
            assert_eq!(err.code(), ErrorCode::NotFound, "payload: {:?}", bad);
        }
    }

    #[tokio::test]
    async fn test_second_redeem_is_already_used() {
        let (db, issuer, engine) = test_setup().await;
        let product = insert_product(&db, "PIPETTE", 5).await;
        let issued = issuer.issue(&product.id).await.unwrap();

        let mut session = Session::new();
        engine
            .redeem(&mut session, &issued.ticket.ticket_id)
            .await
            .unwrap();

        let err = engine
            .redeem(&mut session, &issued.ticket.ticket_id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AlreadyUsed);

        // Stock decremented exactly once
        let product = db.products().get_by_id(&product.id).await.unwrap().unwrap();
        assert_eq!(product.current_stock, 4);
    }

    #[tokio::test]
    async fn test_out_of_stock_names_the_product() {
        let (db, issuer, engine) = test_setup().await;
        let product = insert_product(&db, "TUBE", 0).await;
        let issued = issuer.issue(&product.id).await.unwrap();

        let mut session = Session::new();
        let err = engine
            .redeem(&mut session, &issued.ticket.ticket_id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::OutOfStock);
        assert!(err.to_string().contains("TUBE (test)"));
    }

    #[tokio::test]
    async fn test_redeem_scan_from_url_payload() {
        let (db, issuer, engine) = test_setup().await;
        let product = insert_product(&db, "GLOVE", 3).await;
        let issued = issuer.issue(&product.id).await.unwrap();

        let mut session = Session::new();
        let redemption = engine.redeem_scan(&mut session, &issued.url).await.unwrap();
        assert_eq!(redemption.ticket_id, "GLOVE_1");
    }

    #[tokio::test]
    async fn test_redeem_scan_rejects_foreign_qr() {
        let (_db, _issuer, engine) = test_setup().await;
        let mut session = Session::new();

        let err = engine
            .redeem_scan(&mut session, "https://example.com/unrelated")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);

        let err = engine
            .redeem_scan(&mut session, "WIFI:S:lab;P:pass;;")
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
