//! # Ticket Issuer
//!
//! Mints printable tickets: a fresh identifier, the scan URL, and an SVG
//! QR image.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Issuance Flow                                    │
//! │                                                                         │
//! │  issue(product_id)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  storage: bump sequence + insert ticket   (one transaction)             │
//! │       │          → ticket_id = "{tag}_{seq}"                            │
//! │       ▼                                                                 │
//! │  "{base_url}?qrcode={ticket_id}"          (pure, labstock-core)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SVG QR image of that URL                 (pure, labstock-core)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::info;

use labstock_core::ticket::{render_qr_svg, ticket_url};
use labstock_core::Ticket;
use labstock_db::Database;

use crate::config::ServiceConfig;
use crate::error::ServiceResult;

/// A freshly minted ticket, ready to print.
#[derive(Debug, Clone, Serialize)]
pub struct IssuedTicket {
    /// The stored ticket record.
    pub ticket: Ticket,

    /// The URL encoded into the QR code.
    pub url: String,

    /// SVG markup of the QR code.
    pub qr_svg: String,
}

/// Service for issuing printable tickets.
#[derive(Debug, Clone)]
pub struct TicketIssuer {
    db: Database,
    config: ServiceConfig,
}

impl TicketIssuer {
    /// Creates a new TicketIssuer.
    pub fn new(db: Database, config: ServiceConfig) -> Self {
        TicketIssuer { db, config }
    }

    /// Issues one ticket for a product.
    ///
    /// ## Errors
    /// * `ServiceError::NotFound` - Product does not exist
    /// * `ServiceError::Validation` - The configured base URL is malformed
    /// * `ServiceError::Store` - Storage failed; no sequence number was burned
    pub async fn issue(&self, product_id: &str) -> ServiceResult<IssuedTicket> {
        let ticket = self.db.tickets().issue(product_id).await?;

        let url = ticket_url(&self.config.base_url, &ticket.ticket_id)?;
        let qr_svg = render_qr_svg(&url)?;

        info!(ticket_id = %ticket.ticket_id, "Issued printable ticket");

        Ok(IssuedTicket {
            ticket,
            url,
            qr_svg,
        })
    }

    /// Issues a batch of tickets for a product, in order.
    ///
    /// Each ticket is its own transaction; a failure partway returns the
    /// error and keeps the tickets already issued.
    pub async fn issue_batch(&self, product_id: &str, count: u32) -> ServiceResult<Vec<IssuedTicket>> {
        let mut issued = Vec::with_capacity(count as usize);
        for _ in 0..count {
            issued.push(self.issue(product_id).await?);
        }
        Ok(issued)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use chrono::Utc;
    use labstock_core::Product;
    use labstock_db::DbConfig;
    use uuid::Uuid;

    async fn test_setup() -> (Database, TicketIssuer) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let issuer = TicketIssuer::new(db.clone(), ServiceConfig::default());
        (db, issuer)
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
    async fn test_issue_produces_url_and_svg() {
        let (db, issuer) = test_setup().await;
        let product = insert_product(&db, "GLOVE", 5).await;

        let issued = issuer.issue(&product.id).await.unwrap();

        assert_eq!(issued.ticket.ticket_id, "GLOVE_1");
        assert!(issued.url.contains("qrcode=GLOVE_1"));
        assert!(issued.qr_svg.contains("<svg"));
    }

    #[tokio::test]
    async fn test_issue_missing_product() {
        let (_db, issuer) = test_setup().await;
        let err = issuer.issue("no-such-id").await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_issue_batch_is_sequential() {
        let (db, issuer) = test_setup().await;
        let product = insert_product(&db, "TIP", 5).await;

        let issued = issuer.issue_batch(&product.id, 3).await.unwrap();
        let ids: Vec<&str> = issued.iter().map(|i| i.ticket.ticket_id.as_str()).collect();
        assert_eq!(ids, vec!["TIP_1", "TIP_2", "TIP_3"]);
    }
}
