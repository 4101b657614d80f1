//! # labstock-service: Application Layer for Labstock
//!
//! Orchestration for the consumable tracker: sessions, credential
//! verification, ticket issuance, and the scan redemption flow.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Labstock Layers                                  │
//! │                                                                         │
//! │  Presentation (pages, camera capture)          ← out of scope           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 labstock-service (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   Authenticator     TicketIssuer      RedemptionEngine          │   │
//! │  │   (auth.rs)         (issuer.rs)       (redemption.rs)           │   │
//! │  │        │                 │                  │                   │   │
//! │  │        └────────┬────────┴──────────┬───────┘                   │   │
//! │  │                 ▼                   ▼                           │   │
//! │  │          Session (session.rs)  ServiceConfig (config.rs)        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  labstock-db (repositories, transactions)                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  labstock-core (types, ticket codec, validation)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labstock_db::{Database, DbConfig};
//! use labstock_service::{
//!     Authenticator, RedemptionEngine, ServiceConfig, Session, TicketIssuer,
//! };
//!
//! let config = ServiceConfig::load();
//! let db = Database::new(DbConfig::new(&config.database_path)).await?;
//!
//! let auth = Authenticator::new(db.clone(), config.clone());
//! let issuer = TicketIssuer::new(db.clone(), config.clone());
//! let engine = RedemptionEngine::new(db.clone());
//!
//! let mut session = Session::new();
//! auth.login(&mut session, "alice", "password").await?;
//!
//! let issued = issuer.issue(&product_id).await?;
//! let redemption = engine.redeem_scan(&mut session, &issued.url).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod auth;
pub mod config;
pub mod error;
pub mod issuer;
pub mod redemption;
pub mod session;

// =============================================================================
// Re-exports
// =============================================================================

pub use auth::{hash_password, verify_password, Authenticator};
pub use config::ServiceConfig;
pub use error::{ErrorCode, ServiceError, ServiceResult};
pub use issuer::{IssuedTicket, TicketIssuer};
pub use redemption::RedemptionEngine;
pub use session::{new_session_state, Session, SessionState};
