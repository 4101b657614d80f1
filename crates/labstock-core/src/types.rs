//! # Domain Types
//!
//! Core domain types used throughout Labstock.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Ticket      │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  tag (business) │   │  ticket_id      │   │  username       │       │
//! │  │  current_stock  │   │  product_id(FK) │   │  password_hash  │       │
//! │  │  latest_seq     │   │  status         │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  TicketStatus   │   │  RedeemOutcome  │                             │
//! │  │  ─────────────  │   │  ─────────────  │                             │
//! │  │  Unused         │   │  Redeemed(..)   │                             │
//! │  │  Used           │   │  AlreadyUsed    │                             │
//! │  └─────────────────┘   │  OutOfStock ... │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every persisted entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business ID: (tag, ticket_id, username) - human-readable, printed/typed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// A consumable tracked by stock count.
///
/// Created by an admin through the store's editing surface; mutated only by
/// the redemption engine (stock decrement) and the ticket issuer (sequence
/// bump); never deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-assigned short code, unique across products (e.g. "GLOVE").
    pub tag: String,

    /// Display name shown when a ticket is scanned.
    pub name: String,

    /// Current stock level. Invariant: never negative.
    pub current_stock: i64,

    /// Display unit for the stock count (e.g. "box", "pcs").
    pub unit: String,

    /// Per-product monotonic counter used to build ticket identifiers.
    /// Starts at 0 and only ever increases.
    pub latest_ticket_seq: i64,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks whether a redemption can currently decrement this product.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.current_stock > 0
    }
}

// =============================================================================
// Ticket Status
// =============================================================================

/// The lifecycle state of a ticket.
///
/// The only legal transition is `Unused → Used`, exactly once, never
/// reversed. A ticket whose product ran out of stock stays `Unused` but is
/// practically dead (one-shot-or-nothing policy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Printed but not yet redeemed.
    Unused,
    /// Redeemed; terminal.
    Used,
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Unused
    }
}

// =============================================================================
// Ticket
// =============================================================================

/// A single-use credential bound to one product.
///
/// Redeemed to decrement its product's stock exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Ticket {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Business key encoded into the printed QR code.
    /// Format: `"{tag}_{sequence}"`, globally unique by construction.
    pub ticket_id: String,

    /// The one product this ticket is bound to.
    pub product_id: String,

    /// Lifecycle state. See [`TicketStatus`].
    pub status: TicketStatus,

    /// When the ticket was issued.
    pub created_at: DateTime<Utc>,

    /// When the ticket was redeemed. Set exactly when `status` flips.
    pub used_at: Option<DateTime<Utc>>,
}

impl Ticket {
    /// Returns true once the ticket has been redeemed.
    #[inline]
    pub fn is_used(&self) -> bool {
        self.status == TicketStatus::Used
    }
}

// =============================================================================
// User & Role
// =============================================================================

/// Account role stored for each user.
///
/// Vestigial in practice: every registered account is `User`, and admin
/// access is granted by a separate shared-PIN unlock rather than this
/// field. Stored anyway to keep the persisted shape complete; nothing
/// gates on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Login identifier, unique across users.
    pub username: String,

    /// Name shown in greetings.
    pub display_name: String,

    /// Argon2 PHC hash of the password. Never the plaintext.
    pub password_hash: String,

    /// Stored role. See [`Role`] for why this is not enforced.
    pub role: Role,

    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Redemption
// =============================================================================

/// The successful result of redeeming a ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Redemption {
    /// The ticket that was consumed.
    pub ticket_id: String,

    /// Display name of the product whose stock was decremented.
    pub product_name: String,

    /// Display unit for the stock count.
    pub unit: String,

    /// Stock level after the decrement.
    pub remaining_stock: i64,
}

/// Outcome of the one-transaction redemption sequence.
///
/// The storage layer reports exactly which check failed; the service layer
/// maps each variant to the user-facing error taxonomy. Every non-`Redeemed`
/// variant leaves the database untouched.
#[derive(Debug, Clone)]
pub enum RedeemOutcome {
    /// Stock decremented and ticket marked used, atomically.
    Redeemed(Redemption),

    /// No ticket with that identifier was ever issued.
    TicketNotFound,

    /// The ticket was already redeemed; stock is unchanged.
    AlreadyUsed,

    /// The ticket's product reference is broken.
    ProductMissing,

    /// The product has no stock left. The ticket stays unused.
    OutOfStock {
        /// Display name, for the user-facing message.
        product_name: String,
    },
}

// =============================================================================
// Unit Tests
// =============================================================================
