//! # labstock-core: Pure Domain Logic for Labstock
//!
//! This crate is the **heart** of Labstock, a lab consumable tracker where
//! users scan a printed QR ticket to record usage of one unit of stock.
//! It contains the domain logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Labstock Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 labstock-service (Orchestration)                │   │
//! │  │    login ──► register ──► issue ticket ──► redeem scan          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ labstock-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  ticket   │  │ validation│                  │   │
//! │  │   │  Product  │  │ id codec  │  │   rules   │                  │   │
//! │  │   │  Ticket   │  │ QR payload│  │  checks   │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                   labstock-db (Storage Layer)                   │   │
//! │  │            SQLite queries, migrations, repositories             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Ticket, User, Redemption)
//! - [`ticket`] - Ticket identifier codec and QR payload encoding
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## The one state machine
//!
//! A ticket transitions `unused → used` exactly once, never reversed.
//! Redeeming a ticket decrements its product's stock by exactly 1, and
//! stock never goes negative. Everything else in the system is plumbing
//! around those two invariants.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ticket;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use labstock_core::Ticket` instead of
// `use labstock_core::types::Ticket`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Query parameter carrying the ticket identifier in a printed QR URL.
///
/// A printed ticket encodes `{base_url}?qrcode={ticket_id}`. The same
/// parameter name is used whether the identifier arrives from a live
/// camera scan or from a bookmarked page-load URL.
pub const TICKET_QUERY_PARAM: &str = "qrcode";

/// Maximum length of a product tag (the human-assigned short code).
pub const MAX_TAG_LEN: usize = 50;

/// Maximum length of a product or user display name.
pub const MAX_NAME_LEN: usize = 200;

/// Username length bounds (login identifier).
pub const MIN_USERNAME_LEN: usize = 3;
pub const MAX_USERNAME_LEN: usize = 32;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum length of the shared registration PIN.
pub const MAX_PIN_LEN: usize = 4;
