//! # Session State
//!
//! Per-connection ephemeral state. One [`Session`] exists per interactive
//! connection; nothing in it is persisted.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Session Lifecycle                                 │
//! │                                                                         │
//! │  connect ──► Session::new()          (anonymous, locked)                │
//! │                   │                                                     │
//! │        login ─────┤ user = Some(..)                                     │
//! │        unlock ────┤ admin_unlocked = true                               │
//! │        scan ──────┤ last_scanned_ticket_id = Some(..)                   │
//! │                   │                                                     │
//! │        logout ────► back to the anonymous, locked state                 │
//! │                                                                         │
//! │  Explicit object passed into handlers. No globals: two concurrent       │
//! │  connections can never observe each other's login or unlock state.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use labstock_core::User;

/// Ephemeral per-connection state.
#[derive(Debug, Clone, Default)]
pub struct Session {
    /// The authenticated account, if any.
    pub user: Option<User>,

    /// Whether the admin surface has been unlocked with the shared
    /// password. Independent of the stored `role` field, which nothing
    /// gates on.
    pub admin_unlocked: bool,

    /// The most recently scanned ticket identifier, kept so a page reload
    /// does not re-submit the same scan. Cleared after a successful
    /// redemption.
    pub last_scanned_ticket_id: Option<String>,
}

impl Session {
    /// Creates a fresh anonymous session.
    pub fn new() -> Self {
        Session::default()
    }

    /// Returns true if a user is logged in.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Records a successful login.
    pub fn set_user(&mut self, user: User) {
        self.user = Some(user);
    }

    /// Clears everything: user, admin unlock, scan state.
    pub fn logout(&mut self) {
        *self = Session::default();
    }

    /// Remembers the ticket identifier of the current scan.
    pub fn remember_scan(&mut self, ticket_id: impl Into<String>) {
        self.last_scanned_ticket_id = Some(ticket_id.into());
    }

    /// Forgets the current scan (after a successful redemption).
    pub fn clear_scan(&mut self) {
        self.last_scanned_ticket_id = None;
    }
}

/// Shared handle to a session, for handlers running on different tasks of
/// the same connection.
pub type SessionState = Arc<Mutex<Session>>;

/// Creates a new shared session handle.
pub fn new_session_state() -> SessionState {
    Arc::new(Mutex::new(Session::new()))
}

// =============================================================================
// Unit Tests
// =============================================================================
