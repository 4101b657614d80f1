//! Service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. The two secret hashes have no fallback: when unset, the
//! actions that check them (registration, admin unlock) fail closed.

use serde::{Deserialize, Serialize};
use std::env;

/// Labstock service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL encoded into printed QR codes. Scans resolve the
    /// `qrcode` query parameter against this prefix.
    pub base_url: String,

    /// PHC hash of the admin unlock password. `None` disables the unlock.
    pub admin_password_hash: Option<String>,

    /// PHC hash of the shared registration PIN. `None` disables
    /// self-registration.
    pub master_pin_hash: Option<String>,

    /// Path to the SQLite database file.
    pub database_path: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Self {
        ServiceConfig {
            base_url: env::var("LABSTOCK_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080/scan".to_string()),

            admin_password_hash: env::var("LABSTOCK_ADMIN_PASSWORD_HASH").ok(),

            master_pin_hash: env::var("LABSTOCK_MASTER_PIN_HASH").ok(),

            database_path: env::var("LABSTOCK_DATABASE_PATH")
                .unwrap_or_else(|_| "./labstock.db".to_string()),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            base_url: "http://localhost:8080/scan".to_string(),
            admin_password_hash: None,
            master_pin_hash: None,
            database_path: "./labstock.db".to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
