//! # Service Error Types
//!
//! The user-facing error taxonomy. Every fallible operation in this crate
//! returns a [`ServiceError`]; the presentation layer only needs the
//! [`ErrorCode`] and the display message.
//!
//! ## Two rules shape this module
//! - Authentication failures are deliberately vague: "invalid username or
//!   password", never which half was wrong.
//! - Storage failures keep their detail in the log. The user sees a generic
//!   storage message; `tracing` gets the full [`DbError`].

use thiserror::Error;
use tracing::error;

use labstock_core::CoreError;
use labstock_db::DbError;

/// Stable machine-readable category for a [`ServiceError`].
///
/// Presentation layers switch on this rather than matching display strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Login, registration, or admin unlock was rejected.
    AuthFailed,
    /// Input failed a validation rule.
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// The ticket was already redeemed.
    AlreadyUsed,
    /// The product has no stock left.
    OutOfStock,
    /// The storage layer failed.
    Store,
}

/// Application-level errors surfaced to the presentation layer.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Credential check failed. Always the same message regardless of
    /// whether the username or the password was wrong.
    #[error("Invalid username or password")]
    AuthFailed,

    /// The admin PIN was wrong or the unlock secret is not configured.
    #[error("Incorrect PIN")]
    PinRejected,

    /// Input rejected before it reached storage.
    #[error("{0}")]
    Validation(String),

    /// An entity lookup came up empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The scanned ticket was already redeemed.
    #[error("Ticket '{0}' has already been used")]
    AlreadyUsed(String),

    /// The product behind the ticket has no stock left.
    #[error("'{0}' is out of stock")]
    OutOfStock(String),

    /// Storage failure. The wrapped detail is logged, not displayed.
    #[error("A storage error occurred; please try again")]
    Store(#[source] DbError),
}

impl ServiceError {
    /// Returns the stable category for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ServiceError::AuthFailed | ServiceError::PinRejected => ErrorCode::AuthFailed,
            ServiceError::Validation(_) => ErrorCode::Validation,
            ServiceError::NotFound { .. } => ErrorCode::NotFound,
            ServiceError::AlreadyUsed(_) => ErrorCode::AlreadyUsed,
            ServiceError::OutOfStock(_) => ErrorCode::OutOfStock,
            ServiceError::Store(_) => ErrorCode::Store,
        }
    }
}

/// Convert storage errors to service errors.
///
/// Rule-shaped storage errors (not-found, duplicates) keep their meaning;
/// everything else is logged and collapsed into the generic storage message.
impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ServiceError::NotFound { entity, id },
            DbError::UniqueViolation { field, value } => {
                ServiceError::Validation(format!("Duplicate {}: '{}' already exists", field, value))
            }
            other => {
                error!(error = %other, "Storage operation failed");
                ServiceError::Store(other)
            }
        }
    }
}

impl From<CoreError> for ServiceError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::TicketNotFound(id) => ServiceError::NotFound {
                entity: "Ticket".to_string(),
                id,
            },
            CoreError::TicketAlreadyUsed(id) => ServiceError::AlreadyUsed(id),
            CoreError::ProductNotFound(id) => ServiceError::NotFound {
                entity: "Product".to_string(),
                id,
            },
            CoreError::OutOfStock { name } => ServiceError::OutOfStock(name),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

// =============================================================================
// Unit Tests
// =============================================================================
