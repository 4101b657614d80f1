//! # Error Types
//!
//! Domain-specific error types for labstock-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  labstock-core errors (this file)                                       │
//! │  ├── CoreError        - Domain rule violations                          │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  labstock-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  labstock-service errors (separate crate)                               │
//! │  └── ServiceError     - What the user sees (code + message)             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ServiceError → User      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ticket id, tag, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Domain rule violations.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No ticket with this identifier was ever issued.
    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    /// The ticket was already redeemed.
    ///
    /// ## When This Occurs
    /// - A printed QR code is scanned a second time
    /// - A bookmarked ticket URL is revisited after redemption
    ///
    /// Re-scanning never decrements stock twice; this rejection is the
    /// idempotent path.
    #[error("Ticket already used: {0}")]
    TicketAlreadyUsed(String),

    /// Product cannot be found (broken ticket reference or unknown tag).
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The product has no stock left to redeem against.
    ///
    /// The ticket is left unused, but stays unusable going forward even if
    /// the product is restocked (one-shot-or-nothing policy, not a retry
    /// queue).
    #[error("No stock left for {name}")]
    OutOfStock { name: String },

    /// A ticket identifier did not match the `"{tag}_{sequence}"` format.
    #[error("Invalid ticket identifier: {0}")]
    InvalidTicketId(String),

    /// The configured application base URL could not be parsed.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The QR encoder rejected the payload (too long for any version).
    #[error("QR encoding failed: {0}")]
    QrEncoding(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before domain logic runs. Unlike auth
/// failures, validation messages are specific about what was wrong.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. disallowed characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate username).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Password and confirmation differ at registration.
    #[error("passwords do not match")]
    PasswordMismatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::TicketAlreadyUsed("GLOVE_3".to_string());
        assert_eq!(err.to_string(), "Ticket already used: GLOVE_3");

        let err = CoreError::OutOfStock {
            name: "Nitrile gloves".to_string(),
        };
        assert_eq!(err.to_string(), "No stock left for Nitrile gloves");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "username".to_string(),
        };
        assert_eq!(err.to_string(), "username is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 8,
        };
        assert_eq!(err.to_string(), "password must be at least 8 characters");

        assert_eq!(
            ValidationError::PasswordMismatch.to_string(),
            "passwords do not match"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::PasswordMismatch;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
