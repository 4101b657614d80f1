//! # Validation Module
//!
//! Input validation rules for Labstock forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Service handler (login / register forms)                      │
//! │  └── THIS MODULE: field rules, password confirmation                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Database (SQLite)                                             │
//! │  ├── NOT NULL constraints                                               │
//! │  ├── UNIQUE constraints (username, tag, ticket_id)                      │
//! │  └── CHECK constraints (current_stock >= 0)                             │
//! │                                                                         │
//! │  Defense in depth: both layers catch different errors                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation messages are deliberately specific (which field, what rule),
//! unlike authentication failures which stay generic.

use crate::error::ValidationError;
use crate::{
    MAX_NAME_LEN, MAX_PIN_LEN, MAX_TAG_LEN, MAX_USERNAME_LEN, MIN_PASSWORD_LEN, MIN_USERNAME_LEN,
};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Product Fields
// =============================================================================

/// Validates a product tag (the human-assigned short code).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use labstock_core::validation::validate_tag;
///
/// assert!(validate_tag("GLOVE").is_ok());
/// assert!(validate_tag("PIPETTE_TIP").is_ok());
/// assert!(validate_tag("").is_err());
/// assert!(validate_tag("has space").is_err());
/// ```
pub fn validate_tag(tag: &str) -> ValidationResult<()> {
    let tag = tag.trim();

    if tag.is_empty() {
        return Err(ValidationError::Required {
            field: "tag".to_string(),
        });
    }

    if tag.len() > MAX_TAG_LEN {
        return Err(ValidationError::TooLong {
            field: "tag".to_string(),
            max: MAX_TAG_LEN,
        });
    }

    if !tag
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "tag".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Account Fields
// =============================================================================

/// Validates a login username.
///
/// ## Rules
/// - 3 to 32 characters
/// - ASCII letters, digits, underscores only (typed on shared lab machines)
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() < MIN_USERNAME_LEN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: MIN_USERNAME_LEN,
        });
    }

    if username.len() > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only ASCII letters, numbers, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name.
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "display name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "display name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a new password at registration.
///
/// ## Rules
/// - At least 8 characters
///
/// No character-class requirements; length is the rule that matters.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

/// Validates the shared registration PIN field (the typed value only;
/// correctness is a hash check in the service).
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.is_empty() {
        return Err(ValidationError::Required {
            field: "PIN".to_string(),
        });
    }

    if pin.len() > MAX_PIN_LEN {
        return Err(ValidationError::TooLong {
            field: "PIN".to_string(),
            max: MAX_PIN_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Registration Form
// =============================================================================

/// Validates the whole registration form in one pass.
///
/// ## Checks, in order
/// 1. Display name present
/// 2. Username present and well-formed
/// 3. Password present and long enough
/// 4. Password confirmation matches
/// 5. PIN field present
///
/// Uniqueness of the username and correctness of the PIN are checked by the
/// service layer, which has the database and the configured hash.
pub fn validate_registration(
    display_name: &str,
    username: &str,
    password: &str,
    password_confirmation: &str,
    pin: &str,
) -> ValidationResult<()> {
    validate_display_name(display_name)?;
    validate_username(username)?;
    validate_password(password)?;

    if password != password_confirmation {
        return Err(ValidationError::PasswordMismatch);
    }

    validate_pin(pin)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
