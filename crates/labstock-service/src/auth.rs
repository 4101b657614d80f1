//! # Credential Verifier
//!
//! Password hashing, login, registration, and the shared-password admin
//! unlock.
//!
//! ## Secrets policy
//! - Plaintext secrets are never logged and never embedded in errors.
//! - Stored hashes are argon2id PHC strings with a fresh random salt per
//!   hash, so two hashes of the same secret differ.
//! - Verification fails closed: an absent, empty, or unparseable stored
//!   hash rejects the attempt. It is never treated as "no password set".
//! - Every credential failure surfaces as the same generic
//!   [`ServiceError::AuthFailed`] message, whichever check tripped.

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use labstock_core::{validation, Role, User};
use labstock_db::Database;

use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::session::Session;

// =============================================================================
// Hashing Primitives
// =============================================================================

/// Hashes a secret into an argon2id PHC string.
///
/// A fresh salt is generated per call, so hashing the same secret twice
/// produces two different strings that both verify.
pub fn hash_password(secret: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|_| ServiceError::Validation("Failed to hash secret".to_string()))?;

    Ok(hash.to_string())
}

/// Verifies a secret against a stored PHC hash.
///
/// ## Returns
/// `true` only when the hash parses and the secret matches. An empty or
/// malformed hash returns `false`.
pub fn verify_password(secret: &str, stored_hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(stored_hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Verifies a secret against an optional configured hash.
///
/// `None` fails closed: the unlock stays rejected until an operator
/// configures the hash.
fn verify_configured(secret: &str, configured_hash: Option<&str>) -> bool {
    match configured_hash {
        Some(hash) => verify_password(secret, hash),
        None => false,
    }
}

// =============================================================================
// Authenticator
// =============================================================================

/// Credential verifier bound to the account store and the configured
/// shared secrets.
#[derive(Debug, Clone)]
pub struct Authenticator {
    db: Database,
    config: ServiceConfig,
}

impl Authenticator {
    /// Creates a new Authenticator.
    pub fn new(db: Database, config: ServiceConfig) -> Self {
        Authenticator { db, config }
    }

    /// Attempts a login and records the user on the session.
    ///
    /// ## Errors
    /// * `ServiceError::AuthFailed` - Unknown username or wrong password;
    ///   the message never says which.
    pub async fn login(
        &self,
        session: &mut Session,
        username: &str,
        password: &str,
    ) -> ServiceResult<()> {
        debug!(username = %username, "Login attempt");

        let user = self
            .db
            .users()
            .get_by_username(username)
            .await?
            .ok_or(ServiceError::AuthFailed)?;

        if !verify_password(password, &user.password_hash) {
            warn!(username = %username, "Login rejected");
            return Err(ServiceError::AuthFailed);
        }

        info!(username = %username, "Login succeeded");
        session.set_user(user);
        Ok(())
    }

    /// Registers a new account and logs it in.
    ///
    /// ## Rules
    /// 1. All fields pass validation (see `labstock_core::validation`)
    /// 2. `password` and `password_confirmation` match
    /// 3. `pin` verifies against the configured registration PIN hash
    /// 4. `username` is not already taken
    ///
    /// Validation failures are specific; the PIN failure is generic.
    pub async fn register(
        &self,
        session: &mut Session,
        display_name: &str,
        username: &str,
        password: &str,
        password_confirmation: &str,
        pin: &str,
    ) -> ServiceResult<()> {
        validation::validate_registration(
            display_name,
            username,
            password,
            password_confirmation,
            pin,
        )
        .map_err(|e| ServiceError::Validation(e.to_string()))?;

        if !verify_configured(pin, self.config.master_pin_hash.as_deref()) {
            warn!(username = %username, "Registration PIN rejected");
            return Err(ServiceError::PinRejected);
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            password_hash: hash_password(password)?,
            role: Role::User,
            created_at: Utc::now(),
        };

        self.db.users().insert(&user).await?;

        info!(username = %username, "Account registered");
        session.set_user(user);
        Ok(())
    }

    /// Unlocks the admin surface for this session.
    ///
    /// Checks the shared admin password against the configured hash. The
    /// stored per-user `role` field plays no part.
    pub fn unlock_admin(&self, session: &mut Session, password: &str) -> ServiceResult<()> {
        if !verify_configured(password, self.config.admin_password_hash.as_deref()) {
            warn!("Admin unlock rejected");
            return Err(ServiceError::PinRejected);
        }

        info!("Admin surface unlocked");
        session.admin_unlocked = true;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use labstock_db::DbConfig;

    async fn test_authenticator(config: ServiceConfig) -> Authenticator {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Authenticator::new(db, config)
    }

    fn config_with_pin(pin: &str) -> ServiceConfig {
        ServiceConfig {
            master_pin_hash: Some(hash_password(pin).unwrap()),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let hash = hash_password("hunter2-hunter2").unwrap();
        assert!(verify_password("hunter2-hunter2", &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn test_same_secret_different_hashes() {
        let a = hash_password("same-secret-123").unwrap();
        let b = hash_password("same-secret-123").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("same-secret-123", &a));
        assert!(verify_password("same-secret-123", &b));
    }

    #[test]
    fn test_verify_fails_closed_on_bad_hash() {
        assert!(!verify_password("anything", ""));
        assert!(!verify_password("anything", "not-a-phc-string"));
        assert!(!verify_configured("anything", None));
    }

    #[tokio::test]
    async fn test_register_then_login() {
        let auth = test_authenticator(config_with_pin("1234")).await;
        let mut session = Session::new();

        auth.register(
            &mut session,
            "Alice",
            "alice",
            "correct-horse-battery",
            "correct-horse-battery",
            "1234",
        )
        .await
        .unwrap();
        assert!(session.is_authenticated());

        // Fresh session, same credentials
        let mut session = Session::new();
        auth.login(&mut session, "alice", "correct-horse-battery")
            .await
            .unwrap();
        assert_eq!(session.user.as_ref().unwrap().display_name, "Alice");
    }

    #[tokio::test]
    async fn test_login_failures_are_generic() {
        let auth = test_authenticator(config_with_pin("1234")).await;
        let mut session = Session::new();

        auth.register(
            &mut session,
            "Alice",
            "alice",
            "correct-horse-battery",
            "correct-horse-battery",
            "1234",
        )
        .await
        .unwrap();

        let mut session = Session::new();

        // Unknown user and wrong password produce the same message
        let unknown = auth
            .login(&mut session, "bob", "whatever-pass")
            .await
            .unwrap_err();
        let wrong = auth
            .login(&mut session, "alice", "wrong-password")
            .await
            .unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_wrong_pin() {
        let auth = test_authenticator(config_with_pin("1234")).await;
        let mut session = Session::new();

        let err = auth
            .register(
                &mut session,
                "Alice",
                "alice",
                "correct-horse-battery",
                "correct-horse-battery",
                "9999",
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::AuthFailed);

        // No account was created
        let db_err = auth
            .login(&mut session, "alice", "correct-horse-battery")
            .await
            .unwrap_err();
        assert_eq!(db_err.code(), ErrorCode::AuthFailed);
    }

    #[tokio::test]
    async fn test_register_password_mismatch_is_specific() {
        let auth = test_authenticator(config_with_pin("1234")).await;
        let mut session = Session::new();

        let err = auth
            .register(
                &mut session,
                "Alice",
                "alice",
                "correct-horse-battery",
                "different-password",
                "1234",
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_register_duplicate_username() {
        let auth = test_authenticator(config_with_pin("1234")).await;
        let mut session = Session::new();

        auth.register(
            &mut session,
            "Alice",
            "alice",
            "correct-horse-battery",
            "correct-horse-battery",
            "1234",
        )
        .await
        .unwrap();

        let err = auth
            .register(
                &mut session,
                "Other Alice",
                "alice",
                "another-password-1",
                "another-password-1",
                "1234",
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_admin_unlock() {
        let config = ServiceConfig {
            admin_password_hash: Some(hash_password("admin-secret").unwrap()),
            ..ServiceConfig::default()
        };
        let auth = test_authenticator(config).await;
        let mut session = Session::new();

        assert!(auth.unlock_admin(&mut session, "wrong").is_err());
        assert!(!session.admin_unlocked);

        auth.unlock_admin(&mut session, "admin-secret").unwrap();
        assert!(session.admin_unlocked);
    }

    #[tokio::test]
    async fn test_admin_unlock_fails_closed_when_unconfigured() {
        let auth = test_authenticator(ServiceConfig::default()).await;
        let mut session = Session::new();

        assert!(auth.unlock_admin(&mut session, "anything").is_err());
        assert!(!session.admin_unlocked);
    }
}
