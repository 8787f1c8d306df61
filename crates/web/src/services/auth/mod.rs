//! Authentication service.
//!
//! Username and password login for the admin area. Passwords are stored as
//! Argon2id PHC strings.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::db::AdminRepository;
use crate::models::AdminUser;

/// Minimum password length for newly set passwords.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Authentication service.
///
/// Handles admin login and account bootstrap.
pub struct AuthService<'a> {
    admins: &'a dyn AdminRepository,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(admins: &'a dyn AdminRepository) -> Self {
        Self { admins }
    }

    /// Login with username and password.
    ///
    /// The username match is exact. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong
    /// or either is empty.
    /// Returns `AuthError::Repository` if the admin store is unavailable.
    pub async fn login(&self, username: &str, password: &str) -> Result<AdminUser, AuthError> {
        if username.is_empty() || password.is_empty() {
            return Err(AuthError::InvalidCredentials);
        }

        let admin = self
            .admins
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &admin.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(admin)
    }

    /// Create the admin account if no account with that username exists.
    ///
    /// Returns `true` if the account was created, `false` if it already
    /// existed (its password is left untouched).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username is empty or longer
    /// than 80 characters.
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::Repository` if the admin store is unavailable.
    pub async fn seed_default_admin_if_absent(
        &self,
        username: &str,
        password: &str,
    ) -> Result<bool, AuthError> {
        validate_username(username)?;
        validate_password(password)?;
        let password_hash = hash_password(password)?;
        Ok(self.admins.insert_if_absent(username, &password_hash).await?)
    }

    /// Replace an existing admin's password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::Repository` if the admin does not exist or the store
    /// is unavailable.
    pub async fn set_password(&self, username: &str, password: &str) -> Result<(), AuthError> {
        validate_password(password)?;
        let password_hash = hash_password(password)?;
        self.admins
            .update_password_hash(username, &password_hash)
            .await?;
        Ok(())
    }
}

fn validate_username(username: &str) -> Result<(), AuthError> {
    if username.trim().is_empty() || username.chars().count() > 80 {
        return Err(AuthError::InvalidUsername(
            "must be between 1 and 80 characters".to_string(),
        ));
    }
    Ok(())
}

fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored hash.
///
/// A stored hash that does not parse never verifies.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        tracing::warn!("stored admin password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryAdminRepository;

    #[test]
    fn test_hash_then_verify() {
        let Ok(hash) = hash_password("admin123") else {
            panic!("hashing should succeed");
        };
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("admin123", &hash));
        assert!(!verify_password("admin124", &hash));
    }

    #[test]
    fn test_malformed_hash_never_verifies() {
        assert!(!verify_password("admin123", "admin123"));
        assert!(!verify_password("", ""));
    }

    #[tokio::test]
    async fn test_login_success_and_failures() {
        let repo = MemoryAdminRepository::new();
        let auth = AuthService::new(&repo);
        assert!(matches!(
            auth.seed_default_admin_if_absent("admin", "admin123").await,
            Ok(true)
        ));

        let admin = auth.login("admin", "admin123").await;
        assert!(matches!(admin, Ok(ref a) if a.username == "admin"));

        assert!(matches!(
            auth.login("admin", "wrong-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("ADMIN", "admin123").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("", "").await,
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_seed_does_not_overwrite_existing_password() {
        let repo = MemoryAdminRepository::new();
        let auth = AuthService::new(&repo);
        let _ = auth.seed_default_admin_if_absent("admin", "first-password").await;

        let created = auth
            .seed_default_admin_if_absent("admin", "second-password")
            .await;
        assert!(matches!(created, Ok(false)));
        assert!(auth.login("admin", "first-password").await.is_ok());
    }

    #[tokio::test]
    async fn test_short_password_is_rejected() {
        let repo = MemoryAdminRepository::new();
        let auth = AuthService::new(&repo);
        let result = auth.seed_default_admin_if_absent("admin", "short").await;
        assert!(matches!(result, Err(AuthError::WeakPassword(_))));
    }

    #[tokio::test]
    async fn test_bad_username_is_not_reported_as_weak_password() {
        let repo = MemoryAdminRepository::new();
        let auth = AuthService::new(&repo);

        let blank = auth.seed_default_admin_if_absent("   ", "long-enough-password").await;
        let long = auth
            .seed_default_admin_if_absent(&"a".repeat(81), "long-enough-password")
            .await;

        assert!(matches!(blank, Err(AuthError::InvalidUsername(_))));
        assert!(matches!(long, Err(AuthError::InvalidUsername(_))));
        assert!(matches!(repo.find_by_username("   ").await, Ok(None)));
    }

    #[tokio::test]
    async fn test_set_password_replaces_hash() {
        let repo = MemoryAdminRepository::new();
        let auth = AuthService::new(&repo);
        let _ = auth.seed_default_admin_if_absent("admin", "first-password").await;
        assert!(auth.set_password("admin", "second-password").await.is_ok());
        assert!(auth.login("admin", "second-password").await.is_ok());
        assert!(auth.login("admin", "first-password").await.is_err());
    }

    #[tokio::test]
    async fn test_unavailable_store_is_not_invalid_credentials() {
        let repo = MemoryAdminRepository::new();
        repo.set_failing(true);
        let auth = AuthService::new(&repo);
        let result = auth.login("admin", "admin123").await;
        assert!(matches!(result, Err(AuthError::Repository(_))));
    }
}
