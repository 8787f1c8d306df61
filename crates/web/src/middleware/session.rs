//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions with signed
//! cookies and a 24 hour inactivity expiry.

use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha512};
use sqlx::PgPool;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::DepositConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "deposito_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store and signed cookies.
///
/// The session table lives in the store's default `tower_sessions` schema and
/// is created by `deposit-cli migrate`.
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &DepositConfig,
) -> SessionManagerLayer<PostgresStore, SignedCookie> {
    let store = PostgresStore::new(pool.clone());

    configure(SessionManagerLayer::new(store), config.is_secure())
        .with_signed(signing_key(&config.session_secret))
}

/// Apply the cookie attributes shared by every session layer.
#[must_use]
pub fn configure<S: SessionStore + Clone>(
    layer: SessionManagerLayer<S>,
    secure: bool,
) -> SessionManagerLayer<S> {
    layer
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// Derive the 64-byte cookie signing key from the configured secret.
#[must_use]
pub fn signing_key(secret: &SecretString) -> Key {
    let digest = Sha512::digest(secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signing_key_is_deterministic() {
        let secret = SecretString::from("k9$Qz!2mW#4vB7&pL0^xR8*tN3@cF6%h");
        let a = signing_key(&secret);
        let b = signing_key(&secret);
        assert_eq!(a.master(), b.master());
        assert_eq!(a.master().len(), 64);
    }

    #[test]
    fn test_different_secrets_give_different_keys() {
        let a = signing_key(&SecretString::from("first-secret-value-0123456789abcdef"));
        let b = signing_key(&SecretString::from("second-secret-value-0123456789abcde"));
        assert_ne!(a.master(), b.master());
    }
}
