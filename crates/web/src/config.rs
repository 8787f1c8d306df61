//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DEPOSIT_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)
//! - `DEPOSIT_SESSION_SECRET` - Session cookie signing secret (min 32 chars, high entropy)
//! - `ADMIN_PASSWORD` - Password of the default admin account (min 8 chars), seeded at startup if absent
//!
//! ## Optional
//! - `DEPOSIT_HOST` - Bind address (default: 0.0.0.0)
//! - `DEPOSIT_PORT` - Listen port (default: 5000)
//! - `DEPOSIT_BASE_URL` - Public URL, `https://` enables secure cookies (default: <http://localhost:5000>)
//! - `DEPOSIT_LOG_JSON` - Emit JSON logs when set
//! - `PRICING_BASE_PRICE` - Flat fee per deposit (default: 5000)
//! - `PRICING_UNIT_RATE` - Price per cubic meter (default: 6000)
//! - `PRICING_CURRENCY` - ISO currency code (default: ARS)
//! - `ADMIN_USERNAME` - Bootstrap admin username (default: admin)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//!
//! ## Optional (Telegram - enables new intake notifications)
//! - `TELEGRAM_BOT_TOKEN` - Bot API token
//! - `TELEGRAM_CHAT_ID` - Target chat or channel ID
//! - `TELEGRAM_API_BASE` - Bot API base URL (default: <https://api.telegram.org>)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use deposit_core::{CurrencyCode, PricingEngine};
use deposit_core::pricing::{DEFAULT_BASE_PRICE, DEFAULT_UNIT_RATE};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_ADMIN_USERNAME: &str = "admin";
const MIN_ADMIN_PASSWORD_LENGTH: usize = 8;
const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct DepositConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL
    pub base_url: String,
    /// Session cookie signing secret
    pub session_secret: SecretString,
    /// Emit JSON formatted logs
    pub log_json: bool,
    /// Quote parameters
    pub pricing: PricingConfig,
    /// Default admin account created at startup (optional)
    pub bootstrap_admin: BootstrapAdmin,
    /// Telegram notifications for new intakes (optional)
    pub telegram: Option<TelegramConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Quote parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingConfig {
    pub base_price: i64,
    pub unit_rate: i64,
    pub currency: CurrencyCode,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_price: DEFAULT_BASE_PRICE,
            unit_rate: DEFAULT_UNIT_RATE,
            currency: CurrencyCode::default(),
        }
    }
}

impl PricingConfig {
    /// Build the pricing engine for these parameters.
    #[must_use]
    pub fn engine(&self) -> PricingEngine {
        PricingEngine::new(self.base_price, self.unit_rate, self.currency)
    }

    fn from_env() -> Result<Self, ConfigError> {
        let base_price = parse_env_or("PRICING_BASE_PRICE", DEFAULT_BASE_PRICE)?;
        let unit_rate = parse_env_or("PRICING_UNIT_RATE", DEFAULT_UNIT_RATE)?;
        let currency = get_env_or_default("PRICING_CURRENCY", "ARS")
            .parse::<CurrencyCode>()
            .map_err(|e| ConfigError::InvalidEnvVar("PRICING_CURRENCY".to_string(), e.to_string()))?;

        if base_price < 0 || unit_rate < 0 {
            return Err(ConfigError::InvalidEnvVar(
                "PRICING_*".to_string(),
                "prices must not be negative".to_string(),
            ));
        }

        Ok(Self {
            base_price,
            unit_rate,
            currency,
        })
    }
}

/// Credentials for the default admin account.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub password: SecretString,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl BootstrapAdmin {
    fn from_env() -> Result<Self, ConfigError> {
        let password = get_optional_env("ADMIN_PASSWORD")
            .ok_or_else(|| ConfigError::MissingEnvVar("ADMIN_PASSWORD".to_string()))?;
        if password.chars().count() < MIN_ADMIN_PASSWORD_LENGTH {
            return Err(ConfigError::InsecureSecret(
                "ADMIN_PASSWORD".to_string(),
                format!("must be at least {MIN_ADMIN_PASSWORD_LENGTH} characters"),
            ));
        }

        Ok(Self {
            username: get_env_or_default("ADMIN_USERNAME", DEFAULT_ADMIN_USERNAME),
            password: SecretString::from(password),
        })
    }
}

/// Telegram Bot API configuration.
///
/// Implements `Debug` manually to redact the bot token.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot token issued by `@BotFather`.
    pub bot_token: SecretString,
    /// Chat, group or channel receiving notifications.
    pub chat_id: String,
    /// Bot API base URL (overridable for tests and self-hosted Bot API servers).
    pub api_base: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"[REDACTED]")
            .field("chat_id", &self.chat_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl TelegramConfig {
    /// Load Telegram configuration from environment.
    ///
    /// Returns `None` unless both the token and the chat ID are set.
    fn from_env() -> Option<Self> {
        let bot_token = get_optional_env("TELEGRAM_BOT_TOKEN");
        let chat_id = get_optional_env("TELEGRAM_CHAT_ID");

        match (bot_token, chat_id) {
            (Some(token), Some(chat_id)) => Some(Self {
                bot_token: SecretString::from(token),
                chat_id,
                api_base: get_env_or_default("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
            }),
            (None, None) => None,
            _ => {
                tracing::warn!(
                    "TELEGRAM_BOT_TOKEN and TELEGRAM_CHAT_ID must be set together; notifications disabled"
                );
                None
            }
        }
    }
}

impl DepositConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if secrets fail validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("DEPOSIT_DATABASE_URL")?;
        let host = get_env_or_default("DEPOSIT_HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("DEPOSIT_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or("DEPOSIT_PORT", 5000_u16)?;
        let base_url = get_env_or_default("DEPOSIT_BASE_URL", "http://localhost:5000");
        let session_secret = get_validated_secret("DEPOSIT_SESSION_SECRET")?;
        validate_session_secret(&session_secret, "DEPOSIT_SESSION_SECRET")?;

        let log_json = get_optional_env("DEPOSIT_LOG_JSON").is_some();
        let pricing = PricingConfig::from_env()?;
        let bootstrap_admin = BootstrapAdmin::from_env()?;
        let telegram = TelegramConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            session_secret,
            log_json,
            pricing,
            bootstrap_admin,
            telegram,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }

    /// Returns a reference to the Telegram configuration, if available.
    ///
    /// Returns `None` if Telegram variables are not set, which disables
    /// intake notifications.
    #[must_use]
    pub const fn telegram(&self) -> Option<&TelegramConfig> {
        self.telegram.as_ref()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an optional environment variable, falling back to `default`.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Mutex, PoisonError};

    use super::*;

    /// Serializes tests that mutate the process environment.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const MANAGED_VARS: &[&str] = &[
        "DEPOSIT_DATABASE_URL",
        "DATABASE_URL",
        "DEPOSIT_SESSION_SECRET",
        "DEPOSIT_HOST",
        "DEPOSIT_PORT",
        "DEPOSIT_BASE_URL",
        "DEPOSIT_LOG_JSON",
        "PRICING_BASE_PRICE",
        "PRICING_UNIT_RATE",
        "PRICING_CURRENCY",
        "ADMIN_USERNAME",
        "ADMIN_PASSWORD",
        "TELEGRAM_BOT_TOKEN",
        "TELEGRAM_CHAT_ID",
        "TELEGRAM_API_BASE",
        "SENTRY_DSN",
    ];

    const VALID_SECRET: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6q";

    /// Run `f` with exactly `vars` set among the managed variables.
    #[allow(unsafe_code)]
    fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
        let _guard = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        // SAFETY: every test touching these variables holds ENV_LOCK.
        unsafe {
            for key in MANAGED_VARS {
                std::env::remove_var(key);
            }
            for (key, value) in vars {
                std::env::set_var(key, value);
            }
        }
        let result = f();
        unsafe {
            for key in MANAGED_VARS {
                std::env::remove_var(key);
            }
        }
        result
    }

    fn required_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("DEPOSIT_DATABASE_URL", "postgres://localhost/deposito"),
            ("DEPOSIT_SESSION_SECRET", VALID_SECRET),
            ("ADMIN_PASSWORD", "s3cure-admin-pass"),
        ]
    }

    fn vars_with(extra: &[(&'static str, &'static str)]) -> Vec<(&'static str, &'static str)> {
        let mut vars = required_vars();
        vars.extend_from_slice(extra);
        vars
    }

    fn test_config() -> DepositConfig {
        DepositConfig {
            database_url: SecretString::from("postgres://localhost/deposito"),
            host: "127.0.0.1".parse().unwrap(),
            port: 5000,
            base_url: "http://localhost:5000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            log_json: false,
            pricing: PricingConfig::default(),
            bootstrap_admin: BootstrapAdmin {
                username: "admin".to_string(),
                password: SecretString::from("admin123"),
            },
            telegram: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("changeme-session-key-0123456789", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength(&"ab".repeat(20), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        assert!(validate_session_secret(&secret, "TEST_SESSION").is_err());
    }

    #[test]
    fn test_socket_addr_and_secure_flag() {
        let mut config = test_config();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5000);
        assert!(!config.is_secure());

        config.base_url = "https://deposito.example.com".to_string();
        assert!(config.is_secure());
    }

    #[test]
    fn test_default_pricing_matches_reference_deployment() {
        let engine = PricingConfig::default().engine();
        assert_eq!(engine.base_price(), 5000);
        assert_eq!(engine.unit_rate(), 6000);
        assert_eq!(engine.currency(), CurrencyCode::ARS);
    }

    #[test]
    fn test_telegram_config_debug_redacts_token() {
        let config = TelegramConfig {
            bot_token: SecretString::from("123456:super-secret-bot-token"),
            chat_id: "-100200300".to_string(),
            api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
        };

        let debug_output = format!("{config:?}");

        assert!(debug_output.contains("-100200300"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret-bot-token"));
    }

    #[test]
    fn test_bootstrap_admin_debug_redacts_password() {
        let admin = BootstrapAdmin {
            username: "admin".to_string(),
            password: SecretString::from("hunter2-but-longer"),
        };

        let debug_output = format!("{admin:?}");

        assert!(debug_output.contains("admin"));
        assert!(!debug_output.contains("hunter2-but-longer"));
    }

    // =========================================================================
    // Loading from the environment
    // =========================================================================

    #[test]
    fn test_from_env_with_required_vars_uses_defaults() {
        let config = with_env(&required_vars(), DepositConfig::from_env).unwrap();

        assert_eq!(config.port, 5000);
        assert_eq!(config.host.to_string(), "0.0.0.0");
        assert_eq!(config.pricing, PricingConfig::default());
        assert_eq!(config.bootstrap_admin.username, "admin");
        assert_eq!(config.bootstrap_admin.password.expose_secret(), "s3cure-admin-pass");
        assert!(config.telegram().is_none());
        assert!(!config.log_json);
    }

    #[test]
    fn test_database_url_falls_back_to_generic_var() {
        let vars = [
            ("DATABASE_URL", "postgres://fallback/db"),
            ("DEPOSIT_SESSION_SECRET", VALID_SECRET),
            ("ADMIN_PASSWORD", "s3cure-admin-pass"),
        ];
        let config = with_env(&vars, DepositConfig::from_env).unwrap();
        assert_eq!(config.database_url.expose_secret(), "postgres://fallback/db");
    }

    #[test]
    fn test_missing_admin_password_is_rejected() {
        let vars = [
            ("DEPOSIT_DATABASE_URL", "postgres://localhost/deposito"),
            ("DEPOSIT_SESSION_SECRET", VALID_SECRET),
        ];
        let result = with_env(&vars, DepositConfig::from_env);
        assert!(matches!(result, Err(ConfigError::MissingEnvVar(ref key)) if key == "ADMIN_PASSWORD"));
    }

    #[test]
    fn test_short_admin_password_is_rejected() {
        let vars = [
            ("DEPOSIT_DATABASE_URL", "postgres://localhost/deposito"),
            ("DEPOSIT_SESSION_SECRET", VALID_SECRET),
            ("ADMIN_PASSWORD", "short"),
        ];
        let result = with_env(&vars, DepositConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InsecureSecret(ref key, _)) if key == "ADMIN_PASSWORD"));
    }

    #[test]
    fn test_custom_admin_username() {
        let vars = vars_with(&[("ADMIN_USERNAME", "staff")]);
        let config = with_env(&vars, DepositConfig::from_env).unwrap();
        assert_eq!(config.bootstrap_admin.username, "staff");
    }

    #[test]
    fn test_non_numeric_port_is_rejected() {
        let vars = vars_with(&[("DEPOSIT_PORT", "five-thousand")]);
        let result = with_env(&vars, DepositConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "DEPOSIT_PORT"));
    }

    #[test]
    fn test_placeholder_session_secret_is_rejected() {
        let vars = [
            ("DEPOSIT_DATABASE_URL", "postgres://localhost/deposito"),
            ("DEPOSIT_SESSION_SECRET", "changeme-changeme-changeme-changeme"),
            ("ADMIN_PASSWORD", "s3cure-admin-pass"),
        ];
        let result = with_env(&vars, DepositConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_telegram_enabled_when_both_vars_set() {
        let vars = vars_with(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("TELEGRAM_CHAT_ID", "-100"),
        ]);
        let config = with_env(&vars, DepositConfig::from_env).unwrap();

        let telegram = config.telegram().unwrap();
        assert_eq!(telegram.chat_id, "-100");
        assert_eq!(telegram.bot_token.expose_secret(), "123:abc");
        assert_eq!(telegram.api_base, DEFAULT_TELEGRAM_API_BASE);
    }

    #[test]
    fn test_telegram_disabled_when_only_one_var_set() {
        let token_only = with_env(&[("TELEGRAM_BOT_TOKEN", "123:abc")], TelegramConfig::from_env);
        let chat_only = with_env(&[("TELEGRAM_CHAT_ID", "-100")], TelegramConfig::from_env);
        let neither = with_env(&[], TelegramConfig::from_env);

        assert!(token_only.is_none());
        assert!(chat_only.is_none());
        assert!(neither.is_none());
    }

    #[test]
    fn test_pricing_from_env_overrides() {
        let vars = [
            ("PRICING_BASE_PRICE", "1000"),
            ("PRICING_UNIT_RATE", "2500"),
            ("PRICING_CURRENCY", "USD"),
        ];
        let pricing = with_env(&vars, PricingConfig::from_env).unwrap();
        assert_eq!(pricing.base_price, 1000);
        assert_eq!(pricing.unit_rate, 2500);
        assert_eq!(pricing.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_negative_unit_rate_is_rejected() {
        let result = with_env(&[("PRICING_UNIT_RATE", "-6000")], PricingConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(_, _))));
    }

    #[test]
    fn test_non_numeric_base_price_is_rejected() {
        let result = with_env(&[("PRICING_BASE_PRICE", "cheap")], PricingConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "PRICING_BASE_PRICE"));
    }

    #[test]
    fn test_unknown_currency_is_rejected() {
        let result = with_env(&[("PRICING_CURRENCY", "XYZ")], PricingConfig::from_env);
        assert!(matches!(result, Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "PRICING_CURRENCY"));
    }
}
