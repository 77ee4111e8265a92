use once_cell::sync::Lazy;
use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::core::error::{AppError, AppResult};

/// Log file path
/// Read from LOG_FILE_PATH environment variable
/// Default: phonegate.log
pub static LOG_FILE_PATH: Lazy<String> =
    Lazy::new(|| env::var("LOG_FILE_PATH").unwrap_or_else(|_| "phonegate.log".to_string()));

/// Record file used when USERS_DB_PATH is not set
pub const DEFAULT_USERS_DB_PATH: &str = "users.json";

/// Path secret used when WEBHOOK_SECRET is not set
pub const DEFAULT_WEBHOOK_SECRET: &str = "secret";

/// Webhook listen port used when PORT is not set
pub const DEFAULT_PORT: u16 = 8000;

/// Network configuration
pub mod network {
    use super::Duration;

    /// Request timeout for Bot API calls (in seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;

    /// Request timeout duration
    pub fn timeout() -> Duration {
        Duration::from_secs(REQUEST_TIMEOUT_SECS)
    }
}

/// Webhook endpoint configuration
pub mod webhook {
    /// Every webhook route lives under this prefix, followed by the secret
    pub const PATH_PREFIX: &str = "/webhook";

    /// Header Telegram uses to echo the secret token given to setWebhook
    pub const SECRET_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

    /// Telegram accepts 1-256 characters for a secret token
    pub const SECRET_TOKEN_MAX_LEN: usize = 256;
}

/// Settings shared by every run mode.
#[derive(Debug)]
pub struct BotConfig {
    pub token: SecretString,
    /// Self-hosted Bot API server, if any
    pub api_url: Option<Url>,
    pub users_db_path: PathBuf,
    /// Discard updates queued before the poller/webhook came up
    pub drop_pending_updates: bool,
}

/// Settings only the webhook mode needs.
#[derive(Debug)]
pub struct WebhookConfig {
    pub base_url: Url,
    pub secret: SecretString,
    pub port: u16,
    /// Reject requests whose secret-token header does not match `secret`
    pub verify_secret_header: bool,
}

impl BotConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = get("BOT_TOKEN")
            .or_else(|| get("TELOXIDE_TOKEN"))
            .ok_or(AppError::ConfigurationMissing("BOT_TOKEN"))?;

        let api_url = get("BOT_API_URL")
            .map(|raw| Url::parse(raw.trim()).map_err(|e| AppError::invalid("BOT_API_URL", e)))
            .transpose()?;

        let users_db_path = get("USERS_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_DB_PATH));

        let drop_pending_updates = match get("DROP_PENDING_UPDATES") {
            Some(raw) => parse_flag("DROP_PENDING_UPDATES", &raw)?,
            None => false,
        };

        Ok(Self {
            token: SecretString::from(token.trim().to_string()),
            api_url,
            users_db_path,
            drop_pending_updates,
        })
    }
}

impl WebhookConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_base = get("BASE_URL").ok_or(AppError::ConfigurationMissing("BASE_URL"))?;
        let base_url = Url::parse(raw_base.trim()).map_err(|e| AppError::invalid("BASE_URL", e))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AppError::invalid("BASE_URL", "scheme must be http or https"));
        }

        let secret = get("WEBHOOK_SECRET").unwrap_or_else(|| DEFAULT_WEBHOOK_SECRET.to_string());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| AppError::invalid("PORT", format!("{raw:?}: {e}")))?,
            None => DEFAULT_PORT,
        };

        let verify_secret_header = match get("VERIFY_SECRET_HEADER") {
            Some(raw) => parse_flag("VERIFY_SECRET_HEADER", &raw)?,
            None => true,
        };

        let config = Self {
            base_url,
            secret: SecretString::from(secret.trim().to_string()),
            port,
            verify_secret_header,
        };
        config.validate_secret()?;
        Ok(config)
    }

    /// Route the HTTP server listens on, e.g. `/webhook/secret`
    pub fn path(&self) -> String {
        format!("{}/{}", webhook::PATH_PREFIX, self.secret.expose_secret())
    }

    /// Public URL handed to setWebhook
    pub fn url(&self) -> AppResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", base, self.path()))?)
    }

    /// Secret token for setWebhook, only when the header is checked
    pub fn secret_token(&self) -> Option<&str> {
        self.verify_secret_header.then(|| self.secret.expose_secret())
    }

    fn validate_secret(&self) -> AppResult<()> {
        let secret = self.secret.expose_secret();
        if secret.contains('/') || secret.contains('?') || secret.contains('#') {
            return Err(AppError::invalid("WEBHOOK_SECRET", "must be a single path segment"));
        }
        // Telegram only echoes secrets made of [A-Za-z0-9_-]
        if self.verify_secret_header {
            let valid_chars = secret.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
            if !valid_chars || secret.len() > webhook::SECRET_TOKEN_MAX_LEN {
                return Err(AppError::invalid(
                    "WEBHOOK_SECRET",
                    "secret token allows 1-256 characters from A-Z, a-z, 0-9, _ and -",
                ));
            }
        }
        Ok(())
    }
}

fn parse_flag(var: &'static str, raw: &str) -> AppResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::invalid(var, format!("expected a boolean, got {other:?}"))),
    }
}
