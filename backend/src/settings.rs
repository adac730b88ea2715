//! Application settings loaded via OrthoConfig from `APP_*` variables,
//! configuration files, and command-line flags.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Startup configuration.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "APP")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    #[ortho_config(default = 10)]
    pub pool_size: u32,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Administrator created at startup when no account owns this email.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

/// Problems with otherwise well-formed settings.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("APP_DATABASE_URL must be set")]
    MissingDatabaseUrl,
    #[error("invalid bind address '{value}': {message}")]
    InvalidBindAddr { value: String, message: String },
    #[error("APP_ADMIN_EMAIL and APP_ADMIN_PASSWORD must be set together")]
    PartialAdmin,
}

/// Bootstrap administrator credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminBootstrap {
    pub email: String,
    pub password: String,
}

impl AppSettings {
    /// Listening address, `0.0.0.0:8080` unless configured.
    ///
    /// # Errors
    ///
    /// [`SettingsError::InvalidBindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse()
            .map_err(|err: std::net::AddrParseError| SettingsError::InvalidBindAddr {
                value: raw.to_owned(),
                message: err.to_string(),
            })
    }

    /// # Errors
    ///
    /// [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    pub fn pool_size(&self) -> u32 {
        self.pool_size
    }

    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST)
    }

    /// Administrator to ensure at startup, if configured.
    ///
    /// # Errors
    ///
    /// [`SettingsError::PartialAdmin`] when only one of the pair is set.
    pub fn admin_bootstrap(&self) -> Result<Option<AdminBootstrap>, SettingsError> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|trimmed| !trimmed.is_empty())
                .map(str::to_owned)
        };
        match (present(&self.admin_email), self.admin_password.clone()) {
            (Some(email), Some(password)) if !password.is_empty() => {
                Ok(Some(AdminBootstrap { email, password }))
            }
            (None, None) => Ok(None),
            (None, Some(password)) if password.is_empty() => Ok(None),
            _ => Err(SettingsError::PartialAdmin),
        }
    }
}
