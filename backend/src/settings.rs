//! Application configuration loaded via OrthoConfig.
//!
//! Values come from `MARKETPLACE_*` environment variables, an optional
//! configuration file and command-line flags, in increasing precedence.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::inbound::http::token_config::TOKEN_SECRET_DEFAULT_PATH;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Runtime settings for the marketplace backend.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "MARKETPLACE")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// PostgreSQL URL; the in-memory registry is used when absent.
    pub database_url: Option<String>,
    /// Path of the file holding the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Lifetime of issued credentials in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Permit a per-process random secret when the file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Accept the demo accounts at login in release builds.
    #[ortho_config(default = false)]
    pub allow_demo_accounts: bool,
}

impl AppSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Configured secret path, falling back to the mounted secret location.
    pub fn token_secret_file(&self) -> PathBuf {
        self.token_secret_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(TOKEN_SECRET_DEFAULT_PATH))
    }

    /// Credential lifetime, one hour unless overridden.
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS))
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}
