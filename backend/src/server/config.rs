//! HTTP server configuration object and helpers.

use std::net::SocketAddr;
use std::time::Duration;

use marketplace::inbound::http::token_config::TokenSecret;
use marketplace::outbound::persistence::DbPool;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_secret: TokenSecret,
    pub(crate) token_ttl: Duration,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) allow_demo_accounts: bool,
}

impl ServerConfig {
    /// Construct a server configuration from the loaded secret and settings.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_secret: TokenSecret, token_ttl: Duration) -> Self {
        Self {
            bind_addr,
            token_secret,
            token_ttl,
            db_pool: None,
            allow_demo_accounts: false,
        }
    }

    /// Accept the demo accounts at login even in release builds.
    #[must_use]
    pub fn with_demo_accounts(mut self, allow: bool) -> Self {
        self.allow_demo_accounts = allow;
        self
    }

    /// Attach a database connection pool for persistence adapters.
    ///
    /// Without one the registry runs over the in-memory repository.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
