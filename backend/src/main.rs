//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use marketplace::inbound::http::health::HealthState;
use marketplace::inbound::http::token_config::{BuildMode, load_token_secret};
use marketplace::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use marketplace::settings::AppSettings;
use ortho_config::OrthoConfig;

use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os()).map_err(|e| {
        std::io::Error::other(format!("failed to load configuration: {e}"))
    })?;

    let secret = load_token_secret(
        &settings.token_secret_file(),
        settings.allow_ephemeral_secret,
        BuildMode::from_debug_assertions(),
    )
    .map_err(std::io::Error::other)?;

    let mut config = ServerConfig::new(settings.bind_addr(), secret, settings.token_ttl())
        .with_demo_accounts(settings.allow_demo_accounts);

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(|e| std::io::Error::other(format!("migrations failed: {e}")))?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(|e| std::io::Error::other(format!("database pool: {e}")))?;
        config = config.with_db_pool(pool);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(bind_addr = %settings.bind_addr(), "marketplace backend listening");
    server.await
}
