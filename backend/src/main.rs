//! Backend entry-point: loads configuration, prepares storage and serves the
//! REST API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use expense_backend::inbound::http::health::HealthState;
use expense_backend::inbound::http::token_config::{BuildMode, token_settings_from_env};
use expense_backend::outbound::persistence::{DbPool, run_migrations};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        ServerSettings::load_from_iter(std::env::args_os()).wrap_err("load server settings")?;
    let env = DefaultEnv::new();
    let token_settings = token_settings_from_env(&env, BuildMode::from_debug_assertions())
        .wrap_err("load token settings")?;
    info!(
        fingerprint = %token_settings.fingerprint(),
        issuer = token_settings.issuer(),
        "token signing key loaded"
    );

    let bind_addr = settings.bind_addr().wrap_err("parse EXPENSE_BIND_ADDR")?;
    let mut config = ServerConfig::new(bind_addr, token_settings);

    match settings.database_url() {
        Some(url) => {
            run_migrations(url).await.wrap_err("apply migrations")?;
            let pool = DbPool::connect(settings.pool_config(url))
                .await
                .wrap_err("connect to database")?;
            config = config.with_db_pool(pool);
        }
        None => warn!("no database configured; data is kept in memory"),
    }

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await?;
    Ok(())
}
