//! Backend entry-point: loads settings, prepares the database, and serves
//! the REST API.

use std::fmt::Display;
use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use office_admin::inbound::http::health::HealthState;
use office_admin::inbound::http::session_config::{BuildMode, session_settings_from_env};
use office_admin::outbound::password::BcryptPasswordHasher;
use office_admin::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use office_admin::server::{DatabaseReadiness, Repositories, ServerConfig, create_server};
use office_admin::settings::AppSettings;

fn startup_error(context: &str, err: impl Display) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load_from_iter(std::env::args_os())
        .map_err(|err| startup_error("failed to load settings", err))?;
    let session = session_settings_from_env(
        &mockable::DefaultEnv::new(),
        BuildMode::from_debug_assertions(),
    )
    .map_err(|err| startup_error("invalid session configuration", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("invalid settings", err))?;
    let database_url = settings
        .database_url()
        .map_err(|err| startup_error("invalid settings", err))?;
    let admin = settings
        .admin_bootstrap()
        .map_err(|err| startup_error("invalid settings", err))?;

    let applied = run_pending_migrations(database_url)
        .await
        .map_err(|err| startup_error("migrations failed", err))?;
    info!(count = applied.len(), "database schema up to date");

    let pool = DbPool::connect(
        PoolConfig::new(database_url).with_max_connections(settings.pool_size()),
    )
    .await
    .map_err(|err| startup_error("database unavailable", err))?;

    if let Some(admin) = admin {
        let accounts = Repositories::from_pool(&pool).account_service(Arc::new(
            BcryptPasswordHasher::new(settings.bcrypt_cost()),
        ));
        accounts
            .ensure_admin(&admin.email, &admin.password)
            .await
            .map_err(|err| startup_error("bootstrap administrator failed", err))?;
    }

    let health_state = web::Data::new(
        HealthState::new().with_dependency(Arc::new(DatabaseReadiness::new(pool.clone()))),
    );
    let config = ServerConfig::new(session, bind_addr)
        .with_db_pool(pool)
        .with_bcrypt_cost(settings.bcrypt_cost());
    info!(%bind_addr, "starting HTTP server");
    create_server(health_state, config)?.await
}
