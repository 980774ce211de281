//! # pottydogd: pottydog daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars) and initialise logging
//! - Initialize the `SQLite` connection pool and run migrations
//! - Construct repository, token and hashing implementations (adapters)
//! - Construct application services, injecting adapters via port traits
//! - Optionally bootstrap the administrator account
//! - Start the MQTT bridge feeding the channel hub
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use pottydog_adapter_access::{Argon2PasswordHasher, JwtTokenIssuer};
use pottydog_adapter_http_axum::session::SessionStore;
use pottydog_adapter_http_axum::state::{AppState, Services};
use pottydog_adapter_mqtt::MqttBridge;
use pottydog_adapter_storage_sqlite_sqlx::{
    Config as StorageConfig, SqlitePottyLogRepository, SqlitePreferencesRepository,
    SqliteUserRepository,
};
use pottydog_app::channel_hub::InProcessChannelHub;
use pottydog_app::services::account_service::{AccountService, AdminBootstrap};
use pottydog_app::services::grant_service::GrantService;
use pottydog_app::services::permission_service::PermissionService;
use pottydog_app::services::potty_log_service::PottyLogService;
use pottydog_app::services::settings_service::SettingsService;

use crate::config::Config;

const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Database
    let db = StorageConfig {
        database_url: config.database.url.clone(),
    }
    .build()
    .await?;
    let pool = db.pool().clone();
    tracing::info!(url = %config.database.url, "database ready");

    // Repositories
    let users = SqliteUserRepository::new(pool.clone());
    let preferences = SqlitePreferencesRepository::new(pool.clone());
    let potty_logs = SqlitePottyLogRepository::new(pool);

    // Channel hub
    let hub = Arc::new(InProcessChannelHub::new(config.channel.capacity));

    // Services
    let accounts = AccountService::new(users.clone(), preferences.clone(), Argon2PasswordHasher);
    if let Some(admin) = &config.admin {
        let admin = accounts
            .bootstrap_admin(&AdminBootstrap::from(admin))
            .await?;
        tracing::info!(user_id = %admin.id, email = %admin.email, "administrator ready");
    }
    let services = Services {
        accounts,
        grants: GrantService::new(
            users.clone(),
            JwtTokenIssuer::new(&config.access.secret),
            config.channel.name.clone(),
            config.access.token_ttl_minutes,
        ),
        permissions: PermissionService::new(
            users.clone(),
            Arc::clone(&hub),
            config.channel.name.clone(),
        ),
        potty_logs: PottyLogService::new(potty_logs),
        settings: SettingsService::new(users, preferences),
    };

    // Device broker
    let bridge = config.mqtt.enabled.then(|| {
        MqttBridge::new(
            config.mqtt.clone(),
            config.channel.name.clone(),
            Arc::clone(&hub),
        )
        .spawn()
    });

    // HTTP
    let shutdown = CancellationToken::new();
    let sessions = SessionStore::new(config.session_ttl(), config.server.secure_cookies);
    let state = AppState::new(services, hub, sessions).with_shutdown(shutdown.clone());
    let sweeper = tokio::spawn(sweep_sessions(
        Arc::clone(&state.sessions),
        shutdown.clone(),
    ));
    let app = pottydog_adapter_http_axum::router::build(
        state,
        Some(PathBuf::from(&config.server.static_dir)),
    );

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, channel = %config.channel.name, "pottydogd listening");

    let stopping = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            stopping.cancel();
        })
        .await?;

    shutdown.cancel();
    if let Err(err) = sweeper.await {
        tracing::warn!(%err, "session sweeper did not stop cleanly");
    }
    if let Some(bridge) = bridge {
        bridge.abort();
    }
    db.close().await;
    tracing::info!("pottydogd stopped");

    Ok(())
}

/// Drop expired sessions every [`SESSION_SWEEP_INTERVAL`] until `shutdown`.
async fn sweep_sessions(sessions: Arc<SessionStore>, shutdown: CancellationToken) {
    let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            _ = interval.tick() => {
                let removed = sessions.prune_expired();
                if removed > 0 {
                    tracing::debug!(removed, "expired sessions pruned");
                }
            }
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => tracing::info!("received Ctrl+C, shutting down"),
            Err(err) => {
                tracing::error!(%err, "failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(err) => {
                tracing::error!(%err, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
