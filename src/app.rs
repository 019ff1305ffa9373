//! Application wiring: shared state, router assembly, the connection pool and
//! the background session sweep.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, ExpiredDeletion, SessionManagerLayer};
use tracing::{info, warn};

use crate::config::Config;
use crate::routes;
use crate::session_store::DbSessionStore;
use crate::storage::{DatabaseStorage, Storage};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub admin_password: Arc<str>,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>, admin_password: impl Into<Arc<str>>) -> Self {
        Self {
            storage,
            admin_password: admin_password.into(),
        }
    }

    /// State over a [`DatabaseStorage`] for `conn`.
    pub fn with_connection(conn: DatabaseConnection, admin_password: impl Into<Arc<str>>) -> Self {
        Self::new(Arc::new(DatabaseStorage::new(conn)), admin_password)
    }
}

/// Opens the process-wide connection pool.
pub async fn connect(config: &Config) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .connect_timeout(config.db_connect_timeout)
        .acquire_timeout(config.db_connect_timeout)
        .sqlx_logging(false);

    Database::connect(opt).await
}

/// Session layer storing sessions through `store`.
pub fn session_layer(store: DbSessionStore, config: &Config) -> SessionManagerLayer<DbSessionStore> {
    SessionManagerLayer::new(store)
        .with_secure(config.session_secure)
        .with_expiry(Expiry::OnInactivity(config.session_ttl))
}

/// Applies state, sessions and request tracing to `routes`.
pub fn build_router(
    routes: Router<AppState>,
    state: AppState,
    sessions: SessionManagerLayer<DbSessionStore>,
) -> Router {
    routes
        .with_state(state)
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
}

/// The full application router for `conn`.
pub fn app(conn: DatabaseConnection, config: &Config) -> Router {
    let state = AppState::with_connection(conn.clone(), config.admin_password.as_str());
    let sessions = session_layer(DbSessionStore::new(conn), config);
    build_router(routes::api_routes(), state, sessions)
}

/// Periodically deletes expired sessions until the task is aborted.
pub fn spawn_session_cleanup(store: DbSessionStore, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = store.delete_expired().await {
                warn!(error = %e, "expired session cleanup failed");
            }
        }
    })
}

/// Resolves on Ctrl+C or SIGTERM.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
