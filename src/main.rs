use content_catalog::app::{self, shutdown_signal, spawn_session_cleanup};
use content_catalog::{Config, DbSessionStore};
use dotenvy::dotenv;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    // Load environment variables from .env file if present
    dotenv().ok();

    let config = Config::from_env()?;

    let db = app::connect(&config).await?;
    info!("connected to database");

    #[cfg(feature = "migration")]
    {
        use content_catalog::migration::{Migrator, MigratorTrait};
        Migrator::up(&db, None).await?;
        info!("migrations applied");
    }

    let cleanup = spawn_session_cleanup(
        DbSessionStore::new(db.clone()),
        config.session_cleanup_interval,
    );

    let router = app::app(db.clone(), &config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("serving on http://{}", config.bind_addr);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cleanup.abort();
    db.close().await?;
    info!("shutdown complete");

    Ok(())
}
