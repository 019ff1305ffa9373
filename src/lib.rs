//! # Content Catalog
//!
//! Backend for a streaming-style catalog: movies and series, their episodes,
//! per-user favorites and session-authenticated users, served over HTTP with
//! [axum](https://crates.io/crates/axum) and stored through
//! [Sea-ORM](https://crates.io/crates/sea-orm).
//!
//! ## Layout
//!
//! - [`entity`]: Sea-ORM models for `users`, `content`, `episodes`,
//!   `favorites` and `sessions`
//! - [`storage`]: the [`Storage`] trait, one method per query pattern, and
//!   its database implementation
//! - [`DbSessionStore`]: a `tower-sessions` store over the same pool
//! - [`routes`]: the `/api` handlers
//! - [`app`]: state, router assembly and process lifecycle helpers
//!
//! ## Quick Start
//!
//! ```no_run
//! use content_catalog::{app, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! let db = app::connect(&config).await?;
//! let router = app::app(db, &config);
//!
//! let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
//! axum::serve(listener, router).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
#[cfg(feature = "migration")]
pub mod migration;
pub mod routes;
pub mod schema;
mod session_store;
pub mod storage;

pub use app::AppState;
pub use config::{Config, ConfigError};
pub use error::{AppError, Result};
pub use storage::{DatabaseStorage, Storage};

/// The `tower-sessions` store backing user sessions.
pub use session_store::DbSessionStore;

/// Re-exported from `tower-sessions` for handlers and tests.
pub use tower_sessions::Session;
