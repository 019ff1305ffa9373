#![allow(dead_code)]

use std::sync::Arc;

use content_catalog::entity::{Content, ContentType};
use content_catalog::migration::{Migrator, MigratorTrait};
use content_catalog::schema::{NewContent, UpsertUser};
use content_catalog::{DatabaseStorage, Storage};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub const ADMIN_PASSWORD: &str = "test-admin-secret";

/// A fresh, migrated in-memory SQLite database.
///
/// A single pooled connection keeps every query on the same in-memory
/// database.
pub async fn setup_db() -> DatabaseConnection {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);

    let db = Database::connect(opt).await.expect("connect to sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    db
}

pub async fn setup_storage() -> Arc<DatabaseStorage> {
    Arc::new(DatabaseStorage::new(setup_db().await))
}

pub fn user(id: &str) -> UpsertUser {
    UpsertUser {
        id: id.to_string(),
        email: Some(format!("{id}@example.com")),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        profile_image_url: None,
    }
}

pub async fn movie(storage: &dyn Storage, title: &str) -> Content {
    storage
        .create_content(NewContent::new(title, ContentType::Movie))
        .await
        .expect("create movie")
}

pub async fn series(storage: &dyn Storage, title: &str) -> Content {
    storage
        .create_content(NewContent::new(title, ContentType::Series))
        .await
        .expect("create series")
}

pub async fn inactive(storage: &dyn Storage, title: &str, featured: bool) -> Content {
    let mut data = NewContent::new(title, ContentType::Movie);
    data.is_active = false;
    data.is_featured = featured;
    storage.create_content(data).await.expect("create inactive")
}
