//! Schema migrations for the catalog database.
//!
//! Run [`Migrator::up`] once at startup (the server binary does this when the
//! `migration` feature is enabled) before handing the connection to
//! [`DatabaseStorage`](crate::storage::DatabaseStorage) or
//! [`DbSessionStore`](crate::DbSessionStore).

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_session_table;
mod m20240101_000002_create_catalog_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    // Override the name of migration table to avoid conflicts
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("content_catalog_migrations").into_iden()
    }

    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_session_table::Migration),
            Box::new(m20240101_000002_create_catalog_tables::Migration),
        ]
    }
}
