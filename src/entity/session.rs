//! Session entity model for Sea-ORM database interaction.
//!
//! Rows in this table are written exclusively by
//! [`DbSessionStore`](crate::DbSessionStore); the catalog itself never touches
//! them directly.

use sea_orm::entity::prelude::*;

/// Sea-ORM entity model representing a persisted `tower-sessions` record.
///
/// # Database Schema
///
/// | Column      | Type                    | Description                       |
/// |-------------|-------------------------|-----------------------------------|
/// | id          | TEXT (Primary Key)      | Session ID                        |
/// | data        | BYTEA / BLOB            | MessagePack-serialized record     |
/// | expiry_date | TIMESTAMPTZ             | Session expiration timestamp      |
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// The `tower_sessions::session::Id` rendered as a string.
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    /// The MessagePack-serialized `Record`, including every value the
    /// handlers stored in the session.
    pub data: Vec<u8>,

    /// Loads ignore rows whose expiry is in the past, and
    /// `delete_expired` removes them.
    pub expiry_date: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
