//! Catalog content entity (movies and series).

use std::str::FromStr;

use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether a catalog entry is a single movie or an episodic series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[sea_orm(string_value = "movie")]
    Movie,
    #[sea_orm(string_value = "series")]
    Series,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown content type {0:?}, expected \"movie\" or \"series\"")]
pub struct UnknownContentType(pub String);

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Self::Movie),
            "series" => Ok(Self::Series),
            other => Err(UnknownContentType(other.to_owned())),
        }
    }
}

/// Ordered list of strings stored as a JSON array.
///
/// Used for the `genre` and `cast` columns so the schema stays portable
/// between PostgreSQL and SQLite.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
#[serde(transparent)]
pub struct StringList(pub Vec<String>);

impl From<Vec<String>> for StringList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}

/// A movie or series in the catalog.
///
/// `is_active` is the soft-delete marker: every non-admin read filters on it,
/// while the row itself stays in the table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "content")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "Text")]
    pub title: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[serde(rename = "type")]
    pub content_type: ContentType,

    #[sea_orm(column_type = "Text", nullable)]
    pub thumbnail_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub banner_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub video_url: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub trailer_url: Option<String>,

    pub year: Option<i32>,

    /// Running time in minutes.
    pub duration: Option<i32>,

    pub rating: Option<f64>,

    #[sea_orm(column_type = "Json")]
    pub genre: StringList,

    #[sea_orm(column_type = "Json")]
    pub cast: StringList,

    #[sea_orm(column_type = "Text", nullable)]
    pub director: Option<String>,

    pub is_active: bool,

    pub is_featured: bool,

    pub view_count: i64,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::episode::Entity")]
    Episodes,

    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::episode::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Episodes.def()
    }
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
