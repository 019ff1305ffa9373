//! User entity.
//!
//! Users are created and refreshed from identity-provider claims through
//! [`Storage::upsert_user`](crate::storage::Storage::upsert_user), keyed by
//! the provider's opaque subject id.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub id: String,

    #[sea_orm(column_type = "Text", nullable, unique)]
    pub email: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub first_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub last_name: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub profile_image_url: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorite::Entity")]
    Favorites,
}

impl Related<super::favorite::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
