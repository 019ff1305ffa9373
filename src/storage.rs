//! Data access layer for the catalog.
//!
//! [`Storage`] exposes one method per query pattern the HTTP handlers need.
//! Each method is a single round-trip query pattern against the store (updates
//! read the row back afterwards) and propagates the driver error untouched.
//! Nothing here retries, caches, or opens a transaction.

use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func, LikeExpr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::entity::content;
use crate::entity::{episode, favorite, user};
use crate::entity::{Content, ContentType, Episode, Favorite, User};
use crate::schema::{ContentChanges, EpisodeChanges, NewContent, NewEpisode, UpsertUser};

/// Maximum number of rows returned by the popular and new listings.
pub const LISTING_LIMIT: u64 = 20;

/// Typed operations over users, content, episodes and favorites.
///
/// Implementations hold no state of their own beyond a store handle and must
/// be safe to call concurrently from any number of requests.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn get_user(&self, id: &str) -> Result<Option<User>, DbErr>;
    /// Inserts the user, or overwrites every field and refreshes
    /// `updated_at` when the id already exists.
    async fn upsert_user(&self, data: UpsertUser) -> Result<User, DbErr>;

    /// All active content, newest first.
    async fn get_all_content(&self) -> Result<Vec<Content>, DbErr>;
    /// Active content by id. Does not touch the view counter.
    async fn get_content_by_id(&self, id: i32) -> Result<Option<Content>, DbErr>;
    async fn get_content_by_type(&self, content_type: ContentType)
        -> Result<Vec<Content>, DbErr>;
    /// The newest active, featured entry, if any.
    async fn get_featured_content(&self) -> Result<Option<Content>, DbErr>;
    async fn get_popular_content(&self) -> Result<Vec<Content>, DbErr>;
    async fn get_new_content(&self) -> Result<Vec<Content>, DbErr>;
    /// Active content whose title contains `query`, ignoring case.
    ///
    /// The query is lower-cased in full while titles go through the store's
    /// `LOWER`. SQLite only folds ASCII letters there, so on that backend a
    /// non-ASCII letter matches only where the title already has it in lower
    /// case ("écran" does not find "Écran Noir"). PostgreSQL folds both.
    async fn search_content(&self, query: &str) -> Result<Vec<Content>, DbErr>;
    async fn create_content(&self, data: NewContent) -> Result<Content, DbErr>;
    /// Applies `changes` to the row with this id, active or not. Returns
    /// `None` when no such row exists.
    async fn update_content(
        &self,
        id: i32,
        changes: ContentChanges,
    ) -> Result<Option<Content>, DbErr>;
    /// Hard delete. Episodes and favorites go with it via foreign keys.
    async fn delete_content(&self, id: i32) -> Result<(), DbErr>;
    /// Adds one to the view counter in a single atomic statement.
    async fn increment_view_count(&self, id: i32) -> Result<(), DbErr>;

    /// Episodes ordered by season, then episode number.
    async fn get_episodes_by_content_id(&self, content_id: i32) -> Result<Vec<Episode>, DbErr>;
    async fn create_episode(&self, data: NewEpisode) -> Result<Episode, DbErr>;
    async fn update_episode(
        &self,
        id: i32,
        changes: EpisodeChanges,
    ) -> Result<Option<Episode>, DbErr>;
    async fn delete_episode(&self, id: i32) -> Result<(), DbErr>;

    /// Active content the user has favorited, most recent favorite first.
    async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Content>, DbErr>;
    /// Records a favorite without checking for an existing one.
    async fn add_to_favorites(&self, user_id: &str, content_id: i32) -> Result<Favorite, DbErr>;
    /// Removes every matching favorite row; a no-op when none match.
    async fn remove_from_favorites(&self, user_id: &str, content_id: i32) -> Result<(), DbErr>;
    async fn is_favorite(&self, user_id: &str, content_id: i32) -> Result<bool, DbErr>;

    /// Round-trips a trivial statement to check the store is reachable.
    async fn ping(&self) -> Result<(), DbErr>;
}

/// [`Storage`] backed by a Sea-ORM connection pool.
#[derive(Debug, Clone)]
pub struct DatabaseStorage {
    conn: DatabaseConnection,
}

impl DatabaseStorage {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

fn now() -> sea_orm::prelude::DateTimeWithTimeZone {
    chrono::Utc::now().fixed_offset()
}

fn active_content() -> sea_orm::Select<content::Entity> {
    content::Entity::find().filter(content::Column::IsActive.eq(true))
}

/// Builds a `LIKE` pattern matching `query` anywhere in a lower-cased column.
///
/// `%`, `_` and the escape character itself are matched literally.
pub(crate) fn contains_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for ch in query.to_lowercase().chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl Storage for DatabaseStorage {
    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_user(&self, id: &str) -> Result<Option<User>, DbErr> {
        user::Entity::find_by_id(id.to_owned()).one(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self, data), fields(user_id = %data.id))]
    async fn upsert_user(&self, data: UpsertUser) -> Result<User, DbErr> {
        let now = now();
        let model = user::ActiveModel {
            id: Set(data.id),
            email: Set(data.email),
            first_name: Set(data.first_name),
            last_name: Set(data.last_name),
            profile_image_url: Set(data.profile_image_url),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user::Entity::insert(model)
            .on_conflict(
                OnConflict::column(user::Column::Id)
                    .update_columns([
                        user::Column::Email,
                        user::Column::FirstName,
                        user::Column::LastName,
                        user::Column::ProfileImageUrl,
                        user::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_with_returning(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_all_content(&self) -> Result<Vec<Content>, DbErr> {
        active_content()
            .order_by_desc(content::Column::CreatedAt)
            .order_by_desc(content::Column::Id)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_content_by_id(&self, id: i32) -> Result<Option<Content>, DbErr> {
        active_content()
            .filter(content::Column::Id.eq(id))
            .one(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_content_by_type(
        &self,
        content_type: ContentType,
    ) -> Result<Vec<Content>, DbErr> {
        active_content()
            .filter(content::Column::ContentType.eq(content_type))
            .order_by_desc(content::Column::CreatedAt)
            .order_by_desc(content::Column::Id)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_featured_content(&self) -> Result<Option<Content>, DbErr> {
        active_content()
            .filter(content::Column::IsFeatured.eq(true))
            .order_by_desc(content::Column::CreatedAt)
            .order_by_desc(content::Column::Id)
            .one(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_popular_content(&self) -> Result<Vec<Content>, DbErr> {
        active_content()
            .order_by_desc(content::Column::ViewCount)
            .order_by_desc(content::Column::Id)
            .limit(LISTING_LIMIT)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_new_content(&self) -> Result<Vec<Content>, DbErr> {
        active_content()
            .order_by_desc(content::Column::CreatedAt)
            .order_by_desc(content::Column::Id)
            .limit(LISTING_LIMIT)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn search_content(&self, query: &str) -> Result<Vec<Content>, DbErr> {
        let pattern = LikeExpr::new(contains_pattern(query)).escape('\\');

        active_content()
            .filter(Expr::expr(Func::lower(Expr::col(content::Column::Title))).like(pattern))
            .order_by_desc(content::Column::CreatedAt)
            .order_by_desc(content::Column::Id)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self, data), fields(title = %data.title))]
    async fn create_content(&self, data: NewContent) -> Result<Content, DbErr> {
        let now = now();
        let model = content::ActiveModel {
            id: NotSet,
            title: Set(data.title),
            description: Set(data.description),
            content_type: Set(data.content_type),
            thumbnail_url: Set(data.thumbnail_url),
            banner_url: Set(data.banner_url),
            video_url: Set(data.video_url),
            trailer_url: Set(data.trailer_url),
            year: Set(data.year),
            duration: Set(data.duration),
            rating: Set(data.rating),
            genre: Set(data.genre.into()),
            cast: Set(data.cast.into()),
            director: Set(data.director),
            is_active: Set(data.is_active),
            is_featured: Set(data.is_featured),
            view_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model.insert(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self, changes))]
    async fn update_content(
        &self,
        id: i32,
        changes: ContentChanges,
    ) -> Result<Option<Content>, DbErr> {
        let model = content::ActiveModel {
            title: changes.title.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, |v| Set(Some(v))),
            content_type: changes.content_type.map_or(NotSet, Set),
            thumbnail_url: changes.thumbnail_url.map_or(NotSet, |v| Set(Some(v))),
            banner_url: changes.banner_url.map_or(NotSet, |v| Set(Some(v))),
            video_url: changes.video_url.map_or(NotSet, |v| Set(Some(v))),
            trailer_url: changes.trailer_url.map_or(NotSet, |v| Set(Some(v))),
            year: changes.year.map_or(NotSet, |v| Set(Some(v))),
            duration: changes.duration.map_or(NotSet, |v| Set(Some(v))),
            rating: changes.rating.map_or(NotSet, |v| Set(Some(v))),
            genre: changes.genre.map_or(NotSet, |v| Set(v.into())),
            cast: changes.cast.map_or(NotSet, |v| Set(v.into())),
            director: changes.director.map_or(NotSet, |v| Set(Some(v))),
            is_active: changes.is_active.map_or(NotSet, Set),
            is_featured: changes.is_featured.map_or(NotSet, Set),
            updated_at: Set(now()),
            ..Default::default()
        };

        let result = content::Entity::update_many()
            .set(model)
            .filter(content::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        content::Entity::find_by_id(id).one(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_content(&self, id: i32) -> Result<(), DbErr> {
        content::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn increment_view_count(&self, id: i32) -> Result<(), DbErr> {
        content::Entity::update_many()
            .col_expr(
                content::Column::ViewCount,
                Expr::col(content::Column::ViewCount).add(1),
            )
            .filter(content::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_episodes_by_content_id(&self, content_id: i32) -> Result<Vec<Episode>, DbErr> {
        episode::Entity::find()
            .filter(episode::Column::ContentId.eq(content_id))
            .order_by_asc(episode::Column::SeasonNumber)
            .order_by_asc(episode::Column::EpisodeNumber)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self, data), fields(content_id = data.content_id))]
    async fn create_episode(&self, data: NewEpisode) -> Result<Episode, DbErr> {
        let model = episode::ActiveModel {
            id: NotSet,
            content_id: Set(data.content_id),
            title: Set(data.title),
            description: Set(data.description),
            episode_number: Set(data.episode_number),
            season_number: Set(data.season_number),
            video_url: Set(data.video_url),
            thumbnail_url: Set(data.thumbnail_url),
            duration: Set(data.duration),
            created_at: Set(now()),
        };

        model.insert(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self, changes))]
    async fn update_episode(
        &self,
        id: i32,
        changes: EpisodeChanges,
    ) -> Result<Option<Episode>, DbErr> {
        let model = episode::ActiveModel {
            title: changes.title.map_or(NotSet, Set),
            description: changes.description.map_or(NotSet, |v| Set(Some(v))),
            episode_number: changes.episode_number.map_or(NotSet, Set),
            season_number: changes.season_number.map_or(NotSet, Set),
            video_url: changes.video_url.map_or(NotSet, Set),
            thumbnail_url: changes.thumbnail_url.map_or(NotSet, |v| Set(Some(v))),
            duration: changes.duration.map_or(NotSet, |v| Set(Some(v))),
            ..Default::default()
        };

        // Episodes carry no `updated_at`, so an empty change set would
        // produce an UPDATE with nothing to set.
        if !model.is_changed() {
            return episode::Entity::find_by_id(id).one(&self.conn).await;
        }

        let result = episode::Entity::update_many()
            .set(model)
            .filter(episode::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }
        episode::Entity::find_by_id(id).one(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn delete_episode(&self, id: i32) -> Result<(), DbErr> {
        episode::Entity::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn get_user_favorites(&self, user_id: &str) -> Result<Vec<Content>, DbErr> {
        active_content()
            .join(JoinType::InnerJoin, content::Relation::Favorites.def())
            .filter(favorite::Column::UserId.eq(user_id))
            .order_by_desc(favorite::Column::CreatedAt)
            .order_by_desc(favorite::Column::Id)
            .all(&self.conn)
            .await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn add_to_favorites(&self, user_id: &str, content_id: i32) -> Result<Favorite, DbErr> {
        let model = favorite::ActiveModel {
            id: NotSet,
            user_id: Set(user_id.to_owned()),
            content_id: Set(content_id),
            created_at: Set(now()),
        };

        model.insert(&self.conn).await
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn remove_from_favorites(&self, user_id: &str, content_id: i32) -> Result<(), DbErr> {
        favorite::Entity::delete_many()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::ContentId.eq(content_id))
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip(self))]
    async fn is_favorite(&self, user_id: &str, content_id: i32) -> Result<bool, DbErr> {
        let count = favorite::Entity::find()
            .filter(favorite::Column::UserId.eq(user_id))
            .filter(favorite::Column::ContentId.eq(content_id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    async fn ping(&self) -> Result<(), DbErr> {
        self.conn.ping().await
    }
}
