//! Request payloads and their validation rules.
//!
//! Handlers deserialize into these types, run [`Validate::validate`], and only
//! then hand them to the [`Storage`](crate::storage::Storage) layer.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entity::content::UnknownContentType;
use crate::entity::ContentType;

fn default_true() -> bool {
    true
}

fn default_season() -> i32 {
    1
}

/// Identity claims used to create or refresh a user row.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(email)]
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

/// Fields accepted when creating a catalog entry. Only `title` and `type`
/// are required.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewContent {
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    #[validate(range(min = 1800, max = 3000))]
    pub year: Option<i32>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,
    #[serde(default)]
    pub genre: Vec<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    pub director: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub is_featured: bool,
}

impl NewContent {
    /// Minimal entry with every optional field left empty.
    pub fn new(title: impl Into<String>, content_type: ContentType) -> Self {
        Self {
            title: title.into(),
            description: None,
            content_type,
            thumbnail_url: None,
            banner_url: None,
            video_url: None,
            trailer_url: None,
            year: None,
            duration: None,
            rating: None,
            genre: Vec::new(),
            cast: Vec::new(),
            director: None,
            is_active: true,
            is_featured: false,
        }
    }
}

/// Partial update of a catalog entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContentChanges {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub content_type: Option<ContentType>,
    pub thumbnail_url: Option<String>,
    pub banner_url: Option<String>,
    pub video_url: Option<String>,
    pub trailer_url: Option<String>,
    #[validate(range(min = 1800, max = 3000))]
    pub year: Option<i32>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
    #[validate(range(min = 0.0, max = 10.0))]
    pub rating: Option<f64>,
    pub genre: Option<Vec<String>>,
    pub cast: Option<Vec<String>>,
    pub director: Option<String>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Fields accepted when creating an episode. `videoUrl` is mandatory.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewEpisode {
    pub content_id: i32,
    #[validate(length(min = 1, max = 500))]
    pub title: String,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub episode_number: i32,
    #[serde(default = "default_season")]
    #[validate(range(min = 0))]
    pub season_number: i32,
    #[validate(length(min = 1))]
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
}

/// Partial update of an episode.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeChanges {
    #[validate(length(min = 1, max = 500))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub episode_number: Option<i32>,
    #[validate(range(min = 0))]
    pub season_number: Option<i32>,
    #[validate(length(min = 1))]
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFavorite {
    pub content_id: i32,
}

/// Body of `POST /api/admin/verify`, and of admin requests with no payload.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AdminPassword {
    #[serde(default)]
    pub password: String,
}

/// Query string of `GET /api/content`.
///
/// Every field stays a raw string so that a malformed value only matters
/// when its flag is the one selected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentQuery {
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub featured: Option<String>,
    pub popular: Option<String>,
    pub new: Option<String>,
    pub search: Option<String>,
}

/// Which listing a [`ContentQuery`] selects once flag precedence is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentListing {
    Featured,
    Popular,
    New,
    Search(String),
    ByType(ContentType),
    All,
}

fn flag_set(value: &Option<String>) -> bool {
    value.as_deref() == Some("true")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl ContentQuery {
    /// Resolves the query flags in the order
    /// featured, popular, new, search, type, all.
    ///
    /// Empty `search` and `type` values count as absent. `type` is only
    /// parsed once every higher flag is unset.
    pub fn listing(&self) -> Result<ContentListing, UnknownContentType> {
        let listing = if flag_set(&self.featured) {
            ContentListing::Featured
        } else if flag_set(&self.popular) {
            ContentListing::Popular
        } else if flag_set(&self.new) {
            ContentListing::New
        } else if let Some(query) = non_empty(&self.search) {
            ContentListing::Search(query.to_owned())
        } else if let Some(content_type) = non_empty(&self.content_type) {
            ContentListing::ByType(content_type.parse()?)
        } else {
            ContentListing::All
        };
        Ok(listing)
    }
}
