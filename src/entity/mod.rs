//! Sea-ORM entity models for the catalog database.
//!
//! One module per table. The type aliases at the bottom give the rest of the
//! crate short names for the row types it passes around.

pub mod content;
pub mod episode;
pub mod favorite;
/// Persisted `tower-sessions` records.
pub mod session;
pub mod user;

pub use content::ContentType;

/// A stored catalog row.
pub type Content = content::Model;
/// A stored episode row.
pub type Episode = episode::Model;
/// A stored favorite row.
pub type Favorite = favorite::Model;
/// A stored user row.
pub type User = user::Model;
