//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with tables:
//! - cookbooks(id, title, author, year_published, aesthetic_rating, instagram_worthy, cover_color)
//! - tags(id, name)
//! - cookbook_tags(cookbook_id, tag_id)

pub mod schema;
pub mod sqlite;

pub use sqlite::{CatalogStore, ShelfStats, StoreOptions};
