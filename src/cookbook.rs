//! Cookbook types - the cataloged entity and its tags
//!
//! - `Cookbook`: a stored row, identity assigned by the engine
//! - `NewCookbook`: the insert payload
//! - `Tag`: a unique free-text label, many-to-many with cookbooks

use serde::{Deserialize, Serialize};

/// A cookbook in the collection.
///
/// Read-only once stored; every read returns a fresh copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookbook {
    /// Engine-assigned id (monotonic, never reused)
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year_published: Option<i32>,
    /// Expected 1-5, not enforced by the store
    pub aesthetic_rating: Option<i64>,
    pub instagram_worthy: bool,
    pub cover_color: Option<String>,
}

/// Insert payload for a cookbook
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCookbook {
    pub title: String,
    pub author: String,
    pub year_published: Option<i32>,
    pub aesthetic_rating: Option<i64>,
    pub instagram_worthy: bool,
    pub cover_color: Option<String>,
}

impl NewCookbook {
    /// Create a payload with the required fields only
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year_published: None,
            aesthetic_rating: None,
            instagram_worthy: false,
            cover_color: None,
        }
    }

    pub fn year(mut self, year: i32) -> Self {
        self.year_published = Some(year);
        self
    }

    pub fn rating(mut self, rating: i64) -> Self {
        self.aesthetic_rating = Some(rating);
        self
    }

    pub fn instagram_worthy(mut self, worthy: bool) -> Self {
        self.instagram_worthy = worthy;
        self
    }

    pub fn cover_color(mut self, color: impl Into<String>) -> Self {
        self.cover_color = Some(color.into());
        self
    }
}

/// A tag attached to one or more cookbooks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}
