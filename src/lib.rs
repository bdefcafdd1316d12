//! # Cookshelf - Cookbook Collection Catalog
//!
//! Tagged-entity catalog with aggregate analytics on embedded SQLite.
//!
//! Cookshelf provides:
//! - A storage handle owning the single SQLite connection
//! - Idempotent schema creation (cookbooks, tags, cookbook_tags)
//! - Cookbook inserts and reads
//! - Create-if-absent tag association
//! - Filtered queries and aggregate reports returned as plain data

pub mod cookbook;
pub mod storage;
pub mod linker;
pub mod query;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use cookbook::{Cookbook, NewCookbook, Tag};
pub use storage::{CatalogStore, StoreOptions};
pub use linker::TagLinker;
pub use query::{Analytics, CollectionReport, QueryEngine, YearTrend};

use std::path::PathBuf;

/// Result type alias for Cookshelf operations
pub type Result<T> = std::result::Result<T, Error>;

/// Step of the tag attachment sequence that failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationStage {
    /// Creating missing tag rows
    Ensure,
    /// Looking up tag ids by name
    Resolve,
    /// Inserting cookbook/tag pairs
    Link,
}

impl std::fmt::Display for AssociationStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stage = match self {
            AssociationStage::Ensure => "ensure",
            AssociationStage::Resolve => "resolve",
            AssociationStage::Link => "link",
        };
        write!(f, "{}", stage)
    }
}

/// Error types for Cookshelf operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Cannot open store at {}: {source}", .path.display())]
    Connection {
        path: PathBuf,
        #[source]
        source: OpenCause,
    },

    #[error("Schema error: {0}")]
    Schema(#[source] rusqlite::Error),

    #[error("Constraint violated{}: {message}", field_suffix(.field))]
    Constraint {
        field: Option<String>,
        message: String,
    },

    /// Tags or links created before the failing stage stay committed.
    #[error("Tag association failed for cookbook {cookbook_id} during {stage}: {source}")]
    Association {
        cookbook_id: i64,
        stage: AssociationStage,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Analytics error: {0}")]
    Analytics(#[source] rusqlite::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

/// Why a store could not be opened or created
#[derive(Debug, thiserror::Error)]
pub enum OpenCause {
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// Parent directory of the store file could not be created
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn field_suffix(field: &Option<String>) -> String {
    match field {
        Some(name) => format!(" on {}", name),
        None => String::new(),
    }
}
