//! Query engine implementation
//!
//! Provides filtered reads over the catalog:
//! - Minimum-rating search ordered by cover color
//! - Tag lookup
//! - Instagram-worthy shelf

use crate::Result;
use crate::cookbook::Cookbook;
use crate::storage::CatalogStore;
use crate::storage::sqlite::COOKBOOK_COLUMNS;

/// Query engine for catalog reads
pub struct QueryEngine<'a> {
    store: &'a CatalogStore,
}

impl<'a> QueryEngine<'a> {
    /// Create a new query engine
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Cookbooks rated at least `threshold`, ordered by cover color.
    ///
    /// Ordering uses SQLite's default BINARY collation, so it is
    /// case-sensitive. No match is an empty list, not an error.
    pub fn find_by_minimum_rating(&self, threshold: i64) -> Result<Vec<Cookbook>> {
        let sql = format!(
            "SELECT {} FROM cookbooks WHERE aesthetic_rating >= ?1 ORDER BY cover_color ASC",
            COOKBOOK_COLUMNS
        );
        self.collect(&sql, [threshold])
    }

    /// Cookbooks carrying the named tag, ordered by id
    pub fn find_by_tag(&self, name: &str) -> Result<Vec<Cookbook>> {
        let sql = format!(
            r#"
            SELECT {} FROM cookbooks
            WHERE id IN (
                SELECT ct.cookbook_id
                FROM cookbook_tags ct
                JOIN tags t ON t.id = ct.tag_id
                WHERE t.name = ?1
            )
            ORDER BY id
            "#,
            COOKBOOK_COLUMNS
        );
        self.collect(&sql, [name])
    }

    /// Cookbooks flagged as Instagram-worthy, ordered by id
    pub fn instagram_worthy(&self) -> Result<Vec<Cookbook>> {
        let sql = format!(
            "SELECT {} FROM cookbooks WHERE instagram_worthy = 1 ORDER BY id",
            COOKBOOK_COLUMNS
        );
        self.collect(&sql, [])
    }

    fn collect<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Cookbook>> {
        let mut stmt = self.store.conn().prepare(sql)?;
        let cookbooks = stmt
            .query_map(params, CatalogStore::row_to_cookbook)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(rows = cookbooks.len(), "query complete");
        Ok(cookbooks)
    }
}
