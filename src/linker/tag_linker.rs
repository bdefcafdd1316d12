use crate::{AssociationStage, Error, Result};
use crate::cookbook::Tag;
use crate::storage::CatalogStore;
use rusqlite::params;
use std::collections::BTreeSet;
use std::fmt;

/// Outcome of one `attach_tags` call
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct TagLinkStats {
    /// Distinct names requested
    pub requested: usize,
    /// Tag rows that did not exist before
    pub tags_created: usize,
    /// Cookbook/tag pairs that did not exist before
    pub links_created: usize,
}

impl fmt::Display for TagLinkStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tag Link Stats:")?;
        writeln!(f, "  Requested: {}", self.requested)?;
        writeln!(f, "  New tags: {}", self.tags_created)?;
        writeln!(f, "  New links: {}", self.links_created)
    }
}

/// Attaches tags to cookbooks, creating tags on first use.
pub struct TagLinker<'a> {
    store: &'a CatalogStore,
}

impl<'a> TagLinker<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Attach a set of tag names to a cookbook.
    ///
    /// Runs in three steps: ensure every tag exists, resolve names to ids,
    /// then link. Repeated names and already-linked pairs are no-ops. Each
    /// statement commits on its own, so a failure partway leaves earlier
    /// tags and links in place and stops at the failing step.
    pub fn attach_tags<I, S>(&self, cookbook_id: i64, tag_names: I) -> Result<TagLinkStats>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: BTreeSet<String> = tag_names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();

        let mut stats = TagLinkStats { requested: names.len(), ..Default::default() };
        if names.is_empty() {
            return Ok(stats);
        }

        let conn = self.store.conn();
        let fail = |stage| association_error(cookbook_id, stage);

        // --- Step 1: Ensure ---
        for name in &names {
            stats.tags_created += conn
                .execute("INSERT OR IGNORE INTO tags (name) VALUES (?1)", [name])
                .map_err(fail(AssociationStage::Ensure))?;
        }

        // --- Step 2: Resolve ---
        let mut tag_ids = Vec::with_capacity(names.len());
        for name in &names {
            let id: i64 = conn
                .query_row("SELECT id FROM tags WHERE name = ?1", [name], |row| row.get(0))
                .map_err(fail(AssociationStage::Resolve))?;
            tag_ids.push(id);
        }

        // --- Step 3: Link ---
        for tag_id in tag_ids {
            stats.links_created += conn
                .execute(
                    "INSERT OR IGNORE INTO cookbook_tags (cookbook_id, tag_id) VALUES (?1, ?2)",
                    params![cookbook_id, tag_id],
                )
                .map_err(fail(AssociationStage::Link))?;
        }

        tracing::debug!(
            cookbook_id,
            requested = stats.requested,
            tags_created = stats.tags_created,
            links_created = stats.links_created,
            "attached tags"
        );
        Ok(stats)
    }

    /// Tags linked to a cookbook, ordered by name
    pub fn tags_for(&self, cookbook_id: i64) -> Result<Vec<Tag>> {
        let mut stmt = self.store.conn().prepare(
            r#"
            SELECT t.id, t.name
            FROM tags t
            JOIN cookbook_tags ct ON ct.tag_id = t.id
            WHERE ct.cookbook_id = ?1
            ORDER BY t.name
            "#,
        )?;

        let tags = stmt
            .query_map([cookbook_id], row_to_tag)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tags)
    }

    /// Every known tag, ordered by name
    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        let mut stmt = self.store.conn().prepare("SELECT id, name FROM tags ORDER BY name")?;

        let tags = stmt
            .query_map([], row_to_tag)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(tags)
    }
}

fn association_error(cookbook_id: i64, stage: AssociationStage) -> impl Fn(rusqlite::Error) -> Error {
    move |source| Error::Association { cookbook_id, stage, source }
}

fn row_to_tag(row: &rusqlite::Row) -> rusqlite::Result<Tag> {
    Ok(Tag {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}
