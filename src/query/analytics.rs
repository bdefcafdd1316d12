//! Aggregate reports over the cookbook relation
//!
//! Every report is read-only and computed fresh on each call. Empty data is
//! a normal outcome; only storage failures become `Error::Analytics`.

use crate::{Error, Result};
use crate::storage::CatalogStore;
use serde::{Deserialize, Serialize};

/// Mean rating for one publication year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearTrend {
    /// `None` groups the undated cookbooks
    pub year: Option<i32>,
    /// `None` when no cookbook in the group has a rating
    pub average_rating: Option<f64>,
    pub count: u64,
}

/// All reports bundled for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionReport {
    pub total: u64,
    pub average_rating: Option<f64>,
    pub trends: Vec<YearTrend>,
    pub gaps: Vec<i32>,
}

/// Aggregate reports over the catalog
pub struct Analytics<'a> {
    store: &'a CatalogStore,
}

impl<'a> Analytics<'a> {
    pub fn new(store: &'a CatalogStore) -> Self {
        Self { store }
    }

    /// Mean aesthetic rating, `None` when nothing is rated
    pub fn average_rating(&self) -> Result<Option<f64>> {
        self.store
            .conn()
            .query_row("SELECT AVG(aesthetic_rating) FROM cookbooks", [], |row| row.get(0))
            .map_err(Error::Analytics)
    }

    /// Mean rating per publication year, ascending.
    ///
    /// The undated group is kept and sorts first, as SQLite orders NULLs.
    pub fn rating_trend_by_year(&self) -> Result<Vec<YearTrend>> {
        let mut stmt = self
            .store
            .conn()
            .prepare(
                r#"
                SELECT year_published, AVG(aesthetic_rating), COUNT(*)
                FROM cookbooks
                GROUP BY year_published
                ORDER BY year_published
                "#,
            )
            .map_err(Error::Analytics)?;

        let trends = stmt
            .query_map([], |row| {
                let count: i64 = row.get(2)?;
                Ok(YearTrend {
                    year: row.get(0)?,
                    average_rating: row.get(1)?,
                    count: count as u64,
                })
            })
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(Error::Analytics)?;

        Ok(trends)
    }

    /// Years present in the collection with fewer than two cookbooks, ascending.
    ///
    /// Years missing from the data are not gaps, and undated cookbooks are
    /// not a year.
    pub fn collection_gaps(&self) -> Result<Vec<i32>> {
        let mut stmt = self
            .store
            .conn()
            .prepare(
                r#"
                SELECT year_published
                FROM cookbooks
                WHERE year_published IS NOT NULL
                GROUP BY year_published
                HAVING COUNT(*) < 2
                ORDER BY year_published
                "#,
            )
            .map_err(Error::Analytics)?;

        let gaps = stmt
            .query_map([], |row| row.get(0))
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<i32>>>())
            .map_err(Error::Analytics)?;

        Ok(gaps)
    }

    /// Run every report
    pub fn report(&self) -> Result<CollectionReport> {
        let total: i64 = self
            .store
            .conn()
            .query_row("SELECT COUNT(*) FROM cookbooks", [], |row| row.get(0))
            .map_err(Error::Analytics)?;

        let report = CollectionReport {
            total: total as u64,
            average_rating: self.average_rating()?,
            trends: self.rating_trend_by_year()?,
            gaps: self.collection_gaps()?,
        };
        tracing::debug!(total = report.total, gaps = report.gaps.len(), "collection report built");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookbook::NewCookbook;
    use crate::linker::TagLinker;

    fn sample_collection() -> Vec<NewCookbook> {
        vec![
            NewCookbook::new("Foraged & Found: A Guide to Pretending You Know About Mushrooms", "Oak Wavelength")
                .year(2023).rating(5).instagram_worthy(true).cover_color("Forest Green"),
            NewCookbook::new("Small Batch: 50 Recipes You Will Never Actually Make", "Sage Moonbeam")
                .year(2022).rating(4).instagram_worthy(true).cover_color("Raw Linen"),
            NewCookbook::new("The Artistic Toast: Advanced Avocado Techniques", "River Wildflower")
                .year(2023).rating(5).instagram_worthy(true).cover_color("Recycled Brown"),
            NewCookbook::new("Fermented Everything", "Jim Kombucha")
                .year(2021).rating(3).instagram_worthy(true).cover_color("Denim"),
            NewCookbook::new("The Deconstructed Sandwich: Making Simple Things Complicated", "Juniper Vinegar-Smith")
                .year(2023).rating(5).instagram_worthy(true).cover_color("Beige"),
        ]
    }

    fn insert_year(store: &CatalogStore, year: Option<i32>, rating: i64) {
        let mut book = NewCookbook::new("Book", "Author").rating(rating);
        book.year_published = year;
        store.insert_cookbook(&book).unwrap();
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_average_on_empty_is_none() {
        let store = CatalogStore::open_in_memory().unwrap();
        let analytics = Analytics::new(&store);

        assert_eq!(analytics.average_rating().unwrap(), None);
        assert!(analytics.rating_trend_by_year().unwrap().is_empty());
        assert!(analytics.collection_gaps().unwrap().is_empty());
    }

    #[test]
    fn test_gaps_only_report_present_years() {
        let store = CatalogStore::open_in_memory().unwrap();
        insert_year(&store, Some(2021), 3);
        insert_year(&store, Some(2022), 4);
        for _ in 0..3 {
            insert_year(&store, Some(2023), 5);
        }

        assert_eq!(Analytics::new(&store).collection_gaps().unwrap(), vec![2021, 2022]);
    }

    #[test]
    fn test_undated_group_sorts_first_and_is_not_a_gap() {
        let store = CatalogStore::open_in_memory().unwrap();
        insert_year(&store, Some(2020), 2);
        insert_year(&store, None, 4);

        let analytics = Analytics::new(&store);
        let trends = analytics.rating_trend_by_year().unwrap();
        assert_eq!(trends.len(), 2);
        assert_eq!(trends[0].year, None);
        assert_eq!(trends[0].count, 1);
        assert_eq!(trends[1].year, Some(2020));

        assert_eq!(analytics.collection_gaps().unwrap(), vec![2020]);
    }

    #[test]
    fn test_unrated_group_has_no_average() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.insert_cookbook(&NewCookbook::new("Unrated", "Author").year(2019)).unwrap();

        let analytics = Analytics::new(&store);
        assert_eq!(analytics.average_rating().unwrap(), None);
        let trends = analytics.rating_trend_by_year().unwrap();
        assert_eq!(trends[0].average_rating, None);
        assert_eq!(trends[0].count, 1);
    }

    #[test]
    fn test_sample_collection_end_to_end() {
        let store = CatalogStore::open_in_memory().unwrap();
        let mut ids = Vec::new();
        for book in sample_collection() {
            ids.push(store.insert_cookbook(&book).unwrap());
        }
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        TagLinker::new(&store)
            .attach_tags(1, ["gluten-free", "plant-based", "artisanal"])
            .unwrap();

        assert_eq!(store.list_cookbooks().unwrap().len(), 5);
        assert_eq!(store.count_links().unwrap(), 3);

        let analytics = Analytics::new(&store);
        assert!(approx(analytics.average_rating().unwrap().unwrap(), 4.4));

        let trends = analytics.rating_trend_by_year().unwrap();
        let pairs: Vec<_> = trends.iter().map(|t| (t.year, t.average_rating)).collect();
        assert_eq!(
            pairs,
            vec![
                (Some(2021), Some(3.0)),
                (Some(2022), Some(4.0)),
                (Some(2023), Some(5.0)),
            ]
        );

        assert_eq!(analytics.collection_gaps().unwrap(), vec![2021, 2022]);

        let report = analytics.report().unwrap();
        assert_eq!(report.total, 5);
        assert_eq!(report.gaps, vec![2021, 2022]);
        assert_eq!(report.trends.len(), 3);
    }

    #[test]
    fn test_missing_table_is_analytics_error() {
        let store = CatalogStore::open_in_memory().unwrap();
        store.conn().execute("DROP TABLE cookbook_tags", []).unwrap();
        store.conn().execute("DROP TABLE cookbooks", []).unwrap();

        let err = Analytics::new(&store).average_rating().unwrap_err();
        assert!(matches!(err, Error::Analytics(_)));
    }
}
