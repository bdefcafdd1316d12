use crate::cookbook::Cookbook;
use crate::query::YearTrend;
use crate::ui::output::{instagram_label, rating_glyphs};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn stats_table(stats: &[(&str, &str)]) -> String {
    let mut builder = TableBuilder::new();
    for (label, value) in stats {
        builder.add_row(label, value);
    }
    builder.build()
}

#[derive(Tabled)]
struct CookbookRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Aesthetic")]
    rating: String,
    #[tabled(rename = "Instagram")]
    instagram: &'static str,
    #[tabled(rename = "Cover")]
    cover: String,
}

impl From<&Cookbook> for CookbookRow {
    fn from(book: &Cookbook) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            published: optional(book.year_published),
            rating: rating_glyphs(book.aesthetic_rating),
            instagram: instagram_label(book.instagram_worthy),
            cover: book.cover_color.clone().unwrap_or_default(),
        }
    }
}

pub fn cookbook_table(books: &[Cookbook]) -> String {
    if books.is_empty() {
        return String::new();
    }
    let rows: Vec<CookbookRow> = books.iter().map(CookbookRow::from).collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

#[derive(Tabled)]
struct TrendRow {
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Cookbooks")]
    count: u64,
    #[tabled(rename = "Average Rating")]
    average: String,
}

pub fn trend_table(trends: &[YearTrend]) -> String {
    if trends.is_empty() {
        return String::new();
    }
    let rows: Vec<TrendRow> = trends
        .iter()
        .map(|t| TrendRow {
            year: t.year.map(|y| y.to_string()).unwrap_or_else(|| "undated".to_string()),
            count: t.count,
            average: format_average(t.average_rating),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn format_average(average: Option<f64>) -> String {
    average.map(|a| format!("{:.2}", a)).unwrap_or_else(|| "n/a".to_string())
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}
