//! Database schema definitions

/// SQL to create the cookbooks table
pub const CREATE_COOKBOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cookbooks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    author TEXT NOT NULL,
    year_published INTEGER,
    aesthetic_rating INTEGER,
    instagram_worthy BOOLEAN,
    cover_color TEXT
)
"#;

/// SQL to create the tags table
pub const CREATE_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
)
"#;

/// SQL to create the cookbook_tags association table
/// One row per (cookbook, tag) pair
pub const CREATE_COOKBOOK_TAGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS cookbook_tags (
    cookbook_id INTEGER,
    tag_id INTEGER,
    FOREIGN KEY (cookbook_id) REFERENCES cookbooks(id),
    FOREIGN KEY (tag_id) REFERENCES tags(id),
    PRIMARY KEY (cookbook_id, tag_id)
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_cookbooks_year ON cookbooks(year_published)",
    "CREATE INDEX IF NOT EXISTS idx_cookbooks_rating ON cookbooks(aesthetic_rating)",
    "CREATE INDEX IF NOT EXISTS idx_cookbook_tags_tag ON cookbook_tags(tag_id)",
];

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    let mut stmts = vec![
        CREATE_COOKBOOKS_TABLE,
        CREATE_TAGS_TABLE,
        CREATE_COOKBOOK_TAGS_TABLE,
    ];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
