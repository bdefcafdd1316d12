pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{
    dim, error, header, info, instagram_label, rating_glyphs, section, success, summary_row,
};
pub use table::{cookbook_table, format_average, stats_table, trend_table, TableBuilder};
pub use theme::{theme, Theme};
