use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

/// Glyph repeated once per rating point
pub const RATING_GLYPH: &str = "xx";

/// Most glyphs drawn for one rating; anything above gets a trailing `+`
pub const MAX_RATING_GLYPHS: i64 = 5;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::BOOK, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO.style(theme().info.clone()),
        label.style(theme().dim.clone()),
        value
    );
}

pub fn section(title: &str) {
    if is_quiet() {
        return;
    }
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

pub fn dim(text: &str) -> String {
    text.style(theme().dim.clone()).to_string()
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", label.style(theme().dim.clone()), value);
}

/// Render a rating as repeated glyphs; unrated and negative values are empty
pub fn rating_glyphs(rating: Option<i64>) -> String {
    let rating = rating.unwrap_or(0);
    let glyphs = RATING_GLYPH.repeat(rating.clamp(0, MAX_RATING_GLYPHS) as usize);
    if rating > MAX_RATING_GLYPHS {
        format!("{}+", glyphs)
    } else {
        glyphs
    }
}

pub fn instagram_label(worthy: bool) -> &'static str {
    if worthy {
        "@@ yes"
    } else {
        "not aesthetic enough"
    }
}
