use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Ratings at or above this get the standout style
pub const STANDOUT_RATING: i64 = 5;

/// Earthy palette for shelf output
#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub info: Style,
    pub dim: Style,
    pub rating: Style,
    pub standout: Style,
    pub tag: Style,
    /// Years flagged as collection gaps
    pub gap: Style,
}

impl Theme {
    /// Colors only when stdout is a terminal and `NO_COLOR` is unset
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::choose(no_color, console::Term::stdout().is_term())
    }

    fn choose(no_color: bool, is_term: bool) -> Self {
        if no_color || !is_term {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().green().bold(),
            success: Style::new().bright_green(),
            error: Style::new().red().bold(),
            info: Style::new().yellow(),
            dim: Style::new().bright_black(),
            rating: Style::new().yellow(),
            standout: Style::new().bright_yellow().bold(),
            tag: Style::new().cyan().italic(),
            gap: Style::new().magenta(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            rating: Style::new(),
            standout: Style::new(),
            tag: Style::new(),
            gap: Style::new(),
        }
    }

    pub fn rating_style(&self, rating: Option<i64>) -> Style {
        match rating {
            Some(r) if r >= STANDOUT_RATING => self.standout.clone(),
            _ => self.rating.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owo_colors::OwoColorize;

    #[test]
    fn test_plain_theme_adds_no_escapes() {
        let plain = Theme::plain();
        assert_eq!("Denim".style(plain.header.clone()).to_string(), "Denim");
        assert_eq!("vegan".style(plain.tag.clone()).to_string(), "vegan");
        assert_eq!("2021".style(plain.gap.clone()).to_string(), "2021");
    }

    #[test]
    fn test_choose_falls_back_to_plain() {
        let off_terminal = Theme::choose(false, false);
        assert_eq!("x".style(off_terminal.rating.clone()).to_string(), "x");

        let no_color = Theme::choose(true, true);
        assert_eq!("x".style(no_color.standout.clone()).to_string(), "x");

        let colored = Theme::choose(false, true);
        assert_ne!("x".style(colored.standout.clone()).to_string(), "x");
    }

    #[test]
    fn test_rating_style_highlights_top_ratings() {
        let theme = Theme::colored();
        let top = "xx".style(theme.rating_style(Some(STANDOUT_RATING))).to_string();
        let plain_rated = "xx".style(theme.rating_style(Some(3))).to_string();
        let unrated = "xx".style(theme.rating_style(None)).to_string();
        assert_ne!(top, plain_rated);
        assert_eq!(plain_rated, unrated);
    }
}
