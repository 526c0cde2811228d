use ratatui::style::Color;

use crate::model::{Category, InquiryStatus, SiteConfig, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// Brand accent from the site's `primaryColor`
    pub primary: Color,
    /// Brand accent from the site's `secondaryColor`
    pub secondary: Color,
    pub dim: Color,
    pub red: Color,
    pub yellow: Color,
    pub green: Color,
    pub cyan: Color,
    pub selection_bg: Color,
    pub search_match_bg: Color,
    pub search_match_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x0C, 0x00, 0x1B),
            text: Color::Rgb(0xB0, 0xAA, 0xFF),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            primary: Color::Rgb(0x8A, 0x2B, 0xE2),
            secondary: Color::Rgb(0xA0, 0x20, 0xF0),
            dim: Color::Rgb(0x7D, 0x78, 0xBF),
            red: Color::Rgb(0xFF, 0x44, 0x44),
            yellow: Color::Rgb(0xFF, 0xD7, 0x00),
            green: Color::Rgb(0x44, 0xFF, 0x88),
            cyan: Color::Rgb(0x44, 0xDD, 0xFF),
            selection_bg: Color::Rgb(0x3D, 0x14, 0x38),
            search_match_bg: Color::Rgb(0x40, 0xE0, 0xD0),
            search_match_fg: Color::Rgb(0x0C, 0x00, 0x1B),
        }
    }
}

/// Parse a hex color string like "#FF4444" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim().strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let r = u8::from_str_radix(hex.get(0..2)?, 16).ok()?;
    let g = u8::from_str_radix(hex.get(2..4)?, 16).ok()?;
    let b = u8::from_str_radix(hex.get(4..6)?, 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

impl Theme {
    /// Build the theme for a site. Brand accents come from the site config;
    /// `[ui.colors]` overrides win over both the defaults and the brand.
    pub fn for_site(site: &SiteConfig, ui: &UiConfig) -> Self {
        let mut theme = Theme::default();

        if let Some(color) = parse_hex_color(&site.primary_color) {
            theme.primary = color;
        }
        if let Some(color) = parse_hex_color(&site.secondary_color) {
            theme.secondary = color;
        }

        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "primary" => theme.primary = color,
                "secondary" => theme.secondary = color,
                "dim" => theme.dim = color,
                "red" => theme.red = color,
                "yellow" => theme.yellow = color,
                "green" => theme.green = color,
                "cyan" => theme.cyan = color,
                "selection_bg" => theme.selection_bg = color,
                "search_match_bg" => theme.search_match_bg = color,
                "search_match_fg" => theme.search_match_fg = color,
                _ => {}
            }
        }

        theme
    }

    /// Badge color for a post category
    pub fn category_color(&self, category: Category) -> Color {
        match category {
            Category::Event => self.primary,
            Category::Notice => self.yellow,
            Category::Guide => self.cyan,
        }
    }

    pub fn status_color(&self, status: InquiryStatus) -> Color {
        match status {
            InquiryStatus::Pending => self.yellow,
            InquiryStatus::Completed => self.green,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#8A2BE2"),
            Some(Color::Rgb(0x8A, 0x2B, 0xE2))
        );
        assert_eq!(
            parse_hex_color(" #0c001b "),
            Some(Color::Rgb(0x0C, 0x00, 0x1B))
        );
        assert_eq!(parse_hex_color("8A2BE2"), None); // missing #
        assert_eq!(parse_hex_color("#FF44"), None); // too short
        assert_eq!(parse_hex_color("#ZZZZZZ"), None); // invalid hex
        assert_eq!(parse_hex_color("#ééé"), None); // non-ASCII
    }

    #[test]
    fn test_brand_colors_follow_site_config() {
        let mut site = SiteConfig::default();
        site.primary_color = "#112233".into();
        site.secondary_color = "not a color".into();

        let theme = Theme::for_site(&site, &UiConfig::default());
        assert_eq!(theme.primary, Color::Rgb(0x11, 0x22, 0x33));
        // Unparseable brand color keeps the default
        assert_eq!(theme.secondary, Theme::default().secondary);
    }

    #[test]
    fn test_ui_overrides_win() {
        let mut ui = UiConfig::default();
        ui.colors.insert("background".into(), "#000000".into());
        ui.colors.insert("primary".into(), "#FFFFFF".into());
        ui.colors.insert("unknown_slot".into(), "#123456".into());

        let theme = Theme::for_site(&SiteConfig::default(), &ui);
        assert_eq!(theme.background, Color::Rgb(0, 0, 0));
        assert_eq!(theme.primary, Color::Rgb(0xFF, 0xFF, 0xFF));
        // Unchanged defaults still present
        assert_eq!(theme.text, Color::Rgb(0xB0, 0xAA, 0xFF));
    }

    #[test]
    fn test_status_and_category_colors() {
        let theme = Theme::default();
        assert_eq!(theme.status_color(InquiryStatus::Pending), theme.yellow);
        assert_eq!(theme.status_color(InquiryStatus::Completed), theme.green);
        assert_eq!(theme.category_color(Category::Event), theme.primary);
    }
}
