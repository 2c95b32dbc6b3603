use crate::error::QuoteError;
use std::fmt;
use std::str::FromStr;
use tiny_skia::Color;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// `0xRRGGBB`.
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.0, self.1, self.2, 255)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Solid(Rgb),
    /// Painted from the top-left corner to the bottom-right corner.
    Linear(Rgb, Rgb),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeStyle {
    pub background: Background,
    /// Quote content.
    pub primary: Rgb,
    /// Author and source lines.
    pub secondary: Rgb,
    pub display_name: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theme {
    #[default]
    Classic,
    Elegant,
    Warm,
    Modern,
    Gradient,
}

impl Theme {
    pub const ALL: [Theme; 5] = [
        Theme::Classic,
        Theme::Elegant,
        Theme::Warm,
        Theme::Modern,
        Theme::Gradient,
    ];

    /// The identifier used on the command line, in config and in URLs.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Classic => "classic",
            Theme::Elegant => "elegant",
            Theme::Warm => "warm",
            Theme::Modern => "modern",
            Theme::Gradient => "gradient",
        }
    }

    pub fn display_name(self) -> &'static str {
        self.style().display_name
    }

    pub fn style(self) -> ThemeStyle {
        match self {
            Theme::Classic => ThemeStyle {
                background: Background::Solid(Rgb::hex(0xf9fafb)),
                primary: Rgb::hex(0x164e63),
                secondary: Rgb::hex(0x6b7280),
                display_name: "经典",
            },
            Theme::Elegant => ThemeStyle {
                background: Background::Solid(Rgb::hex(0xf8fafc)),
                primary: Rgb::hex(0x0f172a),
                secondary: Rgb::hex(0x475569),
                display_name: "优雅",
            },
            Theme::Warm => ThemeStyle {
                background: Background::Solid(Rgb::hex(0xfef7ed)),
                primary: Rgb::hex(0x9a3412),
                secondary: Rgb::hex(0xa16207),
                display_name: "温暖",
            },
            Theme::Modern => ThemeStyle {
                background: Background::Solid(Rgb::hex(0x18181b)),
                primary: Rgb::hex(0xfafafa),
                secondary: Rgb::hex(0xa1a1aa),
                display_name: "现代",
            },
            Theme::Gradient => ThemeStyle {
                background: Background::Linear(Rgb::hex(0x667eea), Rgb::hex(0x764ba2)),
                primary: Rgb::hex(0xffffff),
                secondary: Rgb::hex(0xe2e8f0),
                display_name: "渐变",
            },
        }
    }

    /// Lenient lookup: unknown names fall back to [`Theme::Classic`].
    pub fn resolve(name: &str) -> Theme {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("Unknown theme '{}', using {}", name, Theme::Classic);
            Theme::Classic
        })
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Theme::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s) || t.display_name() == s)
            .ok_or_else(|| QuoteError::UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_and_display_name() {
        assert_eq!("warm".parse::<Theme>().unwrap(), Theme::Warm);
        assert_eq!("Modern".parse::<Theme>().unwrap(), Theme::Modern);
        assert_eq!("渐变".parse::<Theme>().unwrap(), Theme::Gradient);
        assert!(matches!(
            "neon".parse::<Theme>(),
            Err(QuoteError::UnknownTheme(name)) if name == "neon"
        ));
    }

    #[test]
    fn test_resolve_falls_back_to_classic() {
        assert_eq!(Theme::resolve("neon"), Theme::Classic);
        assert_eq!(Theme::resolve(""), Theme::Classic);
        assert_eq!(Theme::resolve("elegant"), Theme::Elegant);
    }

    #[test]
    fn test_only_gradient_is_linear() {
        for theme in Theme::ALL {
            let linear = matches!(theme.style().background, Background::Linear(..));
            assert_eq!(linear, theme == Theme::Gradient, "{theme}");
        }
    }

    #[test]
    fn test_hex() {
        assert_eq!(Rgb::hex(0x164e63), Rgb(0x16, 0x4e, 0x63));
    }
}
