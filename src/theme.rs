//! Site themes and their colour palettes
//! Overrides are read from ~/.config/tuskblocks/palette.conf

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteTheme {
    #[default]
    Default,
    Dark,
    Minimal,
    Gradient,
    Neon,
    Corporate,
    Warm,
    Cool,
}

impl SiteTheme {
    pub const ALL: [SiteTheme; 8] = [
        Self::Default,
        Self::Dark,
        Self::Minimal,
        Self::Gradient,
        Self::Neon,
        Self::Corporate,
        Self::Warm,
        Self::Cool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Dark => "dark",
            Self::Minimal => "minimal",
            Self::Gradient => "gradient",
            Self::Neon => "neon",
            Self::Corporate => "corporate",
            Self::Warm => "warm",
            Self::Cool => "cool",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn palette(self) -> Palette {
        let p = |bg, surface, text, muted, primary, accent| Palette {
            background: bg,
            surface,
            text,
            muted,
            primary,
            accent,
            danger: Rgb(0xf4, 0x43, 0x36),
            success: Rgb(0x4c, 0xaf, 0x50),
            warning: Rgb(0xff, 0x98, 0x00),
        };
        match self {
            Self::Default => p(
                Rgb(0xf5, 0xf7, 0xfa),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0x2c, 0x3e, 0x50),
                Rgb(0x66, 0x66, 0x66),
                Rgb(0x66, 0x7e, 0xea),
                Rgb(0x76, 0x4b, 0xa2),
            ),
            Self::Dark => p(
                Rgb(0x1a, 0x1a, 0x1a),
                Rgb(0x2d, 0x2d, 0x2d),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xbd, 0xc3, 0xc7),
                Rgb(0x00, 0xff, 0x88),
                Rgb(0x66, 0x7e, 0xea),
            ),
            Self::Minimal => p(
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xf8, 0xf9, 0xfa),
                Rgb(0x21, 0x25, 0x29),
                Rgb(0x6c, 0x75, 0x7d),
                Rgb(0x21, 0x25, 0x29),
                Rgb(0x49, 0x50, 0x57),
            ),
            Self::Gradient => p(
                Rgb(0x66, 0x7e, 0xea),
                Rgb(0x76, 0x4b, 0xa2),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xe0, 0xe0, 0xff),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xf0, 0x93, 0xfb),
            ),
            Self::Neon => p(
                Rgb(0x0a, 0x0a, 0x0a),
                Rgb(0x00, 0x14, 0x28),
                Rgb(0x00, 0xff, 0x88),
                Rgb(0x00, 0xaa, 0x5c),
                Rgb(0x00, 0xff, 0x88),
                Rgb(0xff, 0x00, 0x80),
            ),
            Self::Corporate => p(
                Rgb(0x1e, 0x3c, 0x72),
                Rgb(0x2a, 0x52, 0x98),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xc8, 0xd6, 0xe5),
                Rgb(0x4a, 0x90, 0xe2),
                Rgb(0xf5, 0xa6, 0x23),
            ),
            Self::Warm => p(
                Rgb(0xff, 0x9a, 0x56),
                Rgb(0xff, 0xad, 0x56),
                Rgb(0x3d, 0x2c, 0x1e),
                Rgb(0x6d, 0x4c, 0x41),
                Rgb(0xd3, 0x54, 0x00),
                Rgb(0xc0, 0x39, 0x2b),
            ),
            Self::Cool => p(
                Rgb(0x74, 0xb9, 0xff),
                Rgb(0x09, 0x84, 0xe3),
                Rgb(0xff, 0xff, 0xff),
                Rgb(0xdf, 0xe6, 0xe9),
                Rgb(0x00, 0xce, 0xc9),
                Rgb(0x6c, 0x5c, 0xe7),
            ),
        }
    }
}

impl fmt::Display for SiteTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteTheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown theme '{}'", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Color::Rgb(c.0, c.1, c.2)
    }
}

/// Named colours of one theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub surface: Rgb,
    pub text: Rgb,
    pub muted: Rgb,
    pub primary: Rgb,
    pub accent: Rgb,
    pub danger: Rgb,
    pub success: Rgb,
    pub warning: Rgb,
}

impl Palette {
    const KEYS: [&'static str; 9] = [
        "background",
        "surface",
        "text",
        "muted",
        "primary",
        "accent",
        "danger",
        "success",
        "warning",
    ];

    fn slot(&mut self, key: &str) -> Option<&mut Rgb> {
        Some(match key {
            "background" => &mut self.background,
            "surface" => &mut self.surface,
            "text" => &mut self.text,
            "muted" => &mut self.muted,
            "primary" => &mut self.primary,
            "accent" => &mut self.accent,
            "danger" => &mut self.danger,
            "success" => &mut self.success,
            "warning" => &mut self.warning,
            _ => return None,
        })
    }

    fn get(&self, key: &str) -> Option<Rgb> {
        Some(match key {
            "background" => self.background,
            "surface" => self.surface,
            "text" => self.text,
            "muted" => self.muted,
            "primary" => self.primary,
            "accent" => self.accent,
            "danger" => self.danger,
            "success" => self.success,
            "warning" => self.warning,
            _ => return None,
        })
    }

    /// Apply `key #hex` overrides. Unknown keys are ignored.
    pub fn with_overrides(mut self, overrides: &HashMap<String, Rgb>) -> Self {
        for (key, color) in overrides {
            match self.slot(key) {
                Some(slot) => *slot = *color,
                None => tracing::debug!("Ignoring unknown palette key: {}", key),
            }
        }
        self
    }

    /// CSS custom properties for a `style` attribute.
    pub fn css_vars(&self) -> String {
        Self::KEYS
            .iter()
            .filter_map(|k| self.get(k).map(|c| format!("--tusk-{}: {};", k, c.hex())))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Playground colours derived from a palette
#[derive(Debug, Clone)]
pub struct Theme {
    pub accent: Color,
    pub danger: Color,
    pub success: Color,
    pub warning: Color,
    pub text: Color,
    pub text_dim: Color,
    pub bg_selected: Color,
    pub inactive: Color,
    pub header: Color,
}

impl Theme {
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            accent: p.primary.into(),
            danger: p.danger.into(),
            success: p.success.into(),
            warning: p.warning.into(),
            text: p.text.into(),
            text_dim: p.muted.into(),
            bg_selected: p.surface.into(),
            inactive: Color::Rgb(89, 89, 89),
            header: p.accent.into(),
        }
    }
}

/// Palette of `site` with the user's overrides applied.
pub fn load_palette(site: SiteTheme) -> Palette {
    let base = site.palette();
    let Some(path) = palette_conf_path() else {
        return base;
    };
    match read_overrides(&path) {
        Some(overrides) => base.with_overrides(&overrides),
        None => base,
    }
}

fn palette_conf_path() -> Option<std::path::PathBuf> {
    Some(dirs::config_dir()?.join("tuskblocks").join("palette.conf"))
}

fn read_overrides(path: &Path) -> Option<HashMap<String, Rgb>> {
    let content = fs::read_to_string(path).ok()?;
    let colors = parse_palette_conf(&content);
    if colors.is_empty() {
        return None;
    }
    Some(colors)
}

/// Parse `key #hexcolor` lines, skipping comments and blanks
pub fn parse_palette_conf(content: &str) -> HashMap<String, Rgb> {
    let mut colors = HashMap::new();

    for line in content.lines() {
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.splitn(2, char::is_whitespace).collect();
        if parts.len() == 2 {
            let key = parts[0].trim();
            let value = parts[1].trim();

            if let Some(color) = parse_hex_color(value) {
                colors.insert(key.to_string(), color);
            }
        }
    }

    colors
}

/// Parse a hex color string (#RRGGBB or #RGB)
pub fn parse_hex_color(s: &str) -> Option<Rgb> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return None;
    }

    if s.len() == 6 {
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Rgb(r, g, b))
    } else if s.len() == 3 {
        let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
        let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
        let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
        Some(Rgb(r, g, b))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#ff8800"), Some(Rgb(255, 136, 0)));
        assert_eq!(parse_hex_color("#f80"), Some(Rgb(255, 136, 0)));
        assert_eq!(parse_hex_color("nope"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn test_parse_palette_conf() {
        let conf = "# my colours\nprimary #112233\n\naccent   #abc\nbogus value\n";
        let colors = parse_palette_conf(conf);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors["primary"], Rgb(0x11, 0x22, 0x33));
        assert_eq!(colors["accent"], Rgb(0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn test_overrides_and_css_vars() {
        let mut overrides = HashMap::new();
        overrides.insert("primary".to_string(), Rgb(1, 2, 3));
        overrides.insert("unknown".to_string(), Rgb(9, 9, 9));
        let p = SiteTheme::Neon.palette().with_overrides(&overrides);
        assert_eq!(p.primary, Rgb(1, 2, 3));

        let css = p.css_vars();
        assert!(css.contains("--tusk-primary: #010203;"));
        assert!(css.contains("--tusk-background: #0a0a0a;"));
    }

    #[test]
    fn test_theme_names_roundtrip() {
        for t in SiteTheme::ALL {
            assert_eq!(t.as_str().parse::<SiteTheme>(), Ok(t));
        }
        assert!("plaid".parse::<SiteTheme>().is_err());
        assert_eq!(SiteTheme::Cool.next(), SiteTheme::Default);
    }
}
