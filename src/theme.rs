//! Colour schemes and style sheet generation.
//!
//! The style sheet is always generated whole: a shared base, the
//! scale-dependent geometry, then the block for the active [`Scheme`].
//!
//! # CSS selectors
//!
//! | Selector                 | Targets                                     |
//! |--------------------------|---------------------------------------------|
//! | `window`                 | The launcher window (black)                 |
//! | `.tile`                  | Tile button (frameless)                     |
//! | `.tile-icon-box`         | Square behind the glyph                     |
//! | `.tile-icon-box.bg-*`    | Day-scheme background per colour class      |
//! | `.tile-icon`             | Glyph label (`.brand` for the brands font)  |
//! | `.tile-label`            | Text under the glyph                        |
//! | `.nav`                   | Previous / next chevrons                    |
//! | `.scheme-btn`            | Scheme buttons (`.active` when selected)    |

use crate::layout::{ChromeLayout, TileLayout};
use crate::scale::UiScale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Write};

/// Font family for solid glyphs.
pub const FAMILY_FREE: &str = "Font Awesome 6 Free";
/// Font family for brand logos.
pub const FAMILY_BRANDS: &str = "Font Awesome 6 Brands";

/// Monochrome accent of the Night scheme.
pub const NIGHT_ACCENT: &str = "#d00000";

const ICON_BOX_RADIUS_BASE: i32 = 16;

/// A named colour preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Coloured squares, white glyphs.
    #[default]
    Day,
    /// Light gray on black.
    Dusk,
    /// Red on black, for night vision.
    Night,
}

impl Scheme {
    pub const ALL: [Scheme; 3] = [Scheme::Day, Scheme::Dusk, Scheme::Night];

    /// Scheme bound to digit key `n` (1, 2, 3).
    pub fn from_digit(n: u32) -> Option<Scheme> {
        match n {
            1 => Some(Scheme::Day),
            2 => Some(Scheme::Dusk),
            3 => Some(Scheme::Night),
            _ => None,
        }
    }

    /// Symbol on the scheme button.
    pub fn symbol(self) -> &'static str {
        match self {
            Scheme::Day => "☀",
            Scheme::Dusk => "☼",
            Scheme::Night => "☾",
        }
    }

    /// CSS class of the scheme button.
    pub fn css_class(self) -> &'static str {
        match self {
            Scheme::Day => "scheme-day",
            Scheme::Dusk => "scheme-dusk",
            Scheme::Night => "scheme-night",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Day => write!(f, "day"),
            Scheme::Dusk => write!(f, "dusk"),
            Scheme::Night => write!(f, "night"),
        }
    }
}

const BASE_CSS: &str = r#"
window,
window.background {
    background: #000000;
}

.tile {
    background: transparent;
    border: none;
    box-shadow: none;
    padding: 0;
}

.scheme-btn {
    background: transparent;
    border: none;
    box-shadow: none;
    padding: 0 8px;
    opacity: 0.65;
}
.scheme-btn:focus { outline: none; }
.scheme-btn.active { opacity: 1.0; }

.scheme-day   { color: #d4b000; }
.scheme-dusk  { color: #b0b0b0; }
.scheme-night { color: #d00000; }

.nav {
    background: transparent;
    border: none;
    box-shadow: none;
}
"#;

/// Build the complete style sheet for `scheme` at scale `ui`.
///
/// `palette` maps colour classes to CSS colours; only the Day scheme uses
/// it.
pub fn build_css(scheme: Scheme, ui: &UiScale, palette: &BTreeMap<String, String>) -> String {
    let tile = TileLayout::for_scale(ui);
    let chrome = ChromeLayout::for_scale(ui);
    let radius = ui.px(ICON_BOX_RADIUS_BASE, 2);

    let mut css = String::with_capacity(4096);
    css.push_str(BASE_CSS);

    // Writing into a String cannot fail.
    let _ = write!(
        css,
        r#"
.tile-icon {{
    font-family: "{free}";
    font-weight: 900;
    font-size: {icon}px;
}}
.tile-icon.brand {{
    font-family: "{brands}";
    font-weight: 400;
}}
.tile-label {{
    font-family: Sans;
    font-size: {label}px;
}}
.nav {{
    font-family: "{free}";
    font-weight: 900;
    font-size: {nav}px;
}}
.scheme-btn label {{ font-size: {scheme}px; }}

.tile-icon-box {{
    padding: {pad}px;
    border-radius: {radius}px;
}}
"#,
        free = FAMILY_FREE,
        brands = FAMILY_BRANDS,
        icon = tile.icon_px,
        label = tile.label_px,
        nav = chrome.nav_px,
        scheme = chrome.scheme_px,
        pad = tile.pad,
        radius = radius,
    );

    match scheme {
        Scheme::Day => {
            css.push_str(
                r#"
.tile-icon, .tile-label, .nav { color: #f2f2f2; }
.tile-icon-box {
    color: #ffffff;
    background: #2b2b2b;
}
"#,
            );
            for (class, colour) in palette {
                let _ = writeln!(css, ".tile-icon-box.{} {{ background: {}; }}", class, colour);
            }
        }
        Scheme::Dusk => css.push_str(
            r#"
.tile-icon { color: #e6e6e6; }
.tile-label, .nav { color: #c8c8c8; }
.tile-icon-box { background: transparent; }
"#,
        ),
        Scheme::Night => {
            let _ = write!(
                css,
                r#"
.tile-icon, .tile-label, .nav {{ color: {accent}; }}
.tile-icon-box {{ background: transparent; }}
"#,
                accent = NIGHT_ACCENT,
            );
        }
    }

    css
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::IconConfig;

    fn palette() -> BTreeMap<String, String> {
        IconConfig::builtin().palette
    }

    #[test]
    fn day_has_one_rule_per_palette_class() {
        let css = build_css(Scheme::Day, &UiScale::FULL, &palette());
        for (class, colour) in palette() {
            let rule = format!(".tile-icon-box.{} {{ background: {}; }}", class, colour);
            assert!(css.contains(&rule), "missing {}", rule);
        }
        assert!(css.contains("color: #f2f2f2"));
    }

    #[test]
    fn night_is_monochrome_without_backgrounds() {
        let css = build_css(Scheme::Night, &UiScale::FULL, &palette());
        assert!(css.contains(".tile-icon, .tile-label, .nav { color: #d00000; }"));
        assert!(!css.contains(".tile-icon-box.bg-"));
        assert!(css.contains(".tile-icon-box { background: transparent; }"));
        assert!(!css.contains("#f2f2f2"));
    }

    #[test]
    fn dusk_ignores_palette() {
        let css = build_css(Scheme::Dusk, &UiScale::FULL, &palette());
        assert!(!css.contains(".tile-icon-box.bg-"));
        assert!(css.contains("color: #e6e6e6"));
        assert!(css.contains("color: #c8c8c8"));
    }

    #[test]
    fn geometry_is_independent_of_scheme() {
        let ui = UiScale {
            s: 0.7,
            show_labels: true,
        };
        let geometry = |css: &str| -> Vec<String> {
            css.lines()
                .filter(|l| l.contains("font-size") || l.contains("padding:") || l.contains("border-radius"))
                .map(str::to_string)
                .collect()
        };
        let day = geometry(&build_css(Scheme::Day, &ui, &palette()));
        let night = geometry(&build_css(Scheme::Night, &ui, &palette()));
        assert_eq!(day, night);
    }

    #[test]
    fn geometry_follows_scale() {
        let full = build_css(Scheme::Day, &UiScale::FULL, &palette());
        assert!(full.contains("font-size: 56px;"));
        assert!(full.contains("padding: 14px;"));
        assert!(full.contains("border-radius: 16px;"));

        let half = UiScale {
            s: 0.5,
            show_labels: false,
        };
        let css = build_css(Scheme::Day, &half, &palette());
        assert!(css.contains("font-size: 28px;"));
        assert!(css.contains("padding: 7px;"));
        assert!(css.contains("border-radius: 8px;"));
    }

    #[test]
    fn digit_keys_map_to_schemes() {
        assert_eq!(Scheme::from_digit(1), Some(Scheme::Day));
        assert_eq!(Scheme::from_digit(2), Some(Scheme::Dusk));
        assert_eq!(Scheme::from_digit(3), Some(Scheme::Night));
        assert_eq!(Scheme::from_digit(4), None);
    }

    #[test]
    fn scheme_serde_is_lowercase() {
        let s: Scheme = serde_json::from_str("\"night\"").unwrap();
        assert_eq!(s, Scheme::Night);
        assert_eq!(serde_json::to_string(&Scheme::Dusk).unwrap(), "\"dusk\"");
        assert_eq!(Scheme::Dusk.to_string(), "dusk");
    }
}
