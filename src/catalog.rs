//! The icon catalog: which tiles exist, what they look like, and what they
//! launch.
//!
//! The catalog is read once at startup from a JSON file and never changes
//! afterwards.  Anything that goes wrong while loading it (missing file,
//! malformed JSON, no usable entries) silently yields the built-in
//! [`IconConfig::builtin`] set instead.
//!
//! # File format
//!
//! ```json
//! {
//!   "commands1": [
//!     { "title": "Terminal", "fa": "terminal", "bg": "bg-slate-dark",
//!       "cmd": "x-terminal-emulator", "args": [] }
//!   ],
//!   "commands2": [
//!     { "title": "Radio", "fa": "radio", "bg": "#8E24AA", "cmd": "gqrx" }
//!   ]
//! }
//! ```
//!
//! `fa` is a key into a fixed glyph table (see [`glyph_for`]); `bg` is
//! either a symbolic class (`bg-azure`, `bg-teal`, …) or a literal colour.

use log::{debug, info, warn};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Columns per page.
pub const GRID_COLS: usize = 5;
/// Rows per page.
pub const GRID_ROWS: usize = 3;

/// Glyph shown for `fa` keys missing from the glyph table (question mark).
pub const PLACEHOLDER_GLYPH: char = '\u{f128}';
/// Previous-page chevron.
pub const CHEVRON_LEFT: char = '\u{f053}';
/// Next-page chevron.
pub const CHEVRON_RIGHT: char = '\u{f054}';

/// Background used when an entry has no `bg` key.
const DEFAULT_BG: &str = "#455A64";

/// One launchable tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconSpec {
    pub glyph: char,
    pub label: String,
    /// Render `glyph` with the brands font instead of the solid one.
    pub brand: bool,
    /// CSS class carrying the Day-scheme background (`bg-…`).
    pub color_class: String,
    pub command: String,
    pub args: Vec<String>,
}

impl IconSpec {
    fn new(glyph: char, label: &str, brand: bool, color_class: &str) -> Self {
        Self {
            glyph,
            label: label.to_string(),
            brand,
            color_class: color_class.to_string(),
            command: String::new(),
            args: Vec::new(),
        }
    }

    fn launching(mut self, command: &str, args: &[&str]) -> Self {
        self.command = command.to_string();
        self.args = args.iter().map(|a| a.to_string()).collect();
        self
    }
}

/// Both pages of tiles plus the colour-class palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconConfig {
    pub page1: Vec<IconSpec>,
    pub page2: Vec<IconSpec>,
    /// `color class -> css colour`, ordered so generated CSS is stable.
    pub palette: BTreeMap<String, String>,
}

impl IconConfig {
    /// The tiles in page order.
    pub fn pages(&self) -> [&[IconSpec]; 2] {
        [&self.page1, &self.page2]
    }

    /// Look up the tile at `index` on `page` (both 0-based).
    pub fn tile(&self, page: usize, index: usize) -> Option<&IconSpec> {
        self.pages().get(page).and_then(|p| p.get(index))
    }

    /// Parse a catalog from JSON text.
    ///
    /// Unlike [`load_or_builtin`](Self::load_or_builtin) this reports
    /// errors, and an empty result is returned as-is.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            serde_json::from_str(text).map_err(|e| CatalogError(format!("parse: {}", e)))?;

        let mut palette = BTreeMap::new();
        let page1 = read_page(&file.commands1, &mut palette);
        let page2 = read_page(&file.commands2, &mut palette);
        Ok(Self {
            page1,
            page2,
            palette,
        })
    }

    /// Load a catalog from the JSON file at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| CatalogError(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_json(&text)
            .map_err(|e| CatalogError(format!("{}: {}", path.display(), e.0)))
    }

    /// Load from `path`, substituting [`builtin`](Self::builtin) on any
    /// failure or when both pages come out empty.
    pub fn load_or_builtin(path: &Path) -> Self {
        if !path.exists() {
            debug!("no catalog at {}, using built-in tiles", path.display());
            return Self::builtin();
        }
        match Self::load(path) {
            Ok(cfg) if cfg.page1.is_empty() && cfg.page2.is_empty() => {
                info!("catalog {} has no usable tiles, using built-in tiles", path.display());
                Self::builtin()
            }
            Ok(cfg) => {
                info!(
                    "loaded catalog from {} ({} + {} tiles)",
                    path.display(),
                    cfg.page1.len(),
                    cfg.page2.len()
                );
                cfg
            }
            Err(e) => {
                info!("{}, using built-in tiles", e);
                Self::builtin()
            }
        }
    }

    /// The compiled-in catalog.
    pub fn builtin() -> Self {
        let page1 = vec![
            IconSpec::new('\u{f5a0}', "Freeboard", false, "bg-azure"),
            IconSpec::new('\u{f005}', "Sky", false, "bg-indigo"),
            IconSpec::new('\u{f13d}', "Moorings", false, "bg-blue"),
            IconSpec::new('\u{f2e7}', "Provisioning", false, "bg-slate"),
            IconSpec::new('\u{f5a0}', "AvNav", false, "bg-azure"),
            IconSpec::new('\u{f21a}', "Vessel", false, "bg-blue"),
            IconSpec::new('\u{f013}', "SignalK", false, "bg-teal"),
            IconSpec::new('\u{f120}', "Terminal", false, "bg-slate-dark")
                .launching("x-terminal-emulator", &[]),
            IconSpec::new('\u{f0ae}', "Tasks", false, "bg-slate-dark"),
            IconSpec::new('\u{f07b}', "Files", false, "bg-slate").launching("xdg-open", &["."]),
            IconSpec::new('\u{f8d7}', "Radio", false, "bg-purple"),
            IconSpec::new('\u{f072}', "Drones", false, "bg-indigo"),
            IconSpec::new('\u{f030}', "Web Cam", false, "bg-gray"),
            IconSpec::new('\u{f39f}', "Messenger", true, "bg-blue"),
            IconSpec::new('\u{f39e}', "Social", true, "bg-blue"),
        ];

        let page2 = vec![
            IconSpec::new('\u{f5a0}', "OpenCPN", false, "bg-blue").launching("opencpn", &[]),
            IconSpec::new('\u{f624}', "KIP", false, "bg-teal"),
            IconSpec::new('\u{f5ba}', "Power", false, "bg-teal-light"),
            IconSpec::new('\u{f743}', "GRIB", false, "bg-blue"),
            IconSpec::new('\u{f030}', "Camera", false, "bg-gray"),
            IconSpec::new('\u{f5a0}', "qtVlm", false, "bg-blue"),
            IconSpec::new('\u{f624}', "Instruments", false, "bg-teal"),
            IconSpec::new('\u{f1d8}', "PyPilot", false, "bg-cyan"),
            IconSpec::new('\u{f72e}', "Windy", false, "bg-indigo"),
            IconSpec::new('\u{f0e0}', "Email", false, "bg-blue"),
            IconSpec::new('\u{f001}', "Music", false, "bg-red"),
            IconSpec::new('\u{f167}', "Video", true, "bg-red"),
            IconSpec::new('\u{f011}', "Commands", false, "bg-slate-dark"),
            IconSpec::new('\u{f76c}', "T-Storms", false, "bg-violet"),
            IconSpec::new('\u{f268}', "Chrome", true, "bg-blue")
                .launching("chromium", &["--kiosk"]),
        ];

        let palette = BUILTIN_PALETTE
            .iter()
            .map(|(class, hex)| (class.to_string(), hex.to_string()))
            .collect();

        Self {
            page1,
            page2,
            palette,
        }
    }
}

/// Where the catalog file lives: `$SV_DASHBOARD_CONFIG`, or
/// `$XDG_CONFIG_HOME/sv-dashboard/icons.json`.
pub fn catalog_path() -> PathBuf {
    match std::env::var("SV_DASHBOARD_CONFIG") {
        Ok(p) if !p.is_empty() => PathBuf::from(p),
        _ => crate::config::config_dir().join("icons.json"),
    }
}

//  Glyph table

/// A glyph and whether it comes from the brands font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    pub codepoint: char,
    pub brand: bool,
}

const GLYPHS: &[(&str, char, bool)] = &[
    ("chart", '\u{f5a0}', false),
    ("chart-area", '\u{f5a0}', false),
    ("dashboard", '\u{f624}', false),
    ("tachometer-alt", '\u{f624}', false),
    ("autopilot", '\u{f1d8}', false),
    ("paper-plane", '\u{f1d8}', false),
    ("weather", '\u{f743}', false),
    ("cloud-sun-rain", '\u{f743}', false),
    ("camera", '\u{f030}', false),
    ("race", '\u{f0ac}', false),
    ("flag-checkered", '\u{f0ac}', false),
    ("multimedia", '\u{f001}', false),
    ("music", '\u{f001}', false),
    ("youtube", '\u{f167}', true),
    ("travel", '\u{f6ec}', false),
    ("route", '\u{f6ec}', false),
    ("internet", '\u{f268}', true),
    ("globe", '\u{f268}', true),
    ("email", '\u{f0e0}', false),
    ("envelope", '\u{f0e0}', false),
    ("radio", '\u{f8d7}', false),
    ("broadcast-tower", '\u{f8d7}', false),
    ("sky", '\u{f005}', false),
    ("star", '\u{f005}', false),
    ("buoy", '\u{f13d}', false),
    ("anchor", '\u{f13d}', false),
    ("provisioning", '\u{f2e7}', false),
    ("shopping-basket", '\u{f2e7}', false),
    ("ship", '\u{f21a}', false),
    ("vessel", '\u{f21a}', false),
    ("terminal", '\u{f120}', false),
    ("tasks", '\u{f0ae}', false),
    ("folder", '\u{f07b}', false),
    ("solar", '\u{f5ba}', false),
    ("solar-panel", '\u{f5ba}', false),
    ("drone", '\u{f072}', false),
    ("facebook", '\u{f39e}', true),
    ("school", '\u{f549}', false),
    ("knot", '\u{f6f0}', false),
    ("colreg", '\u{f2c1}', false),
    ("book", '\u{f2c1}', false),
    ("chess", '\u{f439}', false),
];

/// Resolve an `fa` key.  Unknown keys yield [`PLACEHOLDER_GLYPH`].
pub fn glyph_for(name: &str) -> Glyph {
    GLYPHS
        .iter()
        .find(|(key, _, _)| *key == name)
        .map(|&(_, codepoint, brand)| Glyph { codepoint, brand })
        .unwrap_or(Glyph {
            codepoint: PLACEHOLDER_GLYPH,
            brand: false,
        })
}

//  Palette

const BUILTIN_PALETTE: &[(&str, &str)] = &[
    ("bg-azure", "#007ACC"),
    ("bg-blue", "#1976D2"),
    ("bg-teal", "#009688"),
    ("bg-teal-light", "#26A69A"),
    ("bg-cyan", "#06B6D4"),
    ("bg-indigo", "#5C6BC0"),
    ("bg-gray", "#455A64"),
    ("bg-slate", "#556F7B"),
    ("bg-slate-dark", "#546E7A"),
    ("bg-purple", "#8E24AA"),
    ("bg-violet", "#7E22CE"),
    ("bg-red", "#DC2626"),
];

fn builtin_color(class: &str) -> Option<&'static str> {
    BUILTIN_PALETTE
        .iter()
        .find(|(c, _)| *c == class)
        .map(|&(_, hex)| hex)
}

/// Turn a literal colour into a CSS-class-safe slug (`#1976D2` → `hex-1976d2`).
fn slugify_color(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if c == '#' {
            out.push_str("hex-");
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    if out.is_empty() {
        out.push_str("default");
    }
    out
}

/// The CSS class for a `bg` value.
pub fn color_class_for(bg: &str) -> String {
    if bg.starts_with("bg-") {
        bg.to_string()
    } else {
        format!("bg-{}", slugify_color(bg))
    }
}

//  File schema

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CatalogFile {
    commands1: Vec<Value>,
    commands2: Vec<Value>,
}

/// String member of an entry; missing, null or non-string reads as absent.
fn str_member<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Whether a literal `bg` value is safe to place in a style sheet:
/// `#` plus 3, 4, 6 or 8 hex digits, `rgb()`/`rgba()` with numeric
/// arguments, or a bare colour name.
fn is_css_color(value: &str) -> bool {
    if let Some(hex) = value.strip_prefix('#') {
        return matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    let inner = value
        .strip_prefix("rgba(")
        .or_else(|| value.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'));
    if let Some(inner) = inner {
        return !inner.is_empty()
            && inner
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '%' | ' '));
    }
    !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic())
}

fn read_entry(node: &Value, palette: &mut BTreeMap<String, String>) -> Option<IconSpec> {
    let obj = node.as_object()?;
    let fa = str_member(obj, "fa").filter(|fa| !fa.is_empty())?;
    let glyph = glyph_for(fa);

    let mut bg = str_member(obj, "bg").unwrap_or(DEFAULT_BG);
    if !bg.starts_with("bg-") && !is_css_color(bg) {
        warn!("ignoring unsupported colour {:?}", bg);
        bg = DEFAULT_BG;
    }
    let color_class = color_class_for(bg);
    if bg.starts_with("bg-") {
        if let Some(hex) = builtin_color(bg) {
            palette.insert(color_class.clone(), hex.to_string());
        }
    } else {
        palette.insert(color_class.clone(), bg.to_string());
    }

    let args = obj
        .get("args")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).map(str::to_string).collect())
        .unwrap_or_default();

    Some(IconSpec {
        glyph: glyph.codepoint,
        label: str_member(obj, "title").unwrap_or_default().to_string(),
        brand: glyph.brand,
        color_class,
        command: str_member(obj, "cmd").unwrap_or_default().to_string(),
        args,
    })
}

/// Non-object and icon-less entries are skipped.
fn read_page(entries: &[Value], palette: &mut BTreeMap<String, String>) -> Vec<IconSpec> {
    entries
        .iter()
        .filter_map(|node| read_entry(node, palette))
        .collect()
}

/// Error from loading or parsing the icon catalog.
#[derive(Debug, thiserror::Error)]
#[error("catalog error: {0}")]
pub struct CatalogError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_fills_both_pages() {
        let cfg = IconConfig::builtin();
        assert_eq!(cfg.page1.len(), GRID_COLS * GRID_ROWS);
        assert_eq!(cfg.page2.len(), GRID_COLS * GRID_ROWS);
        for spec in cfg.page1.iter().chain(&cfg.page2) {
            assert!(
                cfg.palette.contains_key(&spec.color_class),
                "missing palette entry for {}",
                spec.color_class
            );
        }
    }

    #[test]
    fn parses_entries_in_order() {
        let json = r##"{
            "commands1": [
                { "title": "Term", "fa": "terminal", "bg": "bg-slate-dark",
                  "cmd": "foot", "args": ["-e", "htop"] },
                { "title": "Web", "fa": "globe", "bg": "#1976D2", "cmd": "firefox" }
            ],
            "commands2": [
                { "title": "Tunes", "fa": "music" }
            ]
        }"##;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1.len(), 2);
        assert_eq!(cfg.page2.len(), 1);

        let term = &cfg.page1[0];
        assert_eq!(term.label, "Term");
        assert_eq!(term.glyph, '\u{f120}');
        assert!(!term.brand);
        assert_eq!(term.command, "foot");
        assert_eq!(term.args, vec!["-e", "htop"]);

        let web = &cfg.page1[1];
        assert!(web.brand);
        assert_eq!(web.color_class, "bg-hex-1976d2");
        assert_eq!(cfg.palette.get("bg-hex-1976d2").map(String::as_str), Some("#1976D2"));
        assert_eq!(cfg.palette.get("bg-slate-dark").map(String::as_str), Some("#546E7A"));

        let tunes = &cfg.page2[0];
        assert_eq!(tunes.color_class, "bg-hex-455a64");
        assert!(tunes.command.is_empty());
    }

    #[test]
    fn unknown_fa_key_uses_placeholder() {
        let json = r#"{ "commands1": [ { "title": "Mystery", "fa": "no-such-icon" } ] }"#;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1[0].glyph, PLACEHOLDER_GLYPH);
        assert!(!cfg.page1[0].brand);
    }

    #[test]
    fn entries_without_fa_are_skipped() {
        let json = r#"{ "commands1": [ { "title": "NoIcon" }, { "title": "Ok", "fa": "star" } ] }"#;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1.len(), 1);
        assert_eq!(cfg.page1[0].label, "Ok");
    }

    #[test]
    fn unknown_symbolic_class_gets_no_palette_entry() {
        let json = r#"{ "commands1": [ { "fa": "star", "bg": "bg-chartreuse" } ] }"#;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1[0].color_class, "bg-chartreuse");
        assert!(cfg.palette.is_empty());
    }

    #[test]
    fn slugify_handles_odd_input() {
        assert_eq!(slugify_color("#ABCDEF"), "hex-abcdef");
        assert_eq!(slugify_color("rgb(1, 2, 3)"), "rgb-1-2-3-");
        assert_eq!(slugify_color("!!"), "default");
        assert_eq!(color_class_for("bg-red"), "bg-red");
        assert_eq!(color_class_for("Sea Green"), "bg-sea-green");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(IconConfig::from_json("{ not json").is_err());
        assert!(IconConfig::from_json(r#"{ "commands1": 3 }"#).is_err());
    }

    #[test]
    fn load_or_builtin_falls_back() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert_eq!(IconConfig::load_or_builtin(&missing), IconConfig::builtin());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        assert_eq!(IconConfig::load_or_builtin(&broken), IconConfig::builtin());

        let empty = dir.path().join("empty.json");
        std::fs::write(&empty, r#"{ "commands1": [], "commands2": [] }"#).unwrap();
        assert_eq!(IconConfig::load_or_builtin(&empty), IconConfig::builtin());

        let good = dir.path().join("good.json");
        std::fs::write(&good, r#"{ "commands2": [ { "title": "Only", "fa": "ship" } ] }"#).unwrap();
        let cfg = IconConfig::load_or_builtin(&good);
        assert!(cfg.page1.is_empty());
        assert_eq!(cfg.page2[0].label, "Only");
    }

    #[test]
    fn null_members_read_as_absent() {
        let json = r#"{ "commands1": [
            { "title": null, "fa": "star", "bg": null, "cmd": null, "args": null },
            { "title": "Next", "fa": "ship", "cmd": "opencpn" }
        ] }"#;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1.len(), 2);
        let first = &cfg.page1[0];
        assert!(first.label.is_empty());
        assert!(first.command.is_empty());
        assert!(first.args.is_empty());
        assert_eq!(first.color_class, "bg-hex-455a64");
        assert_eq!(cfg.page1[1].command, "opencpn");
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let json = r#"{ "commands1": [
            "junk", 7, null, [1, 2],
            { "title": "Kept", "fa": "star", "args": ["-a", 3, "-b"] }
        ] }"#;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1.len(), 1);
        assert_eq!(cfg.page1[0].label, "Kept");
        assert_eq!(cfg.page1[0].args, vec!["-a", "-b"]);
    }

    #[test]
    fn unsafe_colours_fall_back_to_default() {
        let json = r##"{ "commands1": [
            { "fa": "star", "bg": "red; } window { background: url(x)" },
            { "fa": "ship", "bg": "rgb(10, 20, 30)" },
            { "fa": "music", "bg": "#12345" },
            { "fa": "globe", "bg": "teal" }
        ] }"##;
        let cfg = IconConfig::from_json(json).unwrap();
        assert_eq!(cfg.page1[0].color_class, "bg-hex-455a64");
        assert_eq!(cfg.page1[1].color_class, "bg-rgb-10-20-30-");
        assert_eq!(cfg.page1[2].color_class, "bg-hex-455a64");
        assert_eq!(cfg.page1[3].color_class, "bg-teal");
        for colour in cfg.palette.values() {
            assert!(!colour.contains(['{', '}', ';']), "unsafe colour {:?}", colour);
        }
    }

    #[test]
    fn css_colour_check() {
        assert!(is_css_color("#abc"));
        assert!(is_css_color("#A1B2C3D4"));
        assert!(is_css_color("rgba(0, 0, 0, 0.5)"));
        assert!(is_css_color("navy"));
        assert!(!is_css_color("#ggg"));
        assert!(!is_css_color("rgb()"));
        assert!(!is_css_color("rgb(1,2,3); color: red"));
        assert!(!is_css_color("red }"));
        assert!(!is_css_color(""));
    }

    #[test]
    fn tile_lookup() {
        let cfg = IconConfig::builtin();
        assert_eq!(cfg.tile(0, 0).map(|t| t.label.as_str()), Some("Freeboard"));
        assert_eq!(cfg.tile(1, 14).map(|t| t.label.as_str()), Some("Chrome"));
        assert!(cfg.tile(1, 15).is_none());
        assert!(cfg.tile(2, 0).is_none());
    }
}
