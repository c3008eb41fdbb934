//! Locating and registering the bundled icon fonts.
//!
//! The glyphs come from two Font Awesome files shipped next to the
//! launcher.  They are made visible to Pango by writing a small fontconfig
//! file that includes the system configuration plus the bundle directory,
//! and pointing `FONTCONFIG_FILE` at it.  This has to happen before GTK
//! initialises, since fontconfig reads its configuration once.
//!
//! Failure is never fatal: tiles then show missing-glyph boxes.

use log::{debug, info};
use std::path::{Path, PathBuf};

/// Directory name under `share/` for bundled assets.
const APP_DIR: &str = "sv-dashboard";

/// Font directory override variable.
pub const FONT_DIR_VAR: &str = "SV_DASHBOARD_FONT_DIR";

/// Finds and registers the bundled fonts.
#[derive(Debug, Default)]
pub struct FontRegistry {
    dir_override: Option<PathBuf>,
}

/// What a successful registration did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub font_dir: PathBuf,
    pub fonts: Vec<PathBuf>,
    pub fontconfig_file: PathBuf,
}

impl FontRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `dir` instead of searching.
    pub fn with_font_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir_override: Some(dir.into()),
        }
    }

    /// Candidate font directories, most specific first.
    pub fn candidates(&self) -> Vec<PathBuf> {
        let mut out = Vec::new();
        if let Some(dir) = &self.dir_override {
            out.push(dir.clone());
        }
        if let Some(dir) = std::env::var_os(FONT_DIR_VAR).filter(|v| !v.is_empty()) {
            out.push(PathBuf::from(dir));
        }
        out.push(PathBuf::from("assets/fonts"));
        if let Some(exe_dir) = exe_dir() {
            out.extend(bundle_dirs(&exe_dir));
        }
        for prefix in ["/usr/local/share", "/usr/share"] {
            out.push(Path::new(prefix).join(APP_DIR).join("fonts"));
        }
        out
    }

    /// The first candidate directory that exists.
    pub fn find_font_dir(&self) -> Option<PathBuf> {
        self.candidates().into_iter().find(|d| d.is_dir())
    }

    /// Register the bundled fonts with fontconfig.
    ///
    /// `cache_root` receives the generated `fonts.conf` and the private
    /// fontconfig cache.
    pub fn register(&self, cache_root: &Path) -> Result<Registration, FontError> {
        let font_dir = self
            .find_font_dir()
            .ok_or_else(|| FontError("no font directory found".into()))?;
        let fonts = font_files(&font_dir)?;
        if fonts.is_empty() {
            return Err(FontError(format!("no .ttf/.otf files in {}", font_dir.display())));
        }
        debug!("found {} font file(s) in {}", fonts.len(), font_dir.display());

        let font_dir = font_dir.canonicalize().unwrap_or(font_dir);
        let conf_dir = cache_root.join("fontconfig");
        let cache_dir = conf_dir.join("cache");
        std::fs::create_dir_all(&cache_dir)
            .map_err(|e| FontError(format!("create {}: {}", cache_dir.display(), e)))?;

        let base = std::env::var_os("FONTCONFIG_FILE")
            .map(PathBuf::from)
            .filter(|p| p.is_file())
            .unwrap_or_else(|| PathBuf::from("/etc/fonts/fonts.conf"));

        let fontconfig_file = conf_dir.join("fonts.conf");
        std::fs::write(&fontconfig_file, fonts_conf(&base, &font_dir, &cache_dir))
            .map_err(|e| FontError(format!("write {}: {}", fontconfig_file.display(), e)))?;

        std::env::set_var("FONTCONFIG_FILE", &fontconfig_file);
        info!(
            "registered {} font(s) from {} via {}",
            fonts.len(),
            font_dir.display(),
            fontconfig_file.display()
        );

        Ok(Registration {
            font_dir,
            fonts,
            fontconfig_file,
        })
    }
}

/// Directory of the running executable.
pub fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
}

/// Bundle layouts relative to the executable directory.
pub fn bundle_dirs(exe_dir: &Path) -> Vec<PathBuf> {
    vec![
        exe_dir.join("share").join(APP_DIR).join("fonts"),
        exe_dir.join("..").join("share").join(APP_DIR).join("fonts"),
        exe_dir.join("fonts"),
    ]
}

/// `.ttf` / `.otf` files directly inside `dir`, sorted.
pub fn font_files(dir: &Path) -> Result<Vec<PathBuf>, FontError> {
    let entries =
        std::fs::read_dir(dir).map_err(|e| FontError(format!("read {}: {}", dir.display(), e)))?;
    let mut out: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("ttf") || e.eq_ignore_ascii_case("otf"))
                .unwrap_or(false)
        })
        .collect();
    out.sort();
    Ok(out)
}

/// Render a fontconfig file that layers `font_dir` over `base`.
pub fn fonts_conf(base: &Path, font_dir: &Path, cache_dir: &Path) -> String {
    format!(
        r#"<?xml version="1.0"?>
<!DOCTYPE fontconfig SYSTEM "fonts.dtd">
<fontconfig>
  <include ignore_missing="yes">{}</include>
  <dir>{}</dir>
  <cachedir>{}</cachedir>
</fontconfig>
"#,
        xml_escape(&base.to_string_lossy()),
        xml_escape(&font_dir.to_string_lossy()),
        xml_escape(&cache_dir.to_string_lossy()),
    )
}

fn xml_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Error from font discovery or registration.
#[derive(Debug, thiserror::Error)]
#[error("font registration: {0}")]
pub struct FontError(String);
