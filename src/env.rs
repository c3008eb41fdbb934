//! Process environment set up before GTK starts.
//!
//! Only fills in variables the user has not set.

use crate::fonts::{bundle_dirs, exe_dir, FONT_DIR_VAR};
use log::debug;
use std::path::Path;

/// Compute the variables to set, given a lookup for the current environment
/// and the executable directory.
pub fn bootstrap_vars<F>(current: F, exe_dir: Option<&Path>) -> Vec<(&'static str, String)>
where
    F: Fn(&str) -> Option<String>,
{
    let is_unset = |key: &str| current(key).map(|v| v.is_empty()).unwrap_or(true);
    let mut vars = Vec::new();

    // No settings daemon on a kiosk.
    if is_unset("GSETTINGS_BACKEND") {
        vars.push(("GSETTINGS_BACKEND", "memory".to_string()));
    }

    if is_unset(FONT_DIR_VAR) {
        if let Some(dir) = exe_dir
            .map(bundle_dirs)
            .and_then(|dirs| dirs.into_iter().find(|d| d.is_dir()))
        {
            vars.push((FONT_DIR_VAR, dir.to_string_lossy().into_owned()));
        }
    }

    vars
}

/// Apply [`bootstrap_vars`] to this process.  Call before any GTK or
/// Pango use, while the process is still single-threaded.
pub fn bootstrap() {
    let exe = exe_dir();
    for (key, value) in bootstrap_vars(|k| std::env::var(k).ok(), exe.as_deref()) {
        debug!("env {}={}", key, value);
        std::env::set_var(key, value);
    }
}

/// Where generated runtime files go: `$XDG_CACHE_HOME/sv-dashboard`.
pub fn cache_root() -> std::path::PathBuf {
    let base = std::env::var("XDG_CACHE_HOME")
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
            format!("{}/.cache", home)
        });
    std::path::PathBuf::from(base).join("sv-dashboard")
}
