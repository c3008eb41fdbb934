//! Toolkit front-ends for the launcher shell.
//!
//! When the `view-gtk` feature is enabled, [`gtk::run_main_loop`] takes
//! over the main thread, builds the window and routes every toolkit
//! callback into the [`LauncherShell`](crate::shell::LauncherShell).

#[cfg(feature = "view-gtk")]
pub mod gtk;
