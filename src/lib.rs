//! **sv-dashboard** — a kiosk-style tile launcher.
//!
//! Two pages of icon tiles, each starting an external program when
//! clicked.  Pages change by swipe, chevron buttons or arrow keys; three
//! colour schemes (day, dusk, night) switch from the bottom-left buttons or
//! keys `1`–`3`; everything scales down with the window.
//!
//! # Architecture
//!
//! All behaviour lives in toolkit-free modules and is driven through the
//! [`shell::LauncherShell`]:
//!
//! * [`catalog`] — tile definitions loaded from JSON or built in.
//! * [`gesture`] — swipe recognition from raw pointer events.
//! * [`scale`] / [`layout`] — window size → scale factor → pixel sizes.
//! * [`theme`] — scheme + scale → style sheet text.
//! * [`launch`] — detached process spawning.
//! * [`traits`] — the [`Spawner`](traits::Spawner) and
//!   [`TileSurface`](traits::TileSurface) seams and the
//!   [`ViewEvent`](traits::ViewEvent) vocabulary.
//!
//! [`ui`] holds the GTK4 front-end; [`fonts`] and [`env`] prepare the
//! process before it starts.

pub mod catalog;
pub mod config;
pub mod env;
pub mod fonts;
pub mod gesture;
pub mod launch;
pub mod layout;
pub mod scale;
pub mod shell;
pub mod theme;
pub mod traits;
pub mod ui;
