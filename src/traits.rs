//! Seams that keep the launcher logic independent of any toolkit or OS
//! facility.
//!
//! The [`LauncherShell`](crate::shell::LauncherShell) only talks to the
//! outside world through these traits plus the [`ViewEvent`] channel, so
//! the whole interaction model runs in tests without a display.

use crate::launch::LaunchRequest;
use crate::layout::TileLayout;
use crate::scale::UiScale;
use crate::theme::Scheme;

/// Something that can start an external program without waiting for it.
///
/// The production implementation is
/// [`DetachedSpawner`](crate::launch::DetachedSpawner); tests use a
/// recorder.
pub trait Spawner {
    /// The error type produced by this spawner.
    type Error: std::error::Error + 'static;

    /// Start `request` and return as soon as the child exists.
    fn spawn(&mut self, request: &LaunchRequest) -> Result<(), Self::Error>;
}

/// A rendered tile that can take on new geometry.
///
/// Implemented by the toolkit-specific tile widget; the layout numbers come
/// from [`TileLayout::for_scale`].
pub trait TileSurface {
    fn apply_layout(&self, layout: &TileLayout);
}

/// Updates sent from the shell to whatever is drawing it.
///
/// The shell holds an optional `mpsc::Sender<ViewEvent>`; the view drains
/// the receiver after every dispatch.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    /// Make page `index` visible and update the nav buttons.
    ShowPage {
        index: usize,
        can_prev: bool,
        can_next: bool,
    },
    /// Re-apply geometry for a new scale.
    Rescale(UiScale),
    /// Replace the process-wide style sheet.
    Restyle(String),
    /// Highlight the button for the active scheme.
    SchemeChanged(Scheme),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    /// A test double that records every request instead of spawning.
    #[derive(Debug, Default)]
    struct RecordingSpawner {
        log: Vec<LaunchRequest>,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("recording error")]
    struct RecordingError;

    impl Spawner for RecordingSpawner {
        type Error = RecordingError;

        fn spawn(&mut self, request: &LaunchRequest) -> Result<(), RecordingError> {
            self.log.push(request.clone());
            Ok(())
        }
    }

    #[test]
    fn recording_spawner_records() {
        let mut sp = RecordingSpawner::default();
        let req = LaunchRequest {
            program: "true".into(),
            args: vec![],
        };
        sp.spawn(&req).unwrap();
        assert_eq!(sp.log, vec![req]);
    }

    #[test]
    fn view_events_cross_a_channel() {
        let (tx, rx) = mpsc::channel();
        tx.send(ViewEvent::SchemeChanged(Scheme::Night)).unwrap();
        tx.send(ViewEvent::ShowPage {
            index: 1,
            can_prev: true,
            can_next: false,
        })
        .unwrap();
        let got: Vec<ViewEvent> = rx.try_iter().collect();
        assert_eq!(got.len(), 2);
        assert_eq!(got[0], ViewEvent::SchemeChanged(Scheme::Night));
    }
}
