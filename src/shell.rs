//! The launcher's interaction state and event dispatch.
//!
//! [`LauncherShell`] owns everything that changes while the launcher runs:
//! the visible page, the active scheme, the current scale and the gesture
//! in flight.  Each input class (resize, pointer, key, tile click) has one
//! dispatch method that returns whether the event was [`Handled`], and
//! describes any visual consequence as a [`ViewEvent`] sent over the
//! attached channel.

use crate::catalog::IconConfig;
use crate::config::Config;
use crate::gesture::{PageStep, Point, SwipeRecognizer};
use crate::launch::LaunchRequest;
use crate::scale::{Rescaler, UiScale};
use crate::theme::{build_css, Scheme};
use crate::traits::{Spawner, ViewEvent};
use log::{debug, info};
use std::sync::mpsc;
use std::time::Instant;

/// Whether a dispatch method acted on its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event was used and must not propagate further.
    Consumed,
    /// The event is not ours; let the toolkit continue with it.
    Ignored,
}

impl Handled {
    pub fn is_consumed(self) -> bool {
        self == Handled::Consumed
    }
}

/// Keys the launcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    PageUp,
    PageDown,
    Digit(u32),
    Other,
}

/// Pointer / touch input, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { at: Point, time: Instant },
    Motion { at: Point },
    Release { at: Point, time: Instant },
    Cancel,
}

/// Possible errors from the shell.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("no tile {index} on page {page}")]
    UnknownTile { page: usize, index: usize },
    #[error("tile {0:?} has no command")]
    NoCommand(String),
    #[error("launch failed: {0}")]
    Launch(String),
}

/// Launcher state plus dispatch.
///
/// Generic over the [`Spawner`] so tests can observe launches.
pub struct LauncherShell<S: Spawner> {
    catalog: IconConfig,
    spawner: S,
    page: usize,
    scheme: Scheme,
    rescaler: Rescaler,
    swipe: SwipeRecognizer,
    view_tx: Option<mpsc::Sender<ViewEvent>>,
}

impl<S: Spawner> LauncherShell<S> {
    /// Create a shell on the first page with the configured scheme.
    pub fn new(catalog: IconConfig, config: &Config, spawner: S) -> Self {
        Self {
            catalog,
            spawner,
            page: 0,
            scheme: config.window.scheme,
            rescaler: Rescaler::new(config.scale.clone()),
            swipe: SwipeRecognizer::new(config.gestures.clone()),
            view_tx: None,
        }
    }

    /// Attach the channel the view listens on.
    pub fn set_view(&mut self, tx: mpsc::Sender<ViewEvent>) {
        self.view_tx = Some(tx);
    }

    pub fn catalog(&self) -> &IconConfig {
        &self.catalog
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.catalog.pages().len()
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn scale(&self) -> UiScale {
        self.rescaler.current()
    }

    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// The full style sheet for the current scheme and scale.
    pub fn css(&self) -> String {
        build_css(self.scheme, &self.scale(), &self.catalog.palette)
    }

    /// Send the complete current state to the view.
    pub fn sync_view(&self) {
        self.emit(ViewEvent::Rescale(self.scale()));
        self.emit(ViewEvent::Restyle(self.css()));
        self.emit(ViewEvent::SchemeChanged(self.scheme));
        self.emit_page();
    }

    //  Pages

    /// Show page `index`.  Out-of-range indices are clamped; returns
    /// whether the visible page changed.
    pub fn show_page(&mut self, index: usize) -> bool {
        let target = index.min(self.page_count().saturating_sub(1));
        if target == self.page {
            return false;
        }
        info!("page {} -> {}", self.page + 1, target + 1);
        self.page = target;
        self.emit_page();
        true
    }

    /// Move one page in `step`'s direction.  No-op at the boundary.
    pub fn go(&mut self, step: PageStep) -> bool {
        match step {
            PageStep::Next => self.show_page(self.page + 1),
            PageStep::Previous => match self.page.checked_sub(1) {
                Some(prev) => self.show_page(prev),
                None => false,
            },
        }
    }

    //  Scheme

    /// Switch scheme and re-apply the whole style sheet.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        info!("scheme {}", scheme);
        self.scheme = scheme;
        self.emit(ViewEvent::SchemeChanged(scheme));
        self.emit(ViewEvent::Restyle(self.css()));
    }

    //  Dispatch

    /// The window's content area is now `width` × `height`.
    pub fn handle_resize(&mut self, width: f64, height: f64) -> Handled {
        match self.rescaler.update(width, height) {
            Some(ui) => {
                debug!(
                    "rescale {}x{} -> s={:.3} labels={}",
                    width, height, ui.s, ui.show_labels
                );
                self.emit(ViewEvent::Rescale(ui));
                self.emit(ViewEvent::Restyle(self.css()));
                Handled::Consumed
            }
            None => Handled::Ignored,
        }
    }

    /// Feed one pointer event through the swipe recogniser.
    ///
    /// Returns [`Handled::Consumed`] while the drag is locked into a swipe,
    /// including its release, so the tile below never sees the click.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Handled {
        match event {
            PointerEvent::Press { at, time } => {
                self.swipe.press(at, time);
                Handled::Ignored
            }
            PointerEvent::Motion { at } => {
                if self.swipe.motion(at) {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            PointerEvent::Release { at, time } => {
                let outcome = self.swipe.release(at, time);
                if let Some(step) = outcome.step {
                    debug!("swipe {:?}", step);
                    self.go(step);
                }
                if outcome.consumed {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            PointerEvent::Cancel => {
                self.swipe.cancel();
                Handled::Ignored
            }
        }
    }

    /// Arrow / page keys flip pages; 1, 2, 3 pick a scheme.
    pub fn handle_key(&mut self, key: Key) -> Handled {
        match key {
            Key::Right | Key::PageDown => {
                self.go(PageStep::Next);
                Handled::Consumed
            }
            Key::Left | Key::PageUp => {
                self.go(PageStep::Previous);
                Handled::Consumed
            }
            Key::Digit(n) => match Scheme::from_digit(n) {
                Some(scheme) => {
                    self.set_scheme(scheme);
                    Handled::Consumed
                }
                None => Handled::Ignored,
            },
            Key::Other => Handled::Ignored,
        }
    }

    /// A tile was clicked: launch its command.
    ///
    /// Ignored while a locked swipe is in flight.
    pub fn activate_tile(&mut self, page: usize, index: usize) -> Result<Handled, ShellError> {
        if self.swipe.is_locked() {
            debug!("tile {}/{} click suppressed by swipe", page, index);
            return Ok(Handled::Ignored);
        }
        let spec = self
            .catalog
            .tile(page, index)
            .ok_or(ShellError::UnknownTile { page, index })?;
        let request = LaunchRequest::resolve(&spec.command, &spec.args)
            .ok_or_else(|| ShellError::NoCommand(spec.label.clone()))?;

        info!("launch {:?}: {} {:?}", spec.label, request.program, request.args);
        self.spawner
            .spawn(&request)
            .map_err(|e| ShellError::Launch(e.to_string()))?;
        Ok(Handled::Consumed)
    }

    //  internals

    fn emit_page(&self) {
        self.emit(ViewEvent::ShowPage {
            index: self.page,
            can_prev: self.page > 0,
            can_next: self.page + 1 < self.page_count(),
        });
    }

    fn emit(&self, event: ViewEvent) {
        if let Some(tx) = &self.view_tx {
            let _ = tx.send(event);
        }
    }
}
