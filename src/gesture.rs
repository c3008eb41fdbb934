//! Swipe-to-change-page recognition.
//!
//! A single pointer (mouse or one finger) goes down, moves, and comes back
//! up.  [`SwipeRecognizer`] turns that sequence into at most one page-change
//! request without stealing ordinary taps from the tiles underneath.
//!
//! # Lifecycle
//!
//! 1. **press** → remember where and when the drag started.
//! 2. **motion** → once the horizontal travel passes
//!    [`SwipeConfig::lock_px`] and clearly dominates the vertical travel,
//!    the gesture *locks*.  From then on the drag belongs to the swipe and
//!    the view should claim the event sequence so the tile under the
//!    pointer never sees a click.
//! 3. **release** → the release point is treated as a last motion, then the
//!    total travel is classified:
//!    - `|dx| ≥ slow_min_px`, or
//!    - `|dx| ≥ fast_min_px` within `fast_max_ms`,
//!
//!    and in both cases `|dx| ≥ commit_ratio · |dy|`.  Leftward travel asks
//!    for the next page, rightward for the previous one.
//! 4. **cancel** → forget everything.
//!
//! There is no momentum and no multi-touch.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Tuning knobs for swipe recognition.  All distances are in logical pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SwipeConfig {
    /// Horizontal travel after which the drag locks into a swipe.  Default: `18.0`.
    pub lock_px: f64,
    /// `|dx|` must exceed `lock_ratio · |dy|` to lock.  Default: `1.1`.
    pub lock_ratio: f64,
    /// Travel that always commits, however slow.  Default: `120.0`.
    pub slow_min_px: f64,
    /// Shorter travel that commits when fast enough.  Default: `70.0`.
    pub fast_min_px: f64,
    /// Time window for the fast rule (ms).  Default: `260`.
    pub fast_max_ms: u64,
    /// `|dx|` must be at least `commit_ratio · |dy|` on release.  Default: `1.2`.
    pub commit_ratio: f64,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            lock_px: 18.0,
            lock_ratio: 1.1,
            slow_min_px: 120.0,
            fast_min_px: 70.0,
            fast_max_ms: 260,
            commit_ratio: 1.2,
        }
    }
}

/// A pointer position in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which way a committed swipe moves through the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Previous,
    Next,
}

/// Result of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    /// The page change the swipe asks for, if it qualified.
    pub step: Option<PageStep>,
    /// The gesture was locked, so the release must not reach the tile below.
    pub consumed: bool,
}

impl SwipeOutcome {
    /// Outcome for a release that was never part of a tracked drag.
    pub const PASS_THROUGH: SwipeOutcome = SwipeOutcome {
        step: None,
        consumed: false,
    };
}

/// Transient per-drag state.
#[derive(Debug, Clone, Copy)]
struct Drag {
    start: Point,
    last: Point,
    started_at: Instant,
    locked: bool,
}

/// Recogniser for one-pointer horizontal swipes.
#[derive(Debug)]
pub struct SwipeRecognizer {
    config: SwipeConfig,
    drag: Option<Drag>,
}

impl SwipeRecognizer {
    pub fn new(config: SwipeConfig) -> Self {
        Self { config, drag: None }
    }

    /// Whether a drag is currently being tracked.
    pub fn is_tracking(&self) -> bool {
        self.drag.is_some()
    }

    /// Whether the current drag has locked into a swipe.
    pub fn is_locked(&self) -> bool {
        self.drag.map(|d| d.locked).unwrap_or(false)
    }

    /// Start tracking a drag.  A press while already tracking restarts it.
    pub fn press(&mut self, point: Point, at: Instant) {
        self.drag = Some(Drag {
            start: point,
            last: point,
            started_at: at,
            locked: false,
        });
    }

    /// Feed a motion event.  Returns `true` while the drag is locked.
    pub fn motion(&mut self, point: Point) -> bool {
        let config = &self.config;
        match self.drag.as_mut() {
            Some(drag) => {
                drag.last = point;
                if !drag.locked {
                    let dx = (point.x - drag.start.x).abs();
                    let dy = (point.y - drag.start.y).abs();
                    if dx > config.lock_px && dx > config.lock_ratio * dy {
                        drag.locked = true;
                    }
                }
                drag.locked
            }
            None => false,
        }
    }

    /// Finish the drag and classify it.
    pub fn release(&mut self, point: Point, at: Instant) -> SwipeOutcome {
        if self.drag.is_none() {
            return SwipeOutcome::PASS_THROUGH;
        }
        self.motion(point);
        let Some(drag) = self.drag.take() else {
            return SwipeOutcome::PASS_THROUGH;
        };

        let dx = drag.last.x - drag.start.x;
        let dy = drag.last.y - drag.start.y;
        let elapsed = at.saturating_duration_since(drag.started_at);

        SwipeOutcome {
            step: classify(&self.config, dx, dy, elapsed),
            consumed: drag.locked,
        }
    }

    /// Abandon the current drag without requesting anything.
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

/// Decide whether total travel `(dx, dy)` over `elapsed` is a page swipe.
pub fn classify(config: &SwipeConfig, dx: f64, dy: f64, elapsed: Duration) -> Option<PageStep> {
    let adx = dx.abs();
    let ady = dy.abs();

    let slow = adx >= config.slow_min_px;
    let fast = adx >= config.fast_min_px && elapsed <= Duration::from_millis(config.fast_max_ms);
    let horizontal = adx >= config.commit_ratio * ady;

    if (slow || fast) && horizontal {
        Some(if dx < 0.0 {
            PageStep::Next
        } else {
            PageStep::Previous
        })
    } else {
        None
    }
}
