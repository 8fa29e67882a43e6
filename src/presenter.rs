use crate::feedback::FeedbackState;
use crate::selection::Rect;
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Auto-retirement delay applied when a state carries no duration.
pub const DEFAULT_DURATION_MS: u64 = 5000;
/// Length of the fade/shrink transition played before removal.
pub const FADE_OUT_MS: u64 = 200;

const ANCHOR_OFFSET: f64 = 16.0;
const VIEWPORT_PADDING: f64 = 16.0;
const MIN_EDGE_GAP: f64 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Document seam owned by the presenter: creation, placement and removal
/// of the single floating feedback element. The element ignores pointer
/// interaction; hit-testing stays geometric, on the presenter side.
pub trait FeedbackSurface: Send {
    /// Current viewport dimensions.
    fn viewport(&self) -> Size;
    /// Create the element for `state`, append it to the document and
    /// return its rendered size.
    fn mount(&mut self, state: &FeedbackState) -> Size;
    /// Move the mounted element so its top-left corner sits at `origin`.
    fn position(&mut self, origin: Point);
    /// Begin the fade/shrink transition on the mounted element.
    fn fade_out(&mut self);
    /// Detach the mounted element from the document.
    fn remove(&mut self);
}

struct LiveFeedback {
    bounds: Rect,
    fading: bool,
    expiry: Option<JoinHandle<()>>,
    fade: Option<JoinHandle<()>>,
}

struct PresenterInner {
    surface: Box<dyn FeedbackSurface>,
    live: Option<LiveFeedback>,
}

impl PresenterInner {
    /// Tears the current element down immediately, canceling its timers.
    /// Used by `present` to supersede a live or mid-fade element.
    fn clear_now(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };
        if let Some(expiry) = live.expiry.take() {
            expiry.abort();
        }
        if let Some(fade) = live.fade.take() {
            fade.abort();
        }
        self.surface.remove();
    }
}

/// Owns the single ephemeral feedback element. At most one exists at a
/// time; `present` is the unique mutation point and always fully retires
/// the previous element before creating the next.
#[derive(Clone)]
pub struct FeedbackPresenter {
    inner: Arc<Mutex<PresenterInner>>,
}

impl FeedbackPresenter {
    pub fn new(surface: Box<dyn FeedbackSurface>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PresenterInner {
                surface,
                live: None,
            })),
        }
    }

    /// Shows `state` anchored at `(x, y)`, superseding any live feedback,
    /// and schedules its auto-retirement.
    pub fn present(&self, x: f64, y: f64, state: &FeedbackState) {
        let Ok(mut inner) = self.inner.lock() else {
            return;
        };
        inner.clear_now();

        let size = inner.surface.mount(state);
        let viewport = inner.surface.viewport();
        let origin = place_within(viewport, size, Point { x, y });
        inner.surface.position(origin);
        debug!(
            "Presenting {} feedback at ({}, {})",
            state.variant.css_class(),
            origin.x,
            origin.y
        );

        let duration = Duration::from_millis(state.duration_ms.unwrap_or(DEFAULT_DURATION_MS));
        let handle = Arc::clone(&self.inner);
        let expiry = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            retire_inner(&handle);
        });

        inner.live = Some(LiveFeedback {
            bounds: Rect {
                left: origin.x,
                top: origin.y,
                width: size.width,
                height: size.height,
            },
            fading: false,
            expiry: Some(expiry),
            fade: None,
        });
    }

    /// Plays the fade transition and removes the element. No-op when
    /// nothing is live or a fade is already running.
    pub fn retire(&self) {
        retire_inner(&self.inner);
    }

    pub fn is_live(&self) -> bool {
        self.inner
            .lock()
            .map(|inner| inner.live.is_some())
            .unwrap_or(false)
    }

    /// Geometric hit-test against the placed element's bounds.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let Ok(inner) = self.inner.lock() else {
            return false;
        };
        inner.live.as_ref().is_some_and(|live| {
            let b = &live.bounds;
            x >= b.left && x <= b.left + b.width && y >= b.top && y <= b.top + b.height
        })
    }
}

fn retire_inner(inner: &Arc<Mutex<PresenterInner>>) {
    let Ok(mut guard) = inner.lock() else {
        return;
    };
    match guard.live.as_mut() {
        None => return,
        Some(live) if live.fading => return,
        Some(live) => {
            live.fading = true;
            if let Some(expiry) = live.expiry.take() {
                expiry.abort();
            }
        }
    }
    guard.surface.fade_out();

    let handle = Arc::clone(inner);
    let fade = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(FADE_OUT_MS)).await;
        if let Ok(mut guard) = handle.lock() {
            if guard.live.as_ref().is_some_and(|live| live.fading) {
                guard.surface.remove();
                guard.live = None;
            }
        }
    });
    if let Some(live) = guard.live.as_mut() {
        live.fade = Some(fade);
    }
}

/// Viewport-aware placement. The element's corner sits offset from the
/// anchor; placements that would overflow the right or bottom edge flip to
/// the opposite side, and the final origin keeps a minimum gap from the
/// top-left edges.
pub fn place_within(viewport: Size, size: Size, anchor: Point) -> Point {
    let mut left = anchor.x + ANCHOR_OFFSET;
    let mut top = anchor.y + ANCHOR_OFFSET;
    if left + size.width + VIEWPORT_PADDING > viewport.width {
        left = anchor.x - size.width - ANCHOR_OFFSET;
    }
    if top + size.height + VIEWPORT_PADDING > viewport.height {
        top = anchor.y - size.height - ANCHOR_OFFSET;
    }
    Point {
        x: left.max(MIN_EDGE_GAP),
        y: top.max(MIN_EDGE_GAP),
    }
}
