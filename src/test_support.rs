//! Hand-rolled fakes for the two host seams, shared across test modules.

use crate::feedback::FeedbackState;
use crate::presenter::{FeedbackSurface, Point, Size};
use crate::selection::{Rect, SelectionSnapshot, SelectionSource};
use anyhow::{anyhow, Result};
use std::sync::{Arc, Mutex};

/// Everything a fake surface observed, for assertions.
#[derive(Debug, Default)]
pub(crate) struct SurfaceLog {
    pub mounts: usize,
    pub removes: usize,
    pub fades: usize,
    pub origin: Option<Point>,
    pub last_state: Option<FeedbackState>,
}

/// Recording stand-in for the document: fixed viewport, fixed rendered
/// element size.
pub(crate) struct FakeSurface {
    viewport: Size,
    element_size: Size,
    log: Arc<Mutex<SurfaceLog>>,
}

impl FakeSurface {
    pub fn new(viewport: Size, element_size: Size) -> (Self, Arc<Mutex<SurfaceLog>>) {
        let log = Arc::new(Mutex::new(SurfaceLog::default()));
        (
            Self {
                viewport,
                element_size,
                log: Arc::clone(&log),
            },
            log,
        )
    }

    /// 1280x720 viewport with a 320x140 element.
    pub fn default_pair() -> (Self, Arc<Mutex<SurfaceLog>>) {
        Self::new(
            Size {
                width: 1280.0,
                height: 720.0,
            },
            Size {
                width: 320.0,
                height: 140.0,
            },
        )
    }
}

impl FeedbackSurface for FakeSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn mount(&mut self, state: &FeedbackState) -> Size {
        let mut log = self.log.lock().unwrap();
        log.mounts += 1;
        log.last_state = Some(state.clone());
        self.element_size
    }

    fn position(&mut self, origin: Point) {
        self.log.lock().unwrap().origin = Some(origin);
    }

    fn fade_out(&mut self) {
        self.log.lock().unwrap().fades += 1;
    }

    fn remove(&mut self) {
        self.log.lock().unwrap().removes += 1;
    }
}

/// Selection source returning a fixed snapshot.
pub(crate) struct FakeSelection {
    snapshot: SelectionSnapshot,
}

impl FakeSelection {
    pub fn new(snapshot: SelectionSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(SelectionSnapshot::new(text, None))
    }

    pub fn with_rect(text: &str, rect: Rect) -> Self {
        Self::new(SelectionSnapshot::new(text, Some(rect)))
    }
}

impl SelectionSource for FakeSelection {
    fn read(&self) -> Result<SelectionSnapshot> {
        Ok(self.snapshot.clone())
    }
}

/// Selection source whose range computation always fails, like a detached
/// range in the host page.
pub(crate) struct FailingSelection;

impl SelectionSource for FailingSelection {
    fn read(&self) -> Result<SelectionSnapshot> {
        Err(anyhow!("selection range is detached"))
    }
}
