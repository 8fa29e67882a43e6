use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

/// Viewport-relative rectangle of a selection range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Snapshot of the page selection at trigger time. Immutable; one is
/// created per trigger and discarded after use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub text: String,
    pub anchor_rect: Option<Rect>,
}

impl SelectionSnapshot {
    /// Builds a snapshot from raw selection data. The text is trimmed;
    /// whitespace-only input collapses to the empty snapshot, rect included.
    pub fn new(raw_text: impl AsRef<str>, anchor_rect: Option<Rect>) -> Self {
        let text = raw_text.as_ref().trim();
        if text.is_empty() {
            return Self::empty();
        }
        Self {
            text: text.to_string(),
            anchor_rect,
        }
    }

    pub fn empty() -> Self {
        Self {
            text: String::new(),
            anchor_rect: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Anchor point for feedback placement: midpoint of the selection's
    /// top edge when a rect was captured, else the raw pointer position.
    pub fn anchor_point(&self, pointer_x: f64, pointer_y: f64) -> (f64, f64) {
        match self.anchor_rect {
            Some(rect) => (rect.left + rect.width / 2.0, rect.top),
            None => (pointer_x, pointer_y),
        }
    }
}

/// Host seam for reading the current selection state.
///
/// Implementations return the empty snapshot when there is no selection or
/// it is collapsed, and surface range failures (detached ranges and the
/// like) as errors. The pipeline degrades errors to the empty snapshot so
/// nothing propagates into the host page.
pub trait SelectionSource: Send + Sync {
    fn read(&self) -> Result<SelectionSnapshot>;
}

pub(crate) fn read_or_empty(source: &dyn SelectionSource) -> SelectionSnapshot {
    match source.read() {
        Ok(snapshot) => snapshot,
        Err(err) => {
            debug!("Selection read failed, treating as empty: {}", err);
            SelectionSnapshot::empty()
        }
    }
}
