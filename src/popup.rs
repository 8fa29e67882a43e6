use crate::classifier::ClassifierClient;
use log::debug;
use std::sync::Arc;

/// Styling bucket for the popup's status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Muted,
    Ok,
    Warn,
}

impl StatusTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusTone::Muted => "muted",
            StatusTone::Ok => "ok",
            StatusTone::Warn => "warn",
        }
    }
}

/// One rendered status line in the popup.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupStatus {
    pub tone: StatusTone,
    pub text: String,
}

impl PopupStatus {
    /// Shown while the request is in flight.
    pub fn analyzing() -> Self {
        Self::muted("Analyzing...")
    }

    fn muted(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Muted,
            text: text.into(),
        }
    }

    fn ok(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Ok,
            text: text.into(),
        }
    }

    fn warn(text: impl Into<String>) -> Self {
        Self {
            tone: StatusTone::Warn,
            text: text.into(),
        }
    }
}

/// Manual-trigger variant of the pipeline: same gate and classify contract
/// as the selection flow, rendered as a status line instead of a bubble.
/// Not concurrency-sensitive; the popup disables its button while a run is
/// in flight.
pub struct PopupController {
    classifier: Arc<ClassifierClient>,
    min_selection_chars: usize,
}

impl PopupController {
    pub fn new(classifier: Arc<ClassifierClient>, min_selection_chars: usize) -> Self {
        Self {
            classifier,
            min_selection_chars,
        }
    }

    pub async fn analyze(&self, selection_text: &str) -> PopupStatus {
        let text = selection_text.trim();
        if text.chars().count() < self.min_selection_chars {
            return PopupStatus::muted(format!(
                "Select at least {} characters on the page.",
                self.min_selection_chars
            ));
        }

        match self.classifier.classify(text).await {
            Ok(result) if result.label == 1 => PopupStatus::warn(format!(
                "Phishing detected! Probability: {:.1}%",
                result.probability * 100.0
            )),
            Ok(result) => PopupStatus::ok(format!(
                "Likely safe. Probability: {:.1}%",
                result.probability * 100.0
            )),
            Err(err) => {
                debug!("Popup analysis failed: {}", err);
                PopupStatus::warn("Could not analyze (network/API error).")
            }
        }
    }
}
