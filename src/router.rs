use crate::classifier::ClassifierClient;
use crate::debounce::Debouncer;
use crate::feedback::FeedbackState;
use crate::presenter::{FeedbackPresenter, FeedbackSurface};
use crate::selection::{self, SelectionSource};
use crate::settings::AppSettings;
use log::debug;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const ESCAPE_KEY: &str = "Escape";

/// Observable pipeline state for one trigger lifecycle.
///
/// Scroll, Escape, an outside click or a new trigger force the transition
/// back toward `Idle` by retiring the current presentation; an in-flight
/// classification is never canceled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Reading,
    Classifying,
    Presenting,
    Expiring,
}

/// Binds page-level events to the analysis pipeline and enforces the
/// single-active-feedback and cleanup invariants. The "current feedback"
/// and "pending debounce" references live here, not in module globals.
pub struct SessionController {
    selection: Arc<dyn SelectionSource>,
    classifier: Arc<ClassifierClient>,
    presenter: FeedbackPresenter,
    debouncer: Debouncer,
    min_selection_chars: usize,
    phase: Arc<Mutex<Phase>>,
}

impl SessionController {
    pub fn new(
        settings: &AppSettings,
        selection: Arc<dyn SelectionSource>,
        surface: Box<dyn FeedbackSurface>,
    ) -> Self {
        let classifier = ClassifierClient::new(&settings.api_endpoint);
        Self::with_classifier(settings, selection, surface, classifier)
    }

    pub fn with_classifier(
        settings: &AppSettings,
        selection: Arc<dyn SelectionSource>,
        surface: Box<dyn FeedbackSurface>,
        classifier: ClassifierClient,
    ) -> Self {
        Self {
            selection,
            classifier: Arc::new(classifier),
            presenter: FeedbackPresenter::new(surface),
            debouncer: Debouncer::new(Duration::from_millis(settings.selection_pause_ms)),
            min_selection_chars: settings.min_selection_chars,
            phase: Arc::new(Mutex::new(Phase::Idle)),
        }
    }

    pub fn presenter(&self) -> &FeedbackPresenter {
        &self.presenter
    }

    pub fn phase(&self) -> Phase {
        let recorded = self.phase.lock().map(|p| *p).unwrap_or(Phase::Idle);
        match recorded {
            // Between pipeline runs the live element is the only state.
            Phase::Idle | Phase::Expiring => {
                if self.presenter.is_live() {
                    Phase::Expiring
                } else {
                    Phase::Idle
                }
            }
            other => other,
        }
    }

    /// Pointer released: wait out the selection pause, then read and, for a
    /// long enough selection, classify and present. A burst of pointer-up
    /// events collapses into one inspection using the last event's
    /// coordinates.
    pub fn on_pointer_up(&mut self, pointer_x: f64, pointer_y: f64) {
        set_phase(&self.phase, Phase::Debouncing);
        let selection = Arc::clone(&self.selection);
        let classifier = Arc::clone(&self.classifier);
        let presenter = self.presenter.clone();
        let phase = Arc::clone(&self.phase);
        let min_chars = self.min_selection_chars;

        self.debouncer.schedule(async move {
            set_phase(&phase, Phase::Reading);
            let snapshot = selection::read_or_empty(selection.as_ref());
            if snapshot.text.chars().count() < min_chars {
                debug!("Selection under {} chars, skipping analysis", min_chars);
                set_phase(&phase, Phase::Idle);
                return;
            }

            let (anchor_x, anchor_y) = snapshot.anchor_point(pointer_x, pointer_y);
            set_phase(&phase, Phase::Classifying);
            let state = match classifier.classify(&snapshot.text).await {
                Ok(result) => FeedbackState::from_classification(&result),
                Err(err) => {
                    debug!("Classification failed: {}", err);
                    FeedbackState::analysis_failed()
                }
            };

            set_phase(&phase, Phase::Presenting);
            presenter.present(anchor_x, anchor_y, &state);
            set_phase(&phase, Phase::Expiring);
        });
    }

    /// Feedback is anchored to viewport coordinates and goes stale on any
    /// scroll.
    pub fn on_scroll(&self) {
        self.retire_now("scroll");
    }

    pub fn on_key_down(&self, key: &str) {
        if key == ESCAPE_KEY {
            self.retire_now("escape");
        }
    }

    /// Clicks outside the element retire it; the element itself is
    /// advisory, so clicks inside are ignored.
    pub fn on_click(&self, x: f64, y: f64) {
        if self.presenter.contains(x, y) {
            return;
        }
        self.retire_now("outside click");
    }

    fn retire_now(&self, cause: &str) {
        if self.presenter.is_live() {
            debug!("Retiring feedback on {}", cause);
        }
        self.presenter.retire();
    }
}

fn set_phase(phase: &Arc<Mutex<Phase>>, next: Phase) {
    if let Ok(mut current) = phase.lock() {
        if *current != next {
            debug!("Router phase: {:?} -> {:?}", *current, next);
            *current = next;
        }
    }
}
