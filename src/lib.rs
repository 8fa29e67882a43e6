//! PhishGuard: selection-triggered phishing analysis.
//!
//! The pipeline runs from a pointer-up event to an ephemeral feedback
//! bubble: debounced trigger capture, selection extraction, one
//! asynchronous exchange with the remote classifier, then viewport-aware
//! presentation that auto-expires or retires on scroll, Escape or an
//! outside click.
//!
//! The host document is reached only through two seams,
//! [`selection::SelectionSource`] and [`presenter::FeedbackSurface`], so
//! the whole pipeline runs without a real page. [`router::SessionController`]
//! wires the events together; [`popup::PopupController`] is the manual
//! button-triggered variant of the same contract.

pub mod classifier;
pub mod debounce;
pub mod feedback;
pub mod popup;
pub mod presenter;
pub mod router;
pub mod selection;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_support;

pub use classifier::{ClassificationResult, ClassifierClient, ClassifyError};
pub use feedback::{FeedbackState, FeedbackVariant};
pub use presenter::{FeedbackPresenter, FeedbackSurface};
pub use router::SessionController;
pub use selection::{SelectionSnapshot, SelectionSource};
pub use settings::AppSettings;
