use crate::classifier::ClassificationResult;
use serde::{Deserialize, Serialize};

/// Semantic category of a feedback bubble; maps onto the injected
/// stylesheet's variant classes. `Warning` is part of the vocabulary (the
/// stylesheet styles it) even though the binary classifier never emits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackVariant {
    Phishing,
    Safe,
    Warning,
    Error,
}

impl FeedbackVariant {
    pub fn css_class(&self) -> &'static str {
        match self {
            FeedbackVariant::Phishing => "phishing",
            FeedbackVariant::Safe => "safe",
            FeedbackVariant::Warning => "warning",
            FeedbackVariant::Error => "error",
        }
    }
}

/// Everything the surface needs to render one feedback bubble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackState {
    pub variant: FeedbackVariant,
    pub icon: String,
    pub title: String,
    pub message: String,
    pub probability: f64,
    pub footer: String,
    /// Auto-retirement delay; the presenter applies its default when unset.
    pub duration_ms: Option<u64>,
}

impl FeedbackState {
    /// Maps a classification outcome onto the displayed state. The safe
    /// variant shows the complement of the phishing probability.
    pub fn from_classification(result: &ClassificationResult) -> Self {
        if result.label == 1 {
            Self {
                variant: FeedbackVariant::Phishing,
                icon: "⚠".to_string(),
                title: "Phishing Detected".to_string(),
                message: "This content appears to be malicious or suspicious.".to_string(),
                probability: result.probability,
                footer: "Do not click links or provide personal information.".to_string(),
                duration_ms: Some(6000),
            }
        } else {
            Self {
                variant: FeedbackVariant::Safe,
                icon: "✓".to_string(),
                title: "Content Appears Safe".to_string(),
                message: "No phishing indicators detected in this text.".to_string(),
                probability: 1.0 - result.probability,
                footer: "Always verify suspicious requests independently.".to_string(),
                duration_ms: Some(4000),
            }
        }
    }

    /// Terminal state for a failed classification exchange.
    pub fn analysis_failed() -> Self {
        Self {
            variant: FeedbackVariant::Error,
            icon: "!".to_string(),
            title: "Analysis Failed".to_string(),
            message: "Unable to analyze this content.".to_string(),
            probability: 0.0,
            footer: "Check your connection and try again.".to_string(),
            duration_ms: Some(3000),
        }
    }

    /// Rounded percentage for the confidence line and progress bar.
    pub fn confidence_percent(&self) -> u32 {
        (self.probability * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phishing_state_mapping() {
        let state = FeedbackState::from_classification(&ClassificationResult {
            label: 1,
            probability: 0.82,
        });
        assert_eq!(state.variant, FeedbackVariant::Phishing);
        assert_eq!(state.icon, "⚠");
        assert_eq!(state.title, "Phishing Detected");
        assert_eq!(state.probability, 0.82);
        assert_eq!(state.duration_ms, Some(6000));
    }

    #[test]
    fn test_safe_state_shows_complement_probability() {
        let state = FeedbackState::from_classification(&ClassificationResult {
            label: 0,
            probability: 0.82,
        });
        assert_eq!(state.variant, FeedbackVariant::Safe);
        assert_eq!(state.icon, "✓");
        assert_eq!(state.title, "Content Appears Safe");
        assert!((state.probability - 0.18).abs() < 1e-9);
        assert_eq!(state.duration_ms, Some(4000));
    }

    #[test]
    fn test_normalized_empty_response_reads_as_fully_safe() {
        // {} normalizes to label 0, probability 0, so the safe bubble
        // shows full confidence.
        let state = FeedbackState::from_classification(&ClassificationResult {
            label: 0,
            probability: 0.0,
        });
        assert_eq!(state.variant, FeedbackVariant::Safe);
        assert_eq!(state.probability, 1.0);
        assert_eq!(state.confidence_percent(), 100);
    }

    #[test]
    fn test_failure_state_mapping() {
        let state = FeedbackState::analysis_failed();
        assert_eq!(state.variant, FeedbackVariant::Error);
        assert_eq!(state.icon, "!");
        assert_eq!(state.title, "Analysis Failed");
        assert_eq!(state.probability, 0.0);
        assert_eq!(state.duration_ms, Some(3000));
    }

    #[test]
    fn test_variant_css_classes() {
        assert_eq!(FeedbackVariant::Phishing.css_class(), "phishing");
        assert_eq!(FeedbackVariant::Safe.css_class(), "safe");
        assert_eq!(FeedbackVariant::Warning.css_class(), "warning");
        assert_eq!(FeedbackVariant::Error.css_class(), "error");
    }

    #[test]
    fn test_confidence_percent_rounds() {
        let state = FeedbackState::from_classification(&ClassificationResult {
            label: 1,
            probability: 0.826,
        });
        assert_eq!(state.confidence_percent(), 83);
    }
}
