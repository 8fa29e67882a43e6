use log::{debug, error};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

pub const DEFAULT_API_ENDPOINT: &str = "http://127.0.0.1:8000/predict";

#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("classifier returned HTTP {0}")]
    Status(reqwest::StatusCode),
}

/// Normalized outcome of one classification exchange.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationResult {
    /// 1 for phishing, 0 for everything else.
    pub label: u8,
    pub probability: f64,
}

/// Raw predict response. Both fields are lenient: absent or wrong-typed
/// values normalize to safe defaults instead of failing the parse.
#[derive(Debug, Deserialize, Default)]
struct PredictResponse {
    #[serde(default)]
    label: Value,
    #[serde(default)]
    phishing_probability: Value,
}

impl PredictResponse {
    fn normalize(self) -> ClassificationResult {
        let label = match self.label.as_f64() {
            Some(n) if n == 1.0 => 1,
            _ => 0,
        };
        let probability = self
            .phishing_probability
            .as_f64()
            .filter(|p| p.is_finite())
            .unwrap_or(0.0);
        ClassificationResult { label, probability }
    }
}

/// Client for the remote phishing classification endpoint.
pub struct ClassifierClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ClassifierClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends the text for classification. Exactly one network attempt: no
    /// retry, no timeout beyond the transport defaults. Transport failures
    /// and non-2xx statuses are errors; a malformed-but-present JSON body
    /// normalizes instead of failing.
    pub async fn classify(&self, text: &str) -> Result<ClassificationResult, ClassifyError> {
        debug!("Classifying {} chars via {}", text.len(), self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| {
                error!("Classifier request failed: {}", e);
                ClassifyError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Classifier API error: status={}", status);
            return Err(ClassifyError::Status(status));
        }

        let raw: PredictResponse = response.json().await?;
        let result = raw.normalize();
        debug!(
            "Classification result: label={}, probability={}",
            result.label, result.probability
        );
        Ok(result)
    }
}

impl Default for ClassifierClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_ENDPOINT)
    }
}
