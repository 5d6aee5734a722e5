//! Core synthesis trait and the Azure Speech REST implementation.
//!
//! `AzureSynthesizer` posts the SSML document to the regional
//! `cognitiveservices/v1` endpoint and returns the audio bytes. All
//! connection details come from [`SynthesisConfig`]; nothing is hardcoded.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::SynthesisConfig;

// ---------------------------------------------------------------------------
// SynthError
// ---------------------------------------------------------------------------

/// All errors that can arise from the synthesis subsystem.
#[derive(Debug, Error)]
pub enum SynthError {
    /// HTTP transport or connection error.
    #[error("synthesis request failed: {0}")]
    Request(String),

    /// The request did not complete within the configured timeout.
    #[error("synthesis request timed out")]
    Timeout,

    /// The service answered with a non-success status.
    #[error("synthesis service rejected the request (HTTP {status}): {detail}")]
    Service { status: u16, detail: String },

    /// The audio artifact could not be written.
    #[error("failed to write audio artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<reqwest::Error> for SynthError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SynthError::Timeout
        } else {
            SynthError::Request(e.to_string())
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechSynthesizer trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface to the speech-synthesis capability.
///
/// The contract is deliberately narrow: submit a markup document, receive
/// the rendered audio bytes or a failure. Implementations must be
/// `Send + Sync` so they can be held behind an `Arc<dyn SpeechSynthesizer>`
/// and called from any handler task.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render `ssml` to audio.
    async fn synthesize(&self, ssml: &str) -> Result<Vec<u8>, SynthError>;
}

// ---------------------------------------------------------------------------
// AzureSynthesizer
// ---------------------------------------------------------------------------

/// Production synthesizer backed by the Azure Speech REST endpoint.
///
/// The endpoint host is derived from the configured region; the
/// subscription key and requested output format travel as headers with
/// every call. Each call is bounded by the configured timeout — an
/// expired call surfaces as [`SynthError::Timeout`].
pub struct AzureSynthesizer {
    client: reqwest::Client,
    config: SynthesisConfig,
}

impl AzureSynthesizer {
    /// Build a synthesizer from application config.
    ///
    /// The HTTP client is pre-configured with the per-request timeout from
    /// `config.timeout_secs`. A default (no-timeout) client is used as a
    /// last-resort fallback if the builder fails (should never happen in
    /// practice).
    pub fn from_config(config: &SynthesisConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            config: config.clone(),
        }
    }

    /// Regional REST endpoint for SSML synthesis.
    fn endpoint(&self) -> String {
        format!(
            "https://{}.tts.speech.microsoft.com/cognitiveservices/v1",
            self.config.region
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for AzureSynthesizer {
    async fn synthesize(&self, ssml: &str) -> Result<Vec<u8>, SynthError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("Ocp-Apim-Subscription-Key", &self.config.key)
            .header("Content-Type", "application/ssml+xml")
            .header("X-Microsoft-OutputFormat", &self.config.output_format)
            .header("User-Agent", "fantasy-broadcaster")
            .body(ssml.to_string())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(SynthError::Service {
                status: status.as_u16(),
                detail,
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

// ---------------------------------------------------------------------------
// MockSynthesizer  (test-only)
// ---------------------------------------------------------------------------

/// A test double that returns pre-configured audio bytes (or an error)
/// and records every markup document it was asked to render.
#[cfg(test)]
pub struct MockSynthesizer {
    response: Result<Vec<u8>, String>,
    calls: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockSynthesizer {
    /// Create a mock that always returns `Ok(audio)`.
    pub fn ok(audio: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(audio.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Create a mock that always fails with a request error.
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            response: Err(message.into()),
            calls: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every SSML document passed to [`synthesize`](SpeechSynthesizer::synthesize) so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, ssml: &str) -> Result<Vec<u8>, SynthError> {
        self.calls.lock().unwrap().push(ssml.to_string());
        match &self.response {
            Ok(audio) => Ok(audio.clone()),
            Err(message) => Err(SynthError::Request(message.clone())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
