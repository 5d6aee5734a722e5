//! Synthesis dispatcher — renders a markup document and writes the audio
//! artifact to its per-week destination.
//!
//! The destination is `<outputRoot>/Week_<week>/<episode>.wav`; the week
//! directory is created on demand (idempotent). A failed synthesis call is
//! logged and surfaced to the caller, never retried here — redelivery of
//! the whole message is the retry mechanism. Two events with the same
//! `(week, episode)` race on the same path; last write wins.

use std::path::PathBuf;
use std::sync::Arc;

use super::engine::{SpeechSynthesizer, SynthError};

// ---------------------------------------------------------------------------
// SynthesisDispatcher
// ---------------------------------------------------------------------------

/// Invokes the synthesis capability and owns the artifact layout.
pub struct SynthesisDispatcher {
    engine: Arc<dyn SpeechSynthesizer>,
    output_root: PathBuf,
}

impl SynthesisDispatcher {
    pub fn new(engine: Arc<dyn SpeechSynthesizer>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            engine,
            output_root: output_root.into(),
        }
    }

    /// Destination of one episode's audio artifact.
    pub fn output_path(&self, week: u32, episode: &str) -> PathBuf {
        self.output_root
            .join(format!("Week_{week}"))
            .join(format!("{episode}.wav"))
    }

    /// Render `ssml` and write the artifact; returns the written path.
    ///
    /// # Errors
    ///
    /// - [`SynthError::Io`] — the week directory or the artifact could not
    ///   be written.
    /// - Any error from the underlying [`SpeechSynthesizer`] call.
    pub async fn synthesize(
        &self,
        ssml: &str,
        week: u32,
        episode: &str,
    ) -> Result<PathBuf, SynthError> {
        let path = self.output_path(week, episode);

        if let Some(week_dir) = path.parent() {
            tokio::fs::create_dir_all(week_dir)
                .await
                .map_err(|source| SynthError::Io {
                    path: week_dir.display().to_string(),
                    source,
                })?;
        }

        let audio = match self.engine.synthesize(ssml).await {
            Ok(audio) => audio,
            Err(e) => {
                log::error!("Speech synthesis failed for '{episode}': {e}");
                return Err(e);
            }
        };

        tokio::fs::write(&path, &audio)
            .await
            .map_err(|source| SynthError::Io {
                path: path.display().to_string(),
                source,
            })?;

        log::info!("Multi-speaker audio saved: {}", path.display());
        Ok(path)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::MockSynthesizer;
    use tempfile::tempdir;

    #[test]
    fn output_path_layout() {
        let dispatcher =
            SynthesisDispatcher::new(Arc::new(MockSynthesizer::ok(Vec::new())), "/tmp/out");
        assert_eq!(
            dispatcher.output_path(7, "Hawks_vs_Sharks"),
            PathBuf::from("/tmp/out/Week_7/Hawks_vs_Sharks.wav")
        );
    }

    #[tokio::test]
    async fn writes_audio_to_week_directory() {
        let dir = tempdir().expect("temp dir");
        let dispatcher = SynthesisDispatcher::new(
            Arc::new(MockSynthesizer::ok(b"RIFFaudio".to_vec())),
            dir.path(),
        );

        let path = dispatcher
            .synthesize("<speak>hi</speak>", 3, "Episode")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("Week_3").join("Episode.wav"));
        assert_eq!(std::fs::read(&path).unwrap(), b"RIFFaudio");
    }

    #[tokio::test]
    async fn week_directory_creation_is_idempotent() {
        let dir = tempdir().expect("temp dir");
        let dispatcher = SynthesisDispatcher::new(
            Arc::new(MockSynthesizer::ok(b"a".to_vec())),
            dir.path(),
        );

        dispatcher.synthesize("<speak/>", 1, "First").await.unwrap();
        dispatcher.synthesize("<speak/>", 1, "Second").await.unwrap();

        assert!(dir.path().join("Week_1/First.wav").exists());
        assert!(dir.path().join("Week_1/Second.wav").exists());
    }

    #[tokio::test]
    async fn same_episode_last_write_wins() {
        let dir = tempdir().expect("temp dir");
        let first = SynthesisDispatcher::new(
            Arc::new(MockSynthesizer::ok(b"first".to_vec())),
            dir.path(),
        );
        let second = SynthesisDispatcher::new(
            Arc::new(MockSynthesizer::ok(b"second".to_vec())),
            dir.path(),
        );

        first.synthesize("<speak/>", 2, "Dup").await.unwrap();
        second.synthesize("<speak/>", 2, "Dup").await.unwrap();

        assert_eq!(
            std::fs::read(dir.path().join("Week_2/Dup.wav")).unwrap(),
            b"second"
        );
    }

    #[tokio::test]
    async fn engine_failure_propagates_and_writes_nothing() {
        let dir = tempdir().expect("temp dir");
        let dispatcher =
            SynthesisDispatcher::new(Arc::new(MockSynthesizer::err("quota")), dir.path());

        let err = dispatcher
            .synthesize("<speak/>", 4, "Failed")
            .await
            .unwrap_err();

        assert!(matches!(err, SynthError::Request(_)));
        assert!(!dir.path().join("Week_4/Failed.wav").exists());
    }
}
