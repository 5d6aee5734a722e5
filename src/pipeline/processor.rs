//! The per-message pipeline: deserialize → ledger → markup → synthesis.
//!
//! [`RecapProcessor`] is shared across concurrently-running handler tasks
//! (`Arc`); the ledger is the only shared mutable resource and is guarded
//! by one `tokio::sync::Mutex` held across the entire
//! check-compare-update-persist sequence of an event — both rosters of one
//! game update under a single lock hold, so two in-flight events can never
//! interleave partial record updates.

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::Mutex;

use crate::config::VoiceConfig;
use crate::markup::to_ssml;
use crate::recap::GameRecapEvent;
use crate::records::{LedgerError, RecordLedger};
use crate::synth::{SynthError, SynthesisDispatcher};

// ---------------------------------------------------------------------------
// ProcessError
// ---------------------------------------------------------------------------

/// A failure anywhere in the per-message pipeline.
///
/// Any variant means the message must **not** be acknowledged; the broker
/// redelivers it under at-least-once semantics.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The payload is not a recap event at all.
    #[error("malformed recap payload: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// The ledger could not be persisted after the update.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The synthesis step failed (capability error, transport, or artifact
    /// write).
    #[error(transparent)]
    Synthesis(#[from] SynthError),
}

// ---------------------------------------------------------------------------
// ProcessSummary
// ---------------------------------------------------------------------------

/// What one successfully processed message produced.
#[derive(Debug)]
pub struct ProcessSummary {
    pub week: u32,
    pub episode: String,
    /// Announcement lines for every record broken by this event, in
    /// evaluation order (home side first).
    pub broken_records: Vec<String>,
    /// Where the audio artifact landed — `None` when the event carried no
    /// script.
    pub audio_path: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// RecapProcessor
// ---------------------------------------------------------------------------

/// Thread-safe handle to the shared record ledger.
pub type SharedLedger = Arc<Mutex<RecordLedger>>;

/// Drives the full pipeline for one queue message.
pub struct RecapProcessor {
    ledger: SharedLedger,
    dispatcher: SynthesisDispatcher,
    voices: VoiceConfig,
}

impl RecapProcessor {
    pub fn new(ledger: SharedLedger, dispatcher: SynthesisDispatcher, voices: VoiceConfig) -> Self {
        Self {
            ledger,
            dispatcher,
            voices,
        }
    }

    /// Process one raw payload end to end.
    ///
    /// Succeeds only when every attempted stage succeeded — the caller
    /// acks iff this returns `Ok`. Reprocessing a redelivered message is
    /// harmless: record comparisons are strict, so values already applied
    /// tie with themselves and produce no second announcement.
    pub async fn process(&self, payload: &[u8]) -> Result<ProcessSummary, ProcessError> {
        let event: GameRecapEvent = serde_json::from_slice(payload)?;
        log::info!(
            "Processing week {} recap '{}'",
            event.week,
            event.episode_name()
        );

        let mut broken_records = Vec::new();
        {
            let mut ledger = self.ledger.lock().await;
            broken_records
                .extend(ledger.check_and_update(&event.home_stats(), &event.home_roster)?);
            broken_records
                .extend(ledger.check_and_update(&event.away_stats(), &event.away_roster)?);
        }

        let audio_path = match event.script() {
            Some(script) => {
                let ssml = to_ssml(script, &self.voices);
                let path = self
                    .dispatcher
                    .synthesize(&ssml, event.week, event.episode_name())
                    .await?;
                Some(path)
            }
            None => {
                log::debug!(
                    "Week {} '{}' carries no script — skipping synthesis",
                    event.week,
                    event.episode_name()
                );
                None
            }
        };

        Ok(ProcessSummary {
            week: event.week,
            episode: event.episode_name().to_string(),
            broken_records,
            audio_path,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
