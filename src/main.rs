//! Application entry point — fantasy broadcaster.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (defaults on first run), overlay the
//!    environment (`RABBITMQ_HOST`, `SPEECH_KEY`, `SPEECH_REGION`,
//!    `OUTPUT_ROOT`).
//! 3. Refuse to start without synthesis credentials.
//! 4. Create the [`tokio`] runtime (multi-thread).
//! 5. Load the record ledger (fresh book on first run).
//! 6. Build the synthesizer, dispatcher and shared processor.
//! 7. Connect to the broker — bounded retry, fatal when exhausted.
//! 8. Spawn the ctrl-c watcher.
//! 9. Run the consumption loop until shutdown.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tokio::sync::{oneshot, Mutex};

use fantasy_broadcaster::{
    broker::{ConnectionManager, RecapConsumer},
    config::AppConfig,
    pipeline::RecapProcessor,
    records::RecordLedger,
    synth::{AzureSynthesizer, SynthesisDispatcher},
};

fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Fantasy broadcaster starting up");

    // 2. Configuration
    let config = AppConfig::load()
        .unwrap_or_else(|e| {
            log::warn!("Failed to load config ({e}); using defaults");
            AppConfig::default()
        })
        .overlay_env();

    // 3. Credentials — there is no degraded mode without a synthesis key.
    if config.synthesis.key.is_empty() {
        bail!("missing synthesis credentials — set SPEECH_KEY (and SPEECH_REGION)");
    }

    // 4. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    rt.block_on(run(config))
}

async fn run(config: AppConfig) -> Result<()> {
    // 5. Record ledger — the one piece of durable state.
    let ledger = RecordLedger::load(&config.ledger.file)
        .with_context(|| format!("record ledger at {} unusable", config.ledger.file.display()))?;
    let ledger = Arc::new(Mutex::new(ledger));

    // 6. Synthesis stack + shared per-message processor.
    let engine = Arc::new(AzureSynthesizer::from_config(&config.synthesis));
    let dispatcher = SynthesisDispatcher::new(engine, config.output.root.clone());
    let processor = Arc::new(RecapProcessor::new(
        Arc::clone(&ledger),
        dispatcher,
        config.voices.clone(),
    ));

    // 7. Broker connect — bounded retry; exhausting it aborts startup.
    let mut manager = ConnectionManager::new(config.broker.clone());
    let (connection, channel) = manager
        .connect()
        .await
        .context("broker connection failed")?;

    // 8. Shutdown signal
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = shutdown_tx.send(());
        }
    });

    // 9. Consume until shutdown.
    RecapConsumer::new(connection, channel, config.broker.queue.clone(), processor)
        .run(shutdown_rx)
        .await
        .context("consumption loop failed")?;

    log::info!("Fantasy broadcaster stopped");
    Ok(())
}
