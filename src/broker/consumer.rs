//! The recap consumption loop.
//!
//! Registers a manually-acknowledged consumer on the recap queue and
//! processes deliveries until the external shutdown signal fires or the
//! broker closes the stream. Each delivery runs on its own task so
//! handlers overlap their I/O waits (ledger persistence aside — that is
//! serialised by the processor's mutex); the broker-side prefetch bound
//! caps how many are in flight.
//!
//! # Acknowledgment policy
//!
//! One decision point, driven by the typed pipeline result:
//!
//! * `Ok(summary)`  → `basic.ack` — the message is done.
//! * `Err(error)`   → `basic.nack` with requeue — at-least-once
//!   redelivery is the retry mechanism for every failure class
//!   (malformed payload, ledger persistence, synthesis).

use std::sync::Arc;

use futures_util::StreamExt;
use lapin::{
    message::Delivery,
    options::{BasicAckOptions, BasicConsumeOptions, BasicNackOptions},
    types::FieldTable,
    Channel, Connection,
};
use tokio::sync::oneshot;
use tokio::task::JoinSet;

use crate::pipeline::RecapProcessor;

use super::connection::{BrokerError, ConnectionState};

/// Consumer tag reported to the broker.
const CONSUMER_TAG: &str = "fantasy-broadcaster";

// ---------------------------------------------------------------------------
// RecapConsumer
// ---------------------------------------------------------------------------

/// Drives the message-receipt loop over an established channel.
pub struct RecapConsumer {
    connection: Connection,
    channel: Channel,
    queue: String,
    processor: Arc<RecapProcessor>,
}

impl RecapConsumer {
    pub fn new(
        connection: Connection,
        channel: Channel,
        queue: String,
        processor: Arc<RecapProcessor>,
    ) -> Self {
        Self {
            connection,
            channel,
            queue,
            processor,
        }
    }

    /// Consume until `shutdown` fires or the delivery stream ends.
    ///
    /// New deliveries stop being accepted as soon as the signal is
    /// observed; in-flight handlers are allowed to complete before the
    /// connection is closed (no forced preemption).
    pub async fn run(self, mut shutdown: oneshot::Receiver<()>) -> Result<(), BrokerError> {
        let mut deliveries = self
            .channel
            .basic_consume(
                &self.queue,
                CONSUMER_TAG,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await?;

        log::info!(
            "{}: waiting for recap events on '{}'",
            ConnectionState::Consuming.label(),
            self.queue
        );

        let mut handlers: JoinSet<()> = JoinSet::new();
        let mut stream_error: Option<lapin::Error> = None;

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    log::info!("Shutdown signal received — no new deliveries will be accepted");
                    break;
                }

                delivery = deliveries.next() => match delivery {
                    None => {
                        log::warn!("Delivery stream closed by the broker");
                        break;
                    }
                    Some(Err(e)) => {
                        stream_error = Some(e);
                        break;
                    }
                    Some(Ok(delivery)) => {
                        let processor = Arc::clone(&self.processor);
                        handlers.spawn(handle_delivery(processor, delivery));
                    }
                },

                // Reap finished handlers so the set never grows unbounded.
                Some(_) = handlers.join_next(), if !handlers.is_empty() => {}
            }
        }

        if !handlers.is_empty() {
            log::info!("Draining {} in-flight handler(s)", handlers.len());
            while handlers.join_next().await.is_some() {}
        }

        if let Err(e) = self.connection.close(200, "shutdown").await {
            log::warn!("Broker connection did not close cleanly: {e}");
        }

        match stream_error {
            Some(e) => Err(BrokerError::Protocol(e)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Per-delivery handling
// ---------------------------------------------------------------------------

/// Run the pipeline for one delivery and make the single ack/nack decision.
///
/// Never panics and never propagates: a handler failure must not take the
/// consumption loop down with it.
async fn handle_delivery(processor: Arc<RecapProcessor>, delivery: Delivery) {
    match processor.process(&delivery.data).await {
        Ok(summary) => {
            for line in &summary.broken_records {
                log::info!("{line}");
            }
            if let Some(path) = &summary.audio_path {
                log::info!(
                    "Week {} '{}' broadcast ready: {}",
                    summary.week,
                    summary.episode,
                    path.display()
                );
            }
            if let Err(e) = delivery.ack(BasicAckOptions::default()).await {
                log::error!(
                    "Failed to ack week {} '{}': {e}",
                    summary.week,
                    summary.episode
                );
            }
        }
        Err(e) => {
            log::error!("Recap processing failed: {e} — returning the message for redelivery");
            let nack = delivery
                .nack(BasicNackOptions {
                    requeue: true,
                    ..BasicNackOptions::default()
                })
                .await;
            if let Err(nack_err) = nack {
                log::error!("Failed to nack delivery: {nack_err}");
            }
        }
    }
}
