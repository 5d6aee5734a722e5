//! Broker connection lifecycle: bounded-retry connect, queue declaration,
//! and the prefetch bound.
//!
//! Startup either reaches `Connected` or ends in the terminal `Failed`
//! state after a fixed number of attempts — the process must abort rather
//! than run half-initialised.

use std::time::Duration;

use lapin::{
    options::{BasicQosOptions, QueueDeclareOptions},
    types::FieldTable,
    Channel, Connection, ConnectionProperties,
};
use thiserror::Error;

use crate::config::BrokerConfig;

// ---------------------------------------------------------------------------
// BrokerError
// ---------------------------------------------------------------------------

/// All errors that can arise from the broker subsystem.
#[derive(Debug, Error)]
pub enum BrokerError {
    /// The broker never became reachable within the retry budget.
    #[error("could not reach broker at {uri} after {attempts} attempts: {source}")]
    ConnectExhausted {
        uri: String,
        attempts: u32,
        #[source]
        source: lapin::Error,
    },

    /// Channel setup, consume registration, or the delivery stream failed.
    #[error("broker protocol failure: {0}")]
    Protocol(#[from] lapin::Error),
}

// ---------------------------------------------------------------------------
// ConnectionState
// ---------------------------------------------------------------------------

/// States of the broker connection lifecycle.
///
/// ```text
/// Disconnected ──start──▶ Connecting ──ok──▶ Connected ──consume──▶ Consuming
///                             │
///                             └─retries exhausted──▶ Failed   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// No connection attempt has been made yet.
    Disconnected,
    /// A connection attempt (possibly a retry) is in progress.
    Connecting,
    /// Connection, channel and queue are ready; not yet consuming.
    Connected,
    /// The delivery loop is running.
    Consuming,
    /// The retry budget is exhausted. Terminal — the process aborts.
    Failed,
}

impl ConnectionState {
    /// A short human-readable label suitable for log lines.
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Consuming => "consuming",
            ConnectionState::Failed => "failed",
        }
    }

    /// Returns `true` for states no transition leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ConnectionState::Failed)
    }
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

// ---------------------------------------------------------------------------
// ConnectionManager
// ---------------------------------------------------------------------------

/// Owns the connect/declare handshake with the broker.
///
/// [`connect`](Self::connect) retries a bounded number of times with a
/// fixed delay, then gives up for good; there is no background
/// reconnection once consumption has started.
#[derive(Debug)]
pub struct ConnectionManager {
    config: BrokerConfig,
    state: ConnectionState,
}

impl ConnectionManager {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            config,
            state: ConnectionState::Disconnected,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Open a connection, declare the recap queue, and apply the prefetch
    /// bound. Returns the live connection together with its channel — the
    /// connection must be kept alive for as long as the channel is in use.
    ///
    /// The queue is declared non-durable, non-exclusive, no auto-delete:
    /// it survives individual consumer disconnects but not a broker
    /// restart.
    ///
    /// # Errors
    ///
    /// [`BrokerError::ConnectExhausted`] after `connect_attempts` failed
    /// attempts (the manager is left in [`ConnectionState::Failed`]), or
    /// [`BrokerError::Protocol`] when the post-connect setup fails.
    pub async fn connect(&mut self) -> Result<(Connection, Channel), BrokerError> {
        let uri = self.config.amqp_uri();
        self.state = ConnectionState::Connecting;

        let mut attempt = 1;
        let connection = loop {
            match Connection::connect(&uri, ConnectionProperties::default()).await {
                Ok(connection) => break connection,
                Err(source) => {
                    if attempt >= self.config.connect_attempts {
                        self.state = ConnectionState::Failed;
                        return Err(BrokerError::ConnectExhausted {
                            uri,
                            attempts: attempt,
                            source,
                        });
                    }
                    log::warn!(
                        "Broker at {uri} not reachable (attempt {attempt}/{}) — retrying in {}s",
                        self.config.connect_attempts,
                        self.config.connect_retry_secs
                    );
                    tokio::time::sleep(Duration::from_secs(self.config.connect_retry_secs)).await;
                    attempt += 1;
                }
            }
        };

        let channel = connection.create_channel().await?;
        channel
            .queue_declare(
                &self.config.queue,
                QueueDeclareOptions {
                    durable: false,
                    exclusive: false,
                    auto_delete: false,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await?;
        channel
            .basic_qos(self.config.prefetch, BasicQosOptions::default())
            .await?;

        self.state = ConnectionState::Connected;
        log::info!(
            "Connected to broker at {uri}; queue '{}' declared (prefetch {})",
            self.config.queue,
            self.config.prefetch
        );
        Ok((connection, channel))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
