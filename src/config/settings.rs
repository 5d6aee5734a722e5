//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.
//! Deployment environments override individual values through environment
//! variables (see [`AppConfig::overlay_env`]).

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

// ---------------------------------------------------------------------------
// BrokerConfig
// ---------------------------------------------------------------------------

/// Settings for the message-broker connection and consumption loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    /// Broker host name or address.
    pub host: String,
    /// AMQP port.
    pub port: u16,
    /// Name of the queue carrying recap events.
    pub queue: String,
    /// Maximum connection attempts before startup is declared failed.
    pub connect_attempts: u32,
    /// Fixed delay between connection attempts, in seconds.
    pub connect_retry_secs: u64,
    /// Per-consumer unacknowledged-delivery bound (`basic.qos`).
    ///
    /// Caps how many handlers can be in flight at once — without it the
    /// broker pushes deliveries as fast as they arrive.
    pub prefetch: u16,
}

impl BrokerConfig {
    /// AMQP connection URI for this broker.
    pub fn amqp_uri(&self) -> String {
        format!("amqp://{}:{}", self.host, self.port)
    }
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 5672,
            queue: "game_stats_queue".into(),
            connect_attempts: 5,
            connect_retry_secs: 3,
            prefetch: 4,
        }
    }
}

// ---------------------------------------------------------------------------
// SynthesisConfig
// ---------------------------------------------------------------------------

/// Settings for the speech-synthesis capability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    /// Subscription key — required; there is no anonymous endpoint.
    pub key: String,
    /// Service region (selects the endpoint host).
    pub region: String,
    /// Audio container/encoding requested from the service.
    pub output_format: String,
    /// Maximum seconds to wait for one synthesis call before timing out.
    pub timeout_secs: u64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            region: "westus2".into(),
            output_format: "riff-24khz-16bit-mono-pcm".into(),
            timeout_secs: 30,
        }
    }
}

// ---------------------------------------------------------------------------
// VoiceConfig
// ---------------------------------------------------------------------------

/// Voice assignments for the two-host broadcast script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    /// Voice for the lead host (and for any untagged line).
    pub primary: String,
    /// Voice for the color commentator.
    pub secondary: String,
    /// Expressive style applied to the primary voice.
    pub primary_style: String,
    /// Locale declared on the markup document.
    pub language: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            primary: "en-US-AndrewMultilingualNeural".into(),
            secondary: "en-US-DavisNeural".into(),
            primary_style: "newscast".into(),
            language: "en-US".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// OutputConfig
// ---------------------------------------------------------------------------

/// Where audio artifacts are written.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory; episodes land in `<root>/Week_<n>/<episode>.wav`.
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Output"),
        }
    }
}

// ---------------------------------------------------------------------------
// LedgerConfig
// ---------------------------------------------------------------------------

/// Where the league record ledger document lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Path of the JSON ledger document, rewritten in full on every save.
    pub file: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("league_records.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use fantasy_broadcaster::config::AppConfig;
///
/// // Load (returns Default when file is missing), then apply env overrides.
/// let config = AppConfig::load().unwrap().overlay_env();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Broker connection / consumption settings.
    pub broker: BrokerConfig,
    /// Speech-synthesis endpoint settings.
    pub synthesis: SynthesisConfig,
    /// Voice assignments for script rendering.
    pub voices: VoiceConfig,
    /// Audio artifact output settings.
    pub output: OutputConfig,
    /// Record ledger persistence settings.
    pub ledger: LedgerConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet
    /// (first-run scenario) so callers never need to special-case a missing
    /// file.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply the process environment on top of the file-based settings.
    ///
    /// Recognised variables: `RABBITMQ_HOST`, `SPEECH_KEY`, `SPEECH_REGION`,
    /// `OUTPUT_ROOT`.
    pub fn overlay_env(self) -> Self {
        self.overlay(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary lookup function (useful for tests).
    pub fn overlay<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("RABBITMQ_HOST") {
            self.broker.host = host;
        }
        if let Some(key) = lookup("SPEECH_KEY") {
            self.synthesis.key = key;
        }
        if let Some(region) = lookup("SPEECH_REGION") {
            self.synthesis.region = region;
        }
        if let Some(root) = lookup("OUTPUT_ROOT") {
            self.output.root = PathBuf::from(root);
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
