//! Configuration module for the fantasy broadcaster.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for each subsystem,
//! `AppPaths` for cross-platform data directories, TOML persistence via
//! `AppConfig::load` / `AppConfig::save`, and the environment-variable
//! overlay the deployment environment provides (`RABBITMQ_HOST`,
//! `SPEECH_KEY`, `SPEECH_REGION`, `OUTPUT_ROOT`).

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{
    AppConfig, BrokerConfig, LedgerConfig, OutputConfig, SynthesisConfig, VoiceConfig,
};
