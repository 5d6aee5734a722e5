//! The inbound recap-event wire schema.
//!
//! Field names match what the scraper publishes: a mix of `camelCase`
//! (`shortName`, `ai_recap` aside) and `snake_case` (`home_team`,
//! `home_score`, …). All fields are optional at parse time; rosters that
//! are absent, `null`, or not a recognisable player array decode as empty
//! rather than failing the message.

use serde::{Deserialize, Deserializer};

use super::stats::{PlayerStats, TeamStats};

// ---------------------------------------------------------------------------
// GameRecapEvent
// ---------------------------------------------------------------------------

/// One queue message: a single game's final stats plus an optional
/// narrative script.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GameRecapEvent {
    pub week: u32,

    #[serde(rename = "shortName")]
    pub short_name: Option<String>,

    #[serde(rename = "home_team")]
    pub home_team: Option<String>,
    #[serde(rename = "home_score")]
    pub home_score: f64,
    #[serde(rename = "home_roster", deserialize_with = "lenient_roster")]
    pub home_roster: Vec<PlayerStats>,

    #[serde(rename = "away_team")]
    pub away_team: Option<String>,
    #[serde(rename = "away_score")]
    pub away_score: f64,
    #[serde(rename = "away_roster", deserialize_with = "lenient_roster")]
    pub away_roster: Vec<PlayerStats>,

    pub storylines: Option<Vec<String>>,

    /// The narrative script, when the producer generated one. Absence (or a
    /// blank string) suppresses the synthesis step entirely.
    #[serde(rename = "ai_recap")]
    pub ai_recap: Option<String>,
}

impl GameRecapEvent {
    /// Episode name used for the audio artifact file stem.
    pub fn episode_name(&self) -> &str {
        match self.short_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => "Recap",
        }
    }

    /// The narrative script, if present and non-blank.
    pub fn script(&self) -> Option<&str> {
        self.ai_recap
            .as_deref()
            .filter(|script| !script.trim().is_empty())
    }

    /// Home side as a [`TeamStats`] record.
    pub fn home_stats(&self) -> TeamStats {
        TeamStats::new(
            self.home_team.clone().unwrap_or_default(),
            self.home_score,
            self.week,
        )
    }

    /// Away side as a [`TeamStats`] record.
    pub fn away_stats(&self) -> TeamStats {
        TeamStats::new(
            self.away_team.clone().unwrap_or_default(),
            self.away_score,
            self.week,
        )
    }
}

// ---------------------------------------------------------------------------
// Lenient roster decoding
// ---------------------------------------------------------------------------

/// Decode a roster field that may be absent, `null`, or shaped wrong.
///
/// Roster extraction is best-effort: entries that do not look like a
/// player record are dropped, and a roster that is not an array at all
/// becomes empty. Only a payload that is not JSON fails the message.
fn lenient_roster<'de, D>(deserializer: D) -> Result<Vec<PlayerStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect(),
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
