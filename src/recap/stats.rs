//! Team and player performance records for one game.

use std::fmt;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// Lineup-slot classification of a rostered player.
///
/// The wire format carries a free-form string; anything outside the
/// slots the ledger tracks is preserved verbatim in [`Position::Other`]
/// so announcements can still display it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Position {
    Quarterback,
    RunningBack,
    WideReceiver,
    TightEnd,
    /// Team defense / special teams (`D/ST`).
    Defense,
    /// Any slot the ledger has no dedicated records for (K, FLEX, …).
    Other(String),
}

impl From<String> for Position {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "QB" => Position::Quarterback,
            "RB" => Position::RunningBack,
            "WR" => Position::WideReceiver,
            "TE" => Position::TightEnd,
            "D/ST" => Position::Defense,
            _ => Position::Other(raw),
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::Other(String::new())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Quarterback => f.write_str("QB"),
            Position::RunningBack => f.write_str("RB"),
            Position::WideReceiver => f.write_str("WR"),
            Position::TightEnd => f.write_str("TE"),
            Position::Defense => f.write_str("D/ST"),
            Position::Other(raw) => f.write_str(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// PlayerStats
// ---------------------------------------------------------------------------

/// One player's line in one game.
///
/// Every numeric field defaults to `0.0` when the producer did not report
/// it; the ledger's strict `>` comparisons make an unreported stat a no-op.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerStats {
    pub name: String,
    pub position: Position,
    /// Total fantasy points scored (for `D/ST` this is the defensive score).
    pub points: f64,
    pub passing_yards: f64,
    #[serde(rename = "passingTDs", alias = "passingTds")]
    pub passing_tds: f64,
    pub rushing_yards: f64,
    pub receiving_yards: f64,
    pub receptions: f64,
    #[serde(rename = "totalTDs", alias = "totalTds")]
    pub total_tds: f64,
}

// ---------------------------------------------------------------------------
// TeamStats
// ---------------------------------------------------------------------------

/// One team's performance in one game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamStats {
    pub name: String,
    pub score: f64,
    pub week: u32,
}

impl TeamStats {
    pub fn new(name: impl Into<String>, score: f64, week: u32) -> Self {
        Self {
            name: name.into(),
            score,
            week,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
