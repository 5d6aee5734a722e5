//! The persisted record book: one entry per tracked statistical category.

use serde::{Deserialize, Serialize};

/// Initial value of the lowest-team-score category. Starts high so any
/// real score qualifies as the first record low.
pub const LOWEST_SCORE_SENTINEL: f64 = 999.0;

// ---------------------------------------------------------------------------
// RecordEntry
// ---------------------------------------------------------------------------

/// The current best-known value for one statistical category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordEntry {
    /// Stores yards, score, or count depending on the category.
    pub value: f64,
    /// Record holder — a team name for team categories, a player name
    /// otherwise. `"None"` until the category is first claimed.
    pub holder: String,
    /// The holder's team (player categories only).
    pub team: String,
    /// Extra info, such as the holder's position.
    pub detail: String,
    /// League week the record was set in.
    pub week: u32,
    /// `YYYY-MM-DD` local date the record was set on.
    pub date: String,
}

impl Default for RecordEntry {
    fn default() -> Self {
        Self {
            value: 0.0,
            holder: "None".into(),
            team: String::new(),
            detail: String::new(),
            week: 0,
            date: String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// LeagueRecords
// ---------------------------------------------------------------------------

/// The full record book — a fixed set of categories, every one always
/// present. Serialised as a single pretty-printed JSON document that is
/// rewritten in full on every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueRecords {
    pub highest_team_score: RecordEntry,
    pub lowest_team_score: RecordEntry,

    pub highest_player_score: RecordEntry,

    // QB
    pub most_passing_yards: RecordEntry,
    pub most_passing_tds: RecordEntry,

    // RB
    pub most_rushing_yards: RecordEntry,

    // WR/TE
    pub most_receiving_yards: RecordEntry,
    pub most_receptions: RecordEntry,

    // Any position
    pub most_total_tds: RecordEntry,
    pub most_defensive_points: RecordEntry,
}

impl Default for LeagueRecords {
    fn default() -> Self {
        Self {
            highest_team_score: RecordEntry::default(),
            lowest_team_score: RecordEntry {
                value: LOWEST_SCORE_SENTINEL,
                ..RecordEntry::default()
            },
            highest_player_score: RecordEntry::default(),
            most_passing_yards: RecordEntry::default(),
            most_passing_tds: RecordEntry::default(),
            most_rushing_yards: RecordEntry::default(),
            most_receiving_yards: RecordEntry::default(),
            most_receptions: RecordEntry::default(),
            most_total_tds: RecordEntry::default(),
            most_defensive_points: RecordEntry::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_entry_is_unclaimed() {
        let entry = RecordEntry::default();
        assert_eq!(entry.value, 0.0);
        assert_eq!(entry.holder, "None");
        assert!(entry.team.is_empty());
        assert_eq!(entry.week, 0);
    }

    #[test]
    fn lowest_score_starts_at_sentinel() {
        let book = LeagueRecords::default();
        assert_eq!(book.lowest_team_score.value, LOWEST_SCORE_SENTINEL);
        assert_eq!(book.highest_team_score.value, 0.0);
    }

    #[test]
    fn json_round_trip_preserves_values() {
        let mut book = LeagueRecords::default();
        book.most_passing_yards = RecordEntry {
            value: 412.0,
            holder: "Josh Allen".into(),
            team: "Hawks".into(),
            detail: String::new(),
            week: 7,
            date: "2025-11-02".into(),
        };

        let json = serde_json::to_string_pretty(&book).unwrap();
        let reloaded: LeagueRecords = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, book);
    }

    #[test]
    fn partial_document_fills_missing_categories() {
        // A document written by an older build may lack newer categories.
        let json = r#"{
            "highest_team_score": { "value": 150.0, "holder": "Hawks", "week": 3 }
        }"#;
        let book: LeagueRecords = serde_json::from_str(json).unwrap();
        assert_eq!(book.highest_team_score.value, 150.0);
        assert_eq!(book.highest_team_score.holder, "Hawks");
        assert_eq!(book.lowest_team_score.value, LOWEST_SCORE_SENTINEL);
        assert_eq!(book.most_receptions.holder, "None");
    }
}
