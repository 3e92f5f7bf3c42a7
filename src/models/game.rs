//! Match (one table in one round), Side, and the raw ScoreEntry typed by the scorekeeper.

use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};

/// Identifier for a match, unique per round and table (e.g. `R2-M3`).
pub type MatchId = String;

/// Which side of a match a score belongs to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Team1,
    Team2,
}

/// A single match: two teams at one table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based, stable within a round.
    pub table: u32,
    /// Snapshot of the team as ranked when the round was paired.
    pub team1: Team,
    pub team2: Team,
    /// Locked; scores can only change after re-opening.
    pub is_completed: bool,
}

impl GameMatch {
    pub fn new(round: u32, table: u32, team1: Team, team2: Team) -> Self {
        Self {
            id: match_id(round, table),
            table,
            team1,
            team2,
            is_completed: false,
        }
    }

    /// Which side the team plays on, if it plays in this match.
    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.team1.id == team_id {
            Some(Side::Team1)
        } else if self.team2.id == team_id {
            Some(Side::Team2)
        } else {
            None
        }
    }
}

/// Deterministic match id for a round and table.
pub fn match_id(round: u32, table: u32) -> MatchId {
    format!("R{round}-M{table}")
}

/// Raw score strings as typed, before confirmation. Empty string counts as unset.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team1_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team2_score: Option<String>,
}

impl ScoreEntry {
    pub fn get(&self, side: Side) -> Option<&str> {
        match side {
            Side::Team1 => self.team1_score.as_deref(),
            Side::Team2 => self.team2_score.as_deref(),
        }
    }

    pub fn set(&mut self, side: Side, raw: String) {
        match side {
            Side::Team1 => self.team1_score = Some(raw),
            Side::Team2 => self.team2_score = Some(raw),
        }
    }

    /// Both sides present and non-empty.
    pub fn is_complete(&self) -> bool {
        [Side::Team1, Side::Team2]
            .iter()
            .all(|&s| self.get(s).is_some_and(|v| !v.is_empty()))
    }

    /// The confirmed integer for a side. Missing or empty values read as 0.
    pub fn points(&self, side: Side) -> u32 {
        self.get(side)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0)
    }
}

/// Accepts an empty string, or ASCII digits whose value fits a round score.
pub fn is_score_input(raw: &str) -> bool {
    raw.is_empty() || (raw.bytes().all(|b| b.is_ascii_digit()) && raw.parse::<u32>().is_ok())
}
