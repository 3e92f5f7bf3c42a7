//! Tournament, TournamentConfig, TournamentState and TournamentError.

use crate::models::clock::Clock;
use crate::models::game::{GameMatch, MatchId, ScoreEntry};
use crate::models::team::{Team, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Upper bound on tables accepted from setup.
pub const MAX_TABLES: u32 = 50;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Confirmation attempted without both scores entered.
    ScoresRequired { match_id: MatchId },
    /// Round close attempted with matches still open.
    RoundIncomplete { unconfirmed: usize },
    /// Tournament is not in a state that allows this action.
    InvalidState,
    /// No match with this id in the current round.
    MatchNotFound(MatchId),
    /// Scores of a confirmed match cannot change until it is re-opened.
    MatchLocked(MatchId),
    TeamNotFound(TeamId),
    /// Fewer than two teams registered.
    NotEnoughTeams,
    /// History cell does not exist for this team.
    RoundIndexOutOfRange { team_id: TeamId, index: usize },
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::ScoresRequired { .. } => {
                write!(f, "Both scores are required before confirming")
            }
            TournamentError::RoundIncomplete { unconfirmed: 1 } => {
                write!(f, "1 match remains unconfirmed")
            }
            TournamentError::RoundIncomplete { unconfirmed } => {
                write!(f, "{} matches remain unconfirmed", unconfirmed)
            }
            TournamentError::InvalidState => write!(f, "Invalid state for this action"),
            TournamentError::MatchNotFound(id) => write!(f, "Match {} not found", id),
            TournamentError::MatchLocked(id) => {
                write!(f, "Match {} is confirmed; re-open it to edit scores", id)
            }
            TournamentError::TeamNotFound(id) => write!(f, "Team {} not found", id),
            TournamentError::NotEnoughTeams => write!(f, "Need at least 2 teams to start"),
            TournamentError::RoundIndexOutOfRange { team_id, index } => {
                write!(f, "Team {} has no result for round {}", team_id, index + 1)
            }
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament session; regenerated on reset.
pub type TournamentId = Uuid;

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Registering teams and choosing tables, rounds and timer.
    #[default]
    Setup,
    /// A round is being played; scores are entered and confirmed per table.
    Active,
    /// Round closed; standings shown before the next round.
    RoundReview,
    /// All rounds played; winners decided.
    Complete,
}

/// Tables, rounds and per-round timer.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    pub total_tables: u32,
    pub total_rounds: u32,
    /// 0 means no timer.
    pub timer_duration_secs: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            total_tables: 5,
            total_rounds: 5,
            timer_duration_secs: 0,
        }
    }
}

impl TournamentConfig {
    /// Build from interactive values. Tables are clamped to `1..=MAX_TABLES`, rounds to at
    /// least 1 and seconds to `0..=59`.
    pub fn new(tables: u32, rounds: u32, timer_minutes: u32, timer_seconds: u32) -> Self {
        Self {
            total_tables: tables.clamp(1, MAX_TABLES),
            total_rounds: rounds.max(1),
            timer_duration_secs: timer_minutes
                .saturating_mul(60)
                .saturating_add(timer_seconds.min(59)),
        }
    }

    /// Teams required to fill every table.
    pub fn team_count(&self) -> usize {
        self.total_tables as usize * 2
    }
}

/// Full tournament state: configuration, teams, current round's matches and scores, clock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub config: TournamentConfig,
    pub state: TournamentState,
    /// 1-based; meaningful once started.
    pub current_round: u32,
    /// Registration order.
    pub teams: Vec<Team>,
    /// Current round only.
    pub matches: Vec<GameMatch>,
    /// Raw score entry per match of the current round.
    pub scores: HashMap<MatchId, ScoreEntry>,
    /// Team left unpaired this round (odd team count).
    pub bye: Option<TeamId>,
    pub clock: Option<Clock>,
    pub sound_enabled: bool,
}

impl Default for Tournament {
    fn default() -> Self {
        Self::new(TournamentConfig::default())
    }
}

impl Tournament {
    /// Create a tournament in Setup with one blank team per seat.
    pub fn new(config: TournamentConfig) -> Self {
        let teams = (1..=config.team_count() as TeamId).map(Team::new).collect();
        Self {
            id: Uuid::new_v4(),
            config,
            state: TournamentState::Setup,
            current_round: 1,
            teams,
            matches: Vec::new(),
            scores: HashMap::new(),
            bye: None,
            clock: None,
            sound_enabled: true,
        }
    }

    /// Create a tournament in Setup with the given teams (their count need not match the config).
    pub fn with_teams(teams: Vec<Team>, config: TournamentConfig) -> Self {
        Self {
            teams,
            ..Self::new(config)
        }
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn get_match(&self, id: &str) -> Result<&GameMatch, TournamentError> {
        self.matches
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| TournamentError::MatchNotFound(id.to_string()))
    }

    pub fn get_match_mut(&mut self, id: &str) -> Result<&mut GameMatch, TournamentError> {
        self.matches
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| TournamentError::MatchNotFound(id.to_string()))
    }

    /// Matches of the current round not yet confirmed.
    pub fn unconfirmed_count(&self) -> usize {
        self.matches.iter().filter(|m| !m.is_completed).count()
    }

    pub fn is_last_round(&self) -> bool {
        self.current_round >= self.config.total_rounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_is_clamped() {
        let c = TournamentConfig::new(0, 0, 2, 75);
        assert_eq!(c.total_tables, 1);
        assert_eq!(c.total_rounds, 1);
        assert_eq!(c.timer_duration_secs, 179);

        let c = TournamentConfig::new(500, 3, 0, 0);
        assert_eq!(c.total_tables, MAX_TABLES);
        assert_eq!(c.timer_duration_secs, 0);
    }

    #[test]
    fn new_tournament_seats_two_teams_per_table() {
        let t = Tournament::new(TournamentConfig::new(3, 2, 0, 0));
        assert_eq!(t.state, TournamentState::Setup);
        assert_eq!(t.teams.len(), 6);
        let ids: Vec<_> = t.teams.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn round_incomplete_message_names_count() {
        let e = TournamentError::RoundIncomplete { unconfirmed: 3 };
        assert_eq!(e.to_string(), "3 matches remain unconfirmed");
        let e = TournamentError::RoundIncomplete { unconfirmed: 1 };
        assert_eq!(e.to_string(), "1 match remains unconfirmed");
    }
}
