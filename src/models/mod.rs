//! Data structures for the domino tournament: teams, matches, clock, tournament state.

mod clock;
mod game;
mod team;
mod tournament;

pub use clock::{Clock, ClockEvent, ClockStatus, Threshold, ATTENTION_AT, COUNTDOWN_FROM, WARNING_AT};
pub use game::{is_score_input, match_id, GameMatch, MatchId, ScoreEntry, Side};
pub use team::{Team, TeamId};
pub use tournament::{
    Tournament, TournamentConfig, TournamentError, TournamentId, TournamentState, MAX_TABLES,
};
