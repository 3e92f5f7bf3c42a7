//! Domino pairs tournament: models, round engine, persistence and the clock tick source.

pub mod events;
pub mod export;
pub mod logic;
pub mod models;
pub mod persistence;
pub mod session;
pub mod ticker;

pub use events::{Cue, EventSink, LogSink, Notice, NoticeBoard, TournamentEvent};
pub use export::standings_csv;
pub use logic::{
    advance_round, aggregate_round, configure, correct_history, finish_round, pair_round,
    rank_teams, rename_team, reset, set_score, set_sound, start_tournament, tick_clock,
    toggle_clock, toggle_match, winners, RoundPairing,
};
pub use models::{
    Clock, ClockEvent, ClockStatus, GameMatch, MatchId, ScoreEntry, Side, Team, TeamId,
    Threshold, Tournament, TournamentConfig, TournamentError, TournamentId, TournamentState,
};
pub use persistence::{JsonFileStore, MemoryStore, Store};
pub use session::Session;
pub use ticker::{SharedSession, Ticker};
