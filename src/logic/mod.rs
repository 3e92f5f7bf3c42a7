//! Tournament business logic: standings, pairing, scoring, round close, lifecycle.

mod aggregate;
mod pairing;
mod rounds;
mod scoring;
mod setup;
mod standings;

pub use aggregate::aggregate_round;
pub use pairing::{pair_round, RoundPairing};
pub use rounds::{
    advance_round, correct_history, finish_round, reset, set_sound, tick_clock, toggle_clock,
};
pub use scoring::{set_score, toggle_match};
pub use setup::{configure, rename_team, start_tournament};
pub use standings::{rank_teams, winners};
