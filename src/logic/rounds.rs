//! Round lifecycle: close (Active -> RoundReview), advance (-> Active or Complete),
//! history correction, clock control and reset.

use crate::events::TournamentEvent;
use crate::logic::aggregate::aggregate_round;
use crate::logic::pairing::pair_round;
use crate::logic::standings::{rank_teams, winners};
use crate::models::{Clock, TeamId, Tournament, TournamentError, TournamentState};
use std::collections::HashMap;

/// Rank, pair, clear scores and start the clock for `current_round`.
pub(crate) fn begin_round(tournament: &mut Tournament) -> Vec<TournamentEvent> {
    let round = tournament.current_round;
    let pairing = pair_round(&rank_teams(&tournament.teams), round);
    tournament.matches = pairing.matches;
    tournament.bye = pairing.bye;
    tournament.scores = HashMap::new();
    if let Some(id) = pairing.bye {
        log::info!("Round {}: team {} has a bye", round, id);
    }

    let mut events = vec![TournamentEvent::RoundStarted { round }];
    let seconds = tournament.config.timer_duration_secs;
    if seconds > 0 {
        tournament.clock = Some(Clock::start(seconds));
        events.push(TournamentEvent::ClockStarted { seconds });
    } else {
        tournament.clock = None;
    }
    log::info!(
        "Round {} started on {} tables",
        round,
        tournament.matches.len()
    );
    events
}

/// Close the current round. Every match must be confirmed.
pub fn finish_round(tournament: &mut Tournament) -> Result<Vec<TournamentEvent>, TournamentError> {
    if tournament.state != TournamentState::Active {
        return Err(TournamentError::InvalidState);
    }
    let unconfirmed = tournament.unconfirmed_count();
    if unconfirmed > 0 {
        return Err(TournamentError::RoundIncomplete { unconfirmed });
    }

    tournament.teams = aggregate_round(&tournament.teams, &tournament.matches, &tournament.scores)?;
    if let Some(clock) = tournament.clock.as_mut() {
        clock.stop();
    }
    tournament.state = TournamentState::RoundReview;
    log::info!("Round {} finished", tournament.current_round);
    Ok(vec![TournamentEvent::RoundFinished {
        round: tournament.current_round,
    }])
}

/// Leave the review: next round, or Complete after the last one.
pub fn advance_round(tournament: &mut Tournament) -> Result<Vec<TournamentEvent>, TournamentError> {
    if tournament.state != TournamentState::RoundReview {
        return Err(TournamentError::InvalidState);
    }
    if tournament.is_last_round() {
        tournament.state = TournamentState::Complete;
        tournament.clock = None;
        let winners = winners(&tournament.teams);
        log::info!("Tournament {} complete, winners {:?}", tournament.id, winners);
        return Ok(vec![TournamentEvent::TournamentComplete { winners }]);
    }

    tournament.current_round += 1;
    tournament.state = TournamentState::Active;
    Ok(begin_round(tournament))
}

/// Overwrite one history cell and recompute the team's total.
///
/// Unparsable or negative input becomes 0. `rounds_won` is left as is.
pub fn correct_history(
    tournament: &mut Tournament,
    team_id: TeamId,
    round_index: usize,
    raw: &str,
) -> Result<TournamentEvent, TournamentError> {
    if tournament.state == TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let value = raw
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|v| *v >= 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX))
        .unwrap_or(0);

    let team = tournament
        .teams
        .iter_mut()
        .find(|t| t.id == team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    let cell = team
        .history
        .get_mut(round_index)
        .ok_or(TournamentError::RoundIndexOutOfRange {
            team_id,
            index: round_index,
        })?;
    *cell = value;
    team.recompute_total();
    log::info!(
        "Team {} round {} corrected to {} (total {})",
        team_id,
        round_index + 1,
        value,
        team.total_points
    );
    Ok(TournamentEvent::HistoryCorrected {
        team_id,
        round_index,
    })
}

/// Pause or resume the round clock. No-op without a running or paused clock.
pub fn toggle_clock(tournament: &mut Tournament) -> Vec<TournamentEvent> {
    let Some(clock) = tournament.clock.as_mut() else {
        return Vec::new();
    };
    if !clock.toggle() {
        return Vec::new();
    }
    vec![TournamentEvent::ClockToggled {
        running: clock.is_running(),
    }]
}

/// One elapsed second on the round clock.
pub fn tick_clock(tournament: &mut Tournament) -> Vec<TournamentEvent> {
    tournament
        .clock
        .as_mut()
        .and_then(|c| c.tick())
        .map(TournamentEvent::Clock)
        .into_iter()
        .collect()
}

pub fn set_sound(tournament: &mut Tournament, enabled: bool) -> TournamentEvent {
    tournament.sound_enabled = enabled;
    TournamentEvent::SoundChanged { enabled }
}

/// Discard everything and return to a fresh Setup with the default configuration.
pub fn reset(tournament: &mut Tournament) -> TournamentEvent {
    log::info!("Tournament {} reset", tournament.id);
    *tournament = Tournament::default();
    TournamentEvent::Reset
}
