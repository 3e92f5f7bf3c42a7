//! Per-match score entry and confirmation.

use crate::events::TournamentEvent;
use crate::models::{is_score_input, Side, Tournament, TournamentError, TournamentState};

/// Store a raw score for one side of a match.
///
/// Input with anything but ASCII digits, or a number too large for a round score, is ignored
/// and `Ok(false)` is returned; the previous value stays. An empty string clears the side.
pub fn set_score(
    tournament: &mut Tournament,
    match_id: &str,
    side: Side,
    raw: &str,
) -> Result<bool, TournamentError> {
    if tournament.state != TournamentState::Active {
        return Err(TournamentError::InvalidState);
    }
    if tournament.get_match(match_id)?.is_completed {
        return Err(TournamentError::MatchLocked(match_id.to_string()));
    }
    if !is_score_input(raw) {
        log::warn!("Rejected score {:?} for {} {:?}", raw, match_id, side);
        return Ok(false);
    }
    tournament
        .scores
        .entry(match_id.to_string())
        .or_default()
        .set(side, raw.to_string());
    Ok(true)
}

/// Confirm an open match, or re-open a confirmed one.
///
/// Confirming needs both scores present and non-empty. Re-opening is unconditional.
pub fn toggle_match(
    tournament: &mut Tournament,
    match_id: &str,
) -> Result<TournamentEvent, TournamentError> {
    if tournament.state != TournamentState::Active {
        return Err(TournamentError::InvalidState);
    }
    let complete = tournament
        .scores
        .get(match_id)
        .is_some_and(|s| s.is_complete());
    let m = tournament.get_match_mut(match_id)?;
    if m.is_completed {
        m.is_completed = false;
        log::debug!("Re-opened {}", match_id);
        return Ok(TournamentEvent::MatchReopened {
            match_id: match_id.to_string(),
        });
    }
    if !complete {
        return Err(TournamentError::ScoresRequired {
            match_id: match_id.to_string(),
        });
    }
    m.is_completed = true;
    log::debug!("Confirmed {}", match_id);
    Ok(TournamentEvent::MatchConfirmed {
        match_id: match_id.to_string(),
    })
}
