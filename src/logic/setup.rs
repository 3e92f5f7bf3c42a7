//! Setup phase: configuration, team names, and the start transition (Setup -> Active).

use crate::events::TournamentEvent;
use crate::logic::rounds::begin_round;
use crate::models::{Team, TeamId, Tournament, TournamentConfig, TournamentError, TournamentState};

/// Apply a new configuration (Setup only). The roster is resized to two teams per table;
/// existing registrations are kept, new seats get fresh ids.
pub fn configure(
    tournament: &mut Tournament,
    config: TournamentConfig,
) -> Result<(), TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    let wanted = config.team_count();
    let mut teams = tournament.teams.clone();
    teams.truncate(wanted);
    while teams.len() < wanted {
        let id = teams.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        teams.push(Team::new(id));
    }
    tournament.teams = teams;
    tournament.config = config;
    log::info!(
        "Configured {} tables, {} rounds, timer {}s",
        config.total_tables,
        config.total_rounds,
        config.timer_duration_secs
    );
    Ok(())
}

/// Set a team's player names. Allowed in every phase: registration during Setup, name
/// correction afterwards. Points and history are never touched.
///
/// Once started, a blank name keeps the previous one. The current round's match snapshots
/// pick up the new names.
pub fn rename_team(
    tournament: &mut Tournament,
    team_id: TeamId,
    player1: &str,
    player2: &str,
) -> Result<TournamentEvent, TournamentError> {
    let current = tournament
        .team(team_id)
        .ok_or(TournamentError::TeamNotFound(team_id))?;
    let started = tournament.state != TournamentState::Setup;
    let pick = |new: &str, old: &str| {
        if started && new.trim().is_empty() {
            old.to_string()
        } else if started {
            new.trim().to_string()
        } else {
            new.to_string()
        }
    };
    let player1 = pick(player1, &current.player1);
    let player2 = pick(player2, &current.player2);

    tournament.teams = tournament
        .teams
        .iter()
        .map(|t| {
            if t.id == team_id {
                Team {
                    player1: player1.clone(),
                    player2: player2.clone(),
                    ..t.clone()
                }
            } else {
                t.clone()
            }
        })
        .collect();
    for m in &mut tournament.matches {
        for snapshot in [&mut m.team1, &mut m.team2] {
            if snapshot.id == team_id {
                snapshot.player1 = player1.clone();
                snapshot.player2 = player2.clone();
            }
        }
    }
    if started {
        if let Some(team) = tournament.team(team_id) {
            log::info!("Team {} renamed to {}", team_id, team.display_name());
        }
    }
    Ok(TournamentEvent::NamesUpdated { team_id })
}

/// Start the tournament: fill blank names, zero every record, pair round 1 in registration
/// order and start the clock if one is configured.
pub fn start_tournament(tournament: &mut Tournament) -> Result<Vec<TournamentEvent>, TournamentError> {
    if tournament.state != TournamentState::Setup {
        return Err(TournamentError::InvalidState);
    }
    if tournament.teams.len() < 2 {
        return Err(TournamentError::NotEnoughTeams);
    }
    tournament.teams = tournament
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let mut t = t.clone();
            t.fill_placeholder_names(i + 1);
            t.clear_record();
            t
        })
        .collect();
    tournament.current_round = 1;
    tournament.state = TournamentState::Active;
    log::info!(
        "Tournament {} started with {} teams",
        tournament.id,
        tournament.teams.len()
    );

    let mut events = vec![TournamentEvent::TournamentStarted];
    events.extend(begin_round(tournament));
    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configure_resizes_roster_keeping_names() {
        let mut t = Tournament::new(TournamentConfig::new(2, 3, 0, 0));
        rename_team(&mut t, 1, "Ana", "Luis").unwrap();
        configure(&mut t, TournamentConfig::new(3, 3, 0, 0)).unwrap();
        assert_eq!(t.teams.len(), 6);
        assert_eq!(t.teams[0].player1, "Ana");
        assert_eq!(t.teams[5].id, 6);

        configure(&mut t, TournamentConfig::new(1, 3, 0, 0)).unwrap();
        assert_eq!(t.teams.len(), 2);
        assert_eq!(t.config.total_tables, 1);
    }

    #[test]
    fn configure_only_in_setup() {
        let mut t = Tournament::default();
        start_tournament(&mut t).unwrap();
        assert_eq!(
            configure(&mut t, TournamentConfig::default()),
            Err(TournamentError::InvalidState)
        );
    }

    #[test]
    fn start_fills_names_and_clears_records() {
        let mut t = Tournament::new(TournamentConfig::new(1, 1, 0, 0));
        rename_team(&mut t, 2, "Marta", "").unwrap();
        t.teams[0].history = vec![7];
        t.teams[0].total_points = 7;
        t.teams[0].rounds_won = 1;

        let events = start_tournament(&mut t).unwrap();
        assert_eq!(events[0], TournamentEvent::TournamentStarted);
        assert_eq!(events[1], TournamentEvent::RoundStarted { round: 1 });
        assert_eq!(t.state, TournamentState::Active);
        assert_eq!(t.teams[0].player1, "Player A1");
        assert_eq!(t.teams[1].player1, "Marta");
        assert_eq!(t.teams[1].player2, "Player B2");
        assert_eq!(t.teams[0].total_points, 0);
        assert!(t.teams[0].history.is_empty());
        assert_eq!(t.matches.len(), 1);
        assert!(t.clock.is_none());
    }

    #[test]
    fn rename_after_start_refreshes_snapshots_only() {
        let mut t = Tournament::new(TournamentConfig::new(1, 2, 0, 0));
        start_tournament(&mut t).unwrap();
        t.teams[0].history = vec![3];
        t.teams[0].total_points = 3;

        rename_team(&mut t, 1, "Rosa", "  ").unwrap();
        assert_eq!(t.teams[0].player1, "Rosa");
        assert_eq!(t.teams[0].player2, "Player B1");
        assert_eq!(t.teams[0].total_points, 3);
        assert_eq!(t.matches[0].team1.player1, "Rosa");
        assert_eq!(
            rename_team(&mut t, 42, "x", "y"),
            Err(TournamentError::TeamNotFound(42))
        );
    }
}
