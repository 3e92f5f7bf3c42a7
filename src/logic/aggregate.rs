//! Round close: fold confirmed match scores into each team's cumulative record.

use crate::models::{GameMatch, MatchId, ScoreEntry, Side, Team, TournamentError};
use std::collections::HashMap;

/// New team list with this round's score appended to every team.
///
/// All matches must be confirmed. A team without a match (bye) gets 0 and no win.
/// A win needs a strictly higher score; ties give no win to either side.
pub fn aggregate_round(
    teams: &[Team],
    matches: &[GameMatch],
    scores: &HashMap<MatchId, ScoreEntry>,
) -> Result<Vec<Team>, TournamentError> {
    let unconfirmed = matches.iter().filter(|m| !m.is_completed).count();
    if unconfirmed > 0 {
        return Err(TournamentError::RoundIncomplete { unconfirmed });
    }

    let empty = ScoreEntry::default();
    let updated = teams
        .iter()
        .map(|team| {
            let mut team = team.clone();
            let (points, won) = matches
                .iter()
                .find_map(|m| m.side_of(team.id).map(|side| (m, side)))
                .map(|(m, side)| {
                    let entry = scores.get(&m.id).unwrap_or(&empty);
                    let (own, other) = match side {
                        Side::Team1 => (entry.points(Side::Team1), entry.points(Side::Team2)),
                        Side::Team2 => (entry.points(Side::Team2), entry.points(Side::Team1)),
                    };
                    (own, own > other)
                })
                .unwrap_or((0, false));
            team.record_round(points, won);
            team
        })
        .collect();
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::pairing::pair_round;

    fn entry(a: &str, b: &str) -> ScoreEntry {
        ScoreEntry {
            team1_score: Some(a.into()),
            team2_score: Some(b.into()),
        }
    }

    fn confirmed(mut matches: Vec<GameMatch>) -> Vec<GameMatch> {
        matches.iter_mut().for_each(|m| m.is_completed = true);
        matches
    }

    #[test]
    fn rejects_open_matches_with_count() {
        let teams: Vec<_> = (1..=6).map(Team::new).collect();
        let mut matches = pair_round(&teams, 1).matches;
        matches[0].is_completed = true;
        assert_eq!(
            aggregate_round(&teams, &matches, &HashMap::new()),
            Err(TournamentError::RoundIncomplete { unconfirmed: 2 })
        );
    }

    #[test]
    fn winner_and_tie_and_bye() {
        let teams: Vec<_> = (1..=5).map(Team::new).collect();
        let pairing = pair_round(&teams, 1);
        let matches = confirmed(pairing.matches);
        let scores = HashMap::from([
            ("R1-M1".to_string(), entry("10", "5")),
            ("R1-M2".to_string(), entry("8", "8")),
        ]);

        let out = aggregate_round(&teams, &matches, &scores).unwrap();
        let rec: Vec<_> = out
            .iter()
            .map(|t| (t.id, t.total_points, t.rounds_won, t.history.clone()))
            .collect();
        assert_eq!(
            rec,
            vec![
                (1, 10, 1, vec![10]),
                (2, 5, 0, vec![5]),
                (3, 8, 0, vec![8]),
                (4, 8, 0, vec![8]),
                (5, 0, 0, vec![0]),
            ]
        );
        // Input untouched.
        assert!(teams.iter().all(|t| t.history.is_empty()));
    }

    #[test]
    fn team2_win_counts_for_team2() {
        let teams: Vec<_> = (1..=2).map(Team::new).collect();
        let matches = confirmed(pair_round(&teams, 1).matches);
        let scores = HashMap::from([("R1-M1".to_string(), entry("3", "40"))]);
        let out = aggregate_round(&teams, &matches, &scores).unwrap();
        assert_eq!((out[0].rounds_won, out[1].rounds_won), (0, 1));
        assert_eq!(out[1].total_points, 40);
    }

    #[test]
    fn ceiling_scores_accumulate_across_rounds() {
        let teams: Vec<_> = (1..=2).map(Team::new).collect();
        let matches = confirmed(pair_round(&teams, 1).matches);
        let round1 = HashMap::from([("R1-M1".to_string(), entry("4294967295", "1"))]);
        let teams = aggregate_round(&teams, &matches, &round1).unwrap();

        let matches = confirmed(pair_round(&teams, 2).matches);
        let round2 = HashMap::from([("R2-M1".to_string(), entry("4294967295", "4294967295"))]);
        let out = aggregate_round(&teams, &matches, &round2).unwrap();
        assert_eq!(out[0].history, vec![u32::MAX, u32::MAX]);
        assert_eq!(out[0].total_points, 2 * u64::from(u32::MAX));
        assert_eq!((out[0].rounds_won, out[1].rounds_won), (1, 0));
    }
}
