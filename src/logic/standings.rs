//! Standings: rank teams by total points, then rounds won.

use crate::models::{Team, TeamId};
use std::cmp::Ordering;

/// Descending by `total_points`, then by `rounds_won`. Equal keys compare `Equal`.
fn by_standing(a: &Team, b: &Team) -> Ordering {
    b.total_points
        .cmp(&a.total_points)
        .then(b.rounds_won.cmp(&a.rounds_won))
}

/// Ranked copy of `teams`. Stable: remaining ties keep input order.
pub fn rank_teams(teams: &[Team]) -> Vec<Team> {
    let mut ranked = teams.to_vec();
    ranked.sort_by(by_standing);
    ranked
}

/// Every team sharing the leader's points and rounds won, in ranked order.
pub fn winners(teams: &[Team]) -> Vec<TeamId> {
    let ranked = rank_teams(teams);
    let Some(leader) = ranked.first() else {
        return Vec::new();
    };
    ranked
        .iter()
        .take_while(|t| by_standing(leader, t) == Ordering::Equal)
        .map(|t| t.id)
        .collect()
}
