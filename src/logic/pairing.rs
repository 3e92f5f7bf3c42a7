//! Round pairing: adjacent teams in the standings share a table.

use crate::models::{GameMatch, Team, TeamId};

/// Matches for one round plus the team left without a table, if any.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RoundPairing {
    pub matches: Vec<GameMatch>,
    pub bye: Option<TeamId>,
}

/// Pair `ranked[2k]` with `ranked[2k + 1]` at table `k + 1`.
///
/// With an odd count the lowest-ranked team gets the bye: no table, 0 points and no win
/// for the round.
pub fn pair_round(ranked: &[Team], round: u32) -> RoundPairing {
    let matches = ranked
        .chunks_exact(2)
        .zip(1u32..)
        .map(|(pair, table)| GameMatch::new(round, table, pair[0].clone(), pair[1].clone()))
        .collect();
    let bye = ranked.chunks_exact(2).remainder().first().map(|t| t.id);
    RoundPairing { matches, bye }
}
