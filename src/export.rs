//! CSV export of the standings table.

use crate::logic::rank_teams;
use crate::models::Team;

/// Ranked standings as CSV: rank, team, players, total, rounds won, then one column per round.
pub fn standings_csv(teams: &[Team]) -> Result<String, csv::Error> {
    let ranked = rank_teams(teams);
    let rounds = ranked.iter().map(|t| t.history.len()).max().unwrap_or(0);

    let mut wtr = csv::Writer::from_writer(Vec::new());
    let mut header: Vec<String> = ["rank", "team", "player1", "player2", "total_points", "rounds_won"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    header.extend((1..=rounds).map(|r| format!("round_{r}")));
    wtr.write_record(&header)?;

    for (i, t) in ranked.iter().enumerate() {
        let mut row = vec![
            (i + 1).to_string(),
            t.id.to_string(),
            t.player1.clone(),
            t.player2.clone(),
            t.total_points.to_string(),
            t.rounds_won.to_string(),
        ];
        row.extend((0..rounds).map(|r| t.history.get(r).map(u32::to_string).unwrap_or_default()));
        wtr.write_record(&row)?;
    }

    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
