//! Team (a fixed pair of players) and its cumulative tournament record.

use serde::{Deserialize, Serialize};

/// Stable identifier for a team, assigned at registration.
pub type TeamId = u32;

/// A registered pair and its running totals.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub player1: String,
    pub player2: String,
    /// Always equal to the sum of `history`. Wider than a round score so the sum cannot overflow.
    pub total_points: u64,
    /// Matches where this team outscored its opponent.
    pub rounds_won: u32,
    /// One entry per completed round (index = round number - 1).
    pub history: Vec<u32>,
}

impl Team {
    /// Create a blank team with the given id. Names start empty.
    pub fn new(id: TeamId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_names(id: TeamId, player1: impl Into<String>, player2: impl Into<String>) -> Self {
        Self {
            id,
            player1: player1.into(),
            player2: player2.into(),
            ..Self::default()
        }
    }

    /// "Player A & Player B", for notices and exports.
    pub fn display_name(&self) -> String {
        format!("{} & {}", self.player1, self.player2)
    }

    /// Fill blank names with `Player A{n}` / `Player B{n}`, where `n` is the registration slot.
    pub fn fill_placeholder_names(&mut self, slot: usize) {
        if self.player1.trim().is_empty() {
            self.player1 = format!("Player A{slot}");
        } else {
            self.player1 = self.player1.trim().to_string();
        }
        if self.player2.trim().is_empty() {
            self.player2 = format!("Player B{slot}");
        } else {
            self.player2 = self.player2.trim().to_string();
        }
    }

    /// Back to 0 points, 0 wins and an empty history.
    pub fn clear_record(&mut self) {
        self.total_points = 0;
        self.rounds_won = 0;
        self.history.clear();
    }

    /// Recompute `total_points` from `history`.
    pub fn recompute_total(&mut self) {
        self.total_points = self.history.iter().map(|&p| u64::from(p)).sum();
    }

    /// Append one round's score; `won` adds a round win.
    pub fn record_round(&mut self, points: u32, won: bool) {
        self.history.push(points);
        self.recompute_total();
        if won {
            self.rounds_won += 1;
        }
    }
}
