//! Round countdown clock. Pure state: the tick source lives in `crate::ticker`.

use serde::{Deserialize, Serialize};

/// Remaining seconds at which the "five minutes left" threshold fires.
pub const ATTENTION_AT: u32 = 300;
/// Remaining seconds at which the "ten seconds left" threshold fires.
pub const WARNING_AT: u32 = 10;
/// Every remaining value in `1..=COUNTDOWN_FROM` fires a countdown threshold.
pub const COUNTDOWN_FROM: u32 = 5;

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Expired,
}

/// Kind of threshold reached by a tick.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Threshold {
    Attention,
    Warning,
    Countdown,
    Expired,
}

impl Threshold {
    /// Which threshold, if any, belongs to this remaining value.
    pub fn at(remaining: u32) -> Option<Self> {
        match remaining {
            0 => Some(Threshold::Expired),
            1..=COUNTDOWN_FROM => Some(Threshold::Countdown),
            WARNING_AT => Some(Threshold::Warning),
            ATTENTION_AT => Some(Threshold::Attention),
            _ => None,
        }
    }
}

/// Emitted by [`Clock::tick`] when a threshold value is reached for the first time.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ClockEvent {
    pub remaining: u32,
    pub threshold: Threshold,
}

/// Countdown state for one round.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Clock {
    pub status: ClockStatus,
    pub duration_secs: u32,
    pub remaining_secs: u32,
    /// Threshold values already fired in this countdown.
    #[serde(default)]
    fired: Vec<u32>,
}

impl Clock {
    /// A fresh countdown, running. A zero duration gives an idle clock.
    pub fn start(duration_secs: u32) -> Self {
        let status = if duration_secs == 0 {
            ClockStatus::Idle
        } else {
            ClockStatus::Running
        };
        Self {
            status,
            duration_secs,
            remaining_secs: duration_secs,
            fired: Vec::new(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == ClockStatus::Running
    }

    /// Running or paused: a tick source still has work to do.
    pub fn is_live(&self) -> bool {
        matches!(self.status, ClockStatus::Running | ClockStatus::Paused)
    }

    /// Flip Running and Paused. Returns false (no change) when idle or expired.
    pub fn toggle(&mut self) -> bool {
        self.status = match self.status {
            ClockStatus::Running => ClockStatus::Paused,
            ClockStatus::Paused => ClockStatus::Running,
            ClockStatus::Idle | ClockStatus::Expired => return false,
        };
        true
    }

    /// Stop counting. Remaining time is kept for display.
    pub fn stop(&mut self) {
        self.status = ClockStatus::Idle;
    }

    /// One elapsed second. Only decrements while running.
    pub fn tick(&mut self) -> Option<ClockEvent> {
        if !self.is_running() || self.remaining_secs == 0 {
            return None;
        }
        self.remaining_secs -= 1;
        let remaining = self.remaining_secs;
        if remaining == 0 {
            self.status = ClockStatus::Expired;
        }
        let threshold = Threshold::at(remaining)?;
        if self.fired.contains(&remaining) {
            return None;
        }
        self.fired.push(remaining);
        Some(ClockEvent {
            remaining,
            threshold,
        })
    }
}
