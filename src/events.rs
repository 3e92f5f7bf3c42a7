//! Typed events returned by every engine operation, and the sinks that consume them.
//!
//! The engine never renders, speaks or shows toasts itself. Each operation returns the
//! events it produced; a [`Session`](crate::Session) forwards their notices and audio cues
//! to an [`EventSink`].

use crate::models::{ClockEvent, MatchId, Side, TeamId, Threshold};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Discrete audio/speech tags. Advisory only.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    Start,
    Success,
    Attention,
    Warning,
    Expiry,
    FinalWinner,
}

/// Something that happened inside the engine.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TournamentEvent {
    TournamentStarted,
    RoundStarted { round: u32 },
    ScoreRecorded { match_id: MatchId, side: Side },
    MatchConfirmed { match_id: MatchId },
    MatchReopened { match_id: MatchId },
    RoundFinished { round: u32 },
    /// Every team sharing the leader's points and rounds won.
    TournamentComplete { winners: Vec<TeamId> },
    NamesUpdated { team_id: TeamId },
    HistoryCorrected { team_id: TeamId, round_index: usize },
    ClockStarted { seconds: u32 },
    ClockToggled { running: bool },
    Clock(ClockEvent),
    SoundChanged { enabled: bool },
    Reset,
}

impl TournamentEvent {
    /// Short human-readable notification, if this event warrants one.
    pub fn notice(&self) -> Option<String> {
        match self {
            TournamentEvent::TournamentStarted => Some("Tournament started!".to_string()),
            TournamentEvent::RoundStarted { round } => Some(format!("Round {} started", round)),
            TournamentEvent::NamesUpdated { .. } => Some("Names updated".to_string()),
            TournamentEvent::TournamentComplete { .. } => Some("Tournament complete".to_string()),
            TournamentEvent::Clock(ClockEvent {
                threshold: Threshold::Expired,
                ..
            }) => Some("Time is up".to_string()),
            _ => None,
        }
    }

    /// Audio cue, if this event has one.
    pub fn cue(&self) -> Option<Cue> {
        match self {
            TournamentEvent::RoundStarted { .. } => Some(Cue::Start),
            TournamentEvent::MatchConfirmed { .. } => Some(Cue::Success),
            TournamentEvent::TournamentComplete { .. } => Some(Cue::FinalWinner),
            TournamentEvent::Clock(e) => Some(match e.threshold {
                Threshold::Attention => Cue::Attention,
                Threshold::Warning | Threshold::Countdown => Cue::Warning,
                Threshold::Expired => Cue::Expiry,
            }),
            _ => None,
        }
    }
}

/// Consumer of notices and cues. Nothing it returns is read by the engine.
pub trait EventSink: Send {
    fn notify(&mut self, message: &str);
    fn cue(&mut self, cue: Cue);
}

/// Writes notices and cues to the log.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn notify(&mut self, message: &str) {
        log::info!("notice: {}", message);
    }

    fn cue(&mut self, cue: Cue) {
        log::debug!("cue: {:?}", cue);
    }
}

/// A notice as kept by [`NoticeBoard`].
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Notice {
    pub at: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Default)]
struct Board {
    notices: VecDeque<Notice>,
    cues: VecDeque<Cue>,
}

/// Bounded in-memory sink. Clones share the same board, so one clone can be handed to a
/// session while another is read by the API.
#[derive(Clone, Debug)]
pub struct NoticeBoard {
    inner: Arc<Mutex<Board>>,
    capacity: usize,
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::with_capacity(20)
    }
}

impl NoticeBoard {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Board::default())),
            capacity: capacity.max(1),
        }
    }

    /// Most recent notices, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        match self.inner.lock() {
            Ok(b) => b.notices.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Most recent cues, oldest first.
    pub fn cues(&self) -> Vec<Cue> {
        match self.inner.lock() {
            Ok(b) => b.cues.iter().copied().collect(),
            Err(_) => Vec::new(),
        }
    }
}

impl EventSink for NoticeBoard {
    fn notify(&mut self, message: &str) {
        log::info!("notice: {}", message);
        if let Ok(mut b) = self.inner.lock() {
            if b.notices.len() == self.capacity {
                b.notices.pop_front();
            }
            b.notices.push_back(Notice {
                at: Utc::now(),
                message: message.to_string(),
            });
        }
    }

    fn cue(&mut self, cue: Cue) {
        if let Ok(mut b) = self.inner.lock() {
            if b.cues.len() == self.capacity {
                b.cues.pop_front();
            }
            b.cues.push_back(cue);
        }
    }
}
