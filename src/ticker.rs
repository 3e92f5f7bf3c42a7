//! The one-second tick source driving a session's round clock.

use crate::events::TournamentEvent;
use crate::session::Session;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// A session shared between request handlers and the tick task.
pub type SharedSession = Arc<Mutex<Session>>;

/// Owns at most one tick task. Restarting aborts the previous task first, so two tasks never
/// decrement the same clock.
#[derive(Debug, Default)]
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Abort any running task and spawn a fresh one. Must be called inside a tokio runtime.
    pub fn restart(&mut self, session: SharedSession) {
        self.cancel();
        self.handle = Some(tokio::spawn(run(session)));
        log::debug!("Clock ticker started");
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            log::debug!("Clock ticker cancelled");
        }
    }

    /// A task exists and has not finished.
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Restart or cancel according to what an operation produced.
    pub fn follow(&mut self, events: &[TournamentEvent], session: &SharedSession) {
        for event in events {
            match event {
                TournamentEvent::ClockStarted { .. } => self.restart(Arc::clone(session)),
                TournamentEvent::RoundFinished { .. }
                | TournamentEvent::TournamentComplete { .. }
                | TournamentEvent::Reset => self.cancel(),
                _ => {}
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn tick_once(session: &SharedSession) -> bool {
    match session.lock() {
        Ok(mut s) => s.tick(),
        Err(_) => {
            log::error!("Session lock poisoned; stopping clock ticker");
            false
        }
    }
}

async fn run(session: SharedSession) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    interval.tick().await;
    loop {
        interval.tick().await;
        if !tick_once(&session) {
            log::debug!("Clock no longer live; ticker exits");
            break;
        }
    }
}
