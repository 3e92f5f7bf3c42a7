//! One tournament plus its store and event sink.
//!
//! Every successful mutation is persisted and its events published; a rejected one publishes
//! the error message and leaves the state as it was.

use crate::events::{EventSink, TournamentEvent};
use crate::logic;
use crate::models::{
    Clock, Side, Team, TeamId, Tournament, TournamentConfig, TournamentError, TournamentState,
};
use crate::persistence::{load_tournament, save_clock, save_tournament, Store};

type OpResult = Result<Vec<TournamentEvent>, TournamentError>;

pub struct Session {
    tournament: Tournament,
    store: Box<dyn Store>,
    sink: Box<dyn EventSink>,
}

impl Session {
    /// Resume whatever the store holds (a fresh Setup if it holds nothing).
    pub fn open(store: impl Store + 'static, sink: impl EventSink + 'static) -> Self {
        let tournament = load_tournament(&store);
        Self::new(tournament, store, sink)
    }

    pub fn new(
        tournament: Tournament,
        store: impl Store + 'static,
        sink: impl EventSink + 'static,
    ) -> Self {
        Self {
            tournament,
            store: Box::new(store),
            sink: Box::new(sink),
        }
    }

    pub fn tournament(&self) -> &Tournament {
        &self.tournament
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// Current ranking.
    pub fn standings(&self) -> Vec<Team> {
        logic::rank_teams(&self.tournament.teams)
    }

    /// Winners, once the tournament is complete.
    pub fn winners(&self) -> Option<Vec<TeamId>> {
        (self.tournament.state == TournamentState::Complete)
            .then(|| logic::winners(&self.tournament.teams))
    }

    pub fn configure(&mut self, config: TournamentConfig) -> OpResult {
        let result = logic::configure(&mut self.tournament, config).map(|()| Vec::new());
        self.commit(result)
    }

    pub fn rename_team(&mut self, team_id: TeamId, player1: &str, player2: &str) -> OpResult {
        let result =
            logic::rename_team(&mut self.tournament, team_id, player1, player2).map(|e| vec![e]);
        self.commit(result)
    }

    pub fn start(&mut self) -> OpResult {
        let result = logic::start_tournament(&mut self.tournament);
        self.commit(result)
    }

    /// Returns `Ok(false)` when the input was not digits and was ignored.
    pub fn set_score(
        &mut self,
        match_id: &str,
        side: Side,
        raw: &str,
    ) -> Result<bool, TournamentError> {
        match logic::set_score(&mut self.tournament, match_id, side, raw) {
            Ok(true) => {
                let event = TournamentEvent::ScoreRecorded {
                    match_id: match_id.to_string(),
                    side,
                };
                self.commit(Ok(vec![event]))?;
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(e) => self.commit(Err(e)).map(|_| false),
        }
    }

    /// Confirm or re-open a match.
    pub fn toggle_match(&mut self, match_id: &str) -> OpResult {
        let result = logic::toggle_match(&mut self.tournament, match_id).map(|e| vec![e]);
        self.commit(result)
    }

    pub fn finish_round(&mut self) -> OpResult {
        let result = logic::finish_round(&mut self.tournament);
        self.commit(result)
    }

    pub fn advance_round(&mut self) -> OpResult {
        let result = logic::advance_round(&mut self.tournament);
        self.commit(result)
    }

    pub fn correct_history(&mut self, team_id: TeamId, round_index: usize, raw: &str) -> OpResult {
        let result = logic::correct_history(&mut self.tournament, team_id, round_index, raw)
            .map(|e| vec![e]);
        self.commit(result)
    }

    pub fn toggle_clock(&mut self) -> OpResult {
        let events = logic::toggle_clock(&mut self.tournament);
        self.commit(Ok(events))
    }

    pub fn set_sound(&mut self, enabled: bool) -> OpResult {
        let event = logic::set_sound(&mut self.tournament, enabled);
        self.commit(Ok(vec![event]))
    }

    /// Wipe the store and return to a fresh Setup. Confirming with the user is the caller's job.
    pub fn reset(&mut self) -> Vec<TournamentEvent> {
        let events = vec![logic::reset(&mut self.tournament)];
        self.store.clear();
        self.publish(&events);
        events
    }

    /// One elapsed second. Only the timer key is written. Returns whether the clock still
    /// needs ticks (running or paused).
    pub fn tick(&mut self) -> bool {
        if self.tournament.clock.as_ref().is_some_and(Clock::is_running) {
            let events = logic::tick_clock(&mut self.tournament);
            save_clock(self.store.as_mut(), &self.tournament.clock);
            self.publish(&events);
        }
        self.tournament.clock.as_ref().is_some_and(Clock::is_live)
    }

    fn commit(&mut self, result: OpResult) -> OpResult {
        match result {
            Ok(events) => {
                save_tournament(self.store.as_mut(), &self.tournament);
                self.publish(&events);
                Ok(events)
            }
            Err(e) => {
                log::warn!("Rejected: {}", e);
                self.sink.notify(&e.to_string());
                Err(e)
            }
        }
    }

    fn publish(&mut self, events: &[TournamentEvent]) {
        for event in events {
            if let Some(message) = event.notice() {
                self.sink.notify(&message);
            }
            if self.tournament.sound_enabled {
                if let Some(cue) = event.cue() {
                    self.sink.cue(cue);
                }
            }
        }
    }
}
