//! Persistence gateway: a key-value store holding the tournament one logical field per key.
//!
//! Writes are best-effort. A failing store logs a warning and the engine carries on.

use crate::models::{
    Clock, GameMatch, MatchId, ScoreEntry, Team, TeamId, Tournament, TournamentConfig,
    TournamentId, TournamentState,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Prefix of every key written by this crate.
pub const NAMESPACE: &str = "domino";

pub const KEY_ID: &str = "id";
pub const KEY_PHASE: &str = "phase";
pub const KEY_CONFIG: &str = "config";
pub const KEY_TEAMS: &str = "teams";
pub const KEY_ROUND: &str = "round";
pub const KEY_MATCHES: &str = "matches";
pub const KEY_SCORES: &str = "scores";
pub const KEY_BYE: &str = "bye";
pub const KEY_TIMER: &str = "timer";
pub const KEY_SOUND: &str = "sound";
pub const KEY_SAVED_AT: &str = "saved_at";

/// Opaque key-value store. Keys passed in are already namespaced.
pub trait Store: Send {
    fn load(&self, key: &str) -> Option<Value>;
    fn save(&mut self, key: &str, value: Value);
    /// Remove every key under [`NAMESPACE`].
    fn clear(&mut self);
}

fn namespaced(key: &str) -> String {
    format!("{NAMESPACE}.{key}")
}

/// In-process store; nothing survives a restart.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Store for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
    }

    fn clear(&mut self) {
        let prefix = format!("{NAMESPACE}.");
        self.entries.retain(|k, _| !k.starts_with(&prefix));
    }
}

/// One `<key>.json` file per key inside a directory.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        let path = self.path(key);
        match fs::read(&path) {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(v) => Some(v),
                Err(e) => {
                    log::warn!("Ignoring malformed {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: Value) {
        let path = self.path(key);
        let result = fs::create_dir_all(&self.dir).and_then(|()| {
            let bytes = serde_json::to_vec_pretty(&value).map_err(std::io::Error::other)?;
            fs::write(&path, bytes)
        });
        if let Err(e) = result {
            log::warn!("Could not write {}: {}", path.display(), e);
        }
    }

    fn clear(&mut self) {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return,
            Err(e) => {
                log::warn!("Could not list {}: {}", self.dir.display(), e);
                return;
            }
        };
        let prefix = format!("{NAMESPACE}.");
        for entry in entries.flatten() {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(&prefix) && name.ends_with(".json") {
                if let Err(e) = fs::remove_file(entry.path()) {
                    log::warn!("Could not remove {}: {}", entry.path().display(), e);
                }
            }
        }
    }
}

fn put(store: &mut dyn Store, key: &str, value: &impl Serialize) {
    match serde_json::to_value(value) {
        Ok(v) => store.save(&namespaced(key), v),
        Err(e) => log::warn!("Could not serialize {}: {}", key, e),
    }
}

fn get<T: DeserializeOwned>(store: &dyn Store, key: &str) -> Option<T> {
    let value = store.load(&namespaced(key))?;
    match serde_json::from_value(value) {
        Ok(v) => Some(v),
        Err(e) => {
            log::warn!("Ignoring stored {}: {}", key, e);
            None
        }
    }
}

/// Write every field of the tournament.
pub fn save_tournament(store: &mut dyn Store, tournament: &Tournament) {
    put(store, KEY_ID, &tournament.id);
    put(store, KEY_PHASE, &tournament.state);
    put(store, KEY_CONFIG, &tournament.config);
    put(store, KEY_TEAMS, &tournament.teams);
    put(store, KEY_ROUND, &tournament.current_round);
    put(store, KEY_MATCHES, &tournament.matches);
    put(store, KEY_SCORES, &tournament.scores);
    put(store, KEY_BYE, &tournament.bye);
    put(store, KEY_TIMER, &tournament.clock);
    put(store, KEY_SOUND, &tournament.sound_enabled);
    put(store, KEY_SAVED_AT, &Utc::now());
}

/// Write only the clock, for per-second ticks.
pub fn save_clock(store: &mut dyn Store, clock: &Option<Clock>) {
    put(store, KEY_TIMER, clock);
}

/// Rebuild a tournament from the store. Missing or malformed fields fall back to defaults.
pub fn load_tournament(store: &dyn Store) -> Tournament {
    let config = get::<TournamentConfig>(store, KEY_CONFIG).unwrap_or_default();
    let mut tournament = Tournament::new(config);
    if let Some(id) = get::<TournamentId>(store, KEY_ID) {
        tournament.id = id;
    }
    if let Some(state) = get::<TournamentState>(store, KEY_PHASE) {
        tournament.state = state;
    }
    if let Some(teams) = get::<Vec<Team>>(store, KEY_TEAMS) {
        tournament.teams = teams;
    }
    if let Some(round) = get::<u32>(store, KEY_ROUND) {
        tournament.current_round = round.max(1);
    }
    if let Some(matches) = get::<Vec<GameMatch>>(store, KEY_MATCHES) {
        tournament.matches = matches;
    }
    if let Some(scores) = get::<HashMap<MatchId, ScoreEntry>>(store, KEY_SCORES) {
        tournament.scores = scores;
    }
    tournament.bye = get::<Option<TeamId>>(store, KEY_BYE).flatten();
    tournament.clock = get::<Option<Clock>>(store, KEY_TIMER).flatten();
    if let Some(sound) = get::<bool>(store, KEY_SOUND) {
        tournament.sound_enabled = sound;
    }
    log::info!(
        "Loaded tournament {} ({:?}, round {})",
        tournament.id,
        tournament.state,
        tournament.current_round
    );
    tournament
}
