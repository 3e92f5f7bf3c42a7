//! Single binary JSON API over one domino tournament session.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_DIR (state files, default ./data).

use actix_web::{
    get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use domino_tournament_web::{
    standings_csv, JsonFileStore, NoticeBoard, Session, Side, Team, TeamId, Ticker, Tournament,
    TournamentConfig, TournamentError, TournamentEvent,
};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

type AppState = Data<Mutex<Session>>;
type TickerState = Data<Mutex<Ticker>>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// What every mutating endpoint returns on success.
#[derive(Serialize)]
struct StateResponse<'a> {
    tournament: &'a Tournament,
    standings: Vec<Team>,
    #[serde(skip_serializing_if = "Option::is_none")]
    winners: Option<Vec<TeamId>>,
    events: &'a [TournamentEvent],
}

#[derive(Deserialize)]
struct ConfigBody {
    tables: u32,
    rounds: u32,
    #[serde(default)]
    timer_minutes: u32,
    #[serde(default)]
    timer_seconds: u32,
}

#[derive(Deserialize)]
struct NamesBody {
    player1: String,
    player2: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    side: Side,
    value: String,
}

#[derive(Deserialize)]
struct HistoryBody {
    value: String,
}

#[derive(Deserialize)]
struct SoundBody {
    enabled: bool,
}

/// Path segment: team id (e.g. /api/tournament/teams/{team_id})
#[derive(Deserialize)]
struct TeamPath {
    team_id: TeamId,
}

/// Path segment: match id (e.g. /api/tournament/matches/R1-M2/toggle)
#[derive(Deserialize)]
struct MatchPath {
    match_id: String,
}

/// Path segments: team id and 0-based round index.
#[derive(Deserialize)]
struct HistoryPath {
    team_id: TeamId,
    round_index: usize,
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

fn state_json(session: &Session, events: &[TournamentEvent]) -> HttpResponse {
    HttpResponse::Ok().json(StateResponse {
        tournament: session.tournament(),
        standings: session.standings(),
        winners: session.winners(),
        events,
    })
}

/// Run one operation under the session lock and let the ticker follow its events before the
/// lock is released, so clock starts and stops apply in operation order.
fn apply<F>(state: &AppState, ticker: &TickerState, op: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> Result<Vec<TournamentEvent>, TournamentError>,
{
    let mut session = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let events = match op(&mut *session) {
        Ok(events) => events,
        Err(e) => {
            return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
    };
    match ticker.lock() {
        Ok(mut t) => t.follow(&events, &state.clone().into_inner()),
        Err(_) => log::error!("Ticker lock poisoned"),
    }
    state_json(&session, &events)
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "domino-tournament-web",
    })
}

#[get("/api/tournament")]
async fn api_get_tournament(state: AppState) -> HttpResponse {
    match state.lock() {
        Ok(session) => state_json(&session, &[]),
        Err(_) => lock_error(),
    }
}

/// Tables, rounds and timer (Setup only).
#[put("/api/tournament/config")]
async fn api_configure(state: AppState, ticker: TickerState, body: Json<ConfigBody>) -> HttpResponse {
    let config = TournamentConfig::new(body.tables, body.rounds, body.timer_minutes, body.timer_seconds);
    apply(&state, &ticker, |s| s.configure(config))
}

/// Register names in Setup, correct them afterwards.
#[put("/api/tournament/teams/{team_id}")]
async fn api_rename_team(
    state: AppState,
    ticker: TickerState,
    path: Path<TeamPath>,
    body: Json<NamesBody>,
) -> HttpResponse {
    apply(&state, &ticker, |s| {
        s.rename_team(path.team_id, &body.player1, &body.player2)
    })
}

/// Start the tournament (Setup -> Active, round 1).
#[post("/api/tournament/start")]
async fn api_start(state: AppState, ticker: TickerState) -> HttpResponse {
    apply(&state, &ticker, Session::start)
}

/// Enter a raw score for one side. Non-digit input is ignored (`accepted: false`).
#[put("/api/tournament/matches/{match_id}/score")]
async fn api_set_score(state: AppState, path: Path<MatchPath>, body: Json<ScoreBody>) -> HttpResponse {
    let mut session = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match session.set_score(&path.match_id, body.side, &body.value) {
        Ok(accepted) => HttpResponse::Ok().json(serde_json::json!({
            "accepted": accepted,
            "scores": session.tournament().scores.get(&path.match_id),
        })),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Confirm a match, or re-open a confirmed one.
#[post("/api/tournament/matches/{match_id}/toggle")]
async fn api_toggle_match(state: AppState, ticker: TickerState, path: Path<MatchPath>) -> HttpResponse {
    apply(&state, &ticker, |s| s.toggle_match(&path.match_id))
}

/// Close the round (Active -> RoundReview).
#[post("/api/tournament/rounds/finish")]
async fn api_finish_round(state: AppState, ticker: TickerState) -> HttpResponse {
    apply(&state, &ticker, Session::finish_round)
}

/// Next round, or Complete after the last one.
#[post("/api/tournament/rounds/advance")]
async fn api_advance_round(state: AppState, ticker: TickerState) -> HttpResponse {
    apply(&state, &ticker, Session::advance_round)
}

/// Correct one history cell of a team.
#[put("/api/tournament/teams/{team_id}/history/{round_index}")]
async fn api_correct_history(
    state: AppState,
    ticker: TickerState,
    path: Path<HistoryPath>,
    body: Json<HistoryBody>,
) -> HttpResponse {
    apply(&state, &ticker, |s| {
        s.correct_history(path.team_id, path.round_index, &body.value)
    })
}

/// Pause or resume the round clock.
#[post("/api/tournament/clock/toggle")]
async fn api_toggle_clock(state: AppState, ticker: TickerState) -> HttpResponse {
    apply(&state, &ticker, Session::toggle_clock)
}

#[put("/api/tournament/sound")]
async fn api_set_sound(state: AppState, ticker: TickerState, body: Json<SoundBody>) -> HttpResponse {
    apply(&state, &ticker, |s| s.set_sound(body.enabled))
}

/// Wipe everything and go back to Setup. The client asks the user first.
#[post("/api/tournament/reset")]
async fn api_reset(state: AppState, ticker: TickerState) -> HttpResponse {
    apply(&state, &ticker, |s| Ok(s.reset()))
}

#[get("/api/tournament/standings.csv")]
async fn api_standings_csv(state: AppState) -> HttpResponse {
    let session = match state.lock() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match standings_csv(&session.tournament().teams) {
        Ok(csv) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(csv),
        Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
    }
}

/// Recent notices and cues, for toasts and sounds on the client.
#[get("/api/notices")]
async fn api_notices(board: Data<NoticeBoard>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "notices": board.notices(),
        "cues": board.cues(),
    }))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_dir() -> String {
    "data".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_dir = std::env::var("DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let bind = (host.as_str(), port);

    let board = NoticeBoard::default();
    let store = JsonFileStore::new(&data_dir);
    log::info!("State directory: {}", store.dir().display());
    let session = Arc::new(Mutex::new(Session::open(store, board.clone())));

    let mut ticker = Ticker::new();
    let resume_clock = session
        .lock()
        .map(|s| s.tournament().clock.as_ref().is_some_and(|c| c.is_live()))
        .unwrap_or(false);
    if resume_clock {
        log::info!("Resuming round clock");
        ticker.restart(Arc::clone(&session));
    }

    let state: AppState = Data::from(session);
    let ticker: TickerState = Data::new(Mutex::new(ticker));
    let board = Data::new(board);

    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(ticker.clone())
            .app_data(board.clone())
            .service(api_health)
            .service(api_get_tournament)
            .service(api_configure)
            .service(api_rename_team)
            .service(api_start)
            .service(api_set_score)
            .service(api_toggle_match)
            .service(api_finish_round)
            .service(api_advance_round)
            .service(api_correct_history)
            .service(api_toggle_clock)
            .service(api_set_sound)
            .service(api_reset)
            .service(api_standings_csv)
            .service(api_notices)
    })
    .bind(bind)?
    .run()
    .await
}
