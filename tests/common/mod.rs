#![allow(dead_code)]

use std::{
    collections::{BTreeSet, HashMap},
    io,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use spotify_mcp::{config::Config, management::TokenStore, notify::Notifier, types::Token};
use tempfile::TempDir;

pub const CLIENT_ID: &str = "test-client-id";
pub const CLIENT_SECRET: &str = "test-client-secret";
pub const REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const GOOD_CODE: &str = "good-code";
pub const GOOD_REFRESH: &str = "valid-refresh";
pub const ISSUED_ACCESS: &str = "access-1";
pub const ISSUED_REFRESH: &str = "refresh-1";
pub const REFRESHED_ACCESS: &str = "refreshed-access";
pub const GRANTED_SCOPE: &str =
    "user-modify-playback-state user-read-playback-state user-library-read";

#[derive(Default)]
pub struct FakeState {
    pub currently_playing: Option<Value>,
    pub artists: HashMap<String, Value>,
    pub search_items: Vec<Value>,
    pub devices: Vec<Value>,
    pub play_error: Option<(u16, Value)>,

    pub calls: Vec<String>,
    pub bearer_tokens: Vec<String>,
    pub search_params: Vec<HashMap<String, String>>,
    pub play_requests: Vec<(Option<String>, Value)>,
    pub token_requests: Vec<HashMap<String, String>>,
    pub token_auth_headers: Vec<Option<String>>,
}

type Shared = Arc<Mutex<FakeState>>;

/// Fake accounts service and Web API on an ephemeral local port.
pub struct FakeSpotify {
    pub state: Shared,
    pub base_url: String,
}

impl FakeSpotify {
    pub async fn start() -> Self {
        let state: Shared = Arc::default();
        let app = Router::new()
            .route("/api/token", post(token_endpoint))
            .route("/v1/me/player/currently-playing", get(currently_playing))
            .route("/v1/artists/{id}", get(artist))
            .route("/v1/search", get(search))
            .route("/v1/me/player/devices", get(devices))
            .route("/v1/me/player/play", put(play))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeSpotify {
            state,
            base_url: format!("http://{addr}"),
        }
    }

    pub fn config(&self, dir: &TempDir) -> Config {
        Config {
            client_id: CLIENT_ID.into(),
            client_secret: CLIENT_SECRET.into(),
            redirect_uri: REDIRECT_URI.into(),
            server_addr: "127.0.0.1:0".into(),
            auth_url: format!("{}/authorize", self.base_url),
            token_url: format!("{}/api/token", self.base_url),
            api_url: format!("{}/v1", self.base_url),
            token_path: dir.path().join("cache/token.json"),
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn with(&self, f: impl FnOnce(&mut FakeState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn read<T>(&self, f: impl FnOnce(&FakeState) -> T) -> T {
        f(&self.state.lock().unwrap())
    }

    /// Calls against the Web API (catalog, player), token endpoint excluded.
    pub fn api_calls(&self) -> Vec<String> {
        self.read(|s| {
            s.calls
                .iter()
                .filter(|c| c.contains(" /v1/"))
                .cloned()
                .collect()
        })
    }

    pub fn called(&self, call: &str) -> bool {
        self.read(|s| s.calls.iter().any(|c| c == call))
    }

    pub fn token_request_count(&self) -> usize {
        self.read(|s| s.token_requests.len())
    }

    pub fn play_requests(&self) -> Vec<(Option<String>, Value)> {
        self.read(|s| s.play_requests.clone())
    }

    /// The genre of the last search, without the `genre:` prefix.
    pub fn last_searched_genre(&self) -> Option<String> {
        self.read(|s| {
            s.search_params
                .last()
                .and_then(|p| p.get("q"))
                .map(|q| q.trim_start_matches("genre:").to_string())
        })
    }
}

pub fn track_json(uri: &str, name: &str, artist_id: &str, artist_name: &str) -> Value {
    json!({
        "uri": uri,
        "name": name,
        "artists": [{ "id": artist_id, "name": artist_name }],
    })
}

pub fn artist_json(id: &str, name: &str, genres: &[&str]) -> Value {
    json!({ "id": id, "name": name, "genres": genres })
}

pub fn device_json(id: &str, name: &str, is_active: bool) -> Value {
    json!({ "id": id, "name": name, "is_active": is_active, "type": "Computer" })
}

pub fn playing_json(is_playing: bool, item: Value) -> Value {
    json!({ "is_playing": is_playing, "item": item })
}

pub fn token(access: &str, refresh: &str, expires_at: i64) -> Token {
    Token {
        access_token: access.into(),
        refresh_token: refresh.into(),
        expires_at,
        scope: GRANTED_SCOPE.split(' ').map(str::to_string).collect::<BTreeSet<_>>(),
    }
}

pub async fn seed_token(config: &Config, token: &Token) {
    TokenStore::new(config.token_path.clone())
        .persist(token)
        .await
        .unwrap();
}

pub async fn seed_valid_token(config: &Config) {
    let now = chrono::Utc::now().timestamp();
    seed_token(config, &token(ISSUED_ACCESS, ISSUED_REFRESH, now + 3600)).await;
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub opened: Mutex<Vec<String>>,
    pub fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        RecordingNotifier {
            opened: Mutex::default(),
            fail: true,
        }
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.lock().unwrap().push(url.to_string());
        if self.fail {
            return Err(io::Error::other("no browser available"));
        }
        Ok(())
    }
}

fn record(state: &Shared, call: &str, headers: &HeaderMap) {
    let mut s = state.lock().unwrap();
    s.calls.push(call.to_string());
    if let Some(bearer) = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
    {
        s.bearer_tokens.push(bearer.to_string());
    }
}

async fn token_endpoint(
    State(state): State<Shared>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    let mut s = state.lock().unwrap();
    s.calls.push("POST /api/token".into());
    s.token_auth_headers.push(
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    );
    s.token_requests.push(form.clone());

    let grant = form.get("grant_type").map(String::as_str);
    match grant {
        Some("authorization_code") if form.get("code").map(String::as_str) == Some(GOOD_CODE) => {
            Json(json!({
                "access_token": ISSUED_ACCESS,
                "token_type": "Bearer",
                "scope": GRANTED_SCOPE,
                "expires_in": 3600,
                "refresh_token": ISSUED_REFRESH,
            }))
            .into_response()
        }
        Some("refresh_token")
            if form.get("refresh_token").map(String::as_str) == Some(GOOD_REFRESH) =>
        {
            Json(json!({
                "access_token": REFRESHED_ACCESS,
                "token_type": "Bearer",
                "expires_in": 3600,
            }))
            .into_response()
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        )
            .into_response(),
    }
}

async fn currently_playing(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET /v1/me/player/currently-playing", &headers);
    match state.lock().unwrap().currently_playing.clone() {
        Some(body) => Json(body).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

async fn artist(
    State(state): State<Shared>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record(&state, &format!("GET /v1/artists/{id}"), &headers);
    match state.lock().unwrap().artists.get(&id).cloned() {
        Some(body) => Json(body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "status": 404, "message": "Resource not found" } })),
        )
            .into_response(),
    }
}

async fn search(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    record(&state, "GET /v1/search", &headers);
    let mut s = state.lock().unwrap();
    s.search_params.push(params);
    Json(json!({ "tracks": { "items": s.search_items.clone() } })).into_response()
}

async fn devices(State(state): State<Shared>, headers: HeaderMap) -> Response {
    record(&state, "GET /v1/me/player/devices", &headers);
    let devices = state.lock().unwrap().devices.clone();
    Json(json!({ "devices": devices })).into_response()
}

async fn play(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&state, "PUT /v1/me/player/play", &headers);
    let mut s = state.lock().unwrap();
    s.play_requests
        .push((params.get("device_id").cloned(), body));

    match s.play_error.clone() {
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::FORBIDDEN),
            Json(body),
        )
            .into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
