use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Margin before `expires_at` at which a token is already treated as expired.
pub const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp in seconds.
    pub expires_at: i64,
    pub scope: BTreeSet<String>,
}

impl Token {
    /// Builds a token from a token endpoint response.
    ///
    /// Spotify may leave out `refresh_token` and `scope` when refreshing, in
    /// which case the values of `previous` are carried over.
    pub fn from_response(res: TokenResponse, previous: Option<&Token>, now: i64) -> Self {
        let refresh_token = res
            .refresh_token
            .or_else(|| previous.map(|t| t.refresh_token.clone()))
            .unwrap_or_default();

        let scope = match res.scope {
            Some(scope) => scope.split_whitespace().map(str::to_string).collect(),
            None => previous.map(|t| t.scope.clone()).unwrap_or_default(),
        };

        Token {
            access_token: res.access_token,
            refresh_token,
            expires_at: now + res.expires_in,
            scope,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at - TOKEN_EXPIRY_MARGIN_SECS
    }
}

/// Body returned by the accounts service token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    #[serde(default = "default_expires_in")]
    pub expires_in: i64,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

fn default_expires_in() -> i64 {
    3600
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub uri: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
}

impl Track {
    pub fn primary_artist(&self) -> Option<&TrackArtist> {
        self.artists.first()
    }

    pub fn artist_name(&self) -> &str {
        self.primary_artist()
            .map(|a| a.name.as_str())
            .unwrap_or("unknown artist")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    /// Restricted devices are reported without an id.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

#[derive(Tabled)]
pub struct DeviceTableRow {
    pub name: String,
    pub kind: String,
    pub active: String,
    pub id: String,
}

impl From<&Device> for DeviceTableRow {
    fn from(device: &Device) -> Self {
        DeviceTableRow {
            name: device.name.clone(),
            kind: device.kind.clone().unwrap_or_else(|| "-".into()),
            active: if device.is_active { "yes" } else { "no" }.into(),
            id: device.id.clone().unwrap_or_else(|| "-".into()),
        }
    }
}

#[derive(Tabled)]
pub struct GenreTableRow {
    pub difficulty: String,
    pub genres: String,
}

#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub current_track: Option<Track>,
    pub is_playing: bool,
}

/// Raw `GET /me/player/currently-playing` body. `item` is null for ads and
/// is an episode object for podcasts, which has no `artists`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentlyPlayingResponse {
    #[serde(default)]
    pub is_playing: bool,
    #[serde(default)]
    pub item: Option<Track>,
}

impl From<CurrentlyPlayingResponse> for PlaybackState {
    fn from(res: CurrentlyPlayingResponse) -> Self {
        PlaybackState {
            current_track: res.item,
            is_playing: res.is_playing,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub devices: Vec<Device>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartPlaybackRequest {
    pub uris: Vec<String>,
}

/// Error body of the Web API: `{"error": {"status": 403, "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub reason: Option<String>,
}
