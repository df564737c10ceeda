use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{
    Res,
    error::Error,
    types::{
        ApiErrorResponse, Artist, CurrentlyPlayingResponse, Device, DevicesResponse,
        PlaybackState, SearchResponse, StartPlaybackRequest, Track,
    },
};

/// Upper bound of the search result window Spotify accepts.
pub const SEARCH_LIMIT: u32 = 50;

/// Spotify Web API client bound to one valid access token.
///
/// Obtained from [`crate::spotify::AuthManager::get_valid_session`]; it is
/// cheap to clone and meant to live for a single tool invocation.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        SpotifyClient {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            access_token: access_token.into(),
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// What the user is listening to right now. Spotify answers 204 when
    /// nothing is playing, which maps to an empty [`PlaybackState`].
    pub async fn current_playback(&self) -> Res<PlaybackState> {
        let res = self
            .send(self.get("/me/player/currently-playing"))
            .await?;

        if res.status() == StatusCode::NO_CONTENT {
            return Ok(PlaybackState::default());
        }

        let body = res.json::<CurrentlyPlayingResponse>().await?;
        Ok(body.into())
    }

    /// Fetches an artist, including the genre tags Spotify assigns to it.
    ///
    /// # Arguments
    ///
    /// * `id` - Spotify artist id (not the URI)
    ///
    /// # Errors
    ///
    /// A missing artist comes back as [`Error::Api`] with status 404.
    pub async fn artist(&self, id: &str) -> Res<Artist> {
        let res = self.send(self.get(&format!("/artists/{id}"))).await?;
        Ok(res.json::<Artist>().await?)
    }

    /// Searches the catalog for tracks. `limit` is clamped to [`SEARCH_LIMIT`].
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Res<Vec<Track>> {
        let limit = limit.clamp(1, SEARCH_LIMIT).to_string();
        let req = self
            .get("/search")
            .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())]);

        let body = self.send(req).await?.json::<SearchResponse>().await?;
        Ok(body.tracks.map(|page| page.items).unwrap_or_default())
    }

    /// Lists the playback devices of the user, in the order Spotify reports
    /// them. An empty list is not an error here; device resolution decides
    /// what that means.
    pub async fn devices(&self) -> Res<Vec<Device>> {
        let body = self
            .send(self.get("/me/player/devices"))
            .await?
            .json::<DevicesResponse>()
            .await?;
        Ok(body.devices)
    }

    /// Starts playing `uris` on the given device, or on whatever Spotify
    /// considers current when `device_id` is `None`.
    ///
    /// # Errors
    ///
    /// - [`Error::Playback`] with Spotify's message when the command is
    ///   refused (e.g. `PREMIUM_REQUIRED`, unknown device)
    /// - [`Error::NotAuthenticated`] on 401
    /// - [`Error::TransientNetwork`] on timeouts, connection failures,
    ///   429 and 5xx answers
    pub async fn start_playback(&self, device_id: Option<&str>, uris: &[String]) -> Res<()> {
        let mut req = self
            .http
            .put(self.url("/me/player/play"))
            .bearer_auth(&self.access_token)
            .json(&StartPlaybackRequest {
                uris: uris.to_vec(),
            });
        if let Some(id) = device_id {
            req = req.query(&[("device_id", id)]);
        }

        match self.send(req).await {
            Ok(_) => Ok(()),
            Err(Error::Api { message, .. }) => Err(Error::Playback(message)),
            Err(e) => Err(e),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(&self.access_token)
    }

    // 401 -> NotAuthenticated, 429/5xx -> TransientNetwork, other -> Api
    async fn send(&self, req: RequestBuilder) -> Res<Response> {
        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }

        let message = error_message(res).await;
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::NotAuthenticated(format!(
                "Spotify rejected the access token ({message}). Please use the login tool again."
            )));
        }
        if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
            return Err(Error::TransientNetwork(format!("{status}: {message}")));
        }

        Err(Error::Api {
            status: status.as_u16(),
            message,
        })
    }
}

async fn error_message(res: Response) -> String {
    let status = res.status();
    let text = res.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorResponse>(&text) {
        Ok(body) => match body.error.reason {
            Some(reason) if !body.error.message.is_empty() => {
                format!("{} ({})", body.error.message, reason)
            }
            _ if !body.error.message.is_empty() => body.error.message,
            _ => status.to_string(),
        },
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => status.to_string(),
    }
}
