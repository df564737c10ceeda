//! Error types shared by every layer of the server.
//!
//! Internal components return [`Error`] and propagate it with `?`. Only the
//! tool entry points and the OAuth callback turn errors into the
//! `{"error": "..."}` payload handed back to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// No cached token, or the cached one is expired and could not be refreshed.
    #[error("Not authenticated. {0}")]
    NotAuthenticated(String),

    /// The authorization code could not be exchanged for a token.
    #[error("Could not get access token: {0}")]
    AuthExchange(String),

    #[error("No Spotify device found. Open the Spotify app or the web player and try again.")]
    NoDevice,

    /// Spotify refused the play command (premium required, device gone, ...).
    #[error("Spotify rejected the playback command: {0}")]
    Playback(String),

    #[error("No tracks found for genre '{0}'.")]
    NoResults(String),

    /// Timeouts and connection failures. Safe to retry.
    #[error("Network error while talking to Spotify, please try again: {0}")]
    TransientNetwork(String),

    #[error("Spotify API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from Spotify: {0}")]
    UnexpectedResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Token cache error: {0}")]
    Cache(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn not_authenticated() -> Self {
        Error::NotAuthenticated("Please use the login tool to authenticate with Spotify.".into())
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::TransientNetwork(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            return Error::TransientNetwork(err.to_string());
        }
        if err.is_decode() {
            return Error::UnexpectedResponse(err.to_string());
        }
        match err.status() {
            Some(status) => Error::Api {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => Error::TransientNetwork(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Cache(err.to_string())
    }
}
