//! Configuration management for the Spotify MCP server.
//!
//! Values are read from environment variables, optionally populated from
//! `.env` files. The configuration is resolved once at startup into a
//! [`Config`] value that is handed to the components needing it; nothing
//! reads the environment after that.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory (`spotify-mcp/.env`)
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Res, error::Error};

pub const APP_DIR: &str = "spotify-mcp";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Scopes requested during authorization: control and read playback, read the library.
pub const SCOPES: [&str; 3] = [
    "user-modify-playback-state",
    "user-read-playback-state",
    "user-library-read",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub server_addr: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub token_path: PathBuf,
}

impl Config {
    /// Resolves the configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `SPOTIFY_API_AUTH_CLIENT_ID` or
    /// `SPOTIFY_API_AUTH_CLIENT_SECRET` is missing or empty.
    pub fn from_env() -> Res<Self> {
        Ok(Config {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: optional("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI),
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            token_path: env::var("SPOTIFY_MCP_TOKEN_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_token_path),
        })
    }
}

/// Loads `.env` files from the working directory and the local data directory.
///
/// Creates the data directory if needed so the `.env.example` template
/// copied there by the build has a home. Missing `.env` files are fine; the
/// variables may come straight from the process environment.
pub async fn load_env() -> Result<(), String> {
    let _ = dotenv::dotenv();

    let mut path = data_dir();
    path.push(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    match dotenv::from_path(&path) {
        Ok(()) => Ok(()),
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(format!("Failed to load {}: {}", path.display(), e)),
    }
}

/// Platform specific data directory of the application, e.g.
/// `~/.local/share/spotify-mcp` on Linux.
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

pub fn default_token_path() -> PathBuf {
    let mut path = data_dir();
    path.push("cache/token.json");
    path
}

fn required(key: &str) -> Res<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::Config(format!("{key} must be set"))),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
