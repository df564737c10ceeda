//! # Spotify Integration Module
//!
//! Everything that talks to Spotify: the OAuth 2.0 authorization code flow,
//! the Web API client, and the logic that turns a difficulty level into
//! something playing on one of the user's devices.
//!
//! ```text
//! Tools / Callback route
//!          ↓
//!     AuthManager ── TokenStore (token.json)
//!          ↓ get_valid_session()
//!     SpotifyClient
//!      ├── tracks::select_track     (current_match, search_genre)
//!      └── playback::start_playback (choose_device, play_on)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Modules
//!
//! - [`auth`] - [`AuthManager`]: authorize URL, code exchange, token refresh
//! - [`client`] - [`SpotifyClient`]: thin typed wrapper over the REST endpoints
//! - [`genres`] - [`Difficulty`] and the static genre palettes
//! - [`tracks`] - track selection, including the "already playing" short-circuit
//! - [`playback`] - device resolution and the play command
//!
//! ## Error Handling
//!
//! Nothing here swallows errors. Timeouts and connection failures surface as
//! [`crate::error::Error::TransientNetwork`], a rejected access token as
//! `NotAuthenticated`. Nothing is retried automatically apart from the
//! single token refresh performed by [`AuthManager::get_valid_session`].

pub mod auth;
pub mod client;
pub mod genres;
pub mod playback;
pub mod tracks;

pub use auth::AuthManager;
pub use client::SpotifyClient;
pub use genres::{Difficulty, GenreSet, genres_for};
pub use playback::{PlaybackOutcome, choose_device, play_on, resolve_device, start_playback};
pub use tracks::{SelectionResult, current_match, search_genre, select_track};
