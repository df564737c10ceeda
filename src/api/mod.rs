//! # API Module
//!
//! Plain HTTP endpoints served next to the MCP endpoint by [`crate::server`].
//!
//! - [`callback`] - completes the OAuth 2.0 authorization code flow. Spotify
//!   redirects the browser here with a `code` query parameter, which is
//!   exchanged for a token through [`crate::spotify::AuthManager`].
//! - [`health`] - reports status, version and whether a token is cached.
//!
//! Both handlers get the shared `Arc<AuthManager>` through an axum
//! [`Extension`](axum::Extension) layer. The callback answers with JSON and
//! HTTP 200 in every case, errors included, so callers only have to look at
//! the payload.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
