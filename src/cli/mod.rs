//! # CLI Module
//!
//! Command-line entry points of `spotify-mcp`. Each command resolves what it
//! needs from the [`Config`](crate::config::Config) and delegates to the
//! server, Spotify and management layers, reporting through the logging
//! macros.
//!
//! ## Commands
//!
//! - [`serve`] - runs the HTTP server with the MCP endpoint (default)
//! - [`auth`] - interactive login from a terminal
//! - [`status`] - shows the cached token
//! - [`devices`] - lists the user's playback devices
//! - [`genres`] - shows the difficulty to genre palettes
//!
//! ```bash
//! spotify-mcp auth        # authorize once
//! spotify-mcp             # serve http://127.0.0.1:8888/mcp
//! spotify-mcp devices     # check that a player is open
//! ```

mod auth;
mod devices;
mod genres;
mod serve;
mod status;

use chrono::{Local, TimeZone};

pub use auth::auth;
pub use devices::devices;
pub use genres::genres;
pub use serve::serve;
pub use status::status;

fn format_timestamp(ts: i64) -> String {
    match Local.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => ts.to_string(),
    }
}
