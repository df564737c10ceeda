//! Spotify MCP Server Library
//!
//! Lets an AI agent control Spotify playback through the Model Context
//! Protocol. The agent announces how hard the task it is about to work on is,
//! and the server plays music from a genre palette matching that difficulty
//! on the user's account.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints next to the MCP endpoint (OAuth callback, health)
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by all layers
//! - `management` - Token cache persistence
//! - `notify` - Directing the user to URLs (browser)
//! - `server` - Local HTTP server hosting the callback and MCP endpoint
//! - `spotify` - OAuth flow, Web API client, track selection and playback
//! - `tools` - MCP tool definitions
//! - `types` - Data structures and type definitions
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotify_mcp::{config, notify::BrowserNotifier, server, spotify::AuthManager};
//!
//! #[tokio::main]
//! async fn main() -> spotify_mcp::Res<()> {
//!     let _ = config::load_env().await;
//!     let config = config::Config::from_env()?;
//!     let auth = Arc::new(AuthManager::new(&config)?);
//!     let listener = server::bind(&config.server_addr).await?;
//!     server::start_api_server(listener, server::router(auth, Arc::new(BrowserNotifier))).await
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod notify;
pub mod server;
pub mod spotify;
pub mod tools;
pub mod types;

/// Result type used throughout the crate.
///
/// # Example
///
/// ```
/// use spotify_mcp::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::Error>;

/// Prints an informational message with a blue bullet point.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Opening Spotify authorization page");
/// info!("Found {} devices", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// success!("Authenticated with Spotify");
/// success!("Started playing '{}'", track);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors, such as missing credentials at startup. The
/// process terminates with exit code 1 right after printing.
///
/// # Example
///
/// ```
/// error!("Cannot load configuration. Err: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable problems: failed tool runs, rejected tokens,
/// a browser that could not be opened.
///
/// # Example
///
/// ```
/// warning!("Token refresh failed: {}", e);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
