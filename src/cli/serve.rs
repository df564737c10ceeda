use std::sync::Arc;

use crate::{
    config::Config, error, notify::BrowserNotifier, server, spotify::AuthManager, success,
};

/// Runs the HTTP server hosting the MCP endpoint and the OAuth callback.
///
/// Binds `SERVER_ADDRESS` and serves `/mcp`, `/callback` and `/health` until
/// the process is stopped.
///
/// # Exit Behavior
///
/// Terminates the program when the address cannot be bound or the server
/// stops with an error.
pub async fn serve(config: Config) {
    let auth = match AuthManager::new(&config) {
        Ok(auth) => Arc::new(auth),
        Err(e) => error!("Cannot set up Spotify authentication. Err: {}", e),
    };

    let listener = match server::bind(&config.server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}. Err: {}", config.server_addr, e),
    };

    success!("spotify-mcp {} ready", env!("CARGO_PKG_VERSION"));
    let router = server::router(auth, Arc::new(BrowserNotifier));
    if let Err(e) = server::start_api_server(listener, router).await {
        error!("Server stopped. Err: {}", e);
    }
}
