use std::{sync::Arc, time::Duration};

use tokio::time::{Instant, sleep};

use crate::{
    config::Config,
    error,
    notify::{BrowserNotifier, Notifier},
    server,
    spotify::AuthManager,
    success,
    types::Token,
    warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(120);

/// Interactive login from a terminal.
///
/// Starts the callback server, opens the authorization page and waits until
/// the callback has cached a fresh token.
pub async fn auth(config: Config) {
    let auth = match AuthManager::new(&config) {
        Ok(auth) => Arc::new(auth),
        Err(e) => error!("Cannot set up Spotify authentication. Err: {}", e),
    };

    let previous = auth.cached_token().await.ok().flatten();

    let listener = match server::bind(&config.server_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Cannot bind {}. Err: {}", config.server_addr, e),
    };
    let notifier = Arc::new(BrowserNotifier);
    let router = server::router(Arc::clone(&auth), notifier.clone());
    tokio::spawn(async move {
        if let Err(e) = server::start_api_server(listener, router).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    let url = auth.begin_login();
    if notifier.open(&url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        );
    }

    match wait_for_token(&auth, previous.as_ref()).await {
        Some(token) => success!(
            "Authentication successful! Token valid until {}",
            super::format_timestamp(token.expires_at)
        ),
        None => error!("Authentication failed or timed out."),
    }
}

async fn wait_for_token(auth: &AuthManager, previous: Option<&Token>) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        if let Ok(Some(token)) = auth.cached_token().await {
            if previous != Some(&token) {
                return Some(token);
            }
        }
        sleep(Duration::from_secs(1)).await;
    }

    None
}
