use chrono::Utc;

use crate::{config::Config, info, management::TokenStore, success, warning};

/// Shows whether a token is cached and until when it is valid.
///
/// Reads the token cache only; no request is sent to Spotify, so an expired
/// token is reported as such instead of being refreshed.
pub async fn status(config: Config) {
    let store = TokenStore::new(config.token_path.clone());

    match store.load().await {
        Ok(Some(token)) => {
            let now = Utc::now().timestamp();
            if token.is_expired(now) {
                warning!(
                    "Access token expired at {}; it will be refreshed on the next request",
                    super::format_timestamp(token.expires_at)
                );
            } else {
                success!(
                    "Authenticated, access token valid until {}",
                    super::format_timestamp(token.expires_at)
                );
            }
            let scopes: Vec<&str> = token.scope.iter().map(String::as_str).collect();
            info!("Scopes: {}", scopes.join(" "));
            info!("Token cache: {}", store.path().display());
        }
        Ok(None) => warning!("Not authenticated. Run `spotify-mcp auth` or use the login tool."),
        Err(e) => warning!("Cannot read token cache. Err: {}", e),
    }
}
