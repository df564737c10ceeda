use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use tokio::sync::Mutex;

use crate::{
    Res,
    config::{Config, SCOPES},
    error::Error,
    info,
    management::TokenStore,
    spotify::SpotifyClient,
    success,
    types::{Token, TokenResponse},
    warning,
};

/// Timeout applied to every request against the accounts service and the Web API.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the OAuth 2.0 authorization code flow and the cached token.
///
/// Constructed once at startup and shared as `Arc<AuthManager>` with the
/// callback route and the tools. It is the only owner of the [`TokenStore`];
/// every read-modify-write of the token happens under its mutex.
#[derive(Debug)]
pub struct AuthManager {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    auth_url: Url,
    token_url: String,
    api_url: String,
    http: Client,
    store: Mutex<TokenStore>,
}

impl AuthManager {
    pub fn new(config: &Config) -> Res<Self> {
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;
        let auth_url = Url::parse(&config.auth_url).map_err(|e| {
            Error::Config(format!("invalid authorization URL '{}': {}", config.auth_url, e))
        })?;

        Ok(AuthManager {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_uri: config.redirect_uri.clone(),
            auth_url,
            token_url: config.token_url.clone(),
            api_url: config.api_url.clone(),
            http,
            store: Mutex::new(TokenStore::new(config.token_path.clone())),
        })
    }

    /// Builds the authorization URL the user has to visit to grant access.
    ///
    /// Opening it is up to the caller.
    pub fn begin_login(&self) -> String {
        let mut url = self.auth_url.clone();
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", &SCOPES.join(" "));
        url.into()
    }

    /// Exchanges an authorization code for a token and caches it.
    pub async fn complete_login(&self, code: &str) -> Res<Token> {
        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::AuthExchange(e.to_string()))?;

        let body = read_token_response(res).await.map_err(Error::AuthExchange)?;
        let token = Token::from_response(body, None, Utc::now().timestamp());

        let store = self.store.lock().await;
        store.persist(&token).await?;
        success!("Authenticated with Spotify, token cached at {}", store.path().display());

        Ok(token)
    }

    /// Returns a client bound to a valid access token.
    ///
    /// An expired token is refreshed exactly once; if that fails the user has
    /// to log in again. The store stays locked for the whole check so
    /// concurrent callers never refresh or write the token twice.
    pub async fn get_valid_session(&self) -> Res<SpotifyClient> {
        let store = self.store.lock().await;

        let Some(token) = store.load().await? else {
            warning!("No cached token found. Please authenticate with the login tool.");
            return Err(Error::not_authenticated());
        };

        let now = Utc::now().timestamp();
        let token = if token.is_expired(now) {
            info!("Access token expired, refreshing");
            let refreshed = match self.refresh(&token).await {
                Ok(refreshed) => refreshed,
                Err(e) => {
                    warning!("Token refresh failed: {}", e);
                    return Err(Error::NotAuthenticated(format!(
                        "The session expired and could not be refreshed ({e}). \
                         Please use the login tool to authenticate again."
                    )));
                }
            };
            store.persist(&refreshed).await?;
            refreshed
        } else {
            token
        };

        Ok(SpotifyClient::new(
            self.http.clone(),
            self.api_url.clone(),
            token.access_token,
        ))
    }

    /// The currently cached token, if any, without validating it.
    pub async fn cached_token(&self) -> Res<Option<Token>> {
        self.store.lock().await.load().await
    }

    async fn refresh(&self, token: &Token) -> Result<Token, String> {
        if token.refresh_token.is_empty() {
            return Err("no refresh token cached".into());
        }

        let res = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", token.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let body = read_token_response(res).await?;
        Ok(Token::from_response(body, Some(token), Utc::now().timestamp()))
    }
}

async fn read_token_response(res: reqwest::Response) -> Result<TokenResponse, String> {
    let status = res.status();
    if status != StatusCode::OK {
        let text = res.text().await.unwrap_or_default();
        return Err(format!("token endpoint answered {status}: {text}"));
    }

    res.json::<TokenResponse>().await.map_err(|e| e.to_string())
}
