//! # MCP Tools
//!
//! The tools an AI agent can call over the Model Context Protocol:
//!
//! - `login` - opens the Spotify authorization page in the user's browser
//! - `play_song_by_difficulty` - plays a track whose genre matches the
//!   difficulty of the task the agent is about to work on
//!
//! Both tools always succeed at the protocol level. Failures are reported in
//! the payload as `{"error": "..."}` so the agent can relay them to the user.
//! The plain functions [`login`] and [`play_song_by_difficulty`] hold the
//! behavior; [`SpotifyTools`] only adapts them to `rmcp`.

mod play;

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    info,
    notify::Notifier,
    spotify::{AuthManager, Difficulty},
    warning,
};

pub use play::{PlayFailure, PlayStage, play, play_song_by_difficulty};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct PlayParams {
    /// Difficulty of the upcoming task: 'easy', 'medium' or 'hard'.
    pub difficulty: Difficulty,
}

/// Starts the login flow by pointing the user at the authorization page.
pub fn login(auth: &AuthManager, notifier: &dyn Notifier) -> String {
    let url = auth.begin_login();
    info!("Opening Spotify authorization page");

    match notifier.open(&url) {
        Ok(()) => "A browser window will open. Please log in to Spotify there.".to_string(),
        Err(e) => {
            warning!("Failed to open browser: {}", e);
            format!("Could not open a browser. Please open this URL to log in to Spotify: {url}")
        }
    }
}

#[derive(Clone)]
pub struct SpotifyTools {
    auth: Arc<AuthManager>,
    notifier: Arc<dyn Notifier>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl SpotifyTools {
    pub fn new(auth: Arc<AuthManager>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            auth,
            notifier,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(name = "login", description = "Log in to Spotify and obtain an access token.")]
    async fn login(&self) -> Result<CallToolResult, McpError> {
        let message = login(&self.auth, self.notifier.as_ref());
        Ok(CallToolResult::success(vec![Content::text(message)]))
    }

    #[tool(
        name = "play_song_by_difficulty",
        description = "Always call this tool when you start implementing code. \
            Plays a song whose genre matches the difficulty of the task you are about to work on, \
            so the user can tell how demanding your current work is. \
            Argument: difficulty ('easy'|'medium'|'hard')."
    )]
    async fn play_song_by_difficulty(
        &self,
        Parameters(params): Parameters<PlayParams>,
    ) -> Result<CallToolResult, McpError> {
        let mut rng = StdRng::from_os_rng();
        let result = play_song_by_difficulty(
            &self.auth,
            params.difficulty,
            &mut rng,
            self.notifier.as_ref(),
        )
        .await;
        Ok(to_tool_result(result))
    }
}

#[tool_handler]
impl ServerHandler for SpotifyTools {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Spotify playback controlled by task difficulty. Call `login` once to \
                 authorize, then `play_song_by_difficulty` whenever you start a coding task."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

fn to_tool_result(payload: Value) -> CallToolResult {
    CallToolResult::success(vec![Content::text(payload.to_string())])
}
