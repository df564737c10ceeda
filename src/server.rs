use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use rmcp::transport::streamable_http_server::{
    StreamableHttpService, session::local::LocalSessionManager,
};
use tokio::net::TcpListener;

use crate::{
    Res, api, error::Error, info, notify::Notifier, spotify::AuthManager, tools::SpotifyTools,
};

/// Path of the streamable HTTP MCP endpoint.
pub const MCP_PATH: &str = "/mcp";

/// Routes of the server: health, OAuth callback and the MCP endpoint.
pub fn router(auth: Arc<AuthManager>, notifier: Arc<dyn Notifier>) -> Router {
    let tools_auth = Arc::clone(&auth);
    let mcp = StreamableHttpService::new(
        move || Ok(SpotifyTools::new(Arc::clone(&tools_auth), Arc::clone(&notifier))),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .nest_service(MCP_PATH, mcp)
        .layer(Extension(auth))
}

pub async fn bind(addr: &str) -> Res<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| Error::Config(format!("invalid server address '{addr}': {e}")))?;
    Ok(TcpListener::bind(addr).await?)
}

/// Serves `router` on `listener` until the process is stopped.
pub async fn start_api_server(listener: TcpListener, router: Router) -> Res<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("Listening on http://{}{}", addr, MCP_PATH);
    }
    axum::serve(listener, router).await?;
    Ok(())
}
