use std::sync::Arc;

use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::spotify::AuthManager;

pub async fn health(Extension(auth): Extension<Arc<AuthManager>>) -> Json<Value> {
    let authenticated = matches!(auth.cached_token().await, Ok(Some(_)));

    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "authenticated": authenticated,
    }))
}
