use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Json};
use serde_json::{Value, json};

use crate::{spotify::AuthManager, warning};

/// `GET /callback`, the redirect target of the Spotify authorization page.
///
/// Always answers 200; failures are reported in the `error` field.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(auth): Extension<Arc<AuthManager>>,
) -> Json<Value> {
    let Some(code) = params.get("code") else {
        if let Some(reason) = params.get("error") {
            warning!("Authorization was not granted: {}", reason);
        }
        return Json(json!({ "error": "No code found in callback." }));
    };

    match auth.complete_login(code).await {
        Ok(_) => Json(json!({ "message": "Authentication successful!" })),
        Err(e) => {
            warning!("Error getting access token: {}", e);
            Json(json!({ "error": "Could not get access token." }))
        }
    }
}
