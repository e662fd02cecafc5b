use axum::{Extension, response::Json};
use serde_json::{Value, json};

use crate::server::SharedState;

pub async fn health(Extension(state): Extension<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "providers": {
            "spotify": state.services.spotify.is_configured().await,
            "youtube_music": state.services.youtube.is_configured(),
        },
        "spotify_logged_in": state.services.spotify.has_user_token().await,
    }))
}
