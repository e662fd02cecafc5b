use axum::{Extension, Json, http::StatusCode};
use serde_json::{Value, json};

use crate::{
    api::ApiError, debug, info, server::SharedState, spotify, types::PkceToken, utils,
};

/// Starts the Spotify PKCE login.
///
/// Generates a fresh verifier, keeps it for the callback and returns the
/// authorization URL the page should navigate to.
pub async fn login_spotify(
    Extension(state): Extension<SharedState>,
) -> Result<Json<Value>, ApiError> {
    info!("Starting Spotify login flow");
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = spotify::auth::authorize_url(&code_challenge).map_err(|e| ApiError {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        message: format!(
            "Could not generate Spotify authentication URL. Please check your API credentials. ({})",
            e
        ),
    })?;

    *state.pkce.lock().await = Some(PkceToken {
        code_verifier,
        token: None,
    });

    debug!("Generated Spotify auth URL: {}", auth_url);
    Ok(Json(json!({ "auth_url": auth_url })))
}
