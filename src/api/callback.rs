use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Redirect};

use crate::{management::TokenManager, server::SharedState, spotify, success, warning};

/// Completes the Spotify PKCE login.
///
/// Exchanges the authorization code for a user token, installs it on the
/// Spotify client, persists it for the next start and redirects back to the
/// page. Failures redirect to `/?error=<reason>`.
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<SharedState>,
) -> Redirect {
    let Some(code) = params.get("code") else {
        warning!(
            "No authorization code received from Spotify: {}",
            params.get("error").map(String::as_str).unwrap_or("unknown")
        );
        return Redirect::to("/?error=no_code");
    };

    let mut pkce = state.pkce.lock().await;
    // Take code verifier from state
    let Some(pkce_state) = pkce.as_mut() else {
        warning!("Received Spotify callback without a pending login");
        return Redirect::to("/?error=no_verifier");
    };

    match spotify::auth::exchange_code_pkce(code, &pkce_state.code_verifier).await {
        Ok(token) => {
            pkce_state.token = Some(token.clone());
            let manager = TokenManager::new(token);
            if let Err(e) = manager.persist().await {
                warning!("Failed to save token to cache: {}", e);
            }
            state.services.spotify.set_user_token(manager).await;
            success!("Successfully authenticated with Spotify");
            Redirect::to("/")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Redirect::to("/?error=token_failure")
        }
    }
}
