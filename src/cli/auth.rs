use std::{sync::Arc, time::Duration};

use tokio::time::Instant;

use crate::{
    config, error,
    management::TokenManager,
    server::{AppState, SharedState, start_api_server},
    service::Services,
    spotify, success,
    types::{PkceToken, Token},
    utils, warning,
};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Logs in to Spotify through the browser.
///
/// Starts the web server so `/callback` can receive the authorization code,
/// opens the authorization page and waits up to a minute for the exchanged
/// token. The token is persisted and picked up by later commands.
pub async fn auth() {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = match spotify::auth::authorize_url(&code_challenge) {
        Ok(url) => url,
        Err(e) => error!("Cannot start Spotify login. Err: {}", e),
    };

    let state: SharedState = Arc::new(AppState::new(Services::from_env()));
    *state.pkce.lock().await = Some(PkceToken {
        code_verifier,
        token: None,
    });

    let server_state = Arc::clone(&state);
    let addr = config::server_addr();
    tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state, &addr).await {
            error!("Cannot start callback server. Err: {}", e);
        }
    });

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    match wait_for_token(&state).await {
        Some(token) => {
            // the callback persists too, but only when it runs in this process
            if let Err(e) = TokenManager::new(token).persist().await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        None => error!("Authentication failed or timed out."),
    }
}

async fn wait_for_token(state: &SharedState) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < LOGIN_TIMEOUT {
        if let Some(token) = state
            .pkce
            .lock()
            .await
            .as_ref()
            .and_then(|p| p.token.clone())
        {
            return Some(token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
