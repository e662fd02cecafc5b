use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config,
    error::{Error, Result, check_status},
    spotify::model::TokenResponse,
    types::{Platform, Token},
};

/// Builds the Spotify authorization URL for the PKCE flow.
///
/// # Arguments
///
/// * `code_challenge` - SHA256 challenge derived from the code verifier
///
/// # Errors
///
/// Returns [`Error::NotConfigured`] when no client id is set.
pub fn authorize_url(code_challenge: &str) -> Result<String> {
    let client_id = config::spotify_client_id().ok_or_else(missing_client_id)?;

    let url = Url::parse_with_params(
        &config::spotify_apiauth_url(),
        &[
            ("client_id", client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config::spotify_redirect_uri().as_str()),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", config::spotify_scope().as_str()),
        ],
    )
    .map_err(|e| Error::NotConfigured {
        platform: Platform::Spotify,
        reason: format!("invalid SPOTIFY_API_AUTH_URL: {}", e),
    })?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access token using PKCE.
///
/// Completes the OAuth 2.0 PKCE flow by exchanging the authorization code
/// received on the callback route for an access token. The verifier proves
/// that the same client that initiated the flow is completing it.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
/// * `verifier` - PKCE code verifier generated at the start of the flow
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let client_id = config::spotify_client_id().ok_or_else(missing_client_id)?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await?;
    let res = check_status(Platform::Spotify, res).await?;

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(None, Utc::now().timestamp() as u64))
}

/// Refreshes an expired user access token using its refresh token.
///
/// Spotify may or may not rotate the refresh token; when it does not, the
/// current one is kept.
pub async fn refresh_token(refresh_token: &str) -> std::result::Result<Token, String> {
    let client_id = config::spotify_client_id().ok_or("SPOTIFY_API_AUTH_CLIENT_ID is not set")?;

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
            ("client_id", client_id.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?;

    let json = res
        .json::<TokenResponse>()
        .await
        .map_err(|e| e.to_string())?;
    Ok(json.into_token(Some(refresh_token), Utc::now().timestamp() as u64))
}

/// Obtains an app token with the client-credentials grant.
///
/// App tokens can read public playlists and catalogue data but nothing that
/// belongs to a user.
pub async fn client_credentials(
    client: &Client,
    client_id: &str,
    client_secret: &str,
) -> Result<Token> {
    let res = client
        .post(config::spotify_apitoken_url())
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;
    let res = check_status(Platform::Spotify, res).await?;

    let json = res.json::<TokenResponse>().await?;
    Ok(json.into_token(None, Utc::now().timestamp() as u64))
}

fn missing_client_id() -> Error {
    Error::NotConfigured {
        platform: Platform::Spotify,
        reason: "SPOTIFY_API_AUTH_CLIENT_ID is not set".to_string(),
    }
}
