//! # Spotify Integration Module
//!
//! This module is the Spotify side of plrec: a thin client over the Spotify
//! Web API that reads playlists, resolves artists and fetches their top
//! tracks. It handles token acquisition and maps HTTP failures onto the
//! crate's [`Error`](crate::error::Error) categories.
//!
//! ## Architecture
//!
//! ```text
//! Service Layer (fetch → analyze → recommend)
//!          ↓
//! SpotifyClient (MusicProvider)
//!     ├── Authentication (client credentials, PKCE user login)
//!     ├── Playlist Operations (metadata, paged tracks, audio features)
//!     └── Artist Operations (search, top tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! Two kinds of token are used:
//!
//! - **User token**: obtained through the OAuth 2.0 PKCE login (`plrec auth`
//!   or the `/login-spotify` route). Required for private and collaborative
//!   playlists. Refreshed four minutes before it expires.
//! - **App token**: obtained with the client-credentials grant from the
//!   configured client id and secret. Enough for public playlists and all
//!   catalogue lookups. Cached in memory until shortly before expiry.
//!
//! The user token wins whenever one is present.
//!
//! ## API Coverage
//!
//! - `GET /playlists/{id}` - Playlist metadata and overview (`fields` filtered)
//! - `GET /playlists/{id}/tracks` - Playlist items, following `next`
//! - `GET /audio-features` - Per-track audio features, best effort
//! - `GET /search` - Artist lookup by name
//! - `GET /artists/{id}/top-tracks` - An artist's most popular tracks
//! - `POST /api/token` - Token exchange and refresh operations
//!
//! ## Error Handling
//!
//! Failures are not retried. 401/403 become authentication errors, 429 a
//! rate-limit error (carrying `Retry-After` when present), 404 not found, and
//! everything else an availability error.

pub mod artists;
pub mod auth;
pub mod model;
pub mod playlist;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use crate::{
    config, debug,
    error::{Error, Result, check_status},
    management::TokenManager,
    provider::MusicProvider,
    types::{ArtistRef, Platform, PlaylistInfo, PlaylistOverview, Token, Track},
};

/// Seconds before expiry at which the cached app token is replaced.
const APP_TOKEN_MARGIN_SECS: u64 = 60;

pub struct SpotifyClient {
    http: Client,
    api_url: String,
    market: String,
    client_id: Option<String>,
    client_secret: Option<String>,
    app_token: Mutex<Option<Token>>,
    user_token: Mutex<Option<TokenManager>>,
}

impl SpotifyClient {
    pub fn from_env() -> Self {
        SpotifyClient {
            http: Client::new(),
            api_url: config::spotify_apiurl(),
            market: config::spotify_market(),
            client_id: config::spotify_client_id(),
            client_secret: config::spotify_client_secret(),
            app_token: Mutex::new(None),
            user_token: Mutex::new(None),
        }
    }

    /// Reports whether any way of obtaining a token is configured.
    pub async fn is_configured(&self) -> bool {
        (self.client_id.is_some() && self.client_secret.is_some())
            || self.user_token.lock().await.is_some()
    }

    pub async fn has_user_token(&self) -> bool {
        self.user_token.lock().await.is_some()
    }

    /// Installs a user token; subsequent requests act on behalf of that user.
    pub async fn set_user_token(&self, manager: TokenManager) {
        *self.user_token.lock().await = Some(manager);
    }

    async fn access_token(&self) -> Result<String> {
        {
            let mut user = self.user_token.lock().await;
            if let Some(manager) = user.as_mut() {
                return Ok(manager.get_valid_token().await);
            }
        }

        let mut cached = self.app_token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.expires_within(APP_TOKEN_MARGIN_SECS) {
                return Ok(token.access_token.clone());
            }
        }

        let (Some(client_id), Some(client_secret)) = (&self.client_id, &self.client_secret) else {
            return Err(Error::NotConfigured {
                platform: Platform::Spotify,
                reason: "set SPOTIFY_API_AUTH_CLIENT_ID and SPOTIFY_API_AUTH_CLIENT_SECRET, or log in with Spotify".to_string(),
            });
        };

        debug!("Requesting Spotify app token");
        let token = auth::client_credentials(&self.http, client_id, client_secret).await?;
        let access_token = token.access_token.clone();
        *cached = Some(token);
        Ok(access_token)
    }

    /// Issues an authenticated GET against the Web API.
    ///
    /// `path` is either relative to the API base URL or, for pagination
    /// links, an absolute URL returned by a previous response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}/{}", self.api_url, path.trim_start_matches('/'))
        };
        let token = self.access_token().await?;

        debug!("GET {}", url);
        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        let response = check_status(Platform::Spotify, response).await?;

        Ok(response.json::<T>().await?)
    }
}

impl MusicProvider for SpotifyClient {
    fn platform(&self) -> Platform {
        Platform::Spotify
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        self.get_playlist(playlist_id).await
    }

    async fn playlist_overview(&self, playlist_id: &str) -> Result<PlaylistOverview> {
        self.get_playlist_overview(playlist_id).await
    }

    async fn find_artist(&self, name: &str) -> Result<Option<ArtistRef>> {
        self.search_artist(name).await
    }

    async fn artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<Track>> {
        self.get_artist_top_tracks(&artist.id).await
    }
}
