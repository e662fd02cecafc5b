//! Configuration management for plrec.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage provider
//! credentials, API endpoints, server settings and the user-facing limits of the
//! recommendation pipeline.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (endpoints, server address, market)
//!
//! Credentials have no defaults. Their getters return `Option` so a missing
//! provider is reported per request instead of aborting the whole process.

use std::{env, path::PathBuf};

/// Playlists with fewer tracks are rejected before recommending.
pub const MINIMUM_TRACKS: usize = 10;

/// Recommendation count used when a request does not name one.
pub const DEFAULT_RECOMMENDATIONS: usize = 10;

/// Upper bound for the requested recommendation count.
pub const MAX_RECOMMENDATIONS: usize = 50;

/// Number of artists reported as "top artists" by the analyzer.
pub const TOP_ARTISTS: usize = 5;

/// Number of albums reported as "top albums" by the analyzer.
pub const TOP_ALBUMS: usize = 5;

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5000";
const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_SPOTIFY_REDIRECT_URI: &str = "http://127.0.0.1:5000/callback";
const DEFAULT_SPOTIFY_SCOPE: &str = "playlist-read-private playlist-read-collaborative user-library-read user-read-private user-top-read";
const DEFAULT_SPOTIFY_MARKET: &str = "US";
const DEFAULT_YOUTUBE_API_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the working directory first and then in the
/// platform-specific local data directory under `plrec/.env`. Both files are
/// optional; values already present in the process environment are never
/// overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/plrec/.env`
/// - macOS: `~/Library/Application Support/plrec/.env`
/// - Windows: `%LOCALAPPDATA%/plrec/.env`
pub async fn load_env() {
    let _ = dotenv::dotenv();

    let path = data_dir().join(".env");
    if async_fs::metadata(&path).await.is_ok() {
        if let Err(e) = dotenv::from_path(&path) {
            crate::warning!("Cannot read {}: {}", path.display(), e);
        }
    }
}

/// Returns the application's local data directory (`<data_local_dir>/plrec`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("plrec");
    path
}

/// Returns the address the web server binds to, e.g. `127.0.0.1:5000`.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify Web API base URL.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

/// Returns the Spotify API client ID, if configured.
pub fn spotify_client_id() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret, if configured.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth redirect URI.
///
/// This must match the redirect URI registered in the Spotify application
/// settings and point at the `/callback` route of the running server.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_SPOTIFY_REDIRECT_URI)
}

/// Returns the Spotify API scope permissions requested at login.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

/// Returns the market used for artist top-track lookups.
pub fn spotify_market() -> String {
    var_or("SPOTIFY_MARKET", DEFAULT_SPOTIFY_MARKET)
}

/// Returns the YouTube Data API base URL.
pub fn youtube_apiurl() -> String {
    var_or("YOUTUBE_API_URL", DEFAULT_YOUTUBE_API_URL)
}

/// Returns the YouTube Data API key, if configured.
pub fn youtube_api_key() -> Option<String> {
    non_empty_var("YOUTUBE_API_KEY")
}

/// Reports whether `PLREC_DEBUG` is set to a truthy value.
pub fn debug_enabled() -> bool {
    env::var("PLREC_DEBUG")
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

/// Clamps a requested recommendation count to `[1, MAX_RECOMMENDATIONS]`.
///
/// A missing value falls back to [`DEFAULT_RECOMMENDATIONS`].
pub fn clamp_recommendations(requested: Option<i64>) -> usize {
    match requested {
        Some(n) => n.clamp(1, MAX_RECOMMENDATIONS as i64) as usize,
        None => DEFAULT_RECOMMENDATIONS,
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "true" | "1" | "t" | "yes"
    )
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
