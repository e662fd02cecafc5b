//! # API Module
//!
//! HTTP endpoints of the plrec web front end. The page at `/` posts a
//! playlist URL to the JSON endpoints below and renders whatever comes back.
//!
//! ## Endpoints
//!
//! ### Playlists
//!
//! - [`validate_playlist`] - Cheap check of a URL: platform, name, track count
//! - [`analyze_playlist`] - Fetches and analyzes a playlist
//! - [`get_recommendations`] - Fetches, analyzes and recommends
//!
//! ### Authentication
//!
//! - [`login_spotify`] - Starts the Spotify PKCE login and returns the authorization URL
//! - [`callback`] - Completes the login and stores the user token
//!
//! ### Monitoring
//!
//! - [`health`] - Application status and version
//!
//! ## Errors
//!
//! Failures are returned as `{"error": "..."}` with a status code derived from
//! the error category, see [`status_for`].

mod callback;
mod health;
mod index;
mod login;
mod playlist;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::Error;

pub use callback::callback;
pub use health::health;
pub use index::{index, not_found};
pub use login::login_spotify;
pub use playlist::{analyze_playlist, get_recommendations, validate_playlist};

/// Body accepted by the playlist endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistRequest {
    pub playlist_url: Option<String>,
    /// A number or a numeric string; clamped later.
    pub num_recommendations: Option<serde_json::Value>,
}

impl PlaylistRequest {
    pub fn url(&self) -> Result<&str, ApiError> {
        self.playlist_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .ok_or_else(|| ApiError::bad_request("No playlist URL provided"))
    }

    pub fn requested_count(&self) -> Result<Option<i64>, ApiError> {
        match &self.num_recommendations {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .map(Some)
                .ok_or_else(|| ApiError::bad_request("num_recommendations must be a number")),
            Some(serde_json::Value::String(s)) => s
                .trim()
                .parse::<i64>()
                .map(Some)
                .map_err(|_| ApiError::bad_request("num_recommendations must be a number")),
            Some(_) => Err(ApiError::bad_request("num_recommendations must be a number")),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    pub status: &'static str,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(body: T) -> Self {
        Success {
            status: "success",
            body,
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: &str) -> Self {
        ApiError {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError {
            status: status_for(&err),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// HTTP status used to report an [`Error`].
pub fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::InvalidUrl(_) | Error::TooFewTracks { .. } => StatusCode::BAD_REQUEST,
        Error::Auth(_) => StatusCode::UNAUTHORIZED,
        Error::NotFound(_) | Error::PlaylistNotFound(_) => StatusCode::NOT_FOUND,
        Error::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        Error::Unavailable(..) | Error::Http(_) => StatusCode::BAD_GATEWAY,
        Error::NotConfigured { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}
