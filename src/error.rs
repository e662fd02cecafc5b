use reqwest::{Response, StatusCode};
use thiserror::Error;

use crate::types::Platform;

/// Every failure the pipeline can surface to a user.
///
/// A short recommendation list is a valid result, not an error.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid playlist URL format: {0}. Please check the URL and try again.")]
    InvalidUrl(String),

    #[error("{platform} is not configured: {reason}")]
    NotConfigured { platform: Platform, reason: String },

    #[error("{0} authentication failed. Check the API credentials or log in again.")]
    Auth(Platform),

    #[error("{platform} rate limit reached{}. Please try again later.", retry_hint(.retry_after))]
    RateLimited {
        platform: Platform,
        retry_after: Option<u64>,
    },

    #[error("{0} is unavailable: {1}")]
    Unavailable(Platform, String),

    #[error("The requested item was not found on {0}.")]
    NotFound(Platform),

    #[error("Playlist not found on {0}. It may be private or deleted.")]
    PlaylistNotFound(Platform),

    #[error(
        "Playlist has only {found} playable tracks, but at least {required} are needed for good recommendations. Local files and unavailable tracks are not counted."
    )]
    TooFewTracks { found: usize, required: usize },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors that end a recommendation run instead of skipping one artist.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Auth(_) | Error::RateLimited { .. } | Error::NotConfigured { .. }
        )
    }

    /// Rewords a bare 404 for a request that addressed a playlist.
    pub fn for_playlist(self) -> Error {
        match self {
            Error::NotFound(platform) => Error::PlaylistNotFound(platform),
            other => other,
        }
    }
}

fn retry_hint(retry_after: &Option<u64>) -> String {
    match retry_after {
        Some(secs) => format!(" (retry after {} seconds)", secs),
        None => String::new(),
    }
}

/// Passes successful responses through and classifies the rest.
///
/// A 403 that reports an exhausted quota counts as a rate limit; any other
/// 401/403 is an authentication failure.
pub(crate) async fn check_status(platform: Platform, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(classify_status(platform, status, retry_after, &body))
}

/// Maps a non-success provider status to an [`Error`].
pub fn classify_status(
    platform: Platform,
    status: StatusCode,
    retry_after: Option<u64>,
    body: &str,
) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited {
            platform,
            retry_after,
        },
        StatusCode::FORBIDDEN if body.contains("quotaExceeded") => Error::RateLimited {
            platform,
            retry_after,
        },
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Auth(platform),
        StatusCode::NOT_FOUND => Error::NotFound(platform),
        other => {
            let snippet: String = body.chars().take(200).collect();
            Error::Unavailable(platform, format!("{} {}", other, snippet.trim()))
        }
    }
}
