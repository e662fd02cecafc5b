//! Playlist URL parsing.
//!
//! A playlist URL is reduced to a [`PlaylistRef`]: the platform that hosts it
//! and the provider's playlist id. Plain `youtube.com` playlist links are
//! served through the YouTube Music client, matching how the web page treats
//! them.

use reqwest::Url;

use crate::{
    debug,
    error::{Error, Result},
    types::{Platform, PlaylistRef},
};

/// Extracts the platform and playlist id from a playlist URL.
///
/// # Accepted Forms
///
/// - `https://open.spotify.com/playlist/{id}` (an `intl-xx` locale segment is skipped)
/// - `spotify:playlist:{id}`
/// - `https://music.youtube.com/playlist?list={id}`
/// - `https://www.youtube.com/playlist?list={id}` and `watch?v=…&list={id}`
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] for anything else.
pub fn parse_playlist_url(url: &str) -> Result<PlaylistRef> {
    let url = url.trim();
    debug!("Extracting playlist info from URL: {}", url);

    if let Some(id) = url.strip_prefix("spotify:playlist:") {
        return spotify_ref(id, url);
    }

    let parsed = Url::parse(url).map_err(|_| Error::InvalidUrl(url.to_string()))?;
    let host = parsed.host_str().unwrap_or_default().to_lowercase();

    if host == "spotify.com" || host.ends_with(".spotify.com") {
        let mut segments = parsed
            .path_segments()
            .map(|s| s.filter(|p| !p.is_empty()).collect::<Vec<_>>())
            .unwrap_or_default();
        if segments.first().is_some_and(|s| s.starts_with("intl-")) {
            segments.remove(0);
        }
        if let [kind, id, ..] = segments.as_slice() {
            if *kind == "playlist" {
                return spotify_ref(id, url);
            }
        }
    } else if host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be" {
        let list = parsed
            .query_pairs()
            .find(|(k, _)| k == "list")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty());
        if let Some(id) = list {
            return Ok(PlaylistRef {
                platform: Platform::YoutubeMusic,
                id,
            });
        }
    }

    Err(Error::InvalidUrl(url.to_string()))
}

fn spotify_ref(id: &str, url: &str) -> Result<PlaylistRef> {
    let id = id.trim();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Error::InvalidUrl(url.to_string()));
    }

    Ok(PlaylistRef {
        platform: Platform::Spotify,
        id: id.to_string(),
    })
}
