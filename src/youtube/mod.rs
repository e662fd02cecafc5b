//! # YouTube Music Integration Module
//!
//! YouTube Music has no public API of its own, so playlists are read through
//! the YouTube Data API v3, which serves the same playlist ids. Requests are
//! authenticated with an API key (`YOUTUBE_API_KEY`).
//!
//! ## Track Metadata
//!
//! Music uploads come from auto-generated "Artist - Topic" channels whose
//! video titles are plain song names, so the artist is the owner channel with
//! the ` - Topic` suffix removed. Other uploads usually follow the
//! `Artist - Song` title convention and are split on the first ` - `.
//! Durations come from a separate `videos` lookup; albums are never known.
//!
//! ## API Coverage
//!
//! - `GET /playlists` - Playlist title, owner, thumbnail and item count
//! - `GET /playlistItems` - Playlist entries, following `nextPageToken`
//! - `GET /videos` - ISO-8601 durations, 50 ids per request
//! - `GET /search` - Channel lookup by artist name and most viewed music videos
//!
//! Quota exhaustion is reported by the API as a 403 and surfaces as a
//! rate-limit error.

pub mod model;

use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    config, debug,
    error::{Error, Result, check_status},
    info,
    provider::MusicProvider,
    types::{ArtistRef, Platform, PlaylistInfo, PlaylistOverview, Track},
    utils, warning,
};

use model::{ListResponse, PlaylistItem, SearchResult, Video, YouTubePlaylist};

const PAGE_SIZE: &str = "50";
const VIDEO_BATCH: usize = 50;
const TOP_TRACKS_LIMIT: &str = "25";
const MUSIC_CATEGORY_ID: &str = "10";
const TOPIC_SUFFIX: &str = " - Topic";

pub struct YouTubeClient {
    http: Client,
    api_url: String,
    api_key: Option<String>,
}

impl YouTubeClient {
    pub fn from_env() -> Self {
        YouTubeClient {
            http: Client::new(),
            api_url: config::youtube_apiurl(),
            api_key: config::youtube_api_key(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let Some(key) = self.api_key.as_deref() else {
            return Err(Error::NotConfigured {
                platform: Platform::YoutubeMusic,
                reason: "YOUTUBE_API_KEY is not set".to_string(),
            });
        };
        let url = format!("{}/{}", self.api_url, path);

        debug!("GET {} {:?}", url, query);
        let response = self
            .http
            .get(&url)
            .query(query)
            .query(&[("key", key)])
            .send()
            .await?;
        let response = check_status(Platform::YoutubeMusic, response).await?;

        Ok(response.json::<T>().await?)
    }

    async fn get_playlist_meta(&self, playlist_id: &str) -> Result<YouTubePlaylist> {
        let response: ListResponse<YouTubePlaylist> = self
            .get_json(
                "playlists",
                &[("part", "snippet,contentDetails"), ("id", playlist_id)],
            )
            .await?;

        response
            .items
            .into_iter()
            .next()
            .ok_or(Error::PlaylistNotFound(Platform::YoutubeMusic))
    }

    /// Fetches a playlist's metadata and all of its playable entries.
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        debug!("Fetching YouTube Music playlist: {}", playlist_id);
        let meta = self.get_playlist_meta(playlist_id).await?;
        info!("Retrieved YouTube Music playlist: {}", meta.snippet.title);

        let mut tracks: Vec<Track> = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page: ListResponse<PlaylistItem> = {
                let mut query = vec![
                    ("part", "snippet,contentDetails"),
                    ("playlistId", playlist_id),
                    ("maxResults", PAGE_SIZE),
                ];
                if let Some(token) = page_token.as_deref() {
                    query.push(("pageToken", token));
                }
                self.get_json("playlistItems", &query).await?
            };
            tracks.extend(page.items.into_iter().filter_map(playlist_item_track));

            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        match self.get_durations(&tracks).await {
            Ok(durations) => {
                for track in tracks.iter_mut() {
                    track.duration_ms = durations.get(&track.id).copied();
                }
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => warning!("Track durations unavailable, skipping: {}", e),
        }

        Ok(PlaylistInfo {
            id: meta.id,
            name: meta.snippet.title,
            description: meta.snippet.description,
            owner: meta.snippet.channel_title,
            image_url: meta.snippet.thumbnails.best(),
            platform: Platform::YoutubeMusic,
            tracks,
        })
    }

    async fn get_durations(&self, tracks: &[Track]) -> Result<HashMap<String, u64>> {
        let mut durations = HashMap::new();

        for chunk in tracks.chunks(VIDEO_BATCH) {
            let ids = chunk
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let response: ListResponse<Video> = self
                .get_json("videos", &[("part", "contentDetails"), ("id", ids.as_str())])
                .await?;

            for video in response.items {
                if let Some(ms) = utils::parse_iso8601_duration(&video.content_details.duration) {
                    durations.insert(video.id, ms);
                }
            }
        }

        Ok(durations)
    }

    pub async fn get_playlist_overview(&self, playlist_id: &str) -> Result<PlaylistOverview> {
        let meta = self.get_playlist_meta(playlist_id).await?;

        Ok(PlaylistOverview {
            name: meta.snippet.title,
            track_count: meta
                .content_details
                .map(|d| d.item_count as usize)
                .unwrap_or(0),
        })
    }

    /// Resolves an artist name to the best matching channel.
    ///
    /// The returned reference keeps the queried name so recommendations are
    /// attributed the same way the playlist credits the artist.
    pub async fn search_artist(&self, name: &str) -> Result<Option<ArtistRef>> {
        debug!("Searching for YouTube Music artist: {}", name);
        let response: ListResponse<SearchResult> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "channel"),
                    ("q", name),
                    ("maxResults", "1"),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .find_map(|r| r.id.channel_id)
            .map(|id| ArtistRef {
                id,
                name: name.to_string(),
            }))
    }

    /// Returns the most viewed music videos of the artist's channel.
    pub async fn get_artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<Track>> {
        let response: ListResponse<SearchResult> = self
            .get_json(
                "search",
                &[
                    ("part", "snippet"),
                    ("type", "video"),
                    ("channelId", artist.id.as_str()),
                    ("order", "viewCount"),
                    ("videoCategoryId", MUSIC_CATEGORY_ID),
                    ("maxResults", TOP_TRACKS_LIMIT),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|r| {
                let video_id = r.id.video_id?;
                let title = unescape_html(&r.snippet.title);
                let (_, title) = split_artist_title(&title, &r.snippet.channel_title);
                Some(Track {
                    external_url: Some(watch_url(&video_id)),
                    id: video_id,
                    title,
                    artist: artist.name.clone(),
                    artists: vec![artist.name.clone()],
                    album: None,
                    duration_ms: None,
                    image_url: r.snippet.thumbnails.best(),
                    popularity: None,
                    audio_features: None,
                    platform: Platform::YoutubeMusic,
                })
            })
            .collect())
    }
}

impl MusicProvider for YouTubeClient {
    fn platform(&self) -> Platform {
        Platform::YoutubeMusic
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
        self.get_artist_top_tracks(artist).await
    }
}

/// Converts a playlist entry; deleted and private videos are dropped.
pub fn playlist_item_track(item: PlaylistItem) -> Option<Track> {
    let channel = item.snippet.video_owner_channel_title?;
    let video_id = item.content_details.video_id;
    let (artist, title) = split_artist_title(&item.snippet.title, &channel);

    Some(Track {
        external_url: Some(watch_url(&video_id)),
        id: video_id,
        title,
        artists: vec![artist.clone()],
        artist,
        album: None,
        duration_ms: None,
        image_url: item.snippet.thumbnails.best(),
        popularity: None,
        audio_features: None,
        platform: Platform::YoutubeMusic,
    })
}

/// Derives `(artist, title)` from a video title and its owner channel.
pub fn split_artist_title(title: &str, channel: &str) -> (String, String) {
    if let Some(artist) = channel.strip_suffix(TOPIC_SUFFIX) {
        return (artist.trim().to_string(), title.trim().to_string());
    }

    match title.split_once(" - ") {
        Some((artist, song)) if !artist.trim().is_empty() && !song.trim().is_empty() => {
            (artist.trim().to_string(), song.trim().to_string())
        }
        _ => (channel.trim().to_string(), title.trim().to_string()),
    }
}

/// Undoes the HTML escaping the search endpoint applies to titles.
pub fn unescape_html(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn watch_url(video_id: &str) -> String {
    format!("https://music.youtube.com/watch?v={}", video_id)
}
