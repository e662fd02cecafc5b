use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Spotify,
    YoutubeMusic,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Spotify => write!(f, "Spotify"),
            Platform::YoutubeMusic => write!(f, "YouTube Music"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRef {
    pub platform: Platform,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub liveness: f64,
    pub tempo: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    #[serde(rename = "name")]
    pub title: String,
    pub artist: String,
    pub artists: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_features: Option<AudioFeatures>,
    pub platform: Platform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    pub owner: String,
    pub image_url: Option<String>,
    pub platform: Platform,
    pub tracks: Vec<Track>,
}

impl PlaylistInfo {
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }
}

/// The `playlist` object of the analysis and recommendation responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistSummary {
    pub name: String,
    pub owner: String,
    pub track_count: usize,
    pub platform: Platform,
    pub image_url: String,
}

impl From<&PlaylistInfo> for PlaylistSummary {
    fn from(p: &PlaylistInfo) -> Self {
        PlaylistSummary {
            name: p.name.clone(),
            owner: p.owner.clone(),
            track_count: p.track_count(),
            platform: p.platform,
            image_url: p.image_url.clone().unwrap_or_default(),
        }
    }
}

/// Name and size of a playlist, fetched without its tracks.
#[derive(Debug, Clone)]
pub struct PlaylistOverview {
    pub name: String,
    pub track_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistValidation {
    pub valid: bool,
    pub platform: Platform,
    pub name: String,
    pub track_count: usize,
    pub has_enough_tracks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistCount {
    pub name: String,
    pub count: usize,
}

/// An artist resolved on a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    ArtistTopTracks,
    CrossPlatformFallback,
}

impl fmt::Display for RecommendationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendationSource::ArtistTopTracks => write!(f, "artist_top_tracks"),
            RecommendationSource::CrossPlatformFallback => write!(f, "cross_platform_fallback"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub track: Track,
    pub source: RecommendationSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default)]
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

impl Token {
    /// True once fewer than `margin_secs` seconds of validity remain.
    pub fn expires_within(&self, margin_secs: u64) -> bool {
        let now = Utc::now().timestamp() as u64;
        now + margin_secs >= self.obtained_at + self.expires_in
    }
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Tabled)]
pub struct ArtistTableRow {
    pub rank: usize,
    pub artist: String,
    pub tracks: usize,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub source: String,
}
