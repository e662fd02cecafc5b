use serde::Deserialize;

use crate::types::{AudioFeatures, Platform, Token, Track};

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyOwner {
    pub id: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub owner: SpotifyOwner,
    #[serde(default)]
    pub images: Option<Vec<SpotifyImage>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimpleArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<SpotifyImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyTrack {
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    pub album: Option<SpotifyAlbum>,
    pub duration_ms: Option<u64>,
    pub popularity: Option<u32>,
    pub external_urls: Option<ExternalUrls>,
    #[serde(default)]
    pub is_local: bool,
}

impl SpotifyTrack {
    /// Converts to a [`Track`]; local files and id-less items are dropped.
    pub fn into_track(self) -> Option<Track> {
        if self.is_local {
            return None;
        }
        let id = self.id.filter(|id| !id.is_empty())?;

        let artists: Vec<String> = self.artists.into_iter().map(|a| a.name).collect();
        let artist = artists
            .first()
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        let image_url = self
            .album
            .as_ref()
            .and_then(|a| a.images.first())
            .map(|i| i.url.clone());

        Some(Track {
            id,
            title: self.name,
            artist,
            artists,
            album: self.album.map(|a| a.name),
            duration_ms: self.duration_ms,
            external_url: self.external_urls.and_then(|u| u.spotify),
            image_url,
            popularity: self.popularity,
            audio_features: None,
            platform: Platform::Spotify,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackTotal {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOverviewResponse {
    pub name: String,
    pub tracks: TrackTotal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArtistSearchResponse {
    pub artists: Page<SpotifyArtist>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TopTracksResponse {
    pub tracks: Vec<SpotifyTrack>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyAudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub energy: f64,
    pub valence: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub speechiness: f64,
    pub liveness: f64,
    pub tempo: f64,
}

impl From<SpotifyAudioFeatures> for AudioFeatures {
    fn from(f: SpotifyAudioFeatures) -> Self {
        AudioFeatures {
            danceability: f.danceability,
            energy: f.energy,
            valence: f.valence,
            acousticness: f.acousticness,
            instrumentalness: f.instrumentalness,
            speechiness: f.speechiness,
            liveness: f.liveness,
            tempo: f.tempo,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AudioFeaturesResponse {
    pub audio_features: Vec<Option<SpotifyAudioFeatures>>,
}

/// Body of the accounts service token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

impl TokenResponse {
    /// Builds a [`Token`], keeping `previous_refresh` when none was rotated in.
    pub fn into_token(self, previous_refresh: Option<&str>, obtained_at: u64) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope.unwrap_or_default(),
            expires_in: self.expires_in.unwrap_or(3600),
            obtained_at,
        }
    }
}
