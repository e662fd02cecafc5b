#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use plrec::{
    Error, Result,
    provider::MusicProvider,
    types::{ArtistRef, AudioFeatures, Platform, PlaylistInfo, PlaylistOverview, Track},
};

pub fn track(id: &str, title: &str, artist: &str) -> Track {
    Track {
        id: id.to_string(),
        title: title.to_string(),
        artist: artist.to_string(),
        artists: vec![artist.to_string()],
        album: None,
        duration_ms: None,
        external_url: None,
        image_url: None,
        popularity: None,
        audio_features: None,
        platform: Platform::Spotify,
    }
}

pub fn features(energy: f64, valence: f64) -> AudioFeatures {
    AudioFeatures {
        danceability: 0.5,
        energy,
        valence,
        acousticness: 0.1,
        instrumentalness: 0.0,
        speechiness: 0.05,
        liveness: 0.1,
        tempo: 120.0,
    }
}

pub fn playlist(platform: Platform, tracks: Vec<Track>) -> PlaylistInfo {
    PlaylistInfo {
        id: "pl1".to_string(),
        name: "Test Playlist".to_string(),
        description: String::new(),
        owner: "tester".to_string(),
        image_url: None,
        platform,
        tracks,
    }
}

/// Builds a playlist from `(artist, number of tracks)` pairs, in order.
pub fn playlist_of(platform: Platform, artists: &[(&str, usize)]) -> PlaylistInfo {
    let mut tracks = Vec::new();
    for (artist, n) in artists {
        for i in 0..*n {
            tracks.push(track(
                &format!("{}-{}", artist, i),
                &format!("{} Song {}", artist, i),
                artist,
            ));
        }
    }
    playlist(platform, tracks)
}

/// Generates `n` top tracks for `artist` with ids `{artist}-top-{i}`.
pub fn top_tracks(artist: &str, n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| {
            track(
                &format!("{}-top-{}", artist, i),
                &format!("{} Hit {}", artist, i),
                artist,
            )
        })
        .collect()
}

#[derive(Clone, Copy)]
pub enum Failure {
    Auth,
    RateLimited,
    Unavailable,
}

impl Failure {
    fn error(self, platform: Platform) -> Error {
        match self {
            Failure::Auth => Error::Auth(platform),
            Failure::RateLimited => Error::RateLimited {
                platform,
                retry_after: None,
            },
            Failure::Unavailable => Error::Unavailable(platform, "500 boom".to_string()),
        }
    }
}

/// In-memory provider. Unknown artists are "not found".
pub struct FakeProvider {
    pub platform: Platform,
    pub playlists: HashMap<String, PlaylistInfo>,
    pub top_tracks: HashMap<String, Vec<Track>>,
    pub search_failures: HashMap<String, Failure>,
    pub top_track_failures: HashMap<String, Failure>,
    pub searched: Mutex<Vec<String>>,
}

impl FakeProvider {
    pub fn new(platform: Platform) -> Self {
        FakeProvider {
            platform,
            playlists: HashMap::new(),
            top_tracks: HashMap::new(),
            search_failures: HashMap::new(),
            top_track_failures: HashMap::new(),
            searched: Mutex::new(Vec::new()),
        }
    }

    pub fn with_artist(mut self, name: &str, tracks: Vec<Track>) -> Self {
        self.top_tracks.insert(name.to_string(), tracks);
        self
    }

    pub fn failing_search(mut self, name: &str, failure: Failure) -> Self {
        self.search_failures.insert(name.to_string(), failure);
        self
    }

    pub fn failing_top_tracks(mut self, name: &str, failure: Failure) -> Self {
        self.top_tracks.entry(name.to_string()).or_default();
        self.top_track_failures.insert(name.to_string(), failure);
        self
    }

    pub fn searched(&self) -> Vec<String> {
        self.searched.lock().unwrap().clone()
    }
}

impl MusicProvider for FakeProvider {
    fn platform(&self) -> Platform {
        self.platform
    }

    async fn fetch_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        self.playlists
            .get(playlist_id)
            .cloned()
            .ok_or(Error::PlaylistNotFound(self.platform))
    }

    async fn playlist_overview(&self, playlist_id: &str) -> Result<PlaylistOverview> {
        let playlist = self.fetch_playlist(playlist_id).await?;
        Ok(PlaylistOverview {
            name: playlist.name.clone(),
            track_count: playlist.track_count(),
        })
    }

    async fn find_artist(&self, name: &str) -> Result<Option<ArtistRef>> {
        self.searched.lock().unwrap().push(name.to_string());

        if let Some(failure) = self.search_failures.get(name) {
            return Err(failure.error(self.platform));
        }

        Ok(self.top_tracks.contains_key(name).then(|| ArtistRef {
            id: format!("id-{}", name),
            name: name.to_string(),
        }))
    }

    async fn artist_top_tracks(&self, artist: &ArtistRef) -> Result<Vec<Track>> {
        if let Some(failure) = self.top_track_failures.get(&artist.name) {
            return Err(failure.error(self.platform));
        }

        Ok(self
            .top_tracks
            .get(&artist.name)
            .cloned()
            .unwrap_or_default())
    }
}
