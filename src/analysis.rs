//! Descriptive statistics over a playlist's tracks.
//!
//! Everything here is counting and averaging. Optional sections (popularity,
//! audio features) are only present when the provider supplied the data for
//! at least one track; nothing in this module fails.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    config, debug, info,
    types::{ArtistCount, AudioFeatures, Platform, PlaylistInfo, Track},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub track_count: usize,
    pub platform: Platform,
    pub top_artists: Vec<ArtistCount>,
    pub unique_artists: usize,
    pub artist_diversity: f64,
    /// Every artist, ranked the same way as `top_artists`.
    pub artist_distribution: Vec<ArtistCount>,
    pub general: GeneralMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popularity: Option<PopularityStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_features: Option<AudioFeatureStats>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralMetrics {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_duration_minutes: Option<f64>,
    pub top_albums: Vec<AlbumCount>,
    pub unique_albums: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopularityStats {
    pub average: f64,
    pub mainstream_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFeatureStats {
    pub tracks_with_features: usize,
    pub averages: AudioFeatures,
    pub energy_level: String,
    pub mood: String,
}

/// Analyzes a fetched playlist.
pub fn analyze(playlist: &PlaylistInfo) -> Analysis {
    let tracks = &playlist.tracks;
    info!("Analyzing playlist with {} tracks", tracks.len());

    let artist_distribution: Vec<ArtistCount> =
        rank_by_frequency(tracks.iter().map(|t| t.artist.as_str()))
            .into_iter()
            .map(|(name, count)| ArtistCount { name, count })
            .collect();
    let unique_artists = artist_distribution.len();
    let artist_diversity = if tracks.is_empty() {
        0.0
    } else {
        unique_artists as f64 / tracks.len() as f64
    };

    let analysis = Analysis {
        track_count: tracks.len(),
        platform: playlist.platform,
        top_artists: artist_distribution
            .iter()
            .take(config::TOP_ARTISTS)
            .cloned()
            .collect(),
        unique_artists,
        artist_diversity,
        artist_distribution,
        general: general_metrics(tracks),
        popularity: popularity(tracks),
        audio_features: audio_features(tracks),
    };

    debug!(
        "Analysis complete: {} unique artists, popularity {}, audio features {}",
        analysis.unique_artists,
        if analysis.popularity.is_some() { "available" } else { "missing" },
        if analysis.audio_features.is_some() { "available" } else { "missing" },
    );
    analysis
}

/// Counts occurrences and ranks them by count, descending.
///
/// Ties keep first-seen order.
pub fn rank_by_frequency<'a>(names: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for name in names {
        match index.get(name) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(name, counts.len());
                counts.push((name, 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}

fn general_metrics(tracks: &[Track]) -> GeneralMetrics {
    let durations: Vec<u64> = tracks.iter().filter_map(|t| t.duration_ms).collect();
    let avg_duration_ms = mean(durations.iter().map(|&d| d as f64));

    let albums = rank_by_frequency(tracks.iter().filter_map(|t| t.album.as_deref()));

    GeneralMetrics {
        avg_duration_ms,
        avg_duration_minutes: avg_duration_ms.map(|ms| ms / 60_000.0),
        unique_albums: albums.len(),
        top_albums: albums
            .into_iter()
            .take(config::TOP_ALBUMS)
            .map(|(name, count)| AlbumCount { name, count })
            .collect(),
    }
}

fn popularity(tracks: &[Track]) -> Option<PopularityStats> {
    let average = mean(tracks.iter().filter_map(|t| t.popularity).map(f64::from))?;

    Some(PopularityStats {
        average,
        mainstream_level: mainstream_level(average).to_string(),
    })
}

fn audio_features(tracks: &[Track]) -> Option<AudioFeatureStats> {
    let features: Vec<&AudioFeatures> = tracks
        .iter()
        .filter_map(|t| t.audio_features.as_ref())
        .collect();
    if features.is_empty() {
        return None;
    }

    let avg = |f: fn(&AudioFeatures) -> f64| mean(features.iter().map(|a| f(a))).unwrap_or(0.0);
    let averages = AudioFeatures {
        danceability: avg(|a| a.danceability),
        energy: avg(|a| a.energy),
        valence: avg(|a| a.valence),
        acousticness: avg(|a| a.acousticness),
        instrumentalness: avg(|a| a.instrumentalness),
        speechiness: avg(|a| a.speechiness),
        liveness: avg(|a| a.liveness),
        tempo: avg(|a| a.tempo),
    };

    Some(AudioFeatureStats {
        tracks_with_features: features.len(),
        energy_level: energy_level(averages.energy).to_string(),
        mood: mood(averages.valence).to_string(),
        averages,
    })
}

pub fn mainstream_level(average_popularity: f64) -> &'static str {
    match average_popularity {
        p if p >= 80.0 => "Very Mainstream",
        p if p >= 60.0 => "Mainstream",
        p if p >= 40.0 => "Mixed Popularity",
        p if p >= 20.0 => "Niche",
        _ => "Very Niche",
    }
}

pub fn energy_level(energy: f64) -> &'static str {
    match energy {
        e if e >= 0.7 => "High",
        e if e >= 0.4 => "Medium",
        _ => "Low",
    }
}

pub fn mood(valence: f64) -> &'static str {
    match valence {
        v if v >= 0.6 => "Upbeat",
        v if v >= 0.4 => "Balanced",
        _ => "Melancholic",
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 { None } else { Some(sum / n as f64) }
}
