//! Recommendations drawn from the top tracks of a playlist's most frequent
//! artists.
//!
//! A run walks the ranked artist list, resolves each artist on the provider,
//! pulls that artist's top tracks and offers them to a [`CandidatePool`]. The
//! pool rejects anything already in the source playlist and anything it has
//! seen before, so the final list is the first `K` pool entries in discovery
//! order.
//!
//! How many artists are queried and how many tracks each may contribute is a
//! per-platform [`RecommendationPlan`]. Spotify's top-tracks endpoint returns
//! ten tracks per artist, so the plan spreads `K` over at most five artists.
//! YouTube search results are noisier, so it uses more artists and keeps a
//! handful in reserve for when the pool comes up short.

use std::collections::HashSet;

use crate::{
    debug,
    error::Result,
    info,
    provider::MusicProvider,
    types::{ArtistCount, Platform, PlaylistInfo, Recommendation, RecommendationSource, Track},
    utils, warning,
};

const SPOTIFY_MAX_ARTISTS: usize = 5;
const YOUTUBE_MAX_PRIMARY_ARTISTS: usize = 10;
const YOUTUBE_MIN_PRIMARY_ARTISTS: usize = 3;
const YOUTUBE_RESERVE_ARTISTS: usize = 5;
const MAX_TRACKS_PER_ARTIST: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendationPlan {
    /// Artists queried unconditionally (stopping early once the pool is full).
    pub primary_artists: usize,
    /// Further artists queried only while the pool is short of the target.
    pub reserve_artists: usize,
    pub tracks_per_artist: usize,
}

impl RecommendationPlan {
    pub fn for_platform(platform: Platform, requested: usize, available_artists: usize) -> Self {
        let (primary_artists, reserve_artists) = match platform {
            Platform::Spotify => (available_artists.min(SPOTIFY_MAX_ARTISTS), 0),
            Platform::YoutubeMusic => {
                let primary = available_artists
                    .min(YOUTUBE_MAX_PRIMARY_ARTISTS)
                    .min(YOUTUBE_MIN_PRIMARY_ARTISTS.max(requested / 5));
                let reserve = available_artists
                    .saturating_sub(primary)
                    .min(YOUTUBE_RESERVE_ARTISTS);
                (primary, reserve)
            }
        };

        let tracks_per_artist = if primary_artists == 0 {
            0
        } else {
            requested
                .div_ceil(primary_artists)
                .min(MAX_TRACKS_PER_ARTIST)
        };

        RecommendationPlan {
            primary_artists,
            reserve_artists,
            tracks_per_artist,
        }
    }

    pub fn max_artists(&self) -> usize {
        self.primary_artists + self.reserve_artists
    }
}

/// Deduplicated, not-yet-truncated recommendations.
pub struct CandidatePool {
    excluded_ids: HashSet<String>,
    excluded_keys: HashSet<(String, String)>,
    seen_ids: HashSet<String>,
    seen_keys: HashSet<(String, String)>,
    candidates: Vec<Recommendation>,
}

impl CandidatePool {
    /// Creates a pool that never accepts a track of `playlist`.
    pub fn excluding(playlist: &PlaylistInfo) -> Self {
        CandidatePool {
            excluded_ids: playlist
                .tracks
                .iter()
                .filter(|t| !t.id.is_empty())
                .map(|t| t.id.clone())
                .collect(),
            excluded_keys: playlist
                .tracks
                .iter()
                .map(|t| utils::track_key(&t.title, &t.artist))
                .collect(),
            seen_ids: HashSet::new(),
            seen_keys: HashSet::new(),
            candidates: Vec::new(),
        }
    }

    /// Adds the track unless it is in the playlist or already pooled.
    ///
    /// Returns whether the track was accepted.
    pub fn offer(&mut self, track: Track, source: RecommendationSource) -> bool {
        if track.id.is_empty() {
            return false;
        }

        let key = utils::track_key(&track.title, &track.artist);
        if self.excluded_ids.contains(&track.id)
            || self.excluded_keys.contains(&key)
            || self.seen_ids.contains(&track.id)
            || self.seen_keys.contains(&key)
        {
            return false;
        }

        self.seen_ids.insert(track.id.clone());
        self.seen_keys.insert(key);
        self.candidates.push(Recommendation { track, source });
        true
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Returns the first `count` candidates in discovery order.
    pub fn into_recommendations(mut self, count: usize) -> Vec<Recommendation> {
        self.candidates.truncate(count);
        self.candidates
    }
}

/// Recommends up to `count` tracks from the top tracks of `ranked_artists`.
///
/// Artists that cannot be resolved, or whose top tracks fail to load, are
/// skipped with a warning but still use up one of the plan's artist slots.
/// Authentication and rate-limit failures end the run and are returned.
pub async fn recommend<P: MusicProvider>(
    provider: &P,
    playlist: &PlaylistInfo,
    ranked_artists: &[ArtistCount],
    count: usize,
    source: RecommendationSource,
) -> Result<Vec<Recommendation>> {
    let platform = provider.platform();
    if ranked_artists.is_empty() || count == 0 {
        warning!("No top artists found in analysis for {} recommendations", platform);
        return Ok(Vec::new());
    }

    let plan = RecommendationPlan::for_platform(platform, count, ranked_artists.len());
    info!(
        "Using up to {} {} artists with {} tracks each to get {} recommendations",
        plan.max_artists(),
        platform,
        plan.tracks_per_artist,
        count
    );

    let mut pool = CandidatePool::excluding(playlist);
    let mut attempted = 0;

    // failed and empty lookups count against the plan too
    for artist in ranked_artists {
        if pool.len() >= count || attempted >= plan.max_artists() {
            break;
        }
        if attempted >= plan.primary_artists {
            debug!(
                "Got only {} recommendations, trying reserve artist {}",
                pool.len(),
                artist.name
            );
        }

        attempted += 1;
        let found = match provider.find_artist(&artist.name).await {
            Ok(Some(found)) => found,
            Ok(None) => {
                warning!("No {} artist found for name: {}", platform, artist.name);
                continue;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("Error searching for artist {}: {}", artist.name, e);
                continue;
            }
        };
        debug!("Found artist ID for {}: {}", artist.name, found.id);

        let tracks = match provider.artist_top_tracks(&found).await {
            Ok(tracks) => tracks,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                warning!("Error getting top tracks for artist {}: {}", artist.name, e);
                continue;
            }
        };

        let mut added = 0;
        for track in tracks {
            if added >= plan.tracks_per_artist {
                break;
            }
            if pool.offer(track, source) {
                added += 1;
            }
        }
        debug!("Added {} top tracks from artist {}", added, artist.name);
    }

    if pool.len() < count {
        info!(
            "Only {} unique candidates available for {} requested recommendations",
            pool.len(),
            count
        );
    }

    Ok(pool.into_recommendations(count))
}
