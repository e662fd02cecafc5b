//! The request pipeline: fetch → analyze → recommend.
//!
//! [`Services`] owns one client per provider and is shared by the web server
//! and the CLI. Every operation starts from a playlist URL and dispatches on
//! the platform it names.

use serde::{Deserialize, Serialize};

use crate::{
    analysis::{self, Analysis},
    config,
    error::{Error, Result},
    info,
    management::TokenManager,
    playlist::parse_playlist_url,
    provider::MusicProvider,
    recommend,
    spotify::SpotifyClient,
    success,
    types::{
        Platform, PlaylistInfo, PlaylistSummary, PlaylistValidation, Recommendation,
        RecommendationSource,
    },
    warning,
    youtube::YouTubeClient,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub playlist: PlaylistSummary,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub playlist: PlaylistSummary,
    pub analysis: Analysis,
    pub recommendations: Vec<Recommendation>,
}

pub struct Services {
    pub spotify: SpotifyClient,
    pub youtube: YouTubeClient,
}

impl Services {
    pub fn from_env() -> Self {
        Services {
            spotify: SpotifyClient::from_env(),
            youtube: YouTubeClient::from_env(),
        }
    }

    /// Picks up a Spotify user token persisted by an earlier login.
    pub async fn restore_session(&self) {
        if let Ok(manager) = TokenManager::load().await {
            self.spotify.set_user_token(manager).await;
            success!("Restored Spotify login from a previous session");
        }
    }

    pub async fn fetch_playlist(&self, url: &str) -> Result<PlaylistInfo> {
        let playlist_ref = parse_playlist_url(url)?;
        info!(
            "Detected {} playlist with ID: {}",
            playlist_ref.platform, playlist_ref.id
        );

        let fetched = match playlist_ref.platform {
            Platform::Spotify => self.spotify.fetch_playlist(&playlist_ref.id).await,
            Platform::YoutubeMusic => self.youtube.fetch_playlist(&playlist_ref.id).await,
        };
        fetched.map_err(Error::for_playlist)
    }

    /// Checks that the URL names a reachable playlist and reports its size.
    ///
    /// The size is the provider's item total, which still includes local
    /// files and unavailable entries. Recommendations only count playable
    /// tracks, so a playlist can pass here and still be rejected later with
    /// [`Error::TooFewTracks`].
    pub async fn validate_playlist(&self, url: &str, min_tracks: usize) -> Result<PlaylistValidation> {
        let playlist_ref = parse_playlist_url(url)?;

        let overview = match playlist_ref.platform {
            Platform::Spotify => self.spotify.playlist_overview(&playlist_ref.id).await,
            Platform::YoutubeMusic => self.youtube.playlist_overview(&playlist_ref.id).await,
        }
        .map_err(Error::for_playlist)?;

        Ok(PlaylistValidation {
            valid: true,
            platform: playlist_ref.platform,
            name: overview.name,
            track_count: overview.track_count,
            has_enough_tracks: overview.track_count >= min_tracks,
        })
    }

    pub async fn analyze(&self, url: &str) -> Result<AnalysisReport> {
        let playlist = self.fetch_playlist(url).await?;
        let analysis = analysis::analyze(&playlist);

        Ok(AnalysisReport {
            playlist: PlaylistSummary::from(&playlist),
            analysis,
        })
    }

    /// Fetches, analyzes and recommends for a playlist URL.
    ///
    /// `requested` is clamped to `[1, MAX_RECOMMENDATIONS]`. See
    /// [`recommend_for_playlist`] for the rest.
    pub async fn recommend(&self, url: &str, requested: Option<i64>) -> Result<RecommendationReport> {
        let count = config::clamp_recommendations(requested);
        let playlist = self.fetch_playlist(url).await?;

        match playlist.platform {
            Platform::Spotify => {
                let fallback = self.youtube.is_configured().then_some(&self.youtube);
                recommend_for_playlist(&self.spotify, fallback, playlist, count).await
            }
            Platform::YoutubeMusic => {
                recommend_for_playlist::<_, YouTubeClient>(&self.youtube, None, playlist, count)
                    .await
            }
        }
    }
}

/// Analyzes a fetched playlist and recommends `count` tracks for it.
///
/// Playlists shorter than [`config::MINIMUM_TRACKS`] are rejected before any
/// artist lookup. When `provider` yields nothing and a `fallback` provider is
/// given, the same artist ranking is tried there and its results are tagged
/// [`RecommendationSource::CrossPlatformFallback`]. A failing fallback is
/// logged and leaves the list empty.
pub async fn recommend_for_playlist<P: MusicProvider, F: MusicProvider>(
    provider: &P,
    fallback: Option<&F>,
    playlist: PlaylistInfo,
    count: usize,
) -> Result<RecommendationReport> {
    if playlist.track_count() < config::MINIMUM_TRACKS {
        return Err(Error::TooFewTracks {
            found: playlist.track_count(),
            required: config::MINIMUM_TRACKS,
        });
    }

    let analysis = analysis::analyze(&playlist);
    let ranked = &analysis.artist_distribution;
    info!(
        "Generating {} recommendations for {} playlist",
        count, playlist.platform
    );

    let mut recommendations = recommend::recommend(
        provider,
        &playlist,
        ranked,
        count,
        RecommendationSource::ArtistTopTracks,
    )
    .await?;

    if let Some(fallback) = fallback.filter(|_| recommendations.is_empty()) {
        info!(
            "No {} recommendations found, trying {} as fallback",
            provider.platform(),
            fallback.platform()
        );
        recommendations = match recommend::recommend(
            fallback,
            &playlist,
            ranked,
            count,
            RecommendationSource::CrossPlatformFallback,
        )
        .await
        {
            Ok(found) => found,
            Err(e) => {
                warning!("{} fallback failed: {}", fallback.platform(), e);
                Vec::new()
            }
        };
    }

    success!("Generated {} recommendations", recommendations.len());
    Ok(RecommendationReport {
        playlist: PlaylistSummary::from(&playlist),
        analysis,
        recommendations,
    })
}
