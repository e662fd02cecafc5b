use std::collections::HashMap;

use crate::{
    debug,
    error::{Error, Result},
    info,
    spotify::{
        SpotifyClient,
        model::{AudioFeaturesResponse, Page, PlaylistItem, PlaylistOverviewResponse, SpotifyPlaylist},
    },
    types::{AudioFeatures, Platform, PlaylistInfo, PlaylistOverview, Track},
};

const TRACKS_PAGE_SIZE: &str = "100";
const AUDIO_FEATURES_BATCH: usize = 100;

impl SpotifyClient {
    /// Fetches a playlist's metadata and all of its tracks.
    ///
    /// Tracks are collected page by page following the `next` link until the
    /// playlist is exhausted. Local files and removed tracks are skipped.
    /// Audio features are attached afterwards on a best-effort basis, see
    /// [`attach_audio_features`].
    pub async fn get_playlist(&self, playlist_id: &str) -> Result<PlaylistInfo> {
        debug!("Fetching Spotify playlist: {}", playlist_id);
        let meta: SpotifyPlaylist = self
            .get_json(
                &format!("playlists/{}", playlist_id),
                &[("fields", "id,name,description,owner(id,display_name),images")],
            )
            .await?;
        info!("Retrieved Spotify playlist: {}", meta.name);

        let mut tracks: Vec<Track> = Vec::new();
        let mut page: Page<PlaylistItem> = self
            .get_json(
                &format!("playlists/{}/tracks", playlist_id),
                &[("limit", TRACKS_PAGE_SIZE)],
            )
            .await?;

        loop {
            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track.and_then(|t| t.into_track())),
            );

            let Some(next) = page.next else {
                break;
            };
            debug!("Fetching next page of Spotify tracks");
            page = self.get_json(&next, &[]).await?;
        }

        let features = self.get_audio_features(&tracks).await;
        attach_audio_features(&mut tracks, features)?;

        Ok(PlaylistInfo {
            id: meta.id,
            name: meta.name,
            description: meta.description.unwrap_or_default(),
            owner: meta
                .owner
                .display_name
                .unwrap_or(meta.owner.id),
            image_url: meta
                .images
                .and_then(|images| images.into_iter().next())
                .map(|i| i.url),
            platform: Platform::Spotify,
            tracks,
        })
    }

    /// Fetches only the playlist name and total track count.
    pub async fn get_playlist_overview(&self, playlist_id: &str) -> Result<PlaylistOverview> {
        let overview: PlaylistOverviewResponse = self
            .get_json(
                &format!("playlists/{}", playlist_id),
                &[("fields", "name,tracks.total")],
            )
            .await?;

        Ok(PlaylistOverview {
            name: overview.name,
            track_count: overview.tracks.total as usize,
        })
    }

    /// Looks up audio features for `tracks` in batches, keyed by track id.
    pub async fn get_audio_features(
        &self,
        tracks: &[Track],
    ) -> Result<HashMap<String, AudioFeatures>> {
        let mut features = HashMap::new();

        for chunk in tracks.chunks(AUDIO_FEATURES_BATCH) {
            let ids = chunk
                .iter()
                .map(|t| t.id.as_str())
                .collect::<Vec<_>>()
                .join(",");
            let response: AudioFeaturesResponse =
                self.get_json("audio-features", &[("ids", ids.as_str())]).await?;

            for f in response.audio_features.into_iter().flatten() {
                features.insert(f.id.clone(), AudioFeatures::from(f));
            }
        }

        Ok(features)
    }
}

/// Copies fetched audio features onto their tracks.
///
/// The audio-features endpoint answers 403 for applications registered after
/// its deprecation, so a failed lookup leaves the tracks without features.
/// A rate limit is the exception and is returned, since every later request
/// in the run would hit it too.
pub fn attach_audio_features(
    tracks: &mut [Track],
    fetched: Result<HashMap<String, AudioFeatures>>,
) -> Result<()> {
    match fetched {
        Ok(features) if !features.is_empty() => {
            for track in tracks.iter_mut() {
                track.audio_features = features.get(&track.id).cloned();
            }
        }
        Ok(_) => debug!("No audio features returned"),
        Err(e @ Error::RateLimited { .. }) => return Err(e),
        Err(e) => info!("Audio features unavailable, skipping: {}", e),
    }
    Ok(())
}
