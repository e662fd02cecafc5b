//! The contract both provider clients implement.
//!
//! Dispatch between Spotify and YouTube Music is a plain match on
//! [`Platform`](crate::types::Platform); the trait exists so the fetch,
//! analyze and recommend steps are written once and so the recommender can
//! be driven by a fake provider in tests.

use std::future::Future;

use crate::{
    error::Result,
    types::{ArtistRef, PlaylistInfo, PlaylistOverview, Platform, Track},
};

pub trait MusicProvider: Sync {
    fn platform(&self) -> Platform;

    /// Fetches playlist metadata and every track, in playlist order.
    fn fetch_playlist(&self, playlist_id: &str) -> impl Future<Output = Result<PlaylistInfo>> + Send;

    /// Fetches only the playlist name and its track count.
    fn playlist_overview(
        &self,
        playlist_id: &str,
    ) -> impl Future<Output = Result<PlaylistOverview>> + Send;

    /// Resolves an artist name to the provider's best match, if any.
    fn find_artist(&self, name: &str) -> impl Future<Output = Result<Option<ArtistRef>>> + Send;

    /// Returns the artist's most popular tracks, best first.
    fn artist_top_tracks(
        &self,
        artist: &ArtistRef,
    ) -> impl Future<Output = Result<Vec<Track>>> + Send;
}
