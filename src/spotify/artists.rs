use crate::{
    debug,
    error::Result,
    spotify::{
        SpotifyClient,
        model::{ArtistSearchResponse, TopTracksResponse},
    },
    types::{ArtistRef, Track},
};

impl SpotifyClient {
    /// Searches for an artist by name and returns the best match.
    ///
    /// Uses the `artist:` field filter so that track and album titles do not
    /// pollute the result.
    pub async fn search_artist(&self, name: &str) -> Result<Option<ArtistRef>> {
        debug!("Searching for artist: {}", name);
        let query = format!("artist:{}", name);
        let response: ArtistSearchResponse = self
            .get_json(
                "search",
                &[("q", query.as_str()), ("type", "artist"), ("limit", "1")],
            )
            .await?;

        Ok(response
            .artists
            .items
            .into_iter()
            .next()
            .map(|a| ArtistRef {
                id: a.id,
                name: a.name,
            }))
    }

    /// Retrieves an artist's top tracks in the configured market.
    pub async fn get_artist_top_tracks(&self, artist_id: &str) -> Result<Vec<Track>> {
        let response: TopTracksResponse = self
            .get_json(
                &format!("artists/{}/top-tracks", artist_id),
                &[("market", self.market.as_str())],
            )
            .await?;

        Ok(response
            .tracks
            .into_iter()
            .filter_map(|t| t.into_track())
            .collect())
    }
}
