use tabled::Table;

use crate::{
    analysis::Analysis,
    error, info,
    service::Services,
    types::{ArtistTableRow, PlaylistSummary},
    utils,
};

use super::spinner;

/// Prints the analysis of a playlist.
pub async fn analyze(url: &str) {
    let services = Services::from_env();
    services.restore_session().await;

    let pb = spinner("Fetching playlist...");
    let result = services.analyze(url).await;
    pb.finish_and_clear();

    match result {
        Ok(report) => print_analysis(&report.playlist, &report.analysis),
        Err(e) => error!("Cannot analyze playlist. Err: {}", e),
    }
}

/// Prints a playlist summary, its statistics and the top artists table.
pub fn print_analysis(playlist: &PlaylistSummary, analysis: &Analysis) {
    info!(
        "{} by {} ({} tracks on {})",
        playlist.name, playlist.owner, playlist.track_count, playlist.platform
    );
    info!(
        "{} unique artists, diversity {:.0}%",
        analysis.unique_artists,
        analysis.artist_diversity * 100.0
    );

    if let Some(avg) = analysis.general.avg_duration_ms {
        info!("Average track length: {}", utils::format_duration(avg.round() as u64));
    }

    if let Some(popularity) = &analysis.popularity {
        info!(
            "Average popularity: {:.1} ({})",
            popularity.average, popularity.mainstream_level
        );
    }

    if let Some(features) = &analysis.audio_features {
        info!(
            "Energy: {} ({:.2}), mood: {} ({:.2}), danceability {:.2}, tempo {:.0} BPM",
            features.energy_level,
            features.averages.energy,
            features.mood,
            features.averages.valence,
            features.averages.danceability,
            features.averages.tempo
        );
    }

    if !analysis.top_artists.is_empty() {
        let rows: Vec<ArtistTableRow> = analysis
            .top_artists
            .iter()
            .enumerate()
            .map(|(i, a)| ArtistTableRow {
                rank: i + 1,
                artist: a.name.clone(),
                tracks: a.count,
            })
            .collect();
        println!("{}", Table::new(rows));
    }

    if !analysis.general.top_albums.is_empty() {
        let albums: Vec<String> = analysis
            .general
            .top_albums
            .iter()
            .map(|a| format!("{} ({})", a.name, a.count))
            .collect();
        info!("Top albums: {}", albums.join(", "));
    }
}
