use tabled::Table;

use crate::{error, service::Services, success, types::RecommendationTableRow, warning};

use super::{analyze::print_analysis, spinner};

/// Prints recommendations for a playlist.
///
/// `count` is clamped the same way the web endpoint clamps it.
pub async fn recommend(url: &str, count: Option<i64>) {
    let services = Services::from_env();
    services.restore_session().await;

    let pb = spinner("Analyzing playlist and looking for recommendations...");
    let result = services.recommend(url, count).await;
    pb.finish_and_clear();

    let report = match result {
        Ok(report) => report,
        Err(e) => error!("Cannot get recommendations. Err: {}", e),
    };

    print_analysis(&report.playlist, &report.analysis);

    if report.recommendations.is_empty() {
        warning!("No recommendations found for this playlist");
        return;
    }

    let rows: Vec<RecommendationTableRow> = report
        .recommendations
        .iter()
        .map(|r| RecommendationTableRow {
            title: r.track.title.clone(),
            artist: r.track.artist.clone(),
            album: r.track.album.clone().unwrap_or_default(),
            source: r.source.to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
    success!("{} recommendations", report.recommendations.len());
}
