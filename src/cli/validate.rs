use crate::{config, error, service::Services, success, warning};

use super::spinner;

pub async fn validate(url: &str) {
    let services = Services::from_env();
    services.restore_session().await;

    let pb = spinner("Checking playlist...");
    let result = services.validate_playlist(url, config::MINIMUM_TRACKS).await;
    pb.finish_and_clear();

    match result {
        Ok(v) if v.has_enough_tracks => success!(
            "{} playlist \"{}\" has {} tracks",
            v.platform,
            v.name,
            v.track_count
        ),
        Ok(v) => warning!(
            "{} playlist \"{}\" has only {} tracks, at least {} are needed for recommendations",
            v.platform,
            v.name,
            v.track_count,
            config::MINIMUM_TRACKS
        ),
        Err(e) => error!("Invalid playlist. Err: {}", e),
    }
}
