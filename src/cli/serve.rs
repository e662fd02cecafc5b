use std::sync::Arc;

use crate::{
    config, error, info,
    server::{AppState, start_api_server},
    service::Services,
    warning,
};

/// Runs the web front end until the process is stopped.
pub async fn serve(address: Option<String>) {
    let services = Services::from_env();

    if !services.spotify.is_configured().await {
        warning!("Spotify credentials are missing, Spotify playlists will be rejected");
    }
    if !services.youtube.is_configured() {
        warning!("YOUTUBE_API_KEY is not set, YouTube Music playlists will be rejected");
    }
    services.restore_session().await;

    let addr = address.unwrap_or_else(config::server_addr);
    info!("Open http://{} in your browser", addr);

    if let Err(e) = start_api_server(Arc::new(AppState::new(services)), &addr).await {
        error!("Server stopped. Err: {}", e);
    }
}
