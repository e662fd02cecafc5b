use axum::{
    Extension, Router,
    routing::{get, post},
};
use std::{io, net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{api, info, service::Services, types::PkceToken};

/// State shared by every request.
pub struct AppState {
    pub services: Services,
    /// Verifier of the login in progress and, once exchanged, its token.
    pub pkce: Mutex<Option<PkceToken>>,
}

impl AppState {
    pub fn new(services: Services) -> Self {
        AppState {
            services,
            pkce: Mutex::new(None),
        }
    }
}

pub type SharedState = Arc<AppState>;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/health", get(api::health))
        .route("/login-spotify", get(api::login_spotify))
        .route("/callback", get(api::callback))
        .route("/validate-playlist", post(api::validate_playlist))
        .route("/analyze-playlist", post(api::analyze_playlist))
        .route("/get-recommendations", post(api::get_recommendations))
        .fallback(api::not_found)
        .layer(Extension(state))
}

pub async fn start_api_server(state: SharedState, addr: &str) -> io::Result<()> {
    let addr = SocketAddr::from_str(addr).map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid server address {}: {}", addr, e),
        )
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving on http://{}", addr);
    axum::serve(listener, router(state)).await
}
