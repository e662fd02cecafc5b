use axum::{Extension, Json, response::IntoResponse, response::Response};
use serde_json::json;

use crate::{
    api::{ApiError, PlaylistRequest, Success, status_for},
    config, info,
    server::SharedState,
    service::{AnalysisReport, RecommendationReport},
    success, warning,
};

pub async fn validate_playlist(
    Extension(state): Extension<SharedState>,
    Json(request): Json<PlaylistRequest>,
) -> Response {
    let url = match request.url() {
        Ok(url) => url,
        Err(e) => {
            warning!("No playlist URL provided for validation");
            return (e.status, Json(json!({ "valid": false, "error": e.message }))).into_response();
        }
    };

    info!("Validating playlist URL: {}", url);
    match state
        .services
        .validate_playlist(url, config::MINIMUM_TRACKS)
        .await
    {
        Ok(validation) => {
            success!(
                "Playlist validated successfully: {} ({} tracks)",
                validation.name,
                validation.track_count
            );
            Json(validation).into_response()
        }
        Err(e) => {
            warning!("Playlist validation failed: {}", e);
            (
                status_for(&e),
                Json(json!({ "valid": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

pub async fn analyze_playlist(
    Extension(state): Extension<SharedState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<Success<AnalysisReport>>, ApiError> {
    let url = request.url()?;
    info!("Analyzing playlist: {}", url);

    let report = state.services.analyze(url).await.map_err(|e| {
        warning!("Error analyzing playlist: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(Success::new(report)))
}

pub async fn get_recommendations(
    Extension(state): Extension<SharedState>,
    Json(request): Json<PlaylistRequest>,
) -> Result<Json<Success<RecommendationReport>>, ApiError> {
    let url = request.url()?;
    let requested = request.requested_count()?;
    info!("Getting recommendations for playlist: {}", url);

    let report = state
        .services
        .recommend(url, requested)
        .await
        .map_err(|e| {
            warning!("Error getting recommendations: {}", e);
            ApiError::from(e)
        })?;

    Ok(Json(Success::new(report)))
}
