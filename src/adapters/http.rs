//! HTTP surface of the stats service.

use crate::core::envelope::pokemon_error_envelope;
use crate::core::service::PokemonService;
use crate::domain::model::PokemonSummary;
use crate::utils::error::FacadeError;
use axum::{
    extract::{rejection::PathRejection, OriginalUri, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Local;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the service router.
pub fn routes(service: PokemonService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/pokemon", get(missing_name))
        .route("/pokemon/", get(missing_name))
        .route("/pokemon/{name}", get(get_pokemon_stats))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(service))
}

async fn health() -> &'static str {
    "OK"
}

async fn missing_name(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError {
        error: FacadeError::validation("pokemon name is missing from the path"),
        path: uri.path().to_string(),
    }
}

async fn get_pokemon_stats(
    State(service): State<Arc<PokemonService>>,
    OriginalUri(uri): OriginalUri,
    name: Result<Path<String>, PathRejection>,
) -> Result<Json<PokemonSummary>, ApiError> {
    // Undecodable segments (e.g. invalid UTF-8) get the same envelope as a blank name.
    let Path(name) = name.map_err(|rejection| ApiError {
        error: FacadeError::validation(format!("unreadable pokemon name: {}", rejection)),
        path: uri.path().to_string(),
    })?;

    let summary = service
        .get_pokemon_stats(&name)
        .await
        .map_err(|error| ApiError {
            error,
            path: uri.path().to_string(),
        })?;
    Ok(Json(summary))
}

/// A failed request together with the path it was made on.
#[derive(Debug)]
pub struct ApiError {
    pub error: FacadeError,
    pub path: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let envelope = pokemon_error_envelope(&self.error, &self.path, Local::now().naive_local());
        let status =
            StatusCode::from_u16(envelope.estado).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(envelope)).into_response()
    }
}
