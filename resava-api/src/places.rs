use axum::extract::Query;
use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::AppState;
use resava_core::capabilities::PlacesLookup;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/places/search", get(search_places))
}

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub q: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// Best candidate place name or address, if any.
    pub result: Option<String>,
}

pub async fn search_places(
    State(state): State<AppState>,
    Query(query): Query<PlacesQuery>,
) -> Result<Json<PlacesResponse>, AppError> {
    let result = state
        .places
        .search(&query.q)
        .await
        .map_err(|err| AppError::InternalServerError(err.to_string()))?;
    Ok(Json(PlacesResponse { result }))
}
