use crate::error::AppResult;
use crate::models::{ActualUrlResponse, ShortenRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json};
use std::sync::Arc;

use super::AppState;

/// Create a short URL.
///
/// Responds with the inserted rows as a JSON array. A body that does not
/// parse is rejected before anything is written.
pub async fn shorten_url(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let mapping = state.shortener.create(&payload.url).await?;

    Ok(Json(vec![mapping]))
}

/// Resolve a short code to its original URL
pub async fn actual_url(
    State(state): State<Arc<AppState>>,
    Path(short_url): Path<String>,
) -> AppResult<impl IntoResponse> {
    let actual_url = state.shortener.resolve(&short_url).await?;

    Ok(Json(ActualUrlResponse { actual_url }))
}
