//! Analytics event ingestion.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::IngestResponse;
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};

/// `POST /v1/analytics` — Accept one JSON analytics event.
///
/// The payload is logged and acknowledged; it is not persisted yet.
///
/// # Errors
///
/// Returns [`ApiError::UnsupportedMediaType`] without a JSON content type
/// and [`ApiError::InvalidRequest`] for a body that is not valid JSON.
#[utoipa::path(
    post,
    path = "/v1/analytics",
    tag = "Analytics",
    summary = "Ingest an analytics event",
    description = "Accepts any JSON document sent with `Content-Type: application/json` and acknowledges receipt.",
    responses(
        (status = 200, description = "Event received", body = IngestResponse),
        (status = 400, description = "Malformed JSON", body = ErrorResponse),
        (status = 415, description = "Body is not declared as JSON", body = ErrorResponse),
    )
)]
pub async fn ingest_event(
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(event) = payload?;
    tracing::info!(%event, "analytics event received");
    Ok((StatusCode::OK, Json(IngestResponse::received())))
}

/// Analytics routes, mounted under `/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/analytics", post(ingest_event))
}
