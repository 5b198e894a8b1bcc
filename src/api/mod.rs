//! REST API layer: route handlers, DTOs, and router composition.
//!
//! Resource endpoints are mounted under `/v1`; the health check lives at
//! the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// OpenAPI description of the REST endpoints.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "zanalytics", description = "Analytics ingestion service"),
    paths(
        handlers::analytics::ingest_event,
        handlers::accounts::login,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::IngestResponse,
        dto::AuthenticateRequest,
        dto::AuthenticateResponse,
        crate::error::ErrorResponse,
        crate::error::ErrorBody,
    )),
    tags(
        (name = "Analytics", description = "Event ingestion"),
        (name = "Accounts", description = "Account authentication"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/v1", handlers::routes())
        .merge(handlers::system::routes())
}
