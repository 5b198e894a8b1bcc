//! Account login.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{AuthenticateRequest, AuthenticateResponse};
use crate::app_state::AppState;
use crate::error::{ApiError, ErrorResponse};
use crate::persistence::accounts;

/// `POST /v1/accounts/authenticate` — Check an email and password.
///
/// Unknown email, wrong password, and database trouble produce the same
/// 401 response.
///
/// # Errors
///
/// Returns [`ApiError::InvalidCredentials`] when the login is rejected and
/// a validation error for a malformed body.
#[utoipa::path(
    post,
    path = "/v1/accounts/authenticate",
    tag = "Accounts",
    summary = "Authenticate an account",
    description = "Verifies the password against the stored Argon2 hash for the given email.",
    request_body = AuthenticateRequest,
    responses(
        (status = 200, description = "Credentials accepted", body = AuthenticateResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "Credentials rejected", body = ErrorResponse),
    )
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<AuthenticateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    if accounts::authenticate(&state.db, &req.email, &req.password).await {
        tracing::info!(email = %req.email, "login accepted");
        Ok(Json(AuthenticateResponse {
            authenticated: true,
        }))
    } else {
        tracing::info!(email = %req.email, "login rejected");
        Err(ApiError::InvalidCredentials)
    }
}

/// Account routes, mounted under `/v1`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/accounts/authenticate", post(login))
}
