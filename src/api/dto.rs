//! Request and response bodies for the REST endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Acknowledgement returned for every accepted analytics event.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct IngestResponse {
    /// Always `"success"`.
    pub status: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl IngestResponse {
    /// The fixed acknowledgement body.
    #[must_use]
    pub fn received() -> Self {
        Self {
            status: "success".to_string(),
            message: "Data received".to_string(),
        }
    }
}

/// Login attempt.
#[derive(Deserialize, ToSchema)]
pub struct AuthenticateRequest {
    /// Account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

impl std::fmt::Debug for AuthenticateRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticateRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Successful login.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthenticateResponse {
    /// Always `true`; rejected logins return an error body instead.
    pub authenticated: bool,
}
