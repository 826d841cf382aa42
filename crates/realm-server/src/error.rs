//! Error types for the realm server.
//!
//! [`ApiError`] is what HTTP handlers return; it renders as a JSON body
//! through its [`IntoResponse`] implementation. [`ServerError`] covers
//! listener lifecycle failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use realm_core::RealmError;

/// Errors that can occur in the HTTP API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// An invalid query parameter was provided.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The realm refused the operation. A missing participant maps to
    /// `404`, anything else to `422`.
    #[error("realm error: {0}")]
    Realm(#[from] RealmError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidQuery(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Realm(RealmError::NotFound(e)) => (StatusCode::NOT_FOUND, e.to_string()),
            Self::Realm(e) => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
        };

        let body = serde_json::json!({
            "error": message,
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Errors that can occur when starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to the network address.
    #[error("bind error: {0}")]
    Bind(String),

    /// The server encountered a fatal error while serving.
    #[error("serve error: {0}")]
    Serve(String),
}
