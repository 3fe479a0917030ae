//! Error-to-HTTP response conversion.
//!
//! Handlers return `Result<T, AppError>`; the error body is the usual
//! [`ApiResponse`] envelope with `status: "Error"`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::response::ApiResponse;

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError(pub pf_core::Error);

impl AppError {
    /// `400` with a fixed message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(pf_core::Error::BadRequest(message.into()))
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl From<pf_core::Error> for AppError {
    fn from(e: pf_core::Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                code = self.0.code(),
                error = %self.0,
                "Server error in image handler"
            );
        } else {
            tracing::warn!(
                status = %status,
                code = self.0.code(),
                error = %self.0,
                "Rejected image request"
            );
        }

        (status, Json(ApiResponse::error(self.0.to_string()))).into_response()
    }
}

/// Give the bare `408` from the timeout layer the usual error envelope.
pub async fn timeout_envelope(response: Response) -> Response {
    if response.status() != StatusCode::REQUEST_TIMEOUT {
        return response;
    }
    tracing::warn!("Request timed out");
    (
        StatusCode::REQUEST_TIMEOUT,
        Json(ApiResponse::error("request timed out")),
    )
        .into_response()
}
