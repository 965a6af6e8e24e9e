//! Success envelope
//!
//! Every successful handler returns the same `{message, status, data}`
//! envelope, with the HTTP status mirrored in the body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Uniform success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub message: String,
    pub status: u16,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wraps data in a 200 envelope
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            status: StatusCode::OK.as_u16(),
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}
