//! The error responses shared by every route.

use aide::OperationOutput;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{Level, event};

/// The body of every error response.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Message {
    /// Human-readable description of the failure
    pub message: String,
}

/// A failed request, rendered as `{"message": ...}` with the given status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// A failure with an arbitrary status.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// No credentials were supplied.
    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "unauthorized access")
    }

    /// Credentials were supplied but do not grant access.
    pub fn forbidden() -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden Access")
    }

    /// The request itself is unacceptable.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// The addressed document does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Something failed on our side. The underlying error is logged, not
    /// returned to the client.
    pub fn internal(err: impl Display, message: impl Into<String>) -> Self {
        event!(Level::ERROR, err = err.to_string());
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// The response status.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(Message {
                message: self.message,
            }),
        )
            .into_response()
    }
}

impl OperationOutput for ApiError {
    type Inner = Message;
}
