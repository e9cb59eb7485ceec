use crate::services::restaurant_service::ServiceError;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// Payload under the `message` key: a single sentence, or the list of
/// validation defects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

/// A lightweight wrapper for request errors that keeps the message local.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: ErrorMessage,
}

impl AppError {
    /// Create a new AppError with a specific status and message.
    pub fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            message: ErrorMessage::One(msg.into()),
        }
    }

    /// Shortcut for 400 Bad Request carrying every defect found.
    pub fn bad_request(defects: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: ErrorMessage::Many(defects),
        }
    }

    /// Shortcut for 404 Not Found
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    /// Shortcut for 409 Conflict
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, msg)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            ErrorMessage::One(msg) => write!(f, "{}", msg),
            ErrorMessage::Many(msgs) => write!(f, "{}", msgs.join("; ")),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.message }));
        (self.status, body).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(defects) => AppError::bad_request(defects),
            ServiceError::Conflict => AppError::conflict(err.to_string()),
            ServiceError::ReservationNotFound => AppError::not_found(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(vec![rejection.body_text()])
    }
}
