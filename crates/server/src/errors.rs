use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::{types::ErrorBody, Settled};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// A page loader could not produce data nor a redirect.
#[derive(Debug)]
pub struct PageError(pub String);

impl PageError {
    pub fn from_display(err: impl Display) -> Self {
        Self(err.to_string())
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let msg = self.0;
        error!(error = %msg, "page load failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(msg))).into_response()
    }
}

/// JSON endpoint body: the settled payload verbatim with 200, or
/// `{"error": message}` with 500.
#[derive(Debug)]
pub struct ApiJson<T>(pub Settled<T>);

impl<T: Serialize> IntoResponse for ApiJson<T> {
    fn into_response(self) -> Response {
        match self.0 {
            Settled::Data { data } => (StatusCode::OK, Json(data)).into_response(),
            Settled::Error { error } => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody::new(error.message))).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {reason}")]
    Bind { addr: String, reason: String },
}
