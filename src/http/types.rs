use axum::http::StatusCode;
use axum::extract::rejection::BytesRejection;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{error::StoreError, todo::Todo};

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody { pub error: String }

#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    BadRequest(String),
    NotFound,
    Internal(String),
    /// A request the extractors refused before a handler ran, e.g. an oversized body.
    Rejected { status: StatusCode, message: String },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(m) | ApiError::Internal(m) => m,
            ApiError::NotFound => "not found",
            ApiError::Rejected { message, .. } => message,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Validation(m) => ApiError::BadRequest(m),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(r: BytesRejection) -> Self {
        ApiError::Rejected { status: r.status(), message: r.body_text() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.message(), "request failed");
        }
        (status, axum::Json(ErrorBody { error: self.message().to_string() })).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct TodosBody { pub todos: Vec<Todo> }

#[derive(Debug, Serialize)]
pub struct TodoBody { pub todo: Todo }

#[derive(Debug, Serialize)]
pub struct OkBody { pub ok: bool }
