use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::stores::validate::ValidationError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Store not found")]
    StoreNotFound,

    #[error("Unknown author {0}")]
    UnknownAuthor(String),

    #[error("Only the author of a store can edit it")]
    NotOwner,

    #[error("Slug {0} is already taken")]
    SlugTaken(String),

    #[error("Slug lookup failed: {0}")]
    SlugLookup(#[source] anyhow::Error),

    #[error("Email {0} is already registered")]
    EmailTaken(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    fields: Vec<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::StoreNotFound => StatusCode::NOT_FOUND,
            AppError::UnknownAuthor(_) | AppError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            AppError::NotOwner => StatusCode::FORBIDDEN,
            AppError::SlugTaken(_) | AppError::EmailTaken(_) => StatusCode::CONFLICT,
            AppError::SlugLookup(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let fields = match &self {
            AppError::Validation(err) => err.messages(),
            _ => Vec::new(),
        };

        let body = ErrorBody {
            error: self.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}
