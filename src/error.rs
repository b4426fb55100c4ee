use std::error::Error;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::news::NewsError;

#[derive(Debug, Error)]
pub enum RestError {
    #[error(transparent)]
    News(#[from] NewsError),

    #[error("Malformed article payload")]
    InvalidBody(#[from] JsonRejection),

    #[error("Malformed query string")]
    InvalidQuery(#[from] QueryRejection),

    #[error("Article number must be a non-negative integer")]
    InvalidPath(#[from] PathRejection),

    #[error("Update payload must include the article number")]
    MissingNumber,
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        error!("{}: {:?}", self, self.source());

        let status = match self {
            RestError::News(NewsError::NotFound(_)) => StatusCode::NOT_FOUND,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidPath(_) => StatusCode::BAD_REQUEST,
            RestError::MissingNumber => StatusCode::BAD_REQUEST,
        };

        let payload = Json(json!({"message": self.to_string()}));

        (status, payload).into_response()
    }
}
