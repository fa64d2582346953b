//! Consistent JSON error responses.
//!
//! Every failure, whatever its cause, is rendered as
//! `{ "error": <code>, "message": <summary>, "details": <cause> }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use productd_core::DomainError;

pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INVALID_INPUT: &str = "INVALID_INPUT";
pub const METHOD_NOT_ALLOWED: &str = "METHOD_NOT_ALLOWED";

const INVALID_INPUT_MESSAGE: &str = "The provided input data is invalid";

/// Wire shape of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: &'static str,
    pub details: &'static str,
}

/// A client-fault response: HTTP status plus the error envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(
        status: StatusCode,
        error: &'static str,
        message: &'static str,
        details: &'static str,
    ) -> Self {
        Self {
            status,
            body: ErrorBody {
                error,
                message,
                details,
            },
        }
    }

    pub fn route_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND, "Route not found", "Unknown path")
    }

    pub fn invalid_product_id() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_INPUT,
            INVALID_INPUT_MESSAGE,
            "Product ID must be a positive integer",
        )
    }

    pub fn invalid_body() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_INPUT,
            INVALID_INPUT_MESSAGE,
            "Request body must be valid JSON and match schema",
        )
    }

    pub fn invalid_fields() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            INVALID_INPUT,
            INVALID_INPUT_MESSAGE,
            "Missing or invalid required fields",
        )
    }

    pub fn product_not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            NOT_FOUND,
            "Product not found",
            "No product exists with the given productId",
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            METHOD_NOT_ALLOWED,
            "Method not allowed",
            "Check HTTP method and path",
        )
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidId(_) => Self::invalid_product_id(),
            DomainError::Validation(_) => Self::invalid_fields(),
            DomainError::NotFound => Self::product_not_found(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
