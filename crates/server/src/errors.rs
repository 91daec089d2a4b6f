use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status code plus an `{error, message}` JSON body.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub body: ErrorBody,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &str, message: Option<String>) -> Self {
        Self { status, body: ErrorBody { error: error.to_string(), message } }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Failure of a REST handler.
#[derive(Debug)]
pub enum ApiError {
    /// 404 with an empty body.
    NotFound,
    Json(JsonApiError),
}

impl ApiError {
    /// Create maps storage faults to a client error rather than 500.
    pub fn on_create(err: ServiceError) -> Self {
        match err {
            ServiceError::Db(msg) => {
                warn!(error = %msg, "create rejected by storage");
                Self::Json(JsonApiError::new(StatusCode::BAD_REQUEST, "Create Failed", Some(msg)))
            }
            other => other.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => {
                warn!(%msg, "not found");
                Self::NotFound
            }
            ServiceError::Validation(msg) => Self::Json(JsonApiError::new(
                StatusCode::BAD_REQUEST,
                "Validation Error",
                Some(msg),
            )),
            ServiceError::Db(msg) => {
                error!(error = %msg, "storage fault");
                Self::Json(JsonApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage Error",
                    Some(msg),
                ))
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = Some(rejection.body_text());
        Self::Json(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid JSON", message))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        let message = Some(rejection.body_text());
        Self::Json(JsonApiError::new(StatusCode::BAD_REQUEST, "Invalid Query", message))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND.into_response(),
            Self::Json(e) => e.into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("storage initialization failed: {0}")]
    Storage(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}

impl From<ServiceError> for StartupError {
    fn from(err: ServiceError) -> Self {
        Self::Storage(err.to_string())
    }
}
