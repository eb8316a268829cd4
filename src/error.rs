use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the estimation engine and its HTTP surface.
///
/// None of these are fatal: the last committed series stay in place.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(String),

    #[error("Unknown month: {0}")]
    InvalidMonth(String),

    #[error("Cannot export an empty series")]
    EmptySeries,

    #[error("Unknown export view: {0} (expected \"daily\" or \"yearly\")")]
    UnknownExportView(String),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Regeneration {generation} superseded by generation {committed}")]
    Superseded { generation: u64, committed: u64 },
}

impl From<JsonRejection> for EngineError {
    fn from(rejection: JsonRejection) -> Self {
        EngineError::MalformedBody(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: &'static str,
    message: String,
}

impl EngineError {
    fn status_code(&self) -> StatusCode {
        match self {
            EngineError::Configuration(_)
            | EngineError::InvalidMonth(_)
            | EngineError::UnknownExportView(_)
            | EngineError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            EngineError::EmptySeries => StatusCode::UNPROCESSABLE_ENTITY,
            EngineError::Superseded { .. } => StatusCode::CONFLICT,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            EngineError::Configuration(_) => "ConfigurationError",
            EngineError::InvalidMonth(_) => "InvalidMonthError",
            EngineError::EmptySeries => "EmptySeriesError",
            EngineError::UnknownExportView(_) => "UnknownExportView",
            EngineError::MalformedBody(_) => "MalformedBody",
            EngineError::Superseded { .. } => "Superseded",
        }
    }
}

impl IntoResponse for EngineError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "request rejected");
        let body = ErrorResponse {
            error: self.kind(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
