use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Validation failures raised by the calculators.
///
/// The message is user-facing: when a tool call is rejected the dispatcher
/// replies with this text instead of a tool result.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ToolError {
    #[error("Invalid date format. Please use YYYY-MM-DD format.")]
    InvalidDate(String),

    #[error("Cycle length should be between 21 and 45 days.")]
    CycleLengthOutOfRange(i64),

    #[error("Please provide at least one symptom to analyze.")]
    NoSymptoms,

    #[error("I couldn't read the details for {tool}: {reason}")]
    InvalidArguments { tool: String, reason: String },
}

/// Errors surfaced by the HTTP layer.
#[derive(Debug)]
pub enum AppError {
    /// Malformed request envelope (400)
    BadRequest(String),
    /// LLM provider or transport failure (500)
    Upstream(anyhow::Error),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Generic message returned for every upstream failure.
pub const AGENT_ERROR_MESSAGE: &str = "Agent error occurred.";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(message) => {
                log::warn!("Rejected request: {}", message);
                (StatusCode::BAD_REQUEST, message)
            }
            AppError::Upstream(err) => {
                log::error!("Agent request failed: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    AGENT_ERROR_MESSAGE.to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Upstream(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_error_messages_are_user_facing() {
        assert_eq!(
            ToolError::CycleLengthOutOfRange(50).to_string(),
            "Cycle length should be between 21 and 45 days."
        );
        assert!(ToolError::NoSymptoms
            .to_string()
            .contains("at least one symptom"));
    }

    #[test]
    fn test_upstream_error_hides_details() {
        let response =
            AppError::Upstream(anyhow::anyhow!("Groq API error (401): bad key")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_bad_request_status() {
        let response = AppError::BadRequest("Message must not be empty".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
