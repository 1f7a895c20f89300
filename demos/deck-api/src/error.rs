use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use mtg_board_state::BoardStateError;
use serde_json::json;

/// Unified error type that renders as a JSON `{"error": "..."}` response
/// with an appropriate HTTP status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<BoardStateError> for AppError {
    fn from(e: BoardStateError) -> Self {
        match &e {
            BoardStateError::MissingParameter
            | BoardStateError::UnsupportedProvider(_)
            | BoardStateError::InvalidUrlFormat { .. } => AppError::bad_request(e.to_string()),
            _ => AppError::internal(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_bad_request() {
        let err = AppError::from(BoardStateError::MissingParameter);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Missing URL parameter");

        let err = AppError::from(BoardStateError::UnsupportedProvider(
            "https://example.com/deck".into(),
        ));
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let err = AppError::from(BoardStateError::InvalidUrlFormat {
            provider: "Archidekt",
        });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Invalid Archidekt URL format");
    }

    #[test]
    fn upstream_errors_map_to_internal() {
        let err = AppError::from(BoardStateError::Upstream {
            provider: "Moxfield",
            status: 403,
        });
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Moxfield API error: 403");
    }
}
