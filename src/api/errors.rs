use reqwest::StatusCode;
use thiserror::Error;

/// Failure talking to the admin REST API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401/403 or an expired session. Callers re-authenticate, never retry.
    #[error("Authentication required")]
    Unauthorized,

    #[error("Resource not found")]
    NotFound,

    /// Request rejected by server-side validation, e.g. a duplicate name.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Maps a non-success status and the server's message to an error.
    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            s if s.is_client_error() => ApiError::Validation(message),
            s => ApiError::Server {
                status: s.as_u16(),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        match err.status() {
            Some(status) => ApiError::from_status(status, err.to_string()),
            None => ApiError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_statuses_require_login() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, String::new()),
            ApiError::Unauthorized
        ));
    }

    #[test]
    fn client_errors_carry_server_message() {
        match ApiError::from_status(StatusCode::CONFLICT, "duplicate coupon name".into()) {
            ApiError::Validation(message) => assert_eq!(message, "duplicate coupon name"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, String::new()),
            ApiError::NotFound
        ));
    }

    #[test]
    fn server_errors_keep_status() {
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            ApiError::Server { status: 502, .. }
        ));
    }
}
