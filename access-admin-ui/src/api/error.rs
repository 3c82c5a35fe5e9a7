use reqwest::StatusCode;
use shared_http::api::ErrorResponse;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("You are not signed in")]
    MissingToken,

    #[error("Your session has expired. Please sign in again.")]
    Unauthorized,

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// Builds an error from a non-success response, using the server's
    /// message when the body carries one.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .and_then(|e| e.reason().map(str::to_string))
            .unwrap_or_else(|| match status.canonical_reason() {
                Some(reason) => format!("Request failed: {} {}", status.as_u16(), reason),
                None => format!("Request failed with status {}", status.as_u16()),
            });
        ApiError::Status {
            status: status.as_u16(),
            message,
        }
    }

    /// Whether the user has to sign in again before retrying.
    pub fn needs_sign_in(&self) -> bool {
        matches!(self, ApiError::MissingToken | ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_is_used() {
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message":"User not found"}"#,
        );
        assert_eq!(err.to_string(), "User not found");
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
    }

    #[test]
    fn test_error_field_is_used() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, r#"{"error":"Admins only"}"#);
        assert_eq!(err.to_string(), "Admins only");
        assert!(!err.needs_sign_in());
    }

    #[test]
    fn test_fallback_for_non_json_body() {
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(
            err.to_string(),
            "Request failed: 500 Internal Server Error"
        );
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::from_status(StatusCode::UNAUTHORIZED, r#"{"message":"jwt expired"}"#);
        assert!(matches!(err, ApiError::Unauthorized));
        assert!(err.needs_sign_in());
        assert!(ApiError::MissingToken.needs_sign_in());
    }
}
