use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Request is missing a bearer token")]
    MissingToken,

    /// Token failed signature, expiry or type validation, or a refresh token
    /// was unknown or already revoked.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Login failed. The message is identical for unknown emails and wrong
    /// passwords.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Token subject no longer exists in the database.
    ///
    /// Results in a 401 Unauthorized response.
    #[error("User {0} from token not found in database")]
    UserNotInDatabase(i32),

    /// User is authenticated but lacks the role or ownership required.
    ///
    /// Results in a 403 Forbidden response. The message is logged, not returned.
    #[error("User {0} denied access: {1}")]
    AccessDenied(i32, String),
}

/// Converts authentication errors into HTTP responses.
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
///
/// # Returns
/// - 401 Unauthorized - Missing, invalid or orphaned tokens and failed logins
/// - 403 Forbidden - Authenticated user lacks permission
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::MissingToken | Self::InvalidToken(_) | Self::UserNotInDatabase(_) => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Authentication required".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid email or password".to_string(),
                }),
            )
                .into_response(),
            Self::AccessDenied(_, _) => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "You do not have permission to perform this action".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
