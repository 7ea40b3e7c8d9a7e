use thiserror::Error;

use crate::model::api::ParseEnumError;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A role or status column holds a value no enum variant matches.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to parse stored value: {0}")]
    ParseStoredEnum(#[from] ParseEnumError),

    /// Argon2 failed to hash a password.
    #[error("Failed to hash password: {0}")]
    PasswordHash(String),

    /// A blocking task such as password hashing panicked or was cancelled.
    #[error("Blocking task failed: {0}")]
    BlockingTask(String),

    /// JWT signing failed.
    #[error("Failed to sign token: {0}")]
    TokenEncoding(String),
}
