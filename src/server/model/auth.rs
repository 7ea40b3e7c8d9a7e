//! Authentication domain models.

use crate::{
    model::auth::TokenPairDto,
    server::model::user::User,
};

/// Self-registration input. Role is always student.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}

/// Signed access and refresh tokens for one user.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: User,
}

impl TokenPair {
    pub fn into_dto(self) -> TokenPairDto {
        TokenPairDto {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: self.expires_in,
            user: self.user.into_dto(),
        }
    }
}
