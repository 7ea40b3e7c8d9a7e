//! JWT issuing and validation.
//!
//! Access and refresh tokens are both HS256 JWTs signed with the configured secret. The
//! `typ` claim tells them apart so a refresh token can never be used as a bearer token
//! and the other way around. Refresh token identifiers (`jti`) are persisted by the auth
//! service so they can be revoked.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    model::user::Role,
    server::{
        error::{auth::AuthError, internal::InternalError, AppError},
        util::random::random_alphanumeric,
    },
};

const JTI_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenType {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub role: Role,
    pub typ: TokenType,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token with the identifiers needed to persist it.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub jti: String,
    pub expires_at: DateTime<Utc>,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

/// Signs and verifies tokens. Cheap to clone.
#[derive(Clone)]
pub struct JwtService {
    keys: Arc<Keys>,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl JwtService {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            keys: Arc::new(Keys {
                encoding: EncodingKey::from_secret(secret.as_bytes()),
                decoding: DecodingKey::from_secret(secret.as_bytes()),
            }),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn access_ttl(&self) -> Duration {
        self.access_ttl
    }

    /// Signs a token of the given type for a user.
    ///
    /// # Returns
    /// - `Ok(IssuedToken)` - Signed token with its `jti` and expiry
    /// - `Err(AppError::InternalErr(TokenEncoding))` - Signing failed
    pub fn issue(&self, user_id: i32, role: Role, typ: TokenType) -> Result<IssuedToken, AppError> {
        let now = Utc::now();
        let ttl = match typ {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let expires_at = now + ttl;

        let claims = Claims {
            sub: user_id,
            role,
            typ,
            jti: random_alphanumeric(JTI_LENGTH),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys.encoding)
            .map_err(|e| InternalError::TokenEncoding(e.to_string()))?;

        Ok(IssuedToken {
            token,
            jti: claims.jti,
            expires_at,
        })
    }

    /// Verifies signature, expiry and token type.
    ///
    /// # Returns
    /// - `Ok(Claims)` - Token is valid and of the expected type
    /// - `Err(AuthError::InvalidToken)` - Bad signature, expired, malformed or wrong type
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = decode::<Claims>(token, &self.keys.decoding, &validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?
            .claims;

        if claims.typ != expected {
            return Err(AuthError::InvalidToken(format!(
                "expected {:?} token, got {:?}",
                expected, claims.typ
            )));
        }

        Ok(claims)
    }
}
