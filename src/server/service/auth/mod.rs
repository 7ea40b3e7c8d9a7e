//! Email and password authentication with JWT access and refresh tokens.
//!
//! Refresh tokens rotate: every successful refresh revokes the presented token and issues
//! a new pair. Changing the password revokes all of a user's refresh tokens.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{refresh_token::RefreshTokenRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            auth::{RegisterParams, TokenPair},
            user::{CreateUserParams, User},
        },
        service::user::resolve_membership,
    },
};

use self::{
    password::{hash_password, verify_password},
    token::{JwtService, TokenType},
};

pub mod password;
pub mod token;

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService) -> Self {
        Self { db, jwt }
    }

    /// Registers a student account and signs it in.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - Tokens for the new account
    /// - `Err(AppError::Conflict)` - Email already registered
    /// - `Err(AppError::BadRequest)` - Unknown faculty or group, or group outside the faculty
    pub async fn register(&self, params: RegisterParams) -> Result<TokenPair, AppError> {
        let repo = UserRepository::new(self.db);
        if repo.email_exists(&params.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let faculty_id = resolve_membership(self.db, params.faculty_id, params.group_id).await?;

        let user = repo
            .create(CreateUserParams {
                email: params.email,
                password_hash: hash_password(&params.password).await?,
                first_name: params.first_name,
                last_name: params.last_name,
                phone: params.phone,
                role: Role::Student,
                faculty_id,
                group_id: params.group_id,
            })
            .await?;

        tracing::info!("Registered student account {}", user.id);

        self.issue_pair(user).await
    }

    /// Signs a user in with email and password.
    ///
    /// Unknown emails and wrong passwords fail with the same error. An unknown email
    /// still costs one Argon2 hash so response times do not reveal registered addresses.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, AppError> {
        let Some(user) = UserRepository::new(self.db).find_by_email(email).await? else {
            hash_password(password).await?;
            return Err(AuthError::InvalidCredentials.into());
        };

        if !verify_password(password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        self.issue_pair(user).await
    }

    /// Exchanges a refresh token for a new pair, revoking the presented token.
    ///
    /// # Returns
    /// - `Ok(TokenPair)` - New tokens carrying the user's current role
    /// - `Err(AuthError::InvalidToken)` - Token invalid, expired, revoked or not a refresh token
    /// - `Err(AuthError::UserNotInDatabase)` - Account was deleted
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt.verify(refresh_token, TokenType::Refresh)?;

        if !RefreshTokenRepository::new(self.db).revoke(&claims.jti).await? {
            return Err(AuthError::InvalidToken("refresh token revoked or unknown".to_string()).into());
        }

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        self.issue_pair(user).await
    }

    /// Revokes a refresh token.
    ///
    /// Revoking an already revoked token succeeds, so logging out twice is harmless.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let claims = self.jwt.verify(refresh_token, TokenType::Refresh)?;

        RefreshTokenRepository::new(self.db).revoke(&claims.jti).await?;

        Ok(())
    }

    /// Changes the caller's password and signs out every other session.
    ///
    /// # Returns
    /// - `Ok(())` - Password changed
    /// - `Err(AuthError::InvalidCredentials)` - Current password is wrong
    pub async fn change_password(
        &self,
        user: &User,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        if !verify_password(current_password, &user.password_hash).await? {
            return Err(AuthError::InvalidCredentials.into());
        }

        UserRepository::new(self.db)
            .update_password(user.id, hash_password(new_password).await?)
            .await?;
        let revoked = RefreshTokenRepository::new(self.db)
            .revoke_all_for_user(user.id)
            .await?;

        tracing::info!(
            "User {} changed password, revoked {} refresh tokens",
            user.id,
            revoked
        );

        Ok(())
    }

    async fn issue_pair(&self, user: User) -> Result<TokenPair, AppError> {
        let access = self.jwt.issue(user.id, user.role, TokenType::Access)?;
        let refresh = self.jwt.issue(user.id, user.role, TokenType::Refresh)?;

        RefreshTokenRepository::new(self.db)
            .create(user.id, refresh.jti, refresh.expires_at)
            .await?;

        Ok(TokenPair {
            access_token: access.token,
            refresh_token: refresh.token,
            expires_in: self.jwt.access_ttl().num_seconds(),
            user,
        })
    }
}
