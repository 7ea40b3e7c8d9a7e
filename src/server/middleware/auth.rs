//! Bearer token extraction and role-based access checks.
//!
//! Controllers extract a [`BearerToken`] and pass it to [`AuthGuard::require`] with the
//! permissions the endpoint needs. The guard validates the access token, loads the user it
//! names and checks every permission. Services that can only decide access after loading a
//! resource call [`authorize`] with the already loaded user.

use axum::{extract::FromRequestParts, http::header::AUTHORIZATION, http::request::Parts};
use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{dormitory::DormitoryRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::user::User,
        service::auth::token::{JwtService, TokenType},
    },
};

/// Raw token from an `Authorization: Bearer <token>` header.
#[derive(Debug, Clone)]
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::MissingToken)?;

        Ok(Self(token.to_string()))
    }
}

/// Access requirement checked by [`AuthGuard`] and [`authorize`].
///
/// Administrators (admin and superadmin) satisfy every permission except `SuperAdmin`.
#[derive(Debug, Clone, Copy)]
pub enum Permission {
    Admin,
    SuperAdmin,
    /// User holds one of the listed roles.
    AnyOf(&'static [Role]),
    /// Dean office staff of the given faculty.
    FacultyStaff(i32),
    /// Manager of the given dormitory.
    DormitoryManager(i32),
}

pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtService,
    token: &'a BearerToken,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtService, token: &'a BearerToken) -> Self {
        Self { db, jwt, token }
    }

    /// Authenticates the request and checks that the user satisfies every permission.
    ///
    /// An empty permission list only requires a valid access token.
    ///
    /// # Returns
    /// - `Ok(User)` - Authenticated user with all permissions
    /// - `Err(AuthError::InvalidToken)` - Token invalid, expired or not an access token
    /// - `Err(AuthError::UserNotInDatabase)` - Token subject was deleted
    /// - `Err(AuthError::AccessDenied)` - A permission is not satisfied
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let claims = self.jwt.verify(&self.token.0, TokenType::Access)?;

        let Some(user) = UserRepository::new(self.db).find_by_id(claims.sub).await? else {
            return Err(AuthError::UserNotInDatabase(claims.sub).into());
        };

        authorize(self.db, &user, permissions).await?;

        Ok(user)
    }
}

/// Checks that an already authenticated user satisfies every permission.
pub async fn authorize(
    db: &DatabaseConnection,
    user: &User,
    permissions: &[Permission],
) -> Result<(), AppError> {
    for permission in permissions {
        if !satisfies(db, user, *permission).await? {
            return Err(AuthError::AccessDenied(
                user.id,
                format!("{} lacks permission {:?}", user.role, permission),
            )
            .into());
        }
    }

    Ok(())
}

async fn satisfies(
    db: &DatabaseConnection,
    user: &User,
    permission: Permission,
) -> Result<bool, AppError> {
    if let Permission::SuperAdmin = permission {
        return Ok(user.role == Role::Superadmin);
    }
    if user.is_admin() {
        return Ok(true);
    }

    Ok(match permission {
        Permission::Admin | Permission::SuperAdmin => false,
        Permission::AnyOf(roles) => roles.contains(&user.role),
        Permission::FacultyStaff(faculty_id) => {
            user.role == Role::FacultyDeanOffice && user.faculty_id == Some(faculty_id)
        }
        Permission::DormitoryManager(dormitory_id) => {
            user.role == Role::DormManager
                && DormitoryRepository::new(db)
                    .is_managed_by(dormitory_id, user.id)
                    .await?
        }
    })
}
