//! User domain models and parameters.
//!
//! Provides the account model with its role and faculty/group membership, plus parameter
//! types for registration, admin management and profile updates.

use chrono::{DateTime, Utc};

use crate::{
    model::user::{Role, UserDto},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::PageRequest,
    },
};

/// Application account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    /// Argon2 PHC string. Never leaves the server.
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user domain model
    /// - `Err(AppError::InternalErr(ParseStoredEnum))` - Stored role is unknown
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, AppError> {
        let role = entity.role.parse::<Role>().map_err(InternalError::from)?;

        Ok(Self {
            id: entity.id,
            email: entity.email,
            password_hash: entity.password_hash,
            first_name: entity.first_name,
            last_name: entity.last_name,
            phone: entity.phone,
            role,
            faculty_id: entity.faculty_id,
            group_id: entity.group_id,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts the user domain model to a DTO for API responses.
    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            role: self.role,
            faculty_id: self.faculty_id,
            group_id: self.group_id,
            created_at: self.created_at,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParams {
    /// Lowercased before storage.
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}

/// Parameters for an administrator editing an account.
#[derive(Debug, Clone)]
pub struct UpdateUserParams {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}

/// Parameters for a user editing their own profile.
#[derive(Debug, Clone)]
pub struct UpdateProfileParams {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub group_id: Option<i32>,
}

/// Filters for the admin user listing.
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub role: Option<Role>,
    pub faculty_id: Option<i32>,
    /// Matched against email, first and last name.
    pub search: Option<String>,
    pub page: PageRequest,
}

/// Account created by an administrator, before the password is hashed.
#[derive(Debug, Clone)]
pub struct NewUserParams {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub faculty_id: Option<i32>,
    pub group_id: Option<i32>,
}
