//! User service for business logic.
//!
//! This module provides the `UserService` for account management. It enforces the
//! superadmin rules (only a superadmin may grant the role or touch a superadmin account),
//! forbids self-deletion, and keeps group membership consistent with the faculty.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{faculty::FacultyRepository, group::GroupRepository, user::UserRepository},
        error::{auth::AuthError, AppError},
        model::{
            pagination::{PageRequest, Paginated},
            user::{
                CreateUserParams, NewUserParams, UpdateProfileParams, UpdateUserParams, User,
                UserFilter,
            },
        },
        service::auth::password::hash_password,
    },
};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Retrieves a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Gets users for the back-office listing.
    pub async fn list(&self, filter: UserFilter) -> Result<Paginated<User>, AppError> {
        let page = filter.page;
        let (users, total) = UserRepository::new(self.db).get_paginated(&filter).await?;

        Ok(Paginated::new(users, total, page))
    }

    /// Gets the students of a faculty, for its dean office.
    pub async fn students_of_faculty(
        &self,
        faculty_id: i32,
        page: PageRequest,
    ) -> Result<Paginated<User>, AppError> {
        self.list(UserFilter {
            role: Some(Role::Student),
            faculty_id: Some(faculty_id),
            search: None,
            page,
        })
        .await
    }

    /// Creates an account with any role.
    ///
    /// # Arguments
    /// - `actor` - Administrator performing the action
    /// - `params` - Account fields with the plaintext password
    ///
    /// # Returns
    /// - `Ok(User)` - Created account
    /// - `Err(AuthError::AccessDenied)` - Non-superadmin granting the superadmin role
    /// - `Err(AppError::Conflict)` - Email already registered
    /// - `Err(AppError::BadRequest)` - Unknown faculty or group, or group outside the faculty
    pub async fn create(&self, actor: &User, params: NewUserParams) -> Result<User, AppError> {
        require_superadmin_for(actor, params.role == Role::Superadmin)?;

        let repo = UserRepository::new(self.db);
        if repo.email_exists(&params.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let faculty_id = resolve_membership(self.db, params.faculty_id, params.group_id).await?;
        let password_hash = hash_password(&params.password).await?;

        let user = repo
            .create(CreateUserParams {
                email: params.email,
                password_hash,
                first_name: params.first_name,
                last_name: params.last_name,
                phone: params.phone,
                role: params.role,
                faculty_id,
                group_id: params.group_id,
            })
            .await?;

        tracing::info!("User {} created account {} with role {}", actor.id, user.id, user.role);

        Ok(user)
    }

    /// Updates another account's names, role and memberships.
    ///
    /// # Returns
    /// - `Ok(User)` - Updated account
    /// - `Err(AppError::NotFound)` - No account with that id
    /// - `Err(AuthError::AccessDenied)` - Superadmin rule violated
    pub async fn update(&self, actor: &User, params: UpdateUserParams) -> Result<User, AppError> {
        let target = self.get(params.id).await?;
        require_superadmin_for(
            actor,
            target.role == Role::Superadmin || params.role == Role::Superadmin,
        )?;

        let faculty_id = resolve_membership(self.db, params.faculty_id, params.group_id).await?;

        UserRepository::new(self.db)
            .update(UpdateUserParams {
                faculty_id,
                ..params
            })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", target.id)))
    }

    /// Deletes an account.
    ///
    /// # Returns
    /// - `Ok(())` - Account deleted
    /// - `Err(AppError::BadRequest)` - Actor tried to delete their own account
    /// - `Err(AppError::NotFound)` - No account with that id
    /// - `Err(AuthError::AccessDenied)` - Non-superadmin deleting a superadmin
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        if actor.id == id {
            return Err(AppError::BadRequest(
                "You cannot delete your own account".to_string(),
            ));
        }

        let target = self.get(id).await?;
        require_superadmin_for(actor, target.role == Role::Superadmin)?;

        UserRepository::new(self.db).delete(id).await?;
        tracing::info!("User {} deleted account {}", actor.id, id);

        Ok(())
    }

    /// Updates the caller's own profile. The group must belong to the caller's faculty.
    pub async fn update_profile(
        &self,
        user: &User,
        params: UpdateProfileParams,
    ) -> Result<User, AppError> {
        if let Some(group_id) = params.group_id {
            let group = GroupRepository::new(self.db)
                .find_by_id(group_id)
                .await?
                .ok_or_else(|| AppError::BadRequest(format!("Group {} does not exist", group_id)))?;

            if user.faculty_id.is_some_and(|faculty_id| faculty_id != group.faculty_id) {
                return Err(AppError::BadRequest(
                    "Group does not belong to your faculty".to_string(),
                ));
            }
        }

        UserRepository::new(self.db)
            .update_profile(params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.id)))
    }
}

fn require_superadmin_for(actor: &User, needed: bool) -> Result<(), AppError> {
    if needed && actor.role != Role::Superadmin {
        return Err(AuthError::AccessDenied(
            actor.id,
            "only a superadmin may grant the role or manage superadmin accounts".to_string(),
        )
        .into());
    }
    Ok(())
}

/// Validates faculty and group ids and returns the faculty the account belongs to.
///
/// When only a group is given, the faculty is taken from the group.
///
/// # Returns
/// - `Ok(faculty_id)` - Resolved faculty, if any
/// - `Err(AppError::BadRequest)` - Unknown faculty or group, or group outside the faculty
pub async fn resolve_membership(
    db: &DatabaseConnection,
    faculty_id: Option<i32>,
    group_id: Option<i32>,
) -> Result<Option<i32>, AppError> {
    if let Some(faculty_id) = faculty_id {
        if FacultyRepository::new(db).find_by_id(faculty_id).await?.is_none() {
            return Err(AppError::BadRequest(format!(
                "Faculty {} does not exist",
                faculty_id
            )));
        }
    }

    let Some(group_id) = group_id else {
        return Ok(faculty_id);
    };

    let group = GroupRepository::new(db)
        .find_by_id(group_id)
        .await?
        .ok_or_else(|| AppError::BadRequest(format!("Group {} does not exist", group_id)))?;

    match faculty_id {
        Some(faculty_id) if faculty_id != group.faculty_id => Err(AppError::BadRequest(
            "Group does not belong to the selected faculty".to_string(),
        )),
        _ => Ok(Some(group.faculty_id)),
    }
}
