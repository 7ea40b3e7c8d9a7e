//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for managing account records. It handles
//! creation, lookups by id and email, filtered pagination for the back-office, profile and
//! role updates, and per-role counts, converting entity models to `User` domain models at
//! the infrastructure boundary.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    model::{search::SearchHitKind, user::Role},
    server::{
        data::reservation::ReservationRepository,
        error::AppError,
        model::{
            search::SearchHit,
            user::{CreateUserParams, UpdateProfileParams, UpdateUserParams, User, UserFilter},
        },
        util::pattern::contains_pattern,
    },
};

/// Repository providing database operations for user management.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new account.
    ///
    /// The email is stored lowercased and trimmed so lookups are case-insensitive.
    ///
    /// # Arguments
    /// - `params` - Account fields with an already hashed password
    ///
    /// # Returns
    /// - `Ok(User)` - The created user
    /// - `Err(AppError::DbErr)` - Insert failed, including unique email violations
    pub async fn create(&self, params: CreateUserParams) -> Result<User, AppError> {
        let now = Utc::now();

        let entity = entity::user::ActiveModel {
            email: ActiveValue::Set(normalize_email(&params.email)),
            password_hash: ActiveValue::Set(params.password_hash),
            first_name: ActiveValue::Set(params.first_name.trim().to_string()),
            last_name: ActiveValue::Set(params.last_name.trim().to_string()),
            phone: ActiveValue::Set(params.phone),
            role: ActiveValue::Set(params.role.as_str().to_string()),
            faculty_id: ActiveValue::Set(params.faculty_id),
            group_id: ActiveValue::Set(params.group_id),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        User::from_entity(entity)
    }

    /// Finds a user by id.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error or unknown stored role
    pub async fn find_by_id(&self, id: i32) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(id).one(self.db).await?;

        entity.map(User::from_entity).transpose()
    }

    /// Finds a user by email, ignoring case and surrounding whitespace.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(normalize_email(email)))
            .one(self.db)
            .await?;

        entity.map(User::from_entity).transpose()
    }

    /// Checks if an account with the given email exists.
    pub async fn email_exists(&self, email: &str) -> Result<bool, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(normalize_email(email)))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Checks if at least one account holds the given role.
    ///
    /// Used at startup to decide whether a superadmin must be bootstrapped.
    pub async fn role_exists(&self, role: Role) -> Result<bool, AppError> {
        let count = entity::prelude::User::find()
            .filter(entity::user::Column::Role.eq(role.as_str()))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets users matching the filter with pagination.
    ///
    /// Results are ordered by last name, then first name, then id so pages are stable.
    ///
    /// # Arguments
    /// - `filter` - Optional role, faculty and free-text filters plus the page request
    ///
    /// # Returns
    /// - `Ok((users, total))` - Users for the requested page and total matching count
    /// - `Err(AppError)` - Database error or unknown stored role
    pub async fn get_paginated(&self, filter: &UserFilter) -> Result<(Vec<User>, u64), AppError> {
        let mut query = entity::prelude::User::find();

        if let Some(role) = filter.role {
            query = query.filter(entity::user::Column::Role.eq(role.as_str()));
        }
        if let Some(faculty_id) = filter.faculty_id {
            query = query.filter(entity::user::Column::FacultyId.eq(faculty_id));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query = query.filter(matches_text(search));
        }

        let paginator = query
            .order_by_asc(entity::user::Column::LastName)
            .order_by_asc(entity::user::Column::FirstName)
            .order_by_asc(entity::user::Column::Id)
            .paginate(self.db, filter.page.per_page);

        let total = paginator.num_items().await?;
        let users = paginator
            .fetch_page(filter.page.page)
            .await?
            .into_iter()
            .map(User::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((users, total))
    }

    /// Updates names, phone, role and memberships of an account.
    ///
    /// # Returns
    /// - `Ok(Some(User))` - The updated user
    /// - `Ok(None)` - No user with that id
    /// - `Err(AppError)` - Database error
    pub async fn update(&self, params: UpdateUserParams) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.first_name = ActiveValue::Set(params.first_name.trim().to_string());
        active.last_name = ActiveValue::Set(params.last_name.trim().to_string());
        active.phone = ActiveValue::Set(params.phone);
        active.role = ActiveValue::Set(params.role.as_str().to_string());
        active.faculty_id = ActiveValue::Set(params.faculty_id);
        active.group_id = ActiveValue::Set(params.group_id);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    /// Updates the fields a user may change on their own profile.
    pub async fn update_profile(
        &self,
        params: UpdateProfileParams,
    ) -> Result<Option<User>, AppError> {
        let Some(entity) = entity::prelude::User::find_by_id(params.id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.first_name = ActiveValue::Set(params.first_name.trim().to_string());
        active.last_name = ActiveValue::Set(params.last_name.trim().to_string());
        active.phone = ActiveValue::Set(params.phone);
        active.group_id = ActiveValue::Set(params.group_id);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        User::from_entity(entity).map(Some)
    }

    /// Replaces the stored password hash.
    ///
    /// # Returns
    /// - `Ok(true)` - Hash replaced
    /// - `Ok(false)` - No user with that id
    pub async fn update_password(&self, id: i32, password_hash: String) -> Result<bool, AppError> {
        let result = entity::prelude::User::update_many()
            .filter(entity::user::Column::Id.eq(id))
            .col_expr(
                entity::user::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                entity::user::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now()),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Deletes an account. Dependent applications, reservations and agreements cascade.
    ///
    /// Places held by the account's checked-in reservations are released in the same
    /// transaction, so room occupancy stays equal to the checked-in reservations.
    ///
    /// # Returns
    /// - `Ok(true)` - Account deleted
    /// - `Ok(false)` - No user with that id
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let released = ReservationRepository::release_checked_in(&txn, id).await?;
        let result = entity::prelude::User::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        if released > 0 {
            tracing::info!("Released {} room places held by deleted account {}", released, id);
        }

        Ok(result.rows_affected > 0)
    }

    /// Counts accounts for every role, including roles nobody holds.
    pub async fn count_by_role(&self) -> Result<Vec<(String, u64)>, AppError> {
        let mut counts = Vec::with_capacity(Role::ALL.len());

        for role in Role::ALL {
            let count = entity::prelude::User::find()
                .filter(entity::user::Column::Role.eq(role.as_str()))
                .count(self.db)
                .await?;
            counts.push((role.as_str().to_string(), count));
        }

        Ok(counts)
    }

    /// Matches users by email or name for the command palette.
    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<SearchHit>, AppError> {
        let entities = entity::prelude::User::find()
            .filter(matches_text(text))
            .order_by_asc(entity::user::Column::LastName)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|user| SearchHit {
                kind: SearchHitKind::User,
                id: user.id,
                title: format!("{} {}", user.first_name, user.last_name),
                subtitle: Some(user.email),
            })
            .collect())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn matches_text(text: &str) -> Condition {
    Condition::any()
        .add(entity::user::Column::Email.like(contains_pattern(text)))
        .add(entity::user::Column::FirstName.like(contains_pattern(text)))
        .add(entity::user::Column::LastName.like(contains_pattern(text)))
}
