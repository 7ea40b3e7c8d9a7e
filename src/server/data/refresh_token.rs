//! Refresh token persistence.
//!
//! Only the token identifier (`jti`) is stored. A refresh token is usable while its row
//! exists, is not revoked and has not expired.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter,
};

use crate::server::error::AppError;

pub struct RefreshTokenRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RefreshTokenRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a newly issued refresh token.
    pub async fn create(
        &self,
        user_id: i32,
        jti: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        entity::refresh_token::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            jti: ActiveValue::Set(jti),
            expires_at: ActiveValue::Set(expires_at),
            revoked: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Checks whether a token is known, unrevoked and unexpired.
    pub async fn is_active(&self, jti: &str) -> Result<bool, AppError> {
        let count = entity::prelude::RefreshToken::find()
            .filter(active(jti))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Revokes a token if it is still active.
    ///
    /// The check and the update are a single statement, so two concurrent refreshes with
    /// the same token cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - The token was active and is now revoked
    /// - `Ok(false)` - Unknown, already revoked or expired
    pub async fn revoke(&self, jti: &str) -> Result<bool, AppError> {
        let result = entity::prelude::RefreshToken::update_many()
            .filter(active(jti))
            .col_expr(
                entity::refresh_token::Column::Revoked,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Revokes every refresh token of a user. Used after a password change.
    pub async fn revoke_all_for_user(&self, user_id: i32) -> Result<u64, AppError> {
        let result = entity::prelude::RefreshToken::update_many()
            .filter(entity::refresh_token::Column::UserId.eq(user_id))
            .filter(entity::refresh_token::Column::Revoked.eq(false))
            .col_expr(
                entity::refresh_token::Column::Revoked,
                sea_orm::sea_query::Expr::value(true),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes revoked tokens and tokens that expired before `now`.
    pub async fn delete_stale(&self, now: DateTime<Utc>) -> Result<u64, AppError> {
        let result = entity::prelude::RefreshToken::delete_many()
            .filter(
                Condition::any()
                    .add(entity::refresh_token::Column::Revoked.eq(true))
                    .add(entity::refresh_token::Column::ExpiresAt.lte(now)),
            )
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn active(jti: &str) -> Condition {
    Condition::all()
        .add(entity::refresh_token::Column::Jti.eq(jti))
        .add(entity::refresh_token::Column::Revoked.eq(false))
        .add(entity::refresh_token::Column::ExpiresAt.gt(Utc::now()))
}
