//! Settlement agreement data repository.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    model::agreement::AgreementStatus,
    server::{
        error::AppError,
        model::agreement::{contract_number, Agreement, AgreementFilter, AgreementParams},
        util::random::random_alphanumeric,
    },
};

pub struct AgreementRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AgreementRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts an agreement awaiting review and assigns its contract number.
    ///
    /// The contract number embeds the row id, so the row is inserted with a placeholder
    /// and renumbered inside the same transaction.
    pub async fn create(&self, user_id: i32, params: AgreementParams) -> Result<Agreement, AppError> {
        let now = Utc::now();
        let txn = self.db.begin().await?;

        let entity = entity::settlement_agreement::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            dormitory_id: ActiveValue::Set(params.dormitory_id),
            room_id: ActiveValue::Set(params.room_id),
            contract_number: ActiveValue::Set(format!("PENDING-{}", random_alphanumeric(16))),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            passport_number: ActiveValue::Set(params.passport_number.trim().to_string()),
            status: ActiveValue::Set(AgreementStatus::PendingReview.as_str().to_string()),
            review_comment: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let number = contract_number(entity.created_at, entity.id);
        let mut active = entity.into_active_model();
        active.contract_number = ActiveValue::Set(number);
        let entity = active.update(&txn).await?;

        txn.commit().await?;

        Agreement::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Agreement>, AppError> {
        let entity = entity::prelude::SettlementAgreement::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Agreement::from_entity).transpose()
    }

    /// Gets a student's agreements, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Agreement>, AppError> {
        entity::prelude::SettlementAgreement::find()
            .filter(entity::settlement_agreement::Column::UserId.eq(user_id))
            .order_by_desc(entity::settlement_agreement::Column::CreatedAt)
            .order_by_desc(entity::settlement_agreement::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Agreement::from_entity)
            .collect()
    }

    pub async fn get_paginated(
        &self,
        filter: &AgreementFilter,
    ) -> Result<(Vec<Agreement>, u64), AppError> {
        use entity::settlement_agreement::Column;

        let mut query = entity::prelude::SettlementAgreement::find();

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(Column::DormitoryId.eq(dormitory_id));
        }
        if let Some(dormitory_ids) = &filter.dormitory_ids {
            query = query.filter(Column::DormitoryId.is_in(dormitory_ids.iter().copied()));
        }

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(self.db, filter.page.per_page);

        let total = paginator.num_items().await?;
        let agreements = paginator
            .fetch_page(filter.page.page)
            .await?
            .into_iter()
            .map(Agreement::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((agreements, total))
    }

    /// Replaces the student-editable fields.
    pub async fn update(&self, id: i32, params: AgreementParams) -> Result<Option<Agreement>, AppError> {
        let Some(entity) = entity::prelude::SettlementAgreement::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.dormitory_id = ActiveValue::Set(params.dormitory_id);
        active.room_id = ActiveValue::Set(params.room_id);
        active.start_date = ActiveValue::Set(params.start_date);
        active.end_date = ActiveValue::Set(params.end_date);
        active.passport_number = ActiveValue::Set(params.passport_number.trim().to_string());
        active.updated_at = ActiveValue::Set(Utc::now());

        Agreement::from_entity(active.update(self.db).await?).map(Some)
    }

    /// Moves an agreement from `from` to `status`, replacing the review comment when set.
    ///
    /// # Returns
    /// - `Ok(Some(Agreement))` - Updated agreement
    /// - `Ok(None)` - No agreement with that id
    /// - `Err(AppError::Conflict)` - Agreement no longer in `from`
    pub async fn update_status(
        &self,
        id: i32,
        from: AgreementStatus,
        status: AgreementStatus,
        review_comment: Option<String>,
    ) -> Result<Option<Agreement>, AppError> {
        use entity::settlement_agreement::Column;

        let txn = self.db.begin().await?;

        let mut update = entity::prelude::SettlementAgreement::update_many()
            .col_expr(Column::Status, Expr::value(status.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(review_comment) = review_comment {
            update = update.col_expr(Column::ReviewComment, Expr::value(review_comment));
        }
        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from.as_str()))
            .exec(&txn)
            .await?;

        let entity = entity::prelude::SettlementAgreement::find_by_id(id)
            .one(&txn)
            .await?;
        txn.commit().await?;

        match entity {
            None => Ok(None),
            Some(_) if result.rows_affected == 0 => Err(AppError::Conflict(format!(
                "Agreement {} is no longer {}",
                id, from
            ))),
            Some(entity) => Agreement::from_entity(entity).map(Some),
        }
    }

    /// Archives approved agreements whose end date is before `today`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of agreements archived
    pub async fn archive_expired(&self, today: NaiveDate) -> Result<u64, AppError> {
        use entity::settlement_agreement::Column;

        let result = entity::prelude::SettlementAgreement::update_many()
            .col_expr(Column::Status, Expr::value(AgreementStatus::Archived.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(Column::Status.eq(AgreementStatus::Approved.as_str()))
            .filter(Column::EndDate.lt(today))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
