//! Accommodation application data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use crate::{
    model::application::ApplicationStatus,
    server::{
        error::AppError,
        model::application::{
            Application, ApplicationFilter, ApplicationReview, CreateApplicationParams,
        },
    },
};

pub struct ApplicationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending application.
    pub async fn create(&self, params: CreateApplicationParams) -> Result<Application, AppError> {
        let now = Utc::now();

        let entity = entity::accommodation_application::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            faculty_id: ActiveValue::Set(params.faculty_id),
            dormitory_id: ActiveValue::Set(params.dormitory_id),
            course: ActiveValue::Set(params.course),
            comment: ActiveValue::Set(params.comment),
            status: ActiveValue::Set(ApplicationStatus::Pending.as_str().to_string()),
            review_comment: ActiveValue::Set(None),
            reviewed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Application::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Application>, AppError> {
        let entity = entity::prelude::AccommodationApplication::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Application::from_entity).transpose()
    }

    /// Gets a student's applications, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Application>, AppError> {
        entity::prelude::AccommodationApplication::find()
            .filter(entity::accommodation_application::Column::UserId.eq(user_id))
            .order_by_desc(entity::accommodation_application::Column::CreatedAt)
            .order_by_desc(entity::accommodation_application::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Application::from_entity)
            .collect()
    }

    /// Checks if a student has an application still under review.
    pub async fn has_open(&self, user_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::AccommodationApplication::find()
            .filter(entity::accommodation_application::Column::UserId.eq(user_id))
            .filter(
                entity::accommodation_application::Column::Status
                    .is_in(ApplicationStatus::OPEN.map(ApplicationStatus::as_str)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Gets applications matching the filter with pagination, newest first.
    ///
    /// An empty `dormitory_ids` list matches nothing, so a manager without dormitories
    /// only sees applications awaiting assignment.
    pub async fn get_paginated(
        &self,
        filter: &ApplicationFilter,
    ) -> Result<(Vec<Application>, u64), AppError> {
        use entity::accommodation_application::Column;

        let mut query = entity::prelude::AccommodationApplication::find();

        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }
        if let Some(faculty_id) = filter.faculty_id {
            query = query.filter(Column::FacultyId.eq(faculty_id));
        }
        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(Column::DormitoryId.eq(dormitory_id));
        }
        if let Some(dormitory_ids) = &filter.dormitory_ids {
            let mut scope =
                Condition::any().add(Column::DormitoryId.is_in(dormitory_ids.iter().copied()));
            if filter.include_unassigned {
                scope = scope.add(
                    Condition::all()
                        .add(Column::DormitoryId.is_null())
                        .add(Column::Status.eq(ApplicationStatus::ApprovedByFaculty.as_str())),
                );
            }
            query = query.filter(scope);
        }

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(self.db, filter.page.per_page);

        let total = paginator.num_items().await?;
        let applications = paginator
            .fetch_page(filter.page.page)
            .await?
            .into_iter()
            .map(Application::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((applications, total))
    }

    /// Persists a review: new status, reviewer, comment and optionally the assigned dormitory.
    ///
    /// The row is only written while it is still in `review.from`, so two reviewers acting
    /// on the same application cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(Some(Application))` - Updated application
    /// - `Ok(None)` - No application with that id
    /// - `Err(AppError::Conflict)` - Application no longer in `review.from`
    pub async fn apply_review(
        &self,
        review: ApplicationReview,
    ) -> Result<Option<Application>, AppError> {
        use entity::accommodation_application::Column;

        let txn = self.db.begin().await?;

        let mut update = entity::prelude::AccommodationApplication::update_many()
            .col_expr(Column::Status, Expr::value(review.status.as_str()))
            .col_expr(Column::ReviewComment, Expr::value(review.review_comment))
            .col_expr(Column::ReviewedBy, Expr::value(review.reviewed_by))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(dormitory_id) = review.dormitory_id {
            update = update.col_expr(Column::DormitoryId, Expr::value(dormitory_id));
        }
        let result = update
            .filter(Column::Id.eq(review.id))
            .filter(Column::Status.eq(review.from.as_str()))
            .exec(&txn)
            .await?;

        let entity = entity::prelude::AccommodationApplication::find_by_id(review.id)
            .one(&txn)
            .await?;
        txn.commit().await?;

        match entity {
            None => Ok(None),
            Some(_) if result.rows_affected == 0 => Err(AppError::Conflict(format!(
                "Application {} is no longer {}",
                review.id, review.from
            ))),
            Some(entity) => Application::from_entity(entity).map(Some),
        }
    }

    /// Counts applications for every status, including statuses nobody holds.
    pub async fn count_by_status(&self) -> Result<Vec<(String, u64)>, AppError> {
        let mut counts = Vec::with_capacity(ApplicationStatus::ALL.len());

        for status in ApplicationStatus::ALL {
            let count = entity::prelude::AccommodationApplication::find()
                .filter(entity::accommodation_application::Column::Status.eq(status.as_str()))
                .count(self.db)
                .await?;
            counts.push((status.as_str().to_string(), count));
        }

        Ok(counts)
    }
}
