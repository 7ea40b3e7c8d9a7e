//! Settlement schedule data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::schedule::{ScheduleEntry, ScheduleEntryParams, ScheduleFilter},
};

pub struct ScheduleRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduleRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: ScheduleEntryParams) -> Result<ScheduleEntry, AppError> {
        let entity = entity::settlement_schedule::ActiveModel {
            dormitory_id: ActiveValue::Set(params.dormitory_id),
            faculty_id: ActiveValue::Set(params.faculty_id),
            course: ActiveValue::Set(params.course),
            date: ActiveValue::Set(params.date),
            start_time: ActiveValue::Set(params.start_time),
            end_time: ActiveValue::Set(params.end_time),
            note: ActiveValue::Set(params.note),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ScheduleEntry::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<ScheduleEntry>, AppError> {
        let entity = entity::prelude::SettlementSchedule::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(ScheduleEntry::from_entity))
    }

    /// Lists entries ordered by date, then start time.
    ///
    /// A faculty filter also matches entries open to every faculty.
    pub async fn list(&self, filter: &ScheduleFilter) -> Result<Vec<ScheduleEntry>, AppError> {
        use entity::settlement_schedule::Column;

        let mut query = entity::prelude::SettlementSchedule::find();

        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(Column::DormitoryId.eq(dormitory_id));
        }
        if let Some(faculty_id) = filter.faculty_id {
            query = query.filter(
                sea_orm::Condition::any()
                    .add(Column::FacultyId.eq(faculty_id))
                    .add(Column::FacultyId.is_null()),
            );
        }
        if let Some(from) = filter.from {
            query = query.filter(Column::Date.gte(from));
        }

        let entities = query
            .order_by_asc(Column::Date)
            .order_by_asc(Column::StartTime)
            .order_by_asc(Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(ScheduleEntry::from_entity).collect())
    }

    pub async fn update(
        &self,
        id: i32,
        params: ScheduleEntryParams,
    ) -> Result<Option<ScheduleEntry>, AppError> {
        let Some(entity) = entity::prelude::SettlementSchedule::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.dormitory_id = ActiveValue::Set(params.dormitory_id);
        active.faculty_id = ActiveValue::Set(params.faculty_id);
        active.course = ActiveValue::Set(params.course);
        active.date = ActiveValue::Set(params.date);
        active.start_time = ActiveValue::Set(params.start_time);
        active.end_time = ActiveValue::Set(params.end_time);
        active.note = ActiveValue::Set(params.note);

        Ok(Some(ScheduleEntry::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::SettlementSchedule::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
