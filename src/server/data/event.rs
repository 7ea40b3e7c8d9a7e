//! Dormitory event data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder,
};

use crate::server::{
    error::AppError,
    model::event::{Event, EventFilter, EventParams},
};

pub struct EventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, created_by: i32, params: EventParams) -> Result<Event, AppError> {
        let entity = entity::event::ActiveModel {
            title: ActiveValue::Set(params.title.trim().to_string()),
            description: ActiveValue::Set(params.description),
            location: ActiveValue::Set(params.location),
            starts_at: ActiveValue::Set(params.starts_at),
            ends_at: ActiveValue::Set(params.ends_at),
            dormitory_id: ActiveValue::Set(params.dormitory_id),
            created_by: ActiveValue::Set(created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Event::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Event>, AppError> {
        let entity = entity::prelude::Event::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Event::from_entity))
    }

    /// Lists events ordered by start time.
    pub async fn list(&self, filter: &EventFilter) -> Result<Vec<Event>, AppError> {
        let mut query = entity::prelude::Event::find();

        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(entity::event::Column::DormitoryId.eq(dormitory_id));
        }
        if let Some(after) = filter.starting_after {
            query = query.filter(entity::event::Column::StartsAt.gte(after));
        }

        let entities = query
            .order_by_asc(entity::event::Column::StartsAt)
            .order_by_asc(entity::event::Column::Id)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Event::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: EventParams) -> Result<Option<Event>, AppError> {
        let Some(entity) = entity::prelude::Event::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.title = ActiveValue::Set(params.title.trim().to_string());
        active.description = ActiveValue::Set(params.description);
        active.location = ActiveValue::Set(params.location);
        active.starts_at = ActiveValue::Set(params.starts_at);
        active.ends_at = ActiveValue::Set(params.ends_at);
        active.dormitory_id = ActiveValue::Set(params.dormitory_id);

        Ok(Some(Event::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Event::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }
}
