//! Dormitory event factory.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating dormitory events.
pub struct EventFactory<'a> {
    db: &'a DatabaseConnection,
    created_by: i32,
    title: String,
    starts_at: DateTime<Utc>,
    dormitory_id: Option<i32>,
}

impl<'a> EventFactory<'a> {
    /// Creates a new EventFactory.
    ///
    /// Defaults: title `"Event {id}"`, starts in three days, campus-wide.
    pub fn new(db: &'a DatabaseConnection, created_by: i32) -> Self {
        Self {
            db,
            created_by,
            title: format!("Event {}", next_id()),
            starts_at: Utc::now() + Duration::days(3),
            dormitory_id: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn starts_at(mut self, starts_at: DateTime<Utc>) -> Self {
        self.starts_at = starts_at;
        self
    }

    pub fn dormitory_id(mut self, dormitory_id: i32) -> Self {
        self.dormitory_id = Some(dormitory_id);
        self
    }

    /// Builds and inserts the event into the database.
    pub async fn build(self) -> Result<entity::event::Model, DbErr> {
        entity::event::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(None),
            location: ActiveValue::Set(None),
            starts_at: ActiveValue::Set(self.starts_at),
            ends_at: ActiveValue::Set(None),
            dormitory_id: ActiveValue::Set(self.dormitory_id),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
