//! Accommodation application factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test accommodation applications.
pub struct ApplicationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    faculty_id: i32,
    dormitory_id: Option<i32>,
    course: i16,
    status: String,
}

impl<'a> ApplicationFactory<'a> {
    /// Creates a new ApplicationFactory.
    ///
    /// Defaults: course `1`, status `"pending"`, no preferred dormitory.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, faculty_id: i32) -> Self {
        Self {
            db,
            user_id,
            faculty_id,
            dormitory_id: None,
            course: 1,
            status: "pending".to_string(),
        }
    }

    pub fn dormitory_id(mut self, dormitory_id: i32) -> Self {
        self.dormitory_id = Some(dormitory_id);
        self
    }

    pub fn course(mut self, course: i16) -> Self {
        self.course = course;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the application entity into the database.
    pub async fn build(self) -> Result<entity::accommodation_application::Model, DbErr> {
        let now = Utc::now();
        entity::accommodation_application::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            faculty_id: ActiveValue::Set(self.faculty_id),
            dormitory_id: ActiveValue::Set(self.dormitory_id),
            course: ActiveValue::Set(self.course),
            comment: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            review_comment: ActiveValue::Set(None),
            reviewed_by: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
