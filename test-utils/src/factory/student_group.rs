//! Student group factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test student groups within a faculty.
pub struct StudentGroupFactory<'a> {
    db: &'a DatabaseConnection,
    faculty_id: i32,
    name: String,
    course: i16,
}

impl<'a> StudentGroupFactory<'a> {
    /// Creates a new StudentGroupFactory with default values.
    ///
    /// Defaults:
    /// - name: `"G-{id}"`
    /// - course: `1`
    pub fn new(db: &'a DatabaseConnection, faculty_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            faculty_id,
            name: format!("G-{}", id),
            course: 1,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn course(mut self, course: i16) -> Self {
        self.course = course;
        self
    }

    /// Builds and inserts the group entity into the database.
    pub async fn build(self) -> Result<entity::student_group::Model, DbErr> {
        entity::student_group::ActiveModel {
            faculty_id: ActiveValue::Set(self.faculty_id),
            name: ActiveValue::Set(self.name),
            course: ActiveValue::Set(self.course),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a first-course group in the given faculty.
pub async fn create_group(
    db: &DatabaseConnection,
    faculty_id: i32,
) -> Result<entity::student_group::Model, DbErr> {
    StudentGroupFactory::new(db, faculty_id).build().await
}
