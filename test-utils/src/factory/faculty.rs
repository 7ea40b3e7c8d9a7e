//! Faculty factory for creating test faculty entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test faculties with customizable fields.
pub struct FacultyFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    short_name: String,
}

impl<'a> FacultyFactory<'a> {
    /// Creates a new FacultyFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Faculty {id}"`
    /// - short_name: `"F{id}"`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Faculty {}", id),
            short_name: format!("F{}", id),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// Builds and inserts the faculty entity into the database.
    pub async fn build(self) -> Result<entity::faculty::Model, DbErr> {
        entity::faculty::ActiveModel {
            name: ActiveValue::Set(self.name),
            short_name: ActiveValue::Set(self.short_name),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a faculty with default values.
pub async fn create_faculty(db: &DatabaseConnection) -> Result<entity::faculty::Model, DbErr> {
    FacultyFactory::new(db).build().await
}
