//! Dormitory factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test dormitories.
pub struct DormitoryFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    address: String,
    manager_id: Option<i32>,
}

impl<'a> DormitoryFactory<'a> {
    /// Creates a new DormitoryFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Dormitory {id}"`
    /// - address: `"{id} Campus Street"`
    /// - no manager
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Dormitory {}", id),
            address: format!("{} Campus Street", id),
            manager_id: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn manager_id(mut self, manager_id: i32) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    /// Builds and inserts the dormitory entity into the database.
    pub async fn build(self) -> Result<entity::dormitory::Model, DbErr> {
        entity::dormitory::ActiveModel {
            name: ActiveValue::Set(self.name),
            address: ActiveValue::Set(self.address),
            manager_id: ActiveValue::Set(self.manager_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an unmanaged dormitory with default values.
pub async fn create_dormitory(db: &DatabaseConnection) -> Result<entity::dormitory::Model, DbErr> {
    DormitoryFactory::new(db).build().await
}
