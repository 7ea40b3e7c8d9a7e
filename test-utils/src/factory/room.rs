//! Room factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test rooms inside a dormitory.
pub struct RoomFactory<'a> {
    db: &'a DatabaseConnection,
    dormitory_id: i32,
    number: String,
    floor: i16,
    capacity: i16,
    occupied: i16,
    monthly_rent: i32,
    status: String,
}

impl<'a> RoomFactory<'a> {
    /// Creates a new RoomFactory with default values.
    ///
    /// Defaults:
    /// - number: `"{id}"`, floor `1`
    /// - capacity `2`, occupied `0`
    /// - monthly_rent `1000`
    /// - status `"available"`
    pub fn new(db: &'a DatabaseConnection, dormitory_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            dormitory_id,
            number: id.to_string(),
            floor: 1,
            capacity: 2,
            occupied: 0,
            monthly_rent: 1000,
            status: "available".to_string(),
        }
    }

    pub fn number(mut self, number: impl Into<String>) -> Self {
        self.number = number.into();
        self
    }

    pub fn floor(mut self, floor: i16) -> Self {
        self.floor = floor;
        self
    }

    pub fn capacity(mut self, capacity: i16) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn occupied(mut self, occupied: i16) -> Self {
        self.occupied = occupied;
        self
    }

    /// Sets the status string: `"available"`, `"maintenance"` or `"closed"`.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the room entity into the database.
    pub async fn build(self) -> Result<entity::room::Model, DbErr> {
        entity::room::ActiveModel {
            dormitory_id: ActiveValue::Set(self.dormitory_id),
            number: ActiveValue::Set(self.number),
            floor: ActiveValue::Set(self.floor),
            capacity: ActiveValue::Set(self.capacity),
            occupied: ActiveValue::Set(self.occupied),
            monthly_rent: ActiveValue::Set(self.monthly_rent),
            status: ActiveValue::Set(self.status),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an available two-place room in the given dormitory.
pub async fn create_room(
    db: &DatabaseConnection,
    dormitory_id: i32,
) -> Result<entity::room::Model, DbErr> {
    RoomFactory::new(db, dormitory_id).build().await
}
