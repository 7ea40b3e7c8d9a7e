//! Room management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{dormitory::DormitoryRepository, room::RoomRepository},
    error::AppError,
    model::{
        pagination::Paginated,
        room::{Room, RoomFilter, RoomParams},
    },
};

pub struct RoomService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: RoomFilter) -> Result<Paginated<Room>, AppError> {
        let page = filter.page;
        let (rooms, total) = RoomRepository::new(self.db).get_paginated(&filter).await?;

        Ok(Paginated::new(rooms, total, page))
    }

    pub async fn get(&self, id: i32) -> Result<Room, AppError> {
        RoomRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))
    }

    /// Adds a room to a dormitory.
    ///
    /// # Returns
    /// - `Err(AppError::NotFound)` - Dormitory does not exist
    /// - `Err(AppError::Conflict)` - Room number already used in the dormitory
    pub async fn create(&self, dormitory_id: i32, params: RoomParams) -> Result<Room, AppError> {
        if DormitoryRepository::new(self.db)
            .find_by_id(dormitory_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound(format!(
                "Dormitory {} not found",
                dormitory_id
            )));
        }

        let repo = RoomRepository::new(self.db);
        if repo.number_exists(dormitory_id, &params.number, None).await? {
            return Err(duplicate_number(&params.number));
        }

        repo.create(dormitory_id, params).await
    }

    /// Updates a room.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - New capacity is below the current occupancy
    /// - `Err(AppError::Conflict)` - Room number already used in the dormitory
    pub async fn update(&self, id: i32, params: RoomParams) -> Result<Room, AppError> {
        let room = self.get(id).await?;
        if params.capacity < room.occupied {
            return Err(AppError::BadRequest(format!(
                "Capacity {} is below the {} current occupants",
                params.capacity, room.occupied
            )));
        }

        let repo = RoomRepository::new(self.db);
        if repo
            .number_exists(room.dormitory_id, &params.number, Some(id))
            .await?
        {
            return Err(duplicate_number(&params.number));
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))
    }

    /// Deletes a room nobody lives in.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - Room still has occupants
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        let room = self.get(id).await?;
        if room.occupied > 0 {
            return Err(AppError::Conflict(
                "Room still has occupants and cannot be deleted".to_string(),
            ));
        }

        RoomRepository::new(self.db).delete(id).await?;
        Ok(())
    }
}

fn duplicate_number(number: &str) -> AppError {
    AppError::Conflict(format!(
        "Room {} already exists in this dormitory",
        number.trim()
    ))
}
