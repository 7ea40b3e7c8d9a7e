//! Dormitory domain models.

use crate::model::dormitory::DormitoryDto;

/// Dormitory with room totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Dormitory {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub manager_id: Option<i32>,
    pub room_count: u64,
    pub total_capacity: i64,
    pub occupied: i64,
}

impl Dormitory {
    /// Builds a dormitory from its entity and the rooms that belong to it.
    pub fn from_entity_with_rooms(
        entity: entity::dormitory::Model,
        rooms: &[entity::room::Model],
    ) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            address: entity.address,
            manager_id: entity.manager_id,
            room_count: rooms.len() as u64,
            total_capacity: rooms.iter().map(|r| i64::from(r.capacity)).sum(),
            occupied: rooms.iter().map(|r| i64::from(r.occupied)).sum(),
        }
    }

    pub fn free_places(&self) -> i64 {
        (self.total_capacity - self.occupied).max(0)
    }

    pub fn into_dto(self) -> DormitoryDto {
        DormitoryDto {
            free_places: self.free_places(),
            id: self.id,
            name: self.name,
            address: self.address,
            manager_id: self.manager_id,
            room_count: self.room_count,
            total_capacity: self.total_capacity,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DormitoryParams {
    pub name: String,
    pub address: String,
    pub manager_id: Option<i32>,
}
