//! Room domain models.

use crate::{
    model::dormitory::{RoomDto, RoomStatus},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::PageRequest,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: i32,
    pub dormitory_id: i32,
    pub number: String,
    pub floor: i16,
    pub capacity: i16,
    pub occupied: i16,
    pub monthly_rent: i32,
    pub status: RoomStatus,
}

impl Room {
    pub fn from_entity(entity: entity::room::Model) -> Result<Self, AppError> {
        let status = entity
            .status
            .parse::<RoomStatus>()
            .map_err(InternalError::from)?;

        Ok(Self {
            id: entity.id,
            dormitory_id: entity.dormitory_id,
            number: entity.number,
            floor: entity.floor,
            capacity: entity.capacity,
            occupied: entity.occupied,
            monthly_rent: entity.monthly_rent,
            status,
        })
    }

    pub fn free_places(&self) -> i16 {
        (self.capacity - self.occupied).max(0)
    }

    /// Open for new reservations: available status and at least one free place.
    pub fn is_bookable(&self) -> bool {
        self.status == RoomStatus::Available && self.free_places() > 0
    }

    pub fn into_dto(self) -> RoomDto {
        RoomDto {
            free_places: self.free_places(),
            id: self.id,
            dormitory_id: self.dormitory_id,
            number: self.number,
            floor: self.floor,
            capacity: self.capacity,
            occupied: self.occupied,
            monthly_rent: self.monthly_rent,
            status: self.status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RoomParams {
    pub number: String,
    pub floor: i16,
    pub capacity: i16,
    pub monthly_rent: i32,
    pub status: RoomStatus,
}

#[derive(Debug, Clone, Default)]
pub struct RoomFilter {
    pub dormitory_id: Option<i32>,
    pub floor: Option<i16>,
    pub available_only: bool,
    pub page: PageRequest,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(capacity: i16, occupied: i16, status: RoomStatus) -> Room {
        Room {
            id: 1,
            dormitory_id: 1,
            number: "101".to_string(),
            floor: 1,
            capacity,
            occupied,
            monthly_rent: 1000,
            status,
        }
    }

    #[test]
    fn room_with_free_place_is_bookable() {
        assert!(room(2, 1, RoomStatus::Available).is_bookable());
    }

    #[test]
    fn full_room_is_not_bookable() {
        let full = room(2, 2, RoomStatus::Available);
        assert_eq!(full.free_places(), 0);
        assert!(!full.is_bookable());
    }

    #[test]
    fn room_under_maintenance_is_not_bookable() {
        assert!(!room(3, 0, RoomStatus::Maintenance).is_bookable());
    }
}
