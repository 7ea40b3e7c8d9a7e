//! Room reservation domain models and the status transition table.

use chrono::{DateTime, NaiveDate, Utc};

use crate::{
    model::reservation::{ReservationDto, ReservationStatus},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::PageRequest,
    },
};

/// Who, besides administrators, may move a reservation along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationActor {
    /// Manager of the room's dormitory.
    Manager,
    /// The reserving student or the manager.
    OwnerOrManager,
}

impl ReservationStatus {
    /// Statuses that hold a student's single active reservation.
    pub const ACTIVE: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
    ];

    /// Statuses that count against a room's capacity.
    pub const HOLDING_PLACE: [ReservationStatus; 2] =
        [ReservationStatus::Confirmed, ReservationStatus::CheckedIn];

    pub fn transition_actor(self, to: ReservationStatus) -> Option<ReservationActor> {
        use ReservationStatus::*;

        match (self, to) {
            (Pending, Confirmed | Rejected) => Some(ReservationActor::Manager),
            (Confirmed, CheckedIn) => Some(ReservationActor::Manager),
            (CheckedIn, CheckedOut) => Some(ReservationActor::Manager),
            (Pending | Confirmed, Cancelled) => Some(ReservationActor::OwnerOrManager),
            _ => None,
        }
    }

    /// Change to the room's `occupied` count when a reservation enters this status.
    pub fn occupancy_delta(self) -> i16 {
        match self {
            ReservationStatus::CheckedIn => 1,
            ReservationStatus::CheckedOut => -1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    pub id: i32,
    pub user_id: i32,
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: ReservationStatus,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn from_entity(entity: entity::room_reservation::Model) -> Result<Self, AppError> {
        let status = entity
            .status
            .parse::<ReservationStatus>()
            .map_err(InternalError::from)?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            room_id: entity.room_id,
            start_date: entity.start_date,
            end_date: entity.end_date,
            status,
            comment: entity.comment,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> ReservationDto {
        ReservationDto {
            id: self.id,
            user_id: self.user_id,
            room_id: self.room_id,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            comment: self.comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateReservationParams {
    pub user_id: i32,
    pub room_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub status: Option<ReservationStatus>,
    pub room_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    pub dormitory_ids: Option<Vec<i32>>,
    pub page: PageRequest,
}
