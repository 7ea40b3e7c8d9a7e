//! Room reservation workflow.
//!
//! A reservation is pending until the room's dormitory manager confirms or rejects it,
//! then moves through check-in and check-out. Confirmation is capacity checked; check-in
//! and check-out adjust the room's occupancy in the same transaction as the status.

use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

use crate::{
    model::{reservation::ReservationStatus, user::Role},
    server::{
        data::{
            dormitory::DormitoryRepository, reservation::ReservationRepository,
            room::RoomRepository,
        },
        error::{auth::AuthError, AppError},
        middleware::auth::{authorize, Permission},
        model::{
            pagination::Paginated,
            reservation::{CreateReservationParams, Reservation, ReservationActor, ReservationFilter},
            room::Room,
            user::User,
        },
    },
};

pub struct ReservationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Books a room for a student.
    ///
    /// # Arguments
    /// - `student` - Student making the reservation
    /// - `params` - Room and date range
    /// - `today` - Current date; the stay may not start before it
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Pending reservation
    /// - `Err(AppError::BadRequest)` - Stay starts in the past
    /// - `Err(AppError::NotFound)` - Room does not exist
    /// - `Err(AppError::Conflict)` - Room not bookable, or student already has an active reservation
    pub async fn create(
        &self,
        student: &User,
        params: CreateReservationParams,
        today: NaiveDate,
    ) -> Result<Reservation, AppError> {
        if params.start_date < today {
            return Err(AppError::BadRequest(
                "start_date must not be in the past".to_string(),
            ));
        }

        let room = self.room(params.room_id).await?;
        if !room.is_bookable() {
            return Err(AppError::Conflict(format!(
                "Room {} is not available for booking",
                room.number
            )));
        }

        let repo = ReservationRepository::new(self.db);
        if repo.has_active(student.id).await? {
            return Err(AppError::Conflict(
                "You already have an active reservation".to_string(),
            ));
        }

        let reservation = repo
            .create(CreateReservationParams {
                user_id: student.id,
                ..params
            })
            .await?;

        tracing::info!(
            "Student {} reserved room {} (reservation {})",
            student.id,
            reservation.room_id,
            reservation.id
        );

        Ok(reservation)
    }

    pub async fn my(&self, user: &User) -> Result<Vec<Reservation>, AppError> {
        ReservationRepository::new(self.db).find_by_user(user.id).await
    }

    /// Lists reservations for administrators, or a manager's dormitories.
    pub async fn list(
        &self,
        actor: &User,
        mut filter: ReservationFilter,
    ) -> Result<Paginated<Reservation>, AppError> {
        match actor.role {
            Role::Admin | Role::Superadmin => {}
            Role::DormManager => {
                filter.dormitory_ids =
                    Some(DormitoryRepository::new(self.db).managed_ids(actor.id).await?);
            }
            _ => {
                return Err(AuthError::AccessDenied(
                    actor.id,
                    "role may not list reservations".to_string(),
                )
                .into())
            }
        }

        let page = filter.page;
        let (reservations, total) = ReservationRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        Ok(Paginated::new(reservations, total, page))
    }

    /// Gets one reservation for its owner, an administrator or the room's manager.
    pub async fn get(&self, actor: &User, id: i32) -> Result<Reservation, AppError> {
        let reservation = self.find(id).await?;

        if reservation.user_id != actor.id {
            let room = self.room(reservation.room_id).await?;
            authorize(
                self.db,
                actor,
                &[Permission::DormitoryManager(room.dormitory_id)],
            )
            .await?;
        }

        Ok(reservation)
    }

    /// Moves a reservation along one edge of the transition table.
    ///
    /// # Returns
    /// - `Ok(Reservation)` - Updated reservation
    /// - `Err(AppError::BadRequest)` - Edge not in the table
    /// - `Err(AuthError::AccessDenied)` - Caller may not take this edge
    /// - `Err(AppError::Conflict)` - Confirming or checking in beyond the room's capacity, or
    ///   the reservation was moved by a concurrent request
    pub async fn change_status(
        &self,
        actor: &User,
        id: i32,
        status: ReservationStatus,
        comment: Option<String>,
    ) -> Result<Reservation, AppError> {
        let reservation = self.find(id).await?;
        let from = reservation.status;

        let Some(required) = from.transition_actor(status) else {
            return Err(AppError::BadRequest(format!(
                "Cannot change reservation status from {} to {}",
                from, status
            )));
        };

        let room = self.room(reservation.room_id).await?;
        let is_owner = reservation.user_id == actor.id;
        if required == ReservationActor::Manager || !is_owner {
            authorize(
                self.db,
                actor,
                &[Permission::DormitoryManager(room.dormitory_id)],
            )
            .await?;
        }

        let repo = ReservationRepository::new(self.db);
        if status == ReservationStatus::Confirmed {
            let holding = repo.count_holding_place(room.id).await?;
            if holding >= room.capacity.max(0) as u64 {
                return Err(AppError::Conflict(format!(
                    "Room {} is fully booked",
                    room.number
                )));
            }
        }

        let updated = repo
            .update_status(id, from, status, comment)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))?;

        tracing::info!(
            "User {} moved reservation {} from {} to {}",
            actor.id,
            id,
            from,
            status
        );

        Ok(updated)
    }

    async fn find(&self, id: i32) -> Result<Reservation, AppError> {
        ReservationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reservation {} not found", id)))
    }

    async fn room(&self, id: i32) -> Result<Room, AppError> {
        RoomRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))
    }
}
