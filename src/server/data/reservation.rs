//! Room reservation data repository.
//!
//! Status changes that move a student in or out of a room update the room's `occupied`
//! count in the same transaction as the reservation row.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    sea_query::{Expr, ExprTrait, Query},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};

use crate::{
    model::reservation::ReservationStatus,
    server::{
        error::AppError,
        model::reservation::{CreateReservationParams, Reservation, ReservationFilter},
    },
};

pub struct ReservationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a pending reservation.
    pub async fn create(&self, params: CreateReservationParams) -> Result<Reservation, AppError> {
        let now = Utc::now();

        let entity = entity::room_reservation::ActiveModel {
            user_id: ActiveValue::Set(params.user_id),
            room_id: ActiveValue::Set(params.room_id),
            start_date: ActiveValue::Set(params.start_date),
            end_date: ActiveValue::Set(params.end_date),
            status: ActiveValue::Set(ReservationStatus::Pending.as_str().to_string()),
            comment: ActiveValue::Set(params.comment),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Reservation::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Reservation>, AppError> {
        let entity = entity::prelude::RoomReservation::find_by_id(id)
            .one(self.db)
            .await?;

        entity.map(Reservation::from_entity).transpose()
    }

    /// Gets a student's reservations, newest first.
    pub async fn find_by_user(&self, user_id: i32) -> Result<Vec<Reservation>, AppError> {
        entity::prelude::RoomReservation::find()
            .filter(entity::room_reservation::Column::UserId.eq(user_id))
            .order_by_desc(entity::room_reservation::Column::CreatedAt)
            .order_by_desc(entity::room_reservation::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect()
    }

    /// Checks if a student holds a pending, confirmed or checked-in reservation.
    pub async fn has_active(&self, user_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::RoomReservation::find()
            .filter(entity::room_reservation::Column::UserId.eq(user_id))
            .filter(
                entity::room_reservation::Column::Status
                    .is_in(ReservationStatus::ACTIVE.map(ReservationStatus::as_str)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Counts reservations of a room that hold a place (confirmed or checked in).
    pub async fn count_holding_place(&self, room_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::RoomReservation::find()
            .filter(entity::room_reservation::Column::RoomId.eq(room_id))
            .filter(
                entity::room_reservation::Column::Status
                    .is_in(ReservationStatus::HOLDING_PLACE.map(ReservationStatus::as_str)),
            )
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Gets reservations matching the filter with pagination, newest first.
    ///
    /// Dormitory filters are resolved through the reserved room.
    pub async fn get_paginated(
        &self,
        filter: &ReservationFilter,
    ) -> Result<(Vec<Reservation>, u64), AppError> {
        let mut query = entity::prelude::RoomReservation::find();

        if let Some(status) = filter.status {
            query = query.filter(entity::room_reservation::Column::Status.eq(status.as_str()));
        }
        if let Some(room_id) = filter.room_id {
            query = query.filter(entity::room_reservation::Column::RoomId.eq(room_id));
        }
        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(rooms_in(&[dormitory_id]));
        }
        if let Some(dormitory_ids) = &filter.dormitory_ids {
            query = query.filter(rooms_in(dormitory_ids));
        }

        let paginator = query
            .order_by_desc(entity::room_reservation::Column::CreatedAt)
            .order_by_desc(entity::room_reservation::Column::Id)
            .paginate(self.db, filter.page.per_page);

        let total = paginator.num_items().await?;
        let reservations = paginator
            .fetch_page(filter.page.page)
            .await?
            .into_iter()
            .map(Reservation::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((reservations, total))
    }

    /// Moves a reservation from `from` to `status`, adjusting room occupancy for check-in
    /// and check-out.
    ///
    /// The status write only matches a row still in `from`, so of two concurrent requests
    /// taking the same edge exactly one succeeds. The occupancy update is guarded in SQL so
    /// `occupied` never exceeds `capacity` and never drops below zero.
    ///
    /// # Arguments
    /// - `id` - Reservation id
    /// - `from` - Status the caller read and validated the transition against
    /// - `status` - New status
    /// - `comment` - Replaces the stored comment when set
    ///
    /// # Returns
    /// - `Ok(Some(Reservation))` - Updated reservation
    /// - `Ok(None)` - No reservation with that id
    /// - `Err(AppError::Conflict)` - Reservation no longer in `from`, check-in on a full
    ///   room, or check-out from an empty one; nothing was changed
    /// - `Err(AppError::DbErr)` - Database error; nothing was changed
    pub async fn update_status(
        &self,
        id: i32,
        from: ReservationStatus,
        status: ReservationStatus,
        comment: Option<String>,
    ) -> Result<Option<Reservation>, AppError> {
        use entity::room_reservation::Column;

        let txn = self.db.begin().await?;

        let Some(entity) = entity::prelude::RoomReservation::find_by_id(id)
            .one(&txn)
            .await?
        else {
            return Ok(None);
        };

        let mut update = entity::prelude::RoomReservation::update_many()
            .col_expr(Column::Status, Expr::value(status.as_str()))
            .col_expr(Column::UpdatedAt, Expr::value(Utc::now()));
        if let Some(comment) = comment {
            update = update.col_expr(Column::Comment, Expr::value(comment));
        }
        let result = update
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(from.as_str()))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::Conflict(format!(
                "Reservation {} is no longer {}",
                id, from
            )));
        }

        let delta = status.occupancy_delta();
        if delta != 0 {
            let guard = if delta > 0 {
                Expr::col(entity::room::Column::Occupied)
                    .lt(Expr::col(entity::room::Column::Capacity))
            } else {
                Expr::col(entity::room::Column::Occupied).gt(0)
            };

            let result = entity::prelude::Room::update_many()
                .col_expr(
                    entity::room::Column::Occupied,
                    Expr::col(entity::room::Column::Occupied).add(delta),
                )
                .filter(entity::room::Column::Id.eq(entity.room_id))
                .filter(guard)
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Err(AppError::Conflict(if delta > 0 {
                    "Room has no free places".to_string()
                } else {
                    "Room has no occupants to check out".to_string()
                }));
            }
        }

        let entity = entity::prelude::RoomReservation::find_by_id(id)
            .one(&txn)
            .await?;

        txn.commit().await?;

        entity.map(Reservation::from_entity).transpose()
    }

    /// Releases the places held by a student's checked-in reservations.
    ///
    /// Called inside the account deletion transaction, before the reservations cascade.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of places released
    pub async fn release_checked_in<C>(conn: &C, user_id: i32) -> Result<u64, AppError>
    where
        C: ConnectionTrait,
    {
        let room_ids: Vec<i32> = entity::prelude::RoomReservation::find()
            .select_only()
            .column(entity::room_reservation::Column::RoomId)
            .filter(entity::room_reservation::Column::UserId.eq(user_id))
            .filter(
                entity::room_reservation::Column::Status
                    .eq(ReservationStatus::CheckedIn.as_str()),
            )
            .into_tuple()
            .all(conn)
            .await?;

        let mut released = 0;
        for room_id in room_ids {
            let result = entity::prelude::Room::update_many()
                .col_expr(
                    entity::room::Column::Occupied,
                    Expr::col(entity::room::Column::Occupied).sub(1),
                )
                .filter(entity::room::Column::Id.eq(room_id))
                .filter(Expr::col(entity::room::Column::Occupied).gt(0))
                .exec(conn)
                .await?;
            released += result.rows_affected;
        }

        Ok(released)
    }

    /// Cancels pending reservations whose start date is before `today`.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of reservations cancelled
    pub async fn cancel_stale_pending(&self, today: NaiveDate) -> Result<u64, AppError> {
        let result = entity::prelude::RoomReservation::update_many()
            .col_expr(
                entity::room_reservation::Column::Status,
                Expr::value(ReservationStatus::Cancelled.as_str()),
            )
            .col_expr(
                entity::room_reservation::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(
                entity::room_reservation::Column::Status.eq(ReservationStatus::Pending.as_str()),
            )
            .filter(entity::room_reservation::Column::StartDate.lt(today))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn rooms_in(dormitory_ids: &[i32]) -> sea_orm::Condition {
    sea_orm::Condition::all().add(
        entity::room_reservation::Column::RoomId.in_subquery(
            Query::select()
                .column(entity::room::Column::Id)
                .from(entity::room::Entity)
                .and_where(entity::room::Column::DormitoryId.is_in(dormitory_ids.iter().copied()))
                .to_owned(),
        ),
    )
}
