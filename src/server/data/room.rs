//! Room data repository.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::{dormitory::RoomStatus, search::SearchHitKind},
    server::{
        error::AppError,
        model::{
            room::{Room, RoomFilter, RoomParams},
            search::SearchHit,
        },
        util::pattern::contains_pattern,
    },
};

pub struct RoomRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoomRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a room with no occupants.
    pub async fn create(&self, dormitory_id: i32, params: RoomParams) -> Result<Room, AppError> {
        let entity = entity::room::ActiveModel {
            dormitory_id: ActiveValue::Set(dormitory_id),
            number: ActiveValue::Set(params.number.trim().to_string()),
            floor: ActiveValue::Set(params.floor),
            capacity: ActiveValue::Set(params.capacity),
            occupied: ActiveValue::Set(0),
            monthly_rent: ActiveValue::Set(params.monthly_rent),
            status: ActiveValue::Set(params.status.as_str().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Room::from_entity(entity)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Room>, AppError> {
        let entity = entity::prelude::Room::find_by_id(id).one(self.db).await?;

        entity.map(Room::from_entity).transpose()
    }

    /// Checks if a dormitory already has a room with this number.
    ///
    /// # Arguments
    /// - `dormitory_id` - Dormitory to check within
    /// - `number` - Room number
    /// - `exclude_id` - Room being updated, ignored in the check
    pub async fn number_exists(
        &self,
        dormitory_id: i32,
        number: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, AppError> {
        let mut query = entity::prelude::Room::find()
            .filter(entity::room::Column::DormitoryId.eq(dormitory_id))
            .filter(entity::room::Column::Number.eq(number.trim()));
        if let Some(id) = exclude_id {
            query = query.filter(entity::room::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets rooms matching the filter with pagination, ordered by dormitory, floor and number.
    ///
    /// With `available_only`, only rooms whose status is available and that have at least
    /// one free place are returned.
    pub async fn get_paginated(&self, filter: &RoomFilter) -> Result<(Vec<Room>, u64), AppError> {
        let mut query = entity::prelude::Room::find();

        if let Some(dormitory_id) = filter.dormitory_id {
            query = query.filter(entity::room::Column::DormitoryId.eq(dormitory_id));
        }
        if let Some(floor) = filter.floor {
            query = query.filter(entity::room::Column::Floor.eq(floor));
        }
        if filter.available_only {
            query = query
                .filter(entity::room::Column::Status.eq(RoomStatus::Available.as_str()))
                .filter(
                    Expr::col(entity::room::Column::Occupied)
                        .lt(Expr::col(entity::room::Column::Capacity)),
                );
        }

        let paginator = query
            .order_by_asc(entity::room::Column::DormitoryId)
            .order_by_asc(entity::room::Column::Floor)
            .order_by_asc(entity::room::Column::Number)
            .paginate(self.db, filter.page.per_page);

        let total = paginator.num_items().await?;
        let rooms = paginator
            .fetch_page(filter.page.page)
            .await?
            .into_iter()
            .map(Room::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((rooms, total))
    }

    /// Updates a room's descriptive fields. Occupancy is only changed by check-in and check-out.
    pub async fn update(&self, id: i32, params: RoomParams) -> Result<Option<Room>, AppError> {
        let Some(entity) = entity::prelude::Room::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.number = ActiveValue::Set(params.number.trim().to_string());
        active.floor = ActiveValue::Set(params.floor);
        active.capacity = ActiveValue::Set(params.capacity);
        active.monthly_rent = ActiveValue::Set(params.monthly_rent);
        active.status = ActiveValue::Set(params.status.as_str().to_string());

        Room::from_entity(active.update(self.db).await?).map(Some)
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Room::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Checks if any room of the dormitory has occupants.
    pub async fn has_occupants_in(&self, dormitory_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Room::find()
            .filter(entity::room::Column::DormitoryId.eq(dormitory_id))
            .filter(entity::room::Column::Occupied.gt(0))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Room count, total capacity and occupied places across all dormitories.
    pub async fn totals(&self) -> Result<(u64, i64, i64), AppError> {
        let rows = entity::prelude::Room::find()
            .select_only()
            .column(entity::room::Column::Capacity)
            .column(entity::room::Column::Occupied)
            .into_tuple::<(i16, i16)>()
            .all(self.db)
            .await?;

        let capacity = rows.iter().map(|(c, _)| i64::from(*c)).sum();
        let occupied = rows.iter().map(|(_, o)| i64::from(*o)).sum();

        Ok((rows.len() as u64, capacity, occupied))
    }

    /// Matches rooms by number. Hits carry the dormitory name as subtitle.
    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<SearchHit>, AppError> {
        let results = entity::prelude::Room::find()
            .filter(entity::room::Column::Number.like(contains_pattern(text)))
            .find_also_related(entity::prelude::Dormitory)
            .order_by_asc(entity::room::Column::Number)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(results
            .into_iter()
            .map(|(room, dormitory)| SearchHit {
                kind: SearchHitKind::Room,
                id: room.id,
                title: format!("Room {}", room.number),
                subtitle: dormitory.map(|d| d.name),
            })
            .collect())
    }
}
