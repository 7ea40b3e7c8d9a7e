//! Dormitory data repository.
//!
//! Dormitories are always returned with their room totals, so every read loads the
//! dormitory's rooms alongside it.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, LoaderTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::search::SearchHitKind,
    server::{
        error::AppError,
        model::{
            dormitory::{Dormitory, DormitoryParams},
            search::SearchHit,
        },
        util::pattern::contains_pattern,
    },
};

pub struct DormitoryRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DormitoryRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: DormitoryParams) -> Result<Dormitory, AppError> {
        let entity = entity::dormitory::ActiveModel {
            name: ActiveValue::Set(params.name.trim().to_string()),
            address: ActiveValue::Set(params.address.trim().to_string()),
            manager_id: ActiveValue::Set(params.manager_id),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Dormitory::from_entity_with_rooms(entity, &[]))
    }

    /// Finds a dormitory with its room totals.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Dormitory>, AppError> {
        let Some(entity) = entity::prelude::Dormitory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let rooms = entity::prelude::Room::find()
            .filter(entity::room::Column::DormitoryId.eq(id))
            .all(self.db)
            .await?;

        Ok(Some(Dormitory::from_entity_with_rooms(entity, &rooms)))
    }

    /// Gets every dormitory with room totals, ordered by name.
    ///
    /// Rooms are loaded in a second query so the name order of the first one is kept.
    pub async fn get_all(&self) -> Result<Vec<Dormitory>, AppError> {
        let dormitories = entity::prelude::Dormitory::find()
            .order_by_asc(entity::dormitory::Column::Name)
            .order_by_asc(entity::dormitory::Column::Id)
            .all(self.db)
            .await?;
        let rooms = dormitories.load_many(entity::prelude::Room, self.db).await?;

        Ok(dormitories
            .into_iter()
            .zip(rooms)
            .map(|(dormitory, rooms)| Dormitory::from_entity_with_rooms(dormitory, &rooms))
            .collect())
    }

    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query = entity::prelude::Dormitory::find()
            .filter(entity::dormitory::Column::Name.eq(name.trim()));
        if let Some(id) = exclude_id {
            query = query.filter(entity::dormitory::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    pub async fn update(
        &self,
        id: i32,
        params: DormitoryParams,
    ) -> Result<Option<Dormitory>, AppError> {
        let Some(entity) = entity::prelude::Dormitory::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.name = ActiveValue::Set(params.name.trim().to_string());
        active.address = ActiveValue::Set(params.address.trim().to_string());
        active.manager_id = ActiveValue::Set(params.manager_id);
        active.update(self.db).await?;

        self.find_by_id(id).await
    }

    /// Deletes a dormitory together with its rooms, reservations, agreements and schedule.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Dormitory::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Ids of the dormitories a user manages.
    pub async fn managed_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        let ids = entity::prelude::Dormitory::find()
            .select_only()
            .column(entity::dormitory::Column::Id)
            .filter(entity::dormitory::Column::ManagerId.eq(user_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await?;

        Ok(ids)
    }

    /// Checks if `user_id` is the manager of dormitory `dormitory_id`.
    pub async fn is_managed_by(&self, dormitory_id: i32, user_id: i32) -> Result<bool, AppError> {
        let count = entity::prelude::Dormitory::find()
            .filter(entity::dormitory::Column::Id.eq(dormitory_id))
            .filter(entity::dormitory::Column::ManagerId.eq(user_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<SearchHit>, AppError> {
        let entities = entity::prelude::Dormitory::find()
            .filter(
                Condition::any()
                    .add(entity::dormitory::Column::Name.like(contains_pattern(text)))
                    .add(entity::dormitory::Column::Address.like(contains_pattern(text))),
            )
            .order_by_asc(entity::dormitory::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|dormitory| SearchHit {
                kind: SearchHitKind::Dormitory,
                id: dormitory.id,
                title: dormitory.name,
                subtitle: Some(dormitory.address),
            })
            .collect())
    }
}
