//! Faculty data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::search::SearchHitKind,
    server::{
        error::AppError,
        model::{
            faculty::{Faculty, FacultyParams},
            search::SearchHit,
        },
        util::pattern::contains_pattern,
    },
};

pub struct FacultyRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FacultyRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, params: FacultyParams) -> Result<Faculty, AppError> {
        let entity = entity::faculty::ActiveModel {
            name: ActiveValue::Set(params.name.trim().to_string()),
            short_name: ActiveValue::Set(params.short_name.trim().to_string()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Faculty::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Faculty>, AppError> {
        let entity = entity::prelude::Faculty::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Faculty::from_entity))
    }

    /// Gets every faculty ordered by name.
    pub async fn get_all(&self) -> Result<Vec<Faculty>, AppError> {
        let entities = entity::prelude::Faculty::find()
            .order_by_asc(entity::faculty::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Faculty::from_entity).collect())
    }

    /// Checks if another faculty already uses `name`.
    ///
    /// # Arguments
    /// - `name` - Name to check
    /// - `exclude_id` - Faculty being updated, ignored in the check
    pub async fn name_exists(&self, name: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query = entity::prelude::Faculty::find()
            .filter(entity::faculty::Column::Name.eq(name.trim()));
        if let Some(id) = exclude_id {
            query = query.filter(entity::faculty::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// # Returns
    /// - `Ok(Some(Faculty))` - Updated faculty
    /// - `Ok(None)` - No faculty with that id
    pub async fn update(&self, id: i32, params: FacultyParams) -> Result<Option<Faculty>, AppError> {
        let Some(entity) = entity::prelude::Faculty::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.name = ActiveValue::Set(params.name.trim().to_string());
        active.short_name = ActiveValue::Set(params.short_name.trim().to_string());

        Ok(Some(Faculty::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a faculty. Its groups, applications and schedule entries cascade.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Faculty::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<SearchHit>, AppError> {
        let entities = entity::prelude::Faculty::find()
            .filter(
                Condition::any()
                    .add(entity::faculty::Column::Name.like(contains_pattern(text)))
                    .add(entity::faculty::Column::ShortName.like(contains_pattern(text))),
            )
            .order_by_asc(entity::faculty::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|faculty| SearchHit {
                kind: SearchHitKind::Faculty,
                id: faculty.id,
                title: faculty.name,
                subtitle: Some(faculty.short_name),
            })
            .collect())
    }
}
