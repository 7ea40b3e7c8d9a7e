//! Student group data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, QuerySelect,
};

use crate::{
    model::search::SearchHitKind,
    server::{
        error::AppError,
        model::{
            faculty::{GroupParams, StudentGroup},
            search::SearchHit,
        },
        util::pattern::contains_pattern,
    },
};

pub struct GroupRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, faculty_id: i32, params: GroupParams) -> Result<StudentGroup, AppError> {
        let entity = entity::student_group::ActiveModel {
            faculty_id: ActiveValue::Set(faculty_id),
            name: ActiveValue::Set(params.name.trim().to_string()),
            course: ActiveValue::Set(params.course),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(StudentGroup::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<StudentGroup>, AppError> {
        let entity = entity::prelude::StudentGroup::find_by_id(id)
            .one(self.db)
            .await?;

        Ok(entity.map(StudentGroup::from_entity))
    }

    /// Gets the groups of a faculty ordered by course, then name.
    pub async fn get_by_faculty(&self, faculty_id: i32) -> Result<Vec<StudentGroup>, AppError> {
        let entities = entity::prelude::StudentGroup::find()
            .filter(entity::student_group::Column::FacultyId.eq(faculty_id))
            .order_by_asc(entity::student_group::Column::Course)
            .order_by_asc(entity::student_group::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(StudentGroup::from_entity).collect())
    }

    pub async fn update(&self, id: i32, params: GroupParams) -> Result<Option<StudentGroup>, AppError> {
        let Some(entity) = entity::prelude::StudentGroup::find_by_id(id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active = entity.into_active_model();
        active.name = ActiveValue::Set(params.name.trim().to_string());
        active.course = ActiveValue::Set(params.course);

        Ok(Some(StudentGroup::from_entity(active.update(self.db).await?)))
    }

    /// Deletes a group. Members keep their account with no group.
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::StudentGroup::delete_by_id(id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn search(&self, text: &str, limit: u64) -> Result<Vec<SearchHit>, AppError> {
        let entities = entity::prelude::StudentGroup::find()
            .filter(entity::student_group::Column::Name.like(contains_pattern(text)))
            .order_by_asc(entity::student_group::Column::Name)
            .limit(limit)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|group| SearchHit {
                kind: SearchHitKind::Group,
                id: group.id,
                title: group.name,
                subtitle: Some(format!("Course {}", group.course)),
            })
            .collect())
    }
}
