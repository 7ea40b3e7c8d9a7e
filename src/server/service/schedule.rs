//! Settlement schedule management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{dormitory::DormitoryRepository, faculty::FacultyRepository, schedule::ScheduleRepository},
    error::AppError,
    middleware::auth::{authorize, Permission},
    model::{
        schedule::{ScheduleEntry, ScheduleEntryParams, ScheduleFilter},
        user::User,
    },
};

pub struct ScheduleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ScheduleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: ScheduleFilter) -> Result<Vec<ScheduleEntry>, AppError> {
        ScheduleRepository::new(self.db).list(&filter).await
    }

    /// Adds a settlement slot to a dormitory the caller manages.
    pub async fn create(
        &self,
        actor: &User,
        params: ScheduleEntryParams,
    ) -> Result<ScheduleEntry, AppError> {
        self.check_references(&params).await?;
        authorize(
            self.db,
            actor,
            &[Permission::DormitoryManager(params.dormitory_id)],
        )
        .await?;

        ScheduleRepository::new(self.db).create(params).await
    }

    /// Updates a slot. The caller must manage both the current and the new dormitory.
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        params: ScheduleEntryParams,
    ) -> Result<ScheduleEntry, AppError> {
        let entry = self.find(id).await?;
        self.check_references(&params).await?;
        authorize(
            self.db,
            actor,
            &[
                Permission::DormitoryManager(entry.dormitory_id),
                Permission::DormitoryManager(params.dormitory_id),
            ],
        )
        .await?;

        ScheduleRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule entry {} not found", id)))
    }

    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let entry = self.find(id).await?;
        authorize(
            self.db,
            actor,
            &[Permission::DormitoryManager(entry.dormitory_id)],
        )
        .await?;

        ScheduleRepository::new(self.db).delete(id).await?;
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<ScheduleEntry, AppError> {
        ScheduleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Schedule entry {} not found", id)))
    }

    async fn check_references(&self, params: &ScheduleEntryParams) -> Result<(), AppError> {
        if DormitoryRepository::new(self.db)
            .find_by_id(params.dormitory_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Dormitory {} does not exist",
                params.dormitory_id
            )));
        }
        if let Some(faculty_id) = params.faculty_id {
            if FacultyRepository::new(self.db)
                .find_by_id(faculty_id)
                .await?
                .is_none()
            {
                return Err(AppError::BadRequest(format!(
                    "Faculty {} does not exist",
                    faculty_id
                )));
            }
        }
        Ok(())
    }
}
