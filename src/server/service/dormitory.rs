//! Dormitory management.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{dormitory::DormitoryRepository, room::RoomRepository, user::UserRepository},
        error::AppError,
        model::dormitory::{Dormitory, DormitoryParams},
    },
};

pub struct DormitoryService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DormitoryService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Dormitory>, AppError> {
        DormitoryRepository::new(self.db).get_all().await
    }

    pub async fn get(&self, id: i32) -> Result<Dormitory, AppError> {
        DormitoryRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Dormitory {} not found", id)))
    }

    /// # Returns
    /// - `Err(AppError::Conflict)` - Another dormitory has the same name
    /// - `Err(AppError::BadRequest)` - Manager is not a dorm_manager account
    pub async fn create(&self, params: DormitoryParams) -> Result<Dormitory, AppError> {
        let repo = DormitoryRepository::new(self.db);
        if repo.name_exists(&params.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Dormitory '{}' already exists",
                params.name.trim()
            )));
        }
        self.check_manager(params.manager_id).await?;

        repo.create(params).await
    }

    pub async fn update(&self, id: i32, params: DormitoryParams) -> Result<Dormitory, AppError> {
        let repo = DormitoryRepository::new(self.db);
        if repo.name_exists(&params.name, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "Dormitory '{}' already exists",
                params.name.trim()
            )));
        }
        self.check_manager(params.manager_id).await?;

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Dormitory {} not found", id)))
    }

    /// Deletes a dormitory together with its rooms.
    ///
    /// # Returns
    /// - `Err(AppError::Conflict)` - A room of the dormitory still has occupants
    /// - `Err(AppError::NotFound)` - No dormitory with that id
    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if RoomRepository::new(self.db).has_occupants_in(id).await? {
            return Err(AppError::Conflict(
                "Dormitory still has occupied rooms and cannot be deleted".to_string(),
            ));
        }

        if !DormitoryRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Dormitory {} not found", id)));
        }
        Ok(())
    }

    async fn check_manager(&self, manager_id: Option<i32>) -> Result<(), AppError> {
        let Some(manager_id) = manager_id else {
            return Ok(());
        };

        match UserRepository::new(self.db).find_by_id(manager_id).await? {
            Some(user) if user.role == Role::DormManager => Ok(()),
            Some(_) => Err(AppError::BadRequest(format!(
                "User {} is not a dormitory manager",
                manager_id
            ))),
            None => Err(AppError::BadRequest(format!(
                "User {} does not exist",
                manager_id
            ))),
        }
    }
}
