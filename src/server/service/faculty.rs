//! Faculty and student group management.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{faculty::FacultyRepository, group::GroupRepository},
    error::AppError,
    model::faculty::{Faculty, FacultyParams, GroupParams, StudentGroup},
};

pub struct FacultyService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FacultyService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> Result<Vec<Faculty>, AppError> {
        FacultyRepository::new(self.db).get_all().await
    }

    pub async fn get(&self, id: i32) -> Result<Faculty, AppError> {
        FacultyRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {} not found", id)))
    }

    /// # Returns
    /// - `Err(AppError::Conflict)` - Another faculty has the same name
    pub async fn create(&self, params: FacultyParams) -> Result<Faculty, AppError> {
        let repo = FacultyRepository::new(self.db);
        if repo.name_exists(&params.name, None).await? {
            return Err(AppError::Conflict(format!(
                "Faculty '{}' already exists",
                params.name.trim()
            )));
        }

        repo.create(params).await
    }

    pub async fn update(&self, id: i32, params: FacultyParams) -> Result<Faculty, AppError> {
        let repo = FacultyRepository::new(self.db);
        if repo.name_exists(&params.name, Some(id)).await? {
            return Err(AppError::Conflict(format!(
                "Faculty '{}' already exists",
                params.name.trim()
            )));
        }

        repo.update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Faculty {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> Result<(), AppError> {
        if !FacultyRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Faculty {} not found", id)));
        }
        Ok(())
    }

    /// Gets the groups of an existing faculty.
    pub async fn list_groups(&self, faculty_id: i32) -> Result<Vec<StudentGroup>, AppError> {
        self.get(faculty_id).await?;

        GroupRepository::new(self.db).get_by_faculty(faculty_id).await
    }

    pub async fn get_group(&self, id: i32) -> Result<StudentGroup, AppError> {
        GroupRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    pub async fn create_group(
        &self,
        faculty_id: i32,
        params: GroupParams,
    ) -> Result<StudentGroup, AppError> {
        self.get(faculty_id).await?;

        GroupRepository::new(self.db).create(faculty_id, params).await
    }

    pub async fn update_group(&self, id: i32, params: GroupParams) -> Result<StudentGroup, AppError> {
        GroupRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Group {} not found", id)))
    }

    pub async fn delete_group(&self, id: i32) -> Result<(), AppError> {
        if !GroupRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Group {} not found", id)));
        }
        Ok(())
    }
}
