//! Accommodation application workflow.
//!
//! Applications move through faculty review, then dormitory review, then settlement.
//! Every status change is looked up in the transition table on `ApplicationStatus`; the
//! table names which actor may take the edge and this service checks the caller against
//! the application's faculty or dormitory.

use sea_orm::DatabaseConnection;

use crate::{
    model::{application::ApplicationStatus, user::Role},
    server::{
        data::{
            application::ApplicationRepository, dormitory::DormitoryRepository,
            faculty::FacultyRepository,
        },
        error::{auth::AuthError, AppError},
        middleware::auth::{authorize, Permission},
        model::{
            application::{
                Application, ApplicationFilter, ApplicationReview, CreateApplicationParams,
                ReviewActor,
            },
            pagination::Paginated,
            user::User,
        },
    },
};

/// Input for a student filing an application.
#[derive(Debug, Clone)]
pub struct ApplyParams {
    /// Defaults to the student's faculty.
    pub faculty_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    pub course: i16,
    pub comment: Option<String>,
}

/// Requested status change.
#[derive(Debug, Clone)]
pub struct StatusChange {
    pub status: ApplicationStatus,
    pub comment: Option<String>,
    pub dormitory_id: Option<i32>,
}

pub struct ApplicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApplicationService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Files a new application for a student.
    ///
    /// # Returns
    /// - `Ok(Application)` - Pending application
    /// - `Err(AppError::BadRequest)` - No faculty given or known, or unknown dormitory
    /// - `Err(AppError::Conflict)` - Student already has an open application
    pub async fn apply(&self, student: &User, params: ApplyParams) -> Result<Application, AppError> {
        let faculty_id = params
            .faculty_id
            .or(student.faculty_id)
            .ok_or_else(|| AppError::BadRequest("faculty_id is required".to_string()))?;

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
        if let Some(dormitory_id) = params.dormitory_id {
            self.require_dormitory(dormitory_id).await?;
        }

        let repo = ApplicationRepository::new(self.db);
        if repo.has_open(student.id).await? {
            return Err(AppError::Conflict(
                "You already have an application under review".to_string(),
            ));
        }

        let application = repo
            .create(CreateApplicationParams {
                user_id: student.id,
                faculty_id,
                dormitory_id: params.dormitory_id,
                course: params.course,
                comment: params.comment,
            })
            .await?;

        tracing::info!(
            "Student {} filed application {}",
            student.id,
            application.id
        );

        Ok(application)
    }

    pub async fn my(&self, user: &User) -> Result<Vec<Application>, AppError> {
        ApplicationRepository::new(self.db).find_by_user(user.id).await
    }

    /// Lists applications visible to the caller.
    ///
    /// Administrators and the student council head see all applications, dean office
    /// staff see their faculty's, dorm managers see those for dormitories they manage plus
    /// faculty-approved applications that still need a dormitory.
    pub async fn list(
        &self,
        actor: &User,
        mut filter: ApplicationFilter,
    ) -> Result<Paginated<Application>, AppError> {
        match actor.role {
            Role::Admin | Role::Superadmin | Role::StudentCouncilHead => {}
            Role::FacultyDeanOffice => {
                let faculty_id = actor.faculty_id.ok_or_else(|| {
                    AuthError::AccessDenied(actor.id, "dean office account has no faculty".to_string())
                })?;
                filter.faculty_id = Some(faculty_id);
            }
            Role::DormManager => {
                let ids = DormitoryRepository::new(self.db).managed_ids(actor.id).await?;
                filter.dormitory_ids = Some(ids);
                filter.include_unassigned = true;
            }
            _ => {
                return Err(AuthError::AccessDenied(
                    actor.id,
                    "role may not list applications".to_string(),
                )
                .into())
            }
        }

        let page = filter.page;
        let (applications, total) = ApplicationRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        Ok(Paginated::new(applications, total, page))
    }

    /// Gets one application for its owner or anyone who may list it.
    pub async fn get(&self, actor: &User, id: i32) -> Result<Application, AppError> {
        let application = self.find(id).await?;

        if application.user_id == actor.id || self.can_view(actor, &application).await? {
            return Ok(application);
        }

        Err(AuthError::AccessDenied(actor.id, format!("cannot view application {}", id)).into())
    }

    /// Moves an application along one edge of the transition table.
    ///
    /// During dormitory review a manager (or administrator) may assign a dormitory to an
    /// application that did not request one by passing `dormitory_id`.
    ///
    /// # Returns
    /// - `Ok(Application)` - Updated application with reviewer recorded
    /// - `Err(AppError::NotFound)` - No application with that id
    /// - `Err(AppError::BadRequest)` - Edge not in the table, or no dormitory to review for
    /// - `Err(AuthError::AccessDenied)` - Caller may not take this edge
    pub async fn change_status(
        &self,
        actor: &User,
        id: i32,
        change: StatusChange,
    ) -> Result<Application, AppError> {
        let application = self.find(id).await?;
        let from = application.status;
        let to = change.status;

        let Some(required) = from.transition_actor(to) else {
            return Err(AppError::BadRequest(format!(
                "Cannot change application status from {} to {}",
                from, to
            )));
        };

        let mut assigned_dormitory = None;
        match required {
            ReviewActor::FacultyStaff => {
                authorize(
                    self.db,
                    actor,
                    &[Permission::FacultyStaff(application.faculty_id)],
                )
                .await?;
            }
            ReviewActor::DormManager => {
                let dormitory_id = match (application.dormitory_id, change.dormitory_id) {
                    (Some(current), Some(requested)) if current != requested => {
                        return Err(AppError::BadRequest(
                            "Application already has a dormitory assigned".to_string(),
                        ));
                    }
                    (Some(current), _) => current,
                    (None, Some(requested)) => {
                        self.require_dormitory(requested).await?;
                        assigned_dormitory = Some(requested);
                        requested
                    }
                    (None, None) => {
                        return Err(AppError::BadRequest(
                            "dormitory_id is required to review this application".to_string(),
                        ));
                    }
                };

                authorize(self.db, actor, &[Permission::DormitoryManager(dormitory_id)]).await?;
            }
            ReviewActor::Applicant => {
                if application.user_id != actor.id && !actor.is_admin() {
                    return Err(AuthError::AccessDenied(
                        actor.id,
                        format!("only the applicant may cancel application {}", id),
                    )
                    .into());
                }
            }
        }

        let updated = ApplicationRepository::new(self.db)
            .apply_review(ApplicationReview {
                id,
                from,
                status: to,
                review_comment: change.comment,
                reviewed_by: actor.id,
                dormitory_id: assigned_dormitory,
            })
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))?;

        tracing::info!(
            "User {} moved application {} from {} to {}",
            actor.id,
            id,
            from,
            to
        );

        Ok(updated)
    }

    async fn find(&self, id: i32) -> Result<Application, AppError> {
        ApplicationRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Application {} not found", id)))
    }

    async fn can_view(&self, actor: &User, application: &Application) -> Result<bool, AppError> {
        Ok(match actor.role {
            Role::Admin | Role::Superadmin | Role::StudentCouncilHead => true,
            Role::FacultyDeanOffice => actor.faculty_id == Some(application.faculty_id),
            Role::DormManager => match application.dormitory_id {
                Some(dormitory_id) => {
                    DormitoryRepository::new(self.db)
                        .is_managed_by(dormitory_id, actor.id)
                        .await?
                }
                None => application.status == ApplicationStatus::ApprovedByFaculty,
            },
            _ => false,
        })
    }

    async fn require_dormitory(&self, dormitory_id: i32) -> Result<(), AppError> {
        if DormitoryRepository::new(self.db)
            .find_by_id(dormitory_id)
            .await?
            .is_none()
        {
            return Err(AppError::BadRequest(format!(
                "Dormitory {} does not exist",
                dormitory_id
            )));
        }
        Ok(())
    }
}
