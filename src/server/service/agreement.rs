//! Settlement agreement workflow.

use sea_orm::DatabaseConnection;

use crate::{
    model::{agreement::AgreementStatus, user::Role},
    server::{
        data::{
            agreement::AgreementRepository, dormitory::DormitoryRepository, room::RoomRepository,
        },
        error::{auth::AuthError, AppError},
        middleware::auth::{authorize, Permission},
        model::{
            agreement::{Agreement, AgreementFilter, AgreementParams},
            pagination::Paginated,
            user::User,
        },
    },
};

pub struct AgreementService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AgreementService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Submits an agreement for review.
    ///
    /// # Returns
    /// - `Ok(Agreement)` - Agreement awaiting review with its contract number
    /// - `Err(AppError::BadRequest)` - Unknown dormitory, or room outside the dormitory
    pub async fn create(&self, student: &User, params: AgreementParams) -> Result<Agreement, AppError> {
        self.check_placement(&params).await?;

        let agreement = AgreementRepository::new(self.db)
            .create(student.id, params)
            .await?;

        tracing::info!(
            "Student {} submitted agreement {}",
            student.id,
            agreement.contract_number
        );

        Ok(agreement)
    }

    /// Edits an agreement while it awaits review.
    ///
    /// # Returns
    /// - `Err(AuthError::AccessDenied)` - Caller is neither the owner nor an administrator
    /// - `Err(AppError::Conflict)` - Agreement was already reviewed
    pub async fn update(
        &self,
        actor: &User,
        id: i32,
        params: AgreementParams,
    ) -> Result<Agreement, AppError> {
        let agreement = self.find(id).await?;
        if agreement.user_id != actor.id && !actor.is_admin() {
            return Err(AuthError::AccessDenied(
                actor.id,
                format!("cannot edit agreement {}", id),
            )
            .into());
        }
        if agreement.status != AgreementStatus::PendingReview {
            return Err(AppError::Conflict(
                "Only agreements awaiting review can be edited".to_string(),
            ));
        }

        self.check_placement(&params).await?;

        AgreementRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agreement {} not found", id)))
    }

    pub async fn my(&self, user: &User) -> Result<Vec<Agreement>, AppError> {
        AgreementRepository::new(self.db).find_by_user(user.id).await
    }

    /// Lists agreements for administrators, or a manager's dormitories.
    pub async fn list(
        &self,
        actor: &User,
        mut filter: AgreementFilter,
    ) -> Result<Paginated<Agreement>, AppError> {
        match actor.role {
            Role::Admin | Role::Superadmin => {}
            Role::DormManager => {
                filter.dormitory_ids =
                    Some(DormitoryRepository::new(self.db).managed_ids(actor.id).await?);
            }
            _ => {
                return Err(AuthError::AccessDenied(
                    actor.id,
                    "role may not list agreements".to_string(),
                )
                .into())
            }
        }

        let page = filter.page;
        let (agreements, total) = AgreementRepository::new(self.db)
            .get_paginated(&filter)
            .await?;

        Ok(Paginated::new(agreements, total, page))
    }

    pub async fn get(&self, actor: &User, id: i32) -> Result<Agreement, AppError> {
        let agreement = self.find(id).await?;

        if agreement.user_id != actor.id {
            authorize(
                self.db,
                actor,
                &[Permission::DormitoryManager(agreement.dormitory_id)],
            )
            .await?;
        }

        Ok(agreement)
    }

    /// Reviews or archives an agreement.
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Transition not allowed
    /// - `Err(AuthError::AccessDenied)` - Caller does not manage the agreement's dormitory
    pub async fn change_status(
        &self,
        actor: &User,
        id: i32,
        status: AgreementStatus,
        comment: Option<String>,
    ) -> Result<Agreement, AppError> {
        let agreement = self.find(id).await?;
        let from = agreement.status;

        if !from.can_transition_to(status) {
            return Err(AppError::BadRequest(format!(
                "Cannot change agreement status from {} to {}",
                from, status
            )));
        }

        authorize(
            self.db,
            actor,
            &[Permission::DormitoryManager(agreement.dormitory_id)],
        )
        .await?;

        let updated = AgreementRepository::new(self.db)
            .update_status(id, from, status, comment)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agreement {} not found", id)))?;

        tracing::info!(
            "User {} moved agreement {} from {} to {}",
            actor.id,
            updated.contract_number,
            from,
            status
        );

        Ok(updated)
    }

    async fn find(&self, id: i32) -> Result<Agreement, AppError> {
        AgreementRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Agreement {} not found", id)))
    }

    async fn check_placement(&self, params: &AgreementParams) -> Result<(), AppError> {
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

        if let Some(room_id) = params.room_id {
            let room = RoomRepository::new(self.db).find_by_id(room_id).await?;
            if room.is_none_or(|room| room.dormitory_id != params.dormitory_id) {
                return Err(AppError::BadRequest(format!(
                    "Room {} is not in dormitory {}",
                    room_id, params.dormitory_id
                )));
            }
        }

        Ok(())
    }
}
