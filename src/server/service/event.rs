//! Student council events.

use sea_orm::DatabaseConnection;

use crate::{
    model::user::Role,
    server::{
        data::{dormitory::DormitoryRepository, event::EventRepository},
        error::{auth::AuthError, AppError},
        model::{
            event::{Event, EventFilter, EventParams},
            user::User,
        },
    },
};

pub struct EventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, filter: EventFilter) -> Result<Vec<Event>, AppError> {
        EventRepository::new(self.db).list(&filter).await
    }

    pub async fn get(&self, id: i32) -> Result<Event, AppError> {
        EventRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    pub async fn create(&self, actor: &User, params: EventParams) -> Result<Event, AppError> {
        self.check_dormitory(params.dormitory_id).await?;

        EventRepository::new(self.db).create(actor.id, params).await
    }

    pub async fn update(&self, id: i32, params: EventParams) -> Result<Event, AppError> {
        self.check_dormitory(params.dormitory_id).await?;

        EventRepository::new(self.db)
            .update(id, params)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", id)))
    }

    /// Deletes an event. Allowed for administrators, the council head and the creator.
    pub async fn delete(&self, actor: &User, id: i32) -> Result<(), AppError> {
        let event = self.get(id).await?;

        let allowed = actor.is_admin()
            || actor.role == Role::StudentCouncilHead
            || event.created_by == actor.id;
        if !allowed {
            return Err(AuthError::AccessDenied(actor.id, format!("cannot delete event {}", id)).into());
        }

        EventRepository::new(self.db).delete(id).await?;
        Ok(())
    }

    async fn check_dormitory(&self, dormitory_id: Option<i32>) -> Result<(), AppError> {
        let Some(dormitory_id) = dormitory_id else {
            return Ok(());
        };

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
