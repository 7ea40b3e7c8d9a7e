//! Room reservation factory.

use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test room reservations.
pub struct ReservationFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    room_id: i32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
}

impl<'a> ReservationFactory<'a> {
    /// Creates a new ReservationFactory.
    ///
    /// Defaults: starts tomorrow, lasts 30 days, status `"pending"`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, room_id: i32) -> Self {
        let start_date = Utc::now().date_naive() + Duration::days(1);
        Self {
            db,
            user_id,
            room_id,
            start_date,
            end_date: start_date + Duration::days(30),
            status: "pending".to_string(),
        }
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = end_date;
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Builds and inserts the reservation entity into the database.
    pub async fn build(self) -> Result<entity::room_reservation::Model, DbErr> {
        let now = Utc::now();
        entity::room_reservation::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            room_id: ActiveValue::Set(self.room_id),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            status: ActiveValue::Set(self.status),
            comment: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
