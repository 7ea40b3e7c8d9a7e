//! Settlement agreement factory.

use crate::factory::helpers::next_id;
use chrono::{Duration, NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test settlement agreements.
pub struct AgreementFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    dormitory_id: i32,
    room_id: Option<i32>,
    contract_number: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: String,
}

impl<'a> AgreementFactory<'a> {
    /// Creates a new AgreementFactory.
    ///
    /// Defaults: contract number `"TEST-{id}"`, starts today, lasts 300 days,
    /// status `"pending_review"`.
    pub fn new(db: &'a DatabaseConnection, user_id: i32, dormitory_id: i32) -> Self {
        let today = Utc::now().date_naive();
        Self {
            db,
            user_id,
            dormitory_id,
            room_id: None,
            contract_number: format!("TEST-{}", next_id()),
            start_date: today,
            end_date: today + Duration::days(300),
            status: "pending_review".to_string(),
        }
    }

    pub fn room_id(mut self, room_id: i32) -> Self {
        self.room_id = Some(room_id);
        self
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

    /// Builds and inserts the agreement entity into the database.
    pub async fn build(self) -> Result<entity::settlement_agreement::Model, DbErr> {
        let now = Utc::now();
        entity::settlement_agreement::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            dormitory_id: ActiveValue::Set(self.dormitory_id),
            room_id: ActiveValue::Set(self.room_id),
            contract_number: ActiveValue::Set(self.contract_number),
            start_date: ActiveValue::Set(self.start_date),
            end_date: ActiveValue::Set(self.end_date),
            passport_number: ActiveValue::Set("AB123456".to_string()),
            status: ActiveValue::Set(self.status),
            review_comment: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
