//! Settlement schedule factory.

use chrono::{Duration, NaiveDate, NaiveTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating settlement schedule entries.
pub struct ScheduleFactory<'a> {
    db: &'a DatabaseConnection,
    dormitory_id: i32,
    faculty_id: Option<i32>,
    course: Option<i16>,
    date: NaiveDate,
    start_time: NaiveTime,
    end_time: NaiveTime,
}

impl<'a> ScheduleFactory<'a> {
    /// Creates a new ScheduleFactory.
    ///
    /// Defaults: one week from today, 09:00 to 12:00, open to all faculties and courses.
    pub fn new(db: &'a DatabaseConnection, dormitory_id: i32) -> Self {
        Self {
            db,
            dormitory_id,
            faculty_id: None,
            course: None,
            date: Utc::now().date_naive() + Duration::days(7),
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap_or_default(),
        }
    }

    pub fn faculty_id(mut self, faculty_id: i32) -> Self {
        self.faculty_id = Some(faculty_id);
        self
    }

    pub fn course(mut self, course: i16) -> Self {
        self.course = Some(course);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = start_time;
        self
    }

    /// Builds and inserts the schedule entry into the database.
    pub async fn build(self) -> Result<entity::settlement_schedule::Model, DbErr> {
        entity::settlement_schedule::ActiveModel {
            dormitory_id: ActiveValue::Set(self.dormitory_id),
            faculty_id: ActiveValue::Set(self.faculty_id),
            course: ActiveValue::Set(self.course),
            date: ActiveValue::Set(self.date),
            start_time: ActiveValue::Set(self.start_time),
            end_time: ActiveValue::Set(self.end_time),
            note: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
