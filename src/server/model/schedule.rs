//! Settlement schedule domain models.

use chrono::{NaiveDate, NaiveTime};

use crate::model::schedule::ScheduleEntryDto;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: i32,
    pub dormitory_id: i32,
    pub faculty_id: Option<i32>,
    pub course: Option<i16>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

impl ScheduleEntry {
    pub fn from_entity(entity: entity::settlement_schedule::Model) -> Self {
        Self {
            id: entity.id,
            dormitory_id: entity.dormitory_id,
            faculty_id: entity.faculty_id,
            course: entity.course,
            date: entity.date,
            start_time: entity.start_time,
            end_time: entity.end_time,
            note: entity.note,
        }
    }

    pub fn into_dto(self) -> ScheduleEntryDto {
        ScheduleEntryDto {
            id: self.id,
            dormitory_id: self.dormitory_id,
            faculty_id: self.faculty_id,
            course: self.course,
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            note: self.note,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScheduleEntryParams {
    pub dormitory_id: i32,
    pub faculty_id: Option<i32>,
    pub course: Option<i16>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleFilter {
    pub dormitory_id: Option<i32>,
    pub faculty_id: Option<i32>,
    /// Entries on or after this date.
    pub from: Option<NaiveDate>,
}
