use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntryDto {
    pub id: i32,
    pub dormitory_id: i32,
    pub faculty_id: Option<i32>,
    pub course: Option<i16>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduleEntryFormDto {
    pub dormitory_id: i32,
    pub faculty_id: Option<i32>,
    pub course: Option<i16>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub note: Option<String>,
}
