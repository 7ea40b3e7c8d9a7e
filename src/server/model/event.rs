//! Dormitory event domain models.

use chrono::{DateTime, Utc};

use crate::model::event::EventDto;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub dormitory_id: Option<i32>,
    pub created_by: i32,
}

impl Event {
    pub fn from_entity(entity: entity::event::Model) -> Self {
        Self {
            id: entity.id,
            title: entity.title,
            description: entity.description,
            location: entity.location,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            dormitory_id: entity.dormitory_id,
            created_by: entity.created_by,
        }
    }

    pub fn into_dto(self) -> EventDto {
        EventDto {
            id: self.id,
            title: self.title,
            description: self.description,
            location: self.location,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
            dormitory_id: self.dormitory_id,
            created_by: self.created_by,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EventParams {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub starts_at: DateTime<Utc>,
    pub ends_at: Option<DateTime<Utc>>,
    pub dormitory_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub dormitory_id: Option<i32>,
    /// Only events that have not started before this instant.
    pub starting_after: Option<DateTime<Utc>>,
}
