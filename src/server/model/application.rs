//! Accommodation application domain models and the review transition table.

use chrono::{DateTime, Utc};

use crate::{
    model::application::{ApplicationDto, ApplicationStatus},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::PageRequest,
    },
};

/// Who, besides administrators, may move an application along an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewActor {
    /// Dean office staff of the application's faculty.
    FacultyStaff,
    /// Manager of the application's dormitory.
    DormManager,
    /// The student who filed the application.
    Applicant,
}

impl ApplicationStatus {
    /// Statuses a student may hold at most one of at a time.
    pub const OPEN: [ApplicationStatus; 3] = [
        ApplicationStatus::Pending,
        ApplicationStatus::ApprovedByFaculty,
        ApplicationStatus::ApprovedByDorm,
    ];

    /// Looks up the edge `self -> to` in the transition table.
    ///
    /// # Returns
    /// - `Some(actor)` - The transition exists and `actor` may perform it
    /// - `None` - The transition is not allowed for anyone
    pub fn transition_actor(self, to: ApplicationStatus) -> Option<ReviewActor> {
        use ApplicationStatus::*;

        match (self, to) {
            (Pending, ApprovedByFaculty | RejectedByFaculty) => Some(ReviewActor::FacultyStaff),
            (ApprovedByFaculty, ApprovedByDorm | RejectedByDorm) => Some(ReviewActor::DormManager),
            (ApprovedByDorm, Settled) => Some(ReviewActor::DormManager),
            (Pending | ApprovedByFaculty, Cancelled) => Some(ReviewActor::Applicant),
            _ => None,
        }
    }

    pub fn is_open(self) -> bool {
        Self::OPEN.contains(&self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Application {
    pub id: i32,
    pub user_id: i32,
    pub faculty_id: i32,
    pub dormitory_id: Option<i32>,
    pub course: i16,
    pub comment: Option<String>,
    pub status: ApplicationStatus,
    pub review_comment: Option<String>,
    pub reviewed_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Application {
    pub fn from_entity(entity: entity::accommodation_application::Model) -> Result<Self, AppError> {
        let status = entity
            .status
            .parse::<ApplicationStatus>()
            .map_err(InternalError::from)?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            faculty_id: entity.faculty_id,
            dormitory_id: entity.dormitory_id,
            course: entity.course,
            comment: entity.comment,
            status,
            review_comment: entity.review_comment,
            reviewed_by: entity.reviewed_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> ApplicationDto {
        ApplicationDto {
            id: self.id,
            user_id: self.user_id,
            faculty_id: self.faculty_id,
            dormitory_id: self.dormitory_id,
            course: self.course,
            comment: self.comment,
            status: self.status,
            review_comment: self.review_comment,
            reviewed_by: self.reviewed_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateApplicationParams {
    pub user_id: i32,
    pub faculty_id: i32,
    pub dormitory_id: Option<i32>,
    pub course: i16,
    pub comment: Option<String>,
}

/// A reviewed status change to persist.
#[derive(Debug, Clone)]
pub struct ApplicationReview {
    pub id: i32,
    /// Status the review was validated against; the write only applies while it still holds.
    pub from: ApplicationStatus,
    pub status: ApplicationStatus,
    pub review_comment: Option<String>,
    pub reviewed_by: i32,
    /// Replaces the requested dormitory when set.
    pub dormitory_id: Option<i32>,
}

/// Listing filters. `dormitory_ids` narrows results to a manager's dormitories.
#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub status: Option<ApplicationStatus>,
    pub faculty_id: Option<i32>,
    pub dormitory_id: Option<i32>,
    pub dormitory_ids: Option<Vec<i32>>,
    /// With `dormitory_ids`, also match applications awaiting a dormitory assignment.
    pub include_unassigned: bool,
    pub page: PageRequest,
}
