//! Settlement agreement domain models.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

use crate::{
    model::agreement::{AgreementDto, AgreementStatus},
    server::{
        error::{internal::InternalError, AppError},
        model::pagination::PageRequest,
    },
};

impl AgreementStatus {
    /// Whether the dormitory manager may move an agreement from `self` to `to`.
    pub fn can_transition_to(self, to: AgreementStatus) -> bool {
        use AgreementStatus::*;

        matches!(
            (self, to),
            (PendingReview, Approved | Rejected) | (Approved, Archived)
        )
    }
}

/// Formats the public contract number for an agreement, e.g. `SA-2026-000042`.
pub fn contract_number(created_at: DateTime<Utc>, id: i32) -> String {
    format!("SA-{}-{:06}", created_at.year(), id)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agreement {
    pub id: i32,
    pub user_id: i32,
    pub dormitory_id: i32,
    pub room_id: Option<i32>,
    pub contract_number: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub passport_number: String,
    pub status: AgreementStatus,
    pub review_comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Agreement {
    pub fn from_entity(entity: entity::settlement_agreement::Model) -> Result<Self, AppError> {
        let status = entity
            .status
            .parse::<AgreementStatus>()
            .map_err(InternalError::from)?;

        Ok(Self {
            id: entity.id,
            user_id: entity.user_id,
            dormitory_id: entity.dormitory_id,
            room_id: entity.room_id,
            contract_number: entity.contract_number,
            start_date: entity.start_date,
            end_date: entity.end_date,
            passport_number: entity.passport_number,
            status,
            review_comment: entity.review_comment,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    pub fn into_dto(self) -> AgreementDto {
        AgreementDto {
            id: self.id,
            user_id: self.user_id,
            dormitory_id: self.dormitory_id,
            room_id: self.room_id,
            contract_number: self.contract_number,
            start_date: self.start_date,
            end_date: self.end_date,
            passport_number: self.passport_number,
            status: self.status,
            review_comment: self.review_comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Fields a student submits and may edit while the agreement awaits review.
#[derive(Debug, Clone)]
pub struct AgreementParams {
    pub dormitory_id: i32,
    pub room_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub passport_number: String,
}

#[derive(Debug, Clone, Default)]
pub struct AgreementFilter {
    pub status: Option<AgreementStatus>,
    pub dormitory_id: Option<i32>,
    pub dormitory_ids: Option<Vec<i32>>,
    pub page: PageRequest,
}
