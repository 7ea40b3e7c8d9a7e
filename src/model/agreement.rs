use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

use super::api::ParseEnumError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    PendingReview,
    Approved,
    Rejected,
    Archived,
}

impl AgreementStatus {
    pub const ALL: [AgreementStatus; 4] = [
        AgreementStatus::PendingReview,
        AgreementStatus::Approved,
        AgreementStatus::Rejected,
        AgreementStatus::Archived,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AgreementStatus::PendingReview => "pending_review",
            AgreementStatus::Approved => "approved",
            AgreementStatus::Rejected => "rejected",
            AgreementStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for AgreementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgreementStatus {
    type Err = ParseEnumError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        AgreementStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| ParseEnumError {
                kind: "agreement status",
                value: value.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AgreementDto {
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

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AgreementFormDto {
    pub dormitory_id: i32,
    pub room_id: Option<i32>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub passport_number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateAgreementStatusDto {
    pub status: AgreementStatus,
    pub comment: Option<String>,
}
